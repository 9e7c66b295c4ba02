use crate::dsp::fir::{FilterOutput, Side};
use crate::dsp::mac::{round_high, Multiplier};
use crate::dsp::ring::RingCursor;
use crate::dsp::tables::OUTPUT_TRIM;
use bincode::{Decode, Encode};
use qsound_config::FilterTopology;
use std::array;

const LINE_LEN: u16 = 51;
const FIRST_LINE_ADDRESS: u16 = 0x12D;

pub const FULL_VOLUME: u16 = 0x3FFF;

/// Delay register values after init, in register order (wet L, dry L, wet R, dry R)
pub const MODE_1_DEFAULT_DELAYS: [u16; 4] = [0x0000, 0x002E, 0x0000, 0x0030];
pub const MODE_2_DEFAULT_DELAYS: [u16; 4] = [0x0001, 0x0000, 0x0000, 0x0000];

/// Index of each line, matching the order of the delay and volume registers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Line {
    WetLeft = 0,
    DryLeft = 1,
    WetRight = 2,
    DryRight = 3,
}

#[derive(Debug, Clone, Encode, Decode)]
pub struct DelayLine {
    /// Delay register
    pub delay: u16,
    /// Volume register
    pub volume: u16,
    buffer: [i16; LINE_LEN as usize],
    write: RingCursor,
    read: RingCursor,
}

impl DelayLine {
    fn new(index: u16, delay: u16) -> Self {
        let start = FIRST_LINE_ADDRESS + index * LINE_LEN;
        let cursor = RingCursor::new(start, LINE_LEN);
        Self {
            delay,
            volume: FULL_VOLUME,
            buffer: [0; LINE_LEN as usize],
            write: cursor,
            read: cursor,
        }
    }

    fn recompute_read_cursor(&mut self) {
        let mut read_address = self.write.position().wrapping_sub(self.delay);
        if read_address < self.write.start() {
            read_address = read_address.wrapping_add(LINE_LEN);
        }

        // Delays longer than one line would read from neighboring DSP RAM; keep them inside the
        // line instead
        self.read.seek(read_address);
    }

    fn push(&mut self, sample: i16) {
        self.buffer[self.write.index()] = sample;
        self.write.advance();
    }

    fn pop(&mut self) -> i16 {
        let sample = self.buffer[self.read.index()];
        self.read.advance();
        sample
    }

    fn peek(&self) -> i16 {
        self.buffer[self.read.index()]
    }

    #[cfg(test)]
    pub fn read_address(&self) -> u16 {
        self.read.position()
    }
}

/// Wet and dry delay lines for both sides plus the final output mix.
#[derive(Debug, Clone, Encode, Decode)]
pub struct DelayNetwork {
    pub lines: [DelayLine; 4],
}

impl DelayNetwork {
    pub fn new(topology: FilterTopology) -> Self {
        let delays = match topology {
            FilterTopology::Mode1 => MODE_1_DEFAULT_DELAYS,
            FilterTopology::Mode2 => MODE_2_DEFAULT_DELAYS,
        };

        let mut network = Self { lines: array::from_fn(|i| DelayLine::new(i as u16, delays[i])) };
        network.recompute_read_cursors();
        network
    }

    /// Place each read cursor `delay` words behind its write cursor.
    pub fn recompute_read_cursors(&mut self) {
        for line in &mut self.lines {
            line.recompute_read_cursor();
        }
    }

    /// Push one side's filtered samples through its delay lines and produce the output sample.
    pub fn output(&mut self, side: Side, samples: FilterOutput) -> i16 {
        let (wet, dry) = match side {
            Side::Left => (Line::WetLeft, Line::DryLeft),
            Side::Right => (Line::WetRight, Line::DryRight),
        };

        let mut mac = Multiplier::new();

        let wet = &mut self.lines[wet as usize];
        wet.push(samples.wet);
        mac.x = wet.volume as i16;
        mac.y = wet.pop();
        mac.multiply();
        let mut acc = 0;
        mac.drain_add(&mut acc);

        let dry = &mut self.lines[dry as usize];
        dry.push(samples.dry);
        mac.x = dry.volume as i16;
        mac.y = dry.pop();
        mac.multiply();
        mac.drain_add(&mut acc);

        // The program multiplies the next dry tap by the trim coefficient, but the product is
        // never added to the accumulator
        mac.x = OUTPUT_TRIM;
        mac.y = dry.peek();
        mac.multiply();

        round_high(acc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn init_read_cursors() {
        let network = DelayNetwork::new(FilterTopology::Mode1);
        let read: Vec<u16> = network.lines.iter().map(DelayLine::read_address).collect();
        // Line starts 0x12D, 0x160, 0x193, 0x1C6
        assert_eq!(read, vec![0x12D, 0x160 + 51 - 0x2E, 0x193, 0x1C6 + 51 - 0x30]);

        let network = DelayNetwork::new(FilterTopology::Mode2);
        assert_eq!(network.lines[0].read_address(), 0x12D + 50);
    }

    #[test]
    fn short_delay_is_pushed_above_floor() {
        let mut network = DelayNetwork::new(FilterTopology::Mode1);
        network.lines[0].delay = 1;
        network.recompute_read_cursors();

        // 0x12D - 1 = 300 is below the line start of 301, so one line length is added
        assert_eq!(network.lines[0].read_address(), 300 + 51);

        network.lines[3].delay = 0x30;
        network.recompute_read_cursors();
        assert_eq!(network.lines[3].read_address(), 0x1C6 - 0x30 + 51);
    }

    #[test]
    fn delay_length_in_samples() {
        let mut network = DelayNetwork::new(FilterTopology::Mode1);
        for line in &mut network.lines {
            line.delay = 5;
        }
        network.recompute_read_cursors();

        let mut outputs = Vec::new();
        for i in 0..60 {
            let sample = if i == 0 { 0x4000 } else { 0 };
            outputs.push(network.output(Side::Left, FilterOutput { wet: sample, dry: 0 }));
        }

        // 0x3FFF * 0x4000 << 2 rounds to 0x3FFF
        let position = outputs.iter().position(|&sample| sample != 0);
        assert_eq!(position, Some(5));
        assert_eq!(outputs[5], 0x3FFF);
        assert!(outputs[6..].iter().all(|&sample| sample == 0));
    }

    #[test]
    fn zero_delay_sums_wet_and_dry() {
        let mut network = DelayNetwork::new(FilterTopology::Mode2);
        for line in &mut network.lines {
            line.delay = 0;
            line.volume = 0x2000;
        }
        network.recompute_read_cursors();

        for _ in 0..LINE_LEN * 2 {
            let sample = network.output(Side::Right, FilterOutput { wet: 0x1000, dry: 0x0800 });
            // (0x2000 * 0x1000 + 0x2000 * 0x0800) << 2 = 0x0C00_0000
            assert_eq!(sample, 0x0C00);
        }
    }
}
