use crate::dsp::tables;
use crate::rom::SampleSource;
use bincode::{Decode, Encode};
use qsound_common::num::Nibbles;

pub const ADPCM_COUNT: usize = 3;

const INITIAL_SIGNAL: u16 = 10;
const MIN_SIGNAL: i16 = 1;
const MAX_SIGNAL: i16 = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nibble {
    // Bits 4-7 of the sample byte, signed, decoded before the address advances
    High,
    // Bits 0-3 of the sample byte, unsigned; the address advances after this one
    Low,
}

/// One adaptive delta-coded channel.
///
/// Parameter registers are written by the host; decoder state registers are also host-visible
/// but rewritten by the decoder on every phase.
#[derive(Debug, Clone, Default, Encode, Decode)]
pub struct AdpcmChannel {
    pub start_address: u16,
    pub end_address: u16,
    pub bank: u16,
    pub volume: u16,
    pub trigger: u16,
    pub current_volume: u16,
    pub signal: u16,
    pub current_address: u16,
    pub step: u16,
    pub output: i16,
}

impl AdpcmChannel {
    pub fn read_parameter(&self, index: u16) -> u16 {
        match index & 3 {
            0 => self.start_address,
            1 => self.end_address,
            2 => self.bank,
            3 => self.volume,
            _ => unreachable!("value & 3 is always <= 3"),
        }
    }

    pub fn write_parameter(&mut self, index: u16, value: u16) {
        match index & 3 {
            0 => self.start_address = value,
            1 => self.end_address = value,
            2 => self.bank = value,
            3 => self.volume = value,
            _ => unreachable!("value & 3 is always <= 3"),
        }
    }

    /// Decode one nibble. The high nibble phase also handles end-of-sample muting and trigger
    /// pickup.
    pub fn decode<S: SampleSource + ?Sized>(&mut self, rom: &S, nibble: Nibble) {
        let step = match nibble {
            Nibble::High => {
                if self.current_address == self.end_address {
                    self.current_volume = 0;
                }

                if self.trigger != 0 {
                    log::trace!(
                        "ADPCM trigger, start={:04X} end={:04X}",
                        self.start_address,
                        self.end_address
                    );

                    self.output = 0;
                    self.trigger = 0;
                    self.signal = INITIAL_SIGNAL;
                    self.current_volume = self.volume;
                    self.current_address = self.start_address;
                }

                rom.read_sample(self.bank, self.current_address).high_nibble_signed()
            }
            Nibble::Low => {
                let sample = rom.read_sample(self.bank, self.current_address);
                self.current_address = self.current_address.wrapping_add(1);
                sample.second_nibble()
            }
        };
        self.step = step as u16;

        let signal = self.signal as i16;
        let delta = i32::from(step) * i32::from(signal);

        // Round toward the direction of the delta
        let mut bias = signal >> 1;
        if delta <= 0 {
            bias = -bias;
        }

        let sum = (i32::from(self.output).wrapping_add(delta) as i16).wrapping_add(bias);
        self.output = ((i32::from(self.current_volume as i16) * i32::from(sum)) >> 16) as i16;

        let scale = tables::ADPCM_STEP_TABLE[(8 + step) as usize];
        let new_signal = (((i32::from(scale) * i32::from(signal)) << 10) >> 16) as i16;
        self.signal = new_signal.clamp(MIN_SIGNAL, MAX_SIGNAL) as u16;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    struct ByteRom(Vec<u8>);

    impl SampleSource for ByteRom {
        fn read_byte(&self, address: u32) -> u8 {
            self.0.get(address as usize).copied().unwrap_or(0)
        }
    }

    fn triggered_channel() -> AdpcmChannel {
        AdpcmChannel {
            start_address: 0x0000,
            end_address: 0x0100,
            bank: 0x8000,
            volume: 0x7FFF,
            trigger: 1,
            ..AdpcmChannel::default()
        }
    }

    #[test]
    fn trigger_picks_up_parameters() {
        let rom = ByteRom(vec![0x00; 0x100]);
        let mut channel = triggered_channel();
        channel.current_address = 0x0050;
        channel.output = 0x1234;

        channel.decode(&rom, Nibble::High);

        assert_eq!(channel.trigger, 0);
        assert_eq!(channel.current_volume, 0x7FFF);
        assert_eq!(channel.current_address, 0x0000);
        assert_eq!(channel.step, 0);
        // Zero delta: bias is negated, (10 >> 1) = 5 -> -5, scaled by 0x7FFF
        assert_eq!(channel.output, ((0x7FFF * -5) >> 16) as i16);
        // Step scale 0x3A: (0x3A * 10) << 10 >> 16 = 9
        assert_eq!(channel.signal, 9);
    }

    #[test]
    fn address_advances_after_low_nibble() {
        let rom = ByteRom(vec![0x7F, 0x80]);
        let mut channel = triggered_channel();

        channel.decode(&rom, Nibble::High);
        assert_eq!(channel.step, 7);
        assert_eq!(channel.current_address, 0);

        channel.decode(&rom, Nibble::Low);
        assert_eq!(channel.step, 15);
        assert_eq!(channel.current_address, 1);

        channel.decode(&rom, Nibble::High);
        assert_eq!(channel.step as i16, -8);
        assert_eq!(channel.current_address, 1);
    }

    #[test]
    fn large_low_nibble_collapses_signal() {
        let rom = ByteRom(vec![0x0F]);
        let mut channel = triggered_channel();

        channel.decode(&rom, Nibble::High);
        assert_eq!((channel.step, channel.output, channel.signal), (0, -3, 9));

        // Step 15: delta 9 * 15 = 135, bias +4, and the step scale is 0
        channel.decode(&rom, Nibble::Low);
        assert_eq!(channel.step, 15);
        assert_eq!(channel.output, 67);
        assert_eq!(channel.signal, 1);

        // Signal 1 has no bias and scales back down to the floor
        channel.decode(&rom, Nibble::High);
        assert_eq!((channel.step, channel.output, channel.signal), (0, 33, 1));
    }

    #[test]
    fn mutes_at_end_address() {
        let rom = ByteRom(vec![0x77; 4]);
        let mut channel = triggered_channel();
        channel.end_address = 1;

        channel.decode(&rom, Nibble::High);
        channel.decode(&rom, Nibble::Low);
        assert_ne!(channel.current_volume, 0);

        channel.decode(&rom, Nibble::High);
        assert_eq!(channel.current_volume, 0);
        assert_eq!(channel.output, 0);
    }

    #[test]
    fn signal_stays_in_range() {
        let data: Vec<u8> = (0..=255).map(|i: u32| ((i * 0x9D) ^ (i >> 3)) as u8).collect();
        let rom = ByteRom(data);
        let mut channel = triggered_channel();
        channel.end_address = 0xFFFF;

        for i in 0..10_000 {
            let nibble = if i % 2 == 0 { Nibble::High } else { Nibble::Low };
            channel.decode(&rom, nibble);
            assert!((1..=2000).contains(&(channel.signal as i16)), "signal {}", channel.signal);
        }

        // Largest step scale saturates the signal
        let rom = ByteRom(vec![0x88; 0x100]);
        let mut channel = triggered_channel();
        for _ in 0..64 {
            channel.decode(&rom, Nibble::High);
        }
        assert_eq!(channel.signal, 2000);
    }
}
