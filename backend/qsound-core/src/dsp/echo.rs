use crate::dsp::mac::high_word;
use crate::dsp::ring::RingCursor;
use crate::dsp::voice::{Voice, VOICE_COUNT};
use bincode::{Decode, Encode};
use qsound_config::FilterTopology;

// The echo buffer runs from its start address to the end of DSP RAM
const RAM_END: u16 = 0x800;

const MODE_1_START: u16 = 0x554;
const MODE_2_START: u16 = 0x53C;

// Largest possible buffer (mode 2 layout)
const CAPACITY: usize = (RAM_END - MODE_2_START) as usize;

// Initial buffer end relative to its start
const DEFAULT_LENGTH: u16 = 6;

/// Shared echo/reverb feedback buffer.
#[derive(Debug, Clone, Encode, Decode)]
pub struct Echo {
    /// Feedback volume register
    pub feedback: u16,
    /// Buffer end register; the last buffer address written before wrapping
    pub end_address: u16,
    buffer: Box<[i16; CAPACITY]>,
    cursor: RingCursor,
    last_tap: i16,
    output: i16,
}

impl Echo {
    pub fn new(topology: FilterTopology) -> Self {
        let start = match topology {
            FilterTopology::Mode1 => MODE_1_START,
            FilterTopology::Mode2 => MODE_2_START,
        };

        Self {
            feedback: 0,
            end_address: start + DEFAULT_LENGTH,
            buffer: Box::new([0; CAPACITY]),
            cursor: RingCursor::new(start, RAM_END - start),
            last_tap: 0,
            output: 0,
        }
    }

    /// Smoothed tap from the most recent clock, mixed into the left output path and the right
    /// filter path.
    pub fn output(&self) -> i16 {
        self.output
    }

    /// Read the tap at the cursor, then write back the voices' reverb sends plus feedback.
    pub fn clock(&mut self, voices: &[Voice; VOICE_COUNT]) {
        let mut acc = 0_i32;
        for voice in voices {
            let product = i32::from(voice.output) * i32::from(voice.reverb_send as i16);
            acc = acc.wrapping_add(product << 2);
        }

        let tap = self.buffer[self.cursor.index()];

        // The tap is stored before the average is taken, so the average is just the tap itself
        self.last_tap = tap;
        let smoothed = ((i32::from(tap) + i32::from(self.last_tap)) >> 1) as i16;
        self.output = smoothed;

        let feedback = i32::from(self.feedback as i16) * i32::from(smoothed);
        acc = acc.wrapping_add(feedback << 2);

        self.buffer[self.cursor.index()] = high_word(acc);
        self.cursor.advance_with_end(self.end_address);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::array;
    use test_log::test;

    fn voices_with(output: i16, reverb_send: u16) -> [Voice; VOICE_COUNT] {
        array::from_fn(|i| Voice {
            output: if i == 0 { output } else { 0 },
            reverb_send,
            ..Voice::default()
        })
    }

    #[test]
    fn echo_repeats_after_buffer_length() {
        let mut echo = Echo::new(FilterTopology::Mode1);

        // 0x4000 * 0x4000 << 2 >> 16 = 0x4000
        echo.clock(&voices_with(0x4000, 0x4000));
        assert_eq!(echo.output(), 0);

        let silent = voices_with(0, 0);
        for _ in 0..6 {
            echo.clock(&silent);
            assert_eq!(echo.output(), 0);
        }

        // Buffer holds 7 words with the default end address
        echo.clock(&silent);
        assert_eq!(echo.output(), 0x4000);
    }

    #[test]
    fn feedback_decays() {
        let mut echo = Echo::new(FilterTopology::Mode2);
        echo.end_address = echo.cursor.start();
        echo.feedback = 0x2000;

        echo.clock(&voices_with(0x4000, 0x4000));
        echo.clock(&voices_with(0, 0));
        assert_eq!(echo.output(), 0x4000);

        // 0x2000 * 0x4000 << 2 >> 16 = 0x2000
        echo.clock(&voices_with(0, 0));
        assert_eq!(echo.output(), 0x2000);
    }

    #[test]
    fn end_outside_buffer_wraps_at_ram_end() {
        let mut echo = Echo::new(FilterTopology::Mode1);
        echo.end_address = 0;

        for _ in 0..usize::from(RAM_END - MODE_1_START) {
            echo.clock(&voices_with(0, 0));
        }
        assert_eq!(echo.cursor.position(), MODE_1_START);
    }
}
