use crate::rom::SampleSource;
use bincode::{Decode, Encode};

pub const VOICE_COUNT: usize = 16;

/// Bank value written to every voice on init; with bank bit 15 ignored this points at the first
/// 64KB of sample ROM, and a zero volume keeps it silent.
pub const MUTED_BANK: u16 = 0x8000;

/// One PCM voice. Fields are stored in the raw 16-bit form the host writes them.
#[derive(Debug, Clone, Default, Encode, Decode)]
pub struct Voice {
    pub bank: u16,
    pub address: u16,
    pub rate: u16,
    pub phase: u16,
    pub loop_len: u16,
    pub end_address: u16,
    pub volume: u16,
    // Word 7 of the voice block is not used by the DSP program, but it is still RAM
    pub unused: u16,
    pub reverb_send: u16,
    pub output: i16,
}

impl Voice {
    pub fn read_field(&self, field: u16) -> u16 {
        match field & 7 {
            0 => self.bank,
            1 => self.address,
            2 => self.rate,
            3 => self.phase,
            4 => self.loop_len,
            5 => self.end_address,
            6 => self.volume,
            7 => self.unused,
            _ => unreachable!("value & 7 is always <= 7"),
        }
    }

    pub fn write_field(&mut self, field: u16, value: u16) {
        match field & 7 {
            0 => self.bank = value,
            1 => self.address = value,
            2 => self.rate = value,
            3 => self.phase = value,
            4 => self.loop_len = value,
            5 => self.end_address = value,
            6 => self.volume = value,
            7 => self.unused = value,
            _ => unreachable!("value & 7 is always <= 7"),
        }
    }

    /// Produce this tick's output sample, then step the play position.
    ///
    /// `sample_bank` is the bank register of the previous voice; the DSP program loads the next
    /// voice's bank while the current voice's sample is being fetched.
    fn clock<S: SampleSource + ?Sized>(&mut self, rom: &S, sample_bank: u16) {
        let sample = rom.read_sample(sample_bank, self.address);
        let product = i32::from(self.volume as i16) * i32::from(sample);
        self.output = (product >> 14) as i16;

        self.advance();
    }

    fn advance(&mut self) {
        let mut position =
            i64::from((i32::from(self.address as i16) << 16) | i32::from(self.phase));
        position += i64::from(self.rate) << 4;

        if ((position >> 16) as u16) >= self.end_address {
            position -= i64::from(self.loop_len) << 16;
        }

        // The accumulator is wider than 32 bits; storing it back to RAM saturates
        let position = position.clamp(i32::MIN.into(), i32::MAX.into());

        self.phase = position as u16;
        self.address = (position >> 16) as u16;
    }
}

/// Clock all voices in order.
pub fn clock_voices<S: SampleSource + ?Sized>(voices: &mut [Voice; VOICE_COUNT], rom: &S) {
    let mut sample_bank = voices[VOICE_COUNT - 1].bank;
    for voice in voices {
        voice.clock(rom, sample_bank);
        sample_bank = voice.bank;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::array;
    use test_log::test;

    struct FlatRom;

    impl SampleSource for FlatRom {
        fn read_byte(&self, address: u32) -> u8 {
            // Bank number in the sample so tests can tell which bank was read
            (address >> 16) as u8
        }
    }

    #[test]
    fn position_steps_by_rate() {
        let mut voice = Voice {
            address: 0x0100,
            phase: 0xF000,
            rate: 0x0200,
            end_address: 0xFFFF,
            ..Voice::default()
        };
        voice.advance();

        // rate << 4 = 0x2000 added to 0x0100_F000
        assert_eq!((voice.address, voice.phase), (0x0101, 0x1000));
    }

    #[test]
    fn loops_at_end_address() {
        let mut voice = Voice {
            address: 0x1FFF,
            phase: 0xF000,
            rate: 0x1000,
            end_address: 0x2000,
            loop_len: 0x0800,
            ..Voice::default()
        };
        voice.advance();

        assert_eq!((voice.address, voice.phase), (0x1800, 0xF000));
    }

    #[test]
    fn position_saturates() {
        let mut voice = Voice {
            address: 0x7FFF,
            phase: 0xFFF0,
            rate: 0xFFFF,
            end_address: 0xFFFF,
            ..Voice::default()
        };
        voice.advance();

        assert_eq!((voice.address, voice.phase), (0x7FFF, 0xFFFF));

        let mut voice = Voice {
            address: 0x8000,
            phase: 0x0000,
            rate: 0,
            end_address: 0x0000,
            loop_len: 0x0001,
            ..Voice::default()
        };
        voice.advance();

        assert_eq!((voice.address, voice.phase), (0x8000, 0x0000));
    }

    #[test]
    fn sample_uses_previous_voice_bank() {
        let mut voices: [Voice; VOICE_COUNT] = array::from_fn(|i| Voice {
            bank: 0x8000 | (i as u16 + 1),
            volume: 0x4000,
            end_address: 0xFFFF,
            ..Voice::default()
        });
        clock_voices(&mut voices, &FlatRom);

        // Volume 0x4000 passes the sample through unchanged
        assert_eq!(voices[0].output, 0x1010);
        for (i, voice) in voices.iter().enumerate().skip(1) {
            let expected = i16::from_le_bytes([i as u8, i as u8]);
            assert_eq!(voice.output, expected, "voice {i}");
        }
    }
}
