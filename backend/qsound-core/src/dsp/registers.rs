//! Host-addressable register map (DSP RAM words 0x00-0xFF)

use crate::dsp::Dsp;

impl Dsp {
    pub fn read_register(&self, address: u8) -> u16 {
        let address_u16: u16 = address.into();
        let value = match address {
            0x00..=0x7F => self.voices[usize::from(address >> 3)].read_field(address_u16),
            0x80..=0x92 => self.mixer.positions[usize::from(address - 0x80)],
            0x93 => self.echo.feedback,
            0xBA..=0xC9 => self.voices[usize::from(address - 0xBA)].reverb_send,
            0xCA..=0xD5 => {
                let offset = address - 0xCA;
                self.adpcm[usize::from(offset >> 2)].read_parameter(offset.into())
            }
            0xD6..=0xD8 => self.adpcm[usize::from(address - 0xD6)].trigger,
            0xD9 => self.echo.end_address,
            0xDA..=0xDD => self.filter_selectors[usize::from(address - 0xDA)],
            0xDE..=0xE1 => self.delays.lines[usize::from(address - 0xDE)].delay,
            0xE2 => self.filter_refresh,
            0xE3 => self.routine_code,
            0xE4..=0xE7 => self.delays.lines[usize::from(address - 0xE4)].volume,
            0xE8..=0xEA => self.adpcm[usize::from(address - 0xE8)].current_volume,
            0xEB..=0xED => self.adpcm[usize::from(address - 0xEB)].signal,
            0xF1..=0xF3 => self.adpcm[usize::from(address - 0xF1)].current_address,
            0xF4..=0xF6 => self.adpcm[usize::from(address - 0xF4)].step,
            0xF7..=0xFF => self.mixer.right_positions[usize::from(address - 0xF7)],
            0x94..=0xB9 => self.unused_registers[usize::from(address - 0x94)],
            0xEE..=0xF0 => self.unused_adpcm_registers[usize::from(address - 0xEE)],
        };

        log::trace!("Register read: {address:02X} = {value:04X}");

        value
    }

    pub fn write_register(&mut self, address: u8, value: u16) {
        log::trace!("Register write: {address:02X} = {value:04X}");

        let address_u16: u16 = address.into();
        match address {
            0x00..=0x7F => self.voices[usize::from(address >> 3)].write_field(address_u16, value),
            0x80..=0x92 => self.mixer.positions[usize::from(address - 0x80)] = value,
            0x93 => self.echo.feedback = value,
            0xBA..=0xC9 => self.voices[usize::from(address - 0xBA)].reverb_send = value,
            0xCA..=0xD5 => {
                let offset = address - 0xCA;
                self.adpcm[usize::from(offset >> 2)].write_parameter(offset.into(), value);
            }
            0xD6..=0xD8 => self.adpcm[usize::from(address - 0xD6)].trigger = value,
            0xD9 => self.echo.end_address = value,
            0xDA..=0xDD => self.filter_selectors[usize::from(address - 0xDA)] = value,
            0xDE..=0xE1 => self.delays.lines[usize::from(address - 0xDE)].delay = value,
            0xE2 => self.filter_refresh = value,
            0xE3 => self.routine_code = value,
            0xE4..=0xE7 => self.delays.lines[usize::from(address - 0xE4)].volume = value,
            0xE8..=0xEA => self.adpcm[usize::from(address - 0xE8)].current_volume = value,
            0xEB..=0xED => self.adpcm[usize::from(address - 0xEB)].signal = value,
            0xF1..=0xF3 => self.adpcm[usize::from(address - 0xF1)].current_address = value,
            0xF4..=0xF6 => self.adpcm[usize::from(address - 0xF4)].step = value,
            0xF7..=0xFF => self.mixer.right_positions[usize::from(address - 0xF7)] = value,
            0x94..=0xB9 => self.unused_registers[usize::from(address - 0x94)] = value,
            0xEE..=0xF0 => self.unused_adpcm_registers[usize::from(address - 0xEE)] = value,
        }
    }
}
