pub trait U16Ext {
    fn lsb(self) -> u8;

    fn msb(self) -> u8;

    fn set_lsb(&mut self, value: u8);

    fn set_msb(&mut self, value: u8);
}

impl U16Ext for u16 {
    #[inline(always)]
    fn lsb(self) -> u8 {
        (self & 0xFF) as u8
    }

    #[inline(always)]
    fn msb(self) -> u8 {
        (self >> 8) as u8
    }

    #[inline(always)]
    fn set_lsb(&mut self, value: u8) {
        *self = (*self & 0xFF00) | u16::from(value);
    }

    #[inline(always)]
    fn set_msb(&mut self, value: u8) {
        *self = (*self & 0x00FF) | (u16::from(value) << 8);
    }
}

/// 4-bit fields packed into a 16-bit word.
pub trait Nibbles: Copy {
    /// Bits 12-15, sign-extended
    #[must_use]
    fn high_nibble_signed(self) -> i16;

    /// Bits 8-11, zero-extended
    #[must_use]
    fn second_nibble(self) -> i16;
}

impl Nibbles for i16 {
    #[inline]
    fn high_nibble_signed(self) -> i16 {
        self >> 12
    }

    #[inline]
    fn second_nibble(self) -> i16 {
        (self >> 8) & 0x0F
    }
}

/// Expand an 8-bit PCM byte to 16 bits by repeating it in both halves of the word.
#[inline]
#[must_use]
pub fn duplicate_byte(byte: u8) -> i16 {
    i16::from_le_bytes([byte, byte])
}
