use bincode::{Decode, Encode};

/// The DSP's multiplier: X and Y operand registers and the product register P.
///
/// A multiply-accumulate instruction adds the product latched by the *previous* instruction and
/// latches a new product in the same cycle, so every accumulation lags its multiply by one step.
/// Products are shifted left 2 before accumulating and all sums wrap at 32 bits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Encode, Decode)]
pub struct Multiplier {
    pub x: i16,
    pub y: i16,
    product: i32,
}

impl Multiplier {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn product(self) -> i32 {
        self.product
    }

    /// `acc -= P << 2`, then `P = X * Y`
    #[inline]
    pub fn subtract_and_multiply(&mut self, acc: &mut i32) {
        *acc = acc.wrapping_sub(self.product << 2);
        self.multiply();
    }

    /// `P = X * Y` without accumulating the pending product
    #[inline]
    pub fn multiply(&mut self) {
        self.product = i32::from(self.x) * i32::from(self.y);
    }

    /// `acc -= P << 2`, leaving P unchanged
    #[inline]
    pub fn drain_subtract(self, acc: &mut i32) {
        *acc = acc.wrapping_sub(self.product << 2);
    }

    /// `acc += P << 2`, leaving P unchanged
    #[inline]
    pub fn drain_add(self, acc: &mut i32) {
        *acc = acc.wrapping_add(self.product << 2);
    }
}

/// High word of a 32-bit accumulator, truncated
#[inline]
pub fn high_word(acc: i32) -> i16 {
    (acc >> 16) as i16
}

/// Round a 32-bit accumulator to its high word: add half an LSB of the high word, then clear the
/// low 16 bits.
#[inline]
pub fn round_high(acc: i32) -> i16 {
    ((acc.wrapping_add(0x8000) & !0xFFFF) >> 16) as i16
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn product_lags_one_step() {
        let mut mac = Multiplier::new();
        let mut acc = 0;

        mac.x = 3;
        mac.y = 5;
        mac.subtract_and_multiply(&mut acc);
        assert_eq!(acc, 0);
        assert_eq!(mac.product(), 15);

        mac.x = 2;
        mac.subtract_and_multiply(&mut acc);
        assert_eq!(acc, -60);
        assert_eq!(mac.product(), 10);

        mac.drain_subtract(&mut acc);
        assert_eq!(acc, -100);
    }

    #[test]
    fn accumulator_wraps() {
        let mut mac = Multiplier { x: i16::MIN, y: i16::MIN, product: 0 };
        mac.multiply();

        let mut acc = 0;
        mac.drain_add(&mut acc);
        // 0x4000_0000 << 2 overflows out of 32 bits
        assert_eq!(acc, 0);
    }

    #[test]
    fn rounding() {
        assert_eq!(round_high(0x0001_7FFF), 0x0001);
        assert_eq!(round_high(0x0001_8000), 0x0002);
        assert_eq!(round_high(-0x8000), 0);
        assert_eq!(round_high(-0x8001), -1);
        assert_eq!(round_high(0x7FFF_8000), i16::MIN);
    }
}
