use bincode::{Decode, Encode};

/// Wrapping pointer into a circular buffer region of DSP RAM.
///
/// Positions are absolute DSP RAM word addresses so that host-visible registers (the echo buffer
/// end, delay read offsets) keep their hardware meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode)]
pub struct RingCursor {
    position: u16,
    start: u16,
    last: u16,
}

impl RingCursor {
    pub fn new(start: u16, len: u16) -> Self {
        debug_assert!(len != 0);
        Self { position: start, start, last: start + len - 1 }
    }

    pub fn position(self) -> u16 {
        self.position
    }

    pub fn start(self) -> u16 {
        self.start
    }

    pub fn len(self) -> u16 {
        self.last - self.start + 1
    }

    /// Offset from the start of the region
    pub fn index(self) -> usize {
        (self.position - self.start).into()
    }

    pub fn advance(&mut self) {
        self.advance_with_end(self.last);
    }

    /// Advance, returning to the start of the region after `end` or after the last word of the
    /// region, whichever comes first.
    pub fn advance_with_end(&mut self, end: u16) {
        if self.position == end || self.position == self.last {
            self.position = self.start;
        } else {
            self.position += 1;
        }
    }

    /// Move to an absolute address. Addresses outside the region are wrapped into it.
    pub fn seek(&mut self, address: u16) {
        self.position = if (self.start..=self.last).contains(&address) {
            address
        } else {
            let offset = (i32::from(address) - i32::from(self.start)).rem_euclid(self.len().into());
            self.start + offset as u16
        };
    }
}
