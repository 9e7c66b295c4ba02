//! Sample ROM access
//!
//! The chip sees sample data through a 24-bit byte address space. Voices and ADPCM channels
//! address it with a 16-bit bank register (bit 15 ignored) and a 16-bit offset.

use qsound_common::num::duplicate_byte;
use qsound_proc_macros::{FakeDecode, FakeEncode};
use thiserror::Error;

pub const ADDRESS_BITS: u32 = 24;
pub const ADDRESS_MASK: u32 = (1 << ADDRESS_BITS) - 1;

/// Supplies sample bytes to the DSP.
pub trait SampleSource {
    /// Read one byte at a 24-bit sample address.
    fn read_byte(&self, address: u32) -> u8;

    /// Read one 16-bit sample. 8-bit sample data is expanded by repeating the byte in both halves
    /// of the word rather than by sign extension.
    #[inline]
    fn read_sample(&self, bank: u16, offset: u16) -> i16 {
        let address = (u32::from(bank & 0x7FFF) << 16) | u32::from(offset);
        duplicate_byte(self.read_byte(address & ADDRESS_MASK))
    }
}

impl<S: SampleSource + ?Sized> SampleSource for &S {
    #[inline]
    fn read_byte(&self, address: u32) -> u8 {
        (**self).read_byte(address)
    }
}

#[derive(Debug, Error)]
pub enum SampleRomError {
    #[error("Sample ROM is empty")]
    Empty,
    #[error("Sample ROM is {len} bytes, larger than the 24-bit sample address space")]
    TooLarge { len: usize },
}

/// Sample ROM image. Addresses are masked to the image size rounded up to a power of two, so
/// power-of-two images mirror across the address space and bytes past the end of any other size
/// read as 0.
///
/// The ROM is not part of save states; encoding writes nothing and decoding produces an empty
/// ROM that should be replaced with [`crate::QSound::take_rom_from`].
#[derive(Debug, Clone, Default, FakeEncode, FakeDecode)]
pub struct SampleRom {
    data: Box<[u8]>,
    mask: u32,
}

impl SampleRom {
    /// # Errors
    ///
    /// Returns an error if the image is empty or does not fit in 24 address bits.
    pub fn new(data: Vec<u8>) -> Result<Self, SampleRomError> {
        if data.is_empty() {
            return Err(SampleRomError::Empty);
        }

        if data.len() > 1 << ADDRESS_BITS {
            return Err(SampleRomError::TooLarge { len: data.len() });
        }

        let mask = (data.len().next_power_of_two() - 1) as u32;
        log::debug!("Loaded {} byte sample ROM, address mask {mask:06X}", data.len());

        Ok(Self { data: data.into_boxed_slice(), mask })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl SampleSource for SampleRom {
    #[inline]
    fn read_byte(&self, address: u32) -> u8 {
        self.data.get((address & self.mask) as usize).copied().unwrap_or(0)
    }
}
