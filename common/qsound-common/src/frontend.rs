/// Receives the stereo samples the engine produces, one pair per tick.
pub trait AudioOutput {
    type Err;

    /// Push a stereo audio sample.
    ///
    /// # Errors
    ///
    /// This method will return an error if it is unable to accept the sample.
    fn push_sample(&mut self, sample_l: i16, sample_r: i16) -> Result<(), Self::Err>;
}

/// Collects samples into memory; useful for offline rendering and tests.
#[derive(Debug, Clone, Default)]
pub struct BufferedAudioOutput {
    pub samples: Vec<(i16, i16)>,
}

impl BufferedAudioOutput {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl AudioOutput for BufferedAudioOutput {
    type Err = std::convert::Infallible;

    #[inline]
    fn push_sample(&mut self, sample_l: i16, sample_r: i16) -> Result<(), Self::Err> {
        self.samples.push((sample_l, sample_r));
        Ok(())
    }
}
