//! Capcom QSound (DL-1425) audio DSP: 16 PCM voices, 3 ADPCM channels, echo, FIR filtering and
//! wet/dry delay lines, emulated at the level of the DSP program's fixed-point arithmetic

pub mod api;
mod dsp;
pub mod rom;

pub use api::{QSound, QSoundEmulatorConfig, QSoundError};
pub use dsp::Routine;
pub use qsound_config::FilterTopology;
pub use rom::{SampleRom, SampleRomError, SampleSource};
