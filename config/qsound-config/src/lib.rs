use bincode::{Decode, Encode};
use qsound_proc_macros::{EnumAll, EnumDisplay, EnumFromStr};

/// Master clock the chip is normally driven with
pub const DEFAULT_CLOCK_HZ: u32 = 60_000_000;

/// DSP machine cycles spent producing one output sample
pub const CYCLES_PER_SAMPLE: u32 = 1248;

/// Output sample rate for a given master clock. The DSP core runs at half the master clock.
#[inline]
#[must_use]
pub const fn sample_rate(clock_hz: u32) -> u32 {
    clock_hz / 2 / CYCLES_PER_SAMPLE
}

/// Which of the two DSP programs' filter layouts is active. This is chosen by the init routine and
/// cannot change without another init.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Encode, Decode, EnumDisplay, EnumFromStr, EnumAll,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "clap", derive(qsound_proc_macros::CustomValueEnum))]
pub enum FilterTopology {
    /// One 95-tap FIR filter per side (default init routine)
    #[default]
    Mode1,
    /// Two cascaded FIR filters per side (alternate init routine)
    Mode2,
}
