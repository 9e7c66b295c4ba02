use bincode::{Decode, Encode};
use qsound_config::FilterTopology;
use qsound_proc_macros::{EnumAll, EnumDisplay};

pub const SLOW_TEST_INCREMENT: i16 = 0x0001;
pub const FAST_TEST_INCREMENT: i16 = 0x0400;

/// DSP program entry points the host can select by writing the routine register. Each variant's
/// code is the routine's DSP program ROM address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumAll, EnumDisplay)]
pub enum Routine {
    /// Default init: single long FIR filter per side
    Init1,
    /// Alternate init: cascaded FIR filters per side
    Init2,
    /// Arm the test sawtooth with a slow increment
    ArmTestSlow,
    /// Arm the test sawtooth with a fast increment
    ArmTestFast,
    /// Reload mode 1 filter coefficients, then run Update1
    RefreshFilter1,
    /// Reload mode 2 filter coefficients, then run Update2
    RefreshFilter2,
    /// Sawtooth test output
    Test,
    /// Mode 1 sample update
    Update1,
    /// Mode 2 sample update
    Update2,
}

impl Routine {
    #[must_use]
    pub const fn code(self) -> u16 {
        match self {
            Self::Init1 => 0x0288,
            Self::Init2 => 0x061A,
            Self::ArmTestSlow => 0x000C,
            Self::ArmTestFast => 0x000F,
            Self::RefreshFilter1 => 0x0039,
            Self::RefreshFilter2 => 0x004F,
            Self::Test => 0x0018,
            Self::Update1 => 0x0314,
            Self::Update2 => 0x06B2,
        }
    }

    #[must_use]
    pub fn from_code(code: u16) -> Option<Self> {
        Self::ALL.into_iter().find(|routine| routine.code() == code)
    }

    pub(super) fn action(self) -> Action {
        match self {
            Self::Init1 => Action::Init(FilterTopology::Mode1),
            Self::Init2 => Action::Init(FilterTopology::Mode2),
            Self::ArmTestSlow => Action::ArmTest(SLOW_TEST_INCREMENT),
            Self::ArmTestFast => Action::ArmTest(FAST_TEST_INCREMENT),
            Self::RefreshFilter1 => Action::RefreshFilters(FilterTopology::Mode1),
            Self::RefreshFilter2 => Action::RefreshFilters(FilterTopology::Mode2),
            Self::Test => Action::Run(UpdateState::Test),
            Self::Update1 => Action::Run(UpdateState::Update1),
            Self::Update2 => Action::Run(UpdateState::Update2),
        }
    }

    /// The steady-state update routine for a filter topology
    #[must_use]
    pub const fn update_for(topology: FilterTopology) -> Self {
        match topology {
            FilterTopology::Mode1 => Self::Update1,
            FilterTopology::Mode2 => Self::Update2,
        }
    }
}

/// What the dispatcher does when it picks up a routine code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Action {
    Init(FilterTopology),
    ArmTest(i16),
    RefreshFilters(FilterTopology),
    Run(UpdateState),
}

/// Which routine the tick function runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode)]
pub(super) enum UpdateState {
    /// Read the routine register and pick the next routine
    Dispatch,
    /// Idle countdown after init
    InitDelay,
    Test,
    Update1,
    Update2,
}

impl UpdateState {
    /// Ticks in one pass through this routine before returning to dispatch
    pub(super) fn pass_len(self) -> u8 {
        match self {
            Self::Test => 2,
            Self::Update1 | Self::Update2 => 6,
            Self::Dispatch | Self::InitDelay => 1,
        }
    }

    pub(super) fn topology(self) -> Option<FilterTopology> {
        match self {
            Self::Update1 => Some(FilterTopology::Mode1),
            Self::Update2 => Some(FilterTopology::Mode2),
            Self::Dispatch | Self::InitDelay | Self::Test => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn codes_round_trip() {
        for routine in Routine::ALL {
            assert_eq!(Routine::from_code(routine.code()), Some(routine));
        }

        assert_eq!(Routine::from_code(0x0000), None);
        assert_eq!(Routine::from_code(0xFFFF), None);
    }

    #[test]
    fn all_routines_have_distinct_codes() {
        assert_eq!(Routine::ALL.len(), 9);
        assert_eq!(Routine::ALL[0], Routine::Init1);
        assert_eq!(Routine::Update2.to_string(), "Update2");

        let mut codes: Vec<_> = Routine::ALL.iter().map(|routine| routine.code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), Routine::ALL.len());
    }

    #[test]
    fn update_routines_match_topology() {
        for topology in FilterTopology::ALL {
            let Action::Run(state) = Routine::update_for(topology).action() else {
                panic!("update routine should run directly");
            };
            assert_eq!(state.topology(), Some(topology));
        }
    }
}
