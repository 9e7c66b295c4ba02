//! DL-1425 DSP program: routine dispatch, the per-sample mix pipeline, and the state behind the
//! host register map

mod adpcm;
mod delay;
mod echo;
mod fir;
mod mac;
mod mixer;
mod registers;
mod ring;
mod routine;
mod tables;
mod voice;


use crate::dsp::adpcm::{AdpcmChannel, Nibble, ADPCM_COUNT};
use crate::dsp::delay::DelayNetwork;
use crate::dsp::echo::Echo;
use crate::dsp::fir::{FilterBank, Side, MODE_1_DEFAULT_SELECTORS, MODE_2_DEFAULT_SELECTORS};
use crate::dsp::mac::high_word;
use crate::dsp::mixer::{PanMixer, MIX_CHANNELS};
use crate::dsp::routine::{Action, UpdateState};
use crate::dsp::voice::{Voice, MUTED_BANK, VOICE_COUNT};
use crate::rom::SampleSource;
use bincode::{Decode, Encode};
use qsound_config::FilterTopology;
use std::array;

pub use routine::Routine;

// Ticks the DSP spends idle after an init routine before dispatching again
const INIT_DELAY_TICKS: u8 = 4;

#[derive(Debug, Clone, Encode, Decode)]
pub struct Dsp {
    voices: [Voice; VOICE_COUNT],
    adpcm: [AdpcmChannel; ADPCM_COUNT],
    mixer: PanMixer,
    echo: Echo,
    filters: FilterBank,
    filter_selectors: [u16; 4],
    delays: DelayNetwork,
    filter_refresh: u16,
    routine_code: u16,
    unused_registers: [u16; 0x26],
    unused_adpcm_registers: [u16; 3],
    state: UpdateState,
    step: u8,
    test_increment: i16,
    test_output: i16,
    busy: bool,
    output: (i16, i16),
}

impl Dsp {
    /// Power-on / device reset: clear everything, mark busy, and run the init routine for the
    /// given topology.
    pub fn new(topology: FilterTopology) -> Self {
        let mut adpcm: [AdpcmChannel; ADPCM_COUNT] = array::from_fn(|_| AdpcmChannel::default());
        for channel in &mut adpcm {
            channel.bank = MUTED_BANK;
        }

        let filter_selectors = match topology {
            FilterTopology::Mode1 => MODE_1_DEFAULT_SELECTORS,
            FilterTopology::Mode2 => MODE_2_DEFAULT_SELECTORS,
        };
        let mut filters = FilterBank::new(topology);
        filters.load_coefficients(&filter_selectors);

        Self {
            voices: array::from_fn(|_| Voice { bank: MUTED_BANK, ..Voice::default() }),
            adpcm,
            mixer: PanMixer::new(),
            echo: Echo::new(topology),
            filters,
            filter_selectors,
            delays: DelayNetwork::new(topology),
            filter_refresh: 0,
            routine_code: Routine::update_for(topology).code(),
            unused_registers: [0; 0x26],
            unused_adpcm_registers: [0; 3],
            state: UpdateState::InitDelay,
            step: INIT_DELAY_TICKS,
            test_increment: 0,
            test_output: 0,
            busy: true,
            output: (0, 0),
        }
    }

    // Init routines clear all of DSP RAM but not the test registers, the busy flag, or the output
    // latches
    fn init(&mut self, topology: FilterTopology) {
        log::debug!("Running init routine, filter topology {topology}");

        *self = Self {
            test_increment: self.test_increment,
            test_output: self.test_output,
            busy: self.busy,
            output: self.output,
            ..Self::new(topology)
        };
    }

    pub fn topology(&self) -> FilterTopology {
        self.filters.topology()
    }

    pub fn routine(&self) -> Option<Routine> {
        Routine::from_code(self.routine_code)
    }

    pub fn busy(&self) -> bool {
        self.busy
    }

    /// Host commit: store a register value and raise the busy flag until the program next polls
    /// for commands.
    pub fn commit(&mut self, address: u8, value: u16) {
        self.write_register(address, value);
        self.busy = true;
    }

    /// Run the DSP program for one output sample period.
    #[must_use]
    pub fn tick<S: SampleSource + ?Sized>(&mut self, rom: &S) -> (i16, i16) {
        if self.state == UpdateState::Dispatch {
            self.dispatch();
        }

        match self.state {
            UpdateState::InitDelay => self.update_init_delay(),
            UpdateState::Test => self.update_test(),
            UpdateState::Update1 | UpdateState::Update2 => self.update_mix(rom),
            UpdateState::Dispatch => unreachable!("dispatch always selects a routine to run"),
        }

        self.output
    }

    fn dispatch(&mut self) {
        while self.state == UpdateState::Dispatch {
            let Some(routine) = self.routine() else {
                log::debug!("Invalid routine code {:04X}, reinitializing", self.routine_code);
                self.routine_code = Routine::Init1.code();
                continue;
            };

            match routine.action() {
                Action::Init(topology) => self.init(topology),
                Action::ArmTest(increment) => {
                    log::debug!("Arming test output with increment {increment}");
                    self.test_increment = increment;
                    self.routine_code = Routine::Test.code();
                }
                Action::RefreshFilters(topology) => self.refresh_filters(topology),
                Action::Run(state) => match state.topology() {
                    // Update routines only make sense on the RAM layout their init routine set up
                    Some(topology) if topology != self.topology() => {
                        log::debug!(
                            "{routine} ({:04X}) does not match filter layout, reinitializing",
                            routine.code()
                        );
                        self.init(topology);
                    }
                    _ => {
                        self.state = state;
                        self.step = 0;
                    }
                },
            }
        }
    }

    fn refresh_filters(&mut self, topology: FilterTopology) {
        if topology != self.topology() {
            log::debug!("{topology} filter refresh does not match layout, reinitializing");
            self.init(topology);
            return;
        }

        log::debug!("Reloading filter coefficients, selectors {:04X?}", self.filter_selectors);
        self.filters.load_coefficients(&self.filter_selectors);
        self.routine_code = Routine::update_for(topology).code();
    }

    fn end_pass_step(&mut self) {
        self.step += 1;
        let pass_len = self.state.pass_len();
        if self.step >= pass_len {
            self.step -= pass_len;
            self.state = UpdateState::Dispatch;
        }
    }

    fn update_init_delay(&mut self) {
        if self.step > 0 {
            self.step -= 1;
        } else {
            self.state = UpdateState::Dispatch;
        }
    }

    fn update_test(&mut self) {
        if self.step == 0 {
            self.test_output = self.test_output.wrapping_add(self.test_increment);

            // The test routine polls for host commands here
            self.busy = false;
        }

        self.output = (self.test_output, self.test_output);
        self.end_pass_step();
    }

    fn update_mix<S: SampleSource + ?Sized>(&mut self, rom: &S) {
        // Steps 0-2 decode the high nibble of channels 0-2, steps 3-5 decode the low nibble and
        // advance the address
        let channel = usize::from(self.step % 3);
        let nibble = if self.step < 3 { Nibble::High } else { Nibble::Low };
        self.adpcm[channel].decode(rom, nibble);

        self.mix(rom);
        self.end_pass_step();
    }

    fn mix<S: SampleSource + ?Sized>(&mut self, rom: &S) {
        voice::clock_voices(&mut self.voices, rom);
        self.echo.clock(&self.voices);

        // The mix routine polls for host commands here
        self.busy = false;

        let samples: [i16; MIX_CHANNELS] = array::from_fn(|i| match i.checked_sub(VOICE_COUNT) {
            None => self.voices[i].output,
            Some(adpcm_idx) => self.adpcm[adpcm_idx].output,
        });
        let echo = i32::from(self.echo.output()) << 16;

        // Echo goes to the left output tap but the right filter tap
        let left = self.mixer.mix_left(&samples);
        let dry = high_word(left.output.wrapping_add(echo));
        let filtered = self.filters.process(Side::Left, high_word(left.filter), dry);
        let sample_l = self.delays.output(Side::Left, filtered);

        let right = self.mixer.mix_right(&samples);
        let dry = high_word(right.output);
        let filtered =
            self.filters.process(Side::Right, high_word(right.filter.wrapping_add(echo)), dry);
        let sample_r = self.delays.output(Side::Right, filtered);

        self.output = (sample_l, sample_r);

        if self.filter_refresh != 0 {
            log::trace!("Recomputing delay line read positions");
            self.delays.recompute_read_cursors();
            self.filter_refresh = 0;
        }
    }
}
