//! QSound public interface

use crate::dsp::{Dsp, Routine};
use crate::rom::SampleRom;
use bincode::{Decode, Encode};
use qsound_common::frontend::AudioOutput;
use qsound_common::num::U16Ext;
use qsound_config::FilterTopology;
use std::mem;
use thiserror::Error;

const STATUS_BUSY: u8 = 0x00;
const STATUS_READY: u8 = 0x80;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QSoundEmulatorConfig {
    /// Master clock input; the DSP core runs at half this rate
    pub clock_hz: u32,
    /// Which init routine device reset runs
    pub topology: FilterTopology,
}

impl Default for QSoundEmulatorConfig {
    fn default() -> Self {
        Self { clock_hz: qsound_config::DEFAULT_CLOCK_HZ, topology: FilterTopology::default() }
    }
}

#[derive(Debug, Error)]
pub enum QSoundError<AErr> {
    #[error("Error outputting audio samples: {0}")]
    AudioOutput(AErr),
}

pub type QSoundResult<AErr> = Result<(), QSoundError<AErr>>;

/// A QSound chip: the host-facing data latch and status port in front of the DSP.
#[derive(Debug, Clone, Encode, Decode)]
pub struct QSound {
    dsp: Dsp,
    data_latch: u16,
    rom: SampleRom,
    config: QSoundEmulatorConfig,
}

impl QSound {
    #[must_use]
    pub fn new(rom: SampleRom, config: QSoundEmulatorConfig) -> Self {
        log::info!(
            "Creating QSound with {} Hz clock ({} Hz output), filter topology {}",
            config.clock_hz,
            qsound_config::sample_rate(config.clock_hz),
            config.topology
        );

        Self { dsp: Dsp::new(config.topology), data_latch: 0, rom, config }
    }

    /// Device reset. Clears all DSP state and the data latch, then runs the configured init
    /// routine.
    pub fn reset(&mut self) {
        log::debug!("Device reset");

        self.dsp = Dsp::new(self.config.topology);
        self.data_latch = 0;
    }

    /// Host port write.
    ///
    /// Port 0 sets the data latch's high byte, port 1 sets its low byte, and port 2 commits the
    /// latched word to the register at `value`.
    pub fn write(&mut self, port: u8, value: u8) {
        match port {
            0 => self.data_latch.set_msb(value),
            1 => self.data_latch.set_lsb(value),
            2 => self.dsp.commit(value, self.data_latch),
            _ => log::warn!("Ignoring write to invalid QSound port {port}: {value:02X}"),
        }
    }

    /// Host status read: bit 7 is set when the DSP is ready for another command.
    #[must_use]
    pub fn read(&self) -> u8 {
        if self.dsp.busy() { STATUS_BUSY } else { STATUS_READY }
    }

    /// Convenience wrapper around the three-write host protocol.
    pub fn write_register(&mut self, address: u8, value: u16) {
        self.write(0, value.msb());
        self.write(1, value.lsb());
        self.write(2, address);
    }

    /// Peek a register without going through the host interface.
    #[must_use]
    pub fn register(&self, address: u8) -> u16 {
        self.dsp.read_register(address)
    }

    /// The routine the DSP will run at its next dispatch, if the routine register holds a valid
    /// entry point
    #[must_use]
    pub fn routine(&self) -> Option<Routine> {
        self.dsp.routine()
    }

    #[must_use]
    pub fn topology(&self) -> FilterTopology {
        self.dsp.topology()
    }

    #[must_use]
    pub fn sample_rate(&self) -> u32 {
        qsound_config::sample_rate(self.config.clock_hz)
    }

    /// Run for one output sample period and return the stereo output.
    #[must_use]
    pub fn clock(&mut self) -> (i16, i16) {
        self.dsp.tick(&self.rom)
    }

    /// Run for one output sample period and push the result to the audio output.
    ///
    /// # Errors
    ///
    /// Propagates any error returned by the audio output.
    pub fn tick<A: AudioOutput>(&mut self, audio_output: &mut A) -> QSoundResult<A::Err> {
        let (sample_l, sample_r) = self.clock();
        audio_output.push_sample(sample_l, sample_r).map_err(QSoundError::AudioOutput)
    }

    /// Run for `ticks` output sample periods.
    ///
    /// # Errors
    ///
    /// Propagates any error returned by the audio output.
    pub fn run<A: AudioOutput>(
        &mut self,
        ticks: u64,
        audio_output: &mut A,
    ) -> QSoundResult<A::Err> {
        for _ in 0..ticks {
            self.tick(audio_output)?;
        }

        Ok(())
    }

    /// Move the sample ROM out of another instance, e.g. after loading a save state.
    pub fn take_rom_from(&mut self, other: &mut Self) {
        self.rom = mem::take(&mut other.rom);
    }

    /// Apply a new config. Clock changes take effect immediately; topology changes take effect
    /// at the next device reset.
    pub fn reload_config(&mut self, config: QSoundEmulatorConfig) {
        self.config = config;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qsound_common::frontend::BufferedAudioOutput;
    use test_log::test;

    fn new_qsound() -> QSound {
        QSound::new(SampleRom::default(), QSoundEmulatorConfig::default())
    }

    #[test]
    fn latch_and_commit() {
        let mut qsound = new_qsound();

        qsound.write(0, 0x12);
        qsound.write(1, 0x34);
        qsound.write(2, 0x93);
        assert_eq!(qsound.register(0x93), 0x1234);

        // Latch retains its value between commits
        qsound.write(1, 0x56);
        qsound.write(2, 0x80);
        assert_eq!(qsound.register(0x80), 0x1256);
    }

    #[test]
    fn invalid_port_ignored() {
        let mut qsound = new_qsound();

        qsound.write(0, 0xAB);
        qsound.write(3, 0xFF);
        qsound.write(0xFF, 0xFF);
        qsound.write(1, 0xCD);
        qsound.write(2, 0x93);
        assert_eq!(qsound.register(0x93), 0xABCD);
    }

    #[test]
    fn status_port() {
        let mut qsound = new_qsound();
        assert_eq!(qsound.read(), STATUS_BUSY);

        for _ in 0..6 {
            let _ = qsound.clock();
        }
        assert_eq!(qsound.read(), STATUS_READY);

        qsound.write_register(0x93, 0x0000);
        assert_eq!(qsound.read(), STATUS_BUSY);

        let _ = qsound.clock();
        assert_eq!(qsound.read(), STATUS_READY);
    }

    #[test]
    fn reset_clears_latch_and_registers() {
        let mut qsound = new_qsound();
        qsound.write_register(0x93, 0x4000);
        qsound.write(0, 0x77);

        qsound.reset();
        assert_eq!(qsound.register(0x93), 0);
        assert_eq!(qsound.read(), STATUS_BUSY);

        qsound.write(1, 0x00);
        qsound.write(2, 0x80);
        assert_eq!(qsound.register(0x80), 0);
    }

    #[test]
    fn configured_topology() {
        let config =
            QSoundEmulatorConfig { topology: FilterTopology::Mode2, ..QSoundEmulatorConfig::default() };
        let qsound = QSound::new(SampleRom::default(), config);
        assert_eq!(qsound.topology(), FilterTopology::Mode2);
        assert_eq!(qsound.routine(), Some(Routine::Update2));
        assert_eq!(qsound.sample_rate(), 24038);
    }

    #[test]
    fn run_pushes_one_sample_per_tick() {
        let mut qsound = new_qsound();
        let mut output = BufferedAudioOutput::new();

        qsound.run(100, &mut output).unwrap();
        assert_eq!(output.samples.len(), 100);
        assert!(output.samples.iter().all(|&sample| sample == (0, 0)));
    }

    #[test]
    fn save_state_keeps_rom_out() {
        let rom = SampleRom::new((0..=255_u8).collect()).unwrap();
        let mut qsound = QSound::new(rom, QSoundEmulatorConfig::default());
        for _ in 0..6 {
            let _ = qsound.clock();
        }

        qsound.write_register(0x00, 0x0000);
        qsound.write_register(0x02, 0x1000);
        qsound.write_register(0x05, 0xFFFF);
        qsound.write_register(0x06, 0x4000);
        for _ in 0..100 {
            let _ = qsound.clock();
        }

        let config = bincode::config::standard();
        let bytes = bincode::encode_to_vec(&qsound, config).unwrap();
        let (mut restored, _): (QSound, usize) = bincode::decode_from_slice(&bytes, config).unwrap();

        // Sample ROM is not part of the state
        assert!(restored.rom.is_empty());

        let mut reference = qsound.clone();
        restored.take_rom_from(&mut qsound);

        let mut expected = BufferedAudioOutput::new();
        let mut actual = BufferedAudioOutput::new();
        reference.run(500, &mut expected).unwrap();
        restored.run(500, &mut actual).unwrap();
        assert_eq!(actual.samples, expected.samples);
        assert!(actual.samples.iter().any(|&sample| sample != (0, 0)));
    }
}
