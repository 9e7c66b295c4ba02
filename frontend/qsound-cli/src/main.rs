use anyhow::{Context, anyhow};
use clap::Parser;
use env_logger::Env;
use hound::{SampleFormat, WavSpec, WavWriter};
use qsound_common::frontend::AudioOutput;
use qsound_config::FilterTopology;
use qsound_core::{QSound, QSoundEmulatorConfig, SampleRom};
use serde::Deserialize;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

#[derive(Parser)]
struct Args {
    /// Sample ROM file path
    #[arg(short = 'f', long)]
    sample_rom: PathBuf,

    /// TOML script of timed register writes ([[write]] tables with tick, address, value)
    #[arg(short, long)]
    script: Option<PathBuf>,

    /// Number of output samples to render; overrides --seconds
    #[arg(long)]
    ticks: Option<u64>,

    /// Length of audio to render, in seconds
    #[arg(long, default_value_t = 5.0)]
    seconds: f64,

    /// Master clock rate in Hz
    #[arg(long, default_value_t = qsound_config::DEFAULT_CLOCK_HZ)]
    clock_hz: u32,

    /// Filter topology; selects the init routine run at reset (Mode1 / Mode2)
    #[arg(long, default_value_t)]
    topology: FilterTopology,

    /// Output WAV file path
    #[arg(short, long, default_value = "qsound.wav")]
    output: PathBuf,
}

impl Args {
    fn ticks(&self, sample_rate: u32) -> u64 {
        self.ticks.unwrap_or_else(|| (self.seconds * f64::from(sample_rate)).round() as u64)
    }
}

#[derive(Debug, Default, Deserialize)]
struct Script {
    #[serde(default, rename = "write")]
    writes: Vec<ScriptWrite>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct ScriptWrite {
    tick: u64,
    address: u8,
    value: u16,
}

impl Script {
    fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Unable to read script from '{}'", path.display()))?;
        let mut script: Self = toml::from_str(&contents)
            .with_context(|| format!("Unable to parse script '{}'", path.display()))?;

        script.writes.sort_by_key(|write| write.tick);
        log::info!("Loaded {} register writes from '{}'", script.writes.len(), path.display());

        Ok(script)
    }
}

struct WavOutput {
    writer: WavWriter<BufWriter<File>>,
}

impl WavOutput {
    fn create(path: &Path, sample_rate: u32) -> anyhow::Result<Self> {
        let wav_spec = WavSpec {
            channels: 2,
            sample_rate,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let writer = WavWriter::create(path, wav_spec)
            .with_context(|| format!("Unable to create WAV file at '{}'", path.display()))?;

        Ok(Self { writer })
    }

    fn finalize(self) -> anyhow::Result<()> {
        self.writer.finalize().context("Unable to finalize WAV file")
    }
}

impl AudioOutput for WavOutput {
    type Err = hound::Error;

    fn push_sample(&mut self, sample_l: i16, sample_r: i16) -> Result<(), Self::Err> {
        self.writer.write_sample(sample_l)?;
        self.writer.write_sample(sample_r)
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if args.clock_hz == 0 {
        return Err(anyhow!("Clock rate must be non-zero"));
    }

    let rom_bytes = fs::read(&args.sample_rom).with_context(|| {
        format!("Unable to read sample ROM from '{}'", args.sample_rom.display())
    })?;
    let rom = SampleRom::new(rom_bytes)?;

    let script = match &args.script {
        Some(path) => Script::load(path)?,
        None => Script::default(),
    };

    let config = QSoundEmulatorConfig { clock_hz: args.clock_hz, topology: args.topology };
    let mut qsound = QSound::new(rom, config);

    let sample_rate = qsound.sample_rate();
    let ticks = args.ticks(sample_rate);
    let mut output = WavOutput::create(&args.output, sample_rate)?;

    log::info!("Rendering {ticks} samples at {sample_rate} Hz to '{}'", args.output.display());

    let mut pending = script.writes.into_iter().peekable();
    for tick in 0..ticks {
        while let Some(write) = pending.next_if(|write| write.tick <= tick) {
            log::debug!(
                "Tick {tick}: writing {:04X} to register {:02X}",
                write.value,
                write.address
            );
            qsound.write_register(write.address, write.value);
        }

        qsound.tick(&mut output).context("Error writing WAV samples")?;
    }

    let skipped = pending.count();
    if skipped != 0 {
        log::warn!("{skipped} script writes were scheduled after the last rendered tick");
    }

    output.finalize()?;

    log::info!("Finished rendering");

    Ok(())
}
