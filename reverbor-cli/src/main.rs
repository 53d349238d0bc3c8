//! Reverbor CLI: offline WAV renderer and real-time audition player.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::{eyre, Result, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use reverbor_engine::engine::CHANNELS;
use reverbor_engine::{EngineConfig, Network, ReverbEngine, Topology};

/// Frames of silence before the synthesized impulse, enough for the input ramp to settle.
const IMPULSE_OFFSET: usize = 512;
/// Largest block the realtime callback hands to the engine at once.
const SCRATCH_FRAMES: usize = 1024;

#[derive(Parser)]
#[command(name = "reverbor", version, about = "Fixed-point comb/all-pass reverb")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render a WAV file (or an impulse response) through the engine
    Render(RenderArgs),
    /// Audition the engine live on a click train
    Play(PlayArgs),
    /// List output devices
    Devices,
}

#[derive(Args, Debug, Default)]
struct EngineArgs {
    /// JSON engine config; the flags below override its fields
    #[arg(long)]
    config: Option<PathBuf>,

    /// Network topology: comb-bank (a) or multi-tap (b)
    #[arg(long)]
    topology: Option<Topology>,

    /// Decay time in [0, 1]
    #[arg(long)]
    time: Option<f32>,

    /// Wet level in [0, 1]
    #[arg(long)]
    depth: Option<f32>,

    /// Dry/wet blend in [0, 1]
    #[arg(long)]
    mix: Option<f32>,
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Input WAV (omit to render an impulse response)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output WAV, written as stereo 32-bit float
    #[arg(short, long, default_value = "reverbor_out.wav")]
    output: PathBuf,

    /// Frames per processing block
    #[arg(long, default_value_t = 256)]
    block: usize,

    /// Seconds of silence appended so the tail rings out
    #[arg(long, default_value_t = 2.0)]
    tail: f32,

    /// Sample rate used when rendering an impulse response
    #[arg(long, default_value_t = 48_000)]
    sample_rate: u32,

    #[command(flatten)]
    engine: EngineArgs,
}

#[derive(Args, Debug)]
struct PlayArgs {
    /// Output device name (default device if omitted)
    #[arg(long)]
    device: Option<String>,

    /// Stop after this many seconds
    #[arg(long)]
    duration: Option<u64>,

    /// Seconds between clicks
    #[arg(long, default_value_t = 1.5)]
    interval: f32,

    /// Click amplitude
    #[arg(long, default_value_t = 0.5)]
    level: f32,

    #[command(flatten)]
    engine: EngineArgs,
}

impl EngineArgs {
    /// Config file (or defaults) with any explicit flags layered on top.
    fn resolve(&self) -> Result<EngineConfig> {
        let mut cfg = match &self.config {
            Some(path) => load_config(path)?,
            None => EngineConfig::default(),
        };
        if let Some(t) = self.topology { cfg.topology = t; }
        if let Some(v) = self.time { cfg.time = v; }
        if let Some(v) = self.depth { cfg.depth = v; }
        if let Some(v) = self.mix { cfg.mix = v; }
        Ok(cfg)
    }
}

fn load_config(path: &Path) -> Result<EngineConfig> {
    let json = fs::read_to_string(path).wrap_err_with(|| format!("failed to read config {}", path.display()))?;
    serde_json::from_str(&json).wrap_err_with(|| format!("invalid config {}", path.display()))
}

// --- render ----------------------------------------------------------------------

/// Left (or only) channel of a WAV file as f32, plus its sample rate.
fn read_wav(path: &Path) -> Result<(Vec<f32>, u32)> {
    let reader = hound::WavReader::open(path).wrap_err_with(|| format!("failed to open {}", path.display()))?;
    let spec = reader.spec();
    let channels = usize::from(spec.channels.max(1));

    let samples: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Int => {
            let scale = 1.0 / (1_i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 * scale))
                .collect::<Result<_, _>>()?
        }
        hound::SampleFormat::Float => reader.into_samples::<f32>().collect::<Result<_, _>>()?,
    };

    log::info!(
        "input: {} ch, {} Hz, {}-bit, {} frames",
        spec.channels,
        spec.sample_rate,
        spec.bits_per_sample,
        samples.len() / channels
    );
    Ok((samples.into_iter().step_by(channels).collect(), spec.sample_rate))
}

fn impulse(len: usize) -> Vec<f32> {
    let mut v = vec![0.0; len.max(IMPULSE_OFFSET + 1)];
    v[IMPULSE_OFFSET] = 1.0;
    v
}

/// Run a mono signal through the engine in `block`-frame chunks; returns interleaved stereo.
fn render_signal(engine: &mut ReverbEngine<Network>, input: &[f32], block: usize) -> Vec<f32> {
    let block = block.max(1);
    let mut out = Vec::with_capacity(input.len() * CHANNELS);
    let mut buf = vec![0.0f32; block * CHANNELS];
    for chunk in input.chunks(block) {
        let frames = chunk.len();
        for (frame, &x) in buf.chunks_exact_mut(CHANNELS).zip(chunk) {
            frame.fill(x);
        }
        let done = engine.process(&mut buf, frames);
        out.extend_from_slice(&buf[..done * CHANNELS]);
    }
    out
}

fn render(args: &RenderArgs) -> Result<()> {
    if args.block == 0 {
        return Err(eyre!("--block must be at least 1"));
    }
    let cfg = args.engine.resolve()?;

    let (mut signal, sample_rate) = match &args.input {
        Some(path) => read_wav(path)?,
        None => (Vec::new(), args.sample_rate),
    };
    let tail_frames = (args.tail.max(0.0) * sample_rate as f32) as usize;
    if args.input.is_none() {
        signal = impulse(tail_frames);
    } else {
        signal.resize(signal.len() + tail_frames, 0.0);
    }

    let mut engine = ReverbEngine::from_config(&cfg);
    log::info!(
        "rendering {} frames: topology={} time={:.3} depth={:.3} mix={:.3} block={}",
        signal.len(),
        cfg.topology,
        engine.params().time,
        engine.params().depth,
        engine.params().mix,
        args.block
    );
    let rendered = render_signal(&mut engine, &signal, args.block);

    let spec = hound::WavSpec {
        channels: CHANNELS as u16,
        sample_rate,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };
    let mut writer = hound::WavWriter::create(&args.output, spec)
        .wrap_err_with(|| format!("failed to create {}", args.output.display()))?;
    for &s in &rendered {
        writer.write_sample(s)?;
    }
    writer.finalize()?;

    let peak = rendered.iter().fold(0.0f32, |m, s| m.max(s.abs()));
    log::info!("wrote {} ({} frames, peak {:.3})", args.output.display(), rendered.len() / CHANNELS, peak);
    Ok(())
}

// --- play ------------------------------------------------------------------------

/// Periodic single-sample clicks.
#[derive(Debug, Clone)]
struct ClickTrain {
    period: usize,
    level: f32,
    pos: usize,
}

impl ClickTrain {
    fn new(period: usize, level: f32) -> Self {
        Self { period: period.max(1), level, pos: 0 }
    }

    #[inline]
    fn next_sample(&mut self) -> f32 {
        let x = if self.pos == 0 { self.level } else { 0.0 };
        self.pos = (self.pos + 1) % self.period;
        x
    }
}

fn list_output_devices() -> Result<()> {
    let host = cpal::default_host();
    let default = host.default_output_device().and_then(|d| d.name().ok());
    println!("Available output devices:");
    for dev in host.output_devices()? {
        let name = dev.name()?;
        let mark = if default.as_deref() == Some(name.as_str()) { " (default)" } else { "" };
        println!("- {name}{mark}");
    }
    Ok(())
}

fn pick_device(name: Option<&str>) -> Result<cpal::Device> {
    let host = cpal::default_host();
    if let Some(name) = name {
        for d in host.output_devices()? {
            if d.name()? == name {
                return Ok(d);
            }
        }
        return Err(eyre!("requested device not found: {name}"));
    }
    host.default_output_device().ok_or_else(|| eyre!("no default output device"))
}

fn build_stream<T>(
    device: &cpal::Device,
    cfg: &cpal::StreamConfig,
    mut engine: ReverbEngine<Network>,
    mut clicks: ClickTrain,
    err_fn: impl FnMut(cpal::StreamError) + Send + 'static,
) -> Result<cpal::Stream>
where
    T: cpal::Sample + cpal::FromSample<f32> + cpal::SizedSample + Send + 'static,
{
    let channels = usize::from(cfg.channels.max(1));
    let mut scratch = vec![0.0f32; SCRATCH_FRAMES * CHANNELS];

    let stream = device.build_output_stream(
        cfg,
        move |output: &mut [T], _| {
            for out in output.chunks_mut(channels * SCRATCH_FRAMES) {
                let frames = out.len() / channels;
                let buf = &mut scratch[..frames * CHANNELS];
                for frame in buf.chunks_exact_mut(CHANNELS) {
                    frame.fill(clicks.next_sample());
                }
                engine.process(buf, frames);
                for (dst, src) in out.chunks_mut(channels).zip(buf.chunks_exact(CHANNELS)) {
                    let v = T::from_sample(src[0]);
                    dst.fill(v);
                }
            }
        },
        err_fn,
        None,
    )?;

    Ok(stream)
}

fn play(args: &PlayArgs) -> Result<()> {
    let cfg = args.engine.resolve()?;
    let device = pick_device(args.device.as_deref())?;
    let supported = device.default_output_config()?;
    let sample_format = supported.sample_format();
    let stream_cfg = supported.config();

    let period = (args.interval.max(0.01) * stream_cfg.sample_rate.0 as f32) as usize;
    let clicks = ClickTrain::new(period, args.level.clamp(0.0, 1.0));
    let engine = ReverbEngine::from_config(&cfg);

    log::info!("device: {}", device.name()?);
    log::info!("stream config: {stream_cfg:?} (sample_format: {sample_format:?})");
    log::info!("engine: {engine:?}");
    if let Some(d) = args.duration {
        log::info!("auto-stop after {d} seconds");
    }

    let err_fn = |e: cpal::StreamError| log::error!("stream error: {e}");
    let stream = match sample_format {
        cpal::SampleFormat::F32 => build_stream::<f32>(&device, &stream_cfg, engine, clicks, err_fn)?,
        cpal::SampleFormat::I16 => build_stream::<i16>(&device, &stream_cfg, engine, clicks, err_fn)?,
        cpal::SampleFormat::U16 => build_stream::<u16>(&device, &stream_cfg, engine, clicks, err_fn)?,
        other => return Err(eyre!("unsupported device sample format: {other:?}")),
    };
    stream.play()?;

    match args.duration {
        Some(d) => std::thread::sleep(Duration::from_secs(d)),
        None => loop {
            std::thread::sleep(Duration::from_millis(500));
        },
    }
    Ok(())
}

fn main() -> Result<()> {
    color_eyre::install()?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match Cli::parse().command {
        Command::Render(args) => render(&args),
        Command::Play(args) => play(&args),
        Command::Devices => list_output_devices(),
    }
}
