//! Reverb engine: the host-facing lifecycle.
//!
//! `ReverbEngine<N>` owns one [`FilterNetwork`], the input ramp, the limiter and
//! the parameter state. The host talks to it through four operations:
//!
//! - [`initialize`](ReverbEngine::initialize): power-on state (idempotent)
//! - [`process`](ReverbEngine::process): in-place interleaved stereo block
//! - [`resume`](ReverbEngine::resume): clear the tails, restart the ramp
//! - [`set_parameter`](ReverbEngine::set_parameter): Q31-encoded control update
//!
//! Per sample: ramp-scaled input → network → depth (inside the network) →
//! dry/wet blend with the untouched input → soft limiter → both channels.
//! Parameters are latched once per block; nothing here allocates, locks or
//! logs inside `process`.

use reverbor_core::dsp::{clamp01, SoftLimiter};
use reverbor_core::fixed::{from_fixed, to_fixed};
use reverbor_core::ramp::InputRamp;

use crate::config::EngineConfig;
use crate::network::{FilterNetwork, Network, Topology};
use crate::params::{BlockParams, ReverbParams};

/// Interleaved channels per frame handled by [`ReverbEngine::process`].
pub const CHANNELS: usize = 2;

pub struct ReverbEngine<N: FilterNetwork> {
    network: N,
    params: ReverbParams,
    ramp: InputRamp,
    limiter: SoftLimiter,
}

impl ReverbEngine<Network> {
    /// Engine with a runtime-chosen topology.
    pub fn with_topology(topology: Topology) -> Self {
        Self::new(Network::new(topology))
    }

    /// Engine built from a config: topology plus initial controls.
    pub fn from_config(cfg: &EngineConfig) -> Self {
        let mut e = Self::with_topology(cfg.topology);
        e.set_time(cfg.time);
        e.set_depth(cfg.depth);
        e.set_mix(cfg.mix);
        e
    }
}

impl<N: FilterNetwork> ReverbEngine<N> {
    /// Take ownership of a network and bring everything to the power-on state.
    pub fn new(network: N) -> Self {
        let mut e = Self {
            network,
            params: ReverbParams::default(),
            ramp: InputRamp::new(),
            limiter: SoftLimiter::default(),
        };
        e.initialize(0, 0);
        e
    }

    /// Power-on state: lines zeroed with cursors at 0 and default gains,
    /// `mix = 0.5, depth = 0, time = 0`, input ramp at 0.
    ///
    /// `platform` and `api` identify the host and are only logged.
    pub fn initialize(&mut self, platform: u32, api: u32) {
        self.network.reset();
        self.params = ReverbParams::default();
        self.ramp.reset();
        log::debug!(
            "reverb initialized: topology={} platform={platform:#x} api={api:#x}",
            self.network.topology()
        );
    }

    /// Zero every delay line and restart the input ramp from silence.
    /// Safe between any two blocks.
    pub fn resume(&mut self) {
        self.network.clear();
        self.ramp.reset();
        log::debug!("reverb resumed: delay lines cleared");
    }

    /// Apply a host-encoded (Q31) parameter. Unknown ids are ignored.
    pub fn set_parameter(&mut self, index: u8, value: i32) {
        if !self.params.set_encoded(index, value) {
            log::trace!("ignoring unknown parameter id {index}");
        }
    }

    /// Decay time in `[0, 1]`, clamped.
    pub fn set_time(&mut self, time: f32) { self.params.time = clamp01(time); }
    /// Wet level in `[0, 1]`, clamped.
    pub fn set_depth(&mut self, depth: f32) { self.params.depth = clamp01(depth); }
    /// Dry/wet blend in `[0, 1]`, clamped. Bypasses the host notch.
    pub fn set_mix(&mut self, mix: f32) { self.params.mix = clamp01(mix); }

    #[inline] pub fn params(&self) -> &ReverbParams { &self.params }
    #[inline] pub fn input_gain(&self) -> f32 { self.ramp.value() }
    #[inline] pub fn topology(&self) -> Topology { self.network.topology() }
    #[inline] pub fn network(&self) -> &N { &self.network }

    /// Process `frames` interleaved stereo frames in place.
    ///
    /// The left sample of each frame is the input; the processed sample is
    /// written to both channels. At most `block.len() / 2` frames are
    /// touched. Returns the number of frames processed.
    pub fn process(&mut self, block: &mut [f32], frames: usize) -> usize {
        let frames = frames.min(block.len() / CHANNELS);
        let bp = self.begin_block();
        for frame in block.chunks_exact_mut(CHANNELS).take(frames) {
            let y = self.tick(frame[0], &bp);
            frame[0] = y;
            frame[1] = y;
        }
        frames
    }

    /// Mono variant of [`process`](Self::process): one block, one channel.
    pub fn process_mono(&mut self, block: &mut [f32]) {
        let bp = self.begin_block();
        for x in block.iter_mut() {
            *x = self.tick(*x, &bp);
        }
    }

    /// Single sample with the current parameters. Gains are reloaded on every
    /// call, so prefer the block entry points in a callback.
    pub fn process_sample(&mut self, x: f32) -> f32 {
        let bp = self.begin_block();
        self.tick(x, &bp)
    }

    #[inline]
    fn begin_block(&mut self) -> BlockParams {
        let bp = self.params.snapshot();
        self.network.apply_decay(bp.time_index);
        bp
    }

    #[inline]
    fn tick(&mut self, x: f32, bp: &BlockParams) -> f32 {
        let input = to_fixed(self.ramp.apply(x));
        let wet = from_fixed(self.network.process(input, bp.depth));
        let y = self.limiter.process(bp.dry * x + bp.wet * wet);
        self.ramp.advance();
        y
    }
}

impl<N: FilterNetwork + core::fmt::Debug> core::fmt::Debug for ReverbEngine<N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ReverbEngine")
            .field("topology", &self.network.topology())
            .field("params", &self.params)
            .field("input_gain", &self.ramp.value())
            .finish_non_exhaustive()
    }
}
