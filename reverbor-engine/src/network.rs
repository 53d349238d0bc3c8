//! Filter-network seam.
//!
//! A network turns one fixed-point input sample into one wet sample. The
//! engine owns exactly one network and is generic over it, so the two
//! topologies can be swapped without trait objects; [`Network`] wraps both for
//! hosts that pick the topology at runtime.
//!
//! Design goals
//! - No dynamic allocations after construction
//! - O(1) work per sample, no data-dependent branches in the loops
//! - Gains change once per block, delay contents once per sample

use reverbor_core::delay::RingDelayLine;
use reverbor_core::fixed::mul_shift;

use crate::comb_bank::CombBank;
use crate::multi_tap::MultiTap;

/// Anything that can run the per-sample delay network.
pub trait FilterNetwork {
    /// Power-on state: storage zeroed, cursors at 0, default gains.
    fn reset(&mut self);

    /// Zero every delay line. Gains and cursors are kept.
    fn clear(&mut self);

    /// Load feedback gains for the quantized decay time (`0..=64`).
    /// Called once per block, before any `process` call of that block.
    fn apply_decay(&mut self, time_index: usize);

    /// Run one sample. `input` is in the `2^20` scale, `depth` a 10-bit
    /// fraction. Returns the wet sample, still in the `2^20` scale.
    fn process(&mut self, input: i32, depth: i32) -> i64;

    /// Which topology this is.
    fn topology(&self) -> Topology;
}

/// Available network layouts.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Topology {
    /// Six feedback combs (three smoothed, three chained) into four all-passes.
    #[default]
    CombBank,
    /// Four parallel taps into two fine-gain all-passes.
    MultiTap,
}

impl Topology {
    /// Host-side numeric id. Unknown ids fall back to [`Topology::CombBank`].
    pub fn from_id(id: u32) -> Self {
        match id {
            1 => Topology::MultiTap,
            _ => Topology::CombBank,
        }
    }

    pub fn id(self) -> u32 {
        match self {
            Topology::CombBank => 0,
            Topology::MultiTap => 1,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Topology::CombBank => "comb-bank",
            Topology::MultiTap => "multi-tap",
        }
    }
}

impl core::str::FromStr for Topology {
    type Err = UnknownTopology;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "a" | "comb" | "comb-bank" | "combbank" => Ok(Topology::CombBank),
            "b" | "tap" | "multi-tap" | "multitap" => Ok(Topology::MultiTap),
            _ => Err(UnknownTopology),
        }
    }
}

impl core::fmt::Display for Topology {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned by `Topology::from_str` for names it does not know.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct UnknownTopology;

impl core::fmt::Display for UnknownTopology {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("unknown topology (expected `comb-bank` or `multi-tap`)")
    }
}

impl std::error::Error for UnknownTopology {}

/// One all-pass stage over a ring line, gain scaled by `2^shift`:
///
/// ```text
/// z   = line[delay]
/// in  = out + z*g
/// out = z - in*g
/// line <- in
/// ```
#[inline(always)]
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn allpass_stage<const N: usize>(
    line: &mut RingDelayLine<N>,
    delay: usize,
    shift: u32,
    x: i64,
) -> i64 {
    let z = i64::from(line.read(delay));
    let g = line.gain();
    let v = x + mul_shift(z, g, shift);
    let y = z - mul_shift(v, g, shift);
    line.write(v as i32);
    y
}

/// Runtime-selected network.
#[derive(Debug)]
pub enum Network {
    CombBank(CombBank),
    MultiTap(MultiTap),
}

impl Network {
    pub fn new(topology: Topology) -> Self {
        match topology {
            Topology::CombBank => Network::CombBank(CombBank::new()),
            Topology::MultiTap => Network::MultiTap(MultiTap::new()),
        }
    }
}

impl FilterNetwork for Network {
    #[inline]
    fn reset(&mut self) {
        match self {
            Network::CombBank(n) => n.reset(),
            Network::MultiTap(n) => n.reset(),
        }
    }

    #[inline]
    fn clear(&mut self) {
        match self {
            Network::CombBank(n) => n.clear(),
            Network::MultiTap(n) => n.clear(),
        }
    }

    #[inline]
    fn apply_decay(&mut self, time_index: usize) {
        match self {
            Network::CombBank(n) => n.apply_decay(time_index),
            Network::MultiTap(n) => n.apply_decay(time_index),
        }
    }

    #[inline]
    fn process(&mut self, input: i32, depth: i32) -> i64 {
        match self {
            Network::CombBank(n) => n.process(input, depth),
            Network::MultiTap(n) => n.process(input, depth),
        }
    }

    #[inline]
    fn topology(&self) -> Topology {
        match self {
            Network::CombBank(_) => Topology::CombBank,
            Network::MultiTap(_) => Topology::MultiTap,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reverbor_core::fixed::{DEFAULT_GAIN_Q12, Q12_SHIFT};

    #[test]
    fn topology_ids_and_names_round_trip() {
        for t in [Topology::CombBank, Topology::MultiTap] {
            assert_eq!(Topology::from_id(t.id()), t);
            assert_eq!(t.name().parse::<Topology>(), Ok(t));
        }
        assert_eq!(Topology::from_id(42), Topology::CombBank);
        assert_eq!("B".parse::<Topology>(), Ok(Topology::MultiTap));
        assert!("plate".parse::<Topology>().is_err());
    }

    #[test]
    fn allpass_stage_matches_difference_equation() {
        let mut line = RingDelayLine::<16>::new();
        line.set_gain(DEFAULT_GAIN_Q12);
        // Empty line: the input goes straight in, the output is -g*x.
        let y = allpass_stage(&mut line, 3, Q12_SHIFT, 4096);
        assert_eq!(y, -((4096 * i64::from(DEFAULT_GAIN_Q12)) >> 12));
        assert_eq!(line.read(0), 4096);
        // After three more zero inputs the stored value reaches the tap.
        for _ in 0..3 {
            allpass_stage(&mut line, 3, Q12_SHIFT, 0);
        }
        let z = i64::from(line.read(3));
        assert_eq!(z, 4096);
    }

    #[test]
    fn network_dispatch_reports_topology() {
        let a = Network::new(Topology::CombBank);
        let b = Network::new(Topology::MultiTap);
        assert_eq!(a.topology(), Topology::CombBank);
        assert_eq!(b.topology(), Topology::MultiTap);
    }
}
