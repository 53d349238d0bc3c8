//! Construction-time settings.
//!
//! `EngineConfig` carries the topology plus the three user controls so a host
//! or the CLI can describe an engine in one value (and, with the `serde`
//! feature, load it from a file). Missing fields fall back to the
//! `initialize` defaults.

use crate::network::Topology;

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct EngineConfig {
    pub topology: Topology,
    /// Decay time in `[0, 1]`.
    pub time: f32,
    /// Wet level in `[0, 1]`.
    pub depth: f32,
    /// Dry/wet blend in `[0, 1]`, applied directly (no notch).
    pub mix: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { topology: Topology::CombBank, time: 0.0, depth: 0.0, mix: 0.5 }
    }
}
