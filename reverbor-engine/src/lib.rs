//! Reverbor Engine: delay networks + host lifecycle.
//!
//! Crate layout:
//! - [`network`]   : `FilterNetwork` trait, `Topology`, runtime `Network`
//! - [`comb_bank`] : topology A, six combs into four all-passes
//! - [`multi_tap`] : topology B, four taps into two all-passes
//! - [`params`]    : parameter ids, Q31 decoding, mix notch
//! - [`config`]    : `EngineConfig` (serde behind the `serde` feature)
//! - [`engine`]    : `ReverbEngine<N>`: initialize / process / resume / set_parameter
//!
//! No heap allocation happens in the audio path: delay storage is allocated
//! when a network is constructed and parameters are plain floats latched once
//! per block.

pub mod comb_bank;
pub mod config;
pub mod engine;
pub mod multi_tap;
pub mod network;
pub mod params;

// Re-export some commonly used items to make downstream imports ergonomic.
pub use comb_bank::CombBank;
pub use config::EngineConfig;
pub use engine::ReverbEngine;
pub use multi_tap::MultiTap;
pub use network::{FilterNetwork, Network, Topology};
pub use params::{ParamId, ReverbParams};
