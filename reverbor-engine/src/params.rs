//! Engine parameters and their host encoding.
//!
//! The host addresses parameters by a small numeric id and sends values as
//! Q31 fixed-point. Values are decoded to float, clamped to `[0, 1]` and then
//! mapped per parameter. The dry/wet mix is driven by the shift-depth control
//! through a notch: anything within ±0.01 of the centre lands on exactly 0.5,
//! and both outer segments are stretched so 0 and 1 stay reachable.

use reverbor_core::dsp::clamp01;
use reverbor_core::fixed::{depth_to_fixed, q31_to_f32};
use reverbor_core::gain_table::quantize_time;

/// Lower edge of the mix notch.
pub const NOTCH_LO: f32 = 0.49;
/// Upper edge of the mix notch.
pub const NOTCH_HI: f32 = 0.51;
/// Slope of both outer segments: `0.5 / 0.49`.
const NOTCH_SLOPE: f32 = 0.5 / NOTCH_LO;

/// Host parameter ids.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ParamId {
    /// Decay time, selects the gain-table row.
    Time = 0,
    /// Wet level fed into the all-pass chain.
    Depth = 1,
    /// Dry/wet blend, through the centre notch.
    ShiftDepth = 2,
}

impl ParamId {
    /// `None` for ids the engine does not know; callers ignore those.
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(ParamId::Time),
            1 => Some(ParamId::Depth),
            2 => Some(ParamId::ShiftDepth),
            _ => None,
        }
    }
}

/// Map the shift-depth control onto the mix, with a flat spot at 0.5.
#[inline]
pub fn notch_remap(v: f32) -> f32 {
    let v = clamp01(v);
    let mix = if v <= NOTCH_LO {
        v * NOTCH_SLOPE
    } else if v >= NOTCH_HI {
        0.5 + (v - NOTCH_HI) * NOTCH_SLOPE
    } else {
        0.5
    };
    clamp01(mix)
}

/// Decode a Q31 host value into `[0, 1]`.
#[inline]
pub fn decode(value: i32) -> f32 {
    clamp01(q31_to_f32(value))
}

/// Plain scalar state shared between the parameter entry point and the
/// block loop. Written only by setters, read once per block.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ReverbParams {
    /// Dry/wet blend in `[0, 1]`; 0 is fully dry.
    pub mix: f32,
    /// Wet scaling in `[0, 1]`.
    pub depth: f32,
    /// Decay-time selector in `[0, 1]`.
    pub time: f32,
}

impl Default for ReverbParams {
    fn default() -> Self {
        Self { mix: 0.5, depth: 0.0, time: 0.0 }
    }
}

impl ReverbParams {
    /// Apply a host-encoded value. Returns `false` for unknown ids.
    pub fn set_encoded(&mut self, index: u8, value: i32) -> bool {
        let Some(id) = ParamId::from_index(index) else {
            return false;
        };
        let v = decode(value);
        match id {
            ParamId::Time => self.time = v,
            ParamId::Depth => self.depth = v,
            ParamId::ShiftDepth => self.mix = notch_remap(v),
        }
        true
    }

    /// Per-block snapshot in the form the sample loop uses.
    #[inline]
    pub fn snapshot(&self) -> BlockParams {
        BlockParams {
            dry: 1.0 - self.mix,
            wet: self.mix,
            depth: depth_to_fixed(self.depth),
            time_index: quantize_time(self.time),
        }
    }
}

/// Parameters latched at the start of a block.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BlockParams {
    pub dry: f32,
    pub wet: f32,
    /// 10-bit fixed-point depth.
    pub depth: i32,
    /// Gain-table row.
    pub time_index: usize,
}
