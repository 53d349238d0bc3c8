#![cfg_attr(not(feature = "std"), no_std)]
//! Reverbor Core: no_std-ready fixed-point primitives for a delay-network reverb.
//!
//! Features
//! - `std`       : (default) use the Rust standard library
//! - `no-std`    : build with `#![no_std]` and use `libm` for float helpers
//! - `micromath` : use `micromath` as the float backend instead
//!
//! Modules
//! - [`fixed`]      : Q12 / Q16 / `2^20` / Q31 scales and multiply helpers
//! - [`delay`]      : `RingDelayLine`, power-of-two circular buffer
//! - [`gain_table`] : decay-time → per-line feedback gain table
//! - [`filters`]    : 5-tap integer FIR used on comb feedback taps
//! - [`ramp`]       : `InputRamp`, post-reset input fade-in
//! - [`dsp`]        : math backend, clamping, soft limiter
//!
//! Design
//! - Delay storage is allocated once per line at construction; nothing
//!   allocates afterwards
//! - Feedback paths are integer-only so their growth is bounded and
//!   deterministic across targets
//! - Friendly to embedded / real-time targets

extern crate alloc;

pub mod delay;
pub mod dsp;
pub mod filters;
pub mod fixed;
pub mod gain_table;
pub mod ramp;

/// Commonly used types/functions for convenience:
pub mod prelude {
    pub use crate::delay::RingDelayLine;
    pub use crate::dsp::{clamp01, soft_clip, soft_limit, SoftLimiter, LIMIT_THRESHOLD};
    pub use crate::filters::smoothed_tap;
    pub use crate::fixed::{
        depth_to_fixed, from_fixed, mul_q12, mul_q16, q31_to_f32, to_fixed, DEFAULT_GAIN_Q12,
        DEFAULT_GAIN_Q16, DEPTH_ONE, DEPTH_SHIFT,
    };
    pub use crate::gain_table::{quantize_time, GainTimeTable, GAIN_TABLE, MAX_TIME_INDEX};
    pub use crate::ramp::InputRamp;
}

#[cfg(test)]
mod smoke {

    #[test]
    fn prelude_exists() {
        use crate::prelude::*;
        let mut line = RingDelayLine::<1024>::new();
        line.write(to_fixed(0.5));
        let _ = smoothed_tap(&line, 4);
        let _ = GAIN_TABLE.gains_for_time(quantize_time(0.3));
        let mut ramp = InputRamp::new();
        let _ = soft_limit(LIMIT_THRESHOLD, ramp.apply(1.0) + ramp.advance());
    }
}
