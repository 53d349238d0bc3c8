//! Fixed-point scales used by the delay network.
//!
//! Bit widths
//! - samples inside the delay lines: `i32`, input prescaled by `2^20`
//!   (`INPUT_SHIFT`), so a full-scale input uses 21 bits and leaves headroom
//!   for the feedback build-up of gains below unity
//! - feedback gains: Q12 (`u16`/`i32`, `4096 == 1.0`)
//! - fine all-pass gains: Q16 (`65536 == 1.0`)
//! - depth: 10-bit fraction (`0x400 == 1.0`), applied with a Q12 shift
//! - host parameters: Q31 (`i32`, `2^31 == 1.0`)
//!
//! Products are always formed in `i64` and shifted back down before being
//! stored as `i32`. Changing any shift or capacity here requires re-checking
//! that the loops stay inside `i32`.

/// Shift of Q12 gains.
pub const Q12_SHIFT: u32 = 12;
/// `1.0` in Q12.
pub const Q12_ONE: i32 = 1 << Q12_SHIFT;

/// Shift of Q16 gains.
pub const Q16_SHIFT: u32 = 16;
/// `1.0` in Q16.
pub const Q16_ONE: i32 = 1 << Q16_SHIFT;

/// Prescale applied to float input samples before they enter the network.
pub const INPUT_SHIFT: u32 = 20;
pub const INPUT_SCALE: f32 = (1u32 << INPUT_SHIFT) as f32;

/// Depth is quantized to this many fractional bits...
pub const DEPTH_BITS: u32 = 10;
pub const DEPTH_ONE: i32 = 1 << DEPTH_BITS;
/// ...but multiplied in with a Q12 shift, so full depth scales the bank sum by 1/4.
pub const DEPTH_SHIFT: u32 = Q12_SHIFT;

/// `0.7` in Q12 (`round_down(0.7 * 65536) >> 4`), the power-on gain of every line.
pub const DEFAULT_GAIN_Q12: i32 = 2867;
/// `0.7` in Q16.
pub const DEFAULT_GAIN_Q16: i32 = 45875;

/// `x * gain >> 12`
#[inline(always)]
pub fn mul_q12(x: i64, gain: i32) -> i64 {
    (x * i64::from(gain)) >> Q12_SHIFT
}

/// `x * gain >> 16`
#[inline(always)]
pub fn mul_q16(x: i64, gain: i32) -> i64 {
    (x * i64::from(gain)) >> Q16_SHIFT
}

/// `x * gain >> shift` for a caller-chosen scale.
#[inline(always)]
pub fn mul_shift(x: i64, gain: i32, shift: u32) -> i64 {
    (x * i64::from(gain)) >> shift
}

/// Float sample (nominally `[-1, 1]`) to the network's `2^20` scale.
/// Out-of-range floats saturate at the `i32` rails, NaN becomes 0.
#[inline]
#[allow(clippy::cast_possible_truncation)]
pub fn to_fixed(x: f32) -> i32 {
    (x * INPUT_SCALE) as i32
}

/// Network output back to float. Undoes [`to_fixed`].
#[inline]
#[allow(clippy::cast_precision_loss)]
pub fn from_fixed(x: i64) -> f32 {
    x as f32 / INPUT_SCALE
}

/// Q31 host encoding to float (`[-1, 1)`).
#[inline]
#[allow(clippy::cast_precision_loss)]
pub fn q31_to_f32(v: i32) -> f32 {
    v as f32 * (1.0 / 2_147_483_648.0)
}

/// Float to Q31, saturating. Inverse of [`q31_to_f32`] for hosts and tests.
#[inline]
#[allow(clippy::cast_possible_truncation)]
pub fn f32_to_q31(x: f32) -> i32 {
    (f64::from(x) * 2_147_483_648.0) as i32
}

/// Depth in `[0, 1]` to its 10-bit fraction.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn depth_to_fixed(depth: f32) -> i32 {
    (depth * DEPTH_ONE as f32) as i32
}
