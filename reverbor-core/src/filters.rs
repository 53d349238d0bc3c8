//! Integer FIR smoothing applied to comb feedback taps.
//!
//! Contents
//! - `LPF_KERNEL` : 5-tap symmetric low-pass, integer coefficients
//! - `smoothed_tap` : reads a ring line around a tap offset through the kernel
//!
//! Notes
//! - Coefficients sum to 1019, normalized by `>> 10`: DC gain `~0.995`.
//! - Accumulation is `i64`; the result is truncated back to `i32` like a
//!   regular tap.

use crate::delay::RingDelayLine;

/// Kernel taps, centred on the middle coefficient.
pub const LPF_KERNEL: [i64; 5] = [21, 236, 505, 236, 21];
/// Normalization shift for [`LPF_KERNEL`].
pub const LPF_SHIFT: u32 = 10;
/// Half width of the kernel.
pub const LPF_HALF: usize = LPF_KERNEL.len() / 2;

/// Low-passed read of `line` centred on `offset`.
///
/// Reads `offset - 2 ..= offset + 2`; `offset` must be at least [`LPF_HALF`].
#[inline]
#[allow(clippy::cast_possible_truncation)]
pub fn smoothed_tap<const N: usize>(line: &RingDelayLine<N>, offset: usize) -> i32 {
    let start = offset - LPF_HALF;
    let mut sum: i64 = 0;
    for (j, &coef) in LPF_KERNEL.iter().enumerate() {
        sum += i64::from(line.read(start + j)) * coef;
    }
    (sum >> LPF_SHIFT) as i32
}
