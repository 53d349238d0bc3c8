//! Float-side helpers: math backend, clamping, and the output soft limiter.
//!
//! Design goals:
//! - `no_std` ready (guarded by the crate feature `no-std`)
//! - Math backend selection that works in both `std` and `no_std` contexts
//! - Clean, side-effect free helpers that are easy to test
//!
//! Everything inside the feedback loops is fixed-point (see [`crate::fixed`]);
//! floats only appear at the edges of the engine: parameter decoding, the
//! dry/wet blend and the final limiter.

use cfg_if::cfg_if;

// ----------------------------- Math backend selection -----------------------------

cfg_if! {
    // micromath preferred if explicitly requested (works in no_std)
    if #[cfg(feature = "micromath")] {
        use micromath::F32Ext as _;
        #[inline] fn m_fabs(x: f32) -> f32 { x.abs() }
        #[inline] fn m_copysign(x: f32, sign: f32) -> f32 { x.copysign(sign) }
        #[inline] fn m_round(x: f32) -> f32 { x.round() }
    // libm (C math) in no_std
    } else if #[cfg(feature = "no-std")] {
        #[inline] fn m_fabs(x: f32) -> f32 { libm::fabsf(x) }
        #[inline] fn m_copysign(x: f32, sign: f32) -> f32 { libm::copysignf(x, sign) }
        #[inline] fn m_round(x: f32) -> f32 { libm::roundf(x) }
    // std backend
    } else {
        #[inline] fn m_fabs(x: f32) -> f32 { x.abs() }
        #[inline] fn m_copysign(x: f32, sign: f32) -> f32 { x.copysign(sign) }
        #[inline] fn m_round(x: f32) -> f32 { x.round() }
    }
}

// --------------------------------- Constants -------------------------------------

/// Knee of the output limiter. Below it the signal passes untouched.
pub const LIMIT_THRESHOLD: f32 = 0.1;

// --------------------------------- Utilities -------------------------------------

#[inline]
pub fn clamp(x: f32, lo: f32, hi: f32) -> f32 {
    if x < lo { lo } else if x > hi { hi } else { x }
}

/// Clamp into `[0, 1]`. NaN maps to 0 so a garbage parameter can never
/// reach the gain table index.
#[inline]
pub fn clamp01(x: f32) -> f32 {
    if x.is_nan() { 0.0 } else { clamp(x, 0.0, 1.0) }
}

/// Round half away from zero, routed through the selected math backend.
#[inline]
pub fn round(x: f32) -> f32 {
    m_round(x)
}

// --------------------------------- Nonlinearities --------------------------------

/// Cubic soft clip: `x - c * x^3` with `x` first clipped to `[-1, 1]`.
///
/// `c` is the curvature in `[0, 1/3]`; inside that range the curve is
/// monotonic on `[-1, 1]` and reaches `±(1 - c)` at the rails.
#[inline]
pub fn soft_clip(c: f32, x: f32) -> f32 {
    let x = clamp(x, -1.0, 1.0);
    x - c * (x * x * x)
}

/// Knee-based soft limiter.
///
/// Magnitudes below `c` pass unchanged. Above it, the excursion past the knee
/// goes through [`soft_clip`] with the same coefficient and is added back onto
/// the knee, preserving sign. The result never exceeds `1.0` in magnitude.
#[inline]
pub fn soft_limit(c: f32, x: f32) -> f32 {
    let xf = m_fabs(x);
    if xf < c {
        x
    } else {
        m_copysign(c + soft_clip(c, xf - c), x)
    }
}

/// [`soft_limit`] at the engine's fixed knee.
#[derive(Copy, Clone, Debug)]
pub struct SoftLimiter {
    threshold: f32,
}

impl SoftLimiter {
    #[inline] pub fn new(threshold: f32) -> Self { Self { threshold: clamp(threshold, 0.0, 1.0 / 3.0) } }
    #[inline] pub fn threshold(&self) -> f32 { self.threshold }
    #[inline] pub fn process(&self, x: f32) -> f32 { soft_limit(self.threshold, x) }
}

impl Default for SoftLimiter {
    fn default() -> Self { Self::new(LIMIT_THRESHOLD) }
}

// --------------------------------- Tests (std only) ------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn below_knee_is_identity() {
        for x in [-0.099, -0.05, 0.0, 0.013, 0.0999] {
            assert_eq!(soft_limit(LIMIT_THRESHOLD, x), x);
        }
    }

    #[test]
    fn limiter_is_bounded_and_odd() {
        for x in [-1.0e6, -40.0, -2.0, -1.0, -0.3, 0.3, 1.0, 2.0, 40.0, 1.0e6] {
            let y = soft_limit(LIMIT_THRESHOLD, x);
            assert!(y.abs() <= 1.0, "x={x} y={y}");
            assert_eq!(y.signum(), x.signum());
            assert_eq!(soft_limit(LIMIT_THRESHOLD, -x), -y);
        }
    }

    #[test]
    fn limiter_is_monotonic_above_knee() {
        let mut prev = soft_limit(LIMIT_THRESHOLD, 0.1);
        let mut x = 0.1;
        while x < 1.5 {
            x += 0.01;
            let y = soft_limit(LIMIT_THRESHOLD, x);
            assert!(y >= prev, "x={x} y={y} prev={prev}");
            prev = y;
        }
        assert!((prev - 1.0).abs() < 1e-6, "rail={prev}");
    }

    #[test]
    fn clamp01_handles_nan_and_range() {
        assert_eq!(clamp01(f32::NAN), 0.0);
        assert_eq!(clamp01(-3.0), 0.0);
        assert_eq!(clamp01(3.0), 1.0);
        assert_eq!(clamp01(0.25), 0.25);
    }

    #[test]
    fn soft_limiter_struct_matches_free_fn() {
        let lim = SoftLimiter::default();
        assert_eq!(lim.threshold(), LIMIT_THRESHOLD);
        assert_eq!(lim.process(0.7), soft_limit(LIMIT_THRESHOLD, 0.7));
    }
}
