//! Input fade-in applied after the delay lines are cleared.
//!
//! When the tails restart from silence, snapping the input straight to full
//! level produces an audible step. `InputRamp` instead rises from 0 toward 1
//! with a first-order approach, `g += (1 - g) * RAMP_RATE`, and snaps to exactly
//! 1.0 once it crosses `RAMP_SNAP`. With `RAMP_RATE = 1/16` that takes about 170
//! samples.

/// Fraction of the remaining distance covered per sample.
pub const RAMP_RATE: f32 = 0.0625;
/// Past this value the ramp jumps to unity.
pub const RAMP_SNAP: f32 = 0.99998;

/// Exponential 0 → 1 gain ramp, advanced once per sample.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct InputRamp {
    g: f32,
}

impl InputRamp {
    /// A ramp at 0, i.e. fully muted.
    #[inline] pub fn new() -> Self { Self { g: 0.0 } }

    /// Restart from 0.
    #[inline] pub fn reset(&mut self) { self.g = 0.0; }

    #[inline] pub fn value(&self) -> f32 { self.g }

    /// True once the ramp has snapped to unity.
    #[inline] pub fn is_settled(&self) -> bool { self.g >= 1.0 }

    /// Step one sample and return the new value.
    #[inline]
    pub fn advance(&mut self) -> f32 {
        if self.g < RAMP_SNAP {
            self.g += (1.0 - self.g) * RAMP_RATE;
        } else {
            self.g = 1.0;
        }
        self.g
    }

    /// Scale `x` by the current value.
    #[inline]
    pub fn apply(&self, x: f32) -> f32 { self.g * x }
}
