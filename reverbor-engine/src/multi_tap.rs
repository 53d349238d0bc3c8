//! Topology B: four parallel feedback taps into a two-stage all-pass.
//!
//! Every tap line receives the same scaled input and all four follow the
//! decay-time control (gain-table columns 0–3). The summed taps are scaled by
//! depth and diffused by two short all-passes whose gains are Q16, which gives
//! finer steps than Q12 at these short delays.

use reverbor_core::delay::RingDelayLine;
use reverbor_core::fixed::{mul_q12, mul_shift, DEFAULT_GAIN_Q12, DEFAULT_GAIN_Q16, DEPTH_SHIFT, Q16_SHIFT};
use reverbor_core::gain_table::GAIN_TABLE;

use crate::network::{allpass_stage, FilterNetwork, Topology};

pub const TAP_SIZE: usize = 1 << 14;
pub const ALLPASS_SIZE: usize = 1 << 12;

pub const TAP_COUNT: usize = 4;
pub const ALLPASS_COUNT: usize = 2;

/// Tap offsets; these share gain columns 0–3 with the comb bank.
pub const TAP_DELAYS: [usize; TAP_COUNT] = [6139, 4507, 2609, 2999];
/// ≈ 5.0 and 2.3 ms.
pub const ALLPASS_DELAYS: [usize; ALLPASS_COUNT] = [241, 109];

type TapLine = RingDelayLine<TAP_SIZE>;
type AllpassLine = RingDelayLine<ALLPASS_SIZE>;

#[derive(Clone, Debug)]
pub struct MultiTap {
    taps: [TapLine; TAP_COUNT],
    allpasses: [AllpassLine; ALLPASS_COUNT],
}

impl MultiTap {
    pub fn new() -> Self {
        let mut s = Self {
            taps: core::array::from_fn(|_| TapLine::new()),
            allpasses: core::array::from_fn(|_| AllpassLine::new()),
        };
        s.reset();
        s
    }

    pub fn taps(&self) -> &[TapLine] { &self.taps }
    pub fn allpasses(&self) -> &[AllpassLine] { &self.allpasses }

    pub fn is_silent(&self) -> bool {
        self.taps.iter().all(RingDelayLine::is_silent)
            && self.allpasses.iter().all(RingDelayLine::is_silent)
    }
}

impl Default for MultiTap {
    fn default() -> Self { Self::new() }
}

impl FilterNetwork for MultiTap {
    fn reset(&mut self) {
        for t in &mut self.taps { t.reset(DEFAULT_GAIN_Q12); }
        for a in &mut self.allpasses { a.reset(DEFAULT_GAIN_Q16); }
    }

    fn clear(&mut self) {
        for t in &mut self.taps { t.clear(); }
        for a in &mut self.allpasses { a.clear(); }
    }

    fn apply_decay(&mut self, time_index: usize) {
        for (i, t) in self.taps.iter_mut().enumerate() {
            t.set_gain(GAIN_TABLE.gain(time_index, i));
        }
    }

    #[inline]
    #[allow(clippy::cast_possible_truncation)]
    fn process(&mut self, input: i32, depth: i32) -> i64 {
        let input = i64::from(input);

        let mut sum: i64 = 0;
        for (t, &delay) in self.taps.iter_mut().zip(&TAP_DELAYS) {
            let z = i64::from(t.read(delay));
            sum += z;
            let g = t.gain();
            t.write((input + mul_q12(z, g)) as i32);
        }

        let mut out = mul_shift(sum, depth, DEPTH_SHIFT);
        for (a, &delay) in self.allpasses.iter_mut().zip(&ALLPASS_DELAYS) {
            out = allpass_stage(a, delay, Q16_SHIFT, out);
        }
        out
    }

    fn topology(&self) -> Topology { Topology::MultiTap }
}
