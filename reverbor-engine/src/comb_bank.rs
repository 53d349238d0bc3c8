//! Topology A: six feedback combs into a four-stage all-pass diffuser.
//!
//! Signal flow per sample
//! 1. Combs 0–2 are fed the input directly. Their feedback tap goes through
//!    the 5-tap FIR before re-entering the loop. Each also exposes a shorter
//!    pre-delay tap; the three pre-delay taps are summed and halved.
//! 2. Combs 3–5 are fed that halved pre-delay sum. Their raw feedback taps
//!    are summed as the bank output.
//! 3. The bank output is scaled by depth and run through four all-passes.
//!
//! Only combs 0–2 follow the decay-time control. Combs 3–5 always run at
//! gain-table row 1, a short fixed decay.
//!
//! Sizing: comb lines hold `2^14` samples, all-pass lines `2^12`. All delays
//! below are 48 kHz sample counts and must stay under those capacities
//! (the comb FIR reads two samples past its tap).

use reverbor_core::delay::RingDelayLine;
use reverbor_core::filters::smoothed_tap;
use reverbor_core::fixed::{mul_q12, mul_shift, DEFAULT_GAIN_Q12, DEPTH_SHIFT, Q12_SHIFT};
use reverbor_core::gain_table::GAIN_TABLE;

use crate::network::{allpass_stage, FilterNetwork, Topology};

pub const COMB_SIZE: usize = 1 << 14;
pub const ALLPASS_SIZE: usize = 1 << 12;

pub const COMB_COUNT: usize = 6;
/// Combs fed from the input (and smoothed / decay-controlled).
pub const INPUT_COMBS: usize = 3;
pub const ALLPASS_COUNT: usize = 4;

/// Feedback tap offsets.
pub const COMB_DELAYS: [usize; COMB_COUNT] = [6139, 4507, 2609, 2999, 2579, 1559];
/// Pre-delay taps on combs 0–2 that drive combs 3–5.
pub const PRE_DELAYS: [usize; INPUT_COMBS] = [547, 967, 1559];
/// ≈ 7.0, 5.0, 2.3 and 1.1 ms.
pub const ALLPASS_DELAYS: [usize; ALLPASS_COUNT] = [337, 241, 109, 53];

/// Gain-table row used by combs 3–5 regardless of the decay setting.
pub const FIXED_DECAY_ROW: usize = 1;

type CombLine = RingDelayLine<COMB_SIZE>;
type AllpassLine = RingDelayLine<ALLPASS_SIZE>;

#[derive(Clone, Debug)]
pub struct CombBank {
    combs: [CombLine; COMB_COUNT],
    allpasses: [AllpassLine; ALLPASS_COUNT],
}

impl CombBank {
    pub fn new() -> Self {
        Self {
            combs: core::array::from_fn(|_| CombLine::new()),
            allpasses: core::array::from_fn(|_| AllpassLine::new()),
        }
    }

    pub fn combs(&self) -> &[CombLine] { &self.combs }
    pub fn allpasses(&self) -> &[AllpassLine] { &self.allpasses }

    /// True when no line holds any energy.
    pub fn is_silent(&self) -> bool {
        self.combs.iter().all(RingDelayLine::is_silent)
            && self.allpasses.iter().all(RingDelayLine::is_silent)
    }
}

impl Default for CombBank {
    fn default() -> Self { Self::new() }
}

impl FilterNetwork for CombBank {
    fn reset(&mut self) {
        for c in &mut self.combs { c.reset(DEFAULT_GAIN_Q12); }
        for a in &mut self.allpasses { a.reset(DEFAULT_GAIN_Q12); }
    }

    fn clear(&mut self) {
        for c in &mut self.combs { c.clear(); }
        for a in &mut self.allpasses { a.clear(); }
    }

    fn apply_decay(&mut self, time_index: usize) {
        for (i, c) in self.combs.iter_mut().enumerate() {
            let row = if i < INPUT_COMBS { time_index } else { FIXED_DECAY_ROW };
            c.set_gain(GAIN_TABLE.gain(row, i));
        }
    }

    #[inline]
    #[allow(clippy::cast_possible_truncation)]
    fn process(&mut self, input: i32, depth: i32) -> i64 {
        let input = i64::from(input);
        let (front, back) = self.combs.split_at_mut(INPUT_COMBS);

        let mut pre: i64 = 0;
        for ((c, &delay), &pre_delay) in front.iter_mut().zip(&COMB_DELAYS).zip(&PRE_DELAYS) {
            let z = i64::from(smoothed_tap(c, delay));
            pre += i64::from(c.read(pre_delay));
            let g = c.gain();
            c.write((input + mul_q12(z, g)) as i32);
        }
        pre >>= 1;

        let mut sum: i64 = 0;
        for (c, &delay) in back.iter_mut().zip(&COMB_DELAYS[INPUT_COMBS..]) {
            let z = i64::from(c.read(delay));
            sum += z;
            let g = c.gain();
            c.write((pre + mul_q12(z, g)) as i32);
        }

        let mut out = mul_shift(sum, depth, DEPTH_SHIFT);
        for (a, &delay) in self.allpasses.iter_mut().zip(&ALLPASS_DELAYS) {
            out = allpass_stage(a, delay, Q12_SHIFT, out);
        }
        out
    }

    fn topology(&self) -> Topology { Topology::CombBank }
}
