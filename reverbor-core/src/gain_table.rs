//! Decay-time → feedback-gain lookup.
//!
//! 65 rows indexed by the quantized decay-time control (`0..=64`), one Q12
//! column per delay line. Row 0 disables feedback entirely; from there each
//! column rises monotonically and tops out just below unity (`0xFC7`), so the
//! loops stay stable at every setting. The columns are tuned against the comb
//! lengths `6139, 4507, 2609, 2999, 2579, 1559` (48 kHz).

use crate::dsp::{clamp01, round};

/// Number of rows (`0..=64`).
pub const GAIN_TABLE_ROWS: usize = 64 + 1;
/// Highest row index.
pub const MAX_TIME_INDEX: usize = GAIN_TABLE_ROWS - 1;
/// One column per line of the widest network.
pub const GAIN_TABLE_COLUMNS: usize = 6;

/// One row of Q12 gains.
pub type GainRow = [u16; GAIN_TABLE_COLUMNS];

/// Immutable decay-time table.
#[derive(Debug)]
pub struct GainTimeTable {
    rows: [GainRow; GAIN_TABLE_ROWS],
}

impl GainTimeTable {
    /// Row for `time_index`. Indices past the end stick to the last row.
    #[inline]
    pub fn gains_for_time(&self, time_index: usize) -> &GainRow {
        &self.rows[time_index.min(MAX_TIME_INDEX)]
    }

    /// Single cell as an `i32` gain ready for [`crate::fixed::mul_q12`].
    #[inline]
    pub fn gain(&self, time_index: usize, column: usize) -> i32 {
        i32::from(self.gains_for_time(time_index)[column])
    }

    #[inline]
    pub fn rows(&self) -> &[GainRow] {
        &self.rows
    }
}

/// Map the decay-time control (`0.0..=1.0`) to a table row: `round(t * 64)`.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
pub fn quantize_time(time: f32) -> usize {
    round(clamp01(time) * MAX_TIME_INDEX as f32) as usize
}

/// Q12 feedback gains, annotated with the nominal decay of each row.
pub static GAIN_TABLE: GainTimeTable = GainTimeTable {
    rows: [
        [0x000, 0x000, 0x000, 0x000, 0x000, 0x000], //  0
        [0x300, 0x4AF, 0x7DB, 0x710, 0x7EC, 0xA76], //  1   0.528 s
        [0x347, 0x4FF, 0x828, 0x760, 0x838, 0xAB2], //  2   0.557 s
        [0x390, 0x550, 0x873, 0x7AE, 0x883, 0xAED], //  3   0.588 s
        [0x3DB, 0x5A1, 0x8BD, 0x7FC, 0x8CD, 0xB26], //  4   0.621 s
        [0x428, 0x5F3, 0x906, 0x848, 0x915, 0xB5D], //  5   0.655 s
        [0x476, 0x644, 0x94D, 0x893, 0x95C, 0xB92], //  6   0.692 s
        [0x4C6, 0x696, 0x992, 0x8DD, 0x9A0, 0xBC5], //  7   0.730 s
        [0x517, 0x6E6, 0x9D5, 0x924, 0x9E3, 0xBF6], //  8   0.771 s
        [0x568, 0x736, 0xA16, 0x96A, 0xA24, 0xC25], //  9   0.814 s
        [0x5B9, 0x786, 0xA56, 0x9AF, 0xA63, 0xC53], // 10   0.859 s
        [0x60B, 0x7D4, 0xA94, 0x9F1, 0xAA1, 0xC7F], // 11   0.907 s
        [0x65C, 0x821, 0xACF, 0xA32, 0xADC, 0xCA8], // 12   0.958 s
        [0x6AD, 0x86C, 0xB09, 0xA71, 0xB15, 0xCD1], // 13   1.011 s
        [0x6FE, 0x8B6, 0xB41, 0xAAD, 0xB4D, 0xCF7], // 14   1.067 s
        [0x74E, 0x8FF, 0xB77, 0xAE8, 0xB82, 0xD1C], // 15   1.127 s
        [0x79D, 0x946, 0xBAB, 0xB21, 0xBB6, 0xD40], // 16   1.189 s
        [0x7EA, 0x98B, 0xBDD, 0xB58, 0xBE8, 0xD62], // 17   1.255 s
        [0x837, 0x9CF, 0xC0D, 0xB8D, 0xC17, 0xD82], // 18   1.325 s
        [0x882, 0xA10, 0xC3C, 0xBC1, 0xC46, 0xDA1], // 19   1.399 s
        [0x8CC, 0xA50, 0xC68, 0xBF2, 0xC72, 0xDBF], // 20   1.477 s
        [0x914, 0xA8E, 0xC93, 0xC21, 0xC9C, 0xDDB], // 21   1.559 s
        [0x95B, 0xACA, 0xCBC, 0xC4F, 0xCC5, 0xDF6], // 22   1.646 s
        [0x99F, 0xB04, 0xCE4, 0xC7B, 0xCEC, 0xE10], // 23   1.737 s
        [0x9E2, 0xB3C, 0xD0A, 0xCA5, 0xD12, 0xE28], // 24   1.834 s
        [0xA23, 0xB72, 0xD2E, 0xCCE, 0xD35, 0xE40], // 25   1.936 s
        [0xA62, 0xBA6, 0xD51, 0xCF4, 0xD58, 0xE56], // 26   2.044 s
        [0xAA0, 0xBD8, 0xD72, 0xD19, 0xD79, 0xE6B], // 27   2.158 s
        [0xADB, 0xC09, 0xD91, 0xD3D, 0xD98, 0xE80], // 28   2.278 s
        [0xB14, 0xC38, 0xDB0, 0xD5F, 0xDB6, 0xE93], // 29   2.404 s
        [0xB4C, 0xC64, 0xDCD, 0xD7F, 0xDD3, 0xEA5], // 30   2.538 s
        [0xB81, 0xC8F, 0xDE8, 0xD9F, 0xDEE, 0xEB7], // 31   2.679 s
        [0xBB5, 0xCB9, 0xE03, 0xDBC, 0xE08, 0xEC8], // 32   2.828 s
        [0xBE7, 0xCE0, 0xE1C, 0xDD9, 0xE21, 0xED8], // 33   2.986 s
        [0xC17, 0xD06, 0xE34, 0xDF4, 0xE39, 0xEE7], // 34   3.152 s
        [0xC45, 0xD2B, 0xE4B, 0xE0E, 0xE50, 0xEF5], // 35   3.327 s
        [0xC71, 0xD4D, 0xE61, 0xE26, 0xE65, 0xF03], // 36   3.513 s
        [0xC9C, 0xD6F, 0xE76, 0xE3E, 0xE7A, 0xF10], // 37   3.708 s
        [0xCC4, 0xD8F, 0xE89, 0xE54, 0xE8D, 0xF1C], // 38   3.914 s
        [0xCEC, 0xDAD, 0xE9C, 0xE6A, 0xEA0, 0xF28], // 39   4.132 s
        [0xD11, 0xDCA, 0xEAE, 0xE7E, 0xEB2, 0xF33], // 40   4.362 s
        [0xD35, 0xDE6, 0xEBF, 0xE92, 0xEC3, 0xF3D], // 41   4.605 s
        [0xD57, 0xE00, 0xED0, 0xEA4, 0xED3, 0xF47], // 42   4.861 s
        [0xD78, 0xE1A, 0xEDF, 0xEB6, 0xEE2, 0xF51], // 43   5.131 s
        [0xD98, 0xE32, 0xEEE, 0xEC6, 0xEF1, 0xF5A], // 44   5.417 s
        [0xDB6, 0xE49, 0xEFC, 0xED6, 0xEFF, 0xF62], // 45   5.718 s
        [0xDD2, 0xE5F, 0xF09, 0xEE5, 0xF0C, 0xF6B], // 46   6.037 s
        [0xDEE, 0xE74, 0xF16, 0xEF4, 0xF18, 0xF72], // 47   6.373 s
        [0xE08, 0xE88, 0xF22, 0xF01, 0xF24, 0xF7A], // 48   6.727 s
        [0xE21, 0xE9A, 0xF2D, 0xF0E, 0xF2F, 0xF81], // 49   7.102 s
        [0xE39, 0xEAD, 0xF38, 0xF1B, 0xF3A, 0xF87], // 50   7.497 s
        [0xE4F, 0xEBE, 0xF42, 0xF27, 0xF44, 0xF8E], // 51   7.914 s
        [0xE65, 0xECE, 0xF4C, 0xF32, 0xF4E, 0xF93], // 52   8.354 s
        [0xE7A, 0xEDE, 0xF55, 0xF3C, 0xF57, 0xF99], // 53   8.819 s
        [0xE8D, 0xEEC, 0xF5E, 0xF46, 0xF60, 0xF9E], // 54   9.310 s
        [0xEA0, 0xEFA, 0xF66, 0xF50, 0xF68, 0xFA4], // 55   9.828 s
        [0xEB2, 0xF08, 0xF6E, 0xF59, 0xF70, 0xFA8], // 56  10.375 s
        [0xEC3, 0xF14, 0xF76, 0xF62, 0xF78, 0xFAD], // 57  10.952 s
        [0xED3, 0xF21, 0xF7D, 0xF6A, 0xF7F, 0xFB1], // 58  11.561 s
        [0xEE2, 0xF2C, 0xF84, 0xF72, 0xF85, 0xFB5], // 59  12.205 s
        [0xEF1, 0xF37, 0xF8A, 0xF79, 0xF8C, 0xFB9], // 60  12.884 s
        [0xEFE, 0xF41, 0xF90, 0xF80, 0xF92, 0xFBD], // 61  13.601 s
        [0xF0C, 0xF4B, 0xF96, 0xF87, 0xF97, 0xFC0], // 62  14.358 s
        [0xF18, 0xF54, 0xF9C, 0xF8D, 0xF9D, 0xFC4], // 63  15.157 s
        [0xF24, 0xF5D, 0xFA1, 0xF93, 0xFA2, 0xFC7], // 64  16.000 s
    ],
};
