//! Power-of-two ring delay line holding fixed-point samples.
//!
//! The line grows "backward": `write` first steps the cursor down by one
//! (modulo capacity) and then stores, so `read(k)` looks `k` writes into the
//! past relative to the most recent write. Every index is masked, so no read or
//! write can leave the buffer regardless of the offset passed in; offsets
//! `>= N` simply alias onto younger history.
//!
//! Storage is allocated once at construction and never resized.

use alloc::boxed::Box;
use alloc::vec;

use crate::fixed::DEFAULT_GAIN_Q12;

/// Circular buffer of `N` `i32` samples with a write cursor and a feedback gain.
#[derive(Clone, Debug)]
pub struct RingDelayLine<const N: usize> {
    buf: Box<[i32]>,
    cursor: usize,
    gain: i32,
}

impl<const N: usize> RingDelayLine<N> {
    /// Capacity in samples.
    pub const SIZE: usize = N;
    /// `SIZE - 1`; valid because `SIZE` is a power of two.
    pub const MASK: usize = N - 1;

    const POW2: () = assert!(N > 0 && N.is_power_of_two(), "ring capacity must be a power of two");

    /// Zeroed line with cursor 0 and the default Q12 gain.
    pub fn new() -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::POW2;
        Self { buf: vec![0; N].into_boxed_slice(), cursor: 0, gain: DEFAULT_GAIN_Q12 }
    }

    /// Sample `offset` steps behind the cursor.
    #[inline(always)]
    pub fn read(&self, offset: usize) -> i32 {
        self.buf[(self.cursor.wrapping_add(offset)) & Self::MASK]
    }

    /// Push a new head sample: decrement the cursor, then store.
    #[inline(always)]
    pub fn write(&mut self, sample: i32) {
        self.cursor = self.cursor.wrapping_sub(1) & Self::MASK;
        self.buf[self.cursor] = sample;
    }

    /// Zero the storage. Cursor and gain are left alone.
    pub fn clear(&mut self) {
        self.buf.fill(0);
    }

    /// Back to the power-on state: zeroed, cursor 0, gain `gain`.
    pub fn reset(&mut self, gain: i32) {
        self.clear();
        self.cursor = 0;
        self.gain = gain;
    }

    #[inline] pub fn gain(&self) -> i32 { self.gain }
    #[inline] pub fn set_gain(&mut self, gain: i32) { self.gain = gain; }
    #[inline] pub fn cursor(&self) -> usize { self.cursor }
    #[inline] pub fn capacity(&self) -> usize { N }

    /// True when every stored sample is zero.
    pub fn is_silent(&self) -> bool {
        self.buf.iter().all(|&s| s == 0)
    }
}

impl<const N: usize> Default for RingDelayLine<N> {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markers_read_back_in_reverse_write_order() {
        const C: usize = 64;
        let mut line = RingDelayLine::<C>::new();
        for i in 0..C {
            line.write(i32::try_from(i).unwrap() + 1000);
        }
        for k in 0..C {
            let expected = i32::try_from(C - 1 - k).unwrap() + 1000;
            assert_eq!(line.read(k), expected, "offset {k}");
        }
    }

    #[test]
    fn cursor_stays_in_range_and_wraps() {
        let mut line = RingDelayLine::<8>::new();
        assert_eq!(line.cursor(), 0);
        line.write(1);
        assert_eq!(line.cursor(), 7);
        for _ in 0..7 { line.write(2); }
        assert_eq!(line.cursor(), 0);
        for _ in 0..100 {
            line.write(3);
            assert!(line.cursor() < 8);
        }
    }

    #[test]
    fn read_before_write_sees_displaced_history() {
        let mut line = RingDelayLine::<16>::new();
        for v in 1..=4 { line.write(v); }
        // Newest at offset 0, oldest of the four at offset 3.
        assert_eq!(line.read(0), 4);
        assert_eq!(line.read(3), 1);
        assert_eq!(line.read(4), 0);
        // Offsets wrap instead of leaving the buffer.
        assert_eq!(line.read(16), line.read(0));
    }

    #[test]
    fn clear_keeps_gain_and_cursor() {
        let mut line = RingDelayLine::<32>::new();
        line.set_gain(1234);
        for v in 0..10 { line.write(v + 1); }
        let cur = line.cursor();
        line.clear();
        assert!(line.is_silent());
        assert_eq!(line.gain(), 1234);
        assert_eq!(line.cursor(), cur);
    }

    #[test]
    fn reset_restores_power_on_state() {
        let mut line = RingDelayLine::<32>::new();
        line.write(5);
        line.set_gain(1);
        line.reset(DEFAULT_GAIN_Q12);
        assert!(line.is_silent());
        assert_eq!(line.cursor(), 0);
        assert_eq!(line.gain(), DEFAULT_GAIN_Q12);
        assert_eq!(line.capacity(), 32);
        assert_eq!(RingDelayLine::<32>::MASK, 31);
    }
}
