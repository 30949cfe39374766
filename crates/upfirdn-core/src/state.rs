//! Streaming state carried between `apply` calls
//!
//! The resampler's position in the conceptual upsampled stream is split
//! into two integers:
//!
//! - `phase` in `[0, up_rate)`: which polyphase sub-filter produces the next
//!   output sample.
//! - `input_offset`: how many raw samples of the next chunk are skipped
//!   before the next output is due. Only non-zero when `down_rate > up_rate`
//!   and the last output stepped past the end of the previous chunk.
//!
//! Relative to the start of the next chunk, the next output sits at
//! upsampled position `phase + up_rate * input_offset`, which is always
//! less than `down_rate`.
//!
//! The history buffer holds the last `taps_per_phase - 1` raw samples so the
//! filter window can reach back across chunk boundaries.

use crate::sample::Sample;

/// Phase counter, input offset and history of a resampler stream.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamState<S> {
    pub(crate) phase: usize,
    pub(crate) input_offset: usize,
    pub(crate) history: Vec<S>,
}

impl<S: Sample> StreamState<S> {
    /// Fresh state with a zeroed history of `history_len` samples.
    pub fn new(history_len: usize) -> Self {
        Self {
            phase: 0,
            input_offset: 0,
            history: vec![S::zero(); history_len],
        }
    }

    /// Sub-filter used for the next output sample.
    pub fn phase(&self) -> usize {
        self.phase
    }

    /// Raw samples to skip at the start of the next chunk.
    pub fn input_offset(&self) -> usize {
        self.input_offset
    }

    /// Retained input samples, oldest first.
    pub fn history(&self) -> &[S] {
        &self.history
    }

    /// Number of outputs that `in_len` more input samples will produce.
    ///
    /// The upsampled length saturates at `usize::MAX`; counts are exact
    /// while `in_len * up_rate` fits in a `usize`.
    pub fn needed_out_count(&self, in_len: usize, up_rate: usize, down_rate: usize) -> usize {
        let np = in_len.saturating_mul(up_rate);
        let mut need = np / down_rate;
        if self.phase + up_rate * self.input_offset < np % down_rate {
            need += 1;
        }
        need
    }

    /// Step to the next output position. Returns how many raw input
    /// samples the window advances.
    #[inline]
    pub(crate) fn advance(&mut self, up_rate: usize, down_rate: usize) -> usize {
        let t = self.phase + down_rate;
        self.phase = t % up_rate;
        t / up_rate
    }

    /// Shift the newest `input` samples into the history buffer.
    pub(crate) fn retain(&mut self, input: &[S]) {
        let len = self.history.len();
        if input.len() >= len {
            self.history.copy_from_slice(&input[input.len() - len..]);
        } else {
            self.history.rotate_left(input.len());
            self.history[len - input.len()..].copy_from_slice(input);
        }
    }

    pub(crate) fn reset(&mut self) {
        self.phase = 0;
        self.input_offset = 0;
        self.history.fill(S::zero());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_wraps_phase() {
        // up = 4, down = 3: phases 0 → 3 → 2 → 1 → 0
        let mut state = StreamState::<f64>::new(1);
        let steps: Vec<(usize, usize)> = (0..4)
            .map(|_| {
                let step = state.advance(4, 3);
                (state.phase(), step)
            })
            .collect();
        assert_eq!(steps, vec![(3, 0), (2, 1), (1, 1), (0, 1)]);
    }

    #[test]
    fn test_advance_decimation_skips_input() {
        let mut state = StreamState::<f64>::new(0);
        assert_eq!(state.advance(1, 3), 3);
        assert_eq!(state.phase(), 0);
    }

    #[test]
    fn test_needed_out_count_accounts_for_offset() {
        let mut state = StreamState::<f64>::new(0);
        // down = 3, up = 1 over 10 samples: outputs at 0, 3, 6, 9
        assert_eq!(state.needed_out_count(10, 1, 3), 4);

        // Next output due two samples into the following chunk.
        state.input_offset = 2;
        assert_eq!(state.needed_out_count(2, 1, 3), 0);
        assert_eq!(state.needed_out_count(3, 1, 3), 1);
        assert_eq!(state.needed_out_count(5, 1, 3), 1);
        assert_eq!(state.needed_out_count(6, 1, 3), 2);
    }

    #[test]
    fn test_needed_out_count_is_pure() {
        let mut state = StreamState::<f64>::new(2);
        state.phase = 2;
        let first = state.needed_out_count(7, 3, 2);
        let second = state.needed_out_count(7, 3, 2);
        assert_eq!(first, second);
        assert_eq!(state.phase(), 2);
    }

    #[test]
    fn test_needed_out_count_huge_input() {
        let state = StreamState::<f64>::new(1);
        // 2^64 - 1 is a multiple of 3
        assert_eq!(state.needed_out_count(usize::MAX, 4, 3), usize::MAX / 3);
        assert_eq!(state.needed_out_count(usize::MAX / 2, 1, 1), usize::MAX / 2);
    }

    #[test]
    fn test_retain_long_chunk() {
        let mut state = StreamState::<f64>::new(3);
        state.retain(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(state.history(), &[3.0, 4.0, 5.0]);
    }

    #[test]
    fn test_retain_short_chunk_shifts_history() {
        let mut state = StreamState::<f64>::new(3);
        state.retain(&[1.0, 2.0, 3.0]);
        state.retain(&[4.0]);
        assert_eq!(state.history(), &[2.0, 3.0, 4.0]);
        state.retain(&[]);
        assert_eq!(state.history(), &[2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_reset() {
        let mut state = StreamState::<f64>::new(2);
        state.retain(&[7.0, 8.0]);
        state.phase = 1;
        state.input_offset = 3;
        state.reset();
        assert_eq!(state, StreamState::new(2));
    }
}
