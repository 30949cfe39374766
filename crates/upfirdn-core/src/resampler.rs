//! Polyphase Resampler - Upsample, FIR filter and downsample in one step
//!
//! Rational sample rate conversion by `up_rate / down_rate`. Conceptually
//! the input is zero-stuffed by `up_rate`, convolved with the filter, and
//! every `down_rate`-th sample is kept:
//!
//! ```text
//! x → [↑L] → [h] → [↓M] → y
//! ```
//!
//! The resampler never builds the zero-stuffed signal. For each output it
//! picks the polyphase sub-filter for the current phase and applies it to
//! the most recent raw input samples. State (phase, input offset and the
//! last `taps_per_phase - 1` samples) carries across calls, so feeding a
//! signal in arbitrary chunks gives the same output as feeding it at once.
//!
//! Output `y[k]` is sample `k * down_rate` of the full convolution; the
//! first output is aligned with `h[0] * x[0]`. No group-delay compensation
//! is applied.
//!
//! ## Example
//!
//! ```rust
//! use upfirdn_core::Resampler;
//!
//! // 3x upsampling with sample-and-hold taps
//! let mut resampler = Resampler::<f64>::new(3, 1, &[1.0, 1.0, 1.0]).unwrap();
//! assert_eq!(resampler.needed_out_count(3), 9);
//! let y = resampler.apply(&[1.0, 2.0, 3.0]).unwrap();
//! assert_eq!(y, vec![1.0, 1.0, 1.0, 2.0, 2.0, 2.0, 3.0, 3.0, 3.0]);
//! ```

use crate::error::{ResampleError, Result};
use crate::polyphase::PolyphaseBank;
use crate::sample::{dot, Convolve, OutputOf, Sample};
use crate::state::StreamState;
use num_traits::Zero;

/// Streaming polyphase upfirdn resampler.
///
/// `S` is the signal sample type and `C` the filter tap type; both may be
/// real or complex (see [`crate::sample`]).
#[derive(Debug, Clone)]
pub struct Resampler<S, C = S> {
    up_rate: usize,
    down_rate: usize,
    bank: PolyphaseBank<C>,
    state: StreamState<S>,
}

impl<S, C> Resampler<S, C>
where
    S: Convolve<C>,
    C: Sample,
{
    /// Create a resampler.
    ///
    /// - `up_rate`: upsampling factor L (> 0)
    /// - `down_rate`: downsampling factor M (> 0)
    /// - `taps`: FIR filter coefficients, at least one
    pub fn new(up_rate: usize, down_rate: usize, taps: &[C]) -> Result<Self> {
        if up_rate == 0 {
            return Err(ResampleError::InvalidUpRate(up_rate));
        }
        if down_rate == 0 {
            return Err(ResampleError::InvalidDownRate(down_rate));
        }
        let bank = PolyphaseBank::new(up_rate, taps)?;
        let state = StreamState::new(bank.taps_per_phase() - 1);

        tracing::debug!(
            up_rate,
            down_rate,
            num_taps = taps.len(),
            taps_per_phase = bank.taps_per_phase(),
            "created resampler"
        );

        Ok(Self {
            up_rate,
            down_rate,
            bank,
            state,
        })
    }

    /// Number of output samples the next `apply` over `in_len` samples
    /// will produce. Does not change state.
    pub fn needed_out_count(&self, in_len: usize) -> usize {
        self.state
            .needed_out_count(in_len, self.up_rate, self.down_rate)
    }

    /// Resample `input` into a caller-provided buffer.
    ///
    /// `output` must hold at least [`needed_out_count`](Self::needed_out_count)
    /// samples; a shorter buffer is rejected before any state changes.
    /// Returns the number of samples written.
    pub fn apply_into(&mut self, input: &[S], output: &mut [OutputOf<S, C>]) -> Result<usize> {
        let needed = self.needed_out_count(input.len());
        if output.len() < needed {
            tracing::warn!(needed, available = output.len(), "output buffer too small");
            return Err(ResampleError::InsufficientOutput {
                needed,
                available: output.len(),
            });
        }

        let taps = self.bank.taps_per_phase();
        let history_len = taps - 1;

        // Index of the newest input sample in the filter window.
        let mut x = self.state.input_offset;
        let mut written = 0;

        while x < input.len() {
            let coefs = self.bank.phase(self.state.phase);

            let acc = if x + 1 < taps {
                // Window starts before this chunk; draw from history.
                let from_history = taps - 1 - x;
                let head = dot(
                    &self.state.history[history_len - from_history..],
                    &coefs[..from_history],
                );
                let mut acc = dot(&input[..=x], &coefs[from_history..]);
                acc += head;
                acc
            } else {
                dot(&input[x + 1 - taps..=x], coefs)
            };

            output[written] = acc;
            written += 1;
            x += self.state.advance(self.up_rate, self.down_rate);
        }

        self.state.input_offset = x - input.len();
        self.state.retain(input);

        tracing::trace!(in_len = input.len(), out_len = written, phase = self.state.phase, "apply");
        Ok(written)
    }

    /// Resample `input`, returning a newly allocated, exactly sized output.
    pub fn apply(&mut self, input: &[S]) -> Result<Vec<OutputOf<S, C>>> {
        let mut output = vec![<OutputOf<S, C> as Zero>::zero(); self.needed_out_count(input.len())];
        let written = self.apply_into(input, &mut output)?;
        output.truncate(written);
        Ok(output)
    }

    /// Feed `taps_per_phase - 1` zeros to push the filter tail out.
    pub fn drain(&mut self) -> Result<Vec<OutputOf<S, C>>> {
        let zeros = vec![S::zero(); self.flush_len()];
        self.apply(&zeros)
    }

    /// Clear history and phase, as if freshly constructed.
    pub fn reset(&mut self) {
        self.state.reset();
    }

    /// Upsampling factor L.
    pub fn up_rate(&self) -> usize {
        self.up_rate
    }

    /// Downsampling factor M.
    pub fn down_rate(&self) -> usize {
        self.down_rate
    }

    /// Conversion ratio L / M.
    pub fn ratio(&self) -> f64 {
        self.up_rate as f64 / self.down_rate as f64
    }

    /// Taps per polyphase sub-filter.
    pub fn taps_per_phase(&self) -> usize {
        self.bank.taps_per_phase()
    }

    /// Length of the prototype filter.
    pub fn num_taps(&self) -> usize {
        self.bank.num_taps()
    }

    /// Zeros needed after the last input to flush the filter tail.
    pub fn flush_len(&self) -> usize {
        self.bank.taps_per_phase() - 1
    }

    /// Polyphase decomposition of the filter.
    pub fn bank(&self) -> &PolyphaseBank<C> {
        &self.bank
    }

    /// Current stream state.
    pub fn state(&self) -> &StreamState<S> {
        &self.state
    }
}
