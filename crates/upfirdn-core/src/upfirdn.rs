//! One-shot upfirdn
//!
//! Convenience wrappers that build a throwaway [`Resampler`], pad the input
//! so the filter tail is emitted, and return an owned output buffer.
//!
//! ## Example
//!
//! ```rust
//! use upfirdn_core::upfirdn::{upfirdn, run_upfirdn, Flush};
//!
//! // Linear interpolation by 2
//! let y = upfirdn(&[1.0_f64, 1.0, 1.0], &[0.5_f64, 1.0, 0.5], 2, 1).unwrap();
//! assert_eq!(y, vec![0.5, 1.0, 1.0, 1.0, 1.0, 1.0, 0.5, 0.0]);
//!
//! // Decimation by 3 without flushing
//! let x: Vec<f64> = (0..10).map(f64::from).collect();
//! let y = run_upfirdn(&x, &[1.0_f64], 1, 3, Flush::None).unwrap();
//! assert_eq!(y, vec![0.0, 3.0, 6.0, 9.0]);
//! ```

use crate::error::Result;
use crate::resampler::Resampler;
use crate::sample::{Convolve, OutputOf, Sample};
use serde::{Deserialize, Serialize};

/// Zero padding appended to the input before a one-shot run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Flush {
    /// No padding; the filter tail stays inside the resampler.
    None,
    /// Pad `taps_per_phase - 1` zeros, exactly enough to emit every
    /// output the filter tail contributes to.
    #[default]
    Drain,
    /// Pad as many zeros as the filter has taps.
    FilterLength,
}

impl Flush {
    /// Number of zeros to append for a filter of `num_taps` taps
    /// upsampled by `up_rate`.
    pub fn padding(self, num_taps: usize, up_rate: usize) -> usize {
        match self {
            Flush::None => 0,
            Flush::Drain => {
                let up = up_rate.max(1);
                ((num_taps + up - 1) / up).saturating_sub(1)
            }
            Flush::FilterLength => num_taps,
        }
    }
}

/// Upsample by `up_rate`, filter with `filter`, downsample by `down_rate`.
///
/// The input is padded according to `flush`; the output holds exactly
/// `needed_out_count(input.len() + padding)` samples.
pub fn run_upfirdn<S, C>(
    input: &[S],
    filter: &[C],
    up_rate: usize,
    down_rate: usize,
    flush: Flush,
) -> Result<Vec<OutputOf<S, C>>>
where
    S: Convolve<C>,
    C: Sample,
{
    let mut resampler = Resampler::new(up_rate, down_rate, filter)?;
    let padding = flush.padding(filter.len(), up_rate);

    let mut padded = Vec::with_capacity(input.len() + padding);
    padded.extend_from_slice(input);
    padded.resize(input.len() + padding, S::zero());

    tracing::debug!(
        in_len = input.len(),
        padding,
        out_len = resampler.needed_out_count(padded.len()),
        "one-shot upfirdn"
    );
    resampler.apply(&padded)
}

/// [`run_upfirdn`] with [`Flush::Drain`]: every non-zero output sample.
pub fn upfirdn<S, C>(
    input: &[S],
    filter: &[C],
    up_rate: usize,
    down_rate: usize,
) -> Result<Vec<OutputOf<S, C>>>
where
    S: Convolve<C>,
    C: Sample,
{
    run_upfirdn(input, filter, up_rate, down_rate, Flush::Drain)
}

/// Filter and decimate by 2, padding with `filter.len()` zeros.
pub fn decimate_by_two<S, C>(input: &[S], filter: &[C]) -> Result<Vec<OutputOf<S, C>>>
where
    S: Convolve<C>,
    C: Sample,
{
    run_upfirdn(input, filter, 1, 2, Flush::FilterLength)
}
