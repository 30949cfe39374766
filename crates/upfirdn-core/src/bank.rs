//! Resampler Bank - One resampler per channel
//!
//! Multi-channel signals need one [`Resampler`] per channel, since each
//! channel carries its own history. Channels may share a single filter or
//! each use their own; the rates are common to the whole bank.
//!
//! ```text
//! ch0 ─→ [Resampler h0] ─→ y0
//! ch1 ─→ [Resampler h1] ─→ y1
//!  ⋮            ⋮            ⋮
//! ```
//!
//! With the `parallel` feature, channels are processed on the rayon pool.
//!
//! ## Example
//!
//! ```rust
//! use upfirdn_core::bank::ResamplerBank;
//!
//! // Stereo, 2x upsampling, one shared filter
//! let mut bank = ResamplerBank::<f64>::new(2, 1, &[vec![1.0, 1.0]], 2).unwrap();
//! let out = bank.process(&[&[0.0, 1.0][..], &[2.0, 3.0][..]], false).unwrap();
//! assert_eq!(out[0], vec![0.0, 0.0, 1.0, 1.0]);
//! assert_eq!(out[1], vec![2.0, 2.0, 3.0, 3.0]);
//! ```

use crate::error::{ResampleError, Result};
use crate::resampler::Resampler;
use crate::sample::{Convolve, OutputOf, Sample};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A set of independent resamplers sharing up/down rates.
#[derive(Debug, Clone)]
pub struct ResamplerBank<S, C = S> {
    resamplers: Vec<Resampler<S, C>>,
}

impl<S, C> ResamplerBank<S, C>
where
    S: Convolve<C>,
    C: Sample,
{
    /// Create a bank of `channels` resamplers.
    ///
    /// `filters` must contain either one filter, shared by every channel,
    /// or exactly one filter per channel.
    pub fn new(
        up_rate: usize,
        down_rate: usize,
        filters: &[Vec<C>],
        channels: usize,
    ) -> Result<Self> {
        if channels == 0 {
            return Err(ResampleError::NoChannels);
        }
        if filters.len() != 1 && filters.len() != channels {
            return Err(ResampleError::FilterCountMismatch {
                channels,
                filters: filters.len(),
            });
        }

        let resamplers = (0..channels)
            .map(|ch| {
                let taps = if filters.len() == 1 { &filters[0] } else { &filters[ch] };
                Resampler::new(up_rate, down_rate, taps)
            })
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(channels, up_rate, down_rate, shared = filters.len() == 1, "created resampler bank");
        Ok(Self { resamplers })
    }

    /// Resample one block per channel.
    ///
    /// All channels must hold the same number of samples. When `drain` is
    /// set, each channel's filter tail is flushed and appended.
    pub fn process(&mut self, inputs: &[&[S]], drain: bool) -> Result<Vec<Vec<OutputOf<S, C>>>> {
        self.check_inputs(inputs)?;

        let run = |(resampler, input): (&mut Resampler<S, C>, &&[S])| -> Result<Vec<OutputOf<S, C>>> {
            let mut out = resampler.apply(input)?;
            if drain {
                out.extend(resampler.drain()?);
            }
            Ok(out)
        };

        #[cfg(feature = "parallel")]
        let outputs = self
            .resamplers
            .par_iter_mut()
            .zip(inputs.par_iter())
            .map(run)
            .collect();

        #[cfg(not(feature = "parallel"))]
        let outputs = self.resamplers.iter_mut().zip(inputs.iter()).map(run).collect();

        outputs
    }

    /// Output samples each channel produces for `in_len` more inputs.
    pub fn needed_out_counts(&self, in_len: usize) -> Vec<usize> {
        self.resamplers
            .iter()
            .map(|r| r.needed_out_count(in_len))
            .collect()
    }

    /// Reset every channel.
    pub fn reset(&mut self) {
        for r in &mut self.resamplers {
            r.reset();
        }
    }

    /// Number of channels.
    pub fn channels(&self) -> usize {
        self.resamplers.len()
    }

    /// Resampler for one channel.
    pub fn resampler(&self, channel: usize) -> Option<&Resampler<S, C>> {
        self.resamplers.get(channel)
    }

    fn check_inputs(&self, inputs: &[&[S]]) -> Result<()> {
        if inputs.len() != self.resamplers.len() {
            return Err(ResampleError::ChannelCountMismatch {
                expected: self.resamplers.len(),
                actual: inputs.len(),
            });
        }
        let expected = inputs[0].len();
        if let Some((channel, input)) = inputs
            .iter()
            .enumerate()
            .find(|(_, input)| input.len() != expected)
        {
            return Err(ResampleError::ChannelLengthMismatch {
                channel,
                expected,
                actual: input.len(),
            });
        }
        Ok(())
    }
}
