//! Polyphase Filter Decomposition
//!
//! Upsampling by L inserts L-1 zeros between input samples, so at any
//! output position only every L-th filter tap lines up with a non-zero
//! sample. Splitting the prototype filter into L sub-filters ("phases")
//! lets the resampler skip the zero products entirely.
//!
//! ```text
//! h = [h0 h1 h2 h3 h4 h5 h6],  L = 3
//!
//! phase 0: h0 h3 h6
//! phase 1: h1 h4 0     (zero padded)
//! phase 2: h2 h5 0
//! ```
//!
//! Each phase is stored reversed so it can be applied directly to a window
//! of input samples ordered oldest-first.

use crate::error::{ResampleError, Result};
use crate::sample::Sample;

/// Filter taps reshaped into `up_rate` reversed sub-filters.
#[derive(Debug, Clone, PartialEq)]
pub struct PolyphaseBank<C> {
    /// Sub-filters laid out contiguously, `taps_per_phase` each.
    coefs: Vec<C>,
    num_phases: usize,
    taps_per_phase: usize,
    /// Length of the prototype filter before padding.
    num_taps: usize,
}

impl<C: Sample> PolyphaseBank<C> {
    /// Decompose `taps` into `up_rate` phases.
    pub fn new(up_rate: usize, taps: &[C]) -> Result<Self> {
        if up_rate == 0 {
            return Err(ResampleError::InvalidUpRate(up_rate));
        }
        if taps.is_empty() {
            return Err(ResampleError::EmptyFilter);
        }

        let taps_per_phase = (taps.len() + up_rate - 1) / up_rate;
        let mut coefs = vec![C::zero(); taps_per_phase * up_rate];

        // Phase p, tap j is h[j * up + p]; store it flipped within the phase.
        for (i, &tap) in taps.iter().enumerate() {
            let phase = i % up_rate;
            let j = i / up_rate;
            coefs[phase * taps_per_phase + (taps_per_phase - 1 - j)] = tap;
        }

        Ok(Self {
            coefs,
            num_phases: up_rate,
            taps_per_phase,
            num_taps: taps.len(),
        })
    }

    /// Reversed sub-filter for `phase` (`0..num_phases`).
    #[inline]
    pub fn phase(&self, phase: usize) -> &[C] {
        let start = phase * self.taps_per_phase;
        &self.coefs[start..start + self.taps_per_phase]
    }

    /// Number of sub-filters (equals the upsampling factor).
    pub fn num_phases(&self) -> usize {
        self.num_phases
    }

    /// Taps in each sub-filter, `ceil(num_taps / up_rate)`.
    pub fn taps_per_phase(&self) -> usize {
        self.taps_per_phase
    }

    /// Length of the prototype filter.
    pub fn num_taps(&self) -> usize {
        self.num_taps
    }

    /// Rebuild the prototype filter, including the zero padding.
    pub fn prototype(&self) -> Vec<C> {
        let mut taps = vec![C::zero(); self.coefs.len()];
        for phase in 0..self.num_phases {
            for (k, &c) in self.phase(phase).iter().rev().enumerate() {
                taps[k * self.num_phases + phase] = c;
            }
        }
        taps
    }
}
