//! # Polyphase Upfirdn Resampling
//!
//! This crate implements rational sample-rate conversion by the classic
//! upsample / FIR filter / downsample ("upfirdn") chain, computed with a
//! polyphase decomposition so that no inserted zero is ever multiplied.
//!
//! ## Overview
//!
//! - **Resampler**: streaming `L/M` converter that keeps its phase and
//!   filter history across calls
//! - **One-shot helpers**: [`upfirdn`], [`run_upfirdn`] and
//!   [`decimate_by_two`] for whole signals
//! - **Resampler bank**: one resampler per channel, optionally run on rayon
//! - **Generic samples**: real or complex input with real or complex taps
//!   (`f32`, `f64`, `Complex32`, `Complex64`)
//!
//! ## Signal Flow
//!
//! ```text
//! x[n] → ↑L (insert L-1 zeros) → h[k] → ↓M (keep every M-th) → y[m]
//!
//! computed as
//!
//! x[n] → [phase t of h, reversed] · window → y[m]   t = (t + M) mod L
//! ```
//!
//! Output sample `y[m]` equals sample `m·M` of the full convolution of the
//! upsampled input with `h`; no group-delay compensation is applied.
//!
//! ## Example
//!
//! ```rust
//! use upfirdn_core::Resampler;
//!
//! // 4/3 conversion with a triangular interpolation filter
//! let h = [0.25, 0.5, 0.75, 1.0, 0.75, 0.5, 0.25];
//! let mut resampler = Resampler::<f64>::new(4, 3, &h).unwrap();
//!
//! let x: Vec<f64> = (1..=10).map(f64::from).collect();
//! assert_eq!(resampler.needed_out_count(x.len()), 14);
//!
//! let mut y = vec![0.0; resampler.needed_out_count(x.len())];
//! let written = resampler.apply_into(&x, &mut y).unwrap();
//! assert_eq!(written, 14);
//! ```

pub mod bank;
pub mod config;
pub mod error;
pub mod observe;
pub mod polyphase;
pub mod resampler;
pub mod sample;
pub mod state;
pub mod upfirdn;

// Re-exports for convenience
pub use bank::ResamplerBank;
pub use config::{ConfigError, ResamplerConfig, UpfirdnConfig};
pub use error::{ResampleError, Result};
pub use polyphase::PolyphaseBank;
pub use resampler::Resampler;
pub use sample::{Complex32, Complex64, Convolve, OutputOf, Sample};
pub use state::StreamState;
pub use upfirdn::{decimate_by_two, run_upfirdn, upfirdn, Flush};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::bank::ResamplerBank;
    pub use crate::error::{ResampleError, Result};
    pub use crate::resampler::Resampler;
    pub use crate::sample::{Complex32, Complex64};
    pub use crate::upfirdn::{decimate_by_two, run_upfirdn, upfirdn, Flush};
}
