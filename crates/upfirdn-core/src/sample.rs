//! Sample and coefficient types
//!
//! Signals and filter taps may each be real or complex. The resampler is
//! generic over both, and the output type is whatever the product of a
//! signal sample and a tap produces:
//!
//! | Signal | Taps | Output |
//! |---|---|---|
//! | `f64` | `f64` | `f64` |
//! | `f64` | `Complex64` | `Complex64` |
//! | `Complex64` | `f64` | `Complex64` |
//! | `Complex64` | `Complex64` | `Complex64` |
//!
//! The same holds for `f32` / `Complex32`.

use num_traits::Zero;
use std::fmt::Debug;
use std::ops::{AddAssign, Mul};

pub use num_complex::{Complex32, Complex64};

/// A value that can flow through the resampler: signal samples, filter
/// taps and output samples all satisfy this.
pub trait Sample: Copy + Zero + AddAssign + Debug + Send + Sync + 'static {}

impl<T> Sample for T where T: Copy + Zero + AddAssign + Debug + Send + Sync + 'static {}

/// Multiply a signal sample by a filter tap of type `C`.
pub trait Convolve<C: Sample>: Sample {
    /// Product type, used for accumulators and output samples.
    type Output: Sample;

    fn weighted(self, tap: C) -> <Self as Convolve<C>>::Output;
}

impl<S, C> Convolve<C> for S
where
    S: Sample + Mul<C>,
    C: Sample,
    <S as Mul<C>>::Output: Sample,
{
    type Output = <S as Mul<C>>::Output;

    #[inline]
    fn weighted(self, tap: C) -> <Self as Convolve<C>>::Output {
        self * tap
    }
}

/// Output sample type of a resampler with signal `S` and taps `C`.
pub type OutputOf<S, C> = <S as Convolve<C>>::Output;

/// Dot product of a window of samples with a (reversed) sub-filter.
#[inline]
pub(crate) fn dot<S, C>(samples: &[S], taps: &[C]) -> OutputOf<S, C>
where
    S: Convolve<C>,
    C: Sample,
{
    let mut acc = <OutputOf<S, C> as Zero>::zero();
    for (&s, &t) in samples.iter().zip(taps) {
        acc += s.weighted(t);
    }
    acc
}
