//! # Upfirdn FFI - C/C++ Bindings for the Polyphase Resampler
//!
//! This crate provides a C-compatible API for the `upfirdn-core` resampler,
//! restricted to real `double` samples and taps.
//!
//! ## Features
//!
//! - **Streaming Resampler**: opaque handle keeping phase and filter history
//!   across calls
//! - **One-shot Resampling**: whole-signal upfirdn into a library-owned buffer
//! - **Half-band Decimation**: filter and decimate by 2 with full flush
//!
//! ## Building
//!
//! ```bash
//! cargo build --release -p upfirdn-ffi
//! ```
//!
//! This generates:
//! - `target/release/libupfirdn.so` (Linux shared library)
//! - `target/release/libupfirdn.a` (Linux static library)
//!
//! ## Usage from C
//!
//! ```c
//! #include <upfirdn.h>
//!
//! int main() {
//!     double h[] = {0.25, 0.5, 0.75, 1.0, 0.75, 0.5, 0.25};
//!     upfirdn_resampler_t* r = upfirdn_resampler_new(4, 3, h, 7);
//!
//!     double x[10] = {1, 2, 3, 4, 5, 6, 7, 8, 9, 10};
//!     size_t n = upfirdn_resampler_needed_out_count(r, 10);
//!     double* y = malloc(n * sizeof(double));
//!
//!     size_t written;
//!     upfirdn_resampler_apply(r, x, 10, y, n, &written);
//!
//!     upfirdn_resampler_free(r);
//!     free(y);
//! }
//! ```

use std::ffi::c_char;
use std::ptr;
use std::slice;

use upfirdn_core::{decimate_by_two, upfirdn, ResampleError, Resampler};

// =============================================================================
// Types
// =============================================================================

/// Error codes returned by upfirdn functions
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpfirdnError {
    /// Success (no error)
    Ok = 0,
    /// Null pointer passed
    NullPointer = 1,
    /// Invalid rate or filter
    InvalidParameter = 2,
    /// Output buffer smaller than the needed output count
    InsufficientOutput = 3,
}

impl From<&ResampleError> for UpfirdnError {
    fn from(err: &ResampleError) -> Self {
        if err.is_capacity_error() {
            UpfirdnError::InsufficientOutput
        } else {
            UpfirdnError::InvalidParameter
        }
    }
}

/// Opaque streaming resampler handle
pub struct UpfirdnResampler {
    inner: Resampler<f64>,
}

/// Converts C rates, rejecting anything not strictly positive.
fn positive_rates(up: i32, down: i32) -> Option<(usize, usize)> {
    if up <= 0 || down <= 0 {
        tracing::warn!(up, down, "rates must be positive");
        return None;
    }
    Some((up as usize, down as usize))
}

/// Hands an owned output vector to C.
///
/// # Safety
/// `out_len` must be a valid, non-null pointer
unsafe fn into_raw_buffer(output: Vec<f64>, out_len: *mut usize) -> *mut f64 {
    let boxed = output.into_boxed_slice();
    *out_len = boxed.len();
    Box::into_raw(boxed) as *mut f64
}

// =============================================================================
// Version
// =============================================================================

/// Get library version string
///
/// Returns a null-terminated string like "0.2.1"
#[no_mangle]
pub extern "C" fn upfirdn_version() -> *const c_char {
    // Static string with null terminator
    b"0.2.1\0".as_ptr() as *const c_char
}

// =============================================================================
// Streaming Resampler
// =============================================================================

/// Create a streaming resampler
///
/// Returns null if either rate is not positive or the filter is null or
/// empty. The taps are copied.
///
/// # Safety
/// `taps` must point to at least `len` elements
#[no_mangle]
pub unsafe extern "C" fn upfirdn_resampler_new(
    up: i32,
    down: i32,
    taps: *const f64,
    len: usize,
) -> *mut UpfirdnResampler {
    let Some((up, down)) = positive_rates(up, down) else {
        return ptr::null_mut();
    };
    if taps.is_null() || len == 0 {
        return ptr::null_mut();
    }

    let taps = slice::from_raw_parts(taps, len);
    match Resampler::new(up, down, taps) {
        Ok(inner) => Box::into_raw(Box::new(UpfirdnResampler { inner })),
        Err(_) => ptr::null_mut(),
    }
}

/// Free a resampler
///
/// # Safety
/// `resampler` must be a valid pointer returned by `upfirdn_resampler_new`
#[no_mangle]
pub unsafe extern "C" fn upfirdn_resampler_free(resampler: *mut UpfirdnResampler) {
    if !resampler.is_null() {
        drop(Box::from_raw(resampler));
    }
}

/// Number of output samples the next apply over `in_len` inputs will write
///
/// Returns 0 for a null handle.
///
/// # Safety
/// `resampler` must be valid or null
#[no_mangle]
pub unsafe extern "C" fn upfirdn_resampler_needed_out_count(
    resampler: *const UpfirdnResampler,
    in_len: usize,
) -> usize {
    if resampler.is_null() {
        return 0;
    }
    (*resampler).inner.needed_out_count(in_len)
}

/// Resample a chunk of input
///
/// `out_capacity` must be at least `upfirdn_resampler_needed_out_count`;
/// otherwise `InsufficientOutput` is returned and the resampler is left
/// unchanged. The number of samples written is stored in `written`.
///
/// # Safety
/// - `resampler` must be valid
/// - `input` must point to at least `in_len` elements (may be null if `in_len` is 0)
/// - `output` must point to at least `out_capacity` elements
/// - `written` must be a valid pointer
#[no_mangle]
pub unsafe extern "C" fn upfirdn_resampler_apply(
    resampler: *mut UpfirdnResampler,
    input: *const f64,
    in_len: usize,
    output: *mut f64,
    out_capacity: usize,
    written: *mut usize,
) -> UpfirdnError {
    if resampler.is_null() || written.is_null() {
        return UpfirdnError::NullPointer;
    }
    if (input.is_null() && in_len > 0) || (output.is_null() && out_capacity > 0) {
        return UpfirdnError::NullPointer;
    }

    let input: &[f64] = if in_len == 0 {
        &[]
    } else {
        slice::from_raw_parts(input, in_len)
    };
    let output: &mut [f64] = if out_capacity == 0 {
        &mut []
    } else {
        slice::from_raw_parts_mut(output, out_capacity)
    };

    match (*resampler).inner.apply_into(input, output) {
        Ok(n) => {
            *written = n;
            UpfirdnError::Ok
        }
        Err(e) => {
            *written = 0;
            UpfirdnError::from(&e)
        }
    }
}

/// Reset phase and history to the freshly constructed state
///
/// # Safety
/// `resampler` must be valid
#[no_mangle]
pub unsafe extern "C" fn upfirdn_resampler_reset(resampler: *mut UpfirdnResampler) -> UpfirdnError {
    if resampler.is_null() {
        return UpfirdnError::NullPointer;
    }
    (*resampler).inner.reset();
    UpfirdnError::Ok
}

/// Taps in each polyphase sub-filter
///
/// # Safety
/// `resampler` must be valid or null
#[no_mangle]
pub unsafe extern "C" fn upfirdn_resampler_taps_per_phase(
    resampler: *const UpfirdnResampler,
) -> usize {
    if resampler.is_null() {
        return 0;
    }
    (*resampler).inner.taps_per_phase()
}

// =============================================================================
// One-shot Resampling
// =============================================================================

/// Upsample, filter and downsample a whole signal
///
/// The filter tail is flushed. Returns a buffer owned by the library, with
/// its length stored in `out_len`; release it with `upfirdn_buffer_free`.
/// Returns null on invalid parameters.
///
/// # Safety
/// - `x` must point to at least `x_len` elements (may be null if `x_len` is 0)
/// - `h` must point to at least `h_len` elements
/// - `out_len` must be a valid pointer
#[no_mangle]
pub unsafe extern "C" fn upfirdn_run(
    up: i32,
    down: i32,
    x: *const f64,
    x_len: usize,
    h: *const f64,
    h_len: usize,
    out_len: *mut usize,
) -> *mut f64 {
    if out_len.is_null() || h.is_null() || (x.is_null() && x_len > 0) {
        return ptr::null_mut();
    }
    *out_len = 0;
    let Some((up, down)) = positive_rates(up, down) else {
        return ptr::null_mut();
    };

    let x: &[f64] = if x_len == 0 { &[] } else { slice::from_raw_parts(x, x_len) };
    let h = slice::from_raw_parts(h, h_len);

    match upfirdn(x, h, up, down) {
        Ok(y) => into_raw_buffer(y, out_len),
        Err(_) => ptr::null_mut(),
    }
}

/// Filter with `h` and decimate by 2, padding with `h_len` zeros
///
/// Buffer ownership follows `upfirdn_run`.
///
/// # Safety
/// - `x` must point to at least `x_len` elements (may be null if `x_len` is 0)
/// - `h` must point to at least `h_len` elements
/// - `out_len` must be a valid pointer
#[no_mangle]
pub unsafe extern "C" fn upfirdn_decimate_by_two(
    x: *const f64,
    x_len: usize,
    h: *const f64,
    h_len: usize,
    out_len: *mut usize,
) -> *mut f64 {
    if out_len.is_null() || h.is_null() || (x.is_null() && x_len > 0) {
        return ptr::null_mut();
    }
    *out_len = 0;

    let x: &[f64] = if x_len == 0 { &[] } else { slice::from_raw_parts(x, x_len) };
    let h = slice::from_raw_parts(h, h_len);

    match decimate_by_two(x, h) {
        Ok(y) => into_raw_buffer(y, out_len),
        Err(_) => ptr::null_mut(),
    }
}

/// Free a buffer returned by `upfirdn_run` or `upfirdn_decimate_by_two`
///
/// # Safety
/// `buffer` must come from one of those functions, with `len` the length
/// they reported
#[no_mangle]
pub unsafe extern "C" fn upfirdn_buffer_free(buffer: *mut f64, len: usize) {
    if !buffer.is_null() {
        drop(Box::from_raw(ptr::slice_from_raw_parts_mut(buffer, len)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::ffi::CStr;

    const TRIANGLE: [f64; 7] = [0.25, 0.5, 0.75, 1.0, 0.75, 0.5, 0.25];

    #[test]
    fn test_version() {
        let version = unsafe { CStr::from_ptr(upfirdn_version()) };
        assert_eq!(version.to_str().unwrap(), "0.2.1");
    }

    #[test]
    fn test_resampler_lifecycle() {
        unsafe {
            let r = upfirdn_resampler_new(4, 3, TRIANGLE.as_ptr(), TRIANGLE.len());
            assert!(!r.is_null());
            assert_eq!(upfirdn_resampler_taps_per_phase(r), 2);

            let x: Vec<f64> = (1..=10).map(f64::from).collect();
            let needed = upfirdn_resampler_needed_out_count(r, x.len());
            assert_eq!(needed, 14);

            let mut y = vec![0.0; needed];
            let mut written = 0;
            let status = upfirdn_resampler_apply(
                r,
                x.as_ptr(),
                x.len(),
                y.as_mut_ptr(),
                y.len(),
                &mut written,
            );
            assert_eq!(status, UpfirdnError::Ok);
            assert_eq!(written, 14);
            assert_relative_eq!(y[0], 0.25);
            assert_relative_eq!(y[13], 10.0);

            assert_eq!(upfirdn_resampler_reset(r), UpfirdnError::Ok);
            upfirdn_resampler_free(r);
        }
    }

    #[test]
    fn test_invalid_construction() {
        unsafe {
            assert!(upfirdn_resampler_new(0, 1, TRIANGLE.as_ptr(), 7).is_null());
            assert!(upfirdn_resampler_new(1, -2, TRIANGLE.as_ptr(), 7).is_null());
            assert!(upfirdn_resampler_new(1, 1, TRIANGLE.as_ptr(), 0).is_null());
            assert!(upfirdn_resampler_new(1, 1, ptr::null(), 7).is_null());
        }
    }

    #[test]
    fn test_insufficient_output() {
        unsafe {
            let r = upfirdn_resampler_new(3, 1, [1.0, 1.0, 1.0].as_ptr(), 3);
            let x = [1.0, 2.0, 3.0];
            let mut y = [0.0; 8];
            let mut written = 99;

            let status =
                upfirdn_resampler_apply(r, x.as_ptr(), 3, y.as_mut_ptr(), y.len(), &mut written);
            assert_eq!(status, UpfirdnError::InsufficientOutput);
            assert_eq!(written, 0);

            // State untouched: a full-size buffer still gets all 9 samples
            let mut y = [0.0; 9];
            let status =
                upfirdn_resampler_apply(r, x.as_ptr(), 3, y.as_mut_ptr(), y.len(), &mut written);
            assert_eq!(status, UpfirdnError::Ok);
            assert_eq!(y, [1.0, 1.0, 1.0, 2.0, 2.0, 2.0, 3.0, 3.0, 3.0]);

            upfirdn_resampler_free(r);
        }
    }

    #[test]
    fn test_null_pointers() {
        unsafe {
            let mut written = 0;
            assert_eq!(
                upfirdn_resampler_apply(ptr::null_mut(), ptr::null(), 0, ptr::null_mut(), 0, &mut written),
                UpfirdnError::NullPointer
            );
            assert_eq!(upfirdn_resampler_reset(ptr::null_mut()), UpfirdnError::NullPointer);
            assert_eq!(upfirdn_resampler_needed_out_count(ptr::null(), 10), 0);
            upfirdn_resampler_free(ptr::null_mut());
            upfirdn_buffer_free(ptr::null_mut(), 0);
        }
    }

    #[test]
    fn test_one_shot_run() {
        unsafe {
            let x: Vec<f64> = (1..=10).map(f64::from).collect();
            let mut len = 0;
            let y = upfirdn_run(4, 3, x.as_ptr(), x.len(), TRIANGLE.as_ptr(), TRIANGLE.len(), &mut len);
            assert!(!y.is_null());
            assert_eq!(len, 15);

            let out = slice::from_raw_parts(y, len);
            assert_relative_eq!(out[14], 2.5);
            upfirdn_buffer_free(y, len);

            assert!(upfirdn_run(-1, 3, x.as_ptr(), x.len(), TRIANGLE.as_ptr(), 7, &mut len).is_null());
            assert_eq!(len, 0);
        }
    }

    #[test]
    fn test_decimate_by_two() {
        unsafe {
            let x = [1.0, 2.0, 3.0, 4.0];
            let h = [1.0, 1.0];
            let mut len = 0;
            let y = upfirdn_decimate_by_two(x.as_ptr(), x.len(), h.as_ptr(), h.len(), &mut len);
            assert!(!y.is_null());
            assert_eq!(slice::from_raw_parts(y, len), &[1.0, 5.0, 4.0]);
            upfirdn_buffer_free(y, len);
        }
    }
}
