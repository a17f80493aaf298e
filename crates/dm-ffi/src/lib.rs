mod error;
mod types;

pub use error::*;
pub use types::*;

use std::ffi::CString;
use std::os::raw::c_char;
use std::panic::UnwindSafe;

use dm_core::{flat, DivideConfig};
use log::warn;

/// Execute a closure, converting both its error and any panic into a
/// recorded `DMStatus`.
fn catch_panic<F: FnOnce() -> Result<(), FfiError> + UnwindSafe>(f: F) -> DMStatus {
    match std::panic::catch_unwind(f) {
        Ok(Ok(())) => DMStatus::Ok,
        Ok(Err(e)) => error::record(e),
        Err(_) => {
            warn!("panic caught at FFI boundary");
            error::record(FfiError::Panic)
        }
    }
}

/// Borrow a caller-owned input buffer for the duration of a call.
///
/// A null pointer is only accepted together with a zero length.
unsafe fn input_slice<'a>(
    ptr: *const f64,
    len: usize,
    name: &'static str,
) -> Result<&'a [f64], FfiError> {
    if ptr.is_null() {
        if len == 0 {
            return Ok(&[]);
        }
        return Err(FfiError::NullInput { name, len });
    }
    Ok(std::slice::from_raw_parts(ptr, len))
}

/// Shared body of every binary operation: validate the pointers, run `op`
/// on the borrowed operands and publish the result into `*out`.
unsafe fn binary_op<F>(
    a: *const f64,
    a_len: usize,
    b: *const f64,
    b_len: usize,
    out: *mut DMBuffer,
    op: F,
) -> DMStatus
where
    F: FnOnce(&[f64], &[f64]) -> Result<Vec<f64>, FfiError> + UnwindSafe,
{
    catch_panic(|| {
        if out.is_null() {
            return Err(FfiError::NullOutput);
        }
        unsafe { out.write(DMBuffer::empty()) };

        let a = unsafe { input_slice(a, a_len, "a") }?;
        let b = unsafe { input_slice(b, b_len, "b") }?;
        let data = op(a, b)?;
        unsafe { out.write(DMBuffer::from_vec(data)) };
        Ok(())
    })
}

/// Elementwise sum of two `rows x cols` matrices.
///
/// On success writes a `rows * cols` buffer into `*out`; the caller must
/// release it with `dm_free_buffer`.
#[no_mangle]
pub unsafe extern "C" fn dm_add(
    a: *const f64,
    a_len: usize,
    b: *const f64,
    b_len: usize,
    rows: usize,
    cols: usize,
    out: *mut DMBuffer,
) -> DMStatus {
    binary_op(a, a_len, b, b_len, out, move |a, b| {
        Ok(flat::add(a, b, rows, cols)?)
    })
}

/// Elementwise difference `a - b` of two `rows x cols` matrices.
#[no_mangle]
pub unsafe extern "C" fn dm_subtract(
    a: *const f64,
    a_len: usize,
    b: *const f64,
    b_len: usize,
    rows: usize,
    cols: usize,
    out: *mut DMBuffer,
) -> DMStatus {
    binary_op(a, a_len, b, b_len, out, move |a, b| {
        Ok(flat::subtract(a, b, rows, cols)?)
    })
}

/// Elementwise (Hadamard) product of two `rows x cols` matrices.
#[no_mangle]
pub unsafe extern "C" fn dm_elementwise_multiply(
    a: *const f64,
    a_len: usize,
    b: *const f64,
    b_len: usize,
    rows: usize,
    cols: usize,
    out: *mut DMBuffer,
) -> DMStatus {
    binary_op(a, a_len, b, b_len, out, move |a, b| {
        Ok(flat::elementwise_multiply(a, b, rows, cols)?)
    })
}

/// Matrix product `a @ b`. Requires `cols_a == rows_b`; the result is
/// `rows_a x cols_b`.
#[no_mangle]
#[allow(clippy::too_many_arguments)]
pub unsafe extern "C" fn dm_matrix_product(
    a: *const f64,
    a_len: usize,
    b: *const f64,
    b_len: usize,
    rows_a: usize,
    cols_a: usize,
    rows_b: usize,
    cols_b: usize,
    out: *mut DMBuffer,
) -> DMStatus {
    binary_op(a, a_len, b, b_len, out, move |a, b| {
        Ok(flat::matrix_product(a, b, rows_a, cols_a, rows_b, cols_b)?)
    })
}

/// Matrix division `a * b^-1`, rejecting only an exactly zero determinant.
///
/// Returns `DMStatus::ErrorShape` if `b` is not square or `cols_a != rows_b`,
/// and `DMStatus::ErrorSingular` if `b` cannot be inverted. On any failure
/// `*out` holds the empty buffer.
#[no_mangle]
#[allow(clippy::too_many_arguments)]
pub unsafe extern "C" fn dm_divide(
    a: *const f64,
    a_len: usize,
    b: *const f64,
    b_len: usize,
    rows_a: usize,
    cols_a: usize,
    rows_b: usize,
    cols_b: usize,
    out: *mut DMBuffer,
) -> DMStatus {
    dm_divide_with_params(
        a,
        a_len,
        b,
        b_len,
        rows_a,
        cols_a,
        rows_b,
        cols_b,
        DMDivideParams::default(),
        out,
    )
}

/// Matrix division `a * b^-1` with an explicit singularity tolerance.
#[no_mangle]
#[allow(clippy::too_many_arguments)]
pub unsafe extern "C" fn dm_divide_with_params(
    a: *const f64,
    a_len: usize,
    b: *const f64,
    b_len: usize,
    rows_a: usize,
    cols_a: usize,
    rows_b: usize,
    cols_b: usize,
    params: DMDivideParams,
    out: *mut DMBuffer,
) -> DMStatus {
    let tolerance = params.singular_tolerance;
    binary_op(a, a_len, b, b_len, out, move |a, b| {
        let config = DivideConfig::with_singular_tolerance(tolerance)
            .ok_or(FfiError::InvalidTolerance(tolerance))?;
        Ok(flat::divide_with(a, b, rows_a, cols_a, rows_b, cols_b, &config)?)
    })
}

/// Default division parameters (exact zero singularity test).
#[no_mangle]
pub extern "C" fn dm_divide_params_default() -> DMDivideParams {
    DMDivideParams::default()
}

/// Free a buffer previously returned through an `out` parameter.
///
/// Passing the empty buffer is a no-op.
#[no_mangle]
pub unsafe extern "C" fn dm_free_buffer(buf: DMBuffer) {
    drop(buf.into_vec());
}

/// Retrieve the last error message.
///
/// Returns a pointer to a C string describing the most recent error, or
/// null if no error has occurred. The caller must free the returned string
/// with `dm_free_string`.
#[no_mangle]
pub extern "C" fn dm_last_error() -> *mut c_char {
    match error::take_last_error() {
        Some(e) => e.into_raw(),
        None => std::ptr::null_mut(),
    }
}

/// Free a string previously returned by `dm_last_error`.
#[no_mangle]
pub unsafe extern "C" fn dm_free_string(s: *mut c_char) {
    if !s.is_null() {
        drop(CString::from_raw(s));
    }
}
