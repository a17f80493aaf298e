use std::cell::RefCell;
use std::ffi::CString;

use dm_core::MatrixError;
use log::debug;
use thiserror::Error;

use crate::types::DMStatus;

/// Failures reported across the C boundary.
///
/// Pointer and parameter problems are caught here before `dm-core` is
/// reached; everything else is a `MatrixError` passed through unchanged.
#[derive(Error, Debug)]
pub enum FfiError {
    #[error("{name} is null but has length {len}")]
    NullInput { name: &'static str, len: usize },
    #[error("out is null")]
    NullOutput,
    #[error("invalid singular_tolerance: {0}")]
    InvalidTolerance(f64),
    #[error(transparent)]
    Matrix(#[from] MatrixError),
    #[error("internal panic")]
    Panic,
}

impl FfiError {
    pub fn status(&self) -> DMStatus {
        match self {
            FfiError::NullInput { .. } | FfiError::NullOutput | FfiError::InvalidTolerance(_) => {
                DMStatus::ErrorInvalidArgument
            }
            FfiError::Matrix(e) => DMStatus::from(e),
            FfiError::Panic => DMStatus::ErrorInternal,
        }
    }
}

thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

/// Store `err` for later retrieval via `dm_last_error` and return the
/// status code the caller should see.
pub fn record(err: FfiError) -> DMStatus {
    debug!("dm-ffi call failed: {err}");
    let status = err.status();
    LAST_ERROR.with(|slot| {
        *slot.borrow_mut() = CString::new(err.to_string()).ok();
    });
    status
}

/// Take the last error message, leaving `None` in its place.
pub fn take_last_error() -> Option<CString> {
    LAST_ERROR.with(|slot| slot.borrow_mut().take())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(FfiError::NullOutput.status(), DMStatus::ErrorInvalidArgument);
        assert_eq!(
            FfiError::InvalidTolerance(-1.0).status(),
            DMStatus::ErrorInvalidArgument
        );
        assert_eq!(FfiError::Panic.status(), DMStatus::ErrorInternal);

        let shape = FfiError::from(MatrixError::NotSquare { rows: 2, cols: 3 });
        assert_eq!(shape.status(), DMStatus::ErrorShape);
        let singular = FfiError::from(MatrixError::Singular { determinant: 0.0 });
        assert_eq!(singular.status(), DMStatus::ErrorSingular);
    }

    #[test]
    fn test_record_and_take() {
        let status = record(FfiError::NullInput { name: "b", len: 6 });
        assert_eq!(status, DMStatus::ErrorInvalidArgument);

        let msg = take_last_error().unwrap();
        assert_eq!(msg.to_str().unwrap(), "b is null but has length 6");
        assert!(take_last_error().is_none());
    }

    #[test]
    fn test_matrix_error_message_is_transparent() {
        record(FfiError::from(MatrixError::NotSquare { rows: 2, cols: 3 }));
        let msg = take_last_error().unwrap();
        assert_eq!(msg.to_str().unwrap(), "divisor must be square, got 2x3");
    }
}
