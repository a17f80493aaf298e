use dm_core::{ErrorKind, MatrixError};

/// Status codes returned by all FFI functions.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DMStatus {
    Ok = 0,
    ErrorInvalidArgument = 1,
    /// Operand dimensions do not fit the operation.
    ErrorShape = 2,
    /// The divisor cannot be inverted.
    ErrorSingular = 3,
    ErrorInternal = 4,
}

impl From<&MatrixError> for DMStatus {
    fn from(e: &MatrixError) -> Self {
        match e.kind() {
            ErrorKind::Shape => DMStatus::ErrorShape,
            ErrorKind::Singular => DMStatus::ErrorSingular,
        }
    }
}

/// A row-major result buffer owned by the caller.
///
/// Release with `dm_free_buffer`. A failed call leaves the empty buffer
/// (`data == NULL`, `len == 0`) in the output slot.
#[repr(C)]
#[derive(Debug)]
pub struct DMBuffer {
    pub data: *mut f64,
    pub len: usize,
}

impl DMBuffer {
    pub fn empty() -> Self {
        Self {
            data: std::ptr::null_mut(),
            len: 0,
        }
    }

    /// Hand a vector's allocation over to the caller.
    pub fn from_vec(v: Vec<f64>) -> Self {
        if v.is_empty() {
            return Self::empty();
        }
        let boxed = v.into_boxed_slice();
        let len = boxed.len();
        Self {
            data: Box::into_raw(boxed) as *mut f64,
            len,
        }
    }

    /// Reclaim the allocation made by `from_vec`.
    ///
    /// # Safety
    /// `self` must have come from `from_vec` and not been released yet.
    pub unsafe fn into_vec(self) -> Vec<f64> {
        if self.data.is_null() {
            return Vec::new();
        }
        let slice = std::ptr::slice_from_raw_parts_mut(self.data, self.len);
        Box::from_raw(slice).into_vec()
    }
}

/// Parameters controlling matrix division.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct DMDivideParams {
    /// Divisors with `|det| <= singular_tolerance` are rejected as singular.
    /// Must be finite and non-negative.
    pub singular_tolerance: f64,
}

impl Default for DMDivideParams {
    fn default() -> Self {
        Self {
            singular_tolerance: dm_core::DivideConfig::default().singular_tolerance,
        }
    }
}
