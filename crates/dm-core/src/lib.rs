//! `dm-core` - Dense row-major `f64` matrix arithmetic.
//!
//! This crate provides:
//! - `MatrixView` (borrowed operand) and `Matrix` (owned result) types
//! - Elementwise add, subtract and Hadamard product
//! - Matrix product and division by an inverse (`A * B^-1`)
//! - LU-based determinant and inverse, backed by nalgebra
//! - A flat-buffer API mirroring the C ABI in `dm-ffi`

pub mod config;
pub mod error;
pub mod flat;
pub mod matrix;
pub mod ops;
pub mod shape;

// Re-export primary types at the crate root for convenience.
pub use config::DivideConfig;
pub use error::{ErrorKind, MatrixError, Result};
pub use matrix::{Matrix, MatrixView};
pub use ops::{
    add, determinant, divide, divide_with, elementwise_multiply, inverse, inverse_with,
    matrix_product, subtract,
};
pub use shape::Shape;
