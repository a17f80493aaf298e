//! Flat-buffer entry points.
//!
//! Each function takes row-major `&[f64]` operands plus explicit dimensions
//! and returns a newly allocated row-major buffer, matching the shape of the
//! C ABI one level up.

use crate::config::DivideConfig;
use crate::error::Result;
use crate::matrix::MatrixView;
use crate::ops;

pub fn add(a: &[f64], b: &[f64], rows: usize, cols: usize) -> Result<Vec<f64>> {
    let (a, b) = (MatrixView::new(a, rows, cols)?, MatrixView::new(b, rows, cols)?);
    ops::add(a, b).map(|m| m.into_vec())
}

pub fn subtract(a: &[f64], b: &[f64], rows: usize, cols: usize) -> Result<Vec<f64>> {
    let (a, b) = (MatrixView::new(a, rows, cols)?, MatrixView::new(b, rows, cols)?);
    ops::subtract(a, b).map(|m| m.into_vec())
}

pub fn elementwise_multiply(a: &[f64], b: &[f64], rows: usize, cols: usize) -> Result<Vec<f64>> {
    let (a, b) = (MatrixView::new(a, rows, cols)?, MatrixView::new(b, rows, cols)?);
    ops::elementwise_multiply(a, b).map(|m| m.into_vec())
}

pub fn matrix_product(
    a: &[f64],
    b: &[f64],
    rows_a: usize,
    cols_a: usize,
    rows_b: usize,
    cols_b: usize,
) -> Result<Vec<f64>> {
    let a = MatrixView::new(a, rows_a, cols_a)?;
    let b = MatrixView::new(b, rows_b, cols_b)?;
    ops::matrix_product(a, b).map(|m| m.into_vec())
}

pub fn divide(
    a: &[f64],
    b: &[f64],
    rows_a: usize,
    cols_a: usize,
    rows_b: usize,
    cols_b: usize,
) -> Result<Vec<f64>> {
    divide_with(a, b, rows_a, cols_a, rows_b, cols_b, &DivideConfig::default())
}

pub fn divide_with(
    a: &[f64],
    b: &[f64],
    rows_a: usize,
    cols_a: usize,
    rows_b: usize,
    cols_b: usize,
    config: &DivideConfig,
) -> Result<Vec<f64>> {
    let a = MatrixView::new(a, rows_a, cols_a)?;
    let b = MatrixView::new(b, rows_b, cols_b)?;
    ops::divide_with(a, b, config).map(|m| m.into_vec())
}

/// Like [`divide`], but collapses every failure into an empty buffer.
///
/// Kept for callers that expect the legacy signal; it cannot tell a shape
/// error from a singular divisor, nor from a legitimately empty result.
pub fn divide_or_empty(
    a: &[f64],
    b: &[f64],
    rows_a: usize,
    cols_a: usize,
    rows_b: usize,
    cols_b: usize,
) -> Vec<f64> {
    divide(a, b, rows_a, cols_a, rows_b, cols_b).unwrap_or_default()
}
