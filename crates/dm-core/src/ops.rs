//! The dense matrix operations.
//!
//! Every operation borrows its operands and allocates exactly one result.
//! Row-major inputs are handed to nalgebra as column-major views of their
//! transposes, and results are computed in transposed form, so the result's
//! column-major storage is already the row-major output buffer:
//!
//! - `(A + B)^T = A^T + B^T` (likewise for `-` and the Hadamard product)
//! - `(A B)^T = B^T A^T`
//! - `(A B^-1)^T = (B^T)^-1 A^T`

use log::{debug, trace};
use nalgebra::DMatrix;

use crate::config::DivideConfig;
use crate::error::{MatrixError, Result};
use crate::matrix::{Matrix, MatrixView};

/// Elementwise sum: `C[i][j] = A[i][j] + B[i][j]`.
pub fn add(a: MatrixView<'_>, b: MatrixView<'_>) -> Result<Matrix> {
    trace!("add {} + {}", a.shape(), b.shape());
    check_same(&a, &b, "add")?;
    Ok(Matrix::from_transposed(&a.transposed() + &b.transposed()))
}

/// Elementwise difference: `C[i][j] = A[i][j] - B[i][j]`.
pub fn subtract(a: MatrixView<'_>, b: MatrixView<'_>) -> Result<Matrix> {
    trace!("subtract {} - {}", a.shape(), b.shape());
    check_same(&a, &b, "subtract")?;
    Ok(Matrix::from_transposed(&a.transposed() - &b.transposed()))
}

/// Hadamard product: `C[i][j] = A[i][j] * B[i][j]`.
///
/// This is not the linear-algebra product; see [`matrix_product`].
pub fn elementwise_multiply(a: MatrixView<'_>, b: MatrixView<'_>) -> Result<Matrix> {
    trace!("elementwise_multiply {} .* {}", a.shape(), b.shape());
    check_same(&a, &b, "elementwise_multiply")?;
    Ok(Matrix::from_transposed(
        a.transposed().component_mul(&b.transposed()),
    ))
}

/// Standard matrix product. `a` is `[m x k]`, `b` is `[k x n]`, the result
/// is `[m x n]`.
pub fn matrix_product(a: MatrixView<'_>, b: MatrixView<'_>) -> Result<Matrix> {
    trace!("matrix_product {} @ {}", a.shape(), b.shape());
    a.shape()
        .product_shape(&b.shape())
        .inspect_err(|e| debug!("matrix_product rejected: {e}"))?;
    Ok(Matrix::from_transposed(&b.transposed() * &a.transposed()))
}

/// Computes `A * B^-1` with the default (exact zero) singularity test.
pub fn divide(a: MatrixView<'_>, b: MatrixView<'_>) -> Result<Matrix> {
    divide_with(a, b, &DivideConfig::default())
}

/// Computes `A * B^-1`.
///
/// Fails with [`MatrixError::NotSquare`] if `b` is not square,
/// [`MatrixError::ProductMismatch`] if `a` has a different number of columns
/// than `b` has rows, and [`MatrixError::Singular`] if `b`'s determinant is
/// singular under `config`.
pub fn divide_with(
    a: MatrixView<'_>,
    b: MatrixView<'_>,
    config: &DivideConfig,
) -> Result<Matrix> {
    trace!("divide {} / {}", a.shape(), b.shape());
    check_square(&b)
        .and_then(|_| a.shape().product_shape(&b.shape()))
        .inspect_err(|e| debug!("divide rejected: {e}"))?;

    let inv_t = inverse_transposed(&b, config).inspect_err(|e| debug!("divide rejected: {e}"))?;
    Ok(Matrix::from_transposed(&inv_t * &a.transposed()))
}

/// Determinant of a square matrix, computed from its LU decomposition.
pub fn determinant(m: MatrixView<'_>) -> Result<f64> {
    check_square(&m)?;
    // det(M^T) == det(M)
    Ok(m.transposed().clone_owned().lu().determinant())
}

/// Inverse of a square matrix with the default singularity test.
pub fn inverse(m: MatrixView<'_>) -> Result<Matrix> {
    inverse_with(m, &DivideConfig::default())
}

/// Inverse of a square matrix via LU decomposition.
pub fn inverse_with(m: MatrixView<'_>, config: &DivideConfig) -> Result<Matrix> {
    trace!("inverse {}", m.shape());
    check_square(&m).inspect_err(|e| debug!("inverse rejected: {e}"))?;
    let inv_t = inverse_transposed(&m, config).inspect_err(|e| debug!("inverse rejected: {e}"))?;
    // (M^T)^-1 == (M^-1)^T
    Ok(Matrix::from_transposed(inv_t))
}

/// Returns `(M^T)^-1` for a square `m`.
fn inverse_transposed(m: &MatrixView<'_>, config: &DivideConfig) -> Result<DMatrix<f64>> {
    let lu = m.transposed().clone_owned().lu();
    let determinant = lu.determinant();
    if config.is_singular(determinant) {
        return Err(MatrixError::Singular { determinant });
    }
    lu.try_inverse()
        .ok_or(MatrixError::Singular { determinant })
}

fn check_same(a: &MatrixView<'_>, b: &MatrixView<'_>, op: &str) -> Result<()> {
    a.shape()
        .check_same(&b.shape())
        .inspect_err(|e| debug!("{op} rejected: {e}"))
}

fn check_square(m: &MatrixView<'_>) -> Result<()> {
    let shape = m.shape();
    if !shape.is_square() {
        return Err(MatrixError::NotSquare {
            rows: shape.rows(),
            cols: shape.cols(),
        });
    }
    Ok(())
}
