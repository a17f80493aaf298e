use thiserror::Error;

use crate::shape::Shape;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MatrixError {
    #[error("buffer of length {len} cannot hold a {rows}x{cols} matrix")]
    BufferLength { len: usize, rows: usize, cols: usize },
    #[error("dimensions {rows}x{cols} overflow the addressable element count")]
    DimensionOverflow { rows: usize, cols: usize },
    #[error("shape mismatch: expected {expected}, got {got}")]
    ShapeMismatch { expected: Shape, got: Shape },
    #[error("product dimension mismatch: [{m}x{k}] @ [{k2}x{n}]")]
    ProductMismatch {
        m: usize,
        k: usize,
        k2: usize,
        n: usize,
    },
    #[error("divisor must be square, got {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },
    #[error("divisor is singular (determinant {determinant})")]
    Singular { determinant: f64 },
}

/// Coarse failure classification exposed across the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Operand dimensions are incompatible with the requested operation.
    Shape,
    /// The divisor has a zero determinant and cannot be inverted.
    Singular,
}

impl MatrixError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            MatrixError::Singular { .. } => ErrorKind::Singular,
            _ => ErrorKind::Shape,
        }
    }
}

pub type Result<T> = std::result::Result<T, MatrixError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        let shape = MatrixError::NotSquare { rows: 2, cols: 3 };
        assert_eq!(shape.kind(), ErrorKind::Shape);

        let len = MatrixError::BufferLength { len: 3, rows: 2, cols: 2 };
        assert_eq!(len.kind(), ErrorKind::Shape);

        let singular = MatrixError::Singular { determinant: 0.0 };
        assert_eq!(singular.kind(), ErrorKind::Singular);
    }

    #[test]
    fn test_display() {
        let e = MatrixError::ProductMismatch { m: 2, k: 3, k2: 2, n: 2 };
        assert_eq!(e.to_string(), "product dimension mismatch: [2x3] @ [2x2]");

        let e = MatrixError::ShapeMismatch {
            expected: Shape::new(2, 2),
            got: Shape::new(2, 3),
        };
        assert_eq!(e.to_string(), "shape mismatch: expected [2x2], got [2x3]");
    }
}
