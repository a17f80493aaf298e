use crate::error::{MatrixError, Result};
use std::fmt;

/// The dimensions of a row-major matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    rows: usize,
    cols: usize,
}

impl Shape {
    pub fn new(rows: usize, cols: usize) -> Self {
        Shape { rows, cols }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Total number of elements, or an error if `rows * cols` overflows.
    pub fn numel(&self) -> Result<usize> {
        self.rows
            .checked_mul(self.cols)
            .ok_or(MatrixError::DimensionOverflow {
                rows: self.rows,
                cols: self.cols,
            })
    }

    /// Row-major strides: moving one row skips `cols` elements.
    pub fn strides(&self) -> (usize, usize) {
        (self.cols, 1)
    }

    /// Checks that a flat buffer of `len` elements holds exactly this shape.
    pub fn check_len(&self, len: usize) -> Result<()> {
        if self.numel()? != len {
            return Err(MatrixError::BufferLength {
                len,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(())
    }

    /// Checks that `other` has exactly the same dimensions, as required by
    /// the elementwise operations.
    pub fn check_same(&self, other: &Shape) -> Result<()> {
        if self != other {
            return Err(MatrixError::ShapeMismatch {
                expected: *self,
                got: *other,
            });
        }
        Ok(())
    }

    /// Shape of `self @ rhs`.
    ///
    /// Requires `self.cols == rhs.rows`; the result is `self.rows x rhs.cols`.
    pub fn product_shape(&self, rhs: &Shape) -> Result<Shape> {
        if self.cols != rhs.rows {
            return Err(MatrixError::ProductMismatch {
                m: self.rows,
                k: self.cols,
                k2: rhs.rows,
                n: rhs.cols,
            });
        }
        Ok(Shape::new(self.rows, rhs.cols))
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}x{}]", self.rows, self.cols)
    }
}

impl From<(usize, usize)> for Shape {
    fn from((rows, cols): (usize, usize)) -> Self {
        Shape::new(rows, cols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_shape() {
        let s = Shape::new(2, 3);
        assert_eq!(s.rows(), 2);
        assert_eq!(s.cols(), 3);
        assert_eq!(s.numel().unwrap(), 6);
        assert!(!s.is_square());
        assert!(Shape::new(4, 4).is_square());
    }

    #[test]
    fn test_strides() {
        assert_eq!(Shape::new(2, 3).strides(), (3, 1));
    }

    #[test]
    fn test_empty_shape() {
        let s = Shape::new(0, 5);
        assert_eq!(s.numel().unwrap(), 0);
        assert!(s.check_len(0).is_ok());
    }

    #[test]
    fn test_overflow() {
        let s = Shape::new(usize::MAX, 2);
        assert!(matches!(
            s.numel(),
            Err(MatrixError::DimensionOverflow { .. })
        ));
        assert!(s.check_len(0).is_err());
    }

    #[test]
    fn test_check_len() {
        let s = Shape::new(2, 2);
        assert!(s.check_len(4).is_ok());
        assert_eq!(
            s.check_len(3),
            Err(MatrixError::BufferLength { len: 3, rows: 2, cols: 2 })
        );
    }

    #[test]
    fn test_check_same() {
        let a = Shape::new(2, 3);
        assert!(a.check_same(&Shape::new(2, 3)).is_ok());
        // Same element count, different layout.
        assert!(a.check_same(&Shape::new(3, 2)).is_err());
    }

    #[test]
    fn test_product_shape() {
        let a = Shape::new(2, 3);
        let b = Shape::new(3, 4);
        assert_eq!(a.product_shape(&b).unwrap(), Shape::new(2, 4));
        assert!(b.product_shape(&a).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Shape::new(3, 1).to_string(), "[3x1]");
    }
}
