use nalgebra::{DMatrix, DMatrixView};

use crate::error::Result;
use crate::shape::Shape;

/// A borrowed, row-major view over a caller-owned `f64` buffer.
///
/// Construction validates that the buffer length equals `rows * cols`, so
/// every operation can read the data without further bounds checks. The view
/// never outlives the call that borrowed it.
#[derive(Debug, Clone, Copy)]
pub struct MatrixView<'a> {
    data: &'a [f64],
    shape: Shape,
}

impl<'a> MatrixView<'a> {
    pub fn new(data: &'a [f64], rows: usize, cols: usize) -> Result<Self> {
        let shape = Shape::from((rows, cols));
        shape.check_len(data.len())?;
        Ok(MatrixView { data, shape })
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn data(&self) -> &'a [f64] {
        self.data
    }

    /// Reads the row-major buffer as a column-major `cols x rows` view, i.e.
    /// the transpose of this matrix, without copying.
    pub(crate) fn transposed(&self) -> DMatrixView<'a, f64> {
        DMatrixView::from_slice(self.data, self.shape.cols(), self.shape.rows())
    }
}

/// An owned, row-major matrix produced by an operation.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    data: Vec<f64>,
    shape: Shape,
}

impl Matrix {
    /// Create a matrix from row-major data.
    pub fn from_vec(data: Vec<f64>, rows: usize, cols: usize) -> Result<Self> {
        let shape = Shape::from((rows, cols));
        shape.check_len(data.len())?;
        Ok(Matrix { data, shape })
    }

    pub fn zeros(rows: usize, cols: usize) -> Result<Self> {
        let shape = Shape::from((rows, cols));
        Ok(Matrix {
            data: vec![0.0; shape.numel()?],
            shape,
        })
    }

    pub fn identity(n: usize) -> Result<Self> {
        let mut m = Matrix::zeros(n, n)?;
        for i in 0..n {
            m.data[i * n + i] = 1.0;
        }
        Ok(m)
    }

    /// Wraps a column-major result that holds the transpose of the wanted
    /// matrix; its storage is already the row-major buffer.
    pub(crate) fn from_transposed(t: DMatrix<f64>) -> Self {
        let shape = Shape::new(t.ncols(), t.nrows());
        Matrix {
            data: Vec::from(t.data),
            shape,
        }
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn rows(&self) -> usize {
        self.shape.rows()
    }

    pub fn cols(&self) -> usize {
        self.shape.cols()
    }

    /// Returns the element at (`row`, `col`), or `None` if out of range.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.rows() || col >= self.cols() {
            return None;
        }
        let (row_stride, col_stride) = self.shape.strides();
        self.data.get(row * row_stride + col * col_stride).copied()
    }

    pub fn data(&self) -> &[f64] {
        &self.data
    }

    pub fn as_view(&self) -> MatrixView<'_> {
        MatrixView {
            data: &self.data,
            shape: self.shape,
        }
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MatrixError;

    #[test]
    fn test_view_validates_length() {
        let data = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let v = MatrixView::new(&data, 2, 3).unwrap();
        assert_eq!(v.shape(), Shape::new(2, 3));
        assert_eq!(v.data(), &data);

        assert!(matches!(
            MatrixView::new(&data, 2, 2),
            Err(MatrixError::BufferLength { len: 6, rows: 2, cols: 2 })
        ));
    }

    #[test]
    fn test_transposed_view() {
        // [[1, 2, 3], [4, 5, 6]] read as its 3x2 transpose.
        let data = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let v = MatrixView::new(&data, 2, 3).unwrap();
        let t = v.transposed();
        assert_eq!(t.nrows(), 3);
        assert_eq!(t.ncols(), 2);
        assert_eq!(t[(0, 1)], 4.0);
        assert_eq!(t[(2, 0)], 3.0);
    }

    #[test]
    fn test_from_transposed_round_trip() {
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let v = MatrixView::new(&data, 3, 2).unwrap();
        let m = Matrix::from_transposed(v.transposed().clone_owned());
        assert_eq!(m.shape(), Shape::new(3, 2));
        assert_eq!(m.data(), data.as_slice());
    }

    #[test]
    fn test_get() {
        let m = Matrix::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 2, 3).unwrap();
        assert_eq!(m.get(0, 0), Some(1.0));
        assert_eq!(m.get(1, 0), Some(4.0));
        assert_eq!(m.get(1, 2), Some(6.0));
        assert_eq!(m.get(2, 0), None);
        assert_eq!(m.get(0, 3), None);
    }

    #[test]
    fn test_zeros_identity() {
        let z = Matrix::zeros(2, 3).unwrap();
        assert_eq!(z.data(), &[0.0; 6]);

        let i = Matrix::identity(3).unwrap();
        assert_eq!(i.data(), &[1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]);

        assert!(Matrix::identity(0).unwrap().data().is_empty());
    }

    #[test]
    fn test_shape_from_dimensions() {
        let m = Matrix::from_vec(vec![0.0; 6], 3, 2).unwrap();
        assert_eq!(m.shape(), Shape::from((3, 2)));
        assert_eq!(m.rows(), 3);
        assert_eq!(m.cols(), 2);
    }

    #[test]
    fn test_from_vec_mismatch() {
        assert!(Matrix::from_vec(vec![1.0, 2.0], 3, 1).is_err());
    }

    #[test]
    fn test_as_view_into_vec() {
        let m = Matrix::from_vec(vec![1.0, 2.0], 1, 2).unwrap();
        assert_eq!(m.as_view().shape(), Shape::new(1, 2));
        assert_eq!(m.into_vec(), vec![1.0, 2.0]);
    }
}
