//! Conversions between the crate containers and `ndarray` / `nalgebra`.
//!
//! The eigen and SVD routines live in `nalgebra`, so the matrix operations
//! copy into a `DMatrix` before decomposing. The `ndarray` conversions let
//! callers that already hold `Array1`/`Array2` data use the crate directly.
use nalgebra::DMatrix;

use crate::error::{LinalgError, LinalgResult};
use crate::math::{Matrix, Vector};

impl Matrix<f64> {
    /// Copy into a dense `nalgebra` matrix with the same shape.
    pub fn to_dmatrix(&self) -> DMatrix<f64> {
        DMatrix::from_row_slice(self.nrows(), self.ncols(), self.as_slice())
    }

    pub fn from_dmatrix(m: &DMatrix<f64>) -> Self {
        Matrix::from_fn(m.nrows(), m.ncols(), |i, j| m[(i, j)])
    }

    pub fn to_ndarray(&self) -> LinalgResult<ndarray::Array2<f64>> {
        ndarray::Array2::from_shape_vec(self.shape(), self.as_slice().to_vec()).map_err(|_| {
            LinalgError::Shape {
                rows: self.nrows(),
                cols: self.ncols(),
                len: self.as_slice().len(),
            }
        })
    }

    /// Copy from an `ndarray` matrix; any memory layout is accepted.
    pub fn from_ndarray(a: &ndarray::Array2<f64>) -> LinalgResult<Self> {
        Matrix::from_shape_vec(a.dim(), a.iter().copied().collect())
    }
}

impl Vector<f64> {
    pub fn to_ndarray(&self) -> ndarray::Array1<f64> {
        ndarray::Array1::from_vec(self.to_vec())
    }

    pub fn from_ndarray(a: &ndarray::Array1<f64>) -> Self {
        a.iter().copied().collect()
    }
}
