//! Matrix operations built on the vector helpers.

use crate::config::LinalgConfig;
use crate::error::{LinalgError, LinalgResult};
use crate::math::{Matrix, Vector};
use crate::math::vector::dot_kernel;

/// Row-wise dot products; the caller has checked `m.ncols() == v.len()`.
fn apply_rows(m: &Matrix, v: &[f64]) -> Vector {
    m.rows().map(|row| dot_kernel(row, v)).collect()
}

/// Compute the matrix-vector product `M·v`.
///
/// # Arguments
///
/// * `m` - Matrix of shape `(rows, cols)`.
/// * `v` - Vector of length `cols`.
///
/// # Returns
///
/// A vector of length `rows`, or [`LinalgError::DimensionMismatch`] when
/// `v` does not match the column count.
pub fn multiply(m: &Matrix, v: &Vector) -> LinalgResult<Vector> {
    if m.ncols() != v.len() {
        return Err(LinalgError::DimensionMismatch {
            left: m.ncols(),
            right: v.len(),
        });
    }
    Ok(apply_rows(m, v.as_slice()))
}

pub fn transpose<T: Clone>(m: &Matrix<T>) -> Matrix<T> {
    Matrix::from_fn(m.ncols(), m.nrows(), |i, j| m[(j, i)].clone())
}

/// Rotate a square matrix 90 degrees counter-clockwise.
///
/// Entry `(i, j)` of the result is `m[(j, n - 1 - i)]`.
///
/// # Examples
///
/// ```rust
/// use stochastic_linalg::math::Matrix;
/// use stochastic_linalg::matrix_ops::rotate_matrix;
///
/// let m = Matrix::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap();
/// let r = rotate_matrix(&m).unwrap();
/// assert_eq!(r.to_rows(), vec![vec![2, 4], vec![1, 3]]);
/// ```
pub fn rotate_matrix<T: Clone>(m: &Matrix<T>) -> LinalgResult<Matrix<T>> {
    if !m.is_square() {
        return Err(LinalgError::NotSquare {
            rows: m.nrows(),
            cols: m.ncols(),
        });
    }
    let n = m.nrows();
    Ok(Matrix::from_fn(n, n, |i, j| m[(j, n - 1 - i)].clone()))
}

/// Multiply two complex numbers given as `(re, im)` pairs.
///
/// `z1 = a + bi` acts on `z2` as the rotation-scaling matrix
/// `[[a, -b], [b, a]]`.
pub fn complex_multiply(z1: (f64, f64), z2: (f64, f64)) -> (f64, f64) {
    let (a, b) = z1;
    let rotation_scaling = Matrix::from_fn(2, 2, |i, j| match (i, j) {
        (0, 1) => -b,
        (1, 0) => b,
        _ => a,
    });
    let product = apply_rows(&rotation_scaling, &[z2.0, z2.1]);
    (product[0], product[1])
}

/// Exact symmetry test. Non-square matrices are never symmetric.
pub fn is_symmetric<T: Clone + PartialEq>(m: &Matrix<T>) -> bool {
    m.is_square() && transpose(m) == *m
}

/// Eigenvalues of a symmetric matrix in ascending order.
///
/// Only the lower triangle is read, so the caller is responsible for
/// symmetry. Non-square input is rejected.
pub fn symmetric_eigenvalues(m: &Matrix) -> LinalgResult<Vec<f64>> {
    if !m.is_square() {
        return Err(LinalgError::NotSquare {
            rows: m.nrows(),
            cols: m.ncols(),
        });
    }
    if m.nrows() == 0 {
        return Ok(Vec::new());
    }
    let eigen = m.to_dmatrix().symmetric_eigen();
    let mut values: Vec<f64> = eigen.eigenvalues.iter().copied().collect();
    values.sort_by(|a, b| a.total_cmp(b));
    Ok(values)
}

pub fn is_positive_semidefinite(m: &Matrix) -> bool {
    is_positive_semidefinite_with(m, &LinalgConfig::default())
}

/// Return true if `m` is symmetric with finite entries and every eigenvalue
/// is at least `-config.psd_tolerance`.
///
/// The tolerance absorbs rounding in the eigen solver for singular and
/// near-singular matrices, whose zero eigenvalues tend to come back as
/// tiny negatives.
pub fn is_positive_semidefinite_with(m: &Matrix, config: &LinalgConfig) -> bool {
    if !is_symmetric(m) {
        log::debug!("matrix of shape {:?} is not symmetric", m.shape());
        return false;
    }
    if !m.as_slice().iter().all(|v| v.is_finite()) {
        log::debug!("matrix of shape {:?} has non-finite entries", m.shape());
        return false;
    }
    let eigenvalues = match symmetric_eigenvalues(m) {
        Ok(values) => values,
        Err(_) => return false,
    };
    match eigenvalues.first() {
        Some(&smallest) if !(smallest >= -config.psd_tolerance) => {
            log::debug!(
                "smallest eigenvalue {:e} is below -{:e}",
                smallest,
                config.psd_tolerance
            );
            false
        }
        _ => true,
    }
}
