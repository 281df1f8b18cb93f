use std::fmt;
use std::ops::Index;

use num_traits::{One, Zero};

use crate::error::{LinalgError, LinalgResult};
use crate::math::vector::Vector;

/// Rectangular matrix stored row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix<T = f64> {
    data: Vec<T>,
    rows: usize,
    cols: usize,
}

impl<T> Matrix<T> {
    pub fn from_shape_vec(shape: (usize, usize), data: Vec<T>) -> LinalgResult<Self> {
        let (rows, cols) = shape;
        if data.len() != rows * cols {
            return Err(LinalgError::Shape {
                rows,
                cols,
                len: data.len(),
            });
        }
        Ok(Self { data, rows, cols })
    }

    /// Build a matrix from a list of rows.
    ///
    /// Every row must have the length of the first one; a ragged row is
    /// reported as [`LinalgError::RaggedRows`]. An empty list gives a 0x0
    /// matrix.
    pub fn from_rows(rows: Vec<Vec<T>>) -> LinalgResult<Self> {
        let nrows = rows.len();
        let ncols = rows.first().map_or(0, |r| r.len());
        let mut data = Vec::with_capacity(nrows * ncols);
        for (idx, row) in rows.into_iter().enumerate() {
            if row.len() != ncols {
                return Err(LinalgError::RaggedRows {
                    row: idx,
                    expected: ncols,
                    found: row.len(),
                });
            }
            data.extend(row);
        }
        Ok(Self {
            data,
            rows: nrows,
            cols: ncols,
        })
    }

    pub fn nrows(&self) -> usize {
        self.rows
    }

    pub fn ncols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    #[inline]
    fn offset(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    pub fn row(&self, row: usize) -> &[T] {
        let start = self.offset(row, 0);
        &self.data[start..start + self.cols]
    }

    /// Iterate over the rows as slices.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> + '_ {
        (0..self.rows).map(move |r| self.row(r))
    }

    pub fn column(&self, col: usize) -> Vector<T>
    where
        T: Clone,
    {
        assert!(col < self.cols, "column index out of bounds");
        (0..self.rows).map(|row| self[(row, col)].clone()).collect()
    }

    /// Build an `rows x cols` matrix whose entry `(i, j)` is `f(i, j)`.
    pub fn from_fn<F>(rows: usize, cols: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> T,
    {
        let mut data = Vec::with_capacity(rows * cols);
        for i in 0..rows {
            for j in 0..cols {
                data.push(f(i, j));
            }
        }
        Self { data, rows, cols }
    }

    pub fn mapv<U, F>(&self, mut f: F) -> Matrix<U>
    where
        F: FnMut(&T) -> U,
    {
        Matrix {
            data: self.data.iter().map(|v| f(v)).collect(),
            rows: self.rows,
            cols: self.cols,
        }
    }

    pub fn to_rows(&self) -> Vec<Vec<T>>
    where
        T: Clone,
    {
        self.rows().map(|r| r.to_vec()).collect()
    }
}

impl<T> Matrix<T>
where
    T: Clone + Zero,
{
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            data: vec![T::zero(); rows * cols],
            rows,
            cols,
        }
    }
}

impl<T> Matrix<T>
where
    T: Clone + Zero + One,
{
    pub fn identity(n: usize) -> Self {
        Self::from_fn(n, n, |i, j| if i == j { T::one() } else { T::zero() })
    }
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        let offset = self.offset(index.0, index.1);
        &self.data[offset]
    }
}

impl<T: fmt::Display> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (r, row) in self.rows().enumerate() {
            write!(f, "[")?;
            for (c, value) in row.iter().enumerate() {
                write!(f, "{}", value)?;
                if c + 1 != row.len() {
                    write!(f, ", ")?;
                }
            }
            write!(f, "]")?;
            if r + 1 != self.rows {
                write!(f, ", ")?;
            }
        }
        write!(f, "]")
    }
}
