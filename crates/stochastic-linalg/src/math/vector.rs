use std::fmt;
use std::iter::FromIterator;
use std::ops::{Add, Index, Mul, Sub};
use std::slice::Iter;

use num_traits::Zero;

/// Owned, fixed-length vector. Operations never mutate their inputs; they
/// build and return new vectors.
#[derive(Clone, Debug, PartialEq)]
pub struct Vector<T = f64> {
    data: Vec<T>,
}

impl<T> Vector<T> {
    pub fn new(data: Vec<T>) -> Self {
        Self { data }
    }

    pub fn from_vec(data: Vec<T>) -> Self {
        Self::new(data)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, T> {
        self.data.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn mapv<U, F>(&self, mut f: F) -> Vector<U>
    where
        F: FnMut(&T) -> U,
    {
        Vector::from_vec(self.data.iter().map(|v| f(v)).collect())
    }

    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.data.clone()
    }
}

impl<T> Vector<T>
where
    T: Clone,
{
    pub fn from_elem(len: usize, value: T) -> Self {
        Vector::from_vec(vec![value; len])
    }
}

impl<T> Vector<T>
where
    T: Clone + Zero,
{
    pub fn zeros(len: usize) -> Self {
        Vector::from_vec(vec![T::zero(); len])
    }

    /// True when every coordinate equals zero. An empty vector counts as zero.
    pub fn is_zero(&self) -> bool {
        self.data.iter().all(|v| v.is_zero())
    }
}

impl<T> From<Vec<T>> for Vector<T> {
    fn from(value: Vec<T>) -> Self {
        Vector::from_vec(value)
    }
}

impl<T> From<Vector<T>> for Vec<T> {
    fn from(value: Vector<T>) -> Self {
        value.data
    }
}

impl<T> FromIterator<T> for Vector<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Vector::from_vec(iter.into_iter().collect())
    }
}

impl<T> Index<usize> for Vector<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        &self.data[index]
    }
}

impl<'a, 'b> Add<&'b Vector<f64>> for &'a Vector<f64> {
    type Output = Vector<f64>;

    fn add(self, rhs: &'b Vector<f64>) -> Self::Output {
        assert_eq!(
            self.len(),
            rhs.len(),
            "Vector addition requires equal length vectors"
        );
        self.iter().zip(rhs.iter()).map(|(a, b)| a + b).collect()
    }
}

impl<'a, 'b> Sub<&'b Vector<f64>> for &'a Vector<f64> {
    type Output = Vector<f64>;

    fn sub(self, rhs: &'b Vector<f64>) -> Self::Output {
        assert_eq!(
            self.len(),
            rhs.len(),
            "Vector subtraction requires equal length vectors"
        );
        self.iter().zip(rhs.iter()).map(|(a, b)| a - b).collect()
    }
}

impl<'a> Mul<f64> for &'a Vector<f64> {
    type Output = Vector<f64>;

    fn mul(self, rhs: f64) -> Self::Output {
        self.mapv(|v| v * rhs)
    }
}

impl Vector<f64> {
    pub fn sum(&self) -> f64 {
        self.iter().copied().sum()
    }

    /// Largest absolute coordinate; zero for an empty vector.
    pub fn max_abs(&self) -> f64 {
        self.iter().fold(0.0, |acc, v| acc.max(v.abs()))
    }
}

/// Sum of elementwise products of two equal-length slices.
///
/// Callers check lengths; the kernels only read `lhs.len()` elements.
pub(crate) fn dot_kernel(lhs: &[f64], rhs: &[f64]) -> f64 {
    debug_assert_eq!(lhs.len(), rhs.len());
    #[cfg(all(feature = "simd", target_arch = "x86_64"))]
    {
        unsafe { dot_simd_f64(lhs, rhs) }
    }
    #[cfg(not(all(feature = "simd", target_arch = "x86_64")))]
    {
        dot_scalar_f64(lhs, rhs)
    }
}

#[cfg_attr(all(feature = "simd", target_arch = "x86_64"), allow(dead_code))]
fn dot_scalar_f64(lhs: &[f64], rhs: &[f64]) -> f64 {
    lhs.iter().zip(rhs.iter()).map(|(a, b)| a * b).sum()
}

#[cfg(all(feature = "simd", target_arch = "x86_64"))]
unsafe fn dot_simd_f64(lhs: &[f64], rhs: &[f64]) -> f64 {
    use std::arch::x86_64::*;

    let mut i = 0usize;
    let mut acc = _mm_setzero_pd();

    while i + 2 <= lhs.len() {
        let a = _mm_loadu_pd(lhs.as_ptr().add(i));
        let b = _mm_loadu_pd(rhs.as_ptr().add(i));
        acc = _mm_add_pd(acc, _mm_mul_pd(a, b));
        i += 2;
    }

    let mut buffer = [0f64; 2];
    _mm_storeu_pd(buffer.as_mut_ptr(), acc);
    let mut sum = buffer.iter().sum::<f64>();

    while i < lhs.len() {
        sum += lhs[i] * rhs[i];
        i += 1;
    }

    sum
}

impl<T: fmt::Display> fmt::Display for Vector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (idx, value) in self.data.iter().enumerate() {
            write!(f, "{}", value)?;
            if idx + 1 != self.data.len() {
                write!(f, ", ")?;
            }
        }
        write!(f, "]")
    }
}
