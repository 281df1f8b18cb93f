//! Vector operations: norms, dot products, projections and related helpers.
//!
//! Shape problems (mismatched lengths, empty input where the result is
//! undefined) come back as [`LinalgError`] values; nothing here panics on
//! caller input.

use crate::config::LinalgConfig;
use crate::error::{LinalgError, LinalgResult};
use crate::math::vector::dot_kernel;
use crate::math::Vector;

/// Return true when every coordinate of `v` is non-negative.
///
/// An empty vector is trivially in the first quadrant.
pub fn is_in_first_quadrant(v: &Vector) -> bool {
    v.iter().all(|&x| x >= 0.0)
}

/// Dot product of two vectors.
///
/// # Arguments
///
/// * `v1` - Left operand.
/// * `v2` - Right operand, same length as `v1`.
///
/// # Returns
///
/// The sum of elementwise products, or [`LinalgError::DimensionMismatch`]
/// when the lengths differ.
///
/// # Examples
///
/// ```rust
/// use stochastic_linalg::math::Vector;
/// use stochastic_linalg::vector_ops::dot;
///
/// let a = Vector::from_vec(vec![1.0, 2.0, 3.0]);
/// let b = Vector::from_vec(vec![4.0, 5.0, 6.0]);
/// assert_eq!(dot(&a, &b).unwrap(), 32.0);
/// ```
pub fn dot(v1: &Vector, v2: &Vector) -> LinalgResult<f64> {
    if v1.len() != v2.len() {
        return Err(LinalgError::DimensionMismatch {
            left: v1.len(),
            right: v2.len(),
        });
    }
    Ok(dot_kernel(v1.as_slice(), v2.as_slice()))
}

/// Euclidean norm of `v`. Empty vectors are rejected with
/// [`LinalgError::EmptyInput`].
pub fn norm(v: &Vector) -> LinalgResult<f64> {
    if v.is_empty() {
        return Err(LinalgError::EmptyInput);
    }
    Ok(dot_kernel(v.as_slice(), v.as_slice()).sqrt())
}

/// Return the vector with the largest norm.
///
/// Ties go to the first vector in input order. Fails on an empty list, or
/// if any vector is itself empty.
pub fn largest_norm(vectors: &[Vector]) -> LinalgResult<&Vector> {
    let mut best: Option<(&Vector, f64)> = None;
    for v in vectors {
        let n = norm(v)?;
        match best {
            Some((_, best_norm)) if n <= best_norm => {}
            _ => best = Some((v, n)),
        }
    }
    best.map(|(v, _)| v).ok_or(LinalgError::EmptyInput)
}

/// Return the vector with the second-largest norm.
///
/// Vectors are ranked by a stable descending sort on their norms, so equal
/// norms keep their input order: with norms `[5, 5, 1]` the second entry is
/// returned.
pub fn second_largest_norm(vectors: &[Vector]) -> LinalgResult<&Vector> {
    if vectors.len() < 2 {
        return Err(LinalgError::InsufficientVectors {
            required: 2,
            found: vectors.len(),
        });
    }
    let mut ranked = vectors
        .iter()
        .map(|v| norm(v).map(|n| (v, n)))
        .collect::<LinalgResult<Vec<_>>>()?;
    // sort_by is stable
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    Ok(ranked[1].0)
}

/// Return true if `v1` and `v2` are linearly dependent.
///
/// A zero vector is dependent on anything. Otherwise the scalar is taken
/// from the first nonzero coordinate of `v2` and every coordinate is
/// compared with exact floating-point equality, so results that are only
/// approximately proportional are reported as independent.
///
/// # Examples
///
/// ```rust
/// use stochastic_linalg::math::Vector;
/// use stochastic_linalg::vector_ops::is_scalar_multiple;
///
/// let a = Vector::from_vec(vec![2.0, 4.0]);
/// let b = Vector::from_vec(vec![1.0, 2.0]);
/// assert!(is_scalar_multiple(&a, &b).unwrap());
/// ```
pub fn is_scalar_multiple(v1: &Vector, v2: &Vector) -> LinalgResult<bool> {
    if v1.len() != v2.len() {
        return Err(LinalgError::DimensionMismatch {
            left: v1.len(),
            right: v2.len(),
        });
    }
    if v1.is_zero() || v2.is_zero() {
        return Ok(true);
    }
    let pivot = match v2.iter().position(|&x| x != 0.0) {
        Some(idx) => idx,
        None => return Ok(true),
    };
    let c = v1[pivot] / v2[pivot];
    Ok(v1.iter().zip(v2.iter()).all(|(&a, &b)| c * b == a))
}

/// Scale `v` to unit length.
pub fn normalize(v: &Vector) -> LinalgResult<Vector> {
    let n = norm(v)?;
    if n == 0.0 {
        return Err(LinalgError::ZeroVector);
    }
    Ok(v.mapv(|x| x / n))
}

/// Orthogonal projection of `v` onto `w` with the default config.
///
/// See [`orthogonal_projection_with`].
pub fn orthogonal_projection(v: &Vector, w: &Vector) -> LinalgResult<(Vector, Vector)> {
    orthogonal_projection_with(v, w, &LinalgConfig::default())
}

/// Decompose `v` into `x + y` with `x` parallel to `w` and `y` orthogonal to it.
///
/// # Arguments
///
/// * `v` - Vector to decompose.
/// * `w` - Nonzero reference direction, same length as `v`.
/// * `config` - `config.projection` controls rounding of `x`; `y` is
///   always computed as `v - x` so the sum is preserved exactly.
///
/// # Returns
///
/// The pair `(x, y)`.
pub fn orthogonal_projection_with(
    v: &Vector,
    w: &Vector,
    config: &LinalgConfig,
) -> LinalgResult<(Vector, Vector)> {
    let vw = dot(v, w)?;
    let ww = dot(w, w)?;
    if ww == 0.0 {
        return Err(LinalgError::ZeroVector);
    }
    let scale = vw / ww;
    let x = w.mapv(|c| config.projection.apply(scale * c));
    let y = v - &x;
    Ok((x, y))
}

/// Newton's-method square root with the default iteration cap.
///
/// See [`square_root_with`].
pub fn square_root(n: f64, eps: f64) -> LinalgResult<f64> {
    square_root_with(n, eps, &LinalgConfig::default())
}

/// Approximate `sqrt(n)` by iterating `x <- (x + n/x) / 2` from `x = 1`
/// until `|x² - n| < eps`.
///
/// Negative `n` and non-positive `eps` are rejected. Zero returns zero
/// directly. If `eps` is finer than floating point can resolve at the
/// magnitude of `n`, the loop stops after `config.sqrt_max_iterations`
/// with [`LinalgError::NotConverged`].
pub fn square_root_with(n: f64, eps: f64, config: &LinalgConfig) -> LinalgResult<f64> {
    if !(eps.is_finite() && eps > 0.0) {
        return Err(LinalgError::InvalidTolerance { value: eps });
    }
    if n < 0.0 || n.is_nan() {
        return Err(LinalgError::NegativeRadicand { value: n });
    }
    if n == 0.0 {
        return Ok(0.0);
    }

    let mut x = 1.0f64;
    let mut residual = (x * x - n).abs();
    let mut iterations = 0usize;
    // written so a NaN residual keeps iterating into the cap
    while !(residual < eps) {
        if iterations >= config.sqrt_max_iterations {
            return Err(LinalgError::NotConverged {
                iterations,
                residual,
            });
        }
        x = (x + n / x) / 2.0;
        residual = (x * x - n).abs();
        iterations += 1;
        log::trace!("newton step {}: x = {}, residual = {:e}", iterations, x, residual);
    }
    log::debug!("square_root({}) converged after {} iterations", n, iterations);
    Ok(x)
}
