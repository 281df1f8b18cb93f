//! Markov-chain helpers: stochastic-matrix validation, stationary states,
//! n-step walks and sparse adjacency conversion.
//!
//! Two conventions meet here. `is_stochastic` checks the left-stochastic
//! property (columns sum to one), while the walk and stationary routines
//! treat distributions as row vectors advanced by `x <- x·P`, so a
//! stationary state satisfies `v·P = v`.
use std::collections::BTreeMap;

use nalgebra::DMatrix;
use rand::Rng;

use crate::config::{LinalgConfig, StationaryMethod};
use crate::error::{LinalgError, LinalgResult};
use crate::math::{Matrix, Vector};
use crate::matrix_ops::{multiply, transpose};

/// Row index to the `(column, value)` pairs with positive value.
pub type SparseAdjacency = BTreeMap<usize, Vec<(usize, f64)>>;

fn ensure_square(m: &Matrix) -> LinalgResult<()> {
    if !m.is_square() {
        return Err(LinalgError::NotSquare {
            rows: m.nrows(),
            cols: m.ncols(),
        });
    }
    Ok(())
}

fn ensure_finite(m: &Matrix) -> LinalgResult<()> {
    match m.as_slice().iter().position(|v| !v.is_finite()) {
        Some(idx) => Err(LinalgError::NonFinite {
            row: idx / m.ncols(),
            col: idx % m.ncols(),
        }),
        None => Ok(()),
    }
}

/// `x·P` for a row vector `x`; shapes are checked by the callers.
fn left_multiply(x: &Vector, p: &Matrix) -> Vector {
    (0..p.ncols())
        .map(|j| (0..p.nrows()).map(|i| x[i] * p[(i, j)]).sum::<f64>())
        .collect()
}

pub fn is_stochastic(m: &Matrix) -> bool {
    is_stochastic_with(m, &LinalgConfig::default())
}

/// Return true if `m` is square, non-negative, and every column sums to one
/// within `config.closeness`.
pub fn is_stochastic_with(m: &Matrix, config: &LinalgConfig) -> bool {
    if !m.is_square() {
        return false;
    }
    // NaN fails the comparison as well
    if !m.as_slice().iter().all(|&v| v >= 0.0) {
        return false;
    }
    (0..m.ncols()).all(|j| {
        let column_sum: f64 = (0..m.nrows()).map(|i| m[(i, j)]).sum();
        config.closeness.is_close(column_sum, 1.0)
    })
}

/// Stationary distributions of `p` with the default config.
///
/// See [`stationary_states_with`].
pub fn stationary_states(p: &Matrix) -> LinalgResult<Vec<Vector>> {
    stationary_states_with(p, &LinalgConfig::default())
}

/// Find the stationary distributions of a transition matrix.
///
/// A stationary distribution is a row vector `v` with `v·P = v`, scaled so
/// that its entries sum to one.
///
/// # Arguments
///
/// * `p` - Square transition matrix.
/// * `config` - `config.stationary_method` selects the strategy:
///   - `Eigen` returns one vector per independent solution, read off the
///     null space of `Pᵀ - I` (singular values at or below
///     `config.null_space_tolerance`).
///   - `FixedPoint` runs a lazy power iteration from the uniform
///     distribution and returns a single vector once the residual drops to
///     `config.fixed_point_tolerance`.
///
/// # Returns
///
/// The stationary distributions found. A non-square `p` or one with NaN or
/// infinite entries is rejected, and the fixed-point search reports [`LinalgError::NotConverged`] when it
/// runs out of iterations.
///
/// # Examples
///
/// ```rust
/// use stochastic_linalg::markov::stationary_states;
/// use stochastic_linalg::math::Matrix;
///
/// let p = Matrix::from_rows(vec![vec![0.9, 0.1], vec![0.5, 0.5]]).unwrap();
/// let states = stationary_states(&p).unwrap();
/// assert_eq!(states.len(), 1);
/// assert!((states[0][0] - 5.0 / 6.0).abs() < 1e-9);
/// ```
pub fn stationary_states_with(p: &Matrix, config: &LinalgConfig) -> LinalgResult<Vec<Vector>> {
    ensure_square(p)?;
    ensure_finite(p)?;
    if p.nrows() == 0 {
        return Ok(Vec::new());
    }
    match &config.stationary_method {
        StationaryMethod::Eigen => stationary_from_null_space(p, config.null_space_tolerance),
        StationaryMethod::FixedPoint { max_iterations } => {
            stationary_fixed_point(p, *max_iterations, config.fixed_point_tolerance)
                .map(|v| vec![v])
        }
    }
}

fn stationary_from_null_space(p: &Matrix, tolerance: f64) -> LinalgResult<Vec<Vector>> {
    let n = p.nrows();
    let shifted = transpose(p).to_dmatrix() - DMatrix::<f64>::identity(n, n);
    let svd = shifted.svd(false, true);
    let v_t = svd
        .v_t
        .ok_or_else(|| LinalgError::Anyhow("SVD returned no right singular vectors".to_string()))?;

    let mut states = Vec::new();
    for (k, &sigma) in svd.singular_values.iter().enumerate() {
        if sigma > tolerance {
            continue;
        }
        let basis: Vector = v_t.row(k).iter().copied().collect();
        let total = basis.sum();
        if total.abs() <= f64::EPSILON * n as f64 {
            log::warn!(
                "Skipping null-space vector {} with entries summing to {:e}",
                k,
                total
            );
            continue;
        }
        // snap rounding noise (and -0.0) to zero
        states.push(basis.mapv(|v| {
            let scaled = v / total;
            if scaled.abs() <= f64::EPSILON * n as f64 {
                0.0
            } else {
                scaled
            }
        }));
    }
    log::debug!(
        "Found {} stationary state(s) for a {}x{} transition matrix",
        states.len(),
        n,
        n
    );
    Ok(states)
}

fn stationary_fixed_point(p: &Matrix, max_iterations: usize, tolerance: f64) -> LinalgResult<Vector> {
    let n = p.nrows();
    let pt = transpose(p);
    let mut x = Vector::from_elem(n, 1.0 / n as f64);
    let mut residual = f64::INFINITY;

    for iteration in 0..max_iterations {
        let stepped = multiply(&pt, &x)?;
        residual = (&stepped - &x).max_abs();
        log::trace!("fixed-point iteration {}: residual = {:e}", iteration, residual);
        if residual <= tolerance {
            log::debug!("fixed-point search converged after {} iterations", iteration);
            return Ok(x);
        }
        // averaging with the previous iterate damps periodic chains
        let mixed = &(&x + &stepped) * 0.5;
        let total = mixed.sum();
        if !(total.is_finite() && total != 0.0) {
            return Err(LinalgError::NotConverged {
                iterations: iteration,
                residual,
            });
        }
        x = mixed.mapv(|v| v / total);
    }

    Err(LinalgError::NotConverged {
        iterations: max_iterations,
        residual,
    })
}

/// Uniform random-walk transition matrix on the complete graph with
/// `nodes` vertices and no self-loops.
pub fn complete_graph_transition(nodes: usize) -> LinalgResult<Matrix> {
    if nodes < 2 {
        return Err(LinalgError::InsufficientNodes {
            required: 2,
            found: nodes,
        });
    }
    Ok(uniform_walk(nodes))
}

// nodes >= 2
fn uniform_walk(nodes: usize) -> Matrix {
    let p = 1.0 / (nodes - 1) as f64;
    Matrix::from_fn(nodes, nodes, |i, j| if i == j { 0.0 } else { p })
}

/// Advance the row distribution `initial` by `steps` transitions of `p`.
pub fn n_step_distribution(p: &Matrix, initial: &Vector, steps: usize) -> LinalgResult<Vector> {
    ensure_square(p)?;
    if initial.len() != p.nrows() {
        return Err(LinalgError::DimensionMismatch {
            left: p.nrows(),
            right: initial.len(),
        });
    }
    let mut x = initial.clone();
    for _ in 0..steps {
        x = left_multiply(&x, p);
    }
    Ok(x)
}

/// Probability that a uniform walk on the complete graph with `nodes`
/// vertices is back at its starting vertex after `steps` moves.
pub fn return_probability(nodes: usize, steps: usize) -> LinalgResult<f64> {
    let p = complete_graph_transition(nodes)?;
    let mut start = vec![0.0; nodes];
    start[0] = 1.0;
    let x = n_step_distribution(&p, &Vector::from_vec(start), steps)?;
    Ok(x[0])
}

/// Probability of being back at node 0 after `n` steps of the uniform walk
/// on the complete 4-node graph (each move goes to one of the other three
/// nodes with probability 1/3).
pub fn probability_of_return(n: usize) -> f64 {
    let p = uniform_walk(4);
    let mut x = Vector::from_vec(vec![1.0, 0.0, 0.0, 0.0]);
    for _ in 0..n {
        x = left_multiply(&x, &p);
    }
    x[0]
}

/// Monte Carlo estimate of [`return_probability`].
///
/// Runs `trials` independent walks of `steps` moves, drawing each move
/// uniformly from the other `nodes - 1` vertices, and returns the fraction
/// that end at the start vertex.
pub fn simulate_return_frequency<R>(
    nodes: usize,
    steps: usize,
    trials: usize,
    rng: &mut R,
) -> LinalgResult<f64>
where
    R: Rng,
{
    if nodes < 2 {
        return Err(LinalgError::InsufficientNodes {
            required: 2,
            found: nodes,
        });
    }
    if trials == 0 {
        return Err(LinalgError::EmptyInput);
    }

    let mut returned = 0usize;
    for _ in 0..trials {
        let mut position = 0usize;
        for _ in 0..steps {
            // draw from the other vertices by skipping over the current one
            let next = rng.gen_range(0..nodes - 1);
            position = if next >= position { next + 1 } else { next };
        }
        if position == 0 {
            returned += 1;
        }
    }
    Ok(returned as f64 / trials as f64)
}

/// Convert a dense matrix into a sparse adjacency map.
///
/// Every row index is present as a key; its value lists the `(column,
/// value)` pairs with `value > 0` in column order.
///
/// # Examples
///
/// ```rust
/// use stochastic_linalg::markov::matrix_to_dict;
/// use stochastic_linalg::math::Matrix;
///
/// let m = Matrix::from_rows(vec![vec![1.0, 0.0], vec![0.0, 1.0]]).unwrap();
/// let adjacency = matrix_to_dict(&m);
/// assert_eq!(adjacency[&0], vec![(0, 1.0)]);
/// assert_eq!(adjacency[&1], vec![(1, 1.0)]);
/// ```
pub fn matrix_to_dict(m: &Matrix) -> SparseAdjacency {
    m.rows()
        .enumerate()
        .map(|(row_index, row)| {
            let entries: Vec<(usize, f64)> = row
                .iter()
                .enumerate()
                .filter(|&(_, &value)| value > 0.0)
                .map(|(col_index, &value)| (col_index, value))
                .collect();
            (row_index, entries)
        })
        .collect()
}
