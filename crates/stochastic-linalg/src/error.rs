//! Error type shared by the vector, matrix and Markov-chain operations.
//!
//! Invalid shapes and degenerate inputs are reported through `LinalgError`
//! instead of panicking, so every fallible operation returns a
//! `LinalgResult<T>`.
use std::error::Error;
use std::fmt;

/// Failure cases for the linear-algebra operations.
#[derive(Debug, Clone, PartialEq)]
pub enum LinalgError {
    /// Two operands that must agree in length do not.
    DimensionMismatch { left: usize, right: usize },
    /// The operation is undefined for empty input.
    EmptyInput,
    /// A selection needs more vectors than were supplied.
    InsufficientVectors { required: usize, found: usize },
    /// A graph needs more nodes than were requested.
    InsufficientNodes { required: usize, found: usize },
    /// The operation is undefined for the zero vector.
    ZeroVector,
    /// Square root of a negative number.
    NegativeRadicand { value: f64 },
    /// Tolerances must be positive and finite.
    InvalidTolerance { value: f64 },
    NotSquare { rows: usize, cols: usize },
    /// Row `row` has `found` entries where `expected` were required.
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// The buffer length does not match `rows * cols`.
    Shape { rows: usize, cols: usize, len: usize },
    /// An iterative routine hit its iteration cap.
    NotConverged { iterations: usize, residual: f64 },
    /// Entry `(row, col)` is NaN or infinite.
    NonFinite { row: usize, col: usize },

    // ---- Anyhow catchall ----
    Anyhow(String),
}

pub type LinalgResult<T> = Result<T, LinalgError>;

impl fmt::Display for LinalgError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LinalgError::DimensionMismatch { left, right } => {
                write!(f, "Dimension mismatch: {} vs {}", left, right)
            }
            LinalgError::EmptyInput => write!(f, "Operation is undefined for empty input"),
            LinalgError::InsufficientVectors { required, found } => write!(
                f,
                "At least {} vectors are required, found {}",
                required, found
            ),
            LinalgError::InsufficientNodes { required, found } => write!(
                f,
                "At least {} nodes are required, found {}",
                required, found
            ),
            LinalgError::ZeroVector => write!(f, "Operation is undefined for the zero vector"),
            LinalgError::NegativeRadicand { value } => {
                write!(f, "Cannot take the square root of {}", value)
            }
            LinalgError::InvalidTolerance { value } => {
                write!(f, "Tolerance must be positive and finite, got {}", value)
            }
            LinalgError::NotSquare { rows, cols } => {
                write!(f, "Expected a square matrix, got shape ({}, {})", rows, cols)
            }
            LinalgError::RaggedRows {
                row,
                expected,
                found,
            } => write!(
                f,
                "Row {} has {} entries, expected {}",
                row, found, expected
            ),
            LinalgError::Shape { rows, cols, len } => write!(
                f,
                "invalid shape ({}, {}) for buffer of length {}",
                rows, cols, len
            ),
            LinalgError::NotConverged {
                iterations,
                residual,
            } => write!(
                f,
                "Did not converge after {} iterations (residual {:e})",
                iterations, residual
            ),
            LinalgError::NonFinite { row, col } => {
                write!(f, "Entry ({}, {}) is not finite", row, col)
            }
            LinalgError::Anyhow(msg) => write!(f, "{}", msg),
        }
    }
}

impl Error for LinalgError {}
