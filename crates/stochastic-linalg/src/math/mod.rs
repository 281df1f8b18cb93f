//! Small owned containers used throughout the crate.
//!
//! Provides `Matrix` (2D, row-major) and `Vector` (1D) with minimal
//! convenience methods, plus conversions to `ndarray` and `nalgebra` for
//! callers and for the decomposition routines.
pub mod interop;
pub mod matrix;
pub mod vector;

pub use matrix::Matrix;
pub use vector::Vector;
