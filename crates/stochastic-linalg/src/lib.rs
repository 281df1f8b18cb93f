//! stochastic-linalg: vector, matrix and Markov-chain helpers.
//!
//! The crate is a set of pure functions over the small owned containers in
//! [`math`]: vector norms and projections ([`vector_ops`]), matrix products,
//! rotations and definiteness checks ([`matrix_ops`]), and Markov-chain
//! utilities such as stationary distributions and n-step walks
//! ([`markov`]). Invalid shapes come back as [`error::LinalgError`] rather
//! than panics; numeric tolerances live in [`config::LinalgConfig`].
pub mod config;
pub mod error;
pub mod markov;
pub mod math;
pub mod matrix_ops;
pub mod vector_ops;

pub use config::LinalgConfig;
pub use error::{LinalgError, LinalgResult};
