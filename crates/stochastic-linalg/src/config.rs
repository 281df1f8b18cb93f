use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Combined relative/absolute closeness test: `|a - b| <= atol + rtol * |b|`.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    pub rtol: f64,
    pub atol: f64,
}

impl Tolerance {
    pub fn new(rtol: f64, atol: f64) -> Self {
        Self { rtol, atol }
    }

    pub fn is_close(&self, a: f64, b: f64) -> bool {
        (a - b).abs() <= self.atol + self.rtol * b.abs()
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            rtol: 1e-5,
            atol: 1e-8,
        }
    }
}

/// Rounding applied to the parallel component of an orthogonal projection.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Precision {
    #[default]
    Exact,
    /// Round to this many decimal places.
    Decimals(u32),
}

impl Precision {
    pub fn apply(&self, value: f64) -> f64 {
        match self {
            Precision::Exact => value,
            Precision::Decimals(places) => {
                let scale = 10f64.powi(*places as i32);
                (value * scale).round() / scale
            }
        }
    }
}

/// Strategy used to find stationary distributions.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
pub enum StationaryMethod {
    /// Null space of `Pᵀ - I` via SVD; returns every independent state.
    #[default]
    Eigen,
    /// Lazy power iteration from the uniform distribution; returns one state.
    FixedPoint { max_iterations: usize },
}

impl FromStr for StationaryMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "eigen" => Ok(StationaryMethod::Eigen),
            "fixed-point" | "fixed_point" | "fixedpoint" => Ok(StationaryMethod::FixedPoint {
                max_iterations: 10_000,
            }),
            _ => Err(format!(
                "Unknown stationary method: {}. Expected `eigen` or `fixed-point`",
                s
            )),
        }
    }
}

/// Tolerances and strategy choices for the tolerance-sensitive operations.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct LinalgConfig {
    /// Closeness used for column sums in `is_stochastic`.
    pub closeness: Tolerance,
    /// Eigenvalues down to `-psd_tolerance` still count as non-negative.
    pub psd_tolerance: f64,
    /// Singular values at or below this span the stationary null space.
    pub null_space_tolerance: f64,
    /// Residual `max |x·P - x|` accepted by the fixed-point search.
    pub fixed_point_tolerance: f64,
    pub sqrt_max_iterations: usize,
    pub projection: Precision,
    pub stationary_method: StationaryMethod,
}

impl Default for LinalgConfig {
    fn default() -> Self {
        Self {
            closeness: Tolerance::default(),
            psd_tolerance: 1e-10,
            null_space_tolerance: 1e-8,
            fixed_point_tolerance: 1e-12,
            sqrt_max_iterations: 10_000,
            projection: Precision::Exact,
            stationary_method: StationaryMethod::Eigen,
        }
    }
}

impl LinalgConfig {
    /// Parse a config from JSON. Missing fields fall back to their defaults.
    pub fn from_json_str(json: &str) -> anyhow::Result<Self> {
        let config: LinalgConfig =
            serde_json::from_str(json).context("Failed to parse linalg config JSON")?;
        for (name, value) in [
            ("psd_tolerance", config.psd_tolerance),
            ("null_space_tolerance", config.null_space_tolerance),
            ("fixed_point_tolerance", config.fixed_point_tolerance),
        ] {
            if !value.is_finite() || value < 0.0 {
                anyhow::bail!("{} must be a non-negative finite number, got {}", name, value);
            }
        }
        Ok(config)
    }
}
