//! Integration tests for norms, dot products, projections and square roots.

use approx::{assert_abs_diff_eq, assert_relative_eq};
use stochastic_linalg::config::{LinalgConfig, Precision};
use stochastic_linalg::math::Vector;
use stochastic_linalg::vector_ops::*;
use stochastic_linalg::LinalgError;

fn vector(values: &[f64]) -> Vector {
    Vector::from_vec(values.to_vec())
}

// ---------------------------------------------------------------------------
// Quadrant, dot and norm
// ---------------------------------------------------------------------------

#[test]
fn first_quadrant_requires_non_negative_coordinates() {
    assert!(is_in_first_quadrant(&vector(&[0.0, 3.0])));
    assert!(!is_in_first_quadrant(&vector(&[1.0, -0.1])));
    assert!(is_in_first_quadrant(&vector(&[])));
}

#[test]
fn dot_is_commutative() {
    let a = vector(&[1.5, -2.0, 4.0]);
    let b = vector(&[0.25, 3.0, -1.0]);
    assert_eq!(dot(&a, &b).unwrap(), dot(&b, &a).unwrap());
    assert_relative_eq!(dot(&a, &b).unwrap(), 0.375 - 6.0 - 4.0);
}

#[test]
fn dot_length_mismatch_is_an_error() {
    let err = dot(&vector(&[1.0, 2.0]), &vector(&[1.0])).unwrap_err();
    assert_eq!(err, LinalgError::DimensionMismatch { left: 2, right: 1 });
}

#[test]
fn norm_of_three_four_is_five() {
    assert_relative_eq!(norm(&vector(&[3.0, 4.0])).unwrap(), 5.0);
}

#[test]
fn norm_is_zero_only_for_zero_vector() {
    assert_eq!(norm(&vector(&[0.0, 0.0, 0.0])).unwrap(), 0.0);
    assert!(norm(&vector(&[0.0, 1e-3])).unwrap() > 0.0);
    assert!(norm(&vector(&[-2.0, -7.0])).unwrap() >= 0.0);
}

#[test]
fn norm_of_empty_vector_is_an_error() {
    assert_eq!(norm(&vector(&[])), Err(LinalgError::EmptyInput));
}

// ---------------------------------------------------------------------------
// Largest / second-largest norm
// ---------------------------------------------------------------------------

#[test]
fn largest_norm_prefers_first_occurrence() {
    let vectors = vec![vector(&[3.0, 0.0]), vector(&[0.0, 4.0]), vector(&[0.0, 4.0])];
    let best = largest_norm(&vectors).unwrap();
    assert!(std::ptr::eq(best, &vectors[1]));
    assert_eq!(best.to_vec(), vec![0.0, 4.0]);

    let tied = vec![vector(&[1.0, 0.0]), vector(&[0.0, 2.0]), vector(&[2.0, 0.0])];
    assert_eq!(largest_norm(&tied).unwrap().to_vec(), vec![0.0, 2.0]);
}

#[test]
fn largest_norm_of_empty_list_is_an_error() {
    assert_eq!(largest_norm(&[]), Err(LinalgError::EmptyInput));
}

#[test]
fn second_largest_norm_uses_stable_order() {
    let vectors = vec![vector(&[1.0, 0.0]), vector(&[0.0, 5.0]), vector(&[3.0, 4.0])];
    // norms [1, 5, 5]: the stable sort keeps [0, 5] ahead of [3, 4]
    let second = second_largest_norm(&vectors).unwrap();
    assert!(std::ptr::eq(second, &vectors[2]));

    let distinct = vec![vector(&[1.0]), vector(&[10.0]), vector(&[4.0])];
    assert_eq!(second_largest_norm(&distinct).unwrap().to_vec(), vec![4.0]);
}

#[test]
fn second_largest_norm_needs_two_vectors() {
    assert_eq!(
        second_largest_norm(&[vector(&[1.0])]),
        Err(LinalgError::InsufficientVectors {
            required: 2,
            found: 1
        })
    );
}

// ---------------------------------------------------------------------------
// Scalar multiples and normalization
// ---------------------------------------------------------------------------

#[test]
fn scalar_multiple_examples() {
    assert!(is_scalar_multiple(&vector(&[2.0, 4.0]), &vector(&[1.0, 2.0])).unwrap());
    assert!(!is_scalar_multiple(&vector(&[1.0, 0.0]), &vector(&[0.0, 1.0])).unwrap());
    assert!(is_scalar_multiple(&vector(&[0.0, -3.0]), &vector(&[0.0, 1.0])).unwrap());
}

#[test]
fn zero_vector_is_a_multiple_of_anything() {
    assert!(is_scalar_multiple(&vector(&[0.0, 0.0]), &vector(&[5.0, -1.0])).unwrap());
    assert!(is_scalar_multiple(&vector(&[5.0, -1.0]), &vector(&[0.0, 0.0])).unwrap());
}

#[test]
fn scalar_multiple_length_mismatch_is_an_error() {
    assert!(is_scalar_multiple(&vector(&[1.0]), &vector(&[1.0, 2.0])).is_err());
}

#[test]
fn normalize_gives_unit_vector() {
    let unit = normalize(&vector(&[3.0, 4.0])).unwrap();
    assert_relative_eq!(unit[0], 0.6);
    assert_relative_eq!(unit[1], 0.8);
    assert_relative_eq!(norm(&unit).unwrap(), 1.0);
}

#[test]
fn normalize_zero_vector_is_an_error() {
    assert_eq!(normalize(&vector(&[0.0, 0.0])), Err(LinalgError::ZeroVector));
}

// ---------------------------------------------------------------------------
// Orthogonal projection
// ---------------------------------------------------------------------------

#[test]
fn projection_components_are_orthogonal_and_sum_to_v() {
    let v = vector(&[2.0, -1.0, 3.0]);
    let w = vector(&[1.0, 1.0, 1.0]);
    let (x, y) = orthogonal_projection(&v, &w).unwrap();

    assert!(is_scalar_multiple(&x, &w).unwrap());
    assert_abs_diff_eq!(dot(&y, &w).unwrap(), 0.0, epsilon = 1e-12);
    let sum = &x + &y;
    for i in 0..v.len() {
        assert_abs_diff_eq!(sum[i], v[i], epsilon = 1e-12);
    }
}

#[test]
fn projection_rounds_to_configured_decimals() {
    let cfg = LinalgConfig {
        projection: Precision::Decimals(1),
        ..LinalgConfig::default()
    };
    let v = vector(&[1.0, 0.0]);
    let w = vector(&[1.0, 2.0]);
    // exact parallel component is [0.2, 0.4]
    let (x, y) = orthogonal_projection_with(&v, &w, &cfg).unwrap();
    assert_relative_eq!(x[0], 0.2);
    assert_relative_eq!(x[1], 0.4);
    assert_abs_diff_eq!(dot(&y, &w).unwrap(), 0.0, epsilon = 0.1);

    let w = vector(&[3.0, 0.0]);
    let v = vector(&[1.0 / 3.0, 1.0]);
    let (x, _) = orthogonal_projection_with(&v, &w, &cfg).unwrap();
    assert_eq!(x.to_vec(), vec![0.3, 0.0]);
}

#[test]
fn projection_onto_zero_vector_is_an_error() {
    let err = orthogonal_projection(&vector(&[1.0, 2.0]), &vector(&[0.0, 0.0])).unwrap_err();
    assert_eq!(err, LinalgError::ZeroVector);
}

// ---------------------------------------------------------------------------
// Newton square root
// ---------------------------------------------------------------------------

#[test]
fn square_root_of_hundred() {
    let root = square_root(100.0, 1e-6).unwrap();
    assert_abs_diff_eq!(root, 10.0, epsilon = 1e-6);
}

#[test]
fn square_root_of_small_and_zero_inputs() {
    assert_abs_diff_eq!(square_root(0.25, 1e-12).unwrap(), 0.5, epsilon = 1e-9);
    assert_eq!(square_root(0.0, 1e-6).unwrap(), 0.0);
}

#[test]
fn square_root_rejects_bad_inputs() {
    assert_eq!(
        square_root(-4.0, 1e-6),
        Err(LinalgError::NegativeRadicand { value: -4.0 })
    );
    assert_eq!(
        square_root(4.0, 0.0),
        Err(LinalgError::InvalidTolerance { value: 0.0 })
    );
}

#[test]
fn square_root_respects_iteration_cap() {
    let cfg = LinalgConfig {
        sqrt_max_iterations: 2,
        ..LinalgConfig::default()
    };
    let err = square_root_with(1e12, 1e-6, &cfg).unwrap_err();
    assert!(matches!(err, LinalgError::NotConverged { iterations: 2, .. }));
}
