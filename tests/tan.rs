//! Precision comparison tests between scalar and lane tangent implementations.

use std::f64::consts::{FRAC_PI_2, PI};

use lanewise::{F32x4, F64x4, LaneMath, LaneSlice, SimdLanes};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn relative_error(got: f64, want: f64) -> f64 {
    if want == 0.0 {
        got.abs()
    } else {
        ((got - want) / want).abs()
    }
}

fn distance_to_pole(x: f64) -> f64 {
    let turns = (x - FRAC_PI_2) / PI;
    (turns - turns.round()).abs() * PI
}

/// Test precision of `tan` against the scalar implementation away from the poles.
#[test]
fn test_tan_precision_random_inputs() {
    let mut rng = StdRng::seed_from_u64(12345);
    let inputs: Vec<f64> = (0..2000)
        .map(|_| rng.random_range(-20.0..=20.0))
        .filter(|&x| distance_to_pole(x) > 0.05)
        .collect();

    let results = inputs.tan();
    let mut max_rel_error = 0.0f64;
    for (&x, &got) in inputs.iter().zip(&results) {
        let error = relative_error(got, x.tan());
        max_rel_error = max_rel_error.max(error);
        assert!(error < 1e-5, "tan({x}) = {got}, expected {}, rel error {error:.2e}", x.tan());
    }
    println!("f64 tan: max relative error {max_rel_error:.2e} over {} inputs", inputs.len());

    let narrow: Vec<f32> = (0..2000).map(|_| rng.random_range(-1.4f32..=1.4)).collect();
    let results = narrow.tan();
    for (&x, &got) in narrow.iter().zip(&results) {
        let want = (x as f64).tan();
        let error = relative_error(got as f64, want);
        assert!(error < 1e-5, "tan({x}) = {got}, expected {want}, rel error {error:.2e}");
    }
}

/// `tan(0)` is exactly zero and the pole changes sign.
#[test]
fn test_tan_zero_and_pole() {
    assert_eq!(F32x4::splat(0.0).tan().to_array(), [0.0; 4]);
    assert_eq!(F64x4::splat(0.0).tan().to_array(), [0.0; 4]);

    let approaching = F64x4::new(FRAC_PI_2 - 1e-3, FRAC_PI_2 - 1e-6, FRAC_PI_2 + 1e-6, FRAC_PI_2 + 1e-3);
    let result = approaching.tan().to_array();
    println!("tan near pi/2: {result:?}");
    assert!(result[0] > 0.0 && result[1] > result[0]);
    assert!(result[3] < 0.0 && result[2] < result[3]);
}

/// Test the approximate tier on `[-1.2, 1.2]`.
#[test]
fn test_tan_approx_precision() {
    let inputs: Vec<f32> = (0..=2400).map(|i| -1.2 + i as f32 * 0.001).collect();
    let results = inputs.tan_approx();

    let mut max_rel_error = 0.0f64;
    for (&x, &got) in inputs.iter().zip(&results) {
        let want = (x as f64).tan();
        if want.abs() < 1e-6 {
            continue;
        }
        let error = relative_error(got as f64, want);
        max_rel_error = max_rel_error.max(error);
        assert!(error < 1e-2, "tan_approx({x}) = {got}, expected {want}");
    }
    println!("f32 tan_approx: max relative error {max_rel_error:.2e}");
}

/// Non-finite inputs propagate NaN.
#[test]
fn test_tan_non_finite() {
    let v = F64x4::new(f64::NAN, f64::INFINITY, f64::NEG_INFINITY, 1.0);
    let result = v.tan().to_array();
    assert!(result[..3].iter().all(|x| x.is_nan()));
    assert!((result[3] - 1.0f64.tan()).abs() < 1e-6);
}
