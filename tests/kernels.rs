//! Whole-kernel runs through `SimdLanes::run`.
//!
//! A kernel run on the register-resident backend must give the same bits as
//! the same kernel applied one dispatched operation at a time.

use lanewise::{F32x4, F64x4, LaneKernel, LaneMath, LaneScalar, SimdLanes};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Touches every primitive of `SimdLanes` whose result is exact.
struct Elementwise;

impl LaneKernel for Elementwise {
    #[inline(always)]
    fn apply<V: SimdLanes>(&self, a: V, b: V) -> (V, V) {
        let sum = a.add(b).mul(a.sub(b)).div(b.abs().add(V::ONE));
        let bounded = sum.min(V::PI).max(V::NEG_ONE).sqrt();
        let rounded = a.round().add(b.truncate());
        let bits = a.and(b).or(a.xor(V::SIGN_MASK)).and_not(b);
        let masks = a.cmp_lt(b).or(a.cmp_ge(V::ZERO)).xor(a.cmp_ne(b));
        let ints = a.convert_to_int_bits().eq_bits(b.convert_to_int_bits());
        let picked = V::select(a.cmp_le(b), rounded, bounded);
        let spread = picked.broadcast(1).horizontal_add(bits.broadcast(3));
        let equal = a.cmp_eq(b).and(a.cmp_gt(V::NEG_ONE));
        let first = V::select(masks, spread, picked).add(V::select(equal, V::ONE, V::ZERO));
        (first, ints.or(bits))
    }
}

/// Chains the fused forms, which the backend and the dispatched path both
/// fuse exactly when FMA was detected.
struct Fused;

impl LaneKernel for Fused {
    #[inline(always)]
    fn apply<V: SimdLanes>(&self, a: V, b: V) -> (V, V) {
        let x = a.mul_add(b, V::PI_DIV_4);
        let y = x.neg_mul_add(a, b);
        (y.mul_sub(x, a), x.mul_add(y, b))
    }
}

fn same_bits<V: SimdLanes>(a: V, b: V) -> bool {
    let (a, b) = (a.to_array(), b.to_array());
    (0..4).all(|i| {
        LaneScalar::lane_bits(a[i]) == LaneScalar::lane_bits(b[i])
            || (num::Float::is_nan(a[i]) && num::Float::is_nan(b[i]))
    })
}

fn assert_run_matches<V: SimdLanes, K: LaneKernel>(name: &str, kernel: &K, a: V, b: V) {
    let (x, y) = V::run(kernel, a, b);
    let (x_ref, y_ref) = kernel.apply(a, b);
    assert!(same_bits(x, x_ref), "{name} first output for {a:?}, {b:?}: {x:?} vs {x_ref:?}");
    assert!(same_bits(y, y_ref), "{name} second output for {a:?}, {b:?}: {y:?} vs {y_ref:?}");
}

/// Raw bit patterns, specials, rounding ties and ordinary values.
fn lane(rng: &mut StdRng) -> f64 {
    match rng.random_range(0..6) {
        0 => f64::from_bits(rng.random::<u64>()),
        1 => [0.0, -0.0, f64::INFINITY, f64::NEG_INFINITY, f64::NAN, 5e-324][rng.random_range(0..6)],
        2 => rng.random_range(-3.0..3.0f64).round() + 0.5,
        _ => rng.random_range(-100.0..100.0),
    }
}

fn lane32(rng: &mut StdRng) -> f32 {
    if rng.random_range(0..6) == 0 {
        f32::from_bits(rng.random::<u32>())
    } else {
        lane(rng) as f32
    }
}

#[test]
fn test_run_matches_apply_f32() {
    let mut rng = StdRng::seed_from_u64(12345);
    for _ in 0..2000 {
        let a = F32x4::from_array(std::array::from_fn(|_| lane32(&mut rng)));
        let b = F32x4::from_array(std::array::from_fn(|_| lane32(&mut rng)));
        assert_run_matches("elementwise", &Elementwise, a, b);
        assert_run_matches("fused", &Fused, a, b);
    }
}

#[test]
fn test_run_matches_apply_f64() {
    let mut rng = StdRng::seed_from_u64(12345);
    for _ in 0..2000 {
        let a = F64x4::from_array(std::array::from_fn(|_| lane(&mut rng)));
        let b = F64x4::from_array(std::array::from_fn(|_| lane(&mut rng)));
        assert_run_matches("elementwise", &Elementwise, a, b);
        assert_run_matches("fused", &Fused, a, b);
    }
}

/// A kernel calling the transcendental evaluators composes with them.
struct SinTimesAtan;

impl LaneKernel for SinTimesAtan {
    #[inline(always)]
    fn apply<V: SimdLanes>(&self, a: V, b: V) -> (V, V) {
        (a.sin().mul(b.atan()), b)
    }
}

#[test]
fn test_run_composes_with_lane_math() {
    let a = F64x4::new(-2.0, 0.5, 3.0, 10.0);
    let b = F64x4::new(1.0, -4.0, 0.25, 100.0);
    let (result, passthrough) = F64x4::run(&SinTimesAtan, a, b);
    assert_eq!(passthrough.to_array(), b.to_array());
    for i in 0..4 {
        let want = a.extract(i).sin() * b.extract(i).atan();
        assert!((result.extract(i) - want).abs() < 1e-6, "lane {i}");
    }
}
