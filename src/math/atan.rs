//! Arctangent and two-argument arctangent.
//!
//! `atan` keeps the polynomial input inside `[-1, 1]` with
//! `atan(x) = sign(x) pi/2 - atan(1/x)` for `|x| > 1`. The correction is
//! tracked as a three-state lane (`0`, `1`, `-1`) rather than a mask.
//!
//! `atan2` builds every special case of the quadrant table unconditionally
//! and blends them together. Lanes that need the general formula are marked
//! with the `ALL_BITS` sentinel until the last select.

use num::Float;

use super::poly::horner;
use super::run_unary;
use crate::simd::{LaneKernel, SimdLanes};

/// Series input and correction sign for the reciprocal identity.
#[inline(always)]
fn reflect<V: SimdLanes>(v: V) -> (V, V) {
    let in_domain = v.abs().cmp_le(V::ONE);
    let sign = V::select(v.cmp_gt(V::ONE), V::ONE, V::NEG_ONE);
    let sign = V::select(in_domain, V::ZERO, sign);
    let x = V::select(in_domain, v, v.reciprocal());
    (x, sign)
}

#[inline(always)]
fn unreflect<V: SimdLanes>(series: V, sign: V) -> V {
    let corrected = sign.mul_sub(V::PI_DIV_2, series);
    V::select(sign.cmp_eq(V::ZERO), series, corrected)
}

#[inline(always)]
pub(crate) fn atan_poly<V: SimdLanes>(v: V) -> V {
    let (x, sign) = reflect(v);
    let x2 = x.square();

    let acc = horner(V::ATAN_COEFFICIENTS_1.broadcast(3), x2, V::ATAN_COEFFICIENTS_1, 0..3);
    let acc = horner(acc, x2, V::ATAN_COEFFICIENTS_0, 0..4);
    let series = acc.mul_add(x2, V::ONE).mul(x);

    unreflect(series, sign)
}

#[inline(always)]
pub(crate) fn atan_approx_poly<V: SimdLanes>(v: V) -> V {
    let (x, sign) = reflect(v);
    let x2 = x.square();

    let acc = horner(
        V::ATAN_APPROX_COEFFICIENTS.broadcast(3),
        x2,
        V::ATAN_APPROX_COEFFICIENTS,
        0..3,
    );
    let series = acc.mul_add(x2, V::ATAN_APPROX_SCALE).mul(x);

    unreflect(series, sign)
}

#[inline(always)]
pub(crate) fn atan2_poly<V: SimdLanes>(y: V, x: V) -> V {
    let y_sign = y.extract_sign();
    let x_positive = x.extract_sign().eq_bits(V::ZERO);

    let pi = V::PI.or(y_sign);
    let pi_div_2 = V::PI_DIV_2.or(y_sign);
    let pi_div_4 = V::PI_DIV_4.or(y_sign);
    let three_pi_div_4 = V::THREE_PI_DIV_4.or(y_sign);

    let y_zero = y.cmp_eq(V::ZERO);
    let x_zero = x.cmp_eq(V::ZERO);
    let y_infinite = y.is_infinite();
    let x_infinite = x.is_infinite();

    let on_x_axis = V::select(x_positive, y_sign, pi);
    let on_y_axis = V::select(x_zero, pi_div_2, V::ALL_BITS);
    let finite_y = V::select(y_zero, on_x_axis, on_y_axis);

    let diagonal = V::select(x_positive, pi_div_4, three_pi_div_4);
    let infinite_y = V::select(x_infinite, diagonal, pi_div_2);

    let special = V::select(y_infinite, infinite_y, finite_y);
    let use_general = special.eq_bits(V::ALL_BITS);

    let offset = V::select(x_positive, V::NEG_ZERO, pi);
    let general = atan_poly(y.div(x)).add(offset);
    let result = V::select(use_general, general, special);

    // a NaN operand beats every special case
    let unordered = y.is_nan().or(x.is_nan());
    V::select(unordered, y.add(x), result)
}

unary_kernel!(Atan => atan_poly);
unary_kernel!(AtanApprox => atan_approx_poly);

/// `atan2(a, b)` in the first output, `b` in the second.
pub(crate) struct Atan2;

impl LaneKernel for Atan2 {
    #[inline(always)]
    fn apply<V: SimdLanes>(&self, a: V, b: V) -> (V, V) {
        (atan2_poly(a, b), b)
    }
}

/// Arctangent of each lane, absolute error below `1e-6`.
#[inline]
pub fn atan<V: SimdLanes>(v: V) -> V {
    if V::is_accelerated() {
        run_unary(&Atan, v)
    } else {
        v.map(Float::atan)
    }
}

/// Arctangent of each lane, absolute error below `1e-4`.
#[inline]
pub fn atan_approx<V: SimdLanes>(v: V) -> V {
    if V::is_accelerated() {
        run_unary(&AtanApprox, v)
    } else {
        atan(v)
    }
}

/// Angle of the point `(x, y)` in `[-pi, pi]`, lane by lane.
///
/// Signed zeros and infinities follow the usual `atan2` table: the sign of
/// `y` picks the half plane, the sign of `x` picks `0` or `pi` on the axis.
#[inline]
pub fn atan2<V: SimdLanes>(y: V, x: V) -> V {
    if V::is_accelerated() {
        V::run(&Atan2, y, x).0
    } else {
        y.zip_map(x, Float::atan2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simd::{F32x4, F64x4};
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    fn assert_abs(got: f64, want: f64, tolerance: f64, context: &str) {
        if got.is_nan() && want.is_nan() {
            return;
        }
        assert!(
            (got - want).abs() <= tolerance,
            "{context}: got {got}, expected {want} (max error {tolerance})"
        );
    }

    fn corpus() -> Vec<f64> {
        let mut values: Vec<f64> = (0..=800).map(|i| -20.0 + 40.0 * i as f64 / 800.0).collect();
        values.extend([0.0, -0.0, 1.0, -1.0, 1e-8, -1e-8, 1e8, -1e8, 1e300, -1e300]);
        values
    }

    #[test]
    fn test_atan_poly() {
        for chunk in corpus().chunks(4) {
            let wide = atan_poly(F64x4::from_slice(chunk));
            let narrow: Vec<f32> = chunk.iter().map(|&x| x as f32).collect();
            let single = atan_poly(F32x4::from_slice(&narrow));
            for (lane, &x) in chunk.iter().enumerate() {
                assert_abs(wide.extract(lane), x.atan(), 1e-6, "atan f64");
                let xs = narrow[lane] as f64;
                assert_abs(single.extract(lane) as f64, xs.atan(), 1e-6, "atan f32");
            }
        }
    }

    #[test]
    fn test_atan_approx_poly() {
        for chunk in corpus().chunks(4) {
            let wide = atan_approx_poly(F64x4::from_slice(chunk));
            for (lane, &x) in chunk.iter().enumerate() {
                assert_abs(wide.extract(lane), x.atan(), 1e-4, "atan_approx f64");
            }
        }
    }

    #[test]
    fn test_atan_limits() {
        let v = F64x4::new(f64::INFINITY, f64::NEG_INFINITY, f64::NAN, 0.0);
        let result = atan_poly(v).to_array();
        assert_abs(result[0], FRAC_PI_2, 1e-15, "atan(inf)");
        assert_abs(result[1], -FRAC_PI_2, 1e-15, "atan(-inf)");
        assert!(result[2].is_nan());
        assert_eq!(result[3], 0.0);
    }

    #[test]
    fn test_atan2_quadrant_table() {
        let cases: [(f64, f64, f64); 16] = [
            (0.0, 1.0, 0.0),
            (1.0, 0.0, FRAC_PI_2),
            (0.0, -1.0, PI),
            (-1.0, 0.0, -FRAC_PI_2),
            (f64::INFINITY, f64::INFINITY, FRAC_PI_4),
            (f64::INFINITY, f64::NEG_INFINITY, 3.0 * FRAC_PI_4),
            (f64::NEG_INFINITY, f64::INFINITY, -FRAC_PI_4),
            (f64::NEG_INFINITY, f64::NEG_INFINITY, -3.0 * FRAC_PI_4),
            (f64::INFINITY, 5.0, FRAC_PI_2),
            (f64::NEG_INFINITY, -5.0, -FRAC_PI_2),
            (-0.0, -1.0, -PI),
            (1.0, 1.0, FRAC_PI_4),
            (1.0, -1.0, 3.0 * FRAC_PI_4),
            (-1.0, -1.0, -3.0 * FRAC_PI_4),
            (3.0, f64::NEG_INFINITY, PI),
            (-3.0, f64::INFINITY, -0.0),
        ];

        for chunk in cases.chunks(4) {
            let y = F64x4::from_array(std::array::from_fn(|i| chunk[i].0));
            let x = F64x4::from_array(std::array::from_fn(|i| chunk[i].1));
            let result = atan2_poly(y, x);
            for (lane, &(yv, xv, want)) in chunk.iter().enumerate() {
                let got = result.extract(lane);
                assert_abs(got, want, 1e-6, &format!("atan2({yv}, {xv})"));
                assert_eq!(got.is_sign_negative(), want.is_sign_negative(), "sign of atan2({yv}, {xv})");
            }
        }
    }

    #[test]
    fn test_atan2_signed_zeros() {
        let y = F32x4::new(0.0, -0.0, 0.0, -0.0);
        let x = F32x4::new(0.0, 0.0, -0.0, -0.0);
        let result = atan2_poly(y, x).to_array();
        assert_eq!(result[0].to_bits(), 0.0f32.to_bits());
        assert_eq!(result[1].to_bits(), (-0.0f32).to_bits());
        assert_eq!(result[2], std::f32::consts::PI);
        assert_eq!(result[3], -std::f32::consts::PI);
    }

    #[test]
    fn test_atan2_nan_propagates() {
        let y = F64x4::new(f64::NAN, 0.0, f64::NAN, f64::INFINITY);
        let x = F64x4::new(0.0, f64::NAN, f64::INFINITY, f64::NAN);
        assert!(atan2_poly(y, x).to_array().iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_atan2_sweep_matches_std() {
        for i in 0..360 {
            let angle = -PI + (i as f64 + 0.5) * (2.0 * PI / 360.0);
            let radii = [0.5, 1.0, 7.0, 1e4];
            let y = F64x4::from_array(radii.map(|r| r * angle.sin()));
            let x = F64x4::from_array(radii.map(|r| r * angle.cos()));
            let result = atan2_poly(y, x);
            for lane in 0..4 {
                let want = y.extract(lane).atan2(x.extract(lane));
                assert_abs(result.extract(lane), want, 1e-6, "atan2 sweep");
            }
        }
    }
}
