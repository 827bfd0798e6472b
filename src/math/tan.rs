//! Tangent, precise and approximate.
//!
//! The precise form reduces by `pi/2` with a two-constant split, evaluates a
//! rational approximation `n(r) / d(r)` of the reduced angle and, for odd
//! quotients, returns `-d/n` (that is `-cot r`) instead. Lanes whose reduced
//! angle is within `2^-12` of zero skip the rational form and use `r / 1`.
//!
//! The approximate form reduces by `pi` and evaluates one cheap ratio,
//! `r (t0 + t1 r^2) / (t2 - r^2)`, using the approximate reciprocal.

use num::Float;

use super::poly::horner;
use super::run_unary;
use crate::simd::SimdLanes;

#[inline(always)]
pub(crate) fn tan_poly<V: SimdLanes>(v: V) -> V {
    let constants = V::TAN_CONSTANTS;

    let quotient = v.mul(constants.broadcast(3)).round();
    let reduced = quotient.neg_mul_add(constants.broadcast(0), v);
    let reduced = quotient.neg_mul_add(constants.broadcast(1), reduced);
    let r2 = reduced.square();

    let even = quotient
        .abs()
        .convert_to_int_bits()
        .and(V::LOW_BIT)
        .eq_bits(V::ZERO);

    let numerator = horner(V::TAN_COEFFICIENTS_1.broadcast(3), r2, V::TAN_COEFFICIENTS_1, 1..3);
    let numerator = reduced.mul(r2).mul_add(numerator, reduced);
    let denominator = horner(V::TAN_COEFFICIENTS_1.broadcast(0), r2, V::TAN_COEFFICIENTS_0, 0..4);

    let near_zero = reduced.in_bounds(constants.broadcast(2));
    let numerator = V::select(near_zero, reduced, numerator);
    let denominator = V::select(near_zero, V::ONE, denominator);

    let tangent = numerator.div(denominator);
    let cotangent = denominator.div(numerator.negate());
    let result = V::select(even, tangent, cotangent);

    // tan(+-0) is the input zero itself
    V::select(v.cmp_eq(V::ZERO), v, result)
}

#[inline(always)]
pub(crate) fn tan_approx_poly<V: SimdLanes>(v: V) -> V {
    let t = V::TAN_APPROX_COEFFICIENTS;

    let quotient = v.mul(t.broadcast(3)).round();
    let reduced = quotient.neg_mul_add(V::PI, v);
    let r2 = reduced.square();

    let numerator = r2.mul_add(reduced.mul(t.broadcast(1)), reduced.mul(t.broadcast(0)));
    let denominator = t.broadcast(2).sub(r2);
    numerator.mul(denominator.reciprocal_approx())
}

unary_kernel!(Tan => tan_poly);
unary_kernel!(TanApprox => tan_approx_poly);

/// Tangent of each lane, relative error below `1e-5` away from the poles.
///
/// Lanes at odd multiples of `pi/2` give large finite values whose sign
/// flips across the pole.
#[inline]
pub fn tan<V: SimdLanes>(v: V) -> V {
    if V::is_accelerated() {
        run_unary(&Tan, v)
    } else {
        v.map(Float::tan)
    }
}

/// Tangent of each lane, relative error below `1e-2` on `[-1.2, 1.2]`.
#[inline]
pub fn tan_approx<V: SimdLanes>(v: V) -> V {
    if V::is_accelerated() {
        run_unary(&TanApprox, v)
    } else {
        tan(v)
    }
}
