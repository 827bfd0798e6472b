//! Sine and cosine, precise and approximate.
//!
//! Both functions reduce with [`mod_2pi`](super::reduce::mod_2pi), fold into
//! `[-pi/2, pi/2]` and evaluate a minimax polynomial in the squared angle:
//!
//! | Function | Precise | Approximate |
//! |----------|---------|-------------|
//! | sin | odd, degree 11 | odd, degree 7 |
//! | cos | even, degree 10 | even, degree 6 |
//!
//! Sine multiplies the series by the folded angle, cosine by the reflection
//! sign. When the vector type has no intrinsic tier, each lane goes through
//! `std` instead; the two paths agree to the polynomial's error, not bitwise.

use num::Float;

use super::poly::horner;
use super::reduce::{reduce_and_fold, Folded};
use super::run_unary;
use crate::simd::{LaneKernel, SimdLanes};

#[inline(always)]
fn sin_series<V: SimdLanes>(x: V) -> V {
    let x2 = x.square();
    let acc = horner(V::SIN_COEFFICIENTS_1.broadcast(0), x2, V::SIN_COEFFICIENTS_0, 0..4);
    acc.mul_add(x2, V::ONE).mul(x)
}

#[inline(always)]
fn sin_series_approx<V: SimdLanes>(x: V) -> V {
    let x2 = x.square();
    let acc = horner(V::SIN_COEFFICIENTS_1.broadcast(3), x2, V::SIN_COEFFICIENTS_1, 1..3);
    acc.mul_add(x2, V::ONE).mul(x)
}

#[inline(always)]
fn cos_series<V: SimdLanes>(folded: &Folded<V>) -> V {
    let x2 = folded.angle.square();
    let acc = horner(V::COS_COEFFICIENTS_1.broadcast(0), x2, V::COS_COEFFICIENTS_0, 0..4);
    acc.mul_add(x2, V::ONE).mul(folded.cos_sign())
}

#[inline(always)]
fn cos_series_approx<V: SimdLanes>(folded: &Folded<V>) -> V {
    let x2 = folded.angle.square();
    let acc = horner(V::COS_COEFFICIENTS_1.broadcast(3), x2, V::COS_COEFFICIENTS_1, 1..3);
    acc.mul_add(x2, V::ONE).mul(folded.cos_sign())
}

#[inline(always)]
pub(crate) fn sin_poly<V: SimdLanes>(v: V) -> V {
    sin_series(reduce_and_fold(v).angle)
}

#[inline(always)]
pub(crate) fn sin_approx_poly<V: SimdLanes>(v: V) -> V {
    sin_series_approx(reduce_and_fold(v).angle)
}

#[inline(always)]
pub(crate) fn cos_poly<V: SimdLanes>(v: V) -> V {
    cos_series(&reduce_and_fold(v))
}

#[inline(always)]
pub(crate) fn cos_approx_poly<V: SimdLanes>(v: V) -> V {
    cos_series_approx(&reduce_and_fold(v))
}

#[inline(always)]
pub(crate) fn sin_cos_poly<V: SimdLanes>(v: V) -> (V, V) {
    let folded = reduce_and_fold(v);
    (sin_series(folded.angle), cos_series(&folded))
}

#[inline(always)]
pub(crate) fn sin_cos_approx_poly<V: SimdLanes>(v: V) -> (V, V) {
    let folded = reduce_and_fold(v);
    (sin_series_approx(folded.angle), cos_series_approx(&folded))
}

unary_kernel!(Sin => sin_poly);
unary_kernel!(SinApprox => sin_approx_poly);
unary_kernel!(Cos => cos_poly);
unary_kernel!(CosApprox => cos_approx_poly);

/// Sine in the first output, cosine in the second.
pub(crate) struct SinCos;

impl LaneKernel for SinCos {
    #[inline(always)]
    fn apply<V: SimdLanes>(&self, a: V, _: V) -> (V, V) {
        sin_cos_poly(a)
    }
}

pub(crate) struct SinCosApprox;

impl LaneKernel for SinCosApprox {
    #[inline(always)]
    fn apply<V: SimdLanes>(&self, a: V, _: V) -> (V, V) {
        sin_cos_approx_poly(a)
    }
}

/// Sine of each lane, absolute error below `1e-6` for `|v| <= 100pi`.
#[inline]
pub fn sin<V: SimdLanes>(v: V) -> V {
    if V::is_accelerated() {
        run_unary(&Sin, v)
    } else {
        v.map(Float::sin)
    }
}

/// Sine of each lane, absolute error below `1e-3`.
#[inline]
pub fn sin_approx<V: SimdLanes>(v: V) -> V {
    if V::is_accelerated() {
        run_unary(&SinApprox, v)
    } else {
        sin(v)
    }
}

/// Cosine of each lane, absolute error below `1e-6` for `|v| <= 100pi`.
#[inline]
pub fn cos<V: SimdLanes>(v: V) -> V {
    if V::is_accelerated() {
        run_unary(&Cos, v)
    } else {
        v.map(Float::cos)
    }
}

/// Cosine of each lane, absolute error below `1e-3`.
#[inline]
pub fn cos_approx<V: SimdLanes>(v: V) -> V {
    if V::is_accelerated() {
        run_unary(&CosApprox, v)
    } else {
        cos(v)
    }
}

/// Sine and cosine from a single reduction.
#[inline]
pub fn sin_cos<V: SimdLanes>(v: V) -> (V, V) {
    if V::is_accelerated() {
        V::run(&SinCos, v, v)
    } else {
        (v.map(Float::sin), v.map(Float::cos))
    }
}

#[inline]
pub fn sin_cos_approx<V: SimdLanes>(v: V) -> (V, V) {
    if V::is_accelerated() {
        V::run(&SinCosApprox, v, v)
    } else {
        sin_cos(v)
    }
}
