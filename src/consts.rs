//! Vector constants and polynomial coefficient tables.
//!
//! Every constant is a complete four-lane vector, available on both
//! [`F32x4`] and [`F64x4`] through [`LaneConstants`]. The coefficient tables
//! pack four coefficients into lanes `X..W`, in ascending power order; the
//! evaluators walk them with `broadcast` during Horner evaluation.
//!
//! Numeric values are identical for both widths, rounded to the width.

use crate::simd::{F32x4, F64x4};

/// Named lane vectors shared by the arithmetic kernel and the trigonometric
/// evaluators.
pub trait LaneConstants: Sized {
    const ZERO: Self;
    const NEG_ZERO: Self;
    const ONE: Self;
    const NEG_ONE: Self;
    const EPSILON: Self;
    const INFINITY: Self;

    /// Every bit set in every lane, the "true" mask and the `atan2` sentinel.
    const ALL_BITS: Self;
    /// Integer `1` in the lane bits.
    const LOW_BIT: Self;
    const SIGN_MASK: Self;
    const ABS_MASK: Self;

    const SIGN_MASK_XZ: Self;
    const SIGN_MASK_YW: Self;

    const MASK_X: Self;
    const MASK_Y: Self;
    const MASK_Z: Self;
    const MASK_W: Self;
    const MASK_XY: Self;
    const MASK_ZW: Self;
    const MASK_XYZ: Self;
    const MASK_YZW: Self;
    const MASK_XYZW: Self;

    const UNIT_X: Self;
    const UNIT_Y: Self;
    const UNIT_Z: Self;
    const UNIT_W: Self;

    const PI: Self;
    const PI2: Self;
    /// Leading part of `2pi`; its product with any integer quotient below
    /// `2^16` is exact.
    const PI2_HI: Self;
    /// `2pi - PI2_HI`.
    const PI2_LO: Self;
    const PI_DIV_2: Self;
    const PI_DIV_4: Self;
    const THREE_PI_DIV_4: Self;
    const ONE_DIV_PI: Self;
    const ONE_DIV_2PI: Self;
    const TWO_DIV_PI: Self;

    /// Odd sine series, `x^3..x^9` terms.
    const SIN_COEFFICIENTS_0: Self;
    /// Lane `X` is the `x^11` term of the precise series; lanes `Y..W` are the
    /// `x^3..x^7` terms of the approximate series.
    const SIN_COEFFICIENTS_1: Self;
    /// Even cosine series, `x^2..x^8` terms.
    const COS_COEFFICIENTS_0: Self;
    /// Lane `X` is the `x^10` term of the precise series; lanes `Y..W` are the
    /// `x^2..x^6` terms of the approximate series.
    const COS_COEFFICIENTS_1: Self;

    /// Denominator of the tangent rational approximation.
    const TAN_COEFFICIENTS_0: Self;
    /// Lane `X` closes the denominator, lanes `Y..W` form the numerator.
    const TAN_COEFFICIENTS_1: Self;
    /// `[pi/2 hi, pi/2 lo, near-zero threshold, 2/pi]`.
    const TAN_CONSTANTS: Self;
    /// `[t0, t1, t2, 1/pi]` for `tan(x) ~ x(t0 + t1 x^2) / (t2 - x^2)`.
    const TAN_APPROX_COEFFICIENTS: Self;

    /// Arctangent series, `x^2..x^8` terms.
    const ATAN_COEFFICIENTS_0: Self;
    /// Arctangent series, `x^10..x^16` terms.
    const ATAN_COEFFICIENTS_1: Self;
    /// Short arctangent series, `x^3..x^9` terms.
    const ATAN_APPROX_COEFFICIENTS: Self;
    /// Leading `x` term of the short arctangent series.
    const ATAN_APPROX_SCALE: Self;
}

macro_rules! lane_constants {
    (
        $vector:ident, $scalar:ident, $bits:ident,
        pi2_hi: $pi2_hi:expr, pi2_lo: $pi2_lo:expr,
        pi_div_2_hi: $hi:expr, pi_div_2_lo: $lo:expr
    ) => {
        impl LaneConstants for $vector {
            const ZERO: Self = $vector::splat(0.0);
            const NEG_ZERO: Self = $vector::splat(-0.0);
            const ONE: Self = $vector::splat(1.0);
            const NEG_ONE: Self = $vector::splat(-1.0);
            const EPSILON: Self = $vector::splat($scalar::EPSILON);
            const INFINITY: Self = $vector::splat($scalar::INFINITY);

            const ALL_BITS: Self = $vector::splat_bits($bits::MAX);
            const LOW_BIT: Self = $vector::splat_bits(1);
            const SIGN_MASK: Self = $vector::splat_bits(!($bits::MAX >> 1));
            const ABS_MASK: Self = $vector::splat_bits($bits::MAX >> 1);

            const SIGN_MASK_XZ: Self =
                $vector::from_bits([!($bits::MAX >> 1), 0, !($bits::MAX >> 1), 0]);
            const SIGN_MASK_YW: Self =
                $vector::from_bits([0, !($bits::MAX >> 1), 0, !($bits::MAX >> 1)]);

            const MASK_X: Self = $vector::from_bits([$bits::MAX, 0, 0, 0]);
            const MASK_Y: Self = $vector::from_bits([0, $bits::MAX, 0, 0]);
            const MASK_Z: Self = $vector::from_bits([0, 0, $bits::MAX, 0]);
            const MASK_W: Self = $vector::from_bits([0, 0, 0, $bits::MAX]);
            const MASK_XY: Self = $vector::from_bits([$bits::MAX, $bits::MAX, 0, 0]);
            const MASK_ZW: Self = $vector::from_bits([0, 0, $bits::MAX, $bits::MAX]);
            const MASK_XYZ: Self = $vector::from_bits([$bits::MAX, $bits::MAX, $bits::MAX, 0]);
            const MASK_YZW: Self = $vector::from_bits([0, $bits::MAX, $bits::MAX, $bits::MAX]);
            const MASK_XYZW: Self = $vector::splat_bits($bits::MAX);

            const UNIT_X: Self = $vector::new(1.0, 0.0, 0.0, 0.0);
            const UNIT_Y: Self = $vector::new(0.0, 1.0, 0.0, 0.0);
            const UNIT_Z: Self = $vector::new(0.0, 0.0, 1.0, 0.0);
            const UNIT_W: Self = $vector::new(0.0, 0.0, 0.0, 1.0);

            const PI: Self = $vector::splat(std::$scalar::consts::PI);
            const PI2: Self = $vector::splat(std::$scalar::consts::TAU);
            const PI2_HI: Self = $vector::splat($pi2_hi);
            const PI2_LO: Self = $vector::splat($pi2_lo);
            const PI_DIV_2: Self = $vector::splat(std::$scalar::consts::FRAC_PI_2);
            const PI_DIV_4: Self = $vector::splat(std::$scalar::consts::FRAC_PI_4);
            const THREE_PI_DIV_4: Self = $vector::splat(3.0 * std::$scalar::consts::FRAC_PI_4);
            const ONE_DIV_PI: Self = $vector::splat(std::$scalar::consts::FRAC_1_PI);
            const ONE_DIV_2PI: Self = $vector::splat(std::$scalar::consts::FRAC_1_PI / 2.0);
            const TWO_DIV_PI: Self = $vector::splat(std::$scalar::consts::FRAC_2_PI);

            const SIN_COEFFICIENTS_0: Self =
                $vector::new(-0.16666667, 0.0083333310, -0.00019840874, 2.7525562e-06);
            const SIN_COEFFICIENTS_1: Self =
                $vector::new(-2.3889859e-08, -0.16665852, 0.0083139502, -0.00018524670);
            const COS_COEFFICIENTS_0: Self =
                $vector::new(-0.5, 0.041666638, -0.0013888378, 2.4760495e-05);
            const COS_COEFFICIENTS_1: Self =
                $vector::new(-2.6051615e-07, -0.49992746, 0.041493919, -0.0012712436);

            const TAN_COEFFICIENTS_0: Self =
                $vector::new(1.0, -4.667168334e-1, 2.566383229e-2, -3.118153191e-4);
            const TAN_COEFFICIENTS_1: Self =
                $vector::new(4.981943399e-7, -1.333835001e-1, 3.424887824e-3, -1.786170734e-5);
            const TAN_CONSTANTS: Self =
                $vector::new($hi, $lo, 0.000244140625, std::$scalar::consts::FRAC_2_PI);
            const TAN_APPROX_COEFFICIENTS: Self = $vector::new(
                2.484,
                -1.954923183e-1,
                2.467401101,
                std::$scalar::consts::FRAC_1_PI,
            );

            const ATAN_COEFFICIENTS_0: Self =
                $vector::new(-0.3333314528, 0.1999355085, -0.1420889944, 0.1065626393);
            const ATAN_COEFFICIENTS_1: Self =
                $vector::new(-0.0752896400, 0.0429096138, -0.0161657367, 0.0028662257);
            const ATAN_APPROX_COEFFICIENTS: Self =
                $vector::new(-0.3302995, 0.1801410, -0.0851330, 0.0208351);
            const ATAN_APPROX_SCALE: Self = $vector::splat(0.9998660);
        }
    };
}

// pi/2 as the nearest float plus the residual, for two-step reduction.
// The single-precision 2pi head keeps 8 significant bits so the reduction
// stays exact without FMA.
lane_constants!(
    F32x4, f32, u32,
    pi2_hi: 6.28125, pi2_lo: 0.0019353071795864769,
    pi_div_2_hi: 1.5707963705062866, pi_div_2_lo: -4.371139000186243e-8
);
lane_constants!(
    F64x4, f64, u64,
    pi2_hi: 6.283185307179586, pi2_lo: 2.4492935982947064e-16,
    pi_div_2_hi: 1.5707963267948966, pi_div_2_lo: 6.123233995736766e-17
);

/// Implements [`LaneConstants`] for a register-backed wrapper
/// `$wrapper<const FMA: bool>` by converting every constant of `$inner` with
/// the wrapper's `const fn lift_const`.
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
macro_rules! forward_lane_constants {
    ($wrapper:ident, $inner:ty) => {
        forward_lane_constants!(
            @impl $wrapper, $inner,
            ZERO, NEG_ZERO, ONE, NEG_ONE, EPSILON, INFINITY,
            ALL_BITS, LOW_BIT, SIGN_MASK, ABS_MASK, SIGN_MASK_XZ, SIGN_MASK_YW,
            MASK_X, MASK_Y, MASK_Z, MASK_W, MASK_XY, MASK_ZW, MASK_XYZ, MASK_YZW, MASK_XYZW,
            UNIT_X, UNIT_Y, UNIT_Z, UNIT_W,
            PI, PI2, PI2_HI, PI2_LO, PI_DIV_2, PI_DIV_4, THREE_PI_DIV_4,
            ONE_DIV_PI, ONE_DIV_2PI, TWO_DIV_PI,
            SIN_COEFFICIENTS_0, SIN_COEFFICIENTS_1, COS_COEFFICIENTS_0, COS_COEFFICIENTS_1,
            TAN_COEFFICIENTS_0, TAN_COEFFICIENTS_1, TAN_CONSTANTS, TAN_APPROX_COEFFICIENTS,
            ATAN_COEFFICIENTS_0, ATAN_COEFFICIENTS_1, ATAN_APPROX_COEFFICIENTS, ATAN_APPROX_SCALE
        );
    };
    (@impl $wrapper:ident, $inner:ty, $($name:ident),+) => {
        impl<const FMA: bool> $crate::consts::LaneConstants for $wrapper<FMA> {
            $(
                const $name: Self =
                    Self::lift_const(<$inner as $crate::consts::LaneConstants>::$name);
            )+
        }
    };
}

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub(crate) use forward_lane_constants;
