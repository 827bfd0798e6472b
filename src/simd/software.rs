//! Portable lane kernels.
//!
//! These run whenever the intrinsic tier for a vector type is missing, and
//! double as the reference the intrinsic paths are tested against. Each
//! kernel reproduces the x86 instruction it stands in for, including the
//! NaN and signed-zero behaviour of `min`/`max`, unordered `!=`, all-ones
//! comparison masks and the integer-indefinite conversion result.

use num::Zero;

use super::traits::{LaneScalar, LANE_COUNT};

pub(crate) type Lanes<T> = [T; LANE_COUNT];

#[inline(always)]
fn mask<T: LaneScalar>(condition: bool) -> T {
    let zero = <T::Bits as Zero>::zero();
    T::from_lane_bits(if condition { !zero } else { zero })
}

#[inline(always)]
fn zip<T: LaneScalar>(a: Lanes<T>, b: Lanes<T>, f: impl Fn(T, T) -> T) -> Lanes<T> {
    std::array::from_fn(|i| f(a[i], b[i]))
}

#[inline(always)]
fn zip_bits<T: LaneScalar>(
    a: Lanes<T>,
    b: Lanes<T>,
    f: impl Fn(T::Bits, T::Bits) -> T::Bits,
) -> Lanes<T> {
    zip(a, b, |x, y| T::from_lane_bits(f(x.lane_bits(), y.lane_bits())))
}

#[inline(always)]
pub(crate) fn add<T: LaneScalar>(a: Lanes<T>, b: Lanes<T>) -> Lanes<T> {
    zip(a, b, |x, y| x + y)
}

#[inline(always)]
pub(crate) fn sub<T: LaneScalar>(a: Lanes<T>, b: Lanes<T>) -> Lanes<T> {
    zip(a, b, |x, y| x - y)
}

#[inline(always)]
pub(crate) fn mul<T: LaneScalar>(a: Lanes<T>, b: Lanes<T>) -> Lanes<T> {
    zip(a, b, |x, y| x * y)
}

#[inline(always)]
pub(crate) fn div<T: LaneScalar>(a: Lanes<T>, b: Lanes<T>) -> Lanes<T> {
    zip(a, b, |x, y| x / y)
}

#[inline(always)]
pub(crate) fn sqrt<T: LaneScalar>(a: Lanes<T>) -> Lanes<T> {
    a.map(T::sqrt)
}

// `minps`/`maxps` return the second operand unless the first compares
// strictly smaller (larger); NaN and equal zeros both fall through.
#[inline(always)]
pub(crate) fn min<T: LaneScalar>(a: Lanes<T>, b: Lanes<T>) -> Lanes<T> {
    zip(a, b, |x, y| if x < y { x } else { y })
}

#[inline(always)]
pub(crate) fn max<T: LaneScalar>(a: Lanes<T>, b: Lanes<T>) -> Lanes<T> {
    zip(a, b, |x, y| if x > y { x } else { y })
}

#[inline(always)]
pub(crate) fn round<T: LaneScalar>(a: Lanes<T>) -> Lanes<T> {
    a.map(T::round_even)
}

#[inline(always)]
pub(crate) fn truncate<T: LaneScalar>(a: Lanes<T>) -> Lanes<T> {
    a.map(T::trunc)
}

#[inline(always)]
pub(crate) fn and<T: LaneScalar>(a: Lanes<T>, b: Lanes<T>) -> Lanes<T> {
    zip_bits(a, b, |x, y| x & y)
}

#[inline(always)]
pub(crate) fn or<T: LaneScalar>(a: Lanes<T>, b: Lanes<T>) -> Lanes<T> {
    zip_bits(a, b, |x, y| x | y)
}

#[inline(always)]
pub(crate) fn xor<T: LaneScalar>(a: Lanes<T>, b: Lanes<T>) -> Lanes<T> {
    zip_bits(a, b, |x, y| x ^ y)
}

#[inline(always)]
pub(crate) fn and_not<T: LaneScalar>(a: Lanes<T>, b: Lanes<T>) -> Lanes<T> {
    zip_bits(a, b, |x, y| !x & y)
}

#[inline(always)]
pub(crate) fn cmp_eq<T: LaneScalar>(a: Lanes<T>, b: Lanes<T>) -> Lanes<T> {
    zip(a, b, |x, y| mask(x == y))
}

#[inline(always)]
pub(crate) fn cmp_ne<T: LaneScalar>(a: Lanes<T>, b: Lanes<T>) -> Lanes<T> {
    zip(a, b, |x, y| mask(x != y))
}

#[inline(always)]
pub(crate) fn cmp_lt<T: LaneScalar>(a: Lanes<T>, b: Lanes<T>) -> Lanes<T> {
    zip(a, b, |x, y| mask(x < y))
}

#[inline(always)]
pub(crate) fn cmp_le<T: LaneScalar>(a: Lanes<T>, b: Lanes<T>) -> Lanes<T> {
    zip(a, b, |x, y| mask(x <= y))
}

#[inline(always)]
pub(crate) fn cmp_gt<T: LaneScalar>(a: Lanes<T>, b: Lanes<T>) -> Lanes<T> {
    zip(a, b, |x, y| mask(x > y))
}

#[inline(always)]
pub(crate) fn cmp_ge<T: LaneScalar>(a: Lanes<T>, b: Lanes<T>) -> Lanes<T> {
    zip(a, b, |x, y| mask(x >= y))
}

#[inline(always)]
pub(crate) fn eq_bits<T: LaneScalar>(a: Lanes<T>, b: Lanes<T>) -> Lanes<T> {
    zip(a, b, |x, y| mask(x.lane_bits() == y.lane_bits()))
}

#[inline(always)]
pub(crate) fn select<T: LaneScalar>(
    mask: Lanes<T>,
    if_true: Lanes<T>,
    if_false: Lanes<T>,
) -> Lanes<T> {
    std::array::from_fn(|i| {
        let m = mask[i].lane_bits();
        T::from_lane_bits((m & if_true[i].lane_bits()) | (!m & if_false[i].lane_bits()))
    })
}

#[inline(always)]
pub(crate) fn broadcast<T: LaneScalar>(a: Lanes<T>, lane: usize) -> Lanes<T> {
    [a[lane]; LANE_COUNT]
}

/// `[a0+a1, a2+a3, b0+b1, b2+b3]`, the `haddps` layout.
#[inline(always)]
pub(crate) fn horizontal_add_pairs<T: LaneScalar>(a: Lanes<T>, b: Lanes<T>) -> Lanes<T> {
    [a[0] + a[1], a[2] + a[3], b[0] + b[1], b[2] + b[3]]
}

/// `[a0+a1, b0+b1, a2+a3, b2+b3]`, the 256-bit `vhaddpd` layout.
#[inline(always)]
pub(crate) fn horizontal_add_halves<T: LaneScalar>(a: Lanes<T>, b: Lanes<T>) -> Lanes<T> {
    [a[0] + a[1], b[0] + b[1], a[2] + a[3], b[2] + b[3]]
}

#[inline(always)]
pub(crate) fn convert_to_int_bits<T: LaneScalar>(a: Lanes<T>) -> Lanes<T> {
    a.map(|x| T::from_lane_bits(x.int_bits()))
}

#[inline(always)]
pub(crate) fn reciprocal<T: LaneScalar>(a: Lanes<T>) -> Lanes<T> {
    a.map(T::recip)
}

#[inline(always)]
pub(crate) fn reciprocal_sqrt<T: LaneScalar>(a: Lanes<T>) -> Lanes<T> {
    a.map(|x| x.sqrt().recip())
}

#[inline(always)]
pub(crate) fn mul_add<T: LaneScalar>(a: Lanes<T>, b: Lanes<T>, c: Lanes<T>) -> Lanes<T> {
    std::array::from_fn(|i| a[i] * b[i] + c[i])
}

#[inline(always)]
pub(crate) fn neg_mul_add<T: LaneScalar>(a: Lanes<T>, b: Lanes<T>, c: Lanes<T>) -> Lanes<T> {
    std::array::from_fn(|i| c[i] - a[i] * b[i])
}

#[inline(always)]
pub(crate) fn mul_sub<T: LaneScalar>(a: Lanes<T>, b: Lanes<T>, c: Lanes<T>) -> Lanes<T> {
    std::array::from_fn(|i| a[i] * b[i] - c[i])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_max_follow_second_operand() {
        let a = [f32::NAN, 1.0, 0.0, -0.0];
        let b = [2.0, f32::NAN, -0.0, 0.0];

        let lo = min(a, b);
        assert_eq!(lo[0], 2.0);
        assert!(lo[1].is_nan());
        assert!(lo[2].is_sign_negative());
        assert!(lo[3].is_sign_positive());

        let hi = max(a, b);
        assert_eq!(hi[0], 2.0);
        assert!(hi[1].is_nan());
        assert!(hi[2].is_sign_negative());
        assert!(hi[3].is_sign_positive());
    }

    #[test]
    fn test_comparison_masks_are_all_ones() {
        let eq = cmp_eq([1.0f64, 2.0, f64::NAN, 0.0], [1.0, 3.0, f64::NAN, -0.0]);
        assert_eq!(eq.map(f64::to_bits), [u64::MAX, 0, 0, u64::MAX]);

        let ne = cmp_ne([1.0f64, 2.0, f64::NAN, 0.0], [1.0, 3.0, f64::NAN, -0.0]);
        assert_eq!(ne.map(f64::to_bits), [0, u64::MAX, u64::MAX, 0]);
    }

    #[test]
    fn test_eq_bits_distinguishes_signed_zero() {
        let eq = eq_bits([0.0f32, -0.0, 1.0, f32::NAN], [-0.0, -0.0, 1.0, f32::NAN]);
        assert_eq!(eq.map(f32::to_bits), [0, u32::MAX, u32::MAX, u32::MAX]);
    }

    #[test]
    fn test_select_is_bitwise() {
        let mask = [f32::from_bits(u32::MAX), 0.0, f32::from_bits(u32::MAX), 0.0];
        let picked = select(mask, [1.0, 2.0, 3.0, 4.0], [-1.0, -2.0, -3.0, -4.0]);
        assert_eq!(picked, [1.0, -2.0, 3.0, -4.0]);
    }

    #[test]
    fn test_round_ties_to_even() {
        assert_eq!(round([0.5f32, 1.5, 2.5, -2.5]), [0.0, 2.0, 2.0, -2.0]);
        assert!(round([-0.5f64, 0.0, 0.0, 0.0])[0].is_sign_negative());
    }

    #[test]
    fn test_int_bits_indefinite() {
        let converted = convert_to_int_bits([1.5f32, -2.5, f32::NAN, 3.0e9]);
        let ints = converted.map(|x| x.to_bits() as i32);
        assert_eq!(ints, [2, -2, i32::MIN, i32::MIN]);

        let wide = convert_to_int_bits([-3.0f64, 7.5, f64::INFINITY, 0.0]);
        let ints = wide.map(|x| x.to_bits() as i64);
        assert_eq!(ints, [-3, 8, i32::MIN as i64, 0]);
    }

    #[test]
    fn test_horizontal_layouts() {
        let a = [1.0f64, 2.0, 3.0, 4.0];
        let b = [10.0, 20.0, 30.0, 40.0];
        assert_eq!(horizontal_add_pairs(a, b), [3.0, 7.0, 30.0, 70.0]);
        assert_eq!(horizontal_add_halves(a, b), [3.0, 30.0, 7.0, 70.0]);
    }
}
