//! Four packed `f32` lanes.
//!
//! `F32x4` is a 16-byte aligned `[f32; 4]`, so every value can be moved into
//! an SSE register with an aligned load. All kernels need at least SSE2;
//! rounding and blends prefer SSE4.1, horizontal add needs SSE3 and the fused
//! forms need FMA. Missing extensions fall back per operation.
//!
//! [`SimdLanes::run`] needs SSE3 and SSE4.1 to keep a kernel in registers;
//! below that, the kernel runs one dispatched operation at a time.
//!
//! # Horizontal add layout
//!
//! `a.horizontal_add(b)` gives `[a0+a1, a2+a3, b0+b1, b2+b3]`, the layout of
//! `haddps`.

use crate::simd::software;
use crate::simd::traits::{LaneKernel, SimdLanes, LANE_COUNT};

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
use crate::simd::sse::{f32x4 as sse, lanes};

/// Required alignment of an `F32x4` in bytes.
pub const SSE_ALIGNMENT: usize = 16;

/// Four single-precision lanes `[x, y, z, w]`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[repr(C, align(16))]
pub struct F32x4(pub(crate) [f32; LANE_COUNT]);

const _: () = assert!(std::mem::align_of::<F32x4>() == SSE_ALIGNMENT);

impl F32x4 {
    #[inline(always)]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self([x, y, z, w])
    }

    #[inline(always)]
    pub const fn splat(value: f32) -> Self {
        Self([value; LANE_COUNT])
    }

    /// Builds a vector from raw lane bits.
    #[inline(always)]
    pub const fn from_bits(bits: [u32; LANE_COUNT]) -> Self {
        Self([
            f32::from_bits(bits[0]),
            f32::from_bits(bits[1]),
            f32::from_bits(bits[2]),
            f32::from_bits(bits[3]),
        ])
    }

    #[inline(always)]
    pub const fn splat_bits(bits: u32) -> Self {
        Self::splat(f32::from_bits(bits))
    }

    #[inline(always)]
    pub fn to_bits(self) -> [u32; LANE_COUNT] {
        self.0.map(f32::to_bits)
    }

    #[inline(always)]
    pub const fn x(self) -> f32 {
        self.0[0]
    }

    #[inline(always)]
    pub const fn y(self) -> f32 {
        self.0[1]
    }

    #[inline(always)]
    pub const fn z(self) -> f32 {
        self.0[2]
    }

    #[inline(always)]
    pub const fn w(self) -> f32 {
        self.0[3]
    }
}

impl SimdLanes for F32x4 {
    type Scalar = f32;

    #[inline(always)]
    fn is_accelerated() -> bool {
        crate::caps::capabilities().sse2
    }

    #[inline(always)]
    fn splat(value: f32) -> Self {
        F32x4::splat(value)
    }

    #[inline(always)]
    fn from_array(lanes: [f32; LANE_COUNT]) -> Self {
        Self(lanes)
    }

    #[inline(always)]
    fn to_array(self) -> [f32; LANE_COUNT] {
        self.0
    }

    #[inline]
    fn run<K: LaneKernel>(kernel: &K, a: Self, b: Self) -> (Self, Self) {
        #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
        {
            let caps = crate::caps::capabilities();
            if caps.sse2 && caps.sse3 && caps.sse41 {
                // SAFETY: every extension the chosen backend enables was detected.
                return unsafe {
                    if caps.fma {
                        lanes::run_fused(kernel, a, b)
                    } else {
                        lanes::run(kernel, a, b)
                    }
                };
            }
        }
        kernel.apply(a, b)
    }

    #[inline]
    fn add(self, rhs: Self) -> Self {
        dispatch!(sse2 => sse::add(self, rhs), else Self(software::add(self.0, rhs.0)))
    }

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        dispatch!(sse2 => sse::sub(self, rhs), else Self(software::sub(self.0, rhs.0)))
    }

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        dispatch!(sse2 => sse::mul(self, rhs), else Self(software::mul(self.0, rhs.0)))
    }

    #[inline]
    fn div(self, rhs: Self) -> Self {
        dispatch!(sse2 => sse::div(self, rhs), else Self(software::div(self.0, rhs.0)))
    }

    #[inline]
    fn sqrt(self) -> Self {
        dispatch!(sse2 => sse::sqrt(self), else Self(software::sqrt(self.0)))
    }

    #[inline]
    fn min(self, rhs: Self) -> Self {
        dispatch!(sse2 => sse::min(self, rhs), else Self(software::min(self.0, rhs.0)))
    }

    #[inline]
    fn max(self, rhs: Self) -> Self {
        dispatch!(sse2 => sse::max(self, rhs), else Self(software::max(self.0, rhs.0)))
    }

    #[inline]
    fn round(self) -> Self {
        dispatch!(sse41 => sse::round(self), else Self(software::round(self.0)))
    }

    #[inline]
    fn truncate(self) -> Self {
        dispatch!(sse41 => sse::truncate(self), else Self(software::truncate(self.0)))
    }

    #[inline]
    fn and(self, rhs: Self) -> Self {
        dispatch!(sse2 => sse::and(self, rhs), else Self(software::and(self.0, rhs.0)))
    }

    #[inline]
    fn or(self, rhs: Self) -> Self {
        dispatch!(sse2 => sse::or(self, rhs), else Self(software::or(self.0, rhs.0)))
    }

    #[inline]
    fn xor(self, rhs: Self) -> Self {
        dispatch!(sse2 => sse::xor(self, rhs), else Self(software::xor(self.0, rhs.0)))
    }

    #[inline]
    fn and_not(self, rhs: Self) -> Self {
        dispatch!(sse2 => sse::and_not(self, rhs), else Self(software::and_not(self.0, rhs.0)))
    }

    #[inline]
    fn cmp_eq(self, rhs: Self) -> Self {
        dispatch!(sse2 => sse::cmp_eq(self, rhs), else Self(software::cmp_eq(self.0, rhs.0)))
    }

    #[inline]
    fn cmp_ne(self, rhs: Self) -> Self {
        dispatch!(sse2 => sse::cmp_ne(self, rhs), else Self(software::cmp_ne(self.0, rhs.0)))
    }

    #[inline]
    fn cmp_lt(self, rhs: Self) -> Self {
        dispatch!(sse2 => sse::cmp_lt(self, rhs), else Self(software::cmp_lt(self.0, rhs.0)))
    }

    #[inline]
    fn cmp_le(self, rhs: Self) -> Self {
        dispatch!(sse2 => sse::cmp_le(self, rhs), else Self(software::cmp_le(self.0, rhs.0)))
    }

    #[inline]
    fn cmp_gt(self, rhs: Self) -> Self {
        dispatch!(sse2 => sse::cmp_gt(self, rhs), else Self(software::cmp_gt(self.0, rhs.0)))
    }

    #[inline]
    fn cmp_ge(self, rhs: Self) -> Self {
        dispatch!(sse2 => sse::cmp_ge(self, rhs), else Self(software::cmp_ge(self.0, rhs.0)))
    }

    #[inline]
    fn eq_bits(self, rhs: Self) -> Self {
        dispatch!(sse2 => sse::eq_bits(self, rhs), else Self(software::eq_bits(self.0, rhs.0)))
    }

    #[inline]
    fn select(mask: Self, if_true: Self, if_false: Self) -> Self {
        #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
        {
            let caps = crate::caps::capabilities();
            if caps.sse41 {
                // SAFETY: SSE4.1 was detected.
                return unsafe { sse::blend(mask, if_true, if_false) };
            }
            if caps.sse2 {
                // SAFETY: SSE2 was detected.
                return unsafe { sse::select(mask, if_true, if_false) };
            }
        }
        Self(software::select(mask.0, if_true.0, if_false.0))
    }

    #[inline]
    fn broadcast(self, lane: usize) -> Self {
        dispatch!(sse2 => sse::broadcast(self, lane), else Self(software::broadcast(self.0, lane)))
    }

    #[inline]
    fn horizontal_add(self, rhs: Self) -> Self {
        dispatch!(
            sse3 => sse::horizontal_add(self, rhs),
            else Self(software::horizontal_add_pairs(self.0, rhs.0))
        )
    }

    #[inline]
    fn convert_to_int_bits(self) -> Self {
        dispatch!(
            sse2 => sse::convert_to_int_bits(self),
            else Self(software::convert_to_int_bits(self.0))
        )
    }

    /// `rcpps`, about 12 bits of precision. The fallback is exact.
    #[inline]
    fn reciprocal_approx(self) -> Self {
        dispatch!(
            sse2 => sse::reciprocal_approx(self),
            else Self(software::reciprocal(self.0))
        )
    }

    /// `rsqrtps`, about 12 bits of precision. The fallback is exact.
    #[inline]
    fn reciprocal_sqrt_approx(self) -> Self {
        dispatch!(
            sse2 => sse::reciprocal_sqrt_approx(self),
            else Self(software::reciprocal_sqrt(self.0))
        )
    }

    #[inline]
    fn mul_add(self, b: Self, c: Self) -> Self {
        dispatch!(
            fma => sse::mul_add(self, b, c),
            else Self(software::mul_add(self.0, b.0, c.0))
        )
    }

    #[inline]
    fn neg_mul_add(self, b: Self, c: Self) -> Self {
        dispatch!(
            fma => sse::neg_mul_add(self, b, c),
            else Self(software::neg_mul_add(self.0, b.0, c.0))
        )
    }

    #[inline]
    fn mul_sub(self, b: Self, c: Self) -> Self {
        dispatch!(
            fma => sse::mul_sub(self, b, c),
            else Self(software::mul_sub(self.0, b.0, c.0))
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::LaneConstants;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn software_matches(hardware: F32x4, reference: [f32; 4]) {
        for lane in 0..4 {
            let h = hardware.0[lane];
            let r = reference[lane];
            assert!(
                h.to_bits() == r.to_bits() || (h.is_nan() && r.is_nan()),
                "lane {}: dispatched {:?} ({:#010x}) vs software {:?} ({:#010x})",
                lane,
                h,
                h.to_bits(),
                r,
                r.to_bits()
            );
        }
    }

    /// Fixed edge vectors plus a seeded corpus whose lanes are raw bit
    /// patterns, special values (subnormals included) or ordinary values.
    fn samples() -> Vec<F32x4> {
        let specials = [
            0.0,
            -0.0,
            f32::INFINITY,
            f32::NEG_INFINITY,
            f32::NAN,
            f32::MAX,
            f32::MIN,
            f32::MIN_POSITIVE,
            f32::from_bits(1),
            1e-40,
            -1e-40,
            2.5,
            -0.5,
        ];
        let mut samples = vec![
            F32x4::new(1.0, -2.5, 3.75, 0.0),
            F32x4::new(-0.0, f32::INFINITY, f32::NEG_INFINITY, f32::NAN),
            F32x4::new(0.5, 1.5, 2.5, -0.5),
            F32x4::new(1e-30, -1e30, 123456.79, -7.25),
            F32x4::new(f32::MAX, f32::MIN_POSITIVE, -3.0e9, 2.0e9),
        ];

        let mut rng = StdRng::seed_from_u64(12345);
        samples.extend((0..60).map(|_| {
            F32x4(std::array::from_fn(|_| match rng.random_range(0..3) {
                0 => f32::from_bits(rng.random::<u32>()),
                1 => specials[rng.random_range(0..specials.len())],
                _ => rng.random_range(-1e4..1e4),
            }))
        }));
        samples
    }

    #[test]
    fn test_layout() {
        assert_eq!(std::mem::size_of::<F32x4>(), 16);
        assert_eq!(std::mem::align_of::<F32x4>(), 16);
        let v = F32x4::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!((v.x(), v.y(), v.z(), v.w()), (1.0, 2.0, 3.0, 4.0));
    }

    #[test]
    fn test_binary_parity_with_software() {
        for a in samples() {
            for b in samples() {
                software_matches(a.add(b), software::add(a.0, b.0));
                software_matches(a.sub(b), software::sub(a.0, b.0));
                software_matches(a.mul(b), software::mul(a.0, b.0));
                software_matches(a.div(b), software::div(a.0, b.0));
                software_matches(a.min(b), software::min(a.0, b.0));
                software_matches(a.max(b), software::max(a.0, b.0));
                software_matches(a.and(b), software::and(a.0, b.0));
                software_matches(a.or(b), software::or(a.0, b.0));
                software_matches(a.xor(b), software::xor(a.0, b.0));
                software_matches(a.and_not(b), software::and_not(a.0, b.0));
                software_matches(a.cmp_eq(b), software::cmp_eq(a.0, b.0));
                software_matches(a.cmp_ne(b), software::cmp_ne(a.0, b.0));
                software_matches(a.cmp_lt(b), software::cmp_lt(a.0, b.0));
                software_matches(a.cmp_le(b), software::cmp_le(a.0, b.0));
                software_matches(a.cmp_gt(b), software::cmp_gt(a.0, b.0));
                software_matches(a.cmp_ge(b), software::cmp_ge(a.0, b.0));
                software_matches(a.eq_bits(b), software::eq_bits(a.0, b.0));
                software_matches(a.horizontal_add(b), software::horizontal_add_pairs(a.0, b.0));
            }
        }
    }

    #[test]
    fn test_unary_parity_with_software() {
        for v in samples() {
            software_matches(v.sqrt(), software::sqrt(v.0));
            software_matches(v.round(), software::round(v.0));
            software_matches(v.truncate(), software::truncate(v.0));
            software_matches(v.convert_to_int_bits(), software::convert_to_int_bits(v.0));
            for lane in 0..4 {
                software_matches(v.broadcast(lane), software::broadcast(v.0, lane));
            }
        }
    }

    #[test]
    fn test_select_parity_with_software() {
        let a = F32x4::new(1.0, 2.0, 3.0, 4.0);
        let b = F32x4::new(-1.0, -2.0, -3.0, -4.0);
        for mask in [F32x4::MASK_X, F32x4::MASK_ZW, F32x4::MASK_XYZ, F32x4::ZERO] {
            software_matches(F32x4::select(mask, a, b), software::select(mask.0, a.0, b.0));
        }

        let samples = samples();
        for (i, a) in samples.iter().enumerate() {
            let b = samples[(i + 1) % samples.len()];
            let mask = a.cmp_lt(b);
            software_matches(F32x4::select(mask, *a, b), software::select(mask.0, a.0, b.0));
        }
    }

    /// With FMA the fused forms round once, like the scalar `mul_add`;
    /// without it they match the two-step software kernels.
    #[test]
    fn test_fused_parity() {
        let fused = crate::caps::capabilities().fma;
        let samples = samples();
        let n = samples.len();
        for (i, a) in samples.iter().enumerate() {
            for (j, b) in samples.iter().enumerate() {
                let c = samples[(i * 7 + j) % n];
                let (a, b) = (*a, *b);
                if fused {
                    let fma = std::array::from_fn(|k| a.0[k].mul_add(b.0[k], c.0[k]));
                    let fnma = std::array::from_fn(|k| (-a.0[k]).mul_add(b.0[k], c.0[k]));
                    let fms = std::array::from_fn(|k| a.0[k].mul_add(b.0[k], -c.0[k]));
                    software_matches(a.mul_add(b, c), fma);
                    software_matches(a.neg_mul_add(b, c), fnma);
                    software_matches(a.mul_sub(b, c), fms);
                } else {
                    software_matches(a.mul_add(b, c), software::mul_add(a.0, b.0, c.0));
                    software_matches(a.neg_mul_add(b, c), software::neg_mul_add(a.0, b.0, c.0));
                    software_matches(a.mul_sub(b, c), software::mul_sub(a.0, b.0, c.0));
                }
            }
        }
    }

    #[test]
    fn test_reciprocal_approx_precision() {
        let v = F32x4::new(1.0, 3.0, -7.0, 0.125);
        let approx = v.reciprocal_approx();
        let sqrt_approx = v.abs().reciprocal_sqrt_approx();
        for lane in 0..4 {
            let x = v.0[lane];
            let rel = ((approx.0[lane] - 1.0 / x) * x).abs();
            assert!(rel <= 1.5 / 4096.0, "lane {}: rcp rel error {}", lane, rel);

            let expected = 1.0 / x.abs().sqrt();
            let rel = ((sqrt_approx.0[lane] - expected) / expected).abs();
            assert!(rel <= 1.5 / 4096.0, "lane {}: rsqrt rel error {}", lane, rel);
        }
    }

    #[test]
    fn test_fused_forms() {
        let a = F32x4::new(2.0, -3.0, 0.5, 10.0);
        let b = F32x4::new(4.0, 5.0, -8.0, 0.1);
        let c = F32x4::new(1.0, 1.0, 1.0, -1.0);

        let fma = a.mul_add(b, c).to_array();
        let fnma = a.neg_mul_add(b, c).to_array();
        let fms = a.mul_sub(b, c).to_array();
        for lane in 0..4 {
            let product = a.0[lane] * b.0[lane];
            assert!((fma[lane] - (product + c.0[lane])).abs() <= 1e-6);
            assert!((fnma[lane] - (c.0[lane] - product)).abs() <= 1e-6);
            assert!((fms[lane] - (product - c.0[lane])).abs() <= 1e-6);
        }
    }

    #[test]
    fn test_const_constructors() {
        const V: F32x4 = F32x4::from_bits([0x3f80_0000, 0, 0x8000_0000, 0xbf80_0000]);
        assert_eq!(V.0[0], 1.0);
        assert_eq!(V.0[1].to_bits(), 0);
        assert!(V.0[2].is_sign_negative() && V.0[2] == 0.0);
        assert_eq!(V.0[3], -1.0);
        assert_eq!(F32x4::splat_bits(u32::MAX).to_bits(), [u32::MAX; 4]);
    }
}
