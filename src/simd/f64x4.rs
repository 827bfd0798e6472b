//! Four packed `f64` lanes.
//!
//! `F64x4` is a 32-byte aligned `[f64; 4]` backed by AVX. Integer-lane
//! helpers additionally need SSE4.1 and the fused forms need FMA. Without
//! AVX, rounding still runs in hardware on SSE4.1 one half at a time and
//! everything else takes the software path.
//!
//! [`SimdLanes::run`] keeps a kernel in AVX registers when AVX and SSE4.1
//! are both present.
//!
//! # Horizontal add layout
//!
//! `a.horizontal_add(b)` gives `[a0+a1, b0+b1, a2+a3, b2+b3]`, the layout of
//! the 256-bit `vhaddpd`.
//!
//! # Reciprocal approximations
//!
//! There is no reduced-precision double reciprocal below AVX-512, so
//! `reciprocal_approx` and `reciprocal_sqrt_approx` are exact here.

use crate::consts::LaneConstants;
use crate::simd::software;
use crate::simd::traits::{LaneKernel, SimdLanes, LANE_COUNT};

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
use crate::simd::{avx::f64x4 as avx, avx::lanes, sse::f64x2 as halves};

/// Required alignment of an `F64x4` in bytes.
pub const AVX_ALIGNMENT: usize = 32;

/// Four double-precision lanes `[x, y, z, w]`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[repr(C, align(32))]
pub struct F64x4(pub(crate) [f64; LANE_COUNT]);

const _: () = assert!(std::mem::align_of::<F64x4>() == AVX_ALIGNMENT);

impl F64x4 {
    #[inline(always)]
    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self([x, y, z, w])
    }

    #[inline(always)]
    pub const fn splat(value: f64) -> Self {
        Self([value; LANE_COUNT])
    }

    /// Builds a vector from raw lane bits.
    #[inline(always)]
    pub const fn from_bits(bits: [u64; LANE_COUNT]) -> Self {
        Self([
            f64::from_bits(bits[0]),
            f64::from_bits(bits[1]),
            f64::from_bits(bits[2]),
            f64::from_bits(bits[3]),
        ])
    }

    #[inline(always)]
    pub const fn splat_bits(bits: u64) -> Self {
        Self::splat(f64::from_bits(bits))
    }

    #[inline(always)]
    pub fn to_bits(self) -> [u64; LANE_COUNT] {
        self.0.map(f64::to_bits)
    }

    #[inline(always)]
    pub const fn x(self) -> f64 {
        self.0[0]
    }

    #[inline(always)]
    pub const fn y(self) -> f64 {
        self.0[1]
    }

    #[inline(always)]
    pub const fn z(self) -> f64 {
        self.0[2]
    }

    #[inline(always)]
    pub const fn w(self) -> f64 {
        self.0[3]
    }
}

impl SimdLanes for F64x4 {
    type Scalar = f64;

    #[inline(always)]
    fn is_accelerated() -> bool {
        crate::caps::capabilities().avx
    }

    #[inline(always)]
    fn splat(value: f64) -> Self {
        F64x4::splat(value)
    }

    #[inline(always)]
    fn from_array(lanes: [f64; LANE_COUNT]) -> Self {
        Self(lanes)
    }

    #[inline(always)]
    fn to_array(self) -> [f64; LANE_COUNT] {
        self.0
    }

    #[inline]
    fn run<K: LaneKernel>(kernel: &K, a: Self, b: Self) -> (Self, Self) {
        #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
        {
            let caps = crate::caps::capabilities();
            if caps.avx && caps.sse41 {
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
        dispatch!(avx => avx::add(self, rhs), else Self(software::add(self.0, rhs.0)))
    }

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        dispatch!(avx => avx::sub(self, rhs), else Self(software::sub(self.0, rhs.0)))
    }

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        dispatch!(avx => avx::mul(self, rhs), else Self(software::mul(self.0, rhs.0)))
    }

    #[inline]
    fn div(self, rhs: Self) -> Self {
        dispatch!(avx => avx::div(self, rhs), else Self(software::div(self.0, rhs.0)))
    }

    #[inline]
    fn sqrt(self) -> Self {
        dispatch!(avx => avx::sqrt(self), else Self(software::sqrt(self.0)))
    }

    #[inline]
    fn min(self, rhs: Self) -> Self {
        dispatch!(avx => avx::min(self, rhs), else Self(software::min(self.0, rhs.0)))
    }

    #[inline]
    fn max(self, rhs: Self) -> Self {
        dispatch!(avx => avx::max(self, rhs), else Self(software::max(self.0, rhs.0)))
    }

    #[inline]
    fn round(self) -> Self {
        #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
        if crate::caps::capabilities().avx {
            // SAFETY: AVX was detected.
            return unsafe { avx::round(self) };
        }
        dispatch!(sse41 => halves::round(self), else Self(software::round(self.0)))
    }

    #[inline]
    fn truncate(self) -> Self {
        #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
        if crate::caps::capabilities().avx {
            // SAFETY: AVX was detected.
            return unsafe { avx::truncate(self) };
        }
        dispatch!(sse41 => halves::truncate(self), else Self(software::truncate(self.0)))
    }

    #[inline]
    fn and(self, rhs: Self) -> Self {
        dispatch!(avx => avx::and(self, rhs), else Self(software::and(self.0, rhs.0)))
    }

    #[inline]
    fn or(self, rhs: Self) -> Self {
        dispatch!(avx => avx::or(self, rhs), else Self(software::or(self.0, rhs.0)))
    }

    #[inline]
    fn xor(self, rhs: Self) -> Self {
        dispatch!(avx => avx::xor(self, rhs), else Self(software::xor(self.0, rhs.0)))
    }

    #[inline]
    fn and_not(self, rhs: Self) -> Self {
        dispatch!(avx => avx::and_not(self, rhs), else Self(software::and_not(self.0, rhs.0)))
    }

    #[inline]
    fn cmp_eq(self, rhs: Self) -> Self {
        dispatch!(avx => avx::cmp_eq(self, rhs), else Self(software::cmp_eq(self.0, rhs.0)))
    }

    #[inline]
    fn cmp_ne(self, rhs: Self) -> Self {
        dispatch!(avx => avx::cmp_ne(self, rhs), else Self(software::cmp_ne(self.0, rhs.0)))
    }

    #[inline]
    fn cmp_lt(self, rhs: Self) -> Self {
        dispatch!(avx => avx::cmp_lt(self, rhs), else Self(software::cmp_lt(self.0, rhs.0)))
    }

    #[inline]
    fn cmp_le(self, rhs: Self) -> Self {
        dispatch!(avx => avx::cmp_le(self, rhs), else Self(software::cmp_le(self.0, rhs.0)))
    }

    #[inline]
    fn cmp_gt(self, rhs: Self) -> Self {
        dispatch!(avx => avx::cmp_gt(self, rhs), else Self(software::cmp_gt(self.0, rhs.0)))
    }

    #[inline]
    fn cmp_ge(self, rhs: Self) -> Self {
        dispatch!(avx => avx::cmp_ge(self, rhs), else Self(software::cmp_ge(self.0, rhs.0)))
    }

    #[inline]
    fn eq_bits(self, rhs: Self) -> Self {
        dispatch!(
            avx && sse41 => avx::eq_bits(self, rhs),
            else Self(software::eq_bits(self.0, rhs.0))
        )
    }

    #[inline]
    fn select(mask: Self, if_true: Self, if_false: Self) -> Self {
        dispatch!(
            avx => avx::select(mask, if_true, if_false),
            else Self(software::select(mask.0, if_true.0, if_false.0))
        )
    }

    #[inline]
    fn broadcast(self, lane: usize) -> Self {
        dispatch!(avx => avx::broadcast(self, lane), else Self(software::broadcast(self.0, lane)))
    }

    #[inline]
    fn horizontal_add(self, rhs: Self) -> Self {
        dispatch!(
            avx => avx::horizontal_add(self, rhs),
            else Self(software::horizontal_add_halves(self.0, rhs.0))
        )
    }

    #[inline]
    fn convert_to_int_bits(self) -> Self {
        dispatch!(
            avx && sse41 => avx::convert_to_int_bits(self),
            else Self(software::convert_to_int_bits(self.0))
        )
    }

    #[inline]
    fn reciprocal_approx(self) -> Self {
        Self::ONE.div(self)
    }

    #[inline]
    fn reciprocal_sqrt_approx(self) -> Self {
        Self::ONE.div(self.sqrt())
    }

    #[inline]
    fn mul_add(self, b: Self, c: Self) -> Self {
        dispatch!(
            avx && fma => avx::mul_add(self, b, c),
            else Self(software::mul_add(self.0, b.0, c.0))
        )
    }

    #[inline]
    fn neg_mul_add(self, b: Self, c: Self) -> Self {
        dispatch!(
            avx && fma => avx::neg_mul_add(self, b, c),
            else Self(software::neg_mul_add(self.0, b.0, c.0))
        )
    }

    #[inline]
    fn mul_sub(self, b: Self, c: Self) -> Self {
        dispatch!(
            avx && fma => avx::mul_sub(self, b, c),
            else Self(software::mul_sub(self.0, b.0, c.0))
        )
    }
}
