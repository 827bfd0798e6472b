//! Register-resident `F64x4` backend for whole-kernel runs.
//!
//! [`AvxLanes`] holds an `__m256d` and implements [`SimdLanes`] with raw
//! intrinsics in `#[inline(always)]` methods. Values only exist inside
//! [`run`] and [`run_fused`], so every method runs with AVX and SSE4.1
//! enabled, plus FMA when `FMA` is true.

#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use crate::consts::{forward_lane_constants, LaneConstants};
use crate::simd::traits::{LaneKernel, SimdLanes, LANE_COUNT};
use crate::simd::F64x4;

#[derive(Debug, Clone, Copy)]
#[repr(transparent)]
pub(crate) struct AvxLanes<const FMA: bool>(__m256d);

impl<const FMA: bool> AvxLanes<FMA> {
    pub(crate) const fn lift_const(v: F64x4) -> Self {
        // SAFETY: F64x4 is 32 bytes of plain f64 lanes, like __m256d.
        Self(unsafe { std::mem::transmute::<F64x4, __m256d>(v) })
    }

    #[inline(always)]
    fn lift(v: F64x4) -> Self {
        // SAFETY: F64x4 is 32-byte aligned; AVX is enabled by every caller.
        Self(unsafe { _mm256_load_pd(v.0.as_ptr()) })
    }

    #[inline(always)]
    fn lower(self) -> F64x4 {
        let mut out = F64x4([0.0; LANE_COUNT]);
        // SAFETY: as for `lift`.
        unsafe { _mm256_store_pd(out.0.as_mut_ptr(), self.0) };
        out
    }

    /// The two 128-bit integer halves, low first.
    #[inline(always)]
    fn int_halves(self) -> (__m128i, __m128i) {
        // SAFETY: bit casts and a lane extract, valid wherever AVX is.
        unsafe {
            let bits = _mm256_castpd_si256(self.0);
            (_mm256_castsi256_si128(bits), _mm256_extractf128_si256::<1>(bits))
        }
    }

    #[inline(always)]
    fn from_int_halves(lo: __m128i, hi: __m128i) -> Self {
        // SAFETY: as for `int_halves`.
        Self(unsafe { _mm256_castsi256_pd(_mm256_set_m128i(hi, lo)) })
    }
}

forward_lane_constants!(AvxLanes, F64x4);

macro_rules! avx_binary {
    ($($name:ident => $intrinsic:ident),* $(,)?) => {
        $(
            #[inline(always)]
            fn $name(self, rhs: Self) -> Self {
                // SAFETY: see the module documentation.
                Self(unsafe { $intrinsic(self.0, rhs.0) })
            }
        )*
    };
}

macro_rules! avx_compare {
    ($($name:ident => $predicate:ident),* $(,)?) => {
        $(
            #[inline(always)]
            fn $name(self, rhs: Self) -> Self {
                // SAFETY: see the module documentation.
                Self(unsafe { _mm256_cmp_pd::<$predicate>(self.0, rhs.0) })
            }
        )*
    };
}

impl<const FMA: bool> SimdLanes for AvxLanes<FMA> {
    type Scalar = f64;

    #[inline(always)]
    fn is_accelerated() -> bool {
        true
    }

    #[inline(always)]
    fn splat(value: f64) -> Self {
        // SAFETY: see the module documentation.
        Self(unsafe { _mm256_set1_pd(value) })
    }

    #[inline(always)]
    fn from_array(lanes: [f64; LANE_COUNT]) -> Self {
        // SAFETY: unaligned load of four readable doubles.
        Self(unsafe { _mm256_loadu_pd(lanes.as_ptr()) })
    }

    #[inline(always)]
    fn to_array(self) -> [f64; LANE_COUNT] {
        let mut out = [0.0; LANE_COUNT];
        // SAFETY: unaligned store into four writable doubles.
        unsafe { _mm256_storeu_pd(out.as_mut_ptr(), self.0) };
        out
    }

    avx_binary! {
        add => _mm256_add_pd,
        sub => _mm256_sub_pd,
        mul => _mm256_mul_pd,
        div => _mm256_div_pd,
        min => _mm256_min_pd,
        max => _mm256_max_pd,
        and => _mm256_and_pd,
        or => _mm256_or_pd,
        xor => _mm256_xor_pd,
        and_not => _mm256_andnot_pd,
        horizontal_add => _mm256_hadd_pd,
    }

    // Ordered predicates are false on NaN; `!=` is unordered, so true on NaN.
    avx_compare! {
        cmp_eq => _CMP_EQ_OQ,
        cmp_ne => _CMP_NEQ_UQ,
        cmp_lt => _CMP_LT_OQ,
        cmp_le => _CMP_LE_OQ,
        cmp_gt => _CMP_GT_OQ,
        cmp_ge => _CMP_GE_OQ,
    }

    #[inline(always)]
    fn sqrt(self) -> Self {
        // SAFETY: see the module documentation.
        Self(unsafe { _mm256_sqrt_pd(self.0) })
    }

    #[inline(always)]
    fn round(self) -> Self {
        // SAFETY: see the module documentation.
        Self(unsafe { _mm256_round_pd::<{ _MM_FROUND_TO_NEAREST_INT | _MM_FROUND_NO_EXC }>(self.0) })
    }

    #[inline(always)]
    fn truncate(self) -> Self {
        // SAFETY: see the module documentation.
        Self(unsafe { _mm256_round_pd::<{ _MM_FROUND_TO_ZERO | _MM_FROUND_NO_EXC }>(self.0) })
    }

    #[inline(always)]
    fn eq_bits(self, rhs: Self) -> Self {
        let (a_lo, a_hi) = self.int_halves();
        let (b_lo, b_hi) = rhs.int_halves();
        // SAFETY: see the module documentation.
        let (lo, hi) = unsafe { (_mm_cmpeq_epi64(a_lo, b_lo), _mm_cmpeq_epi64(a_hi, b_hi)) };
        Self::from_int_halves(lo, hi)
    }

    #[inline(always)]
    fn select(mask: Self, if_true: Self, if_false: Self) -> Self {
        // SAFETY: see the module documentation.
        Self(unsafe { _mm256_blendv_pd(if_false.0, if_true.0, mask.0) })
    }

    #[inline(always)]
    fn broadcast(self, lane: usize) -> Self {
        let v = self.0;
        // SAFETY: see the module documentation.
        let r = unsafe {
            match lane {
                0 => _mm256_permute_pd::<0b0000>(_mm256_permute2f128_pd::<0x00>(v, v)),
                1 => _mm256_permute_pd::<0b1111>(_mm256_permute2f128_pd::<0x00>(v, v)),
                2 => _mm256_permute_pd::<0b0000>(_mm256_permute2f128_pd::<0x11>(v, v)),
                3 => _mm256_permute_pd::<0b1111>(_mm256_permute2f128_pd::<0x11>(v, v)),
                _ => panic!("lane index {lane} out of range for a 4-lane vector"),
            }
        };
        Self(r)
    }

    /// Rounds to 32-bit integers, then sign-extends each into its 64-bit lane.
    #[inline(always)]
    fn convert_to_int_bits(self) -> Self {
        // SAFETY: see the module documentation.
        let (lo, hi) = unsafe {
            let ints = _mm256_cvtpd_epi32(self.0);
            (_mm_cvtepi32_epi64(ints), _mm_cvtepi32_epi64(_mm_srli_si128::<8>(ints)))
        };
        Self::from_int_halves(lo, hi)
    }

    #[inline(always)]
    fn reciprocal_approx(self) -> Self {
        Self::ONE.div(self)
    }

    #[inline(always)]
    fn reciprocal_sqrt_approx(self) -> Self {
        Self::ONE.div(self.sqrt())
    }

    #[inline(always)]
    fn mul_add(self, b: Self, c: Self) -> Self {
        if FMA {
            // SAFETY: `AvxLanes<true>` only exists inside `run_fused`.
            Self(unsafe { _mm256_fmadd_pd(self.0, b.0, c.0) })
        } else {
            self.mul(b).add(c)
        }
    }

    #[inline(always)]
    fn neg_mul_add(self, b: Self, c: Self) -> Self {
        if FMA {
            // SAFETY: `AvxLanes<true>` only exists inside `run_fused`.
            Self(unsafe { _mm256_fnmadd_pd(self.0, b.0, c.0) })
        } else {
            c.sub(self.mul(b))
        }
    }

    #[inline(always)]
    fn mul_sub(self, b: Self, c: Self) -> Self {
        if FMA {
            // SAFETY: `AvxLanes<true>` only exists inside `run_fused`.
            Self(unsafe { _mm256_fmsub_pd(self.0, b.0, c.0) })
        } else {
            self.mul(b).sub(c)
        }
    }
}

/// Runs `kernel` with AVX and SSE4.1 enabled.
#[target_feature(enable = "avx,sse4.1")]
pub(crate) unsafe fn run<K: LaneKernel>(kernel: &K, a: F64x4, b: F64x4) -> (F64x4, F64x4) {
    let (x, y) = kernel.apply(AvxLanes::<false>::lift(a), AvxLanes::<false>::lift(b));
    (x.lower(), y.lower())
}

/// Runs `kernel` with FMA enabled on top of [`run`]'s extensions.
#[target_feature(enable = "avx,sse4.1,fma")]
pub(crate) unsafe fn run_fused<K: LaneKernel>(kernel: &K, a: F64x4, b: F64x4) -> (F64x4, F64x4) {
    let (x, y) = kernel.apply(AvxLanes::<true>::lift(a), AvxLanes::<true>::lift(b));
    (x.lower(), y.lower())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn has_avx() -> bool {
        std::arch::is_x86_feature_detected!("avx") && std::arch::is_x86_feature_detected!("sse4.1")
    }

    #[test]
    fn test_constants_match_f64x4() {
        if !has_avx() {
            return;
        }
        let lifted = AvxLanes::<false>::THREE_PI_DIV_4.to_array();
        assert_eq!(lifted, F64x4::THREE_PI_DIV_4.to_array());
        let mask = AvxLanes::<true>::SIGN_MASK_YW.to_array().map(f64::to_bits);
        assert_eq!(mask, F64x4::SIGN_MASK_YW.to_bits());
    }

    #[test]
    fn test_int_halves_round_trip_bits() {
        if !has_avx() {
            return;
        }
        let v = F64x4::new(-0.0, f64::NAN, f64::from_bits(1), f64::MIN);
        let lanes = AvxLanes::<false>::lift(v);
        let (lo, hi) = lanes.int_halves();
        let back = AvxLanes::<false>::from_int_halves(lo, hi).lower();
        assert_eq!(back.to_bits(), v.to_bits());
    }
}
