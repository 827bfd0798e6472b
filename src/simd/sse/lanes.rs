//! Register-resident `F32x4` backend for whole-kernel runs.
//!
//! [`SseLanes`] wraps an `__m128` and implements [`SimdLanes`] with raw
//! intrinsics in `#[inline(always)]` methods. It never checks capabilities:
//! values only exist inside [`run`] and [`run_fused`], whose
//! `#[target_feature]` contexts the methods are inlined into. `FMA` selects
//! the fused or the two-step multiply-add forms.

#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use crate::consts::forward_lane_constants;
use crate::simd::traits::{LaneKernel, SimdLanes, LANE_COUNT};
use crate::simd::F32x4;

#[derive(Debug, Clone, Copy)]
#[repr(transparent)]
pub(crate) struct SseLanes<const FMA: bool>(__m128);

impl<const FMA: bool> SseLanes<FMA> {
    pub(crate) const fn lift_const(v: F32x4) -> Self {
        // SAFETY: F32x4 is 16 bytes of plain f32 lanes, like __m128.
        Self(unsafe { std::mem::transmute::<F32x4, __m128>(v) })
    }

    #[inline(always)]
    fn lift(v: F32x4) -> Self {
        // SAFETY: F32x4 is 16-byte aligned; SSE2 is enabled by every caller.
        Self(unsafe { _mm_load_ps(v.0.as_ptr()) })
    }

    #[inline(always)]
    fn lower(self) -> F32x4 {
        let mut out = F32x4([0.0; LANE_COUNT]);
        // SAFETY: as for `lift`.
        unsafe { _mm_store_ps(out.0.as_mut_ptr(), self.0) };
        out
    }

    #[inline(always)]
    fn from_int(r: __m128i) -> Self {
        // SAFETY: a bit cast, valid wherever SSE2 is.
        Self(unsafe { _mm_castsi128_ps(r) })
    }

    #[inline(always)]
    fn as_int(self) -> __m128i {
        // SAFETY: a bit cast, valid wherever SSE2 is.
        unsafe { _mm_castps_si128(self.0) }
    }
}

forward_lane_constants!(SseLanes, F32x4);

macro_rules! sse_binary {
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

impl<const FMA: bool> SimdLanes for SseLanes<FMA> {
    type Scalar = f32;

    #[inline(always)]
    fn is_accelerated() -> bool {
        true
    }

    #[inline(always)]
    fn splat(value: f32) -> Self {
        // SAFETY: see the module documentation.
        Self(unsafe { _mm_set1_ps(value) })
    }

    #[inline(always)]
    fn from_array(lanes: [f32; LANE_COUNT]) -> Self {
        // SAFETY: unaligned load of four readable floats.
        Self(unsafe { _mm_loadu_ps(lanes.as_ptr()) })
    }

    #[inline(always)]
    fn to_array(self) -> [f32; LANE_COUNT] {
        let mut out = [0.0; LANE_COUNT];
        // SAFETY: unaligned store into four writable floats.
        unsafe { _mm_storeu_ps(out.as_mut_ptr(), self.0) };
        out
    }

    sse_binary! {
        add => _mm_add_ps,
        sub => _mm_sub_ps,
        mul => _mm_mul_ps,
        div => _mm_div_ps,
        min => _mm_min_ps,
        max => _mm_max_ps,
        and => _mm_and_ps,
        or => _mm_or_ps,
        xor => _mm_xor_ps,
        and_not => _mm_andnot_ps,
        cmp_eq => _mm_cmpeq_ps,
        cmp_ne => _mm_cmpneq_ps,
        cmp_lt => _mm_cmplt_ps,
        cmp_le => _mm_cmple_ps,
        cmp_gt => _mm_cmpgt_ps,
        cmp_ge => _mm_cmpge_ps,
        horizontal_add => _mm_hadd_ps,
    }

    #[inline(always)]
    fn sqrt(self) -> Self {
        // SAFETY: see the module documentation.
        Self(unsafe { _mm_sqrt_ps(self.0) })
    }

    #[inline(always)]
    fn round(self) -> Self {
        // SAFETY: see the module documentation.
        Self(unsafe { _mm_round_ps::<{ _MM_FROUND_TO_NEAREST_INT | _MM_FROUND_NO_EXC }>(self.0) })
    }

    #[inline(always)]
    fn truncate(self) -> Self {
        // SAFETY: see the module documentation.
        Self(unsafe { _mm_round_ps::<{ _MM_FROUND_TO_ZERO | _MM_FROUND_NO_EXC }>(self.0) })
    }

    #[inline(always)]
    fn eq_bits(self, rhs: Self) -> Self {
        // SAFETY: see the module documentation.
        Self::from_int(unsafe { _mm_cmpeq_epi32(self.as_int(), rhs.as_int()) })
    }

    #[inline(always)]
    fn select(mask: Self, if_true: Self, if_false: Self) -> Self {
        // SAFETY: see the module documentation.
        Self(unsafe { _mm_blendv_ps(if_false.0, if_true.0, mask.0) })
    }

    #[inline(always)]
    fn broadcast(self, lane: usize) -> Self {
        let v = self.0;
        // SAFETY: see the module documentation.
        let r = unsafe {
            match lane {
                0 => _mm_shuffle_ps::<0x00>(v, v),
                1 => _mm_shuffle_ps::<0x55>(v, v),
                2 => _mm_shuffle_ps::<0xAA>(v, v),
                3 => _mm_shuffle_ps::<0xFF>(v, v),
                _ => panic!("lane index {lane} out of range for a 4-lane vector"),
            }
        };
        Self(r)
    }

    #[inline(always)]
    fn convert_to_int_bits(self) -> Self {
        // SAFETY: see the module documentation.
        Self::from_int(unsafe { _mm_cvtps_epi32(self.0) })
    }

    #[inline(always)]
    fn reciprocal_approx(self) -> Self {
        // SAFETY: see the module documentation.
        Self(unsafe { _mm_rcp_ps(self.0) })
    }

    #[inline(always)]
    fn reciprocal_sqrt_approx(self) -> Self {
        // SAFETY: see the module documentation.
        Self(unsafe { _mm_rsqrt_ps(self.0) })
    }

    #[inline(always)]
    fn mul_add(self, b: Self, c: Self) -> Self {
        if FMA {
            // SAFETY: `SseLanes<true>` only exists inside `run_fused`.
            Self(unsafe { _mm_fmadd_ps(self.0, b.0, c.0) })
        } else {
            self.mul(b).add(c)
        }
    }

    #[inline(always)]
    fn neg_mul_add(self, b: Self, c: Self) -> Self {
        if FMA {
            // SAFETY: `SseLanes<true>` only exists inside `run_fused`.
            Self(unsafe { _mm_fnmadd_ps(self.0, b.0, c.0) })
        } else {
            c.sub(self.mul(b))
        }
    }

    #[inline(always)]
    fn mul_sub(self, b: Self, c: Self) -> Self {
        if FMA {
            // SAFETY: `SseLanes<true>` only exists inside `run_fused`.
            Self(unsafe { _mm_fmsub_ps(self.0, b.0, c.0) })
        } else {
            self.mul(b).sub(c)
        }
    }
}

/// Runs `kernel` with SSE2, SSE3 and SSE4.1 enabled.
#[target_feature(enable = "sse2,sse3,sse4.1")]
pub(crate) unsafe fn run<K: LaneKernel>(kernel: &K, a: F32x4, b: F32x4) -> (F32x4, F32x4) {
    let (x, y) = kernel.apply(SseLanes::<false>::lift(a), SseLanes::<false>::lift(b));
    (x.lower(), y.lower())
}

/// Runs `kernel` with FMA enabled on top of [`run`]'s extensions.
#[target_feature(enable = "sse2,sse3,sse4.1,fma")]
pub(crate) unsafe fn run_fused<K: LaneKernel>(kernel: &K, a: F32x4, b: F32x4) -> (F32x4, F32x4) {
    let (x, y) = kernel.apply(SseLanes::<true>::lift(a), SseLanes::<true>::lift(b));
    (x.lower(), y.lower())
}
