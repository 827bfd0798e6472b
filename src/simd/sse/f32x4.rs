//! SSE intrinsic kernels for `F32x4`.
//!
//! Vectors go through aligned `_mm_load_ps`/`_mm_store_ps`, which the
//! 16-byte alignment of [`F32x4`] makes valid for every value.

#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use crate::simd::F32x4;

#[inline]
#[target_feature(enable = "sse2")]
unsafe fn load(v: F32x4) -> __m128 {
    _mm_load_ps(v.0.as_ptr())
}

#[inline]
#[target_feature(enable = "sse2")]
unsafe fn store(r: __m128) -> F32x4 {
    let mut out = F32x4([0.0; 4]);
    _mm_store_ps(out.0.as_mut_ptr(), r);
    out
}

#[inline]
#[target_feature(enable = "sse2")]
unsafe fn store_int(r: __m128i) -> F32x4 {
    store(_mm_castsi128_ps(r))
}

macro_rules! binary_kernels {
    ($($name:ident => $intrinsic:ident),* $(,)?) => {
        $(
            #[inline]
            #[target_feature(enable = "sse2")]
            pub(crate) unsafe fn $name(a: F32x4, b: F32x4) -> F32x4 {
                store($intrinsic(load(a), load(b)))
            }
        )*
    };
}

binary_kernels! {
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
}

#[inline]
#[target_feature(enable = "sse2")]
pub(crate) unsafe fn sqrt(v: F32x4) -> F32x4 {
    store(_mm_sqrt_ps(load(v)))
}

#[inline]
#[target_feature(enable = "sse2")]
pub(crate) unsafe fn reciprocal_approx(v: F32x4) -> F32x4 {
    store(_mm_rcp_ps(load(v)))
}

#[inline]
#[target_feature(enable = "sse2")]
pub(crate) unsafe fn reciprocal_sqrt_approx(v: F32x4) -> F32x4 {
    store(_mm_rsqrt_ps(load(v)))
}

#[inline]
#[target_feature(enable = "sse2")]
pub(crate) unsafe fn eq_bits(a: F32x4, b: F32x4) -> F32x4 {
    let a = _mm_castps_si128(load(a));
    let b = _mm_castps_si128(load(b));
    store_int(_mm_cmpeq_epi32(a, b))
}

#[inline]
#[target_feature(enable = "sse2")]
pub(crate) unsafe fn convert_to_int_bits(v: F32x4) -> F32x4 {
    store_int(_mm_cvtps_epi32(load(v)))
}

/// Bitwise select for CPUs without `blendv`.
#[inline]
#[target_feature(enable = "sse2")]
pub(crate) unsafe fn select(mask: F32x4, if_true: F32x4, if_false: F32x4) -> F32x4 {
    let mask = load(mask);
    let picked = _mm_and_ps(mask, load(if_true));
    let rest = _mm_andnot_ps(mask, load(if_false));
    store(_mm_or_ps(picked, rest))
}

#[inline]
#[target_feature(enable = "sse2")]
pub(crate) unsafe fn broadcast(v: F32x4, lane: usize) -> F32x4 {
    let v = load(v);
    let r = match lane {
        0 => _mm_shuffle_ps::<0x00>(v, v),
        1 => _mm_shuffle_ps::<0x55>(v, v),
        2 => _mm_shuffle_ps::<0xAA>(v, v),
        3 => _mm_shuffle_ps::<0xFF>(v, v),
        _ => panic!("lane index {lane} out of range for a 4-lane vector"),
    };
    store(r)
}

#[inline]
#[target_feature(enable = "sse3")]
pub(crate) unsafe fn horizontal_add(a: F32x4, b: F32x4) -> F32x4 {
    store(_mm_hadd_ps(load(a), load(b)))
}

#[inline]
#[target_feature(enable = "sse4.1")]
pub(crate) unsafe fn round(v: F32x4) -> F32x4 {
    store(_mm_round_ps::<{ _MM_FROUND_TO_NEAREST_INT | _MM_FROUND_NO_EXC }>(load(v)))
}

#[inline]
#[target_feature(enable = "sse4.1")]
pub(crate) unsafe fn truncate(v: F32x4) -> F32x4 {
    store(_mm_round_ps::<{ _MM_FROUND_TO_ZERO | _MM_FROUND_NO_EXC }>(load(v)))
}

/// `blendv` picks its second operand where the mask sign bit is set.
#[inline]
#[target_feature(enable = "sse4.1")]
pub(crate) unsafe fn blend(mask: F32x4, if_true: F32x4, if_false: F32x4) -> F32x4 {
    store(_mm_blendv_ps(load(if_false), load(if_true), load(mask)))
}

#[inline]
#[target_feature(enable = "fma")]
pub(crate) unsafe fn mul_add(a: F32x4, b: F32x4, c: F32x4) -> F32x4 {
    store(_mm_fmadd_ps(load(a), load(b), load(c)))
}

#[inline]
#[target_feature(enable = "fma")]
pub(crate) unsafe fn neg_mul_add(a: F32x4, b: F32x4, c: F32x4) -> F32x4 {
    store(_mm_fnmadd_ps(load(a), load(b), load(c)))
}

#[inline]
#[target_feature(enable = "fma")]
pub(crate) unsafe fn mul_sub(a: F32x4, b: F32x4, c: F32x4) -> F32x4 {
    store(_mm_fmsub_ps(load(a), load(b), load(c)))
}
