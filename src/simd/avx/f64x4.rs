//! AVX intrinsic kernels for `F64x4`.

#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use crate::simd::F64x4;

#[inline]
#[target_feature(enable = "avx")]
unsafe fn load(v: F64x4) -> __m256d {
    _mm256_load_pd(v.0.as_ptr())
}

#[inline]
#[target_feature(enable = "avx")]
unsafe fn store(r: __m256d) -> F64x4 {
    let mut out = F64x4([0.0; 4]);
    _mm256_store_pd(out.0.as_mut_ptr(), r);
    out
}

macro_rules! binary_kernels {
    ($($name:ident => $intrinsic:ident),* $(,)?) => {
        $(
            #[inline]
            #[target_feature(enable = "avx")]
            pub(crate) unsafe fn $name(a: F64x4, b: F64x4) -> F64x4 {
                store($intrinsic(load(a), load(b)))
            }
        )*
    };
}

binary_kernels! {
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

macro_rules! compare_kernels {
    ($($name:ident => $predicate:ident),* $(,)?) => {
        $(
            #[inline]
            #[target_feature(enable = "avx")]
            pub(crate) unsafe fn $name(a: F64x4, b: F64x4) -> F64x4 {
                store(_mm256_cmp_pd::<$predicate>(load(a), load(b)))
            }
        )*
    };
}

// Ordered predicates are false on NaN; `!=` is unordered, so true on NaN.
compare_kernels! {
    cmp_eq => _CMP_EQ_OQ,
    cmp_ne => _CMP_NEQ_UQ,
    cmp_lt => _CMP_LT_OQ,
    cmp_le => _CMP_LE_OQ,
    cmp_gt => _CMP_GT_OQ,
    cmp_ge => _CMP_GE_OQ,
}

#[inline]
#[target_feature(enable = "avx")]
pub(crate) unsafe fn sqrt(v: F64x4) -> F64x4 {
    store(_mm256_sqrt_pd(load(v)))
}

#[inline]
#[target_feature(enable = "avx")]
pub(crate) unsafe fn round(v: F64x4) -> F64x4 {
    store(_mm256_round_pd::<{ _MM_FROUND_TO_NEAREST_INT | _MM_FROUND_NO_EXC }>(load(v)))
}

#[inline]
#[target_feature(enable = "avx")]
pub(crate) unsafe fn truncate(v: F64x4) -> F64x4 {
    store(_mm256_round_pd::<{ _MM_FROUND_TO_ZERO | _MM_FROUND_NO_EXC }>(load(v)))
}

#[inline]
#[target_feature(enable = "avx")]
pub(crate) unsafe fn select(mask: F64x4, if_true: F64x4, if_false: F64x4) -> F64x4 {
    store(_mm256_blendv_pd(load(if_false), load(if_true), load(mask)))
}

#[inline]
#[target_feature(enable = "avx")]
pub(crate) unsafe fn broadcast(v: F64x4, lane: usize) -> F64x4 {
    let v = load(v);
    let r = match lane {
        0 => _mm256_permute_pd::<0b0000>(_mm256_permute2f128_pd::<0x00>(v, v)),
        1 => _mm256_permute_pd::<0b1111>(_mm256_permute2f128_pd::<0x00>(v, v)),
        2 => _mm256_permute_pd::<0b0000>(_mm256_permute2f128_pd::<0x11>(v, v)),
        3 => _mm256_permute_pd::<0b1111>(_mm256_permute2f128_pd::<0x11>(v, v)),
        _ => panic!("lane index {lane} out of range for a 4-lane vector"),
    };
    store(r)
}

#[inline]
#[target_feature(enable = "avx,sse4.1")]
pub(crate) unsafe fn eq_bits(a: F64x4, b: F64x4) -> F64x4 {
    let a = _mm256_castpd_si256(load(a));
    let b = _mm256_castpd_si256(load(b));

    let lo = _mm_cmpeq_epi64(_mm256_castsi256_si128(a), _mm256_castsi256_si128(b));
    let hi = _mm_cmpeq_epi64(
        _mm256_extractf128_si256::<1>(a),
        _mm256_extractf128_si256::<1>(b),
    );

    store(_mm256_castsi256_pd(_mm256_set_m128i(hi, lo)))
}

/// Rounds to 32-bit integers, then sign-extends each into its 64-bit lane.
#[inline]
#[target_feature(enable = "avx,sse4.1")]
pub(crate) unsafe fn convert_to_int_bits(v: F64x4) -> F64x4 {
    let ints = _mm256_cvtpd_epi32(load(v));
    let lo = _mm_cvtepi32_epi64(ints);
    let hi = _mm_cvtepi32_epi64(_mm_srli_si128::<8>(ints));
    store(_mm256_castsi256_pd(_mm256_set_m128i(hi, lo)))
}

#[inline]
#[target_feature(enable = "avx,fma")]
pub(crate) unsafe fn mul_add(a: F64x4, b: F64x4, c: F64x4) -> F64x4 {
    store(_mm256_fmadd_pd(load(a), load(b), load(c)))
}

#[inline]
#[target_feature(enable = "avx,fma")]
pub(crate) unsafe fn neg_mul_add(a: F64x4, b: F64x4, c: F64x4) -> F64x4 {
    store(_mm256_fnmadd_pd(load(a), load(b), load(c)))
}

#[inline]
#[target_feature(enable = "avx,fma")]
pub(crate) unsafe fn mul_sub(a: F64x4, b: F64x4, c: F64x4) -> F64x4 {
    store(_mm256_fmsub_pd(load(a), load(b), load(c)))
}
