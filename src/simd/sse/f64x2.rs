//! SSE4.1 rounding for `F64x4`, one 128-bit half at a time.
//!
//! Used when the CPU has SSE4.1 but no AVX, so `F64x4` still rounds in
//! hardware while the rest of its kernels run in software.

#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use crate::simd::F64x4;

macro_rules! halves_kernel {
    ($name:ident, $mode:expr) => {
        #[inline]
        #[target_feature(enable = "sse4.1")]
        pub(crate) unsafe fn $name(v: F64x4) -> F64x4 {
            let src = v.0.as_ptr();
            let lo = _mm_round_pd::<{ $mode }>(_mm_load_pd(src));
            let hi = _mm_round_pd::<{ $mode }>(_mm_load_pd(src.add(2)));

            let mut out = F64x4([0.0; 4]);
            let dst = out.0.as_mut_ptr();
            _mm_store_pd(dst, lo);
            _mm_store_pd(dst.add(2), hi);
            out
        }
    };
}

halves_kernel!(round, _MM_FROUND_TO_NEAREST_INT | _MM_FROUND_NO_EXC);
halves_kernel!(truncate, _MM_FROUND_TO_ZERO | _MM_FROUND_NO_EXC);
