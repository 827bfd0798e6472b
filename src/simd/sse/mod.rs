//! SSE-family kernels for 128-bit lanes.
//!
//! These are the fast paths behind [`F32x4`](crate::simd::F32x4), plus the
//! SSE4.1 rounding used by [`F64x4`](crate::simd::F64x4) on CPUs with SSE4.1
//! but without AVX.
//!
//! # Architecture Requirements
//!
//! - **Baseline**: SSE2 for arithmetic, logic, comparisons and conversions
//! - **SSE3**: horizontal add
//! - **SSE4.1**: hardware rounding and `blendv` selection
//! - **FMA**: fused multiply-add forms
//!
//! Every kernel function here is `unsafe` and carries a `#[target_feature]`
//! attribute; callers must have checked the matching flag in
//! [`capabilities`](crate::capabilities) first.
//!
//! `f32x4` holds one kernel per operation, for single dispatched calls.
//! `lanes` runs whole kernels inside one feature context.

pub(crate) mod f32x4;

pub(crate) mod lanes;

pub(crate) mod f64x2;
