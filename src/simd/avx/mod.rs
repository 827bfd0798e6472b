//! AVX kernels for 256-bit lanes.
//!
//! The fast paths behind [`F64x4`](crate::simd::F64x4). Floating-point work
//! needs AVX; the integer-lane helpers also need SSE4.1 for the 64-bit
//! compare and sign extension, and the fused forms need FMA.
//!
//! Every kernel function here is `unsafe` and carries a `#[target_feature]`
//! attribute; callers must have checked the matching flags in
//! [`capabilities`](crate::capabilities) first.

//!
//! `lanes` runs whole kernels inside one AVX feature context.

pub(crate) mod f64x4;

pub(crate) mod lanes;
