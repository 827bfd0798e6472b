//! Transcendental functions over lane vectors.
//!
//! Every function is generic over [`SimdLanes`] and comes in a precise and an
//! approximate tier. When the vector type has an intrinsic tier the
//! polynomial evaluators run as one [`LaneKernel`] through [`SimdLanes::run`];
//! otherwise each lane goes through the `std` function and the approximate
//! tier falls back to the precise one.
//!
//! # Function Reference
//!
//! | Function | Domain | Range | Accuracy |
//! |----------|--------|-------|----------|
//! | `sin`, `cos`, `sin_cos` | All reals | [-1, 1] | 1e-6 abs for \|x\| ≤ 100π |
//! | `sin_approx`, `cos_approx`, `sin_cos_approx` | All reals | [-1, 1] | 1e-3 abs |
//! | `tan` | All reals | All reals | 1e-5 rel away from poles |
//! | `tan_approx` | [-1.2, 1.2] | All reals | 1e-2 rel |
//! | `atan` | All reals | [-π/2, π/2] | 1e-6 abs |
//! | `atan_approx` | All reals | [-π/2, π/2] | 1e-4 abs |
//! | `atan2` | All reals × All reals | [-π, π] | 1e-6 abs |
//!
//! Non-finite inputs follow IEEE-754: `sin`, `cos` and `tan` of `±∞` or NaN
//! are NaN, `atan(±∞)` is `±π/2`.

/// Declares a unit [`LaneKernel`] applying a one-argument evaluator to its
/// first input. The result fills both outputs.
macro_rules! unary_kernel {
    ($kernel:ident => $poly:ident) => {
        pub(crate) struct $kernel;

        impl $crate::simd::LaneKernel for $kernel {
            #[inline(always)]
            fn apply<V: $crate::simd::SimdLanes>(&self, a: V, _: V) -> (V, V) {
                let result = $poly(a);
                (result, result)
            }
        }
    };
}

mod atan;
pub mod poly;
pub mod reduce;
mod sincos;
mod tan;

pub use atan::{atan, atan2, atan_approx};
pub use sincos::{cos, cos_approx, sin, sin_approx, sin_cos, sin_cos_approx};
pub use tan::{tan, tan_approx};

use crate::simd::{LaneKernel, SimdLanes};

/// First output of `kernel` run on `v`.
#[inline(always)]
fn run_unary<V: SimdLanes, K: LaneKernel>(kernel: &K, v: V) -> V {
    V::run(kernel, v, v).0
}

/// Method-call access to the functions of this module.
///
/// ```rust
/// use lanewise::{F64x4, LaneMath, SimdLanes};
///
/// let angles = F64x4::new(0.0, 0.5, 1.0, 1.5);
/// let (s, c) = angles.sin_cos();
/// let one = s.square().add(c.square());
/// assert!(one.to_array().iter().all(|v| (v - 1.0).abs() < 1e-6));
/// ```
pub trait LaneMath: SimdLanes {
    #[inline]
    fn sin(self) -> Self {
        sin(self)
    }

    #[inline]
    fn sin_approx(self) -> Self {
        sin_approx(self)
    }

    #[inline]
    fn cos(self) -> Self {
        cos(self)
    }

    #[inline]
    fn cos_approx(self) -> Self {
        cos_approx(self)
    }

    #[inline]
    fn sin_cos(self) -> (Self, Self) {
        sin_cos(self)
    }

    #[inline]
    fn sin_cos_approx(self) -> (Self, Self) {
        sin_cos_approx(self)
    }

    #[inline]
    fn tan(self) -> Self {
        tan(self)
    }

    #[inline]
    fn tan_approx(self) -> Self {
        tan_approx(self)
    }

    #[inline]
    fn atan(self) -> Self {
        atan(self)
    }

    #[inline]
    fn atan_approx(self) -> Self {
        atan_approx(self)
    }

    /// `atan2(self, x)`, with `self` as the `y` coordinate.
    #[inline]
    fn atan2(self, x: Self) -> Self {
        atan2(self, x)
    }
}

impl<V: SimdLanes> LaneMath for V {}
