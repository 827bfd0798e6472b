//! Lane vector types and their runtime-dispatched kernels.
//!
//! [`F32x4`] and [`F64x4`] both implement [`SimdLanes`]. Each operation reads
//! the cached [`capabilities`](crate::capabilities) and runs its intrinsic
//! kernel when the required extension is present, or the portable kernel
//! from `software` otherwise.
//!
//! Multi-step computations are written as a [`LaneKernel`] and handed to
//! [`SimdLanes::run`], which checks the flags once and runs the whole kernel
//! on a register-resident backend (`sse::lanes`, `avx::lanes`).

/// Runs `$fast` when every named capability flag is set, `$fallback`
/// otherwise.
///
/// `$fast` is only compiled on x86 targets; elsewhere the fallback is the
/// whole body.
macro_rules! dispatch {
    ($($flag:ident)&&+ => $fast:expr, else $fallback:expr) => {{
        #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
        {
            let caps = $crate::caps::capabilities();
            if $(caps.$flag)&&+ {
                // SAFETY: the extensions the kernel is compiled for were detected.
                return unsafe { $fast };
            }
        }
        $fallback
    }};
}

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
mod avx;

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
mod sse;

mod f32x4;
mod f64x4;
mod ops;
pub(crate) mod software;
pub mod traits;

pub use f32x4::F32x4;
pub use f64x4::F64x4;
pub use traits::{LaneKernel, LaneScalar, SimdLanes, LANE_COUNT};
