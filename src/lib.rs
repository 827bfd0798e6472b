//! Lane-parallel 4-wide `f32`/`f64` math with runtime SIMD dispatch.
//!
//! ```rust
//! use lanewise::{F32x4, LaneMath, LaneSlice, SimdLanes};
//!
//! let v = F32x4::new(0.0, 0.5, 1.0, -1.0);
//! let s = v.sin();
//! assert!((s.extract(1) - 0.5f32.sin()).abs() < 1e-6);
//!
//! let angles = vec![0.25f64; 10];
//! let cosines = angles.cos();
//! assert_eq!(cosines.len(), 10);
//! ```

pub mod caps;

#[allow(clippy::excessive_precision)]
pub mod consts;

pub mod error;
pub mod math;
pub mod simd;
pub mod slice;

pub use caps::{capabilities, Capabilities, SimdTier};
pub use consts::LaneConstants;
pub use error::{LaneError, Result};
pub use math::LaneMath;
pub use simd::{F32x4, F64x4, LaneKernel, LaneScalar, SimdLanes, LANE_COUNT};
pub use slice::{map_slice_into, LaneElement, LaneSlice, PARALLEL_THRESHOLD};
