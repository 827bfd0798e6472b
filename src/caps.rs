//! Runtime SIMD capability detection.
//!
//! The instruction extensions usable by the lane kernels are probed once per
//! process and cached in a `OnceLock`. Every dispatching operation reads the
//! cached flags and picks its intrinsic fast path or its software fallback;
//! since the flags never change after the first read, the choice is stable
//! for the lifetime of the process.
//!
//! | Tier | Extensions | Used for |
//! |------|------------|----------|
//! | `Baseline` | SSE2 | every `F32x4` kernel |
//! | `Extended` | SSE4.1 | rounding, blends, 64-bit integer lanes |
//! | `Widest` | AVX + FMA | every `F64x4` kernel, fused multiply-add |
//!
//! Building with the `force-software` feature makes detection report an
//! empty flag set, so every operation takes its software fallback.

use std::sync::OnceLock;

static CAPABILITIES: OnceLock<Capabilities> = OnceLock::new();

/// Ordered summary of the detected SIMD tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SimdTier {
    /// No usable extension, every operation runs the software fallback.
    Software,
    /// SSE2, 128-bit lanes.
    Baseline,
    /// SSE4.1 on top of the baseline: hardware rounding and blends.
    Extended,
    /// AVX with FMA: 256-bit lanes and fused multiply-add.
    Widest,
}

/// Instruction extensions available to the current process.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Capabilities {
    pub sse2: bool,
    pub sse3: bool,
    pub sse41: bool,
    pub avx: bool,
    pub fma: bool,
}

impl Capabilities {
    /// Probes the CPU. Prefer [`capabilities`], which probes only once.
    pub fn detect() -> Self {
        if cfg!(feature = "force-software") {
            return Self::default();
        }

        Self::detect_hardware()
    }

    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
    fn detect_hardware() -> Self {
        Self {
            sse2: is_x86_feature_detected!("sse2"),
            sse3: is_x86_feature_detected!("sse3"),
            sse41: is_x86_feature_detected!("sse4.1"),
            avx: is_x86_feature_detected!("avx"),
            fma: is_x86_feature_detected!("fma"),
        }
    }

    #[cfg(not(any(target_arch = "x86", target_arch = "x86_64")))]
    fn detect_hardware() -> Self {
        Self::default()
    }

    /// The richest tier whose requirements are all met.
    pub fn tier(&self) -> SimdTier {
        if self.avx && self.fma {
            SimdTier::Widest
        } else if self.sse41 {
            SimdTier::Extended
        } else if self.sse2 {
            SimdTier::Baseline
        } else {
            SimdTier::Software
        }
    }
}

/// Process-wide capability flags, detected on first call.
#[inline(always)]
pub fn capabilities() -> &'static Capabilities {
    CAPABILITIES.get_or_init(|| {
        let detected = Capabilities::detect();
        tracing::debug!(
            tier = ?detected.tier(),
            sse2 = detected.sse2,
            sse3 = detected.sse3,
            sse41 = detected.sse41,
            avx = detected.avx,
            fma = detected.fma,
            "SIMD capabilities detected"
        );
        detected
    })
}
