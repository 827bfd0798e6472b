use std::fmt::Debug;

use num::{Float, PrimInt, Zero};

use crate::consts::LaneConstants;

/// Number of lanes in every vector type of this crate.
pub const LANE_COUNT: usize = 4;

/// Scalar element held by a lane vector (`f32` or `f64`).
///
/// Extends [`num::Float`] with the raw-bit access the bitwise kernels need and
/// with the two conversions whose exact behaviour has to match the hardware.
pub trait LaneScalar: Float + Default + Debug + Send + Sync + 'static {
    /// Unsigned integer with the same width as the float.
    type Bits: PrimInt + Debug + Send + Sync;

    fn lane_bits(self) -> Self::Bits;

    fn from_lane_bits(bits: Self::Bits) -> Self;

    /// Round to nearest integer, ties to even.
    fn round_even(self) -> Self;

    /// Round-to-nearest conversion to a 32-bit integer, sign-extended to the
    /// lane width. NaN and out-of-range values give `i32::MIN`, the x86
    /// "integer indefinite" value.
    fn int_bits(self) -> Self::Bits;
}

impl LaneScalar for f32 {
    type Bits = u32;

    #[inline(always)]
    fn lane_bits(self) -> u32 {
        self.to_bits()
    }

    #[inline(always)]
    fn from_lane_bits(bits: u32) -> Self {
        f32::from_bits(bits)
    }

    #[inline(always)]
    fn round_even(self) -> Self {
        self.round_ties_even()
    }

    #[inline(always)]
    fn int_bits(self) -> u32 {
        let rounded = self.round_ties_even();
        let value = if (-2_147_483_648.0..2_147_483_648.0).contains(&rounded) {
            rounded as i32
        } else {
            i32::MIN
        };
        value as u32
    }
}

impl LaneScalar for f64 {
    type Bits = u64;

    #[inline(always)]
    fn lane_bits(self) -> u64 {
        self.to_bits()
    }

    #[inline(always)]
    fn from_lane_bits(bits: u64) -> Self {
        f64::from_bits(bits)
    }

    #[inline(always)]
    fn round_even(self) -> Self {
        self.round_ties_even()
    }

    #[inline(always)]
    fn int_bits(self) -> u64 {
        let rounded = self.round_ties_even();
        let value = if (-2_147_483_648.0..2_147_483_648.0).contains(&rounded) {
            rounded as i32
        } else {
            i32::MIN
        };
        value as i64 as u64
    }
}

/// A lane computation written once against [`SimdLanes`] and run on
/// whichever backend [`SimdLanes::run`] selects.
///
/// Kernels take two vectors and return two. Unary kernels ignore `b`;
/// kernels with one result return it first. `apply` should be
/// `#[inline(always)]` so it is compiled into the backend's feature context.
pub trait LaneKernel {
    fn apply<V: SimdLanes>(&self, a: V, b: V) -> (V, V);
}

/// A fixed-width vector of four floating-point lanes.
///
/// Every required kernel has an intrinsic fast path and a software fallback,
/// picked per call from the process-wide [`capabilities`](crate::capabilities).
/// Both paths give the same bits for every exact operation; the `_approx`
/// reciprocals and the fused forms only agree to their documented tolerance.
///
/// Masks are vectors of the same type whose lanes are either all ones or
/// all zeros, as produced by the `cmp_*` family.
pub trait SimdLanes: LaneConstants + Copy + Debug + Send + Sync + 'static {
    type Scalar: LaneScalar;

    const LANES: usize = LANE_COUNT;

    /// Whether the intrinsic tier backing this type was detected. The
    /// transcendental evaluators use it to choose between the polynomial path
    /// and the per-lane `std` fallback.
    fn is_accelerated() -> bool;

    fn splat(value: Self::Scalar) -> Self;

    fn from_array(lanes: [Self::Scalar; LANE_COUNT]) -> Self;

    fn to_array(self) -> [Self::Scalar; LANE_COUNT];

    /// Runs a whole kernel on the fastest backend for this type.
    ///
    /// The capability flags are read once here. `F32x4` and `F64x4` enter a
    /// `#[target_feature]` function whose backend calls intrinsics directly,
    /// so nothing inside the kernel dispatches again. Without those tiers the
    /// kernel runs on `Self`, one dispatched operation at a time.
    #[inline(always)]
    fn run<K: LaneKernel>(kernel: &K, a: Self, b: Self) -> (Self, Self) {
        kernel.apply(a, b)
    }

    /// Loads up to four values, zero-filling the lanes past the end of `slice`.
    #[inline(always)]
    fn from_slice(slice: &[Self::Scalar]) -> Self {
        let mut lanes = [<Self::Scalar as Zero>::zero(); LANE_COUNT];
        let len = slice.len().min(LANE_COUNT);
        lanes[..len].copy_from_slice(&slice[..len]);
        Self::from_array(lanes)
    }

    /// Reads one lane.
    ///
    /// # Panics
    ///
    /// Panics if `lane >= 4`.
    #[inline(always)]
    fn extract(self, lane: usize) -> Self::Scalar {
        self.to_array()[lane]
    }

    #[inline(always)]
    fn map<F: Fn(Self::Scalar) -> Self::Scalar>(self, f: F) -> Self {
        Self::from_array(self.to_array().map(f))
    }

    #[inline(always)]
    fn zip_map<F: Fn(Self::Scalar, Self::Scalar) -> Self::Scalar>(self, other: Self, f: F) -> Self {
        let a = self.to_array();
        let b = other.to_array();
        Self::from_array(std::array::from_fn(|i| f(a[i], b[i])))
    }

    fn add(self, rhs: Self) -> Self;

    fn sub(self, rhs: Self) -> Self;

    fn mul(self, rhs: Self) -> Self;

    /// IEEE-754 division, `x / 0` gives a signed infinity or NaN.
    fn div(self, rhs: Self) -> Self;

    fn sqrt(self) -> Self;

    /// Lane-wise minimum. The second operand wins when either lane is NaN or
    /// both are zero.
    fn min(self, rhs: Self) -> Self;

    /// Lane-wise maximum. The second operand wins when either lane is NaN or
    /// both are zero.
    fn max(self, rhs: Self) -> Self;

    /// Round to nearest integer, ties to even.
    fn round(self) -> Self;

    /// Round toward zero.
    fn truncate(self) -> Self;

    fn and(self, rhs: Self) -> Self;

    fn or(self, rhs: Self) -> Self;

    fn xor(self, rhs: Self) -> Self;

    /// `!self & rhs`, the x86 `andnot` operand order.
    fn and_not(self, rhs: Self) -> Self;

    fn cmp_eq(self, rhs: Self) -> Self;

    /// Unordered not-equal: NaN lanes compare as not equal.
    fn cmp_ne(self, rhs: Self) -> Self;

    fn cmp_lt(self, rhs: Self) -> Self;

    fn cmp_le(self, rhs: Self) -> Self;

    fn cmp_gt(self, rhs: Self) -> Self;

    fn cmp_ge(self, rhs: Self) -> Self;

    /// Integer equality of the raw lane bits.
    fn eq_bits(self, rhs: Self) -> Self;

    /// Per lane: `if_true` where `mask` is all ones, `if_false` where it is
    /// all zeros.
    fn select(mask: Self, if_true: Self, if_false: Self) -> Self;

    /// Replicates lane `lane` into all four lanes.
    ///
    /// # Panics
    ///
    /// Panics if `lane >= 4`.
    fn broadcast(self, lane: usize) -> Self;

    /// Adds adjacent lane pairs of `self` and `rhs`. The output layout is the
    /// one of the instruction backing the type, see the type's documentation.
    fn horizontal_add(self, rhs: Self) -> Self;

    /// Rounds each lane to the nearest integer and stores it as an integer in
    /// the lane bits (see [`LaneScalar::int_bits`]).
    fn convert_to_int_bits(self) -> Self;

    fn reciprocal_approx(self) -> Self;

    fn reciprocal_sqrt_approx(self) -> Self;

    /// `self * b + c`, fused when FMA is available.
    fn mul_add(self, b: Self, c: Self) -> Self;

    /// `c - self * b`, fused when FMA is available.
    fn neg_mul_add(self, b: Self, c: Self) -> Self;

    /// `self * b - c`, fused when FMA is available.
    fn mul_sub(self, b: Self, c: Self) -> Self;

    #[inline(always)]
    fn square(self) -> Self {
        self.mul(self)
    }

    /// Flips the sign bit, leaving zeros and NaN payloads otherwise intact.
    #[inline(always)]
    fn negate(self) -> Self {
        self.xor(Self::SIGN_MASK)
    }

    /// `max(-v, v)`. A `-0.0` lane passes through unchanged since the max of
    /// two equal zeros is the second operand.
    #[inline(always)]
    fn abs(self) -> Self {
        self.negate().max(self)
    }

    #[inline(always)]
    fn clamp(self, low: Self, high: Self) -> Self {
        self.min(high).max(low)
    }

    /// Keeps only the sign bit of each lane.
    #[inline(always)]
    fn extract_sign(self) -> Self {
        self.and(Self::SIGN_MASK)
    }

    /// Magnitude of `self` with the sign of `sign`.
    #[inline(always)]
    fn copy_sign(self, sign: Self) -> Self {
        sign.extract_sign().or(self.abs())
    }

    /// `self - truncate(self / rhs) * rhs`.
    #[inline(always)]
    fn remainder(self, rhs: Self) -> Self {
        let quotient = self.div(rhs).truncate();
        self.sub(quotient.mul(rhs))
    }

    #[inline(always)]
    fn reciprocal(self) -> Self {
        Self::ONE.div(self)
    }

    #[inline(always)]
    fn reciprocal_sqrt(self) -> Self {
        Self::ONE.div(self.sqrt())
    }

    /// Mask of lanes with `-bound <= self <= bound`.
    #[inline(always)]
    fn in_bounds(self, bound: Self) -> Self {
        let below = self.cmp_le(bound);
        let above = self.cmp_ge(bound.negate());
        below.and(above)
    }

    #[inline(always)]
    fn is_infinite(self) -> Self {
        self.and(Self::ABS_MASK).cmp_eq(Self::INFINITY)
    }

    #[inline(always)]
    fn is_nan(self) -> Self {
        self.cmp_ne(self)
    }
}
