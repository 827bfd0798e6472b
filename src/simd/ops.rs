//! Operator overloads for the lane vector types.
//!
//! Arithmetic operators accept a vector or a scalar on the right-hand side;
//! a scalar is broadcast to all four lanes. Bitwise operators work on the
//! raw lane bits, the way masks are combined.

use std::ops::{
    Add, AddAssign, BitAnd, BitOr, BitXor, Div, DivAssign, Mul, MulAssign, Neg, Rem, Sub,
    SubAssign,
};

use super::traits::{SimdLanes, LANE_COUNT};
use super::{F32x4, F64x4};

macro_rules! arithmetic_operator {
    ($vector:ty, $scalar:ty, $op:ident, $method:ident, $assign:ident, $assign_method:ident, $kernel:ident) => {
        impl $op for $vector {
            type Output = Self;

            #[inline(always)]
            fn $method(self, rhs: Self) -> Self {
                <$vector as SimdLanes>::$kernel(self, rhs)
            }
        }

        impl $op<$scalar> for $vector {
            type Output = Self;

            #[inline(always)]
            fn $method(self, rhs: $scalar) -> Self {
                <$vector as SimdLanes>::$kernel(self, <$vector as SimdLanes>::splat(rhs))
            }
        }

        impl $assign for $vector {
            #[inline(always)]
            fn $assign_method(&mut self, rhs: Self) {
                *self = <$vector as SimdLanes>::$kernel(*self, rhs);
            }
        }

        impl $assign<$scalar> for $vector {
            #[inline(always)]
            fn $assign_method(&mut self, rhs: $scalar) {
                *self = <$vector as SimdLanes>::$kernel(*self, <$vector as SimdLanes>::splat(rhs));
            }
        }
    };
}

macro_rules! bitwise_operator {
    ($vector:ty, $op:ident, $method:ident, $kernel:ident) => {
        impl $op for $vector {
            type Output = Self;

            #[inline(always)]
            fn $method(self, rhs: Self) -> Self {
                <$vector as SimdLanes>::$kernel(self, rhs)
            }
        }
    };
}

macro_rules! lane_operators {
    ($vector:ty, $scalar:ty) => {
        arithmetic_operator!($vector, $scalar, Add, add, AddAssign, add_assign, add);
        arithmetic_operator!($vector, $scalar, Sub, sub, SubAssign, sub_assign, sub);
        arithmetic_operator!($vector, $scalar, Mul, mul, MulAssign, mul_assign, mul);
        arithmetic_operator!($vector, $scalar, Div, div, DivAssign, div_assign, div);

        bitwise_operator!($vector, BitAnd, bitand, and);
        bitwise_operator!($vector, BitOr, bitor, or);
        bitwise_operator!($vector, BitXor, bitxor, xor);

        /// Truncated remainder, `a - trunc(a / b) * b`.
        impl Rem for $vector {
            type Output = Self;

            #[inline(always)]
            fn rem(self, rhs: Self) -> Self {
                <$vector as SimdLanes>::remainder(self, rhs)
            }
        }

        impl Rem<$scalar> for $vector {
            type Output = Self;

            #[inline(always)]
            fn rem(self, rhs: $scalar) -> Self {
                <$vector as SimdLanes>::remainder(self, <$vector as SimdLanes>::splat(rhs))
            }
        }

        impl Neg for $vector {
            type Output = Self;

            #[inline(always)]
            fn neg(self) -> Self {
                <$vector as SimdLanes>::negate(self)
            }
        }

        impl From<[$scalar; LANE_COUNT]> for $vector {
            #[inline(always)]
            fn from(lanes: [$scalar; LANE_COUNT]) -> Self {
                <$vector as SimdLanes>::from_array(lanes)
            }
        }

        impl From<$vector> for [$scalar; LANE_COUNT] {
            #[inline(always)]
            fn from(v: $vector) -> Self {
                v.to_array()
            }
        }

        /// Loads up to four values, zero-filling missing lanes.
        impl From<&[$scalar]> for $vector {
            #[inline(always)]
            fn from(slice: &[$scalar]) -> Self {
                <$vector as SimdLanes>::from_slice(slice)
            }
        }
    };
}

lane_operators!(F32x4, f32);
lane_operators!(F64x4, f64);
