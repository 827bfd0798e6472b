//! Broadcast-coefficient Horner evaluation.

use std::ops::Range;

use crate::simd::SimdLanes;

/// Continues a Horner recurrence over lanes of a packed coefficient table.
///
/// Walks `lanes` from the highest index down, computing
/// `acc = acc * x + table[lane]` with `table[lane]` broadcast to every lane.
/// Starting from the leading coefficient and `lanes = 0..4` this evaluates
/// `table[0] + table[1] x + table[2] x^2 + table[3] x^3 + acc x^4`.
#[inline(always)]
pub fn horner<V: SimdLanes>(mut acc: V, x: V, table: V, lanes: Range<usize>) -> V {
    for lane in lanes.rev() {
        acc = acc.mul_add(x, table.broadcast(lane));
    }
    acc
}
