//! Lane kernels applied over whole slices.
//!
//! [`LaneSlice`] runs the transcendental functions over `[f32]` and `[f64]`
//! four elements at a time. The last, partial chunk is zero-padded to a full
//! vector and only its valid lanes are written back, so every length
//! (including zero) is accepted.
//!
//! The `par_*` forms split inputs of at least [`PARALLEL_THRESHOLD`] elements
//! into [`PARALLEL_CHUNK_SIZE`] blocks on the rayon pool; smaller inputs run
//! the sequential loop.
//!
//! ```rust
//! use lanewise::LaneSlice;
//!
//! let angles: Vec<f32> = (0..10).map(|i| i as f32 * 0.1).collect();
//! let (s, c) = angles.sin_cos();
//! for ((x, s), c) in angles.iter().zip(&s).zip(&c) {
//!     assert!((s - x.sin()).abs() < 1e-6);
//!     assert!((c - x.cos()).abs() < 1e-6);
//! }
//! ```

use rayon::prelude::*;

use crate::error::{length_mismatch, output_length, Result};
use crate::math;
use crate::simd::{F32x4, F64x4, LaneScalar, SimdLanes, LANE_COUNT};

/// Input length from which the `par_*` forms go parallel.
pub const PARALLEL_THRESHOLD: usize = 262_144;

/// Elements handed to one rayon task. A multiple of [`LANE_COUNT`], so only
/// the final block can end in a partial vector.
pub const PARALLEL_CHUNK_SIZE: usize = 16_384;

const _: () = assert!(PARALLEL_CHUNK_SIZE % LANE_COUNT == 0);

/// A scalar with an associated lane vector type.
pub trait LaneElement: LaneScalar {
    type Lanes: SimdLanes<Scalar = Self>;
}

impl LaneElement for f32 {
    type Lanes = F32x4;
}

impl LaneElement for f64 {
    type Lanes = F64x4;
}

#[inline(always)]
fn apply_unary<T, F>(input: &[T], output: &mut [T], kernel: &F)
where
    T: LaneElement,
    F: Fn(T::Lanes) -> T::Lanes,
{
    for (src, dst) in input.chunks(LANE_COUNT).zip(output.chunks_mut(LANE_COUNT)) {
        let lanes = kernel(T::Lanes::from_slice(src)).to_array();
        dst.copy_from_slice(&lanes[..dst.len()]);
    }
}

#[inline(always)]
fn apply_binary<T, F>(left: &[T], right: &[T], output: &mut [T], kernel: &F)
where
    T: LaneElement,
    F: Fn(T::Lanes, T::Lanes) -> T::Lanes,
{
    let chunks = left
        .chunks(LANE_COUNT)
        .zip(right.chunks(LANE_COUNT))
        .zip(output.chunks_mut(LANE_COUNT));

    for ((a, b), dst) in chunks {
        let lanes = kernel(T::Lanes::from_slice(a), T::Lanes::from_slice(b)).to_array();
        dst.copy_from_slice(&lanes[..dst.len()]);
    }
}

#[inline(always)]
fn apply_pair<T, F>(input: &[T], first: &mut [T], second: &mut [T], kernel: &F)
where
    T: LaneElement,
    F: Fn(T::Lanes) -> (T::Lanes, T::Lanes),
{
    let chunks = input
        .chunks(LANE_COUNT)
        .zip(first.chunks_mut(LANE_COUNT))
        .zip(second.chunks_mut(LANE_COUNT));

    for ((src, a), b) in chunks {
        let (x, y) = kernel(T::Lanes::from_slice(src));
        a.copy_from_slice(&x.to_array()[..a.len()]);
        b.copy_from_slice(&y.to_array()[..b.len()]);
    }
}

fn map_unary<T, F>(input: &[T], kernel: F) -> Vec<T>
where
    T: LaneElement,
    F: Fn(T::Lanes) -> T::Lanes,
{
    let mut output = vec![T::zero(); input.len()];
    apply_unary(input, &mut output, &kernel);
    output
}

fn par_map_unary<T, F>(input: &[T], kernel: F) -> Vec<T>
where
    T: LaneElement,
    F: Fn(T::Lanes) -> T::Lanes + Sync,
{
    if input.len() < PARALLEL_THRESHOLD {
        return map_unary(input, kernel);
    }

    tracing::trace!(len = input.len(), chunk = PARALLEL_CHUNK_SIZE, "parallel unary lane kernel");

    let mut output = vec![T::zero(); input.len()];
    input
        .par_chunks(PARALLEL_CHUNK_SIZE)
        .zip(output.par_chunks_mut(PARALLEL_CHUNK_SIZE))
        .for_each(|(src, dst)| apply_unary(src, dst, &kernel));
    output
}

fn map_pair<T, F>(input: &[T], kernel: F) -> (Vec<T>, Vec<T>)
where
    T: LaneElement,
    F: Fn(T::Lanes) -> (T::Lanes, T::Lanes),
{
    let mut first = vec![T::zero(); input.len()];
    let mut second = vec![T::zero(); input.len()];
    apply_pair(input, &mut first, &mut second, &kernel);
    (first, second)
}

fn par_map_pair<T, F>(input: &[T], kernel: F) -> (Vec<T>, Vec<T>)
where
    T: LaneElement,
    F: Fn(T::Lanes) -> (T::Lanes, T::Lanes) + Sync,
{
    if input.len() < PARALLEL_THRESHOLD {
        return map_pair(input, kernel);
    }

    tracing::trace!(len = input.len(), chunk = PARALLEL_CHUNK_SIZE, "parallel paired lane kernel");

    let mut first = vec![T::zero(); input.len()];
    let mut second = vec![T::zero(); input.len()];
    input
        .par_chunks(PARALLEL_CHUNK_SIZE)
        .zip(first.par_chunks_mut(PARALLEL_CHUNK_SIZE))
        .zip(second.par_chunks_mut(PARALLEL_CHUNK_SIZE))
        .for_each(|((src, a), b)| apply_pair(src, a, b, &kernel));
    (first, second)
}

fn map_binary<T, F>(left: &[T], right: &[T], kernel: F) -> Result<Vec<T>>
where
    T: LaneElement,
    F: Fn(T::Lanes, T::Lanes) -> T::Lanes,
{
    if left.len() != right.len() {
        return Err(length_mismatch(left.len(), right.len()));
    }

    let mut output = vec![T::zero(); left.len()];
    apply_binary(left, right, &mut output, &kernel);
    Ok(output)
}

fn par_map_binary<T, F>(left: &[T], right: &[T], kernel: F) -> Result<Vec<T>>
where
    T: LaneElement,
    F: Fn(T::Lanes, T::Lanes) -> T::Lanes + Sync,
{
    if left.len() != right.len() {
        return Err(length_mismatch(left.len(), right.len()));
    }
    if left.len() < PARALLEL_THRESHOLD {
        return map_binary(left, right, kernel);
    }

    tracing::trace!(len = left.len(), chunk = PARALLEL_CHUNK_SIZE, "parallel binary lane kernel");

    let mut output = vec![T::zero(); left.len()];
    left.par_chunks(PARALLEL_CHUNK_SIZE)
        .zip(right.par_chunks(PARALLEL_CHUNK_SIZE))
        .zip(output.par_chunks_mut(PARALLEL_CHUNK_SIZE))
        .for_each(|((a, b), dst)| apply_binary(a, b, dst, &kernel));
    Ok(output)
}

/// Applies any lane kernel over `input`, writing into `output`.
///
/// # Errors
///
/// [`LaneError::OutputLength`](crate::LaneError::OutputLength) when the two
/// slices differ in length; `output` is left untouched.
///
/// ```rust
/// use lanewise::{map_slice_into, F64x4, SimdLanes};
///
/// let input = [1.0, 4.0, 9.0, 16.0, 25.0];
/// let mut output = [0.0; 5];
/// map_slice_into(&input, &mut output, |v: F64x4| v.sqrt()).unwrap();
/// assert_eq!(output, [1.0, 2.0, 3.0, 4.0, 5.0]);
/// ```
pub fn map_slice_into<T, F>(input: &[T], output: &mut [T], kernel: F) -> Result<()>
where
    T: LaneElement,
    F: Fn(T::Lanes) -> T::Lanes,
{
    if input.len() != output.len() {
        return Err(output_length(input.len(), output.len()));
    }

    apply_unary(input, output, &kernel);
    Ok(())
}

/// Transcendental functions over slices of lane elements.
pub trait LaneSlice<T> {
    fn sin(&self) -> Vec<T>;
    fn sin_approx(&self) -> Vec<T>;
    fn cos(&self) -> Vec<T>;
    fn cos_approx(&self) -> Vec<T>;
    fn tan(&self) -> Vec<T>;
    fn tan_approx(&self) -> Vec<T>;
    fn atan(&self) -> Vec<T>;
    fn atan_approx(&self) -> Vec<T>;

    /// Sines and cosines from one reduction per vector.
    fn sin_cos(&self) -> (Vec<T>, Vec<T>);
    fn sin_cos_approx(&self) -> (Vec<T>, Vec<T>);

    /// `atan2(self[i], x[i])`.
    ///
    /// # Errors
    ///
    /// [`LaneError::LengthMismatch`](crate::LaneError::LengthMismatch) when
    /// `x` has a different length.
    fn atan2(&self, x: &[T]) -> Result<Vec<T>>;

    fn par_sin(&self) -> Vec<T>;
    fn par_sin_approx(&self) -> Vec<T>;
    fn par_cos(&self) -> Vec<T>;
    fn par_cos_approx(&self) -> Vec<T>;
    fn par_tan(&self) -> Vec<T>;
    fn par_tan_approx(&self) -> Vec<T>;
    fn par_atan(&self) -> Vec<T>;
    fn par_atan_approx(&self) -> Vec<T>;
    fn par_sin_cos(&self) -> (Vec<T>, Vec<T>);
    fn par_sin_cos_approx(&self) -> (Vec<T>, Vec<T>);
    fn par_atan2(&self, x: &[T]) -> Result<Vec<T>>;
}

impl<T: LaneElement> LaneSlice<T> for [T] {
    fn sin(&self) -> Vec<T> {
        map_unary(self, math::sin::<T::Lanes>)
    }

    fn sin_approx(&self) -> Vec<T> {
        map_unary(self, math::sin_approx::<T::Lanes>)
    }

    fn cos(&self) -> Vec<T> {
        map_unary(self, math::cos::<T::Lanes>)
    }

    fn cos_approx(&self) -> Vec<T> {
        map_unary(self, math::cos_approx::<T::Lanes>)
    }

    fn tan(&self) -> Vec<T> {
        map_unary(self, math::tan::<T::Lanes>)
    }

    fn tan_approx(&self) -> Vec<T> {
        map_unary(self, math::tan_approx::<T::Lanes>)
    }

    fn atan(&self) -> Vec<T> {
        map_unary(self, math::atan::<T::Lanes>)
    }

    fn atan_approx(&self) -> Vec<T> {
        map_unary(self, math::atan_approx::<T::Lanes>)
    }

    fn sin_cos(&self) -> (Vec<T>, Vec<T>) {
        map_pair(self, math::sin_cos::<T::Lanes>)
    }

    fn sin_cos_approx(&self) -> (Vec<T>, Vec<T>) {
        map_pair(self, math::sin_cos_approx::<T::Lanes>)
    }

    fn atan2(&self, x: &[T]) -> Result<Vec<T>> {
        map_binary(self, x, math::atan2::<T::Lanes>)
    }

    fn par_sin(&self) -> Vec<T> {
        par_map_unary(self, math::sin::<T::Lanes>)
    }

    fn par_sin_approx(&self) -> Vec<T> {
        par_map_unary(self, math::sin_approx::<T::Lanes>)
    }

    fn par_cos(&self) -> Vec<T> {
        par_map_unary(self, math::cos::<T::Lanes>)
    }

    fn par_cos_approx(&self) -> Vec<T> {
        par_map_unary(self, math::cos_approx::<T::Lanes>)
    }

    fn par_tan(&self) -> Vec<T> {
        par_map_unary(self, math::tan::<T::Lanes>)
    }

    fn par_tan_approx(&self) -> Vec<T> {
        par_map_unary(self, math::tan_approx::<T::Lanes>)
    }

    fn par_atan(&self) -> Vec<T> {
        par_map_unary(self, math::atan::<T::Lanes>)
    }

    fn par_atan_approx(&self) -> Vec<T> {
        par_map_unary(self, math::atan_approx::<T::Lanes>)
    }

    fn par_sin_cos(&self) -> (Vec<T>, Vec<T>) {
        par_map_pair(self, math::sin_cos::<T::Lanes>)
    }

    fn par_sin_cos_approx(&self) -> (Vec<T>, Vec<T>) {
        par_map_pair(self, math::sin_cos_approx::<T::Lanes>)
    }

    fn par_atan2(&self, x: &[T]) -> Result<Vec<T>> {
        par_map_binary(self, x, math::atan2::<T::Lanes>)
    }
}
