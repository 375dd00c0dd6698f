//! Optimized scalar implementation with 8-way loop unrolling.
//!
//! Eight independent accumulators break the serial dependency of a single
//! running sum, so the CPU can keep several multiply-adds in flight. The
//! summation order differs from the reference, so results may differ from
//! it in the last bits.

use crate::math::element::Element;

/// Number of elements processed per main-loop iteration. Must equal the
/// number of accumulators below.
pub const UNROLL_WIDTH: usize = 8;

/// Compute the dot product of `length` elements starting at the given offsets.
///
/// The first `length % UNROLL_WIDTH` terms are summed into accumulator 0,
/// then each block of eight terms adds term `j` into accumulator `j`.
///
/// # Panics
/// Panics if either buffer is shorter than `offset + length`.
pub fn dot_unrolled<T: Element>(
    a: &[T],
    offset_a: usize,
    b: &[T],
    offset_b: usize,
    length: usize,
) -> T {
    let a = &a[offset_a..offset_a + length];
    let b = &b[offset_b..offset_b + length];

    let remainder = length % UNROLL_WIDTH;
    let (head_a, body_a) = a.split_at(remainder);
    let (head_b, body_b) = b.split_at(remainder);

    let mut acc0 = T::zero();
    let mut acc1 = T::zero();
    let mut acc2 = T::zero();
    let mut acc3 = T::zero();
    let mut acc4 = T::zero();
    let mut acc5 = T::zero();
    let mut acc6 = T::zero();
    let mut acc7 = T::zero();

    for (x, y) in head_a.iter().zip(head_b) {
        acc0 += *x * *y;
    }

    for (ca, cb) in body_a
        .chunks_exact(UNROLL_WIDTH)
        .zip(body_b.chunks_exact(UNROLL_WIDTH))
    {
        acc0 += ca[0] * cb[0];
        acc1 += ca[1] * cb[1];
        acc2 += ca[2] * cb[2];
        acc3 += ca[3] * cb[3];
        acc4 += ca[4] * cb[4];
        acc5 += ca[5] * cb[5];
        acc6 += ca[6] * cb[6];
        acc7 += ca[7] * cb[7];
    }

    ((acc0 + acc1) + (acc2 + acc3)) + ((acc4 + acc5) + (acc6 + acc7))
}
