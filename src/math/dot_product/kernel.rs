//! Checked entry points.
//!
//! These validate the caller's buffers once and then run the unchecked
//! kernels from [`code`](super::code). All of them return the additive
//! identity for `length == 0`.
//!
//! Results of [`dot`] and [`dot_product`] can differ from a naive running
//! sum in the last bits: the unrolled kernel sums into eight accumulators
//! and combines them pairwise.

use super::code::{dot_unrolled, small_dot_fallthrough, MAX_SMALL_LENGTH};
use crate::error::{KernelError, Result};
use crate::math::element::Element;
use tracing::debug;

fn check_bounds(buffer: &'static str, data_len: usize, offset: usize, length: usize) -> Result<()> {
    match offset.checked_add(length) {
        Some(end) if end <= data_len => Ok(()),
        _ => {
            debug!(buffer, offset, length, available = data_len, "dot product request out of bounds");
            Err(KernelError::OutOfBounds {
                buffer,
                offset,
                length,
                available: data_len,
            })
        }
    }
}

/// Dot product of the first `length` elements of `a` and `b` through the
/// fallthrough ladder.
///
/// # Errors
/// `OutOfRange` if `length > MAX_SMALL_LENGTH`, `OutOfBounds` if a buffer
/// is shorter than `length`.
///
/// # Example
/// ```
/// use micro_dot_kernel::math::dot_product::small_dot;
///
/// let a = [1.0, 2.0, 3.0];
/// let b = [4.0, 5.0, 6.0];
/// assert_eq!(small_dot(&a, &b, 3).unwrap(), 32.0);
/// assert!(small_dot(&[0.0; 9], &[0.0; 9], 9).is_err());
/// ```
pub fn small_dot<T: Element>(a: &[T], b: &[T], length: usize) -> Result<T> {
    if length > MAX_SMALL_LENGTH {
        debug!(length, max = MAX_SMALL_LENGTH, "small dot product length out of range");
        return Err(KernelError::OutOfRange {
            length,
            max: MAX_SMALL_LENGTH,
        });
    }
    check_bounds("a", a.len(), 0, length)?;
    check_bounds("b", b.len(), 0, length)?;
    Ok(small_dot_fallthrough(a, b, length))
}

/// Dot product of `a[offset_a..offset_a + length]` and
/// `b[offset_b..offset_b + length]` through the 8-way unrolled kernel.
///
/// # Errors
/// `OutOfBounds` if either range does not fit its buffer.
pub fn dot<T: Element>(
    a: &[T],
    offset_a: usize,
    b: &[T],
    offset_b: usize,
    length: usize,
) -> Result<T> {
    check_bounds("a", a.len(), offset_a, length)?;
    check_bounds("b", b.len(), offset_b, length)?;
    Ok(dot_unrolled(a, offset_a, b, offset_b, length))
}

/// Same contract as [`dot`], but lengths up to `MAX_SMALL_LENGTH` go
/// through the fallthrough ladder instead of the unrolled kernel.
pub fn dot_product<T: Element>(
    a: &[T],
    offset_a: usize,
    b: &[T],
    offset_b: usize,
    length: usize,
) -> Result<T> {
    check_bounds("a", a.len(), offset_a, length)?;
    check_bounds("b", b.len(), offset_b, length)?;
    if length <= MAX_SMALL_LENGTH {
        Ok(small_dot_fallthrough(&a[offset_a..], &b[offset_b..], length))
    } else {
        Ok(dot_unrolled(a, offset_a, b, offset_b, length))
    }
}

/// [`small_dot`] for `f64`.
pub fn small_dot_f64(a: &[f64], b: &[f64], length: usize) -> Result<f64> {
    small_dot(a, b, length)
}

/// [`small_dot`] for `f32`.
pub fn small_dot_f32(a: &[f32], b: &[f32], length: usize) -> Result<f32> {
    small_dot(a, b, length)
}

/// [`dot`] for `f64`.
pub fn dot_f64(a: &[f64], offset_a: usize, b: &[f64], offset_b: usize, length: usize) -> Result<f64> {
    dot(a, offset_a, b, offset_b, length)
}

/// [`dot`] for `f32`.
pub fn dot_f32(a: &[f32], offset_a: usize, b: &[f32], offset_b: usize, length: usize) -> Result<f32> {
    dot(a, offset_a, b, offset_b, length)
}
