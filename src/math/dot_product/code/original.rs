//! Original (reference) implementation of dot product.
//!
//! A single running sum, left to right. Every other variant is verified
//! against this one.

use crate::math::element::Element;

/// Compute the dot product of `length` elements starting at the given offsets.
///
/// # Panics
/// Panics if either buffer is shorter than `offset + length`.
///
/// # Example
/// ```
/// use micro_dot_kernel::math::dot_product::dot_original;
///
/// let a = [0.0, 1.0, 2.0, 3.0];
/// let b = [4.0, 5.0, 6.0];
/// let result = dot_original(&a, 1, &b, 0, 3);
/// assert!((result - 32.0_f64).abs() < 1e-12);
/// ```
pub fn dot_original<T: Element>(
    a: &[T],
    offset_a: usize,
    b: &[T],
    offset_b: usize,
    length: usize,
) -> T {
    let a = &a[offset_a..offset_a + length];
    let b = &b[offset_b..offset_b + length];

    let mut sum = T::zero();
    for (x, y) in a.iter().zip(b) {
        sum += *x * *y;
    }
    sum
}

/// Reference for the small-length variants: same loop, offsets fixed at zero.
pub fn small_dot_original<T: Element>(a: &[T], b: &[T], length: usize) -> T {
    dot_original(a, 0, b, 0, length)
}
