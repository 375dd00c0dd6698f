//! Small-length dot product without loop control.
//!
//! A C `switch` on the length whose cases fall through into each other is
//! the classic way to write this: `case 8` adds term 7 and falls into
//! `case 7`, which adds term 6, and so on down to `case 0`. Rust has no
//! fallthrough, so the ladder is built from nested labeled blocks. The
//! `match` sits in the innermost block and breaks out of exactly as many
//! blocks as needed to land on the tail that adds term `length - 1`; from
//! there execution runs straight through every remaining tail.
//!
//! ```text
//! 'len0: {
//!     'len1: {
//!         ...
//!             match length { 8 => {}, 7 => break 'len7, ..., 0 => break 'len0 }
//!             sum += a[7] * b[7];   // only reached for length 8
//!         ...
//!         sum += a[0] * b[0];       // tail of 'len1, reached for length >= 1
//!     }
//! }
//! ```

use crate::math::element::Element;

/// Largest length the ladder handles.
pub const MAX_SMALL_LENGTH: usize = 8;

/// Compute the dot product of the first `length` elements of `a` and `b`.
///
/// Terms are added from the highest index down to index 0.
///
/// # Panics
/// Panics if `length > MAX_SMALL_LENGTH` or if either buffer holds fewer
/// than `length` elements. Use [`small_dot`](crate::math::dot_product::small_dot)
/// for a checked version.
#[inline]
pub fn small_dot_fallthrough<T: Element>(a: &[T], b: &[T], length: usize) -> T {
    assert!(
        length <= MAX_SMALL_LENGTH,
        "small dot product length {} exceeds {}",
        length,
        MAX_SMALL_LENGTH
    );
    let a = &a[..length];
    let b = &b[..length];

    let mut sum = T::zero();
    'len0: {
        'len1: {
            'len2: {
                'len3: {
                    'len4: {
                        'len5: {
                            'len6: {
                                'len7: {
                                    match length {
                                        8 => {}
                                        7 => break 'len7,
                                        6 => break 'len6,
                                        5 => break 'len5,
                                        4 => break 'len4,
                                        3 => break 'len3,
                                        2 => break 'len2,
                                        1 => break 'len1,
                                        _ => break 'len0,
                                    }
                                    sum += a[7] * b[7];
                                }
                                sum += a[6] * b[6];
                            }
                            sum += a[5] * b[5];
                        }
                        sum += a[4] * b[4];
                    }
                    sum += a[3] * b[3];
                }
                sum += a[2] * b[2];
            }
            sum += a[1] * b[1];
        }
        sum += a[0] * b[0];
    }
    sum
}
