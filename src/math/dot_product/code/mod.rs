//! Dot product implementations.
//!
//! This module contains all implementation variants of both kernels. Each
//! variant is unchecked: it panics on contract violations instead of
//! returning an error. The checked entry points live one level up.

pub mod c_impl;
mod fallthrough;
mod original;
mod unrolled;

pub use c_impl::{dot_c_unrolled, small_dot_c_switch, CKernel, C_IMPL_AVAILABLE};
pub use fallthrough::{small_dot_fallthrough, MAX_SMALL_LENGTH};
pub use original::{dot_original, small_dot_original};
pub use unrolled::{dot_unrolled, UNROLL_WIDTH};

use crate::utils::VariantInfo;

/// Signature of a general (offset-addressed) dot product variant
pub type DotFn<T> = fn(&[T], usize, &[T], usize, usize) -> T;

/// Signature of a small-length variant: buffers start at index 0
pub type SmallDotFn<T> = fn(&[T], &[T], usize) -> T;

/// Get all general-length variants available in this build
pub fn available_variants<T: CKernel>() -> Vec<VariantInfo<DotFn<T>>> {
    let mut variants: Vec<VariantInfo<DotFn<T>>> = vec![
        VariantInfo {
            name: "original",
            description: "Single accumulator, left to right",
            function: dot_original::<T>,
        },
        VariantInfo {
            name: "unrolled",
            description: "8-way unrolled with 8 independent accumulators",
            function: dot_unrolled::<T>,
        },
    ];

    if C_IMPL_AVAILABLE {
        variants.push(VariantInfo {
            name: "c-unrolled",
            description: "C 8-way unrolled with 8 independent accumulators",
            function: dot_c_unrolled::<T>,
        });
    }

    variants
}

/// Get all small-length variants available in this build
pub fn available_small_variants<T: CKernel>() -> Vec<VariantInfo<SmallDotFn<T>>> {
    let mut variants: Vec<VariantInfo<SmallDotFn<T>>> = vec![
        VariantInfo {
            name: "original",
            description: "Single accumulator loop",
            function: small_dot_original::<T>,
        },
        VariantInfo {
            name: "fallthrough",
            description: "Labeled-block ladder, one term per case, no loop counter",
            function: small_dot_fallthrough::<T>,
        },
        VariantInfo {
            name: "unrolled",
            description: "General 8-way unrolled kernel on short input",
            function: |a: &[T], b: &[T], length: usize| dot_unrolled(a, 0, b, 0, length),
        },
    ];

    if C_IMPL_AVAILABLE {
        variants.push(VariantInfo {
            name: "c-switch",
            description: "C switch statement with case fallthrough",
            function: small_dot_c_switch::<T>,
        });
    }

    variants
}
