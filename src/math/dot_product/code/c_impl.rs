//! FFI bindings for the C kernels in `dot_product.c`.
//!
//! The wrappers slice their inputs before crossing the boundary, so the C
//! side only ever sees pointers with at least `length` readable elements.

use super::fallthrough::MAX_SMALL_LENGTH;
use crate::math::element::Element;

#[cfg(c_implementation_active)]
mod ffi {
    use libc::size_t;
    use std::os::raw::{c_double, c_float};

    extern "C" {
        pub fn small_dot_c_switch_f64(a: *const c_double, b: *const c_double, len: size_t) -> c_double;
        pub fn small_dot_c_switch_f32(a: *const c_float, b: *const c_float, len: size_t) -> c_float;
        pub fn dot_c_unrolled_f64(a: *const c_double, b: *const c_double, len: size_t) -> c_double;
        pub fn dot_c_unrolled_f32(a: *const c_float, b: *const c_float, len: size_t) -> c_float;
    }
}

/// Element types with a C kernel behind them.
pub trait CKernel: Element {
    /// Raw call into the C switch ladder. `a` and `b` must hold `len` elements
    /// and `len` must not exceed `MAX_SMALL_LENGTH`.
    fn small_dot_c_raw(a: &[Self], b: &[Self], len: usize) -> Self;

    /// Raw call into the C unrolled kernel. `a` and `b` must hold `len` elements.
    fn dot_c_raw(a: &[Self], b: &[Self], len: usize) -> Self;
}

#[cfg(c_implementation_active)]
impl CKernel for f64 {
    fn small_dot_c_raw(a: &[f64], b: &[f64], len: usize) -> f64 {
        debug_assert!(a.len() >= len && b.len() >= len && len <= MAX_SMALL_LENGTH);
        unsafe { ffi::small_dot_c_switch_f64(a.as_ptr(), b.as_ptr(), len) }
    }

    fn dot_c_raw(a: &[f64], b: &[f64], len: usize) -> f64 {
        debug_assert!(a.len() >= len && b.len() >= len);
        unsafe { ffi::dot_c_unrolled_f64(a.as_ptr(), b.as_ptr(), len) }
    }
}

#[cfg(c_implementation_active)]
impl CKernel for f32 {
    fn small_dot_c_raw(a: &[f32], b: &[f32], len: usize) -> f32 {
        debug_assert!(a.len() >= len && b.len() >= len && len <= MAX_SMALL_LENGTH);
        unsafe { ffi::small_dot_c_switch_f32(a.as_ptr(), b.as_ptr(), len) }
    }

    fn dot_c_raw(a: &[f32], b: &[f32], len: usize) -> f32 {
        debug_assert!(a.len() >= len && b.len() >= len);
        unsafe { ffi::dot_c_unrolled_f32(a.as_ptr(), b.as_ptr(), len) }
    }
}

// Stub implementations for missing C compiler
#[cfg(not(c_implementation_active))]
impl CKernel for f64 {
    fn small_dot_c_raw(_a: &[f64], _b: &[f64], _len: usize) -> f64 {
        panic!("C implementation not compiled (requires GCC, MSVC or Apple Clang)")
    }

    fn dot_c_raw(_a: &[f64], _b: &[f64], _len: usize) -> f64 {
        panic!("C implementation not compiled (requires GCC, MSVC or Apple Clang)")
    }
}

#[cfg(not(c_implementation_active))]
impl CKernel for f32 {
    fn small_dot_c_raw(_a: &[f32], _b: &[f32], _len: usize) -> f32 {
        panic!("C implementation not compiled (requires GCC, MSVC or Apple Clang)")
    }

    fn dot_c_raw(_a: &[f32], _b: &[f32], _len: usize) -> f32 {
        panic!("C implementation not compiled (requires GCC, MSVC or Apple Clang)")
    }
}

/// C switch-with-fallthrough small kernel.
///
/// # Panics
/// Panics if `length > MAX_SMALL_LENGTH` or a buffer is shorter than `length`.
pub fn small_dot_c_switch<T: CKernel>(a: &[T], b: &[T], length: usize) -> T {
    assert!(
        length <= MAX_SMALL_LENGTH,
        "small dot product length {} exceeds {}",
        length,
        MAX_SMALL_LENGTH
    );
    T::small_dot_c_raw(&a[..length], &b[..length], length)
}

/// C 8-way unrolled kernel.
///
/// # Panics
/// Panics if either buffer is shorter than `offset + length`.
pub fn dot_c_unrolled<T: CKernel>(
    a: &[T],
    offset_a: usize,
    b: &[T],
    offset_b: usize,
    length: usize,
) -> T {
    let a = &a[offset_a..offset_a + length];
    let b = &b[offset_b..offset_b + length];
    T::dot_c_raw(a, b, length)
}

/// Check if C implementations are available
#[cfg(c_implementation_active)]
pub const C_IMPL_AVAILABLE: bool = true;

#[cfg(not(c_implementation_active))]
pub const C_IMPL_AVAILABLE: bool = false;
