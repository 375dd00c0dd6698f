//! # Dot Product Kernels
//!
//! The dot product computes the sum of products of corresponding elements
//! in two vectors:
//!
//! `dot(a, b) = Σ(a[i] * b[i])`
//!
//! ## Optimization Strategies
//!
//! - **Fallthrough dispatch** (lengths 0..=8): one branch on the length
//!   selects a straight-line run of multiply-adds, with no loop counter to
//!   increment or compare.
//! - **Multi-accumulator unrolling** (any length): eight independent
//!   accumulators per block of eight elements remove the serial dependency
//!   on a single running sum.
//!
//! Both are plain scalar code on one thread. The unrolled kernel changes
//! the summation order, so its result may differ from a naive running sum
//! in the last bits.
//!
//! ## Entry points
//!
//! | Function | Path |
//! |----------|------|
//! | [`small_dot`], [`small_dot_f64`], [`small_dot_f32`] | fallthrough ladder, `length <= MAX_SMALL_LENGTH` |
//! | [`dot`], [`dot_f64`], [`dot_f32`] | 8-way unrolled, any length and offsets |
//! | [`dot_product`] | picks one of the two by length |

pub mod code;
mod kernel;
pub mod test;

pub use code::*;
pub use kernel::{dot, dot_f32, dot_f64, dot_product, small_dot, small_dot_f32, small_dot_f64};

use crate::error::BenchError;
use crate::math::element::Element;
use crate::registry::{AlgorithmRunner, VariantClosure};
use crate::utils::bench::random_vec;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::hint::black_box;
use std::marker::PhantomData;
use std::sync::Arc;

/// Offsets used by the general benchmark, deliberately different and
/// not multiples of the unroll width.
const BENCH_OFFSET_A: usize = 3;
const BENCH_OFFSET_B: usize = 5;

/// Largest difference allowed between a reordered sum and the reference.
///
/// Both sums carry at most `n·ε·Σ|aᵢbᵢ|` of rounding error (plus one
/// rounding per product), so their difference is bounded by twice that.
pub fn reorder_tolerance<T: Element>(
    a: &[T],
    offset_a: usize,
    b: &[T],
    offset_b: usize,
    length: usize,
) -> f64 {
    let abs_sum: f64 = a[offset_a..offset_a + length]
        .iter()
        .zip(&b[offset_b..offset_b + length])
        .map(|(x, y)| (x.as_f64() * y.as_f64()).abs())
        .sum();
    2.0 * (length as f64 + 1.0) * T::epsilon().as_f64() * abs_sum
        + T::min_positive_value().as_f64()
}

/// Runner for the general-length kernel
pub struct DotProductRunner<T> {
    name: &'static str,
    _element: PhantomData<fn() -> T>,
}

impl<T: CKernel> DotProductRunner<T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            _element: PhantomData,
        }
    }
}

impl<T: CKernel> AlgorithmRunner for DotProductRunner<T> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn description(&self) -> &'static str {
        "Dot product over arbitrary lengths and offsets (8-way unrolled)"
    }

    fn category(&self) -> &'static str {
        "math"
    }

    fn available_variants(&self) -> Vec<&'static str> {
        code::available_variants::<T>().iter().map(|v| v.name).collect()
    }

    fn get_variant_closures<'a>(&'a self, size: usize, seed: u64) -> Vec<VariantClosure<'a>> {
        let mut rng = StdRng::seed_from_u64(seed);
        let a: Arc<Vec<T>> = Arc::new(random_vec(&mut rng, size + BENCH_OFFSET_A));
        let b: Arc<Vec<T>> = Arc::new(random_vec(&mut rng, size + BENCH_OFFSET_B));

        code::available_variants::<T>()
            .into_iter()
            .map(|v| {
                let a = Arc::clone(&a);
                let b = Arc::clone(&b);
                let func = v.function;

                VariantClosure {
                    name: v.name,
                    description: v.description,
                    run: Box::new(move || {
                        let (elapsed, result) = crate::measure!(func(
                            black_box(a.as_slice()),
                            BENCH_OFFSET_A,
                            black_box(b.as_slice()),
                            BENCH_OFFSET_B,
                            black_box(size),
                        ));
                        (elapsed, Some(result.as_f64()))
                    }),
                }
            })
            .collect()
    }

    fn verify(&self) -> Result<(), BenchError> {
        test::verify_general::<T>(self.name)
    }
}

/// Runner for the small-length kernel.
///
/// A benchmark "size" is the number of short vector pairs evaluated per
/// execution; each pair gets a random length in `0..=MAX_SMALL_LENGTH`, so
/// the branch on the length is not trivially predictable.
pub struct SmallDotRunner<T> {
    name: &'static str,
    _element: PhantomData<fn() -> T>,
}

impl<T: CKernel> SmallDotRunner<T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            _element: PhantomData,
        }
    }
}

impl<T: CKernel> AlgorithmRunner for SmallDotRunner<T> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn description(&self) -> &'static str {
        "Dot products of short vectors (length 0..=8) via fallthrough dispatch"
    }

    fn category(&self) -> &'static str {
        "math"
    }

    fn available_variants(&self) -> Vec<&'static str> {
        code::available_small_variants::<T>()
            .iter()
            .map(|v| v.name)
            .collect()
    }

    fn get_variant_closures<'a>(&'a self, size: usize, seed: u64) -> Vec<VariantClosure<'a>> {
        let mut rng = StdRng::seed_from_u64(seed);
        let lengths: Arc<Vec<usize>> = Arc::new(
            (0..size)
                .map(|_| rng.random_range(0..=MAX_SMALL_LENGTH))
                .collect(),
        );
        let a: Arc<Vec<T>> = Arc::new(random_vec(&mut rng, size * MAX_SMALL_LENGTH));
        let b: Arc<Vec<T>> = Arc::new(random_vec(&mut rng, size * MAX_SMALL_LENGTH));

        code::available_small_variants::<T>()
            .into_iter()
            .map(|v| {
                let lengths = Arc::clone(&lengths);
                let a = Arc::clone(&a);
                let b = Arc::clone(&b);
                let func = v.function;

                VariantClosure {
                    name: v.name,
                    description: v.description,
                    run: Box::new(move || {
                        let (elapsed, total) = crate::measure!({
                            let mut total = T::zero();
                            let pairs = a
                                .chunks_exact(MAX_SMALL_LENGTH)
                                .zip(b.chunks_exact(MAX_SMALL_LENGTH));
                            for ((pa, pb), &len) in pairs.zip(lengths.iter()) {
                                total += func(black_box(pa), black_box(pb), black_box(len));
                            }
                            total
                        });
                        (elapsed, Some(total.as_f64()))
                    }),
                }
            })
            .collect()
    }

    fn verify(&self) -> Result<(), BenchError> {
        test::verify_small::<T>(self.name)
    }
}
