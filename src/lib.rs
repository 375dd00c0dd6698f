//! # Micro-Dot-Kernel
//!
//! Dot product micro-kernels in `f64` and `f32`, with the benchmark harness
//! used to measure them.
//!
//! - [`math::dot_product::small_dot`]: lengths `0..=8` through a fallthrough
//!   ladder with no loop control.
//! - [`math::dot_product::dot`]: any length and offsets through an 8-way
//!   unrolled loop with eight independent accumulators.
//! - [`math::dot_product::dot_product`]: picks one of the two by length.
//!
//! ```
//! use micro_dot_kernel::math::dot_product::{dot_f64, small_dot_f64};
//!
//! let a = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
//! let b = [8.0, 7.0, 6.0, 5.0, 4.0, 3.0, 2.0, 1.0];
//! assert_eq!(small_dot_f64(&a, &b, 8), Ok(120.0));
//! assert_eq!(dot_f64(&a, 0, &b, 0, 8), Ok(120.0));
//! ```

pub mod error;
pub mod math;
pub mod registry;
pub mod utils;

pub use error::{BenchError, KernelError};

/// Terminal output helpers
pub use utils::tui;

/// Re-export commonly used items
pub mod prelude {
    pub use crate::error::{BenchError, KernelError};
    pub use crate::math::dot_product::{
        dot, dot_f32, dot_f64, dot_product, small_dot, small_dot_f32, small_dot_f64,
        MAX_SMALL_LENGTH, UNROLL_WIDTH,
    };
    pub use crate::math::Element;
    pub use crate::registry::{build_registry, AlgorithmRegistry, AlgorithmRunner};
}

#[cfg(test)]
mod tests {
    use crate::registry::build_registry;

    #[test]
    fn test_all_algorithms_registry_verify() {
        let registry = build_registry();

        for algo in registry.all() {
            if let Err(e) = algo.verify() {
                panic!("Algorithm '{}' failed verification: {}", algo.name(), e);
            }
        }
    }

    #[test]
    fn test_variant_closures_agree_with_reference() {
        let registry = build_registry();

        for algo in registry.all() {
            let mut closures = algo.get_variant_closures(257, 11);
            assert_eq!(closures.len(), algo.available_variants().len());

            let (_, reference) = (closures[0].run)();
            let reference = reference.expect("kernels report a result");
            for closure in closures.iter_mut().skip(1) {
                let (_, result) = (closure.run)();
                let result = result.expect("kernels report a result");
                assert!(
                    (result - reference).abs() <= 1e-3 * reference.abs().max(1.0),
                    "{}/{}: {} vs {}",
                    algo.name(),
                    closure.name,
                    result,
                    reference
                );
            }
        }
    }
}
