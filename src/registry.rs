//! Algorithm registry for dynamic algorithm discovery and execution.
//!
//! Every benchmarkable kernel family implements [`AlgorithmRunner`]; the CLI
//! and the test suite only talk to the registry.

use crate::error::BenchError;
use crate::math::dot_product::{DotProductRunner, SmallDotRunner};
use crate::utils::timer::VariantResult;

/// Result from running a variant benchmark (alias for VariantResult)
pub type BenchmarkResult = VariantResult;

/// A closure that runs one timed execution of a variant
pub type VariantClosure<'a> = crate::utils::timer::Variant<'a>;

/// Trait that all algorithm benchmarkers must implement
pub trait AlgorithmRunner: Send + Sync {
    /// Name of the algorithm (e.g., "dot_product_f64")
    fn name(&self) -> &'static str;

    /// Human-readable description
    fn description(&self) -> &'static str;

    /// Category (e.g., "math")
    fn category(&self) -> &'static str;

    /// Get list of available variant names
    fn available_variants(&self) -> Vec<&'static str>;

    /// Get closures for each variant, ready to be measured.
    ///
    /// Input data is generated from `seed`, so two calls with the same
    /// arguments time identical work. Each closure does ONE execution.
    fn get_variant_closures<'a>(&'a self, size: usize, seed: u64) -> Vec<VariantClosure<'a>>;

    /// Verify correctness of all variants against the reference
    fn verify(&self) -> Result<(), BenchError>;
}

/// Global registry of all algorithms
pub struct AlgorithmRegistry {
    algorithms: Vec<Box<dyn AlgorithmRunner>>,
}

impl AlgorithmRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            algorithms: Vec::new(),
        }
    }

    /// Register an algorithm
    pub fn register<A: AlgorithmRunner + 'static>(&mut self, algo: A) {
        self.algorithms.push(Box::new(algo));
    }

    /// Get all registered algorithms
    pub fn all(&self) -> &[Box<dyn AlgorithmRunner>] {
        &self.algorithms
    }

    /// Find algorithm by name
    pub fn find(&self, name: &str) -> Option<&dyn AlgorithmRunner> {
        self.algorithms
            .iter()
            .find(|a| a.name() == name)
            .map(|a| a.as_ref())
    }

    /// List algorithm names
    pub fn list_names(&self) -> Vec<&'static str> {
        self.algorithms.iter().map(|a| a.name()).collect()
    }

    /// List algorithms by category
    pub fn by_category(&self, category: &str) -> Vec<&dyn AlgorithmRunner> {
        self.algorithms
            .iter()
            .filter(|a| a.category() == category)
            .map(|a| a.as_ref())
            .collect()
    }
}

impl Default for AlgorithmRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the default registry with all algorithms
pub fn build_registry() -> AlgorithmRegistry {
    let mut registry = AlgorithmRegistry::new();

    registry.register(DotProductRunner::<f64>::new("dot_product_f64"));
    registry.register(DotProductRunner::<f32>::new("dot_product_f32"));
    registry.register(SmallDotRunner::<f64>::new("small_dot_f64"));
    registry.register(SmallDotRunner::<f32>::new("small_dot_f32"));

    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_lookup() {
        let registry = build_registry();
        assert_eq!(
            registry.list_names(),
            ["dot_product_f64", "dot_product_f32", "small_dot_f64", "small_dot_f32"]
        );
        assert!(registry.find("small_dot_f32").is_some());
        assert!(registry.find("dot_product_f16").is_none());
        assert_eq!(registry.by_category("math").len(), 4);
        assert!(registry.by_category("control_flow").is_empty());
    }

    #[test]
    fn test_every_runner_lists_original_first() {
        for algo in build_registry().all() {
            let variants = algo.available_variants();
            assert_eq!(variants.first(), Some(&"original"), "{}", algo.name());
        }
    }
}
