//! Timing system for the kernel benchmarks.
//!
//! - CPU cycles or wall-clock time (via features)
//! - CPU core pinning for stable measurements
//! - Randomized variant execution to avoid ordering bias

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::hint::black_box;
use std::time::Duration;
use tracing::debug;

use super::bench::{to_units, trim_outliers, Measurement};
use super::cpu_affinity::CpuPinGuard;

/// Fraction of samples dropped at each end when outlier filtering is on
pub const OUTLIER_FRACTION: f64 = 0.01;

/// CPU pinning strategy during measurements
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PinStrategy {
    /// Pin once before all measurements
    Global,
    /// Pin/unpin around each execution
    #[default]
    PerExecution,
    /// Leave scheduling to the OS
    None,
}

/// Configuration for timing measurements
#[derive(Clone, Debug)]
pub struct TimingConfig {
    /// Number of samples to collect per variant (default: 30)
    pub runs_per_variant: usize,
    /// Number of warmup executions per variant before measurement (default: 10)
    pub warmup_iterations: usize,
    /// CPU pinning strategy (default: PerExecution)
    pub pin_strategy: PinStrategy,
    /// Trim the extreme `OUTLIER_FRACTION` of samples before computing stats
    pub filter_outliers: bool,
    /// Seed for the execution-order shuffle; `None` uses the clock
    pub shuffle_seed: Option<u64>,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            runs_per_variant: 30,
            warmup_iterations: 10,
            pin_strategy: PinStrategy::default(),
            filter_outliers: false,
            shuffle_seed: None,
        }
    }
}

/// A variant to be measured
pub struct Variant<'a> {
    pub name: &'static str,
    pub description: &'static str,
    /// Runs one execution and returns (measurement, optional result value).
    /// Timing happens inside the closure to keep the call overhead out.
    pub run: Box<dyn FnMut() -> (Measurement, Option<f64>) + 'a>,
}

/// Result from measuring a single variant.
///
/// In cycle mode the `Duration` fields hold raw cycle counts as nanoseconds.
#[derive(Clone, Debug)]
pub struct VariantResult {
    pub name: String,
    pub description: String,
    pub avg_time: Duration,
    /// Precise average in nanoseconds/cycles
    pub avg_units_f64: f64,
    pub median_time: Duration,
    pub min_time: Duration,
    pub max_time: Duration,
    pub std_dev: Duration,
    /// Number of samples the statistics were computed from
    pub samples: usize,
    /// Last result value, used to compare precision against the baseline
    pub result_sample: Option<f64>,
}

/// Measure multiple variants with randomized execution order.
///
/// Warms every variant up, shuffles a (variant, sample) schedule, runs it
/// with the configured pinning and returns one result per variant in the
/// input order.
pub fn measure_variants(mut variants: Vec<Variant>, config: &TimingConfig) -> Vec<VariantResult> {
    if variants.is_empty() {
        return Vec::new();
    }

    let samples = config.runs_per_variant;

    for variant in &mut variants {
        for _ in 0..config.warmup_iterations {
            black_box((variant.run)());
        }
    }

    let mut tasks: Vec<usize> = (0..variants.len())
        .flat_map(|v| std::iter::repeat(v).take(samples))
        .collect();
    let seed = config.shuffle_seed.unwrap_or_else(super::bench::time_seed);
    tasks.shuffle(&mut StdRng::seed_from_u64(seed));

    let mut measurements: Vec<Vec<Measurement>> = (0..variants.len())
        .map(|_| Vec::with_capacity(samples))
        .collect();
    let mut result_samples: Vec<Option<f64>> = vec![None; variants.len()];

    let global_pin = (config.pin_strategy == PinStrategy::Global).then(CpuPinGuard::new);
    if let Some(guard) = &global_pin {
        debug!(core = ?guard.core_id(), "pinned for the whole measurement");
    }

    for variant_idx in tasks {
        let variant = &mut variants[variant_idx];
        let _per_exec_pin =
            (config.pin_strategy == PinStrategy::PerExecution).then(CpuPinGuard::new);
        let (elapsed_time, result) = (variant.run)();

        measurements[variant_idx].push(elapsed_time);
        result_samples[variant_idx] = result;
    }

    variants
        .into_iter()
        .enumerate()
        .map(|(idx, variant)| {
            let times = std::mem::take(&mut measurements[idx]);
            compute_variant_result(
                variant.name,
                variant.description,
                &times,
                config.filter_outliers,
                result_samples[idx],
            )
        })
        .collect()
}

fn compute_variant_result(
    name: &'static str,
    description: &'static str,
    measurements: &[Measurement],
    filter_outliers: bool,
    result_sample: Option<f64>,
) -> VariantResult {
    let mut sorted: Vec<u64> = measurements.iter().map(|m| to_units(*m)).collect();
    sorted.sort_unstable();
    let units = if filter_outliers {
        trim_outliers(&sorted, OUTLIER_FRACTION)
    } else {
        &sorted[..]
    };

    if units.is_empty() {
        return VariantResult {
            name: name.to_string(),
            description: description.to_string(),
            avg_time: Duration::ZERO,
            avg_units_f64: 0.0,
            median_time: Duration::ZERO,
            min_time: Duration::ZERO,
            max_time: Duration::ZERO,
            std_dev: Duration::ZERO,
            samples: 0,
            result_sample,
        };
    }

    let sum: u64 = units.iter().sum();
    let avg = sum as f64 / units.len() as f64;

    let variance: f64 = units
        .iter()
        .map(|&n| {
            let diff = n as f64 - avg;
            diff * diff
        })
        .sum::<f64>()
        / (units.len() - 1).max(1) as f64;

    VariantResult {
        name: name.to_string(),
        description: description.to_string(),
        avg_time: Duration::from_nanos(avg as u64),
        avg_units_f64: avg,
        median_time: Duration::from_nanos(units[units.len() / 2]),
        min_time: Duration::from_nanos(units[0]),
        max_time: Duration::from_nanos(units[units.len() - 1]),
        std_dev: Duration::from_nanos(variance.sqrt() as u64),
        samples: units.len(),
        result_sample,
    }
}
