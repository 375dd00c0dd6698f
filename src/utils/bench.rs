//! Shared benchmark utilities.
//!
//! By default (`cpu_cycles` feature), measurements use CPU cycle counters
//! for precise micro-benchmarking. Use `--features use_time` or
//! `--no-default-features` to use wall-clock time instead.

use crate::math::element::Element;
use rand::rngs::StdRng;
use rand::Rng;
use std::time::Duration;

// ============================================================================
// Measurement abstraction: cycles or time depending on feature flags
// ============================================================================
//
// Use CPU cycles if: cpu_cycles is enabled AND use_time is NOT enabled
// Use wall-clock time if: use_time is enabled OR cpu_cycles is disabled

/// Measurement value type - cycles (u64) or Duration depending on feature
#[cfg(all(feature = "cpu_cycles", not(feature = "use_time")))]
pub type Measurement = u64;

#[cfg(any(not(feature = "cpu_cycles"), feature = "use_time"))]
pub type Measurement = Duration;

/// Start marker returned by [`now`]
#[cfg(all(feature = "cpu_cycles", not(feature = "use_time")))]
pub type Start = u64;

#[cfg(any(not(feature = "cpu_cycles"), feature = "use_time"))]
pub type Start = std::time::Instant;

/// Read current measurement (cycles or time)
#[cfg(all(feature = "cpu_cycles", not(feature = "use_time")))]
#[inline(always)]
pub fn now() -> Start {
    crate::utils::cycles::read_cycles()
}

#[cfg(any(not(feature = "cpu_cycles"), feature = "use_time"))]
#[inline(always)]
pub fn now() -> Start {
    std::time::Instant::now()
}

/// Calculate elapsed measurement
#[cfg(all(feature = "cpu_cycles", not(feature = "use_time")))]
#[inline(always)]
pub fn elapsed(start: Start) -> Measurement {
    crate::utils::cycles::read_cycles().saturating_sub(start)
}

#[cfg(any(not(feature = "cpu_cycles"), feature = "use_time"))]
#[inline(always)]
pub fn elapsed(start: Start) -> Measurement {
    start.elapsed()
}

/// Raw measurement as an integer: cycles/ticks, or nanoseconds
#[cfg(all(feature = "cpu_cycles", not(feature = "use_time")))]
pub fn to_units(m: Measurement) -> u64 {
    m
}

#[cfg(any(not(feature = "cpu_cycles"), feature = "use_time"))]
pub fn to_units(m: Measurement) -> u64 {
    m.as_nanos() as u64
}

/// Get the measurement unit name
#[cfg(all(feature = "cpu_cycles", not(feature = "use_time")))]
pub const fn unit_name() -> &'static str {
    #[cfg(target_arch = "aarch64")]
    {
        "ticks"
    }
    #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
    {
        "cycles"
    }
    #[cfg(not(any(target_arch = "aarch64", target_arch = "x86_64", target_arch = "x86")))]
    {
        "units"
    }
}

#[cfg(any(not(feature = "cpu_cycles"), feature = "use_time"))]
pub const fn unit_name() -> &'static str {
    "ns"
}

/// Time one expression. Evaluates to `(Measurement, value)`.
///
/// ```
/// let (elapsed, value) = micro_dot_kernel::measure!(2 + 2);
/// assert_eq!(value, 4);
/// let _ = elapsed;
/// ```
#[macro_export]
macro_rules! measure {
    ($e:expr) => {{
        let start = $crate::utils::bench::now();
        let value = ::std::hint::black_box($e);
        let elapsed = $crate::utils::bench::elapsed(start);
        (elapsed, value)
    }};
}

/// Render a value stored in a `Duration` slot.
///
/// In cycle mode the timer stores raw cycle counts as nanoseconds, so the
/// unit name is attached instead of a time suffix.
pub fn format_measurement(d: Duration) -> String {
    #[cfg(all(feature = "cpu_cycles", not(feature = "use_time")))]
    {
        format!("{} {}", d.as_nanos(), unit_name())
    }
    #[cfg(any(not(feature = "cpu_cycles"), feature = "use_time"))]
    {
        format!("{:?}", d)
    }
}

/// Get a seed from current time for randomization
pub fn time_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x12345678)
}

/// Uniform values in [-1.0, 1.0), converted to the element type.
pub fn random_vec<T: Element>(rng: &mut StdRng, len: usize) -> Vec<T> {
    (0..len)
        .map(|_| T::from_f64(rng.random_range(-1.0..1.0)))
        .collect()
}

/// Drop the top and bottom `fraction` of sorted samples.
///
/// Leaves at least one sample in place.
pub fn trim_outliers(sorted: &[u64], fraction: f64) -> &[u64] {
    let cut = (sorted.len() as f64 * fraction).floor() as usize;
    if sorted.len() <= 2 * cut {
        return sorted;
    }
    &sorted[cut..sorted.len() - cut]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_random_vec_range_and_reproducibility() {
        let a: Vec<f32> = random_vec(&mut StdRng::seed_from_u64(7), 256);
        let b: Vec<f32> = random_vec(&mut StdRng::seed_from_u64(7), 256);
        assert_eq!(a, b);
        assert!(a.iter().all(|v| (-1.0..=1.0).contains(v)));
    }

    #[test]
    fn test_trim_outliers() {
        let samples: Vec<u64> = (0..100).collect();
        let trimmed = trim_outliers(&samples, 0.01);
        assert_eq!(trimmed.len(), 98);
        assert_eq!(trimmed[0], 1);
        assert_eq!(trimmed[97], 98);
    }

    #[test]
    fn test_trim_outliers_keeps_tiny_inputs() {
        let samples = [5u64, 9];
        assert_eq!(trim_outliers(&samples, 0.5), &samples[..]);
        assert!(trim_outliers(&[], 0.1).is_empty());
    }

    #[test]
    fn test_measure_macro_returns_value() {
        let (_, v) = crate::measure!(vec![1u8; 16].len());
        assert_eq!(v, 16);
    }
}
