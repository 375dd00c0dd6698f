//! Text User Interface (TUI) utilities.
//!
//! Handles formatted output for the CLI.

use super::bench::format_measurement;
use super::runner::AlgorithmReport;
use crate::registry::{AlgorithmRegistry, AlgorithmRunner, BenchmarkResult};
use terminal_size::{terminal_size, Width};

/// Get the current terminal width, constrained to a reasonable range
fn get_term_width() -> usize {
    if let Some((Width(w), _)) = terminal_size() {
        (w as usize).clamp(40, 200)
    } else {
        80
    }
}

/// Sorting priority: original (0), Rust (1), C (2)
fn variant_sort_key(result: &BenchmarkResult) -> (u8, String) {
    let name = result.name.to_lowercase();
    if name == "original" {
        (0, String::new())
    } else if name.starts_with("c-") {
        (2, name)
    } else {
        (1, name)
    }
}

/// Sort variants: original first, then Rust, then C
pub fn sort_variants(results: &mut [BenchmarkResult]) {
    results.sort_by_key(variant_sort_key);
}

/// Truncate string with ellipsis if it exceeds width (character-wise)
fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut result: String = s.chars().take(width.saturating_sub(3)).collect();
        result.push_str("...");
        result
    }
}

/// Print algorithm info box
pub fn print_algo_info_box(algo: &dyn AlgorithmRunner) {
    let max_content_width = get_term_width().saturating_sub(4).max(40);

    let lines = [
        format!("Algorithm: {}", algo.name()),
        format!("Category:  {}", algo.category()),
        algo.description().to_string(),
        format!("Variants:  {}", algo.available_variants().join(", ")),
    ];

    let content_width = lines
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(60)
        .min(max_content_width);
    let border = "─".repeat(content_width + 2);

    println!("┌{}┐", border);
    for (i, line) in lines.iter().enumerate() {
        if i == 3 {
            println!("├{}┤", border);
        }
        println!(
            "│ {:<width$} │",
            truncate(line, content_width),
            width = content_width
        );
    }
    println!("└{}┘", border);
    println!();
}

/// Relative difference of a result against the baseline result
fn relative_error(result: Option<f64>, baseline: Option<f64>) -> f64 {
    match (result, baseline) {
        (Some(res), Some(base)) => {
            let diff = (res - base).abs();
            if base.abs() > 1e-9 {
                diff / base.abs()
            } else {
                diff
            }
        }
        _ => 0.0,
    }
}

/// Print results table for a single size.
///
/// Speedup and relative error are computed against the first row, which
/// `sort_variants` makes the `original` reference.
pub fn print_results_table(results: &[BenchmarkResult], size: usize, filtered: bool) {
    let Some(baseline) = results.first() else {
        return;
    };

    let variant_col_width = get_term_width().saturating_sub(72).max(15);
    let table_width = variant_col_width + 64 + 6;
    let baseline_time = baseline.avg_units_f64.max(f64::MIN_POSITIVE);

    let filter_note = if filtered { ", filtered" } else { "" };
    println!("  Size: {} ({} runs{})", size, baseline.samples, filter_note);
    println!("  {}", "─".repeat(table_width));
    println!(
        "  {:<v_width$} {:>12} {:>12} {:>12} {:>9} {:>9} {:>10}",
        "Variant",
        "Average",
        "Min",
        "Max",
        "Speedup",
        "CV",
        "Rel. Error",
        v_width = variant_col_width
    );
    println!("  {}", "─".repeat(table_width));

    for result in results {
        let speedup = if result.avg_units_f64 > 0.0 {
            baseline_time / result.avg_units_f64
        } else {
            0.0
        };
        let cv = if result.avg_units_f64 > 0.0 {
            result.std_dev.as_nanos() as f64 / result.avg_units_f64
        } else {
            0.0
        };

        let display_name = match (result.name.starts_with("c-"), crate::utils::C_COMPILER_NAME) {
            (true, Some(c)) => format!("{} ({})", result.name, c),
            _ => result.name.clone(),
        };

        println!(
            "  {:<v_width$} {:>12} {:>12} {:>12} {:>8.2}x {:>8.2}% {:>10.2e}",
            truncate(&display_name, variant_col_width),
            format_measurement(result.avg_time),
            format_measurement(result.min_time),
            format_measurement(result.max_time),
            speedup,
            cv * 100.0,
            relative_error(result.result_sample, baseline.result_sample),
            v_width = variant_col_width
        );
    }
    println!();
}

/// Print every size of a finished report under its algorithm's info box
pub fn print_report(algo: &dyn AlgorithmRunner, report: &AlgorithmReport, filtered: bool) {
    print_algo_info_box(algo);
    for size in &report.sizes {
        let mut results = size.results.clone();
        sort_variants(&mut results);
        print_results_table(&results, size.size, filtered);
    }
}

/// Print the application header
pub fn print_header() {
    let term_width = get_term_width().min(80);
    let title = " Micro-Dot-Kernel Benchmarks ";
    let padding = term_width.saturating_sub(title.len() + 2) / 2;
    let right_padding = term_width.saturating_sub(padding + title.len());

    let border = "═".repeat(term_width);

    println!("╔{}╗", border);
    println!(
        "║{}{}{}║",
        " ".repeat(padding),
        title,
        " ".repeat(right_padding)
    );
    println!("╚{}╝", border);
    println!();
}

/// Print the help message
pub fn print_help() {
    println!("Usage: micro-dot [OPTIONS] [ALGORITHM]");
    println!();
    println!("Options:");
    println!("  --list, -l          List all available algorithms");
    println!("  --help, -h          Show this help message");
    println!("  --sizes SIZES       Comma-separated input sizes (default: 64,256,1024,4096,16384)");
    println!("                      For small_dot_* the size is the number of short vector pairs");
    println!("  --runs N, -r N      Number of measurement runs per variant (default: 30)");
    println!("  --warmup N          Warmup executions per variant (default: 10)");
    println!("  --seed N            Random seed for reproducible data (default: time-based)");
    println!("  --filter, -f        Filter outliers (trim 1% extremes from measurements)");
    println!("  --pin MODE          CPU pinning: per-exec (default), global, none");
    println!("  --csv PATH          Export raw timings to CSV");
    println!();
    println!("Arguments:");
    println!("  ALGORITHM           Name of specific algorithm to run (omit for all)");
    println!();
    println!("Environment:");
    println!("  RUST_LOG            Log filter, e.g. RUST_LOG=micro_dot_kernel=debug");
    println!();
    println!("Examples:");
    println!("  micro-dot                        # Run all algorithms");
    println!("  micro-dot dot_product_f64        # Run only the f64 general kernel");
    println!("  micro-dot --sizes 128,512        # Custom sizes");
    println!("  micro-dot --seed 12345           # Reproducible run");
    println!("  micro-dot --csv data.csv         # Export raw timings to CSV");
}

/// Print the list of available algorithms
pub fn print_available_algorithms(registry: &AlgorithmRegistry) {
    println!("Available algorithms:");
    println!();
    for algo in registry.all() {
        println!(
            "  {:<20} [{}] - {}",
            algo.name(),
            algo.category(),
            algo.description()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn result(name: &str) -> BenchmarkResult {
        BenchmarkResult {
            name: name.to_string(),
            description: String::new(),
            avg_time: Duration::ZERO,
            avg_units_f64: 0.0,
            median_time: Duration::ZERO,
            min_time: Duration::ZERO,
            max_time: Duration::ZERO,
            std_dev: Duration::ZERO,
            samples: 0,
            result_sample: None,
        }
    }

    #[test]
    fn test_sort_original_then_rust_then_c() {
        let mut results = vec![
            result("c-unrolled"),
            result("unrolled"),
            result("original"),
            result("fallthrough"),
        ];
        sort_variants(&mut results);
        let names: Vec<&str> = results.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["original", "fallthrough", "unrolled", "c-unrolled"]);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a-very-long-name", 8), "a-ver...");
    }

    #[test]
    fn test_relative_error() {
        assert_eq!(relative_error(Some(101.0), Some(100.0)), 0.01);
        assert_eq!(relative_error(Some(1e-3), Some(0.0)), 1e-3);
        assert_eq!(relative_error(None, Some(1.0)), 0.0);
    }
}
