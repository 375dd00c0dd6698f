//! Runs registered algorithms across input sizes and exports raw timings.

use std::io::Write;
use std::path::Path;

use tracing::{debug, info};

use super::bench::unit_name;
use super::timer::{measure_variants, TimingConfig, VariantResult};
use crate::registry::AlgorithmRunner;

/// Results of every variant at one input size
#[derive(Clone, Debug)]
pub struct SizeResults {
    pub size: usize,
    pub results: Vec<VariantResult>,
}

/// All measurements taken for one algorithm
#[derive(Clone, Debug)]
pub struct AlgorithmReport {
    pub algorithm: &'static str,
    pub sizes: Vec<SizeResults>,
}

/// Raw timing data for a single variant (one CSV row)
pub struct RawTimingData {
    pub algo_name: String,
    pub variant_name: String,
    pub input_size: usize,
    pub avg_units: f64,
    pub result_sample: Option<f64>,
}

/// Measure every variant of `algo` at each size.
///
/// The same `seed` generates the input data for every size, so a run can be
/// reproduced exactly apart from timing noise.
pub fn run_algorithm(
    algo: &dyn AlgorithmRunner,
    sizes: &[usize],
    seed: u64,
    config: &TimingConfig,
) -> AlgorithmReport {
    info!(algorithm = algo.name(), sizes = sizes.len(), seed, "running benchmarks");

    let sizes = sizes
        .iter()
        .map(|&size| {
            debug!(algorithm = algo.name(), size, "measuring");
            let closures = algo.get_variant_closures(size, seed);
            SizeResults {
                size,
                results: measure_variants(closures, config),
            }
        })
        .collect();

    AlgorithmReport {
        algorithm: algo.name(),
        sizes,
    }
}

/// Flatten reports into CSV rows
pub fn collect_raw_data(reports: &[AlgorithmReport]) -> Vec<RawTimingData> {
    reports
        .iter()
        .flat_map(|report| {
            report.sizes.iter().flat_map(move |s| {
                s.results.iter().map(move |r| RawTimingData {
                    algo_name: report.algorithm.to_string(),
                    variant_name: r.name.clone(),
                    input_size: s.size,
                    avg_units: r.avg_units_f64,
                    result_sample: r.result_sample,
                })
            })
        })
        .collect()
}

/// Export timing data to CSV file
pub fn export_csv(path: impl AsRef<Path>, data: &[RawTimingData]) -> std::io::Result<()> {
    let mut file = std::io::BufWriter::new(std::fs::File::create(path.as_ref())?);

    writeln!(file, "algorithm,variant,compiler,input_size,avg_time,unit,result")?;

    for entry in data {
        let compiler = if entry.variant_name.starts_with("c-") {
            crate::utils::C_COMPILER_NAME.unwrap_or("Unknown")
        } else {
            ""
        };

        writeln!(
            file,
            "{},{},{},{},{:.2},{},{}",
            entry.algo_name,
            entry.variant_name,
            compiler,
            entry.input_size,
            entry.avg_units,
            unit_name(),
            entry.result_sample.map(|v| v.to_string()).unwrap_or_default()
        )?;
    }

    file.flush()?;
    info!(path = %path.as_ref().display(), rows = data.len(), "exported raw timings");
    Ok(())
}
