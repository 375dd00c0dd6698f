//! CLI for benchmarking the dot product kernels.
//!
//! Usage:
//!   micro-dot                    # Run all algorithms
//!   micro-dot --list             # List available algorithms
//!   micro-dot dot_product_f64    # Run specific algorithm
//!   micro-dot --help             # Show help

use micro_dot_kernel::registry::{build_registry, AlgorithmRunner};
use micro_dot_kernel::utils::runner::{collect_raw_data, export_csv, run_algorithm};
use micro_dot_kernel::utils::{time_seed, PinStrategy, TimingConfig};
use micro_dot_kernel::{tui, BenchError};
use std::env;
use std::str::FromStr;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

struct Options {
    show_list: bool,
    show_help: bool,
    sample_sizes: Vec<usize>,
    seed: Option<u64>,
    csv_path: Option<String>,
    algorithm_filter: Option<String>,
    timing: TimingConfig,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            show_list: false,
            show_help: false,
            sample_sizes: vec![64, 256, 1024, 4096, 16384],
            seed: None,
            csv_path: None,
            algorithm_filter: None,
            timing: TimingConfig::default(),
        }
    }
}

fn value_of<'a>(
    args: &mut impl Iterator<Item = &'a String>,
    flag: &'static str,
) -> Result<&'a String, BenchError> {
    args.next().ok_or(BenchError::InvalidArgument {
        flag,
        value: String::new(),
    })
}

fn parse_value<T: FromStr>(value: &str, flag: &'static str) -> Result<T, BenchError> {
    value.trim().parse().map_err(|_| BenchError::InvalidArgument {
        flag,
        value: value.to_string(),
    })
}

fn parse_args(args: &[String]) -> Result<Options, BenchError> {
    let mut opts = Options::default();
    let mut iter = args.iter().skip(1);

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--list" | "-l" => opts.show_list = true,
            "--help" | "-h" => opts.show_help = true,
            "--filter" | "-f" => opts.timing.filter_outliers = true,
            "--sizes" => {
                let value = value_of(&mut iter, "--sizes")?;
                opts.sample_sizes = value
                    .split(',')
                    .map(|s| parse_value(s, "--sizes"))
                    .collect::<Result<_, _>>()?;
            }
            "--runs" | "-r" => {
                let value = value_of(&mut iter, "--runs")?;
                opts.timing.runs_per_variant = parse_value(value, "--runs")?;
            }
            "--warmup" => {
                let value = value_of(&mut iter, "--warmup")?;
                opts.timing.warmup_iterations = parse_value(value, "--warmup")?;
            }
            "--seed" => {
                let value = value_of(&mut iter, "--seed")?;
                opts.seed = Some(parse_value(value, "--seed")?);
            }
            "--csv" => {
                opts.csv_path = Some(value_of(&mut iter, "--csv")?.clone());
            }
            "--pin" => {
                let value = value_of(&mut iter, "--pin")?;
                opts.timing.pin_strategy = match value.as_str() {
                    "per-exec" => PinStrategy::PerExecution,
                    "global" => PinStrategy::Global,
                    "none" => PinStrategy::None,
                    other => {
                        return Err(BenchError::InvalidArgument {
                            flag: "--pin",
                            value: other.to_string(),
                        })
                    }
                };
            }
            other if !other.starts_with('-') => {
                opts.algorithm_filter = Some(other.to_string());
            }
            other => {
                return Err(BenchError::InvalidArgument {
                    flag: "option",
                    value: other.to_string(),
                })
            }
        }
    }

    Ok(opts)
}

fn run(args: &[String]) -> Result<(), BenchError> {
    let mut opts = parse_args(args)?;
    let registry = build_registry();

    if opts.show_help {
        tui::print_help();
        return Ok(());
    }

    if opts.show_list {
        tui::print_available_algorithms(&registry);
        return Ok(());
    }

    let algorithms: Vec<&dyn AlgorithmRunner> = match &opts.algorithm_filter {
        Some(name) => vec![registry
            .find(name)
            .ok_or_else(|| BenchError::UnknownAlgorithm(name.clone()))?],
        None => registry.all().iter().map(|a| a.as_ref()).collect(),
    };

    let seed = opts.seed.unwrap_or_else(time_seed);
    opts.timing.shuffle_seed = opts.seed;
    info!(seed, "data seed");

    tui::print_header();

    let mut reports = Vec::with_capacity(algorithms.len());
    for algo in algorithms {
        algo.verify()?;
        let report = run_algorithm(algo, &opts.sample_sizes, seed, &opts.timing);
        tui::print_report(algo, &report, opts.timing.filter_outliers);
        reports.push(report);
    }

    if let Some(path) = &opts.csv_path {
        match export_csv(path, &collect_raw_data(&reports)) {
            Ok(()) => println!("  Raw data exported to: {}", path),
            Err(e) => warn!(path = %path, error = %e, "failed to export CSV"),
        }
        println!();
    }

    println!("Note: Speedup and Rel. Error are relative to the 'original' variant.");
    Ok(())
}

fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let args: Vec<String> = env::args().collect();
    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        if matches!(e, BenchError::UnknownAlgorithm(_)) {
            eprintln!("Available: {:?}", build_registry().list_names());
        }
        std::process::exit(1);
    }
}
