//! SortBench CLI Library
//!
//! Command-line driver for the sort benchmark: resolves configuration
//! (defaults, then `sortbench.toml`, then flags), runs every algorithm over
//! the configured datasets and renders the report.
//!
//! # Example
//!
//! ```ignore
//! fn main() -> anyhow::Result<()> {
//!     sortbench_cli::run()
//! }
//! ```

mod config;
mod dataset;
mod executor;

pub use config::*;
pub use dataset::{DatasetGenerator, Distribution};
pub use executor::{
    Driver, RunConfig, RunOutcome, build_report, build_report_meta, format_algorithm_list,
    format_human_output,
};

use anyhow::Context;
use clap::{Parser, Subcommand};
use regex::RegexBuilder;
use sortbench_core::{Algorithm, available_workers, parse_sequence};
use sortbench_report::{OutputFormat, Report, generate_csv_report, generate_json_report};
use sortbench_stats::GroupBy;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// SortBench CLI arguments
#[derive(Parser, Debug, Default)]
#[command(name = "sortbench")]
#[command(author, version, about = "SortBench - sequential vs parallel sorting benchmarks")]
pub struct Cli {
    /// Optional subcommand (Run, List, Init); defaults to Run
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Input sizes, comma separated
    #[arg(long, value_delimiter = ',')]
    pub sizes: Option<Vec<usize>>,

    /// Trials per (algorithm, size)
    #[arg(long)]
    pub trials: Option<usize>,

    /// Worker pool size for parallel variants
    #[arg(long, short = 'j')]
    pub workers: Option<usize>,

    /// Partition size at or below which parallel variants sort sequentially
    #[arg(long)]
    pub threshold: Option<usize>,

    /// Dataset seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Dataset distribution: uniform, normal, exponential, sorted,
    /// reverse-sorted, all-equal, nearly-sorted
    #[arg(long)]
    pub distribution: Option<String>,

    /// Only run algorithms whose id or name matches this regex
    #[arg(long)]
    pub algorithms: Option<String>,

    /// Deadline per fork-join stage (e.g. "30s"); "0s" disables it
    #[arg(long)]
    pub stage_timeout: Option<String>,

    /// Sort the integers in this JSON array file instead of generated data
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Output format: json, csv, human
    #[arg(long)]
    pub format: Option<String>,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Summarise per algorithm and input size
    #[arg(long)]
    pub group_by_size: bool,

    /// Configuration file (default: discover sortbench.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// CLI subcommands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Run the benchmark (default)
    Run,
    /// List algorithms with their complexity
    List,
    /// Print a default sortbench.toml
    Init,
}

/// Run the SortBench CLI with process arguments.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run_with_cli(cli)
}

/// Run the SortBench CLI with pre-parsed arguments.
pub fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    init_tracing(cli.verbose);

    match cli.command {
        Some(Commands::List) => {
            print!("{}", format_algorithm_list());
            Ok(())
        }
        Some(Commands::Init) => {
            print!("{}", SortbenchConfig::default_toml());
            Ok(())
        }
        Some(Commands::Run) | None => run_benchmarks(&cli),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let directives = ["sortbench", "sortbench_core", "sortbench_stats", "sortbench_cli"]
        .map(|target| format!("{}={}", target, level))
        .join(",");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives));
    // A subscriber may already be installed when embedded in another binary
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_config(cli: &Cli) -> anyhow::Result<SortbenchConfig> {
    match &cli.config {
        Some(path) => SortbenchConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(SortbenchConfig::discover().unwrap_or_default()),
    }
}

/// Build a RunConfig by layering: sortbench.toml → CLI overrides.
pub fn build_run_config(cli: &Cli, config: &SortbenchConfig) -> anyhow::Result<RunConfig> {
    let distribution = match &cli.distribution {
        Some(d) => d.parse().map_err(anyhow::Error::msg)?,
        None => config.dataset.distribution,
    };

    let stage_timeout = match &cli.stage_timeout {
        Some(s) => {
            let timeout = SortbenchConfig::parse_duration(s)?;
            (!timeout.is_zero()).then_some(timeout)
        }
        None => config.stage_timeout()?,
    };

    let algorithms = match &cli.algorithms {
        Some(pattern) => {
            let re = RegexBuilder::new(pattern)
                .case_insensitive(true)
                .build()
                .with_context(|| format!("Invalid --algorithms pattern: {}", pattern))?;
            Algorithm::ALL
                .into_iter()
                .filter(|a| re.is_match(a.id()) || re.is_match(a.name()))
                .collect()
        }
        None => config.runner.algorithms.clone(),
    };

    let group_by = if cli.group_by_size || config.output.group_by_size {
        GroupBy::AlgorithmAndSize
    } else {
        GroupBy::Algorithm
    };

    Ok(RunConfig {
        sizes: cli
            .sizes
            .clone()
            .unwrap_or_else(|| config.dataset.sizes.clone()),
        trials: cli.trials.unwrap_or(config.runner.trials).max(1),
        workers: cli
            .workers
            .or(config.engine.workers)
            .unwrap_or_else(available_workers)
            .max(1),
        threshold: cli.threshold.unwrap_or(config.engine.threshold),
        seed: cli.seed.unwrap_or(config.dataset.seed),
        distribution,
        algorithms,
        stage_timeout,
        cpu_sample_interval: config.cpu_sample_interval()?,
        group_by,
    })
}

/// Read a JSON array of integers through the input validation boundary
pub fn load_input(path: &Path) -> anyhow::Result<Vec<i64>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read input {}", path.display()))?;
    let values: Vec<serde_json::Value> = serde_json::from_str(&content)
        .with_context(|| format!("{} is not a JSON array", path.display()))?;
    Ok(parse_sequence(&values)?)
}

/// Run a full benchmark without printing anything
pub fn execute(
    run_config: &RunConfig,
    input: Option<Vec<i64>>,
    show_progress: bool,
) -> anyhow::Result<Report> {
    let start_time = Instant::now();
    let driver = Driver::new(run_config.clone())?.with_progress(show_progress);

    let outcome = match input {
        Some(data) => driver.run_datasets(&[(data.len(), data)]),
        None => driver.run(),
    };

    let total_duration_ms = start_time.elapsed().as_secs_f64() * 1000.0;
    Ok(build_report(outcome, run_config, total_duration_ms))
}

fn run_benchmarks(cli: &Cli) -> anyhow::Result<()> {
    let config = load_config(cli)?;
    let format_str = cli.format.as_deref().unwrap_or(&config.output.format);
    let format: OutputFormat = format_str.parse().map_err(anyhow::Error::msg)?;

    let run_config = build_run_config(cli, &config)?;
    if run_config.algorithms.is_empty() {
        println!("No algorithms matched.");
        return Ok(());
    }

    let input = cli.input.as_deref().map(load_input).transpose()?;
    let dataset_count = if input.is_some() { 1 } else { run_config.sizes.len() };

    println!(
        "Running {} sorts ({} algorithms, {} trials), {} worker(s)...\n",
        run_config.total_runs(dataset_count),
        run_config.algorithms.len(),
        run_config.trials,
        run_config.workers
    );

    let report = execute(&run_config, input, true)?;

    let output = match format {
        OutputFormat::Json => generate_json_report(&report)?,
        OutputFormat::Csv => generate_csv_report(&report),
        OutputFormat::Human => format_human_output(&report),
    };

    if let Some(ref path) = cli.output {
        let path = resolve_output_path(path, &config);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = std::fs::File::create(&path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        file.write_all(output.as_bytes())?;
        println!("Report written to: {}", path.display());
    } else {
        print!("{}", output);
    }

    if !report.is_success() {
        if report.totals.failed > 0 {
            eprintln!("\n{} run(s) failed", report.totals.failed);
        }
        if report.totals.unsorted > 0 {
            eprintln!("\n{} run(s) produced unsorted output", report.totals.unsorted);
        }
        std::process::exit(1);
    }

    Ok(())
}

/// Bare file names land in `[output] directory` when one is configured
fn resolve_output_path(path: &Path, config: &SortbenchConfig) -> PathBuf {
    match &config.output.directory {
        Some(dir) if path.parent().is_none_or(|p| p.as_os_str().is_empty()) => {
            Path::new(dir).join(path)
        }
        _ => path.to_path_buf(),
    }
}
