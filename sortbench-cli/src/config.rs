//! Configuration loading from sortbench.toml
//!
//! Every field has a default, so a partial file (or none at all) is valid.
//! The file is discovered by walking up from the current directory; CLI
//! flags override whatever it sets.

use crate::dataset::Distribution;
use serde::{Deserialize, Serialize};
use sortbench_core::{Algorithm, DEFAULT_THRESHOLD};
use std::path::Path;
use std::time::Duration;

/// Name of the configuration file looked up by [`SortbenchConfig::discover`]
pub const CONFIG_FILE: &str = "sortbench.toml";

/// SortBench configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SortbenchConfig {
    #[serde(default)]
    pub dataset: DatasetConfig,
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub runner: RunnerConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Generated input data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    #[serde(default = "default_sizes")]
    pub sizes: Vec<usize>,
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default)]
    pub distribution: Distribution,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            sizes: default_sizes(),
            seed: default_seed(),
            distribution: Distribution::default(),
        }
    }
}

fn default_sizes() -> Vec<usize> {
    vec![1000, 5000, 10000]
}
fn default_seed() -> u64 {
    42
}

/// Sort engine settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Worker pool size; available cores when unset
    #[serde(default)]
    pub workers: Option<usize>,
    /// Partition size at or below which parallel variants run sequentially
    #[serde(default = "default_threshold")]
    pub threshold: usize,
    /// Deadline per fork-join stage (e.g. "60s"); "0s" disables it
    #[serde(default = "default_stage_timeout")]
    pub stage_timeout: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            workers: None,
            threshold: default_threshold(),
            stage_timeout: default_stage_timeout(),
        }
    }
}

fn default_threshold() -> usize {
    DEFAULT_THRESHOLD
}
fn default_stage_timeout() -> String {
    "60s".to_string()
}

/// Benchmark driver settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerConfig {
    #[serde(default = "default_trials")]
    pub trials: usize,
    #[serde(default = "default_algorithms")]
    pub algorithms: Vec<Algorithm>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            trials: default_trials(),
            algorithms: default_algorithms(),
        }
    }
}

fn default_trials() -> usize {
    3
}
fn default_algorithms() -> Vec<Algorithm> {
    Algorithm::ALL.to_vec()
}

/// Host observation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Window over which CPU utilisation is sampled (e.g. "100ms")
    #[serde(default = "default_cpu_sample_interval")]
    pub cpu_sample_interval: String,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            cpu_sample_interval: default_cpu_sample_interval(),
        }
    }
}

fn default_cpu_sample_interval() -> String {
    "100ms".to_string()
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default output format: "human", "json", "csv"
    #[serde(default = "default_format")]
    pub format: String,
    /// Directory reports are written to when `--output` is a bare file name
    #[serde(default)]
    pub directory: Option<String>,
    /// Summarise per (algorithm, size) instead of per algorithm
    #[serde(default)]
    pub group_by_size: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            directory: None,
            group_by_size: false,
        }
    }
}

fn default_format() -> String {
    "human".to_string()
}

impl SortbenchConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Try to discover and load configuration by walking up from current directory
    pub fn discover() -> Option<Self> {
        let mut dir = std::env::current_dir().ok()?;
        loop {
            let config_path = dir.join(CONFIG_FILE);
            if config_path.exists() {
                return match Self::load(&config_path) {
                    Ok(config) => Some(config),
                    Err(e) => {
                        eprintln!(
                            "Warning: ignoring {}: {}",
                            config_path.display(),
                            e
                        );
                        None
                    }
                };
            }
            if !dir.pop() {
                break;
            }
        }
        None
    }

    /// Generate a default configuration as TOML string
    pub fn default_toml() -> String {
        r#"# SortBench Configuration

[dataset]
# Input sizes to benchmark
sizes = [1000, 5000, 10000]
# Seed for reproducible datasets
seed = 42
# uniform, normal, exponential, sorted, reverse-sorted, all-equal, nearly-sorted
distribution = "uniform"

[engine]
# Worker pool size (uncomment to pin; defaults to available cores)
# workers = 4
# Partitions at or below this size are sorted sequentially
threshold = 1000
# Deadline for each fork-join stage; "0s" disables it
stage_timeout = "60s"

[runner]
# Trials per (algorithm, size)
trials = 3
algorithms = ["merge-sort", "quick-sort", "parallel-merge-sort", "parallel-quick-sort"]

[metrics]
# Window for CPU utilisation sampling on parallel runs
cpu_sample_interval = "100ms"

[output]
# Default output format: human, json, csv
format = "human"
# Directory for report files (uncomment to enable)
# directory = "target/sortbench"
# Summarise per algorithm and input size
group_by_size = false
"#
        .to_string()
    }

    /// Parse duration string (e.g., "3s", "500ms", "2m")
    pub fn parse_duration(s: &str) -> anyhow::Result<Duration> {
        let s = s.trim();
        if s.is_empty() {
            return Err(anyhow::anyhow!("Empty duration string"));
        }

        let (num_part, unit_part) = s
            .char_indices()
            .find(|(_, c)| c.is_alphabetic())
            .map(|(i, _)| s.split_at(i))
            .unwrap_or((s, "s"));

        let value: f64 = num_part
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("Invalid duration number: {}", num_part))?;
        if !value.is_finite() || value < 0.0 {
            return Err(anyhow::anyhow!("Duration must be non-negative: {}", s));
        }

        let nanos_per_unit: f64 = match unit_part.to_lowercase().as_str() {
            "ns" => 1.0,
            "us" | "µs" => 1e3,
            "ms" => 1e6,
            "s" => 1e9,
            "m" | "min" => 60e9,
            _ => return Err(anyhow::anyhow!("Unknown duration unit: {}", unit_part)),
        };

        Ok(Duration::from_nanos((value * nanos_per_unit) as u64))
    }

    /// Stage deadline; `None` when configured as zero
    pub fn stage_timeout(&self) -> anyhow::Result<Option<Duration>> {
        let timeout = Self::parse_duration(&self.engine.stage_timeout)?;
        Ok((!timeout.is_zero()).then_some(timeout))
    }

    pub fn cpu_sample_interval(&self) -> anyhow::Result<Duration> {
        Self::parse_duration(&self.metrics.cpu_sample_interval)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SortbenchConfig::default();
        assert_eq!(config.dataset.sizes, vec![1000, 5000, 10000]);
        assert_eq!(config.dataset.seed, 42);
        assert_eq!(config.engine.threshold, 1000);
        assert_eq!(config.runner.trials, 3);
        assert_eq!(config.runner.algorithms.len(), 4);
        assert_eq!(
            config.stage_timeout().unwrap(),
            Some(Duration::from_secs(60))
        );
    }

    #[test]
    fn test_parse_duration() {
        let d = SortbenchConfig::parse_duration;
        assert_eq!(d("3s").unwrap(), Duration::from_secs(3));
        assert_eq!(d("500ms").unwrap(), Duration::from_millis(500));
        assert_eq!(d("100us").unwrap(), Duration::from_micros(100));
        assert_eq!(d("1000ns").unwrap(), Duration::from_nanos(1000));
        assert_eq!(d("2m").unwrap(), Duration::from_secs(120));
        assert_eq!(d("1.5s").unwrap(), Duration::from_millis(1500));
        assert_eq!(d("7").unwrap(), Duration::from_secs(7));
        assert!(d("").is_err());
        assert!(d("5h").is_err());
        assert!(d("-1s").is_err());
    }

    #[test]
    fn test_parse_toml() {
        let toml_str = r#"
            [dataset]
            sizes = [10, 20]
            distribution = "nearly-sorted"

            [engine]
            workers = 2
            stage_timeout = "0s"

            [runner]
            algorithms = ["merge-sort", "parallel-merge-sort"]
        "#;

        let config: SortbenchConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.dataset.sizes, vec![10, 20]);
        assert_eq!(config.dataset.distribution, Distribution::NearlySorted);
        assert_eq!(config.engine.workers, Some(2));
        assert_eq!(config.stage_timeout().unwrap(), None);
        assert_eq!(
            config.runner.algorithms,
            vec![Algorithm::MergeSort, Algorithm::ParallelMergeSort]
        );
        // Defaults should still apply
        assert_eq!(config.dataset.seed, 42);
        assert_eq!(config.output.format, "human");
    }

    #[test]
    fn test_default_toml_parses() {
        let config: SortbenchConfig = toml::from_str(&SortbenchConfig::default_toml()).unwrap();
        assert_eq!(config.dataset.sizes, vec![1000, 5000, 10000]);
        assert_eq!(config.runner.algorithms, Algorithm::ALL.to_vec());
        assert_eq!(
            config.cpu_sample_interval().unwrap(),
            Duration::from_millis(100)
        );
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "[runner]\ntrials = 9\n").unwrap();
        let config = SortbenchConfig::load(&path).unwrap();
        assert_eq!(config.runner.trials, 9);

        std::fs::write(&path, "[runner\n").unwrap();
        assert!(SortbenchConfig::load(&path).is_err());
    }
}
