//! Benchmark Execution
//!
//! The driver walks sizes, then algorithms, then trials. Every cell sorts a
//! fresh copy of the size's dataset with origin tracking and hands the
//! result to the metrics calculator.
//!
//! A sort or metrics error becomes a [`FailedRun`] and the driver moves on
//! to the next cell; it never becomes a record.

use crate::dataset::{DatasetGenerator, Distribution};
use indicatif::{ProgressBar, ProgressStyle};
use sortbench_core::{Algorithm, DEFAULT_THRESHOLD, SortError, Sorter, available_workers};
use sortbench_report::FailedRun;
use sortbench_stats::{GroupBy, HostProbe, MetricsCalculator, MetricsRecord, ResourceProbe};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Resolved settings for one benchmark run
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub sizes: Vec<usize>,
    pub trials: usize,
    pub workers: usize,
    pub threshold: usize,
    pub seed: u64,
    pub distribution: Distribution,
    pub algorithms: Vec<Algorithm>,
    pub stage_timeout: Option<Duration>,
    pub cpu_sample_interval: Duration,
    pub group_by: GroupBy,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            sizes: vec![1000, 5000, 10000],
            trials: 3,
            workers: available_workers(),
            threshold: DEFAULT_THRESHOLD,
            seed: 42,
            distribution: Distribution::Uniform,
            algorithms: Algorithm::ALL.to_vec(),
            stage_timeout: Some(Duration::from_secs(60)),
            cpu_sample_interval: Duration::from_millis(100),
            group_by: GroupBy::Algorithm,
        }
    }
}

impl RunConfig {
    /// Number of sort invocations the run will attempt for `sizes` datasets
    pub fn total_runs(&self, sizes: usize) -> usize {
        sizes * self.algorithms.len() * self.trials
    }
}

/// Records and failures of a run, in execution order
#[derive(Debug, Clone, Default)]
pub struct RunOutcome {
    pub records: Vec<MetricsRecord>,
    pub failures: Vec<FailedRun>,
}

/// Benchmark driver
pub struct Driver<P = HostProbe> {
    config: RunConfig,
    sorter: Sorter,
    calculator: MetricsCalculator<P>,
    show_progress: bool,
}

impl Driver<HostProbe> {
    /// Driver observing the live host
    pub fn new(config: RunConfig) -> Result<Self, SortError> {
        let probe = HostProbe::new(config.cpu_sample_interval);
        Self::with_probe(config, probe)
    }
}

impl<P: ResourceProbe> Driver<P> {
    pub fn with_probe(config: RunConfig, probe: P) -> Result<Self, SortError> {
        let sorter = Sorter::new(config.workers)?
            .with_threshold(config.threshold)
            .with_stage_timeout(config.stage_timeout);
        Ok(Self {
            config,
            sorter,
            calculator: MetricsCalculator::new(probe),
            show_progress: false,
        })
    }

    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Generate the configured datasets and run every cell
    pub fn run(&self) -> RunOutcome {
        let mut generator = DatasetGenerator::new(self.config.seed, self.config.distribution);
        let datasets = generator.generate_all(&self.config.sizes);
        self.run_datasets(&datasets)
    }

    /// Run every cell over caller-supplied `(size, data)` pairs
    pub fn run_datasets(&self, datasets: &[(usize, Vec<i64>)]) -> RunOutcome {
        let total = self.config.total_runs(datasets.len());
        info!(
            runs = total,
            workers = self.sorter.workers(),
            threshold = self.sorter.threshold(),
            "starting benchmark"
        );

        let pb = if self.show_progress {
            ProgressBar::new(total as u64)
        } else {
            ProgressBar::hidden()
        };
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                )
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );

        let mut outcome = RunOutcome::default();
        for (size, data) in datasets {
            for &algorithm in &self.config.algorithms {
                for trial in 0..self.config.trials {
                    pb.set_message(format!("{} n={}", algorithm.id(), size));
                    match self.run_single(algorithm, *size, trial, data) {
                        Ok(record) => outcome.records.push(record),
                        Err(failure) => outcome.failures.push(failure),
                    }
                    pb.inc(1);
                }
            }
        }

        pb.finish_with_message("Complete");
        info!(
            records = outcome.records.len(),
            failures = outcome.failures.len(),
            "benchmark finished"
        );
        outcome
    }

    fn run_single(
        &self,
        algorithm: Algorithm,
        size: usize,
        trial: usize,
        data: &[i64],
    ) -> Result<MetricsRecord, FailedRun> {
        let result = self.sorter.sort_tracked(algorithm, data).map_err(|e| {
            warn!(algorithm = %algorithm, size, trial, "sort failed: {}", e);
            FailedRun::from_sort_error(algorithm, size, trial, &e)
        })?;

        let record = self
            .calculator
            .compute(data, &result, algorithm)
            .map_err(|e| {
                warn!(algorithm = %algorithm, size, trial, "metrics failed: {}", e);
                FailedRun::from_metrics_error(algorithm, size, trial, &e)
            })?;

        if !record.is_sorted {
            warn!(algorithm = %algorithm, size, trial, "output is not sorted");
        }
        debug!(
            algorithm = %algorithm,
            size,
            trial,
            secs = record.execution_time_secs,
            "run complete"
        );
        Ok(record.with_trial(trial))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sortbench_stats::FixedProbe;

    fn probe() -> FixedProbe {
        FixedProbe {
            memory_mb: Some(8.0),
            cpu_percent: Some(25.0),
            cores: 2,
        }
    }

    fn small_config() -> RunConfig {
        RunConfig {
            sizes: vec![50, 300],
            trials: 2,
            workers: 2,
            threshold: 64,
            ..RunConfig::default()
        }
    }

    #[test]
    fn test_run_covers_every_cell() {
        let driver = Driver::with_probe(small_config(), probe()).unwrap();
        let outcome = driver.run();

        assert!(outcome.failures.is_empty());
        assert_eq!(outcome.records.len(), 2 * 4 * 2);
        assert!(outcome.records.iter().all(|r| r.is_sorted));
        assert_eq!(outcome.records[0].input_size, 50);
        assert_eq!(outcome.records[0].algorithm, Algorithm::MergeSort);
        assert_eq!(outcome.records[1].trial, 1);
        assert!(
            outcome
                .records
                .iter()
                .filter(|r| r.algorithm.is_stable())
                .all(|r| r.stability_score == 1.0)
        );
        assert!(
            outcome
                .records
                .iter()
                .filter(|r| r.algorithm.is_parallel())
                .all(|r| r.parallel.is_some())
        );
    }

    #[test]
    fn test_run_datasets_uses_supplied_data() {
        let config = RunConfig {
            algorithms: vec![Algorithm::QuickSort],
            trials: 1,
            ..small_config()
        };
        let driver = Driver::with_probe(config, probe()).unwrap();
        let outcome = driver.run_datasets(&[(5, vec![5, 3, 5, 1, 2])]);

        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.records[0].input_size, 5);
        assert!(outcome.records[0].is_sorted);
    }

    #[test]
    fn test_total_runs() {
        let config = small_config();
        assert_eq!(config.total_runs(config.sizes.len()), 16);
        assert_eq!(config.total_runs(0), 0);
    }
}
