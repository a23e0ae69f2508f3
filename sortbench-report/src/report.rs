//! Report Data Structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sortbench_core::{Algorithm, SortError};
use sortbench_stats::{
    AggregateSummary, GroupBy, MetricsError, MetricsRecord, SpeedupEntry, aggregate,
    compute_speedups,
};

/// Current report schema version
pub const SCHEMA_VERSION: u32 = 1;

/// Complete benchmark report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub meta: ReportMeta,
    /// One record per successful sort invocation
    pub records: Vec<MetricsRecord>,
    /// Invocations that did not produce a record
    pub failures: Vec<FailedRun>,
    pub summary: AggregateSummary,
    pub speedups: Vec<SpeedupEntry>,
    pub totals: ReportTotals,
}

impl Report {
    /// Assemble a report, deriving the summary, speedups and totals
    pub fn new(
        meta: ReportMeta,
        records: Vec<MetricsRecord>,
        failures: Vec<FailedRun>,
        group_by: GroupBy,
        total_duration_ms: f64,
    ) -> Self {
        let summary = aggregate(&records, group_by);
        let speedups = compute_speedups(&records);
        let totals = ReportTotals {
            runs: records.len() + failures.len(),
            succeeded: records.len(),
            failed: failures.len(),
            unsorted: records.iter().filter(|r| !r.is_sorted).count(),
            degraded: records.iter().filter(|r| r.is_degraded()).count(),
            total_duration_ms,
        };
        Self {
            meta,
            records,
            failures,
            summary,
            speedups,
            totals,
        }
    }

    /// Every run produced a record and every record verified as sorted
    pub fn is_success(&self) -> bool {
        self.totals.failed == 0 && self.totals.unsorted == 0
    }
}

/// Report metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMeta {
    pub schema_version: u32,
    pub version: String,
    pub timestamp: DateTime<Utc>,
    pub system: SystemInfo,
    pub config: ReportConfig,
}

/// Run configuration captured in report metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    pub sizes: Vec<usize>,
    pub trials: usize,
    pub workers: usize,
    pub threshold: usize,
    pub seed: u64,
    pub distribution: String,
    pub algorithms: Vec<Algorithm>,
    pub stage_timeout_ms: Option<u64>,
}

/// System information
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SystemInfo {
    pub os: String,
    pub os_version: String,
    pub arch: String,
    pub cpu: String,
    pub cpu_cores: u32,
    pub memory_gb: f64,
}

/// Why a run produced no record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailureKind {
    InvalidInput,
    WorkerFailure,
    Timeout,
    Cancelled,
    Pool,
    Metrics,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            FailureKind::InvalidInput => "invalid input",
            FailureKind::WorkerFailure => "worker failure",
            FailureKind::Timeout => "timeout",
            FailureKind::Cancelled => "cancelled",
            FailureKind::Pool => "pool",
            FailureKind::Metrics => "metrics",
        };
        f.write_str(s)
    }
}

impl From<&SortError> for FailureKind {
    fn from(err: &SortError) -> Self {
        match err {
            SortError::InvalidInput { .. } => FailureKind::InvalidInput,
            SortError::WorkerFailure { .. } => FailureKind::WorkerFailure,
            SortError::Timeout { .. } => FailureKind::Timeout,
            SortError::Cancelled => FailureKind::Cancelled,
            SortError::PoolBuild(_) => FailureKind::Pool,
        }
    }
}

/// A sort invocation that failed to run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailedRun {
    pub algorithm: Algorithm,
    pub input_size: usize,
    pub trial: usize,
    pub kind: FailureKind,
    pub message: String,
}

impl FailedRun {
    pub fn from_sort_error(
        algorithm: Algorithm,
        input_size: usize,
        trial: usize,
        err: &SortError,
    ) -> Self {
        Self {
            algorithm,
            input_size,
            trial,
            kind: err.into(),
            message: err.to_string(),
        }
    }

    pub fn from_metrics_error(
        algorithm: Algorithm,
        input_size: usize,
        trial: usize,
        err: &MetricsError,
    ) -> Self {
        Self {
            algorithm,
            input_size,
            trial,
            kind: FailureKind::Metrics,
            message: err.to_string(),
        }
    }
}

/// Run counts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportTotals {
    pub runs: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// Records whose output did not verify as sorted
    pub unsorted: usize,
    /// Records with an unavailable host observation
    pub degraded: usize,
    pub total_duration_ms: f64,
}


#[cfg(test)]
mod tests {
    use super::fixtures::{meta, record};
    use super::*;
    use sortbench_core::Stage;
    use std::time::Duration;

    #[test]
    fn test_report_totals() {
        let records = vec![
            record(Algorithm::MergeSort, 0.02, true),
            record(Algorithm::ParallelMergeSort, 0.01, true),
        ];
        let failure = FailedRun::from_sort_error(
            Algorithm::ParallelQuickSort,
            1000,
            0,
            &SortError::Timeout {
                stage: Stage::QuicksortSplit,
                timeout: Duration::from_secs(1),
            },
        );
        let report = Report::new(meta(), records, vec![failure], GroupBy::Algorithm, 12.0);

        assert_eq!(report.totals.runs, 3);
        assert_eq!(report.totals.failed, 1);
        assert_eq!(report.failures[0].kind, FailureKind::Timeout);
        assert_eq!(report.summary.len(), 2);
        assert_eq!(report.speedups.len(), 1);
        assert!((report.speedups[0].speedup - 2.0).abs() < 1e-12);
        assert!(!report.is_success());
    }

    #[test]
    fn test_unsorted_record_fails_report() {
        let report = Report::new(
            meta(),
            vec![record(Algorithm::QuickSort, 0.01, false)],
            vec![],
            GroupBy::Algorithm,
            1.0,
        );
        assert_eq!(report.totals.unsorted, 1);
        assert!(!report.is_success());
    }

    #[test]
    fn test_empty_report() {
        let report = Report::new(meta(), vec![], vec![], GroupBy::AlgorithmAndSize, 0.0);
        assert!(report.summary.is_empty());
        assert!(report.is_success());
    }
}
