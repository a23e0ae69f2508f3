//! # SortBench
//!
//! Sequential vs parallel sorting benchmarks with verified correctness,
//! exact stability scoring and parallel-efficiency estimates.
//!
//! - **Sort Engine**: merge sort and Lomuto quicksort, plus fork-join parallel
//!   variants on a fixed-size worker pool with per-stage deadlines
//! - **Metrics**: output re-verification, exact stability from the output
//!   permutation, efficiency against an `n log2 n` baseline
//! - **Aggregation**: per-algorithm (or per-size) summaries and speedups
//! - **Reports**: JSON, CSV and terminal output
//!
//! ## Quick Start
//!
//! ```ignore
//! use sortbench::prelude::*;
//!
//! let sorter = Sorter::new(4)?;
//! let original = vec![5, 3, 5, 1, 2];
//! let result = sorter.sort_tracked(Algorithm::ParallelMergeSort, &original)?;
//! let record = MetricsCalculator::new(HostProbe::default())
//!     .compute(&original, &result, Algorithm::ParallelMergeSort)?;
//! assert_eq!(record.stability_score, 1.0);
//! ```

// Re-export core types
pub use sortbench_core::{
    Algorithm, CancelToken, Complexity, DEFAULT_THRESHOLD, ForkJoinPool, SortError, SortJob,
    SortResult, Sorter, Stage, Tracked, available_workers, is_sorted, merge_sort,
    parallel_merge_sort, parallel_quicksort, parse_sequence, quicksort, sort, track, untrack,
};

// Re-export stats
pub use sortbench_stats::{
    AggregateSummary, FixedProbe, GroupBy, GroupSummary, HostProbe, MetricsCalculator,
    MetricsError, MetricsRecord, ParallelMetrics, ProbeError, ResourceProbe, SpeedupEntry,
    SummaryStatistics, aggregate, compute_speedups, compute_summary, parallel_efficiency,
    stability_score,
};

// Re-export report types
pub use sortbench_report::{
    FailedRun, FailureKind, OutputFormat, Report, generate_csv_report, generate_json_report,
};

pub use sortbench_cli::{DatasetGenerator, Distribution, Driver, RunConfig, SortbenchConfig};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        Algorithm, GroupBy, HostProbe, MetricsCalculator, MetricsRecord, SortError, Sorter,
        aggregate,
    };
}

/// Run the SortBench CLI.
pub use sortbench_cli::run;
