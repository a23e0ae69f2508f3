//! SortBench Statistical Engine
//!
//! Turns sort invocations into metrics and reduces them:
//! - Per-run metrics: verified ordering, exact stability score, parallel efficiency
//! - Host resource observation that degrades instead of failing
//! - Summary statistics and percentiles over execution times
//! - Grouped aggregation and parallel-vs-sequential speedups

mod aggregate;
mod metrics;
mod percentiles;
mod probe;
mod speedup;
mod summary;

pub use aggregate::{AggregateSummary, GroupBy, GroupKey, GroupSummary, aggregate};
pub use metrics::{
    MetricsCalculator, MetricsError, MetricsRecord, ParallelMetrics, baseline_cost,
    estimated_speedup, parallel_efficiency, stability_score,
};
pub use percentiles::compute_percentile;
pub use probe::{FixedProbe, HostProbe, ProbeError, ResourceProbe};
pub use speedup::{SpeedupEntry, compute_speedups};
pub use summary::{SummaryStatistics, compute_summary, mean};
