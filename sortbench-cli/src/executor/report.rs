//! Report Building

use super::execution::{RunConfig, RunOutcome};
use super::metadata::build_report_meta;
use sortbench_report::Report;

/// Build a complete Report from a finished run
pub fn build_report(outcome: RunOutcome, config: &RunConfig, total_duration_ms: f64) -> Report {
    Report::new(
        build_report_meta(config),
        outcome.records,
        outcome.failures,
        config.group_by,
        total_duration_ms,
    )
}
