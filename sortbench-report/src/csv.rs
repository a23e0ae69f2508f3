//! CSV Output
//!
//! One row per record. Unavailable observations and the parallel-only
//! columns of sequential records are left empty.

use crate::report::Report;
use std::fmt::Write;

const HEADER: &str = "algorithm,input_size,trial,execution_time_secs,memory_usage_mb,core_count,\
is_sorted,stability_score,workers,cpu_utilization,estimated_speedup,parallel_efficiency";

fn opt(value: Option<f64>) -> String {
    value.map(|v| format!("{:.4}", v)).unwrap_or_default()
}

/// Generate a CSV table of the report's records
pub fn generate_csv_report(report: &Report) -> String {
    let mut out = String::from(HEADER);
    out.push('\n');

    for r in &report.records {
        let (workers, cpu, speedup, efficiency) = match r.parallel {
            Some(p) => (
                p.workers.to_string(),
                opt(p.cpu_utilization),
                format!("{:.4}", p.estimated_speedup),
                format!("{:.4}", p.parallel_efficiency),
            ),
            None => Default::default(),
        };
        let _ = writeln!(
            out,
            "{},{},{},{:.9},{},{},{},{:.4},{},{},{},{}",
            r.algorithm.id(),
            r.input_size,
            r.trial,
            r.execution_time_secs,
            opt(r.memory_usage_mb),
            r.core_count,
            r.is_sorted,
            r.stability_score,
            workers,
            cpu,
            speedup,
            efficiency,
        );
    }
    out
}
