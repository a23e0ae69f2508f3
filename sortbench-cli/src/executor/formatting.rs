//! Output Formatting
//!
//! Human-readable output for benchmark reports and the algorithm catalogue.

use sortbench_core::Algorithm;
use sortbench_report::Report;
use sortbench_stats::GroupSummary;
use std::fmt::Write;

fn group_label(group: &GroupSummary) -> String {
    match group.key.input_size {
        Some(size) => format!("{} (n={})", group.key.algorithm, size),
        None => group.key.algorithm.to_string(),
    }
}

fn format_opt(value: Option<f64>, unit: &str) -> String {
    value
        .map(|v| format!("{:.2}{}", v, unit))
        .unwrap_or_else(|| "n/a".to_string())
}

/// Format a report for human-readable terminal display
pub fn format_human_output(report: &Report) -> String {
    let mut output = String::new();

    output.push('\n');
    output.push_str("SortBench Results\n");
    output.push_str(&"=".repeat(60));
    output.push_str("\n\n");

    let config = &report.meta.config;
    let _ = writeln!(
        output,
        "sizes: {:?}  trials: {}  workers: {}  threshold: {}  distribution: {}  seed: {}\n",
        config.sizes,
        config.trials,
        config.workers,
        config.threshold,
        config.distribution,
        config.seed
    );

    if report.summary.is_empty() {
        output.push_str("No successful runs.\n\n");
    }

    for group in report.summary.iter() {
        let icon = if group.success_rate == 100.0 { "✓" } else { "✗" };
        let _ = writeln!(output, "  {} {}", icon, group_label(group));

        let t = &group.execution_time;
        let _ = writeln!(
            output,
            "      mean: {:.6} s  median: {:.6} s  stddev: {:.6} s  cv: {:.1}%",
            t.mean,
            t.median,
            t.std_dev,
            t.coefficient_of_variation()
        );
        let _ = writeln!(
            output,
            "      min: {:.6} s  max: {:.6} s  p95: {:.6} s  runs: {}",
            t.min, t.max, t.p95, group.count
        );
        let _ = writeln!(
            output,
            "      sorted: {:.1}%  stability: {:.3}  memory: {}",
            group.success_rate,
            group.mean_stability,
            format_opt(group.mean_memory_mb, " MB")
        );
        if let Some(efficiency) = group.mean_parallel_efficiency {
            let _ = writeln!(
                output,
                "      efficiency: {:.3}  cpu: {}",
                efficiency,
                format_opt(group.mean_cpu_utilization, "%")
            );
        }
        output.push('\n');
    }

    if !report.speedups.is_empty() {
        output.push_str("Speedup vs sequential\n");
        output.push_str(&"-".repeat(60));
        output.push('\n');

        let width = report
            .speedups
            .iter()
            .map(|s| s.algorithm.name().len())
            .max()
            .unwrap_or(20);
        let _ = writeln!(
            output,
            "  {:<width$}  {:>8}  {:>12}  {:>12}  {:>8}",
            "Algorithm",
            "n",
            "baseline s",
            "mean s",
            "speedup",
            width = width
        );
        for s in &report.speedups {
            let _ = writeln!(
                output,
                "  {:<width$}  {:>8}  {:>12.6}  {:>12.6}  {:>7.2}x",
                s.algorithm.name(),
                s.input_size,
                s.baseline_mean_secs,
                s.mean_secs,
                s.speedup,
                width = width
            );
        }
        output.push('\n');
    }

    if !report.failures.is_empty() {
        output.push_str("Failed runs\n");
        output.push_str(&"-".repeat(60));
        output.push('\n');
        for f in &report.failures {
            let _ = writeln!(
                output,
                "  💥 {} n={} trial {}: {}: {}",
                f.algorithm, f.input_size, f.trial, f.kind, f.message
            );
        }
        output.push('\n');
    }

    let totals = &report.totals;
    output.push_str(&"=".repeat(60));
    output.push('\n');
    let _ = writeln!(
        output,
        "Runs: {}  succeeded: {}  failed: {}  unsorted: {}  degraded: {}  ({:.0} ms)",
        totals.runs,
        totals.succeeded,
        totals.failed,
        totals.unsorted,
        totals.degraded,
        totals.total_duration_ms
    );

    output
}

/// Table of available algorithms with their complexity
pub fn format_algorithm_list() -> String {
    let mut output = String::from("SortBench Algorithms:\n");
    let _ = writeln!(
        output,
        "  {:<22} {:<20} {:<11} {:<11} {:<11} {:<9} {:<7} {}",
        "ID", "Name", "Best", "Average", "Worst", "Space", "Stable", "Speedup"
    );
    for algorithm in Algorithm::ALL {
        let c = algorithm.complexity();
        let _ = writeln!(
            output,
            "  {:<22} {:<20} {:<11} {:<11} {:<11} {:<9} {:<7} {}",
            algorithm.id(),
            algorithm.name(),
            c.time_best,
            c.time_average,
            c.time_worst,
            c.space,
            if algorithm.is_stable() { "yes" } else { "no" },
            c.parallel_speedup.unwrap_or("-"),
        );
    }
    output
}
