//! Measured speedup of each parallel algorithm over its sequential
//! counterpart at the same input size.

use crate::metrics::MetricsRecord;
use serde::{Deserialize, Serialize};
use sortbench_core::Algorithm;
use std::collections::BTreeMap;

/// One row of the speedup table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeedupEntry {
    pub algorithm: Algorithm,
    pub baseline: Algorithm,
    pub input_size: usize,
    pub baseline_mean_secs: f64,
    pub mean_secs: f64,
    /// `baseline_mean_secs / mean_secs`; above 1.0 means the parallel variant won
    pub speedup: f64,
}

/// Speedups for every (parallel algorithm, size) whose counterpart also ran
pub fn compute_speedups(records: &[MetricsRecord]) -> Vec<SpeedupEntry> {
    let mut totals: BTreeMap<(usize, Algorithm), (f64, usize)> = BTreeMap::new();
    for r in records {
        let slot = totals.entry((r.input_size, r.algorithm)).or_default();
        slot.0 += r.execution_time_secs;
        slot.1 += 1;
    }
    let means: BTreeMap<_, f64> = totals
        .into_iter()
        .map(|(key, (sum, n))| (key, sum / n as f64))
        .collect();

    means
        .iter()
        .filter(|((_, algorithm), _)| algorithm.is_parallel())
        .filter_map(|(&(input_size, algorithm), &mean_secs)| {
            let baseline = algorithm.sequential_counterpart();
            let baseline_mean_secs = *means.get(&(input_size, baseline))?;
            (mean_secs > 0.0).then(|| SpeedupEntry {
                algorithm,
                baseline,
                input_size,
                baseline_mean_secs,
                mean_secs,
                speedup: baseline_mean_secs / mean_secs,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(algorithm: Algorithm, input_size: usize, secs: f64) -> MetricsRecord {
        MetricsRecord {
            algorithm,
            input_size,
            trial: 0,
            execution_time_secs: secs,
            memory_usage_mb: None,
            core_count: 4,
            is_sorted: true,
            stability_score: 1.0,
            parallel: None,
            resource_errors: vec![],
        }
    }

    #[test]
    fn test_speedup_against_counterpart() {
        let records = vec![
            record(Algorithm::MergeSort, 1000, 0.4),
            record(Algorithm::MergeSort, 1000, 0.2),
            record(Algorithm::ParallelMergeSort, 1000, 0.1),
            record(Algorithm::ParallelQuickSort, 1000, 0.1),
            record(Algorithm::QuickSort, 5000, 0.5),
            record(Algorithm::ParallelQuickSort, 5000, 0.25),
        ];
        let speedups = compute_speedups(&records);

        // ParallelQuickSort at 1000 has no QuickSort baseline
        assert_eq!(speedups.len(), 2);
        assert_eq!(speedups[0].algorithm, Algorithm::ParallelMergeSort);
        assert_eq!(speedups[0].baseline, Algorithm::MergeSort);
        assert!((speedups[0].speedup - 3.0).abs() < 1e-12);
        assert_eq!(speedups[1].input_size, 5000);
        assert!((speedups[1].speedup - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_no_records() {
        assert!(compute_speedups(&[]).is_empty());
    }
}
