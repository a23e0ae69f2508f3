//! Summary Statistics
//!
//! Location and spread of a set of execution times. Standard deviation is
//! the sample (n - 1) estimator and is 0.0 below two samples.

use crate::percentiles::percentile_of_sorted;
use serde::{Deserialize, Serialize};

/// Summary of a sample set
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SummaryStatistics {
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub p95: f64,
    pub sample_count: usize,
}

/// Compute summary statistics; all zeros for an empty slice
pub fn compute_summary(samples: &[f64]) -> SummaryStatistics {
    if samples.is_empty() {
        return SummaryStatistics::default();
    }

    let mut sorted = samples.to_vec();
    sorted.sort_by(f64::total_cmp);

    let n = sorted.len();
    let mean = sorted.iter().sum::<f64>() / n as f64;
    let std_dev = if n < 2 {
        0.0
    } else {
        let variance = sorted.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
        variance.sqrt()
    };

    SummaryStatistics {
        mean,
        median: percentile_of_sorted(&sorted, 50.0),
        std_dev,
        min: sorted[0],
        max: sorted[n - 1],
        p95: percentile_of_sorted(&sorted, 95.0),
        sample_count: n,
    }
}

/// Arithmetic mean, `None` when there is nothing to average
pub fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

impl SummaryStatistics {
    /// Coefficient of variation in percent
    pub fn coefficient_of_variation(&self) -> f64 {
        if self.mean == 0.0 {
            0.0
        } else {
            (self.std_dev / self.mean) * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_summary() {
        let summary = compute_summary(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);

        assert!((summary.mean - 5.0).abs() < f64::EPSILON);
        assert!((summary.median - 4.5).abs() < f64::EPSILON);
        // sample variance = 32 / 7
        assert!((summary.std_dev - (32.0f64 / 7.0).sqrt()).abs() < 1e-12);
        assert_eq!(summary.min, 2.0);
        assert_eq!(summary.max, 9.0);
        assert_eq!(summary.sample_count, 8);
    }

    #[test]
    fn test_single_sample_has_zero_spread() {
        let summary = compute_summary(&[0.25]);
        assert_eq!(summary.std_dev, 0.0);
        assert_eq!(summary.min, 0.25);
        assert_eq!(summary.p95, 0.25);
    }

    #[test]
    fn test_empty_samples() {
        let summary = compute_summary(&[]);
        assert_eq!(summary.sample_count, 0);
        assert_eq!(summary.mean, 0.0);
    }

    #[test]
    fn test_coefficient_of_variation() {
        let summary = compute_summary(&[100.0, 100.0, 100.0]);
        assert_eq!(summary.coefficient_of_variation(), 0.0);
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean([1.0, 2.0, 3.0]), Some(2.0));
        assert_eq!(mean(std::iter::empty()), None);
    }
}
