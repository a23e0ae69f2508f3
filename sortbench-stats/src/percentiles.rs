//! Percentiles over execution-time samples

/// Linear interpolation between nearest ranks; 0.0 for an empty slice
pub fn compute_percentile(samples: &[f64], percentile: f64) -> f64 {
    match samples {
        [] => 0.0,
        [only] => *only,
        _ => {
            let mut sorted = samples.to_vec();
            sorted.sort_by(f64::total_cmp);
            percentile_of_sorted(&sorted, percentile)
        }
    }
}

/// Same as [`compute_percentile`] for input already in ascending order
pub(crate) fn percentile_of_sorted(sorted: &[f64], percentile: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }

    let last = sorted.len() - 1;
    let rank = (percentile / 100.0).clamp(0.0, 1.0) * last as f64;
    let lower = rank.floor() as usize;
    let upper = (lower + 1).min(last);
    let fraction = rank - lower as f64;

    sorted[lower] + fraction * (sorted[upper] - sorted[lower])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_median() {
        let samples = vec![5.0, 1.0, 3.0, 2.0, 4.0];
        assert!((compute_percentile(&samples, 50.0) - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_interpolates() {
        let samples: Vec<f64> = (1..=100).map(f64::from).collect();
        assert!((compute_percentile(&samples, 25.0) - 25.75).abs() < 1e-9);
        assert!((compute_percentile(&samples, 95.0) - 95.05).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_inputs() {
        assert_eq!(compute_percentile(&[], 50.0), 0.0);
        assert_eq!(compute_percentile(&[42.0], 99.0), 42.0);
        assert_eq!(compute_percentile(&[1.0, 2.0], 150.0), 2.0);
    }
}
