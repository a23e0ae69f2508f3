//! JSON Output

use crate::report::Report;

/// Generate a prettified JSON report.
pub fn generate_json_report(report: &Report) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

/// Load a report previously written by [`generate_json_report`]
pub fn parse_json_report(json: &str) -> Result<Report, serde_json::Error> {
    serde_json::from_str(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::fixtures::{meta, record};
    use sortbench_core::Algorithm;
    use sortbench_stats::GroupBy;

    #[test]
    fn test_json_report_reloads() {
        let report = Report::new(
            meta(),
            vec![
                record(Algorithm::QuickSort, 0.03, true),
                record(Algorithm::ParallelQuickSort, 0.01, true),
            ],
            vec![],
            GroupBy::AlgorithmAndSize,
            5.0,
        );
        let json = generate_json_report(&report).unwrap();
        assert!(json.contains("\"schema_version\": 1"));
        assert!(json.contains("\"parallel-quick-sort\""));

        let loaded = parse_json_report(&json).unwrap();
        assert_eq!(loaded.records, report.records);
        assert_eq!(loaded.summary, report.summary);
        assert_eq!(loaded.totals, report.totals);
    }
}
