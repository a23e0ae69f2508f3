//! Algorithm Catalogue
//!
//! Closed set of sort variants dispatched by a single entry point. Adding a
//! variant means extending this enum and the match in `Sorter::sort`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sort algorithm variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    /// Top-down merge sort allocating new storage per call
    MergeSort,
    /// In-place Lomuto quicksort
    QuickSort,
    /// Chunked merge sort with pairwise parallel merge rounds
    ParallelMergeSort,
    /// Three-way partition quicksort recursing on both sides concurrently
    ParallelQuickSort,
}

/// Asymptotic complexity of an algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Complexity {
    pub time_best: &'static str,
    pub time_average: &'static str,
    pub time_worst: &'static str,
    pub space: &'static str,
    /// Ideal speedup for parallel variants
    pub parallel_speedup: Option<&'static str>,
}

impl Algorithm {
    /// All variants in presentation order
    pub const ALL: [Algorithm; 4] = [
        Algorithm::MergeSort,
        Algorithm::QuickSort,
        Algorithm::ParallelMergeSort,
        Algorithm::ParallelQuickSort,
    ];

    /// Human-readable name
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::MergeSort => "Merge Sort",
            Algorithm::QuickSort => "Quick Sort",
            Algorithm::ParallelMergeSort => "Parallel Merge Sort",
            Algorithm::ParallelQuickSort => "Parallel Quick Sort",
        }
    }

    /// Stable kebab-case identifier (matches the serde representation)
    pub fn id(self) -> &'static str {
        match self {
            Algorithm::MergeSort => "merge-sort",
            Algorithm::QuickSort => "quick-sort",
            Algorithm::ParallelMergeSort => "parallel-merge-sort",
            Algorithm::ParallelQuickSort => "parallel-quick-sort",
        }
    }

    /// Whether the variant dispatches work to the worker pool
    pub fn is_parallel(self) -> bool {
        matches!(
            self,
            Algorithm::ParallelMergeSort | Algorithm::ParallelQuickSort
        )
    }

    /// Whether equal elements are guaranteed to keep their relative order
    pub fn is_stable(self) -> bool {
        matches!(self, Algorithm::MergeSort | Algorithm::ParallelMergeSort)
    }

    /// Sequential baseline used for speedup comparisons
    pub fn sequential_counterpart(self) -> Algorithm {
        match self {
            Algorithm::MergeSort | Algorithm::ParallelMergeSort => Algorithm::MergeSort,
            Algorithm::QuickSort | Algorithm::ParallelQuickSort => Algorithm::QuickSort,
        }
    }

    pub fn complexity(self) -> Complexity {
        match self {
            Algorithm::MergeSort => Complexity {
                time_best: "O(n log n)",
                time_average: "O(n log n)",
                time_worst: "O(n log n)",
                space: "O(n)",
                parallel_speedup: None,
            },
            Algorithm::QuickSort => Complexity {
                time_best: "O(n log n)",
                time_average: "O(n log n)",
                time_worst: "O(n²)",
                space: "O(log n)",
                parallel_speedup: None,
            },
            Algorithm::ParallelMergeSort => Complexity {
                time_best: "O(n log n)",
                time_average: "O(n log n)",
                time_worst: "O(n log n)",
                space: "O(n)",
                parallel_speedup: Some("O(p)"),
            },
            Algorithm::ParallelQuickSort => Complexity {
                time_best: "O(n log n)",
                time_average: "O(n log n)",
                time_worst: "O(n²)",
                space: "O(n)",
                parallel_speedup: Some("O(p)"),
            },
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = String;

    /// Accepts either the id (`parallel-merge-sort`) or the name (`Parallel Merge Sort`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace([' ', '_'], "-");
        Algorithm::ALL
            .into_iter()
            .find(|algo| algo.id() == normalized)
            .ok_or_else(|| format!("Unknown algorithm: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id_and_name() {
        assert_eq!(
            "parallel-merge-sort".parse::<Algorithm>().unwrap(),
            Algorithm::ParallelMergeSort
        );
        assert_eq!("Quick Sort".parse::<Algorithm>().unwrap(), Algorithm::QuickSort);
        assert_eq!("merge_sort".parse::<Algorithm>().unwrap(), Algorithm::MergeSort);
        assert!("bogo-sort".parse::<Algorithm>().is_err());
    }

    #[test]
    fn test_flags() {
        assert!(!Algorithm::MergeSort.is_parallel());
        assert!(Algorithm::ParallelQuickSort.is_parallel());
        assert!(Algorithm::ParallelMergeSort.is_stable());
        assert!(!Algorithm::QuickSort.is_stable());
        assert_eq!(
            Algorithm::ParallelQuickSort.sequential_counterpart(),
            Algorithm::QuickSort
        );
    }

    #[test]
    fn test_serde_uses_id() {
        let json = serde_json::to_string(&Algorithm::ParallelQuickSort).unwrap();
        assert_eq!(json, "\"parallel-quick-sort\"");
        for algo in Algorithm::ALL {
            let back: Algorithm = serde_json::from_str(&format!("\"{}\"", algo.id())).unwrap();
            assert_eq!(back, algo);
        }
    }

    #[test]
    fn test_complexity() {
        assert_eq!(Algorithm::QuickSort.complexity().time_worst, "O(n²)");
        assert_eq!(Algorithm::MergeSort.complexity().parallel_speedup, None);
        assert_eq!(
            Algorithm::ParallelMergeSort.complexity().parallel_speedup,
            Some("O(p)")
        );
    }
}
