//! SortBench Core - Sort Engine
//!
//! This crate provides the sorting side of the benchmark:
//! - Sequential merge sort and Lomuto quicksort kernels
//! - Parallel merge sort (chunk, sort, pairwise merge rounds)
//! - Parallel quicksort (three-way partition, concurrent recursion)
//! - A fixed-size fork-join pool with fail-fast cancellation and per-stage deadlines
//! - Input validation and origin tracking for exact stability scoring

mod algorithm;
mod error;
mod kernels;
mod measure;
mod parallel;
mod pool;
mod sequence;
mod sorter;

pub use algorithm::{Algorithm, Complexity};
pub use error::{SortError, Stage};
pub use kernels::{is_sorted, lomuto_partition, merge, merge_sort, quicksort, quicksort_range};
pub use measure::{Timer, timed};
pub use parallel::{parallel_merge_sort, parallel_quicksort, split_chunks, three_way_partition};
pub use pool::{CancelToken, ForkJoinPool, available_workers};
pub use sequence::{Tracked, parse_sequence, track, untrack};
pub use sorter::{SortJob, SortResult, Sorter, sort};

/// Partition size at or below which parallel orchestrators run sequentially
pub const DEFAULT_THRESHOLD: usize = 1000;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert_eq!(DEFAULT_THRESHOLD, 1000);
        assert!(available_workers() >= 1);
    }
}
