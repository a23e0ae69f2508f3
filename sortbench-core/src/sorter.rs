//! Single Sort Entry Point
//!
//! [`Sorter`] owns a worker pool sized once and dispatches every
//! [`Algorithm`] variant through one `match`. [`sort`] is the one-shot form
//! that builds a pool for a single [`SortJob`].

use crate::algorithm::Algorithm;
use crate::error::SortError;
use crate::kernels::{merge_sort, quicksort};
use crate::measure::timed;
use crate::parallel::{parallel_merge_sort, parallel_quicksort};
use crate::pool::{ForkJoinPool, available_workers};
use crate::sequence::{Tracked, parse_sequence, track};
use crate::DEFAULT_THRESHOLD;
use serde_json::Value;
use std::time::Duration;

/// One sort request, consumed synchronously
#[derive(Debug, Clone)]
pub struct SortJob<T> {
    pub algorithm: Algorithm,
    pub input: Vec<T>,
    /// Worker pool size (ignored by sequential variants)
    pub workers: usize,
    /// Partition size at or below which parallel variants run sequentially
    pub threshold: usize,
    pub stage_timeout: Option<Duration>,
}

impl<T> SortJob<T> {
    /// Job with default workers (available cores) and threshold
    pub fn new(algorithm: Algorithm, input: Vec<T>) -> Self {
        Self {
            algorithm,
            input,
            workers: available_workers(),
            threshold: DEFAULT_THRESHOLD,
            stage_timeout: None,
        }
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_stage_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.stage_timeout = timeout;
        self
    }
}

impl SortJob<i64> {
    /// Build a job from untrusted JSON values, rejecting malformed elements
    pub fn from_raw(algorithm: Algorithm, raw: &[Value]) -> Result<Self, SortError> {
        Ok(Self::new(algorithm, parse_sequence(raw)?))
    }
}

/// Output of a sort invocation
#[derive(Debug, Clone)]
pub struct SortResult<T> {
    pub sorted: Vec<T>,
    /// Wall-clock time of the algorithm alone
    pub elapsed: Duration,
    /// Workers the algorithm actually ran with (1 for sequential variants)
    pub workers: usize,
}

/// Reusable sort engine with a fixed-size pool
#[derive(Debug)]
pub struct Sorter {
    pool: ForkJoinPool,
    threshold: usize,
}

impl Sorter {
    pub fn new(workers: usize) -> Result<Self, SortError> {
        Ok(Self {
            pool: ForkJoinPool::new(workers)?,
            threshold: DEFAULT_THRESHOLD,
        })
    }

    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_stage_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.pool = self.pool.with_stage_timeout(timeout);
        self
    }

    pub fn workers(&self) -> usize {
        self.pool.workers()
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// Sort `input` with `algorithm`, timing only the algorithm itself
    pub fn sort<T>(&self, algorithm: Algorithm, input: Vec<T>) -> Result<SortResult<T>, SortError>
    where
        T: Ord + Clone + Send + 'static,
    {
        let (sorted, elapsed) = timed(|| match algorithm {
            Algorithm::MergeSort => Ok(merge_sort(&input)),
            Algorithm::QuickSort => {
                let mut input = input;
                quicksort(&mut input);
                Ok(input)
            }
            Algorithm::ParallelMergeSort => parallel_merge_sort(input, &self.pool, self.threshold),
            Algorithm::ParallelQuickSort => parallel_quicksort(input, &self.pool, self.threshold),
        });

        Ok(SortResult {
            sorted: sorted?,
            elapsed,
            workers: if algorithm.is_parallel() {
                self.pool.workers()
            } else {
                1
            },
        })
    }

    /// Sort integers while recording where every output element came from
    pub fn sort_tracked(
        &self,
        algorithm: Algorithm,
        values: &[i64],
    ) -> Result<SortResult<Tracked>, SortError> {
        self.sort(algorithm, track(values))
    }
}

/// One-shot sort: build a pool for `job.workers` threads and run the job
pub fn sort<T>(job: SortJob<T>) -> Result<SortResult<T>, SortError>
where
    T: Ord + Clone + Send + 'static,
{
    let sorter = Sorter::new(job.workers)?
        .with_threshold(job.threshold)
        .with_stage_timeout(job.stage_timeout);
    sorter.sort(job.algorithm, job.input)
}
