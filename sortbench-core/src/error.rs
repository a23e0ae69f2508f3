//! Sort Engine Errors

use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Fork-join stage that produced a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Independent sequential sort of each contiguous chunk
    ChunkSort,
    /// Pairwise merge round (1-based)
    MergeRound(u32),
    /// Concurrent recursion on the less/greater partitions
    QuicksortSplit,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::ChunkSort => write!(f, "chunk-sort"),
            Stage::MergeRound(round) => write!(f, "merge round {}", round),
            Stage::QuicksortSplit => write!(f, "quicksort split"),
        }
    }
}

/// Errors raised by a single sort invocation.
///
/// Every variant is fatal to that invocation: no partially sorted output is
/// ever returned alongside an error.
#[derive(Debug, Clone, Error)]
pub enum SortError {
    #[error("Invalid input at index {index}: {reason}")]
    InvalidInput { index: usize, reason: String },

    #[error("Worker failure during {stage}: {message}")]
    WorkerFailure { stage: Stage, message: String },

    #[error("{stage} exceeded its deadline of {timeout:?}")]
    Timeout { stage: Stage, timeout: Duration },

    #[error("Sort cancelled after a sibling unit failed")]
    Cancelled,

    #[error("Failed to build worker pool: {0}")]
    PoolBuild(String),
}

impl SortError {
    /// Whether this error is a consequence of another failure rather than a root cause
    pub fn is_cancellation(&self) -> bool {
        matches!(self, SortError::Cancelled)
    }
}
