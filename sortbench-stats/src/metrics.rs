//! Metrics Calculator
//!
//! Turns one sort invocation into a [`MetricsRecord`]. Correctness is
//! re-verified from the output itself, stability is scored exactly from the
//! output permutation, and parallel variants additionally get an efficiency
//! estimate against an abstract `n log2 n` baseline.
//!
//! Host observations (memory, CPU) come from a [`ResourceProbe`]. A failed
//! observation leaves the field empty and is recorded in
//! [`MetricsRecord::resource_errors`]; it never fails the computation.

use crate::probe::{HostProbe, ResourceProbe};
use fxhash::FxHashMap;
use serde::{Deserialize, Serialize};
use sortbench_core::{Algorithm, SortResult, Tracked, is_sorted};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Internal inconsistency while deriving metrics
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetricsError {
    #[error("Sorted output has {sorted} elements but the original has {original}")]
    LengthMismatch { original: usize, sorted: usize },

    #[error("Reported input size {reported} does not match the original length {actual}")]
    SizeMismatch { reported: usize, actual: usize },

    #[error("Output permutation is invalid at position {position}: origin {origin}")]
    InvalidPermutation { position: usize, origin: usize },

    #[error("Output position {position} holds a value that differs from its origin {origin}")]
    ValueMismatch { position: usize, origin: usize },
}

/// Parallel-only fields of a record
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParallelMetrics {
    pub workers: usize,
    /// Host CPU utilisation in percent; `None` when the probe failed
    pub cpu_utilization: Option<f64>,
    /// Abstract baseline cost divided by measured seconds
    pub estimated_speedup: f64,
    /// `estimated_speedup / workers`, capped to [0, 1]
    pub parallel_efficiency: f64,
}

/// Metrics of a single successful sort invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsRecord {
    pub algorithm: Algorithm,
    pub input_size: usize,
    /// Zero-based trial index within its (algorithm, size) cell
    #[serde(default)]
    pub trial: usize,
    pub execution_time_secs: f64,
    /// Resident memory at computation time; `None` when the probe failed
    pub memory_usage_mb: Option<f64>,
    pub core_count: usize,
    pub is_sorted: bool,
    pub stability_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parallel: Option<ParallelMetrics>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resource_errors: Vec<String>,
}

impl MetricsRecord {
    pub fn with_trial(mut self, trial: usize) -> Self {
        self.trial = trial;
        self
    }

    /// A host observation was unavailable for this record
    pub fn is_degraded(&self) -> bool {
        !self.resource_errors.is_empty()
    }

    pub fn parallel_efficiency(&self) -> Option<f64> {
        self.parallel.map(|p| p.parallel_efficiency)
    }
}

/// Computes [`MetricsRecord`]s, observing the host through `P`
#[derive(Debug, Clone, Default)]
pub struct MetricsCalculator<P = HostProbe> {
    probe: P,
}

impl<P: ResourceProbe> MetricsCalculator<P> {
    pub fn new(probe: P) -> Self {
        Self { probe }
    }

    pub fn probe(&self) -> &P {
        &self.probe
    }

    /// Metrics for a tracked sort of `original`
    pub fn compute(
        &self,
        original: &[i64],
        result: &SortResult<Tracked>,
        algorithm: Algorithm,
    ) -> Result<MetricsRecord, MetricsError> {
        self.compute_metrics(
            original,
            &result.sorted,
            result.elapsed,
            algorithm,
            result.workers,
            original.len(),
        )
    }

    /// Metrics from the individual pieces of a sort invocation
    ///
    /// `sorted` must be a permutation of `original` (as tracked elements);
    /// anything else is a [`MetricsError`].
    pub fn compute_metrics(
        &self,
        original: &[i64],
        sorted: &[Tracked],
        elapsed: Duration,
        algorithm: Algorithm,
        workers: usize,
        input_size: usize,
    ) -> Result<MetricsRecord, MetricsError> {
        if input_size != original.len() {
            return Err(MetricsError::SizeMismatch {
                reported: input_size,
                actual: original.len(),
            });
        }
        verify_values(original, sorted)?;

        let permutation: Vec<usize> = sorted.iter().map(|t| t.origin).collect();
        let stability_score = stability_score(original, &permutation)?;
        let sorted_ok = is_sorted(sorted);

        let mut resource_errors = Vec::new();
        let memory_usage_mb = match self.probe.memory_usage_mb() {
            Ok(mb) => Some(mb),
            Err(e) => {
                warn!(algorithm = %algorithm, "memory query failed: {}", e);
                resource_errors.push(format!("memory: {}", e));
                None
            }
        };

        let parallel = if algorithm.is_parallel() {
            let cpu_utilization = match self.probe.cpu_utilization() {
                Ok(pct) => Some(pct),
                Err(e) => {
                    warn!(algorithm = %algorithm, "cpu query failed: {}", e);
                    resource_errors.push(format!("cpu: {}", e));
                    None
                }
            };
            Some(ParallelMetrics {
                workers,
                cpu_utilization,
                estimated_speedup: estimated_speedup(elapsed, input_size),
                parallel_efficiency: parallel_efficiency(elapsed, input_size, workers),
            })
        } else {
            None
        };

        debug!(
            algorithm = %algorithm,
            input_size,
            is_sorted = sorted_ok,
            stability_score,
            "metrics computed"
        );

        Ok(MetricsRecord {
            algorithm,
            input_size,
            trial: 0,
            execution_time_secs: elapsed.as_secs_f64(),
            memory_usage_mb,
            core_count: self.probe.core_count(),
            is_sorted: sorted_ok,
            stability_score,
            parallel,
            resource_errors,
        })
    }
}

/// Every output element must carry the value of the original slot it came from
fn verify_values(original: &[i64], sorted: &[Tracked]) -> Result<(), MetricsError> {
    if sorted.len() != original.len() {
        return Err(MetricsError::LengthMismatch {
            original: original.len(),
            sorted: sorted.len(),
        });
    }
    for (position, t) in sorted.iter().enumerate() {
        match original.get(t.origin) {
            Some(&v) if v == t.value => {}
            Some(_) => {
                return Err(MetricsError::ValueMismatch {
                    position,
                    origin: t.origin,
                });
            }
            None => {
                return Err(MetricsError::InvalidPermutation {
                    position,
                    origin: t.origin,
                });
            }
        }
    }
    Ok(())
}

/// Exact stability score of a sort
///
/// `permutation[k]` is the original index of the element at output position
/// `k`. For every value occurring more than once, each pair of consecutive
/// occurrences in `original` counts once; it is preserved when the earlier
/// occurrence still precedes the later one in the output.
///
/// Returns 1.0 when no value repeats (there is nothing to violate). An error
/// means the permutation itself is inconsistent, never "zero pairs".
pub fn stability_score(original: &[i64], permutation: &[usize]) -> Result<f64, MetricsError> {
    if permutation.len() != original.len() {
        return Err(MetricsError::LengthMismatch {
            original: original.len(),
            sorted: permutation.len(),
        });
    }

    // output position of each original index
    let mut position = vec![usize::MAX; original.len()];
    for (k, &origin) in permutation.iter().enumerate() {
        match position.get_mut(origin) {
            Some(slot) if *slot == usize::MAX => *slot = k,
            _ => {
                return Err(MetricsError::InvalidPermutation {
                    position: k,
                    origin,
                });
            }
        }
    }

    let mut last_seen: FxHashMap<i64, usize> = FxHashMap::default();
    let mut pairs = 0usize;
    let mut preserved = 0usize;
    for (i, &value) in original.iter().enumerate() {
        if let Some(prev) = last_seen.insert(value, i) {
            pairs += 1;
            if position[prev] < position[i] {
                preserved += 1;
            }
        }
    }

    if pairs == 0 {
        Ok(1.0)
    } else {
        Ok(preserved as f64 / pairs as f64)
    }
}

/// Abstract sequential cost in time units: `n * log2(n) / 1e6`
pub fn baseline_cost(input_size: usize) -> f64 {
    if input_size < 2 {
        return 0.0;
    }
    let n = input_size as f64;
    n * n.log2() / 1e6
}

/// Baseline cost over measured seconds (elapsed is floored at 1ns)
pub fn estimated_speedup(elapsed: Duration, input_size: usize) -> f64 {
    let secs = elapsed.as_secs_f64().max(1e-9);
    baseline_cost(input_size) / secs
}

/// Estimated speedup per worker, capped to [0, 1]
pub fn parallel_efficiency(elapsed: Duration, input_size: usize, workers: usize) -> f64 {
    let workers = workers.max(1) as f64;
    (estimated_speedup(elapsed, input_size) / workers).clamp(0.0, 1.0)
}
