//! Fork-Join Worker Pool
//!
//! Bounded Rayon pool driving synchronous fork-join stages:
//!
//! ```text
//! caller ──run_stage──► pool.spawn ──► units.into_par_iter() ──┐
//!   │                                                          │ (index, Result)
//!   └──── recv_timeout(remaining stage deadline) ◄── channel ◄─┘   per unit
//! ```
//!
//! - Every unit reports as soon as it finishes. A stage returns once all
//!   units succeeded, on the first real failure, or when the deadline expires.
//! - Panics inside units are caught and reported as `WorkerFailure`.
//! - The first failure flips the per-sort [`CancelToken`], so units that have
//!   not started yet return immediately instead of doing wasted work.
//! - A stage that returns early leaves its running units behind. Those keep
//!   their threads until they finish, so the pool swaps in fresh threads
//!   before the next stage is dispatched.

use crate::error::{SortError, Stage};
use crate::measure::Timer;
use rayon::ThreadPool;
use rayon::ThreadPoolBuilder;
use rayon::prelude::*;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::{debug, warn};

/// Number of cores available to this process (at least 1)
pub fn available_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Shared cancellation flag for one sort invocation
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// `Err(Cancelled)` once any sibling has failed
    pub fn check(&self) -> Result<(), SortError> {
        if self.is_cancelled() {
            Err(SortError::Cancelled)
        } else {
            Ok(())
        }
    }
}

/// Fixed-size worker pool with a per-stage deadline
pub struct ForkJoinPool {
    threads: Mutex<ThreadPool>,
    workers: usize,
    stage_timeout: Option<Duration>,
}

impl ForkJoinPool {
    /// Build a pool with exactly `workers` threads (0 is treated as 1)
    pub fn new(workers: usize) -> Result<Self, SortError> {
        let workers = workers.max(1);
        Ok(Self {
            threads: Mutex::new(build_threads(workers)?),
            workers,
            stage_timeout: None,
        })
    }

    /// Fail any stage that runs longer than `timeout` (None waits forever)
    pub fn with_stage_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.stage_timeout = timeout;
        self
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn stage_timeout(&self) -> Option<Duration> {
        self.stage_timeout
    }

    /// Run one fork-join stage: apply `f` to every unit in parallel and block
    /// until all results exist or the stage fails.
    ///
    /// Results keep the order of `units`. Must be called from outside this
    /// pool; nested parallelism inside `f` should use `rayon::join`, which
    /// stays on the pool's threads.
    pub fn run_stage<I, O, F>(
        &self,
        stage: Stage,
        units: Vec<I>,
        cancel: &CancelToken,
        f: F,
    ) -> Result<Vec<O>, SortError>
    where
        I: Send + 'static,
        O: Send + 'static,
        F: Fn(I) -> Result<O, SortError> + Send + Sync + 'static,
    {
        cancel.check()?;
        let total = units.len();
        debug!(%stage, units = total, "dispatching stage");

        let timer = Timer::start();
        let (tx, rx) = mpsc::channel();
        let token = cancel.clone();
        self.threads().spawn(move || {
            units
                .into_par_iter()
                .enumerate()
                .for_each_with(tx, |tx, (index, unit)| {
                    let _ = tx.send((index, run_unit(stage, &token, &f, unit)));
                });
        });

        let mut slots: Vec<Option<O>> = std::iter::repeat_with(|| None).take(total).collect();
        let mut received = 0;
        let mut cancelled = false;

        while received < total {
            let next = match self.stage_timeout {
                Some(timeout) => match rx.recv_timeout(timeout.saturating_sub(timer.elapsed())) {
                    Err(RecvTimeoutError::Timeout) => {
                        cancel.cancel();
                        warn!(%stage, ?timeout, "stage exceeded its deadline");
                        self.abandon(stage);
                        return Err(SortError::Timeout { stage, timeout });
                    }
                    other => other,
                },
                None => rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
            };

            match next {
                Ok((index, Ok(out))) => slots[index] = Some(out),
                // the root failure is still on its way
                Ok((_, Err(e))) if e.is_cancellation() => cancelled = true,
                Ok((_, Err(e))) => {
                    if received + 1 < total {
                        debug!(%stage, pending = total - received - 1, "failing stage early");
                        self.abandon(stage);
                    }
                    return Err(e);
                }
                Err(_) => return Err(lost_stage(stage)),
            }
            received += 1;
        }

        if cancelled {
            return Err(SortError::Cancelled);
        }
        Ok(slots.into_iter().flatten().collect())
    }

    fn threads(&self) -> MutexGuard<'_, ThreadPool> {
        self.threads.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace the worker threads after a stage returned with units still
    /// running. The old threads exit once that work drains.
    fn abandon(&self, stage: Stage) {
        match build_threads(self.workers) {
            Ok(fresh) => {
                *self.threads() = fresh;
                debug!(%stage, workers = self.workers, "replaced worker threads");
            }
            Err(e) => warn!(%stage, error = %e, "could not replace worker threads"),
        }
    }
}

impl std::fmt::Debug for ForkJoinPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ForkJoinPool")
            .field("workers", &self.workers)
            .field("stage_timeout", &self.stage_timeout)
            .finish()
    }
}

fn build_threads(workers: usize) -> Result<ThreadPool, SortError> {
    ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("sortbench-worker-{}", i))
        .build()
        .map_err(|e| SortError::PoolBuild(e.to_string()))
}

/// Execute one unit with panic capture; any failure cancels its siblings
fn run_unit<I, O, F>(stage: Stage, cancel: &CancelToken, f: &F, unit: I) -> Result<O, SortError>
where
    F: Fn(I) -> Result<O, SortError>,
{
    cancel.check()?;

    match panic::catch_unwind(AssertUnwindSafe(|| f(unit))) {
        Ok(Ok(out)) => Ok(out),
        Ok(Err(e)) => {
            cancel.cancel();
            Err(e)
        }
        Err(payload) => {
            cancel.cancel();
            let message = if let Some(s) = payload.downcast_ref::<&str>() {
                s.to_string()
            } else if let Some(s) = payload.downcast_ref::<String>() {
                s.clone()
            } else {
                "Unknown panic".to_string()
            };
            warn!(%stage, %message, "worker unit panicked");
            Err(SortError::WorkerFailure { stage, message })
        }
    }
}

fn lost_stage(stage: Stage) -> SortError {
    SortError::WorkerFailure {
        stage,
        message: "stage terminated without reporting results".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_preserves_unit_order() {
        let pool = ForkJoinPool::new(3).unwrap();
        let cancel = CancelToken::new();
        let out = pool
            .run_stage(Stage::ChunkSort, (0..10).collect(), &cancel, |x: i32| Ok(x * 2))
            .unwrap();
        assert_eq!(out, (0..10).map(|x| x * 2).collect::<Vec<_>>());
    }

    #[test]
    fn test_zero_workers_clamped() {
        let pool = ForkJoinPool::new(0).unwrap();
        assert_eq!(pool.workers(), 1);
    }

    #[test]
    fn test_panic_becomes_worker_failure() {
        let pool = ForkJoinPool::new(2).unwrap();
        let cancel = CancelToken::new();
        let result = pool.run_stage(Stage::MergeRound(1), vec![1, 2, 3, 4], &cancel, |x: i32| {
            if x == 3 {
                panic!("unit {} exploded", x);
            }
            Ok(x)
        });

        match result {
            Err(SortError::WorkerFailure { stage, message }) => {
                assert_eq!(stage, Stage::MergeRound(1));
                assert!(message.contains("exploded"));
            }
            other => panic!("expected WorkerFailure, got {:?}", other),
        }
        assert!(cancel.is_cancelled());
    }

    #[test]
    fn test_cancelled_token_skips_stage() {
        let pool = ForkJoinPool::new(2).unwrap();
        let cancel = CancelToken::new();
        cancel.cancel();
        let result = pool.run_stage(Stage::ChunkSort, vec![1], &cancel, |x: i32| Ok(x));
        assert!(matches!(result, Err(SortError::Cancelled)));
    }

    #[test]
    fn test_stage_deadline() {
        let pool = ForkJoinPool::new(1)
            .unwrap()
            .with_stage_timeout(Some(Duration::from_millis(50)));
        let cancel = CancelToken::new();
        let result = pool.run_stage(Stage::QuicksortSplit, vec![()], &cancel, |_| {
            std::thread::sleep(Duration::from_secs(2));
            Ok(())
        });

        assert!(matches!(
            result,
            Err(SortError::Timeout {
                stage: Stage::QuicksortSplit,
                ..
            })
        ));
        assert!(cancel.is_cancelled());

        // the sleeping unit must not hold up the next stage
        let fresh = CancelToken::new();
        let out = pool
            .run_stage(Stage::ChunkSort, vec![1, 2, 3], &fresh, |x: i32| Ok(x + 1))
            .unwrap();
        assert_eq!(out, vec![2, 3, 4]);
    }

    #[test]
    fn test_first_failure_returns_without_waiting() {
        let pool = ForkJoinPool::new(2).unwrap();
        let cancel = CancelToken::new();
        let timer = Timer::start();
        let result = pool.run_stage(Stage::ChunkSort, vec![0, 1], &cancel, |x: i32| {
            if x == 0 {
                panic!("boom");
            }
            std::thread::sleep(Duration::from_secs(2));
            Ok(x)
        });
        let elapsed = timer.stop();

        match result {
            Err(SortError::WorkerFailure { stage, message }) => {
                assert_eq!(stage, Stage::ChunkSort);
                assert_eq!(message, "boom");
            }
            other => panic!("expected WorkerFailure, got {:?}", other),
        }
        assert!(elapsed < Duration::from_secs(1), "waited {:?}", elapsed);

        let out = pool
            .run_stage(Stage::ChunkSort, vec![5], &CancelToken::new(), |x: i32| Ok(x))
            .unwrap();
        assert_eq!(out, vec![5]);
    }

    #[test]
    fn test_root_cause_wins_over_cancellation() {
        let pool = ForkJoinPool::new(1).unwrap();
        let cancel = CancelToken::new();
        let result = pool.run_stage(Stage::MergeRound(2), (0..8).collect(), &cancel, |x: i32| {
            if x == 0 {
                Err(SortError::WorkerFailure {
                    stage: Stage::MergeRound(2),
                    message: "bad run".to_string(),
                })
            } else {
                Ok(x)
            }
        });
        assert!(matches!(result, Err(SortError::WorkerFailure { .. })));

        let result = pool.run_stage(Stage::ChunkSort, vec![1, 2], &CancelToken::new(), |_: i32| {
            Err::<i32, _>(SortError::Cancelled)
        });
        assert!(matches!(result, Err(SortError::Cancelled)));
    }

    #[test]
    fn test_empty_stage() {
        let pool = ForkJoinPool::new(2).unwrap();
        let out = pool
            .run_stage(Stage::ChunkSort, Vec::<i32>::new(), &CancelToken::new(), |x: i32| Ok(x))
            .unwrap();
        assert!(out.is_empty());
    }
}
