//! Wall-Clock Timing
//!
//! Monotonic timing around a single sort invocation. Input preparation
//! (tracking, copying) happens before the timer starts and result unpacking
//! after it stops.

use std::time::{Duration, Instant};

/// Timer for a single invocation
#[derive(Debug, Clone, Copy)]
pub struct Timer {
    start: Instant,
}

impl Timer {
    /// Start a new timer
    #[inline(always)]
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Time elapsed so far
    #[inline(always)]
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Stop the timer and return the elapsed duration
    #[inline(always)]
    pub fn stop(self) -> Duration {
        self.start.elapsed()
    }
}

/// Run `f` and return its output with the wall-clock time it took
#[inline]
pub fn timed<R>(f: impl FnOnce() -> R) -> (R, Duration) {
    let timer = Timer::start();
    let out = f();
    (out, timer.stop())
}
