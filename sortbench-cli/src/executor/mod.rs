//! Benchmark Executor
//!
//! Runs every (size, algorithm, trial) cell and turns the outcome into a
//! report.
//!
//! ## Pipeline Overview
//!
//! ```text
//! RunConfig
//!       │
//!       ▼
//! ┌─────────────┐
//! │   dataset   │  Seeded inputs, one per size
//! └──────┬──────┘
//!        │
//!        ▼
//! ┌─────────────┐
//! │  execution  │  Sort each cell, compute metrics, collect failures
//! └──────┬──────┘
//!        │
//!        ▼
//! ┌─────────────┐
//! │   report    │  Aggregate, speedups, metadata
//! └──────┬──────┘
//!        │
//!        ▼
//! ┌─────────────┐
//! │ formatting  │  Human-readable output
//! └─────────────┘
//! ```

mod execution;
mod formatting;
mod metadata;
mod report;

pub use execution::{Driver, RunConfig, RunOutcome};
pub use formatting::{format_algorithm_list, format_human_output};
pub use metadata::build_report_meta;
pub use report::build_report;
