//! Aggregator
//!
//! Pure reduction of [`MetricsRecord`]s into per-group summaries. Groups are
//! keyed by algorithm, optionally split further by input size, and come out
//! in key order.
//!
//! An empty record set yields [`AggregateSummary::empty`]: no groups, never
//! an error. Callers should check [`AggregateSummary::is_empty`] before
//! reading group values.

use crate::metrics::MetricsRecord;
use crate::summary::{SummaryStatistics, compute_summary, mean};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use sortbench_core::Algorithm;
use std::collections::BTreeMap;

/// How records are grouped before reduction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GroupBy {
    #[default]
    Algorithm,
    AlgorithmAndSize,
}

/// Identity of a group; `input_size` is set only for [`GroupBy::AlgorithmAndSize`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GroupKey {
    pub algorithm: Algorithm,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_size: Option<usize>,
}

impl GroupKey {
    fn of(record: &MetricsRecord, group_by: GroupBy) -> Self {
        Self {
            algorithm: record.algorithm,
            input_size: match group_by {
                GroupBy::Algorithm => None,
                GroupBy::AlgorithmAndSize => Some(record.input_size),
            },
        }
    }
}

/// Reduced metrics of one group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupSummary {
    #[serde(flatten)]
    pub key: GroupKey,
    pub count: usize,
    /// Execution time in seconds
    pub execution_time: SummaryStatistics,
    /// Mean over records where memory was observed
    pub mean_memory_mb: Option<f64>,
    /// Percentage of records whose output verified as sorted
    pub success_rate: f64,
    pub mean_stability: f64,
    /// Present when any record in the group carries parallel fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mean_parallel_efficiency: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mean_cpu_utilization: Option<f64>,
}

/// Result of [`aggregate`]
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AggregateSummary {
    pub group_by: GroupBy,
    pub groups: Vec<GroupSummary>,
}

impl AggregateSummary {
    /// The summary of zero records
    pub fn empty(group_by: GroupBy) -> Self {
        Self {
            group_by,
            groups: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Look up a group; pass `input_size` only when grouped by size
    pub fn get(&self, algorithm: Algorithm, input_size: Option<usize>) -> Option<&GroupSummary> {
        let key = GroupKey {
            algorithm,
            input_size,
        };
        self.groups.iter().find(|g| g.key == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &GroupSummary> {
        self.groups.iter()
    }
}

/// Group and reduce `records`; never fails
pub fn aggregate(records: &[MetricsRecord], group_by: GroupBy) -> AggregateSummary {
    if records.is_empty() {
        return AggregateSummary::empty(group_by);
    }

    let mut grouped: BTreeMap<GroupKey, Vec<&MetricsRecord>> = BTreeMap::new();
    for record in records {
        grouped
            .entry(GroupKey::of(record, group_by))
            .or_default()
            .push(record);
    }

    let groups = grouped
        .into_iter()
        .collect::<Vec<_>>()
        .into_par_iter()
        .map(|(key, members)| summarize_group(key, &members))
        .collect();

    AggregateSummary { group_by, groups }
}

fn summarize_group(key: GroupKey, members: &[&MetricsRecord]) -> GroupSummary {
    let times: Vec<f64> = members.iter().map(|r| r.execution_time_secs).collect();
    let count = members.len() as f64;

    let sorted_count = members.iter().filter(|r| r.is_sorted).count() as f64;
    let parallel: Vec<_> = members.iter().filter_map(|r| r.parallel).collect();

    GroupSummary {
        key,
        count: members.len(),
        execution_time: compute_summary(&times),
        mean_memory_mb: mean(members.iter().filter_map(|r| r.memory_usage_mb)),
        success_rate: sorted_count / count * 100.0,
        mean_stability: members.iter().map(|r| r.stability_score).sum::<f64>() / count,
        mean_parallel_efficiency: mean(parallel.iter().map(|p| p.parallel_efficiency)),
        mean_cpu_utilization: mean(parallel.iter().filter_map(|p| p.cpu_utilization)),
    }
}
