//! Grouped funnel aggregation.

use funnel_core::{Result, Touchpoint};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dimension::{parse_group_by, Dimension, GroupKey};
use crate::funnel::{FunnelCounts, FunnelMetrics};

/// Metrics of one partition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupMetrics {
    pub key: GroupKey,
    #[serde(flatten)]
    pub metrics: FunnelMetrics,
}

/// Aggregate records grouped by named fields.
///
/// An empty `group_by` yields exactly one tuple over all records. Otherwise
/// one tuple per distinct key, ordered by the key's first appearance in
/// `records`. Unknown fields fail with `Error::InvalidGrouping` before any
/// record is read.
pub fn aggregate<'a, I, S>(records: I, group_by: &[S]) -> Result<Vec<GroupMetrics>>
where
    I: IntoIterator<Item = &'a Touchpoint>,
    S: AsRef<str>,
{
    let dims = parse_group_by(group_by)?;
    Ok(aggregate_by(records, &dims))
}

/// Aggregate records grouped by already-resolved dimensions.
pub fn aggregate_by<'a, I>(records: I, dims: &[Dimension]) -> Vec<GroupMetrics>
where
    I: IntoIterator<Item = &'a Touchpoint>,
{
    let mut groups: IndexMap<GroupKey, FunnelCounts> = IndexMap::new();
    if dims.is_empty() {
        groups.insert(GroupKey::default(), FunnelCounts::default());
    }

    for record in records {
        groups
            .entry(GroupKey::of(record, dims))
            .or_default()
            .record(record);
    }

    debug!(dimensions = dims.len(), groups = groups.len(), "Aggregated funnel");

    groups
        .into_iter()
        .map(|(key, counts)| GroupMetrics {
            key,
            metrics: FunnelMetrics::from_counts(counts),
        })
        .collect()
}

/// Ungrouped metrics over all records.
pub fn summarize<'a, I>(records: I) -> FunnelMetrics
where
    I: IntoIterator<Item = &'a Touchpoint>,
{
    FunnelMetrics::from_records(records)
}
