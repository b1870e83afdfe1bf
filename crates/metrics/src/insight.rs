//! Computed insights.
//!
//! Insights are flags derived from the aggregates with explicit thresholds,
//! never free text. A quarter is flagged when its rate beats the mean of the
//! other observed quarters by more than the relative uplift threshold.

use funnel_core::Touchpoint;
use serde::{Deserialize, Serialize};

use crate::aggregate::{aggregate_by, GroupMetrics};
use crate::dimension::{Dimension, DimensionValue};
use crate::funnel::Rate;

/// Default relative uplift a quarter needs over its peers to be flagged (5%).
pub const DEFAULT_UPLIFT_THRESHOLD: f64 = 0.05;

/// A computed observation about the data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Insight {
    /// A quarter outperforming the other quarters on `rate`.
    QuarterUplift {
        quarter: u8,
        rate: Rate,
        value: f64,
        /// Mean rate of the other observed quarters
        baseline: f64,
        /// (value - baseline) / baseline
        uplift: f64,
    },
    /// The best group of a dimension on `rate`.
    TopSegment {
        dimension: Dimension,
        segment: DimensionValue,
        rate: Rate,
        value: f64,
        /// Records in the segment
        records: u64,
    },
}

/// Quarters whose `rate` exceeds the mean of the other quarters by more than `threshold`.
///
/// Quarters where the rate's base count is zero carry no signal and are
/// ignored, both as candidates and in baselines. At least two quarters with
/// data are needed for any flag.
pub fn quarter_uplift<'a, I>(records: I, rate: Rate, threshold: f64) -> Vec<Insight>
where
    I: IntoIterator<Item = &'a Touchpoint>,
{
    let mut quarters: Vec<(u8, f64)> = aggregate_by(records, &[Dimension::Quarter])
        .into_iter()
        .filter(|g| rate.base(&g.metrics) > 0)
        .filter_map(|g| match g.key.get(Dimension::Quarter) {
            Some(DimensionValue::Quarter(q)) => Some((*q, rate.of(&g.metrics))),
            _ => None,
        })
        .collect();
    quarters.sort_by_key(|(q, _)| *q);

    if quarters.len() < 2 {
        return Vec::new();
    }

    let total: f64 = quarters.iter().map(|(_, v)| v).sum();
    let peers = (quarters.len() - 1) as f64;

    quarters
        .iter()
        .filter_map(|&(quarter, value)| {
            let baseline = (total - value) / peers;
            if baseline <= 0.0 {
                return None;
            }
            let uplift = (value - baseline) / baseline;
            (uplift > threshold).then_some(Insight::QuarterUplift {
                quarter,
                rate,
                value,
                baseline,
                uplift,
            })
        })
        .collect()
}

/// Group of `dimension` with the highest `rate`. Ties keep the group that appears first.
pub fn top_segment<'a, I>(records: I, dimension: Dimension, rate: Rate) -> Option<Insight>
where
    I: IntoIterator<Item = &'a Touchpoint>,
{
    let best: Option<GroupMetrics> = aggregate_by(records, &[dimension])
        .into_iter()
        .filter(|g| rate.base(&g.metrics) > 0)
        .fold(None, |best, g| match best {
            Some(b) if rate.of(&b.metrics) >= rate.of(&g.metrics) => Some(b),
            _ => Some(g),
        });

    let best = best?;
    let segment = *best.key.get(dimension)?;
    Some(Insight::TopSegment {
        dimension,
        segment,
        rate,
        value: rate.of(&best.metrics),
        records: best.metrics.records,
    })
}
