//! Monthly engagement trend.

use funnel_core::{Touchpoint, YearMonth};
use serde::{Deserialize, Serialize};

use crate::aggregate::aggregate_by;
use crate::dimension::{Dimension, DimensionValue};

/// Stage counts for one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub month: YearMonth,
    pub target: u64,
    pub reach: u64,
    pub open: u64,
    pub click: u64,
}

/// Stage counts per month present in `records`, oldest first.
pub fn monthly_trend<'a, I>(records: I) -> Vec<TrendPoint>
where
    I: IntoIterator<Item = &'a Touchpoint>,
{
    let mut points: Vec<TrendPoint> = aggregate_by(records, &[Dimension::Month])
        .into_iter()
        .filter_map(|group| match group.key.get(Dimension::Month) {
            Some(DimensionValue::Month(month)) => Some(TrendPoint {
                month: *month,
                target: group.metrics.target_count,
                reach: group.metrics.reach_count,
                open: group.metrics.open_count,
                click: group.metrics.click_count,
            }),
            _ => None,
        })
        .collect();
    points.sort_by_key(|p| p.month);
    points
}
