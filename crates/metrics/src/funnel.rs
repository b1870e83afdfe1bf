//! Funnel counts and rates.
//!
//! Every rate divides a stage count by the previous stage's count and is
//! defined as 0 when that count is 0.

use std::ops::AddAssign;

use funnel_core::{FunnelStage, Touchpoint};
use serde::{Deserialize, Serialize};

/// Raw stage counts over a set of records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunnelCounts {
    /// Records in scope
    pub records: u64,
    pub target: u64,
    pub reach: u64,
    pub open: u64,
    pub click: u64,
}

impl FunnelCounts {
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a Touchpoint>,
    {
        let mut counts = Self::default();
        for record in records {
            counts.record(record);
        }
        counts
    }

    /// Adds one record.
    pub fn record(&mut self, record: &Touchpoint) {
        let f = &record.funnel;
        self.records += 1;
        self.target += u64::from(f.target);
        self.reach += u64::from(f.reach);
        self.open += u64::from(f.open);
        self.click += u64::from(f.click);
    }

    pub fn stage(&self, stage: FunnelStage) -> u64 {
        match stage {
            FunnelStage::Target => self.target,
            FunnelStage::Reach => self.reach,
            FunnelStage::Open => self.open,
            FunnelStage::Click => self.click,
        }
    }
}

impl AddAssign for FunnelCounts {
    fn add_assign(&mut self, other: Self) {
        self.records += other.records;
        self.target += other.target;
        self.reach += other.reach;
        self.open += other.open;
        self.click += other.click;
    }
}

impl std::iter::Sum for FunnelCounts {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), |mut acc, c| {
            acc += c;
            acc
        })
    }
}

/// Ratio with the zero-denominator convention.
pub fn ratio(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Stage-to-stage conversion rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rate {
    /// reach / target
    ReachRate,
    /// open / reach
    OpenRate,
    /// click / open (CTOR)
    ClickToOpenRate,
}

impl Rate {
    pub const ALL: [Rate; 3] = [Rate::ReachRate, Rate::OpenRate, Rate::ClickToOpenRate];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ReachRate => "reach_rate",
            Self::OpenRate => "open_rate",
            Self::ClickToOpenRate => "click_to_open_rate",
        }
    }

    /// Count the rate is taken over.
    pub fn base(&self, metrics: &FunnelMetrics) -> u64 {
        match self {
            Self::ReachRate => metrics.target_count,
            Self::OpenRate => metrics.reach_count,
            Self::ClickToOpenRate => metrics.open_count,
        }
    }

    pub fn of(&self, metrics: &FunnelMetrics) -> f64 {
        match self {
            Self::ReachRate => metrics.reach_rate,
            Self::OpenRate => metrics.open_rate,
            Self::ClickToOpenRate => metrics.click_to_open_rate,
        }
    }
}

impl std::fmt::Display for Rate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Counts and rates for one scope (the KPI tuple).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FunnelMetrics {
    pub records: u64,
    pub target_count: u64,
    pub reach_count: u64,
    pub open_count: u64,
    pub click_count: u64,
    pub reach_rate: f64,
    pub open_rate: f64,
    pub click_to_open_rate: f64,
}

impl FunnelMetrics {
    pub fn from_counts(c: FunnelCounts) -> Self {
        Self {
            records: c.records,
            target_count: c.target,
            reach_count: c.reach,
            open_count: c.open,
            click_count: c.click,
            reach_rate: ratio(c.reach, c.target),
            open_rate: ratio(c.open, c.reach),
            click_to_open_rate: ratio(c.click, c.open),
        }
    }

    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a Touchpoint>,
    {
        Self::from_counts(FunnelCounts::from_records(records))
    }

    pub fn counts(&self) -> FunnelCounts {
        FunnelCounts {
            records: self.records,
            target: self.target_count,
            reach: self.reach_count,
            open: self.open_count,
            click: self.click_count,
        }
    }

    pub fn rate(&self, rate: Rate) -> f64 {
        rate.of(self)
    }
}

/// One row of the funnel detail table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FunnelStageRow {
    pub stage: FunnelStage,
    pub count: u64,
    /// Count over the previous stage's count. 1.0 for the first stage,
    /// `None` when the previous stage is empty.
    pub rate_vs_previous: Option<f64>,
}

/// The four funnel stages with their conversion from the previous stage.
pub fn funnel_table(metrics: &FunnelMetrics) -> Vec<FunnelStageRow> {
    let counts = metrics.counts();
    FunnelStage::ALL
        .into_iter()
        .map(|stage| {
            let count = counts.stage(stage);
            let rate_vs_previous = match stage.previous() {
                None => Some(1.0),
                Some(prev) => {
                    let base = counts.stage(prev);
                    (base > 0).then(|| count as f64 / base as f64)
                }
            };
            FunnelStageRow {
                stage,
                count,
                rate_vs_previous,
            }
        })
        .collect()
}
