//! Dashboard report: every view of the campaign dashboard computed over one slicer selection.

use funnel_core::{count_distinct_hcps, FilterSet, SlicerOptions, Touchpoint, TouchpointTable};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::aggregate::{aggregate_by, summarize, GroupMetrics};
use crate::dimension::Dimension;
use crate::funnel::{funnel_table, FunnelMetrics, FunnelStageRow, Rate};
use crate::insight::{quarter_uplift, top_segment, Insight, DEFAULT_UPLIFT_THRESHOLD};
use crate::trend::{monthly_trend, TrendPoint};

/// Dimensions the dashboard breaks the funnel down by.
pub const BREAKDOWN_DIMENSIONS: [Dimension; 5] = [
    Dimension::Brand,
    Dimension::Campaign,
    Dimension::Region,
    Dimension::Specialty,
    Dimension::Quarter,
];

/// Insight settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportOptions {
    /// Relative uplift a quarter needs over its peers to be flagged
    #[serde(default = "default_uplift_threshold")]
    pub uplift_threshold: f64,
    /// Rate used to rank segments
    #[serde(default = "default_segment_rate")]
    pub segment_rate: Rate,
}

fn default_uplift_threshold() -> f64 {
    DEFAULT_UPLIFT_THRESHOLD
}

fn default_segment_rate() -> Rate {
    Rate::ClickToOpenRate
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            uplift_threshold: default_uplift_threshold(),
            segment_rate: default_segment_rate(),
        }
    }
}

/// Funnel metrics grouped by one dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Breakdown {
    pub dimension: Dimension,
    pub groups: Vec<GroupMetrics>,
}

/// All dashboard views for one selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardReport {
    /// Active slicer selection
    pub filters: FilterSet,
    /// Values each slicer offers over the whole table
    pub slicer_options: SlicerOptions,
    /// Distinct HCPs in the selection
    pub hcps: usize,
    pub kpis: FunnelMetrics,
    pub funnel: Vec<FunnelStageRow>,
    pub breakdowns: Vec<Breakdown>,
    pub monthly_trend: Vec<TrendPoint>,
    pub insights: Vec<Insight>,
}

impl DashboardReport {
    /// Breakdown for `dimension`, if the report has one.
    pub fn breakdown(&self, dimension: Dimension) -> Option<&Breakdown> {
        self.breakdowns.iter().find(|b| b.dimension == dimension)
    }
}

/// Compute the dashboard over the records of `table` selected by `filters`.
pub fn build_report(
    table: &TouchpointTable,
    filters: &FilterSet,
    options: &ReportOptions,
) -> DashboardReport {
    let selected: Vec<&Touchpoint> = table.filter(filters);
    let records = || selected.iter().copied();

    let kpis = summarize(records());

    let breakdowns = BREAKDOWN_DIMENSIONS
        .iter()
        .map(|&dimension| Breakdown {
            dimension,
            groups: aggregate_by(records(), &[dimension]),
        })
        .collect();

    let mut insights: Vec<Insight> = Rate::ALL
        .iter()
        .flat_map(|&rate| quarter_uplift(records(), rate, options.uplift_threshold))
        .collect();
    insights.extend(
        BREAKDOWN_DIMENSIONS
            .iter()
            .filter(|d| **d != Dimension::Quarter)
            .filter_map(|&d| top_segment(records(), d, options.segment_rate)),
    );

    info!(
        selected = selected.len(),
        total = table.len(),
        insights = insights.len(),
        "Built dashboard report"
    );

    DashboardReport {
        filters: filters.clone(),
        slicer_options: table.slicer_options(),
        hcps: count_distinct_hcps(records()),
        kpis,
        funnel: funnel_table(&kpis),
        breakdowns,
        monthly_trend: monthly_trend(records()),
        insights,
    }
}
