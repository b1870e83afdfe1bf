//! End-to-end tests: load a dataset, slice it, and compute the dashboard views.

use chrono::NaiveDate;
use funnel_core::{
    Brand, Campaign, FilterSet, FunnelStage, RawTouchpoint, Region, Specialty, TouchpointTable,
};
use funnel_metrics::{
    aggregate, build_report, funnel_table, summarize, Dimension, DimensionValue, ReportOptions,
};
use integration_tests::fixtures::{
    export_payload, funnel_rows, reference_funnel, uniform_year_rows,
};
use integration_tests::setup::TestContext;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-3
}

#[test]
fn test_reference_funnel_kpis() {
    let ctx = TestContext::from_rows(reference_funnel());

    let kpis = summarize(&ctx.table);
    assert_eq!(kpis.records, 500);
    assert_eq!(kpis.target_count, 500);
    assert_eq!(kpis.reach_count, 498);
    assert_eq!(kpis.open_count, 487);
    assert_eq!(kpis.click_count, 299);
    assert!(approx(kpis.reach_rate, 0.996));
    assert!(approx(kpis.open_rate, 0.9779));
    assert!(approx(kpis.click_to_open_rate, 0.6140));
}

#[test]
fn test_reference_funnel_stage_table() {
    let ctx = TestContext::from_rows(reference_funnel());
    let stages = funnel_table(&summarize(&ctx.table));

    assert_eq!(stages.len(), 4);
    assert_eq!(stages[0].stage, FunnelStage::Target);
    assert_eq!(stages[0].rate_vs_previous, Some(1.0));
    assert_eq!(stages[3].stage, FunnelStage::Click);
    assert_eq!(stages[3].count, 299);
    assert!(approx(stages[3].rate_vs_previous.unwrap_or_default(), 299.0 / 487.0));
}

#[test]
fn test_stage_after_empty_stage_has_no_rate() {
    // Nobody opened, so click has no previous-stage base.
    let ctx = TestContext::from_rows(funnel_rows(20, 8, 0, 0));
    let stages = funnel_table(&summarize(&ctx.table));

    assert_eq!(stages[0].rate_vs_previous, Some(1.0));
    assert!(approx(stages[1].rate_vs_previous.unwrap_or_default(), 0.4));
    assert_eq!(stages[2].rate_vs_previous, Some(0.0));
    assert_eq!(stages[3].stage, FunnelStage::Click);
    assert_eq!(stages[3].rate_vs_previous, None);

    let kpis = summarize(&ctx.table);
    assert_eq!(kpis.click_to_open_rate, 0.0);
}

#[test]
fn test_quarter_grouping_of_uniform_year() {
    let ctx = TestContext::from_rows(uniform_year_rows(4800));
    let groups = aggregate(&ctx.table, &["quarter"]).unwrap();

    assert_eq!(groups.len(), 4);
    for (i, group) in groups.iter().enumerate() {
        assert_eq!(
            group.key.get(Dimension::Quarter),
            Some(&DimensionValue::Quarter(i as u8 + 1))
        );
        assert!(
            (1150..=1250).contains(&group.metrics.records),
            "quarter {} has {} rows",
            i + 1,
            group.metrics.records
        );
    }
    let total: u64 = groups.iter().map(|g| g.metrics.records).sum();
    assert_eq!(total, 4800);
}

#[test]
fn test_brand_groups_sum_to_total() {
    let ctx = TestContext::synthetic();
    let total = summarize(&ctx.table);
    let groups = aggregate(&ctx.table, &["brand_name"]).unwrap();

    assert_eq!(groups.len(), 2);
    let open: u64 = groups.iter().map(|g| g.metrics.open_count).sum();
    let click: u64 = groups.iter().map(|g| g.metrics.click_count).sum();
    let records: u64 = groups.iter().map(|g| g.metrics.records).sum();
    assert_eq!(open, total.open_count);
    assert_eq!(click, total.click_count);
    assert_eq!(records, total.records);
}

#[test]
fn test_aggregate_is_idempotent() {
    let ctx = TestContext::synthetic();
    let first = aggregate(&ctx.table, &["brand", "quarter"]).unwrap();
    let second = aggregate(&ctx.table, &["brand", "quarter"]).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_filter_then_aggregate() {
    let ctx = TestContext::synthetic();
    let filters = FilterSet::new()
        .with_brand(Brand::B)
        .with_region(Region::North)
        .between(
            NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
        );

    let selected = ctx.table.filter(&filters);
    assert!(!selected.is_empty());
    for record in &selected {
        assert_eq!(record.brand, Brand::B);
        assert_eq!(record.region, Region::North);
        assert_eq!(record.quarter(), 2);
    }

    let groups = aggregate(selected.iter().copied(), &["quarter"]).unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].metrics.records, selected.len() as u64);
}

#[test]
fn test_filter_by_specialty_and_campaign() {
    let ctx = TestContext::from_rows(uniform_year_rows(4800));

    // Specialties cycle with period 6, so each one holds 800 rows.
    let oncology = FilterSet::new().with_specialty(Specialty::Oncologist);
    let selected = ctx.table.filter(&oncology);
    assert_eq!(selected.len(), 800);
    assert!(selected.iter().all(|r| r.specialty == Specialty::Oncologist));

    let groups = aggregate(selected.iter().copied(), &["hcp_specialty"]).unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].metrics.records, 800);

    // Campaigns cycle with period 4 and specialties with 6: the pair
    // (Engagement, Oncologist) recurs every 12 rows.
    let both = oncology.with_campaign(Campaign::Engagement);
    assert_eq!(summarize(ctx.table.filter(&both)).records, 400);

    let none = FilterSet::new().with_specialties(Vec::<Specialty>::new());
    assert!(ctx.table.filter(&none).is_empty());
}

#[test]
fn test_empty_selection_yields_zero_rates() {
    let ctx = TestContext::synthetic();
    let filters = FilterSet::new().with_brands(Vec::<Brand>::new());

    let selected = ctx.table.filter(&filters);
    assert!(selected.is_empty());

    let groups = aggregate(selected.iter().copied(), &[] as &[&str]).unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].metrics.records, 0);
    assert_eq!(groups[0].metrics.reach_rate, 0.0);
    assert_eq!(groups[0].metrics.click_to_open_rate, 0.0);
}

#[test]
fn test_report_over_synthetic_data() {
    let ctx = TestContext::synthetic();
    let report = build_report(&ctx.table, &FilterSet::new(), &ReportOptions::default());

    assert_eq!(report.kpis.records, 6000);
    assert!(report.hcps <= 500);
    assert_eq!(report.funnel.len(), 4);
    assert_eq!(report.monthly_trend.len(), 12);
    assert_eq!(report.breakdown(Dimension::Quarter).map(|b| b.groups.len()), Some(4));
    assert_eq!(report.breakdown(Dimension::Specialty).map(|b| b.groups.len()), Some(6));
    assert!(!report.insights.is_empty());

    let json = serde_json::to_value(&report).unwrap();
    assert!(json["kpis"]["click_to_open_rate"].is_number());
    assert!(json["breakdowns"].is_array());
}

#[test]
fn test_export_headers_load() {
    let rows = RawTouchpoint::parse_dataset(export_payload().as_bytes()).unwrap();
    let table = TouchpointTable::load(rows).unwrap();

    assert_eq!(table.len(), 2);
    assert_eq!(table.records()[1].region, Region::West);
    assert_eq!(table.records()[1].quarter(), 4);
    assert_eq!(summarize(&table).click_count, 1);
}
