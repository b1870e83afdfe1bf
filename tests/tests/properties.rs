//! Property tests over arbitrary monotone touchpoint sets.

use funnel_core::{Brand, Campaign, RawTouchpoint, Region, Specialty, TouchpointTable};
use funnel_metrics::{aggregate, summarize, GroupMetrics};
use integration_tests::fixtures::hcp;
use proptest::prelude::*;

/// A valid row; `depth` is how far down the funnel it got (0..=4).
fn row_strategy() -> impl Strategy<Value = RawTouchpoint> {
    (
        0usize..500,
        0usize..Brand::ALL.len(),
        0usize..Campaign::ALL.len(),
        0usize..Specialty::ALL.len(),
        0usize..Region::ALL.len(),
        1u32..=12,
        1u32..=28,
        0u8..=4,
    )
        .prop_map(|(h, b, c, s, r, month, day, depth)| {
            RawTouchpoint {
                hcp_id: hcp(h),
                brand_name: Brand::ALL[b].to_string(),
                campaign_name: Campaign::ALL[c].to_string(),
                campaign_date: format!("2024-{:02}-{:02}", month, day),
                hcp_specialty: Specialty::ALL[s].to_string(),
                hcp_region: Region::ALL[r].to_string(),
                ..Default::default()
            }
            .with_flags(depth >= 1, depth >= 2, depth >= 3, depth >= 4)
        })
}

proptest! {
    #[test]
    fn prop_counts_are_ordered(rows in prop::collection::vec(row_strategy(), 0..200)) {
        let table = TouchpointTable::load(rows).unwrap();
        let m = summarize(&table);
        prop_assert!(m.click_count <= m.open_count);
        prop_assert!(m.open_count <= m.reach_count);
        prop_assert!(m.reach_count <= m.target_count);
        prop_assert!(m.target_count <= m.records);
    }

    #[test]
    fn prop_rates_are_unit_interval(rows in prop::collection::vec(row_strategy(), 0..200)) {
        let table = TouchpointTable::load(rows).unwrap();
        for group in aggregate(&table, &["region", "quarter"]).unwrap() {
            let m = group.metrics;
            for rate in [m.reach_rate, m.open_rate, m.click_to_open_rate] {
                prop_assert!((0.0..=1.0).contains(&rate));
            }
        }
    }

    #[test]
    fn prop_groups_partition_total(rows in prop::collection::vec(row_strategy(), 1..200)) {
        let table = TouchpointTable::load(rows).unwrap();
        let total = summarize(&table);
        let groups = aggregate(&table, &["hcp_specialty"]).unwrap();

        let sum = |count: fn(&GroupMetrics) -> u64| groups.iter().map(count).sum::<u64>();
        prop_assert_eq!(sum(|g| g.metrics.records), total.records);
        prop_assert_eq!(sum(|g| g.metrics.target_count), total.target_count);
        prop_assert_eq!(sum(|g| g.metrics.click_count), total.click_count);
    }
}
