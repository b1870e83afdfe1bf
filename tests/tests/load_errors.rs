//! Load and grouping failures surface as typed errors.

use funnel_core::{Error, TouchpointTable, ValidationErrorCode};
use funnel_metrics::aggregate;
use integration_tests::fixtures::{raw_row, reference_funnel};
use integration_tests::setup::TestContext;
use serde_json::json;

#[test]
fn test_click_without_open_rejects_table() {
    let mut rows = reference_funnel();
    rows[10] = rows[10].clone().with_flags(true, true, false, true);

    let err = TouchpointTable::load(rows).unwrap_err();
    assert!(matches!(err, Error::Validation { .. }));
    assert_eq!(err.offending_rows(), vec![10]);
    assert_eq!(err.violations()[0].code, ValidationErrorCode::FunnelOrder);
    assert_eq!(err.violations()[0].hcp_id.as_deref(), Some("HCP01010"));
    assert_eq!(err.error_code(), Some("VALID_002"));
}

#[test]
fn test_non_boolean_flag_rejects_table() {
    let mut rows = vec![raw_row("HCP01000"), raw_row("HCP01001")];
    rows[1].reach = Some(json!(2));

    let err = TouchpointTable::load(rows).unwrap_err();
    assert_eq!(err.offending_rows(), vec![1]);
    assert_eq!(err.violations()[0].code, ValidationErrorCode::NonBooleanFlag);
}

#[test]
fn test_every_offending_row_reported() {
    let mut rows: Vec<_> = (0..8).map(|i| raw_row(&format!("HCP0{}", 1000 + i))).collect();
    rows[2].campaign_date = "2023-12-31".into();
    rows[5].hcp_region = "Central".into();
    rows[7].hcp_id = String::new();

    let err = TouchpointTable::load(rows).unwrap_err();
    assert_eq!(err.offending_rows(), vec![2, 5, 7]);

    let codes: Vec<_> = err.violations().iter().map(|v| v.code).collect();
    assert_eq!(
        codes,
        vec![
            ValidationErrorCode::DateOutsideWindow,
            ValidationErrorCode::UnknownCategory,
            ValidationErrorCode::InvalidIdentifier,
        ]
    );
}

#[test]
fn test_unknown_grouping_field() {
    let ctx = TestContext::from_rows(reference_funnel());

    let err = aggregate(&ctx.table, &["hcp_age"]).unwrap_err();
    assert!(matches!(err, Error::InvalidGrouping { ref field, .. } if field == "hcp_age"));
    assert_eq!(err.error_code(), Some("GROUP_001"));

    let err = aggregate(&ctx.table, &["click"]).unwrap_err();
    assert!(matches!(err, Error::InvalidGrouping { .. }));
}

#[test]
fn test_malformed_payload() {
    let err = funnel_core::RawTouchpoint::parse_dataset(b"{\"rows\": 3}").unwrap_err();
    assert!(matches!(err, Error::Source(_)));
    assert_eq!(err.error_code(), Some("SOURCE_001"));
}
