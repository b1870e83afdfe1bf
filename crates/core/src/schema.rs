//! Schema validation for touchpoint rows.

use chrono::NaiveDate;
use validator::Validate;

use crate::error::{RowViolation, ValidationErrorCode};
use crate::limits::MAX_HCP_ID_LEN;
use crate::raw::{parse_flag, RawTouchpoint};
use crate::touchpoint::{Brand, Campaign, FunnelFlags, FunnelStage, Region, Specialty, Touchpoint};
use crate::window::ObservationWindow;

/// Parses a campaign date, taking the date part of a date-time.
pub fn parse_campaign_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    let date_part = match s.get(..10) {
        Some(head) if s.len() == 10 => head,
        Some(head) if s[10..].starts_with(['T', ' ']) => head,
        _ => return None,
    };
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

/// Validates one raw row.
///
/// Collects every violated rule rather than stopping at the first, so a
/// caller can report the row completely.
pub fn validate_row(
    row: usize,
    raw: &RawTouchpoint,
    window: &ObservationWindow,
) -> std::result::Result<Touchpoint, Vec<RowViolation>> {
    let id = Some(raw.hcp_id.trim());
    let mut violations = Vec::new();
    let mut violate = |code: ValidationErrorCode, msg: String| {
        violations.push(RowViolation::new(row, id, code, msg));
    };

    // Run validator derive validations
    if raw.validate().is_err() || raw.hcp_id.trim().is_empty() {
        violate(
            ValidationErrorCode::InvalidIdentifier,
            format!("hcp_id must be 1-{} characters", MAX_HCP_ID_LEN),
        );
    }

    let brand = Brand::parse(&raw.brand_name);
    if brand.is_none() {
        violate(
            ValidationErrorCode::UnknownCategory,
            format!("unknown brand_name '{}'", raw.brand_name),
        );
    }
    let campaign = Campaign::parse(&raw.campaign_name);
    if campaign.is_none() {
        violate(
            ValidationErrorCode::UnknownCategory,
            format!("unknown campaign_name '{}'", raw.campaign_name),
        );
    }
    let specialty = Specialty::parse(&raw.hcp_specialty);
    if specialty.is_none() {
        violate(
            ValidationErrorCode::UnknownCategory,
            format!("unknown hcp_specialty '{}'", raw.hcp_specialty),
        );
    }
    let region = Region::parse(&raw.hcp_region);
    if region.is_none() {
        violate(
            ValidationErrorCode::UnknownCategory,
            format!("unknown hcp_region '{}'", raw.hcp_region),
        );
    }

    let date = parse_campaign_date(&raw.campaign_date);
    match date {
        None => violate(
            ValidationErrorCode::InvalidDate,
            format!("campaign_date '{}' is not a date", raw.campaign_date),
        ),
        Some(d) if !window.contains(d) => violate(
            ValidationErrorCode::DateOutsideWindow,
            format!("campaign_date {} outside {}", d, window),
        ),
        Some(_) => {}
    }

    let mut flag = |stage: FunnelStage, value: &Option<serde_json::Value>| {
        let parsed = value.as_ref().and_then(parse_flag);
        if parsed.is_none() {
            let shown = value
                .as_ref()
                .map_or_else(|| "missing".to_string(), |v| v.to_string());
            violate(
                ValidationErrorCode::NonBooleanFlag,
                format!("{} flag is {}, expected 0 or 1", stage.as_str(), shown),
            );
        }
        parsed
    };
    let target = flag(FunnelStage::Target, &raw.target);
    let reach = flag(FunnelStage::Reach, &raw.reach);
    let open = flag(FunnelStage::Open, &raw.open);
    let click = flag(FunnelStage::Click, &raw.click);

    let funnel = match (target, reach, open, click) {
        (Some(t), Some(r), Some(o), Some(c)) => Some(FunnelFlags::new(t, r, o, c)),
        _ => None,
    };
    if let Some(stage) = funnel.and_then(|f| f.first_out_of_order()) {
        let prev = stage.previous().map_or("", |p| p.as_str());
        violate(
            ValidationErrorCode::FunnelOrder,
            format!("{}=1 requires {}=1", stage.as_str(), prev),
        );
    }

    match (brand, campaign, specialty, region, date, funnel) {
        (
            Some(brand),
            Some(campaign),
            Some(specialty),
            Some(region),
            Some(campaign_date),
            Some(funnel),
        ) if violations.is_empty() => {
            Ok(Touchpoint {
                hcp_id: raw.hcp_id.trim().to_string(),
                brand,
                campaign,
                campaign_date,
                specialty,
                region,
                funnel,
            })
        }
        _ => Err(violations),
    }
}

/// Validates every row, returning the records or all violations found.
pub fn validate_rows<'a, I>(
    rows: I,
    window: &ObservationWindow,
) -> std::result::Result<Vec<Touchpoint>, Vec<RowViolation>>
where
    I: IntoIterator<Item = &'a RawTouchpoint>,
{
    let mut records = Vec::new();
    let mut violations = Vec::new();

    for (i, raw) in rows.into_iter().enumerate() {
        match validate_row(i, raw, window) {
            Ok(record) => records.push(record),
            Err(errs) => violations.extend(errs),
        }
    }

    if violations.is_empty() {
        Ok(records)
    } else {
        Err(violations)
    }
}
