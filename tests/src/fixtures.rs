//! Test fixtures and row generators.

use chrono::{Duration, NaiveDate};
use funnel_core::{Brand, Campaign, RawTouchpoint, Region, Specialty};

/// Generate a valid raw row with only the target flag set.
pub fn raw_row(hcp_id: &str) -> RawTouchpoint {
    RawTouchpoint {
        hcp_id: hcp_id.to_string(),
        brand_name: "Brand A".into(),
        campaign_name: "Awareness".into(),
        campaign_date: "2024-06-15".into(),
        hcp_specialty: "Cardiologist".into(),
        hcp_region: "N".into(),
        ..Default::default()
    }
    .with_flags(true, false, false, false)
}

/// HCP id in the reference pool format.
pub fn hcp(i: usize) -> String {
    dataset::synthetic::hcp_id(i)
}

/// One targeted touchpoint per HCP: the first `reach` reached, the first
/// `open` opened, the first `click` clicked.
pub fn funnel_rows(target: usize, reach: usize, open: usize, click: usize) -> Vec<RawTouchpoint> {
    (0..target)
        .map(|i| raw_row(&hcp(i)).with_flags(true, i < reach, i < open, i < click))
        .collect()
}

/// The reference example: 500 HCPs, 498 reached, 487 opened, 299 clicked.
pub fn reference_funnel() -> Vec<RawTouchpoint> {
    funnel_rows(500, 498, 487, 299)
}

/// `n` rows spread evenly over every day of 2024, cycling through all
/// brands, campaigns, specialties, and regions.
pub fn uniform_year_rows(n: usize) -> Vec<RawTouchpoint> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date");
    let days = 366;
    (0..n)
        .map(|i| {
            let date = start + Duration::days((i * days / n.max(1)) as i64);
            RawTouchpoint {
                hcp_id: hcp(i % 500),
                brand_name: Brand::ALL[i % Brand::ALL.len()].to_string(),
                campaign_name: Campaign::ALL[i % Campaign::ALL.len()].to_string(),
                campaign_date: date.format("%Y-%m-%d").to_string(),
                hcp_specialty: Specialty::ALL[i % Specialty::ALL.len()].to_string(),
                hcp_region: Region::ALL[i % Region::ALL.len()].to_string(),
                ..Default::default()
            }
            .with_flags(true, i % 2 == 0, i % 4 == 0, i % 8 == 0)
        })
        .collect()
}

/// Rows exported with the spreadsheet headers, as a JSON payload.
pub fn export_payload() -> String {
    serde_json::json!({
        "records": [
            {
                "hcp id": "HCP01000",
                "brand name": "Brand A",
                "campaign name": "Engagement",
                "date of campaign": "2024-03-04 00:00:00",
                "target (1 or 0)": 1,
                "reach (1 or 0)": 1,
                "open (1 or 0)": 1,
                "click (1 or 0)": 0,
                "hcp specialty": "Pediatrician",
                "hcp region (N/S/E/W)": "S"
            },
            {
                "hcp id": "HCP01001",
                "brand name": "Brand B",
                "campaign name": "New Launch",
                "date of campaign": "2024-11-20 00:00:00",
                "target (1 or 0)": 1,
                "reach (1 or 0)": 1,
                "open (1 or 0)": 1,
                "click (1 or 0)": 1,
                "hcp specialty": "Dermatologist",
                "hcp region (N/S/E/W)": "W"
            }
        ]
    })
    .to_string()
}
