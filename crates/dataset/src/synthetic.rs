//! Seeded synthetic campaign dataset.
//!
//! Reproduces the shape of the dashboard's dummy data: 500 HCPs, two brands
//! each running their own pair of campaigns, uniform dates over one year,
//! regions skewed north, and funnel stages drawn conditionally so every row
//! is monotonic. The same seed always yields the same rows.

use chrono::{Duration, NaiveDate};
use funnel_core::{
    Brand, Campaign, Error, ObservationWindow, RawTouchpoint, Region, Result, Specialty,
};
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// First HCP number of the pool; ids run `HCP01000..HCP01499`.
pub const HCP_POOL_START: usize = 1000;
pub const HCP_POOL_SIZE: usize = funnel_core::limits::REFERENCE_HCP_COUNT;

/// Region weights in `Region::ALL` order (N, S, E, W).
const REGION_WEIGHTS: [u32; 4] = [30, 25, 25, 20];

const P_TARGET: f64 = 0.85;
const P_REACH: f64 = 0.68;
const P_OPEN: f64 = 0.42;
/// Extra open chance for Engagement and New Launch campaigns
const P_OPEN_CAMPAIGN_LIFT: f64 = 0.35;
/// Extra open chance for Brand A
const P_OPEN_BRAND_LIFT: f64 = 0.22;
const P_CLICK: f64 = 0.20;
/// Extra click chance for Pediatricians and Dermatologists
const P_CLICK_SPECIALTY_LIFT: f64 = 0.18;

/// Generator settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyntheticConfig {
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default = "default_rows")]
    pub rows: usize,
    /// Calendar year the campaign dates fall in
    #[serde(default = "default_year")]
    pub year: i32,
}

fn default_seed() -> u64 {
    17
}

fn default_rows() -> usize {
    6000
}

fn default_year() -> i32 {
    funnel_core::limits::DEFAULT_WINDOW_YEAR
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            rows: default_rows(),
            year: default_year(),
        }
    }
}

/// Campaigns each brand runs.
pub fn campaigns_for(brand: Brand) -> [Campaign; 2] {
    match brand {
        Brand::A => [Campaign::Awareness, Campaign::Engagement],
        Brand::B => [Campaign::Retention, Campaign::NewLaunch],
    }
}

/// HCP identifier for pool position `i`.
pub fn hcp_id(i: usize) -> String {
    format!("HCP{:05}", HCP_POOL_START + i)
}

/// Generate raw rows for `config`.
pub fn generate(config: &SyntheticConfig) -> Result<Vec<RawTouchpoint>> {
    let window = ObservationWindow::calendar_year(config.year)
        .ok_or_else(|| Error::source(format!("year {} is out of range", config.year)))?;
    let regions = WeightedIndex::new(REGION_WEIGHTS)
        .map_err(|e| Error::source(format!("region weights: {}", e)))?;

    let mut rng = StdRng::seed_from_u64(config.seed);
    let rows = (0..config.rows)
        .map(|_| generate_row(&mut rng, &window, &regions))
        .collect::<Vec<_>>();

    debug!(seed = config.seed, rows = rows.len(), "Generated synthetic dataset");
    Ok(rows)
}

fn generate_row(
    rng: &mut StdRng,
    window: &ObservationWindow,
    regions: &WeightedIndex<u32>,
) -> RawTouchpoint {
    let hcp = hcp_id(rng.gen_range(0..HCP_POOL_SIZE));
    let brand = Brand::ALL[rng.gen_range(0..Brand::ALL.len())];
    let campaign = campaigns_for(brand)[rng.gen_range(0..2)];
    let date = random_date(rng, window);
    let specialty = Specialty::ALL[rng.gen_range(0..Specialty::ALL.len())];
    let region = Region::ALL[regions.sample(rng)];

    let target = rng.gen_bool(P_TARGET);
    let reach = target && rng.gen_bool(P_REACH);

    let open_base = rng.gen_bool(P_OPEN);
    let campaign_lift = matches!(campaign, Campaign::Engagement | Campaign::NewLaunch)
        && rng.gen_bool(P_OPEN_CAMPAIGN_LIFT);
    let brand_lift = brand == Brand::A && rng.gen_bool(P_OPEN_BRAND_LIFT);
    let open = reach && (open_base || campaign_lift || brand_lift);

    let click_base = rng.gen_bool(P_CLICK);
    let specialty_lift = matches!(specialty, Specialty::Pediatrician | Specialty::Dermatologist)
        && rng.gen_bool(P_CLICK_SPECIALTY_LIFT);
    let click = open && (click_base || specialty_lift);

    RawTouchpoint {
        hcp_id: hcp,
        brand_name: brand.as_str().to_string(),
        campaign_name: campaign.as_str().to_string(),
        campaign_date: date.format("%Y-%m-%d").to_string(),
        hcp_specialty: specialty.as_str().to_string(),
        hcp_region: region.code().to_string(),
        ..Default::default()
    }
    .with_flags(target, reach, open, click)
}

fn random_date(rng: &mut StdRng, window: &ObservationWindow) -> NaiveDate {
    window.start + Duration::days(rng.gen_range(0..window.days()))
}
