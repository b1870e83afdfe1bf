//! Slicer filters over touchpoint records.
//!
//! Each categorical constraint is a set of accepted values (equality is the
//! one-element set). Unset constraints accept everything; an empty set
//! accepts nothing. Constraints combine with logical AND.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::touchpoint::{Brand, Campaign, Region, Specialty, Touchpoint};

/// Inclusive date range with optional open ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn between(from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from.map_or(true, |from| from <= date) && self.to.map_or(true, |to| date <= to)
    }
}

/// A conjunction of slicer constraints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brands: Option<Vec<Brand>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campaigns: Option<Vec<Campaign>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialties: Option<Vec<Specialty>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regions: Option<Vec<Region>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_range: Option<DateRange>,
}

impl FilterSet {
    /// Filter accepting every record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept records of `brand` (adds to any brands already accepted).
    pub fn with_brand(mut self, brand: Brand) -> Self {
        self.brands.get_or_insert_with(Vec::new).push(brand);
        self
    }

    /// Accept exactly the given brands. An empty selection matches nothing.
    pub fn with_brands(mut self, brands: impl IntoIterator<Item = Brand>) -> Self {
        self.brands = Some(brands.into_iter().collect());
        self
    }

    pub fn with_campaign(mut self, campaign: Campaign) -> Self {
        self.campaigns.get_or_insert_with(Vec::new).push(campaign);
        self
    }

    pub fn with_campaigns(mut self, campaigns: impl IntoIterator<Item = Campaign>) -> Self {
        self.campaigns = Some(campaigns.into_iter().collect());
        self
    }

    pub fn with_specialty(mut self, specialty: Specialty) -> Self {
        self.specialties.get_or_insert_with(Vec::new).push(specialty);
        self
    }

    pub fn with_specialties(mut self, specialties: impl IntoIterator<Item = Specialty>) -> Self {
        self.specialties = Some(specialties.into_iter().collect());
        self
    }

    pub fn with_region(mut self, region: Region) -> Self {
        self.regions.get_or_insert_with(Vec::new).push(region);
        self
    }

    pub fn with_regions(mut self, regions: impl IntoIterator<Item = Region>) -> Self {
        self.regions = Some(regions.into_iter().collect());
        self
    }

    pub fn with_date_range(mut self, range: DateRange) -> Self {
        self.date_range = Some(range);
        self
    }

    /// Restrict to `from..=to`.
    pub fn between(self, from: NaiveDate, to: NaiveDate) -> Self {
        self.with_date_range(DateRange::between(from, to))
    }

    /// True when no constraint is set.
    pub fn is_unrestricted(&self) -> bool {
        self.brands.is_none()
            && self.campaigns.is_none()
            && self.specialties.is_none()
            && self.regions.is_none()
            && self.date_range.is_none()
    }

    /// Check whether a record satisfies every constraint.
    pub fn matches(&self, record: &Touchpoint) -> bool {
        accepts(&self.brands, &record.brand)
            && accepts(&self.campaigns, &record.campaign)
            && accepts(&self.specialties, &record.specialty)
            && accepts(&self.regions, &record.region)
            && self
                .date_range
                .map_or(true, |range| range.contains(record.campaign_date))
    }
}

fn accepts<T: PartialEq>(selection: &Option<Vec<T>>, value: &T) -> bool {
    selection.as_ref().map_or(true, |values| values.contains(value))
}

/// Values a slicer can offer, in first-appearance order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlicerOptions {
    pub brands: Vec<Brand>,
    pub campaigns: Vec<Campaign>,
    pub specialties: Vec<Specialty>,
    pub regions: Vec<Region>,
    /// Earliest and latest campaign date present
    pub date_span: Option<(NaiveDate, NaiveDate)>,
}

impl SlicerOptions {
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a Touchpoint>,
    {
        let mut options = Self::default();
        for record in records {
            push_distinct(&mut options.brands, record.brand);
            push_distinct(&mut options.campaigns, record.campaign);
            push_distinct(&mut options.specialties, record.specialty);
            push_distinct(&mut options.regions, record.region);
            let date = record.campaign_date;
            options.date_span = Some(match options.date_span {
                Some((lo, hi)) => (lo.min(date), hi.max(date)),
                None => (date, date),
            });
        }
        options
    }

    /// A filter selecting every offered value, the dashboard's default state.
    pub fn select_all(&self) -> FilterSet {
        FilterSet::new()
            .with_brands(self.brands.iter().copied())
            .with_campaigns(self.campaigns.iter().copied())
            .with_specialties(self.specialties.iter().copied())
            .with_regions(self.regions.iter().copied())
    }
}

fn push_distinct<T: PartialEq>(values: &mut Vec<T>, value: T) {
    if !values.contains(&value) {
        values.push(value);
    }
}
