//! Validated touchpoint records and their categorical fields.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Brand promoted by a campaign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Brand {
    #[serde(rename = "Brand A")]
    A,
    #[serde(rename = "Brand B")]
    B,
}

impl Brand {
    pub const ALL: [Brand; 2] = [Brand::A, Brand::B];

    /// Returns the display name used in source data.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::A => "Brand A",
            Self::B => "Brand B",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        parse_label(s, &Self::ALL, Self::as_str)
    }
}

/// Marketing campaign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Campaign {
    Awareness,
    Engagement,
    Retention,
    #[serde(rename = "New Launch")]
    NewLaunch,
}

impl Campaign {
    pub const ALL: [Campaign; 4] = [
        Campaign::Awareness,
        Campaign::Engagement,
        Campaign::Retention,
        Campaign::NewLaunch,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Awareness => "Awareness",
            Self::Engagement => "Engagement",
            Self::Retention => "Retention",
            Self::NewLaunch => "New Launch",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        parse_label(s, &Self::ALL, Self::as_str)
    }
}

/// HCP medical specialty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Specialty {
    Cardiologist,
    Oncologist,
    Pediatrician,
    Dermatologist,
    Endocrinologist,
    Neurologist,
}

impl Specialty {
    pub const ALL: [Specialty; 6] = [
        Specialty::Cardiologist,
        Specialty::Oncologist,
        Specialty::Pediatrician,
        Specialty::Dermatologist,
        Specialty::Endocrinologist,
        Specialty::Neurologist,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cardiologist => "Cardiologist",
            Self::Oncologist => "Oncologist",
            Self::Pediatrician => "Pediatrician",
            Self::Dermatologist => "Dermatologist",
            Self::Endocrinologist => "Endocrinologist",
            Self::Neurologist => "Neurologist",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        parse_label(s, &Self::ALL, Self::as_str)
    }
}

/// HCP sales region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Region {
    #[serde(alias = "N")]
    North,
    #[serde(alias = "S")]
    South,
    #[serde(alias = "E")]
    East,
    #[serde(alias = "W")]
    West,
}

impl Region {
    pub const ALL: [Region; 4] = [Region::North, Region::South, Region::East, Region::West];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::North => "North",
            Self::South => "South",
            Self::East => "East",
            Self::West => "West",
        }
    }

    /// Single-letter code used by spreadsheet exports (N/S/E/W).
    pub fn code(&self) -> &'static str {
        &self.as_str()[..1]
    }

    /// Accepts long names and single-letter codes.
    pub fn parse(s: &str) -> Option<Self> {
        parse_label(s, &Self::ALL, Self::as_str).or_else(|| parse_label(s, &Self::ALL, Self::code))
    }
}

fn parse_label<T: Copy>(s: &str, all: &[T], label: fn(&T) -> &'static str) -> Option<T> {
    let s = s.trim();
    all.iter().copied().find(|v| label(v).eq_ignore_ascii_case(s))
}

macro_rules! display_as_str {
    ($($ty:ty),*) => {
        $(impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

display_as_str!(Brand, Campaign, Specialty, Region);

/// Ordered funnel stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FunnelStage {
    Target,
    Reach,
    Open,
    Click,
}

impl FunnelStage {
    /// Stages in funnel order.
    pub const ALL: [FunnelStage; 4] = [
        FunnelStage::Target,
        FunnelStage::Reach,
        FunnelStage::Open,
        FunnelStage::Click,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Target => "target",
            Self::Reach => "reach",
            Self::Open => "open",
            Self::Click => "click",
        }
    }

    /// The stage a record must have passed to reach this one.
    pub fn previous(&self) -> Option<FunnelStage> {
        match self {
            Self::Target => None,
            Self::Reach => Some(Self::Target),
            Self::Open => Some(Self::Reach),
            Self::Click => Some(Self::Open),
        }
    }
}

/// Funnel flags of one touchpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FunnelFlags {
    pub target: bool,
    pub reach: bool,
    pub open: bool,
    pub click: bool,
}

impl FunnelFlags {
    pub fn new(target: bool, reach: bool, open: bool, click: bool) -> Self {
        Self {
            target,
            reach,
            open,
            click,
        }
    }

    pub fn get(&self, stage: FunnelStage) -> bool {
        match stage {
            FunnelStage::Target => self.target,
            FunnelStage::Reach => self.reach,
            FunnelStage::Open => self.open,
            FunnelStage::Click => self.click,
        }
    }

    /// First stage that is set while its previous stage is not.
    pub fn first_out_of_order(&self) -> Option<FunnelStage> {
        FunnelStage::ALL.into_iter().find(|stage| {
            stage
                .previous()
                .is_some_and(|prev| self.get(*stage) && !self.get(prev))
        })
    }

    pub fn is_monotonic(&self) -> bool {
        self.first_out_of_order().is_none()
    }
}

/// Calendar month, ordered chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl std::fmt::Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// A validated HCP-campaign-date touchpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Touchpoint {
    pub hcp_id: String,
    pub brand: Brand,
    pub campaign: Campaign,
    pub campaign_date: NaiveDate,
    pub specialty: Specialty,
    pub region: Region,
    #[serde(flatten)]
    pub funnel: FunnelFlags,
}

impl Touchpoint {
    /// Calendar quarter of the campaign date (1-4).
    pub fn quarter(&self) -> u8 {
        // ceil(month / 3)
        ((self.campaign_date.month() + 2) / 3) as u8
    }

    pub fn month(&self) -> YearMonth {
        YearMonth::of(self.campaign_date)
    }
}
