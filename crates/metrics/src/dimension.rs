//! Grouping dimensions and group keys.

use funnel_core::{Brand, Campaign, Error, Region, Result, Specialty, Touchpoint, YearMonth};
use serde::{Deserialize, Serialize};

/// A categorical dimension records can be grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dimension {
    #[serde(rename = "brand_name")]
    Brand,
    #[serde(rename = "campaign_name")]
    Campaign,
    #[serde(rename = "hcp_region")]
    Region,
    #[serde(rename = "hcp_specialty")]
    Specialty,
    #[serde(rename = "quarter")]
    Quarter,
    #[serde(rename = "month")]
    Month,
}

/// Schema fields that exist but are not grouping dimensions.
const NON_GROUPING_FIELDS: [&str; 6] = [
    "hcp_id",
    "campaign_date",
    "target",
    "reach",
    "open",
    "click",
];

impl Dimension {
    pub const ALL: [Dimension; 6] = [
        Dimension::Brand,
        Dimension::Campaign,
        Dimension::Region,
        Dimension::Specialty,
        Dimension::Quarter,
        Dimension::Month,
    ];

    /// Schema field name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Brand => "brand_name",
            Self::Campaign => "campaign_name",
            Self::Region => "hcp_region",
            Self::Specialty => "hcp_specialty",
            Self::Quarter => "quarter",
            Self::Month => "month",
        }
    }

    /// Resolve a grouping field name (schema name or shorthand).
    pub fn parse(name: &str) -> Result<Self> {
        let key = name.trim().to_ascii_lowercase();
        match key.as_str() {
            "brand_name" | "brand" => Ok(Self::Brand),
            "campaign_name" | "campaign" => Ok(Self::Campaign),
            "hcp_region" | "region" => Ok(Self::Region),
            "hcp_specialty" | "specialty" => Ok(Self::Specialty),
            "quarter" => Ok(Self::Quarter),
            "month" => Ok(Self::Month),
            other if NON_GROUPING_FIELDS.contains(&other) => {
                Err(Error::invalid_grouping(name, "not a grouping dimension"))
            }
            _ => Err(Error::invalid_grouping(name, "no such field in the touchpoint schema")),
        }
    }

    /// Value of this dimension for one record.
    pub fn value_of(&self, record: &Touchpoint) -> DimensionValue {
        match self {
            Self::Brand => DimensionValue::Brand(record.brand),
            Self::Campaign => DimensionValue::Campaign(record.campaign),
            Self::Region => DimensionValue::Region(record.region),
            Self::Specialty => DimensionValue::Specialty(record.specialty),
            Self::Quarter => DimensionValue::Quarter(record.quarter()),
            Self::Month => DimensionValue::Month(record.month()),
        }
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse a `group_by` list.
///
/// Fails on the first unknown or repeated field; nothing is grouped in that case.
pub fn parse_group_by<S: AsRef<str>>(fields: &[S]) -> Result<Vec<Dimension>> {
    let mut dims: Vec<Dimension> = Vec::with_capacity(fields.len());
    for field in fields {
        let dim = Dimension::parse(field.as_ref())?;
        if dims.contains(&dim) {
            return Err(Error::invalid_grouping(field.as_ref(), "dimension requested twice"));
        }
        dims.push(dim);
    }
    Ok(dims)
}

/// One dimension's value within a group key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "dimension", content = "value")]
pub enum DimensionValue {
    #[serde(rename = "brand_name")]
    Brand(Brand),
    #[serde(rename = "campaign_name")]
    Campaign(Campaign),
    #[serde(rename = "hcp_region")]
    Region(Region),
    #[serde(rename = "hcp_specialty")]
    Specialty(Specialty),
    #[serde(rename = "quarter")]
    Quarter(u8),
    #[serde(rename = "month")]
    Month(YearMonth),
}

impl DimensionValue {
    pub fn dimension(&self) -> Dimension {
        match self {
            Self::Brand(_) => Dimension::Brand,
            Self::Campaign(_) => Dimension::Campaign,
            Self::Region(_) => Dimension::Region,
            Self::Specialty(_) => Dimension::Specialty,
            Self::Quarter(_) => Dimension::Quarter,
            Self::Month(_) => Dimension::Month,
        }
    }
}

impl std::fmt::Display for DimensionValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Brand(v) => write!(f, "{}", v),
            Self::Campaign(v) => write!(f, "{}", v),
            Self::Region(v) => write!(f, "{}", v),
            Self::Specialty(v) => write!(f, "{}", v),
            Self::Quarter(q) => write!(f, "Q{}", q),
            Self::Month(m) => write!(f, "{}", m),
        }
    }
}

/// Values of the requested dimensions, in request order. Empty for the ungrouped total.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupKey(pub Vec<DimensionValue>);

impl GroupKey {
    pub fn of(record: &Touchpoint, dims: &[Dimension]) -> Self {
        Self(dims.iter().map(|d| d.value_of(record)).collect())
    }

    pub fn values(&self) -> &[DimensionValue] {
        &self.0
    }

    pub fn get(&self, dimension: Dimension) -> Option<&DimensionValue> {
        self.0.iter().find(|v| v.dimension() == dimension)
    }

    pub fn is_total(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for GroupKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.is_empty() {
            return f.write_str("all");
        }
        let parts: Vec<String> = self.0.iter().map(|v| v.to_string()).collect();
        f.write_str(&parts.join(" / "))
    }
}
