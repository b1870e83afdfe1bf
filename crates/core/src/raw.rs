//! Raw touchpoint rows as they arrive from a dataset source.
//!
//! This module handles:
//! - Accepting both snake_case columns and the spreadsheet export headers
//! - Keeping flags and dates unparsed so validation can report them per row
//! - Supporting 2 payload formats (array of rows, object with `records`)

use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use crate::error::{Error, Result};

/// An unvalidated touchpoint row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct RawTouchpoint {
    #[serde(default, alias = "hcp id")]
    #[validate(length(min = 1, max = 64))]
    pub hcp_id: String,

    #[serde(default, alias = "brand name")]
    pub brand_name: String,

    #[serde(default, alias = "campaign name")]
    pub campaign_name: String,

    /// `YYYY-MM-DD`, or a date-time whose date part is used
    #[serde(default, alias = "date of campaign")]
    pub campaign_date: String,

    /// Flags stay as raw JSON; anything but 0/1/true/false is rejected at load
    #[serde(default, alias = "target (1 or 0)")]
    pub target: Option<Value>,
    #[serde(default, alias = "reach (1 or 0)")]
    pub reach: Option<Value>,
    #[serde(default, alias = "open (1 or 0)")]
    pub open: Option<Value>,
    #[serde(default, alias = "click (1 or 0)")]
    pub click: Option<Value>,

    #[serde(default, alias = "hcp specialty")]
    pub hcp_specialty: String,

    #[serde(default, alias = "hcp region (N/S/E/W)", alias = "hcp region")]
    pub hcp_region: String,
}

impl RawTouchpoint {
    /// Encodes a flag the way source files store it (0/1).
    pub fn flag(set: bool) -> Option<Value> {
        Some(Value::from(u8::from(set)))
    }

    /// Sets all four funnel flags from booleans.
    pub fn with_flags(mut self, target: bool, reach: bool, open: bool, click: bool) -> Self {
        self.target = Self::flag(target);
        self.reach = Self::flag(reach);
        self.open = Self::flag(open);
        self.click = Self::flag(click);
        self
    }

    /// Parse dataset rows from JSON bytes.
    /// Supports:
    /// 1. Array: `[row, row, ...]`
    /// 2. Object with records: `{ "records": [...] }`
    pub fn parse_dataset(bytes: &[u8]) -> Result<Vec<Self>> {
        let value: Value = serde_json::from_slice(bytes)
            .map_err(|e| Error::source(format!("invalid JSON: {}", e)))?;

        match value {
            Value::Array(_) => serde_json::from_value(value)
                .map_err(|e| Error::source(format!("invalid row array: {}", e))),

            Value::Object(mut obj) => match obj.remove("records") {
                Some(records @ Value::Array(_)) => serde_json::from_value(records)
                    .map_err(|e| Error::source(format!("invalid records array: {}", e))),
                Some(_) => Err(Error::source("'records' must be an array")),
                None => Err(Error::source("object must have a 'records' array")),
            },

            _ => Err(Error::source(
                "dataset must be an array of rows or an object with 'records'",
            )),
        }
    }
}

/// Interprets a raw flag value as a boolean.
///
/// Accepts 0/1 (integer or float with no fractional part) and JSON booleans.
pub fn parse_flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => match n.as_f64() {
            Some(f) if f == 0.0 => Some(false),
            Some(f) if f == 1.0 => Some(true),
            _ => None,
        },
        _ => None,
    }
}
