//! Observation window for campaign dates.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::limits::DEFAULT_WINDOW_YEAR;

/// Inclusive date range every touchpoint must fall into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservationWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ObservationWindow {
    /// Window covering `start..=end`. Returns `None` when `end < start`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    /// January 1st through December 31st of `year`.
    pub fn calendar_year(year: i32) -> Option<Self> {
        let start = NaiveDate::from_ymd_opt(year, 1, 1)?;
        let end = NaiveDate::from_ymd_opt(year, 12, 31)?;
        Some(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of days in the window.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

impl Default for ObservationWindow {
    fn default() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(DEFAULT_WINDOW_YEAR, 1, 1).unwrap_or(NaiveDate::MIN),
            end: NaiveDate::from_ymd_opt(DEFAULT_WINDOW_YEAR, 12, 31).unwrap_or(NaiveDate::MAX),
        }
    }
}

impl std::fmt::Display for ObservationWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}
