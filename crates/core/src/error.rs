//! Unified error types for the funnel analytics core.
//!
//! Error codes:
//! - VALID_001-006: Row validation errors (reported per row at load time)
//! - GROUP_001: Invalid grouping dimension
//! - SOURCE_001: Dataset source could not be read or parsed

use serde::Serialize;
use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Row validation error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ValidationErrorCode {
    /// VALID_001: Flag is missing or not 0/1
    NonBooleanFlag,
    /// VALID_002: Funnel stages out of order (e.g. click without open)
    FunnelOrder,
    /// VALID_003: Campaign date outside the observation window
    DateOutsideWindow,
    /// VALID_004: Campaign date could not be parsed
    InvalidDate,
    /// VALID_005: Unknown brand, campaign, specialty, or region
    UnknownCategory,
    /// VALID_006: HCP identifier empty or too long
    InvalidIdentifier,
}

impl ValidationErrorCode {
    /// Get the error code string.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NonBooleanFlag => "VALID_001",
            Self::FunnelOrder => "VALID_002",
            Self::DateOutsideWindow => "VALID_003",
            Self::InvalidDate => "VALID_004",
            Self::UnknownCategory => "VALID_005",
            Self::InvalidIdentifier => "VALID_006",
        }
    }
}

/// A single rule violated by a single input row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowViolation {
    /// Zero-based position of the row in the input sequence
    pub row: usize,
    /// HCP identifier of the row, when one was supplied
    pub hcp_id: Option<String>,
    /// Violated rule
    pub code: ValidationErrorCode,
    pub message: String,
}

impl RowViolation {
    pub fn new(
        row: usize,
        hcp_id: Option<&str>,
        code: ValidationErrorCode,
        message: impl Into<String>,
    ) -> Self {
        Self {
            row,
            hcp_id: hcp_id.filter(|id| !id.is_empty()).map(str::to_string),
            code,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for RowViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.hcp_id {
            Some(id) => write!(
                f,
                "row {} ({}): [{}] {}",
                self.row,
                id,
                self.code.code(),
                self.message
            ),
            None => write!(f, "row {}: [{}] {}", self.row, self.code.code(), self.message),
        }
    }
}

/// Max violations spelled out in the error message; the full list stays on the error.
const MAX_LISTED_VIOLATIONS: usize = 5;

fn summarize(violations: &[RowViolation]) -> String {
    let mut listed: Vec<String> = violations
        .iter()
        .take(MAX_LISTED_VIOLATIONS)
        .map(|v| v.to_string())
        .collect();
    if violations.len() > MAX_LISTED_VIOLATIONS {
        listed.push(format!("and {} more", violations.len() - MAX_LISTED_VIOLATIONS));
    }
    listed.join("; ")
}

fn distinct_rows(violations: &[RowViolation]) -> usize {
    let mut rows: Vec<usize> = violations.iter().map(|v| v.row).collect();
    rows.dedup();
    rows.len()
}

/// Unified error type for the funnel analytics core.
#[derive(Debug, Error)]
pub enum Error {
    /// One or more input rows failed validation. Nothing was loaded.
    #[error(
        "validation failed for {} row(s): {}",
        distinct_rows(.violations),
        summarize(.violations)
    )]
    Validation { violations: Vec<RowViolation> },

    /// A requested grouping field is not a grouping dimension of the schema.
    #[error("[GROUP_001] invalid grouping field '{field}': {reason}")]
    InvalidGrouping { field: String, reason: String },

    #[error("[SOURCE_001] {0}")]
    Source(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn validation(violations: Vec<RowViolation>) -> Self {
        Self::Validation { violations }
    }

    pub fn invalid_grouping(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidGrouping {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn source(msg: impl Into<String>) -> Self {
        Self::Source(msg.into())
    }

    /// Row violations carried by a validation error (empty otherwise).
    pub fn violations(&self) -> &[RowViolation] {
        match self {
            Self::Validation { violations } => violations,
            _ => &[],
        }
    }

    /// Distinct offending row indexes, in input order.
    pub fn offending_rows(&self) -> Vec<usize> {
        let mut rows: Vec<usize> = self.violations().iter().map(|v| v.row).collect();
        rows.dedup();
        rows
    }

    /// Get the error code if this is a coded error.
    pub fn error_code(&self) -> Option<&'static str> {
        match self {
            Self::Validation { violations } => violations.first().map(|v| v.code.code()),
            Self::InvalidGrouping { .. } => Some("GROUP_001"),
            Self::Source(_) => Some("SOURCE_001"),
            _ => None,
        }
    }
}
