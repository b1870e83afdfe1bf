//! Schema limits and defaults for touchpoint data.
//!
//! The `#[validate]` derive macro requires literal values in attributes,
//! so `MAX_HCP_ID_LEN` is duplicated on `RawTouchpoint`. Keep both in sync
//! when modifying.

/// HCP identifier max length (chars).
/// Source ids look like "HCP01000"; 64 leaves room for CRM keys.
pub const MAX_HCP_ID_LEN: usize = 64;

/// Calendar year of the default observation window.
pub const DEFAULT_WINDOW_YEAR: i32 = 2024;

/// Distinct HCPs in the reference campaign dataset.
pub const REFERENCE_HCP_COUNT: usize = 500;
