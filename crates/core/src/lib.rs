//! Core types, schema validation, and the touchpoint table for campaign funnel analytics.

pub mod error;
pub mod filter;
pub mod limits;
pub mod raw;
pub mod schema;
pub mod table;
pub mod touchpoint;
pub mod window;

pub use error::{Error, Result, RowViolation, ValidationErrorCode};
pub use filter::*;
pub use raw::RawTouchpoint;
pub use table::*;
pub use touchpoint::*;
pub use window::*;
