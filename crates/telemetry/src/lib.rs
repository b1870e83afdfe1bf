//! Structured logging for the funnel analytics tools.
//!
//! Logs always go to stderr; stdout is reserved for report output.

pub mod tracing_setup;

pub use tracing_setup::*;
