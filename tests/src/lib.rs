//! Shared fixtures and setup for the funnel analytics integration tests.

pub mod fixtures;
pub mod setup;
