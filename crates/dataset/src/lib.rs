//! Dataset sources: seeded synthetic campaign data and JSON files.

pub mod source;
pub mod synthetic;

pub use source::*;
pub use synthetic::{generate, SyntheticConfig};
