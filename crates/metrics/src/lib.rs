//! Funnel metrics engine: counts, rates, grouping, trends, and insights.
//!
//! Every function here is a pure computation over borrowed touchpoints;
//! nothing is cached and the table is never mutated.

pub mod aggregate;
pub mod dimension;
pub mod funnel;
pub mod insight;
pub mod report;
pub mod trend;

pub use aggregate::*;
pub use dimension::*;
pub use funnel::*;
pub use insight::*;
pub use report::*;
pub use trend::*;
