//! Common test setup functions.

use dataset::{generate, SyntheticConfig};
use funnel_core::{RawTouchpoint, TouchpointTable};
use telemetry::{init_tracing, TracingConfig};

/// Test context holding a loaded table.
pub struct TestContext {
    pub table: TouchpointTable,
}

impl TestContext {
    /// Load `rows`, panicking on validation failure.
    pub fn from_rows(rows: Vec<RawTouchpoint>) -> Self {
        init_test_tracing();
        let table = TouchpointTable::load(rows).expect("fixture rows should validate");
        Self { table }
    }

    /// The dashboard's default synthetic dataset.
    pub fn synthetic() -> Self {
        let rows = generate(&SyntheticConfig::default()).expect("synthetic rows");
        Self::from_rows(rows)
    }
}

/// Quiet tracing for tests; honours `RUST_LOG` when set.
pub fn init_test_tracing() {
    init_tracing(TracingConfig::new().with_filter("warn"));
}
