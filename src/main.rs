//! Campaign funnel report runner
//!
//! Loads the touchpoint dataset, validates it into an immutable table,
//! applies the configured slicer selection, and writes every dashboard
//! view (KPIs, funnel table, breakdowns, monthly trend, insights) to
//! stdout as JSON. Logs go to stderr.

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use tracing::{error, info};

use dataset::DatasetConfig;
use funnel_core::{FilterSet, ObservationWindow, TouchpointTable};
use funnel_metrics::{build_report, ReportOptions};
use telemetry::init_tracing_from_env;

/// Application configuration.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct Config {
    #[serde(default)]
    dataset: DatasetConfig,

    /// Dates outside this window are rejected at load. When unset, the
    /// synthetic dataset's calendar year (or the default 2024 window for a
    /// file source).
    #[serde(default)]
    window: Option<ObservationWindow>,

    /// Slicer selection applied to every view
    #[serde(default)]
    filters: FilterSet,

    #[serde(default)]
    report: ReportOptions,

    /// Pretty-print the report JSON
    #[serde(default)]
    pretty: bool,
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_tracing_from_env();

    info!("Starting campaign funnel report v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config()?;
    let window = config.observation_window()?;

    info!(
        path = ?config.dataset.path,
        seed = config.dataset.synthetic.seed,
        window = %window,
        "Loaded config"
    );

    let rows = config
        .dataset
        .load_rows()
        .context("Failed to read dataset")?;

    let table = match TouchpointTable::load_with_window(rows, window) {
        Ok(table) => table,
        Err(e) => {
            for violation in e.violations() {
                error!(%violation, "Invalid touchpoint row");
            }
            return Err(e).context("Dataset failed validation");
        }
    };

    let report = build_report(&table, &config.filters, &config.report);

    let json = if config.pretty {
        serde_json::to_string_pretty(&report)
    } else {
        serde_json::to_string(&report)
    }
    .context("Failed to serialize report")?;
    println!("{}", json);

    info!("Report complete");
    Ok(())
}

impl Config {
    /// The window rows are validated against.
    fn observation_window(&self) -> Result<ObservationWindow> {
        match (self.window, &self.dataset.path) {
            (Some(window), _) => Ok(window),
            (None, None) => {
                let year = self.dataset.synthetic.year;
                ObservationWindow::calendar_year(year)
                    .ok_or_else(|| anyhow!("synthetic year {} is out of range", year))
            }
            (None, Some(_)) => Ok(ObservationWindow::default()),
        }
    }
}

/// Slicer keys read from comma-separated environment values.
const LIST_KEYS: [&str; 4] = [
    "filters.brands",
    "filters.campaigns",
    "filters.specialties",
    "filters.regions",
];

/// `FUNNEL__*` environment source.
fn environment() -> config::Environment {
    LIST_KEYS.iter().fold(
        config::Environment::default()
            .separator("__")
            .prefix("FUNNEL")
            .try_parsing(true)
            .list_separator(","),
        |env, key| env.with_list_parse_key(key),
    )
}

/// Load configuration from files and environment.
fn load_config() -> Result<Config> {
    load_config_from(environment())
}

fn load_config_from(env: config::Environment) -> Result<Config> {
    let config = config::Config::builder()
        // Start with defaults
        .add_source(config::Config::try_from(&Config::default())?)
        // Load from config file if exists
        .add_source(
            config::File::with_name("config/default")
                .required(false)
                .format(config::FileFormat::Toml),
        )
        // Override with environment variables
        .add_source(env)
        .build()
        .context("Failed to build configuration")?;

    let mut config: Config = config
        .try_deserialize()
        .context("Failed to deserialize configuration")?;

    // Manual overrides for the common dataset settings
    // The config crate's nested parsing doesn't work reliably with underscored field names
    if let Ok(path) = std::env::var("FUNNEL_DATASET_PATH") {
        config.dataset.path = Some(PathBuf::from(path));
    }
    if let Ok(seed) = std::env::var("FUNNEL_DATASET_SEED") {
        config.dataset.synthetic.seed = seed
            .parse()
            .context("FUNNEL_DATASET_SEED must be an integer")?;
    }
    if let Ok(rows) = std::env::var("FUNNEL_DATASET_ROWS") {
        config.dataset.synthetic.rows = rows
            .parse()
            .context("FUNNEL_DATASET_ROWS must be an integer")?;
    }

    Ok(config)
}
