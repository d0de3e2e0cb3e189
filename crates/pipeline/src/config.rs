//! Pipeline configuration

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use dataset_io::DataPaths;
use preprocessor::PeakBand;
use serde::{Deserialize, Serialize};
use tracing::warn;
use training_set::WindowParams;

/// Prefix of environment variables read by [`PipelineConfig::load`]
pub const ENV_PREFIX: &str = "EVF";

/// File name looked up in the raw data directory when no input is given
pub const DEFAULT_INPUT_FILE: &str = "charging_hourly.csv";

/// Pipeline configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Lookback, horizon and spectral component count
    pub window: WindowParams,

    /// Hours counted as peak demand
    pub peak_band: PeakBand,

    /// Build charging types on the rayon thread pool
    pub parallel: bool,

    /// Share of the latest window end dates held out for validation
    pub validation_fraction: f64,

    /// Data directory layout
    pub paths: DataPaths,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            window: WindowParams::default(),
            peak_band: PeakBand::default(),
            parallel: true,
            validation_fraction: 0.2,
            paths: DataPaths::default(),
        }
    }
}

impl PipelineConfig {
    /// Layer defaults, an optional TOML file and `EVF_` environment variables
    ///
    /// Nested keys use a double underscore: `EVF_WINDOW__LOOKBACK=14`.
    pub fn load(file: Option<&Path>) -> anyhow::Result<Self> {
        Self::load_sources(file, true)
    }

    fn load_sources(file: Option<&Path>, with_env: bool) -> anyhow::Result<Self> {
        let mut builder = config::Config::builder()
            .add_source(config::Config::try_from(&Self::default()).context("Invalid default configuration")?);

        if let Some(path) = file {
            builder = builder.add_source(config::File::from(path).required(true));
        }
        if with_env {
            builder = builder.add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );
        }

        let settings = builder.build().context("Failed to load configuration")?;
        settings
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Reject settings the pipeline cannot run with
    pub fn validate(&self) -> anyhow::Result<()> {
        self.window.validate()?;
        self.peak_band.validate()?;

        if !(0.0..1.0).contains(&self.validation_fraction) {
            bail!(
                "validation_fraction must be in [0, 1), got {}",
                self.validation_fraction
            );
        }

        let available = self.window.effective_top_k();
        if available < self.window.top_k {
            warn!(
                "top_k {} exceeds the {} spectral bins of a {}-day window; using {}",
                self.window.top_k, available, self.window.lookback, available
            );
        }

        Ok(())
    }

    /// Input CSV used when none is given on the command line
    pub fn default_input(&self) -> PathBuf {
        self.paths.raw_file(DEFAULT_INPUT_FILE)
    }
}
