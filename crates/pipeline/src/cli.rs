//! Command-line parsing for the feature pipeline.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::PipelineConfig;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "ev-features",
    version,
    about = "Sliding-window training sets for EV charging demand"
)]
pub struct Cli {
    /// TOML configuration file layered over the built-in defaults.
    #[arg(long, global = true, value_name = "TOML")]
    pub config: Option<PathBuf>,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build the training set and write interim/processed outputs.
    Build(BuildArgs),
    /// Load and preprocess only; report records and windows per charging type.
    Inspect(InspectArgs),
}

/// Options for `build`.
#[derive(Debug, Args, Clone)]
pub struct BuildArgs {
    /// Hourly charging CSV. Defaults to the configured raw data directory.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Fraction of the latest window end dates held out for validation.
    #[arg(long)]
    pub validation_fraction: Option<f64>,

    #[command(flatten)]
    pub overrides: ConfigOverrides,
}

/// Options for `inspect`.
#[derive(Debug, Args, Clone)]
pub struct InspectArgs {
    /// Hourly charging CSV. Defaults to the configured raw data directory.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: ConfigOverrides,
}

/// Flags that take precedence over file and environment configuration.
#[derive(Debug, Args, Clone, Default)]
pub struct ConfigOverrides {
    /// Days of history per window.
    #[arg(long)]
    pub lookback: Option<usize>,

    /// Days summed into the label.
    #[arg(long)]
    pub horizon: Option<usize>,

    /// Dominant spectral components per window.
    #[arg(long)]
    pub top_k: Option<usize>,

    /// First peak hour (inclusive).
    #[arg(long)]
    pub peak_start: Option<usize>,

    /// End of the peak band (exclusive).
    #[arg(long)]
    pub peak_end: Option<usize>,

    /// Root of the raw/interim/processed data directories.
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Process charging types one after another instead of in parallel.
    #[arg(long)]
    pub sequential: bool,
}

impl ConfigOverrides {
    /// Apply every flag that was given
    pub fn apply(&self, config: &mut PipelineConfig) {
        if let Some(lookback) = self.lookback {
            config.window.lookback = lookback;
        }
        if let Some(horizon) = self.horizon {
            config.window.horizon = horizon;
        }
        if let Some(top_k) = self.top_k {
            config.window.top_k = top_k;
        }
        if let Some(start) = self.peak_start {
            config.peak_band.start = start;
        }
        if let Some(end) = self.peak_end {
            config.peak_band.end = end;
        }
        if let Some(root) = &self.data_dir {
            config.paths = dataset_io::DataPaths::under(root);
        }
        if self.sequential {
            config.parallel = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_build_with_overrides() {
        let cli = Cli::try_parse_from([
            "ev-features",
            "build",
            "--input",
            "hourly.csv",
            "--lookback",
            "14",
            "--top-k",
            "5",
            "--sequential",
            "--validation-fraction",
            "0.1",
        ])
        .unwrap();

        let Command::Build(args) = cli.command else {
            panic!("expected build command");
        };
        assert_eq!(args.input, Some(PathBuf::from("hourly.csv")));
        assert_eq!(args.validation_fraction, Some(0.1));

        let mut config = PipelineConfig::default();
        args.overrides.apply(&mut config);
        assert_eq!(config.window.lookback, 14);
        assert_eq!(config.window.horizon, 7);
        assert_eq!(config.window.top_k, 5);
        assert!(!config.parallel);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["ev-features", "inspect", "--log-json", "--data-dir", "/tmp/ev"]).unwrap();
        assert!(cli.log_json);

        let Command::Inspect(args) = cli.command else {
            panic!("expected inspect command");
        };
        let mut config = PipelineConfig::default();
        args.overrides.apply(&mut config);
        assert_eq!(config.paths.raw_dir, PathBuf::from("/tmp/ev/raw"));
    }
}
