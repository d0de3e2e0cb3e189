//! EV Charging Feature Pipeline
//!
//! Batch job that turns hourly charging exports into a chronologically
//! ordered, leakage-free training set.

pub mod cli;
pub mod config;
pub mod stages;

pub use config::PipelineConfig;
pub use stages::{run_build, run_inspect, run_stages, BuildOutput, StageOutput};

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::cli::{Cli, Command};

/// Initialize logging
///
/// Level comes from `RUST_LOG` and defaults to `info`. Logs go to stderr.
pub fn init_logging(json: bool) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    let result = if json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    };
    result.context("Failed to set tracing subscriber")
}

/// Dispatch a parsed command line
pub fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = PipelineConfig::load(cli.config.as_deref())?;

    match cli.command {
        Command::Build(args) => {
            args.overrides.apply(&mut config);
            if let Some(fraction) = args.validation_fraction {
                config.validation_fraction = fraction;
            }
            config.validate()?;

            let input = args.input.unwrap_or_else(|| config.default_input());
            let output = run_build(&input, &config)?;
            info!(
                "Build finished: {} training rows ({} train / {} validation) in {}",
                output.training_rows,
                output.train_rows,
                output.validation_rows,
                config.paths.processed_dir.display()
            );
        }
        Command::Inspect(args) => {
            args.overrides.apply(&mut config);
            config.validate()?;

            let input = args.input.unwrap_or_else(|| config.default_input());
            for summary in run_inspect(&input, &config)? {
                info!(
                    "{}: {} daily records, {} windows",
                    summary.category, summary.records, summary.windows
                );
            }
        }
    }

    Ok(())
}
