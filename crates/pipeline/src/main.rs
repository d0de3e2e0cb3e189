//! EV Charging Feature Pipeline - Main Entry Point

use clap::Parser;
use pipeline::{cli::Cli, init_logging, run};
use tracing::info;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_json)?;

    info!("=== EV Feature Pipeline v{} ===", env!("CARGO_PKG_VERSION"));

    run(cli)
}
