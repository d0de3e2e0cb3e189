//! Dataset I/O
//!
//! Reads raw hourly charging CSVs and writes the interim daily records, the
//! training set and a JSON summary of each run.

mod error;
mod export;
mod ingest;
mod metadata;
mod paths;

pub use error::IoError;
pub use export::{create_output, write_daily_records, write_training_rows};
pub use ingest::{load_raw_records, read_raw_records, RawTable};
pub use metadata::{write_run_metadata, RunMetadata};
pub use paths::{ensure_dir, DataPaths};
