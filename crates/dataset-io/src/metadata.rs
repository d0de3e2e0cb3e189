//! Run Metadata

use std::io::Write;

use chrono::{NaiveDate, Utc};
use preprocessor::PeakBand;
use serde::{Deserialize, Serialize};
use training_set::{CategorySummary, WindowParams};

use crate::error::IoError;

/// Summary of one pipeline run, written next to the exported datasets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunMetadata {
    /// RFC 3339 timestamp of the run
    pub generated_at: String,
    /// Input CSV as given on the command line
    pub input: String,
    pub window: WindowParams,
    pub peak_band: PeakBand,
    pub records_read: usize,
    pub categories: Vec<CategorySummary>,
    pub training_rows: usize,
    pub train_rows: usize,
    pub validation_rows: usize,
    pub validation_fraction: f64,
    pub validation_cutoff: Option<NaiveDate>,
    pub feature_columns: Vec<String>,
}

impl RunMetadata {
    /// Current time in the format stored in `generated_at`
    pub fn timestamp_now() -> String {
        Utc::now().to_rfc3339()
    }
}

/// Write metadata as pretty-printed JSON
pub fn write_run_metadata<W: Write>(mut writer: W, metadata: &RunMetadata) -> Result<(), IoError> {
    serde_json::to_writer_pretty(&mut writer, metadata)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
