//! Dataset I/O Error Types

use std::path::PathBuf;
use thiserror::Error;

/// Errors while reading or writing dataset files
#[derive(Debug, Error)]
pub enum IoError {
    /// File could not be opened or created
    #[error("Failed to open '{path}': {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Required column absent from the CSV header
    #[error("Missing required column '{column}' (accepted names: {accepted})")]
    MissingColumn { column: &'static str, accepted: String },

    /// A data row could not be parsed
    #[error("CSV parse error on line {line}: {source}")]
    Row {
        line: usize,
        #[source]
        source: csv::Error,
    },

    /// Row width does not match the header
    #[error("Column count mismatch: header has {expected}, row has {actual}")]
    ColumnMismatch { expected: usize, actual: usize },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
