//! Dataset Error Types

use chrono::NaiveDate;
use thiserror::Error;

/// Errors while building or splitting a training set
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DatasetError {
    /// Window parameter must be at least 1
    #[error("Invalid window parameter {name}: must be at least 1")]
    InvalidWindowParam { name: &'static str },

    /// Same charging type reported twice for one date
    #[error("Duplicate record for category '{category}' on {date}")]
    DuplicateDate { category: String, date: NaiveDate },

    /// Validation fraction outside [0, 1)
    #[error("Validation fraction {0} is outside [0, 1)")]
    InvalidValidationFraction(f64),
}
