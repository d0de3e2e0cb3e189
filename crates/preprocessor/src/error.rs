//! Preprocessing Error Types

use thiserror::Error;

/// Errors during record preprocessing
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PreprocessError {
    /// Date field could not be parsed; `row` is the zero-based input index
    #[error("Record #{row}: unparseable date '{value}'")]
    InvalidDate { row: usize, value: String },

    /// Peak band outside the hours of a day or empty
    #[error("Invalid peak band [{start}, {end}): expected start < end <= 24")]
    InvalidPeakBand { start: usize, end: usize },
}
