//! Training Set Construction
//!
//! Slides a lookback window over each charging type's daily series, labels
//! every window with the demand of the following horizon, and merges all
//! charging types into one chronologically ordered training set.

mod assembler;
mod error;
mod row;
mod split;
mod window;

#[cfg(test)]
mod test_support;

pub use assembler::{partition_by_category, AssembledTrainingSet, CategorySummary, TrainingSetAssembler};
pub use error::DatasetError;
pub use row::TrainingRow;
pub use split::{chronological_split, TrainValidationSplit};
pub use window::WindowBuilder;

use feature_engine::{SpectralExtractor, DEFAULT_TOP_K};
use serde::{Deserialize, Serialize};

/// Sliding window parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowParams {
    /// Days of history per window
    pub lookback: usize,
    /// Days ahead summed into the label
    pub horizon: usize,
    /// Dominant spectral components per window
    pub top_k: usize,
}

impl Default for WindowParams {
    fn default() -> Self {
        Self {
            lookback: 28,
            horizon: 7,
            top_k: DEFAULT_TOP_K,
        }
    }
}

impl WindowParams {
    /// Check that every parameter is at least 1
    pub fn validate(&self) -> Result<(), DatasetError> {
        for (name, value) in [
            ("lookback", self.lookback),
            ("horizon", self.horizon),
            ("top_k", self.top_k),
        ] {
            if value == 0 {
                return Err(DatasetError::InvalidWindowParam { name });
            }
        }
        Ok(())
    }

    /// Shortest series that yields one window
    pub fn min_series_len(&self) -> usize {
        self.lookback + self.horizon
    }

    /// Number of windows a series of `len` records yields
    pub fn window_count(&self, len: usize) -> usize {
        (len + 1).saturating_sub(self.min_series_len())
    }

    /// Spectral components actually available for a lookback-length sequence
    pub fn effective_top_k(&self) -> usize {
        self.top_k.min(SpectralExtractor::bin_count(self.lookback))
    }
}
