//! Window Statistics

use serde::{Deserialize, Serialize};

/// Summary statistics of one lookback window
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WindowStatistics {
    /// Mean value
    pub mean: f64,
    /// Population standard deviation
    pub std_dev: f64,
    /// Most recent value in the window
    pub last: f64,
}

impl WindowStatistics {
    /// Compute statistics from a slice of values ordered oldest to newest
    pub fn compute(values: &[f64]) -> Self {
        let Some(&last) = values.last() else {
            return Self::default();
        };

        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;

        let m2: f64 = values.iter().map(|v| (v - mean) * (v - mean)).sum();
        let std_dev = (m2 / n).sqrt();

        Self { mean, std_dev, last }
    }
}
