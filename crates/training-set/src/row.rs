//! Training Row

use chrono::NaiveDate;
use feature_engine::{CalendarFeatures, SpectralFeatures, WindowStatistics};
use serde::{Deserialize, Serialize};

use crate::WindowParams;

/// One supervised sample: features of a lookback window and its horizon label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingRow {
    /// Date of the last record in the lookback window
    pub window_end_date: NaiveDate,
    /// Charging type
    pub category: String,
    /// Sum of `daily_total` over the horizon following the window
    pub label: f64,
    /// Calendar fields of `window_end_date`
    pub calendar: CalendarFeatures,
    /// Mean, std and last value of `daily_total` in the window
    pub stats: WindowStatistics,
    /// Mean `peak_ratio` in the window
    pub peak_ratio_mean: f64,
    /// Spectral features of the window's `daily_total` sequence
    pub spectral: SpectralFeatures,
}

impl TrainingRow {
    /// Column names in output order
    ///
    /// Window-dependent names carry their lengths, e.g. `mean_28d` and `y_next7_total`.
    pub fn column_names(params: &WindowParams) -> Vec<String> {
        let mut names = vec![
            "window_end_date".to_string(),
            "charging_type".to_string(),
            format!("y_next{}_total", params.horizon),
            "month".to_string(),
            "dayofweek".to_string(),
            format!("mean_{}d", params.lookback),
            format!("std_{}d", params.lookback),
            "last_day_usage".to_string(),
            "peak_ratio_mean".to_string(),
        ];
        for j in 0..params.effective_top_k() {
            names.push(format!("fft_amp_{j}"));
            names.push(format!("fft_freq_{j}"));
        }
        names.extend(
            ["total_power", "spectral_entropy", "low_freq_power", "high_freq_power"]
                .into_iter()
                .map(String::from),
        );
        names
    }

    /// Numeric values matching every column after `charging_type`
    pub fn numeric_values(&self) -> Vec<f64> {
        let mut values = vec![
            self.label,
            f64::from(self.calendar.month),
            f64::from(self.calendar.day_of_week),
            self.stats.mean,
            self.stats.std_dev,
            self.stats.last,
            self.peak_ratio_mean,
        ];
        for component in &self.spectral.components {
            values.push(component.amplitude);
            values.push(component.frequency);
        }
        values.extend([
            self.spectral.total_power,
            self.spectral.spectral_entropy,
            self.spectral.low_freq_power,
            self.spectral.high_freq_power,
        ]);
        values
    }
}
