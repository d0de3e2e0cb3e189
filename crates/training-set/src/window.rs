//! Sliding Window Builder

use feature_engine::{CalendarFeatures, SpectralExtractor, WindowStatistics};
use preprocessor::DailyRecord;
use tracing::debug;

use crate::error::DatasetError;
use crate::row::TrainingRow;
use crate::WindowParams;

/// Builds labeled training rows from one charging type's daily series
pub struct WindowBuilder {
    params: WindowParams,
    /// Spectral extractor, owned so each builder has its own FFT planner
    extractor: SpectralExtractor,
}

impl WindowBuilder {
    /// Create a builder for validated window parameters
    pub fn new(params: WindowParams) -> Result<Self, DatasetError> {
        params.validate()?;
        Ok(Self {
            params,
            extractor: SpectralExtractor::new(params.top_k),
        })
    }

    /// Window parameters in use
    pub fn params(&self) -> &WindowParams {
        &self.params
    }

    /// Build one row per valid window end index
    ///
    /// Records are sorted by date first. For end index `i` the features use
    /// records `i - lookback + 1 ..= i` only, and the label sums
    /// `daily_total` over `i + 1 ..= i + horizon`. A series shorter than
    /// `lookback + horizon` yields no rows.
    pub fn build<'a, I>(&mut self, series: I) -> Result<Vec<TrainingRow>, DatasetError>
    where
        I: IntoIterator<Item = &'a DailyRecord>,
    {
        let mut sorted: Vec<&DailyRecord> = series.into_iter().collect();
        sorted.sort_by_key(|record| record.date);

        if let Some(pair) = sorted.windows(2).find(|pair| pair[0].date == pair[1].date) {
            return Err(DatasetError::DuplicateDate {
                category: pair[1].category.clone(),
                date: pair[1].date,
            });
        }

        let WindowParams { lookback, horizon, .. } = self.params;
        let n = sorted.len();
        if n < self.params.min_series_len() {
            debug!(
                "Series of {} records is shorter than lookback {} + horizon {}",
                n, lookback, horizon
            );
            return Ok(Vec::new());
        }

        let mut rows = Vec::with_capacity(self.params.window_count(n));
        for i in (lookback - 1)..(n - horizon) {
            // No record at or after i + 1 may reach the features
            let window = &sorted[i + 1 - lookback..=i];
            let target = &sorted[i + 1..=i + horizon];

            let daily_seq: Vec<f64> = window.iter().map(|r| r.daily_total).collect();
            let peak_ratios: Vec<f64> = window.iter().map(|r| r.peak_ratio).collect();
            let end = sorted[i];

            rows.push(TrainingRow {
                window_end_date: end.date,
                category: end.category.clone(),
                label: target.iter().map(|r| r.daily_total).sum(),
                calendar: CalendarFeatures::from_date(end.date),
                stats: WindowStatistics::compute(&daily_seq),
                peak_ratio_mean: WindowStatistics::compute(&peak_ratios).mean,
                spectral: self.extractor.extract(&daily_seq),
            });
        }

        Ok(rows)
    }
}
