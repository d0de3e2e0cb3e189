//! Daily Aggregate Features

use serde::{Deserialize, Serialize};
use std::ops::Range;
use tracing::debug;

use crate::error::PreprocessError;
use crate::record::{DailyRecord, HourlyRecord};
use crate::HOURS_PER_DAY;

/// Added to the peak ratio denominator so zero-usage days stay finite
pub const PEAK_RATIO_EPSILON: f64 = 1e-9;

/// Peak-demand hours as a half-open range `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeakBand {
    /// First peak hour (inclusive)
    pub start: usize,
    /// Hour after the last peak hour (exclusive)
    pub end: usize,
}

impl Default for PeakBand {
    fn default() -> Self {
        Self { start: 8, end: 20 }
    }
}

impl PeakBand {
    /// Create a validated peak band
    pub fn new(start: usize, end: usize) -> Result<Self, PreprocessError> {
        let band = Self { start, end };
        band.validate()?;
        Ok(band)
    }

    /// Check that the band is non-empty and inside one day
    pub fn validate(&self) -> Result<(), PreprocessError> {
        if self.start < self.end && self.end <= HOURS_PER_DAY {
            Ok(())
        } else {
            Err(PreprocessError::InvalidPeakBand {
                start: self.start,
                end: self.end,
            })
        }
    }

    /// Hour indices covered by the band
    pub fn hours(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Add `daily_total` and `peak_ratio` to each record
pub fn add_daily_features(
    records: Vec<HourlyRecord>,
    band: &PeakBand,
) -> Result<Vec<DailyRecord>, PreprocessError> {
    band.validate()?;

    let mut zero_days = 0usize;
    let daily: Vec<DailyRecord> = records
        .into_iter()
        .map(|record| {
            let daily_total: f64 = record.hourly.iter().sum();
            let peak_total: f64 = record.hourly[band.hours()].iter().sum();
            if daily_total == 0.0 {
                zero_days += 1;
            }

            DailyRecord {
                date: record.date,
                category: record.category,
                hourly: record.hourly,
                daily_total,
                peak_ratio: peak_total / (daily_total + PEAK_RATIO_EPSILON),
            }
        })
        .collect();

    debug!(
        "Daily features for {} records (peak hours {}..{}, {} zero-usage days)",
        daily.len(),
        band.start,
        band.end,
        zero_days
    );

    Ok(daily)
}
