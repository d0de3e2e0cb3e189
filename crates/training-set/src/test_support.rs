//! Shared fixtures for unit tests

use chrono::{Duration, NaiveDate};
use preprocessor::{add_daily_features, DailyRecord, HourlyRecord, PeakBand, HOURS_PER_DAY};

/// Consecutive daily records starting at `start`, one per total
///
/// Each day's usage sits in a single hour, alternating between a peak and an
/// off-peak hour, so `daily_total` equals the given total exactly.
pub(crate) fn daily_series(category: &str, start: NaiveDate, totals: &[f64]) -> Vec<DailyRecord> {
    let hourly = totals
        .iter()
        .enumerate()
        .map(|(day, &total)| {
            let mut hourly = [0.0; HOURS_PER_DAY];
            hourly[if day % 2 == 0 { 12 } else { 2 }] = total;
            HourlyRecord {
                date: start + Duration::days(day as i64),
                category: category.to_string(),
                hourly,
            }
        })
        .collect();

    add_daily_features(hourly, &PeakBand::default()).expect("default peak band is valid")
}
