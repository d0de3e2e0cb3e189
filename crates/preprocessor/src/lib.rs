//! Record Preprocessing
//!
//! Turns raw per-hour charging records into typed hourly records and adds
//! the daily aggregate features used by the windowing stage.

mod daily;
mod error;
mod normalizer;
mod record;

pub use daily::{add_daily_features, PeakBand, PEAK_RATIO_EPSILON};
pub use error::PreprocessError;
pub use normalizer::{coerce_hourly_value, parse_record_date, preprocess};
pub use record::{DailyRecord, HourlyRecord, RawRecord};

/// Number of hourly usage columns per record
pub const HOURS_PER_DAY: usize = 24;
