//! Record Types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::HOURS_PER_DAY;

/// One raw input row: a (date, category) pair with untyped hourly cells
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    /// Date as it appeared in the source
    pub date: String,
    /// Charging type
    pub category: String,
    /// Hourly cells indexed by hour of day; `None` when the cell or column is absent
    pub hourly: Vec<Option<String>>,
}

impl RawRecord {
    /// Create a raw record from already-split cells
    pub fn new(
        date: impl Into<String>,
        category: impl Into<String>,
        hourly: Vec<Option<String>>,
    ) -> Self {
        Self {
            date: date.into(),
            category: category.into(),
            hourly,
        }
    }
}

/// Record with a parsed date and numeric hourly usage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyRecord {
    pub date: NaiveDate,
    pub category: String,
    pub hourly: [f64; HOURS_PER_DAY],
}

/// Hourly record plus its daily aggregates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub category: String,
    pub hourly: [f64; HOURS_PER_DAY],
    /// Sum of all 24 hourly values
    pub daily_total: f64,
    /// Share of `daily_total` inside the peak band
    pub peak_ratio: f64,
}
