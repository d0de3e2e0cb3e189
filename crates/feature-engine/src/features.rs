//! Calendar Features

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Calendar fields of a window end date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarFeatures {
    /// Month (1-12)
    pub month: u32,
    /// Day of week (0=Monday, 6=Sunday)
    pub day_of_week: u32,
}

impl CalendarFeatures {
    /// Extract calendar fields from a date
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            month: date.month(),
            day_of_week: date.weekday().num_days_from_monday(),
        }
    }
}
