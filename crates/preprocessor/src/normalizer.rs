//! Type Normalization of Raw Records

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::error::PreprocessError;
use crate::record::{HourlyRecord, RawRecord};
use crate::HOURS_PER_DAY;

/// Date layouts accepted for the date part of a record
const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d", "%Y%m%d"];

/// Parse a record date, discarding any trailing time part
pub fn parse_record_date(value: &str) -> Option<NaiveDate> {
    let date_part = value
        .trim()
        .split(|c: char| c == 'T' || c.is_whitespace())
        .next()?;

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(date_part, fmt).ok())
}

/// Coerce one hourly cell to a number
///
/// Missing, empty, non-numeric and non-finite cells all become 0.
pub fn coerce_hourly_value(cell: Option<&str>) -> f64 {
    cell.and_then(|raw| raw.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Parse dates and coerce hourly cells for every raw record
///
/// Rows are never dropped: the output has exactly one record per input row,
/// in input order. A date that cannot be parsed fails the whole batch.
pub fn preprocess(raw: &[RawRecord]) -> Result<Vec<HourlyRecord>, PreprocessError> {
    let mut coerced_cells = 0usize;
    let mut records = Vec::with_capacity(raw.len());

    for (row, record) in raw.iter().enumerate() {
        let date = parse_record_date(&record.date).ok_or_else(|| PreprocessError::InvalidDate {
            row,
            value: record.date.clone(),
        })?;

        let mut hourly = [0.0; HOURS_PER_DAY];
        for (hour, slot) in hourly.iter_mut().enumerate() {
            let cell = record.hourly.get(hour).and_then(|c| c.as_deref());
            *slot = coerce_hourly_value(cell);

            if *slot == 0.0 && cell.is_some_and(|c| !is_zero_literal(c)) {
                coerced_cells += 1;
            }
        }

        records.push(HourlyRecord {
            date,
            category: record.category.trim().to_string(),
            hourly,
        });
    }

    if coerced_cells > 0 {
        debug!("Coerced {} non-numeric hourly cells to 0", coerced_cells);
    }
    info!("Preprocessed {} records", records.len());

    Ok(records)
}

fn is_zero_literal(cell: &str) -> bool {
    matches!(cell.trim().parse::<f64>(), Ok(v) if v == 0.0)
}
