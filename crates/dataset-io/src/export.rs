//! CSV Export of Daily Records and Training Rows

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use preprocessor::{DailyRecord, HOURS_PER_DAY};
use training_set::{TrainingRow, WindowParams};
use tracing::debug;

use crate::error::IoError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Create (or truncate) an output file behind a buffered writer
pub fn create_output(path: &Path) -> Result<BufWriter<File>, IoError> {
    let file = File::create(path).map_err(|source| IoError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufWriter::new(file))
}

/// Write daily records as the interim dataset
///
/// Hour columns are named `0`..`23` so the file can be fed back to ingest.
pub fn write_daily_records<W: Write>(writer: W, records: &[DailyRecord]) -> Result<(), IoError> {
    let mut csv = csv::Writer::from_writer(writer);

    let mut header = vec!["date".to_string(), "charging_type".to_string()];
    header.extend((0..HOURS_PER_DAY).map(|h| h.to_string()));
    header.extend(["daily_total".to_string(), "peak_ratio".to_string()]);
    csv.write_record(&header)?;

    for record in records {
        let mut fields = Vec::with_capacity(header.len());
        fields.push(record.date.format(DATE_FORMAT).to_string());
        fields.push(record.category.clone());
        fields.extend(record.hourly.iter().map(f64::to_string));
        fields.push(record.daily_total.to_string());
        fields.push(record.peak_ratio.to_string());
        csv.write_record(&fields)?;
    }

    csv.flush()?;
    debug!("Wrote {} daily records", records.len());
    Ok(())
}

/// Write training rows with one column per feature
pub fn write_training_rows<'a, W, I>(writer: W, rows: I, params: &WindowParams) -> Result<usize, IoError>
where
    W: Write,
    I: IntoIterator<Item = &'a TrainingRow>,
{
    let mut csv = csv::Writer::from_writer(writer);

    let header = TrainingRow::column_names(params);
    csv.write_record(&header)?;

    let mut written = 0usize;
    for row in rows {
        let values = row.numeric_values();
        let width = values.len() + 2;
        if width != header.len() {
            return Err(IoError::ColumnMismatch {
                expected: header.len(),
                actual: width,
            });
        }

        let mut fields = Vec::with_capacity(width);
        fields.push(row.window_end_date.format(DATE_FORMAT).to_string());
        fields.push(row.category.clone());
        fields.extend(values.iter().map(f64::to_string));
        csv.write_record(&fields)?;
        written += 1;
    }

    csv.flush()?;
    debug!("Wrote {} training rows", written);
    Ok(written)
}
