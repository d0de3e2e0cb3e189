//! CSV Ingest of Raw Hourly Records
//!
//! Resolves the date, charging type and hour columns from the header and
//! reads every data row as a `RawRecord`. Cell values are left untyped; the
//! preprocessor owns coercion. Missing hour columns are tolerated and read as
//! empty cells, missing date or charging type columns are not.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use preprocessor::{RawRecord, HOURS_PER_DAY};
use tracing::{info, warn};

use crate::error::IoError;

const DATE_COLUMNS: [&str; 3] = ["일자", "date", "day"];
const CATEGORY_COLUMNS: [&str; 4] = ["충전방식", "charging_type", "category", "type"];

/// Raw records plus what the header resolution found
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub records: Vec<RawRecord>,
    /// Hours with no matching column in the header
    pub missing_hours: Vec<usize>,
}

/// Open a CSV file and read its raw records
pub fn load_raw_records(path: &Path) -> Result<RawTable, IoError> {
    let file = File::open(path).map_err(|source| IoError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let table = read_raw_records(file)?;
    info!("Loaded {} raw records from {}", table.records.len(), path.display());
    Ok(table)
}

/// Read raw records from any CSV source with a header row
pub fn read_raw_records<R: Read>(reader: R) -> Result<RawTable, IoError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let header_map = build_header_map(&headers);

    let date_idx = resolve_column(&header_map, "date", &DATE_COLUMNS)?;
    let category_idx = resolve_column(&header_map, "charging_type", &CATEGORY_COLUMNS)?;

    let hour_idx: Vec<Option<usize>> = (0..HOURS_PER_DAY)
        .map(|hour| {
            hour_aliases(hour)
                .iter()
                .find_map(|alias| header_map.get(alias).copied())
        })
        .collect();
    let missing_hours: Vec<usize> = hour_idx
        .iter()
        .enumerate()
        .filter_map(|(hour, idx)| idx.is_none().then_some(hour))
        .collect();
    if !missing_hours.is_empty() {
        warn!("No column for hours {:?}; treating them as zero usage", missing_hours);
    }

    let mut records = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        // records() starts after the header, and CSV lines are 1-based
        let line = idx + 2;
        let record = result.map_err(|source| IoError::Row { line, source })?;

        let cell = |i: usize| record.get(i).map(str::to_string);
        records.push(RawRecord {
            date: cell(date_idx).unwrap_or_default(),
            category: cell(category_idx).unwrap_or_default(),
            hourly: hour_idx.iter().map(|i| i.and_then(cell)).collect(),
        });
    }

    Ok(RawTable {
        records,
        missing_hours,
    })
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    let mut map = HashMap::new();
    for (idx, name) in headers.iter().enumerate() {
        // First occurrence wins for duplicated headers
        map.entry(normalize_header_name(name)).or_insert(idx);
    }
    map
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports often prefix the first header with a UTF-8 BOM
    name.trim().trim_start_matches('\u{feff}').trim().to_lowercase()
}

fn resolve_column(
    header_map: &HashMap<String, usize>,
    column: &'static str,
    aliases: &[&str],
) -> Result<usize, IoError> {
    aliases
        .iter()
        .find_map(|alias| header_map.get(*alias).copied())
        .ok_or_else(|| IoError::MissingColumn {
            column,
            accepted: aliases.join(", "),
        })
}

fn hour_aliases(hour: usize) -> [String; 6] {
    [
        format!("{hour}시"),
        format!("{hour:02}시"),
        format!("{hour}"),
        format!("{hour:02}"),
        format!("h{hour}"),
        format!("hour_{hour}"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn korean_header() -> String {
        let hours: Vec<String> = (0..24).map(|h| format!("{h}시")).collect();
        format!("\u{feff}일자,충전방식,{}\n", hours.join(","))
    }

    #[test]
    fn test_reads_korean_headers() {
        let values: Vec<String> = (0..24).map(|h| h.to_string()).collect();
        let csv = format!(
            "{}2024-01-01,급속,{}\n2024-01-02,완속,{}\n",
            korean_header(),
            values.join(","),
            values.join(",")
        );

        let table = read_raw_records(csv.as_bytes()).unwrap();
        assert!(table.missing_hours.is_empty());
        assert_eq!(table.records.len(), 2);
        assert_eq!(table.records[0].date, "2024-01-01");
        assert_eq!(table.records[1].category, "완속");
        assert_eq!(table.records[0].hourly.len(), 24);
        assert_eq!(table.records[0].hourly[23].as_deref(), Some("23"));
    }

    #[test]
    fn test_reads_english_headers_in_any_order() {
        let csv = "h3,Category,DATE,h0\n7,fast,2024-02-01,1\n";
        let table = read_raw_records(csv.as_bytes()).unwrap();

        let record = &table.records[0];
        assert_eq!(record.date, "2024-02-01");
        assert_eq!(record.category, "fast");
        assert_eq!(record.hourly[0].as_deref(), Some("1"));
        assert_eq!(record.hourly[3].as_deref(), Some("7"));
        assert_eq!(record.hourly[1], None);
        assert_eq!(table.missing_hours.len(), 22);
    }

    #[test]
    fn test_short_rows_read_as_missing_cells() {
        let csv = format!("{}2024-01-01,급속,5,6\n", korean_header());
        let table = read_raw_records(csv.as_bytes()).unwrap();
        let record = &table.records[0];
        assert_eq!(record.hourly[1].as_deref(), Some("6"));
        assert_eq!(record.hourly[2], None);
    }

    #[test]
    fn test_missing_date_column() {
        let csv = "charging_type,0,1\nfast,1,2\n";
        let err = read_raw_records(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, IoError::MissingColumn { column: "date", .. }));
    }

    #[test]
    fn test_missing_category_column() {
        let csv = "date,0,1\n2024-01-01,1,2\n";
        let err = read_raw_records(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, IoError::MissingColumn { column: "charging_type", .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = load_raw_records(Path::new("/nonexistent/charging.csv")).unwrap_err();
        assert!(matches!(err, IoError::Open { .. }));
    }
}
