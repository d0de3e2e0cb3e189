//! Training Set Assembly across Charging Types

use std::collections::HashMap;

use preprocessor::DailyRecord;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::DatasetError;
use crate::row::TrainingRow;
use crate::window::WindowBuilder;
use crate::WindowParams;

/// Per-category outcome of the windowing stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub category: String,
    /// Daily records in the category
    pub records: usize,
    /// Training rows generated
    pub windows: usize,
}

/// Merged training rows plus per-category counts
#[derive(Debug, Clone, PartialEq)]
pub struct AssembledTrainingSet {
    /// Rows sorted by (window end date, category)
    pub rows: Vec<TrainingRow>,
    /// Categories in order of first appearance in the input
    pub categories: Vec<CategorySummary>,
}

/// Group records by category, keeping the order in which categories first appear
pub fn partition_by_category(records: &[DailyRecord]) -> Vec<(String, Vec<&DailyRecord>)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut partitions: Vec<(String, Vec<&DailyRecord>)> = Vec::new();

    for record in records {
        let slot = *index.entry(record.category.as_str()).or_insert_with(|| {
            partitions.push((record.category.clone(), Vec::new()));
            partitions.len() - 1
        });
        partitions[slot].1.push(record);
    }

    partitions
}

/// Runs the window builder per category and merges the results
pub struct TrainingSetAssembler {
    params: WindowParams,
    /// Build categories on the rayon pool instead of one after another
    parallel: bool,
}

impl TrainingSetAssembler {
    /// Create an assembler for validated window parameters
    pub fn new(params: WindowParams, parallel: bool) -> Result<Self, DatasetError> {
        params.validate()?;
        Ok(Self { params, parallel })
    }

    /// Build, merge and chronologically order the training rows of all categories
    pub fn assemble(&self, records: &[DailyRecord]) -> Result<AssembledTrainingSet, DatasetError> {
        let partitions = partition_by_category(records);
        info!(
            "Assembling training set: {} records, {} categories, lookback={}, horizon={}",
            records.len(),
            partitions.len(),
            self.params.lookback,
            self.params.horizon
        );

        // Each task owns its builder; results are joined before sorting
        let built: Vec<(CategorySummary, Vec<TrainingRow>)> = if self.parallel {
            partitions
                .into_par_iter()
                .map(|(category, series)| self.build_category(category, series))
                .collect::<Result<Vec<_>, _>>()?
        } else {
            partitions
                .into_iter()
                .map(|(category, series)| self.build_category(category, series))
                .collect::<Result<Vec<_>, _>>()?
        };

        let mut categories = Vec::with_capacity(built.len());
        let mut rows = Vec::with_capacity(built.iter().map(|(s, _)| s.windows).sum());
        for (summary, category_rows) in built {
            info!("Windows generated for {}: {}", summary.category, summary.windows);
            categories.push(summary);
            rows.extend(category_rows);
        }

        // Global (date, category) order across all categories
        rows.sort_by(|a, b| {
            a.window_end_date
                .cmp(&b.window_end_date)
                .then_with(|| a.category.cmp(&b.category))
        });

        info!("Training set assembled: {} rows", rows.len());
        Ok(AssembledTrainingSet { rows, categories })
    }

    fn build_category(
        &self,
        category: String,
        series: Vec<&DailyRecord>,
    ) -> Result<(CategorySummary, Vec<TrainingRow>), DatasetError> {
        let mut builder = WindowBuilder::new(self.params)?;
        let rows = builder.build(series.iter().copied())?;
        let summary = CategorySummary {
            category,
            records: series.len(),
            windows: rows.len(),
        };
        Ok((summary, rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::daily_series;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn mixed_records() -> Vec<DailyRecord> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let fast: Vec<f64> = (0..50).map(|i| 100.0 + (i % 7) as f64 * 10.0).collect();
        let slow: Vec<f64> = (0..42).map(|i| 30.0 + (i % 3) as f64).collect();
        let tiny = [1.0; 10];

        let mut records = daily_series("완속", start + chrono::Duration::days(5), &slow);
        records.extend(daily_series("급속", start, &fast));
        records.extend(daily_series("기타", start, &tiny));
        // Interleave categories like a real export would
        records.sort_by_key(|r| (r.date, r.category.clone()));
        records.reverse();
        records
    }

    #[test]
    fn test_partition_preserves_first_appearance() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let mut records = daily_series("b", start, &[1.0; 3]);
        records.extend(daily_series("a", start, &[1.0; 2]));
        records.push(daily_series("b", start + chrono::Duration::days(10), &[1.0])[0].clone());

        let partitions = partition_by_category(&records);
        assert_eq!(partitions.len(), 2);
        assert_eq!(partitions[0].0, "b");
        assert_eq!(partitions[0].1.len(), 4);
        assert_eq!(partitions[1].0, "a");
        assert_eq!(partitions[1].1.len(), 2);
    }

    #[test]
    fn test_assemble_counts_and_order() {
        let records = mixed_records();
        let assembler = TrainingSetAssembler::new(WindowParams::default(), false).unwrap();
        let set = assembler.assemble(&records).unwrap();

        let count = |name: &str| {
            set.categories
                .iter()
                .find(|s| s.category == name)
                .map(|s| (s.records, s.windows))
        };
        assert_eq!(count("급속"), Some((50, 16)));
        assert_eq!(count("완속"), Some((42, 8)));
        assert_eq!(count("기타"), Some((10, 0)));
        assert_eq!(set.rows.len(), 24);

        for pair in set.rows.windows(2) {
            let a = (pair[0].window_end_date, pair[0].category.as_str());
            let b = (pair[1].window_end_date, pair[1].category.as_str());
            assert!(a < b, "rows out of order or duplicated: {:?} then {:?}", a, b);
        }
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let records = mixed_records();
        let sequential = TrainingSetAssembler::new(WindowParams::default(), false)
            .unwrap()
            .assemble(&records)
            .unwrap();
        let parallel = TrainingSetAssembler::new(WindowParams::default(), true)
            .unwrap()
            .assemble(&records)
            .unwrap();
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_duplicate_in_one_category_fails() {
        let mut records = mixed_records();
        let duplicate = records
            .iter()
            .find(|r| r.category == "완속")
            .cloned()
            .unwrap();
        records.push(duplicate);

        let assembler = TrainingSetAssembler::new(WindowParams::default(), true).unwrap();
        assert!(matches!(
            assembler.assemble(&records),
            Err(DatasetError::DuplicateDate { .. })
        ));
    }

    #[test]
    fn test_empty_input() {
        let assembler = TrainingSetAssembler::new(WindowParams::default(), true).unwrap();
        let set = assembler.assemble(&[]).unwrap();
        assert!(set.rows.is_empty());
        assert!(set.categories.is_empty());
    }

    proptest! {
        #[test]
        fn assembled_rows_are_strictly_ordered(
            lengths in prop::collection::vec(0usize..60, 1..5),
            offsets in prop::collection::vec(0i64..20, 5),
        ) {
            let start = NaiveDate::from_ymd_opt(2023, 11, 1).unwrap();
            let mut records = Vec::new();
            for (idx, len) in lengths.iter().enumerate() {
                let totals: Vec<f64> = (0..*len).map(|i| ((i * 7 + idx) % 13) as f64).collect();
                let first = start + chrono::Duration::days(offsets[idx]);
                records.extend(daily_series(&format!("type-{idx}"), first, &totals));
            }

            let params = WindowParams::default();
            let set = TrainingSetAssembler::new(params, true).unwrap().assemble(&records).unwrap();
            let expected: usize = lengths.iter().map(|&len| params.window_count(len)).sum();
            prop_assert_eq!(set.rows.len(), expected);
            for pair in set.rows.windows(2) {
                prop_assert!(
                    (pair[0].window_end_date, &pair[0].category)
                        < (pair[1].window_end_date, &pair[1].category)
                );
            }
        }
    }
}
