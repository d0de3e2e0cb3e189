//! Chronological Train/Validation Split

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::error::DatasetError;
use crate::row::TrainingRow;

/// Training rows divided at a date boundary
#[derive(Debug, Clone, PartialEq)]
pub struct TrainValidationSplit {
    pub train: Vec<TrainingRow>,
    pub validation: Vec<TrainingRow>,
    /// First window end date of the validation set, if it is non-empty
    pub cutoff: Option<NaiveDate>,
}

/// Split rows so every validation row is dated after every train row
///
/// The last `ceil(dates * validation_fraction)` distinct window end dates go
/// to validation. At least one date always stays in train, so a set with a
/// single distinct date is never moved to validation entirely.
pub fn chronological_split(
    rows: Vec<TrainingRow>,
    validation_fraction: f64,
) -> Result<TrainValidationSplit, DatasetError> {
    if !(0.0..1.0).contains(&validation_fraction) {
        return Err(DatasetError::InvalidValidationFraction(validation_fraction));
    }

    let mut dates: Vec<NaiveDate> = rows.iter().map(|r| r.window_end_date).collect();
    dates.sort_unstable();
    dates.dedup();

    let wanted = (dates.len() as f64 * validation_fraction).ceil() as usize;
    let validation_dates = wanted.min(dates.len().saturating_sub(1));
    if validation_dates == 0 {
        if validation_fraction > 0.0 && !rows.is_empty() {
            warn!("Too few distinct dates for a validation set; all {} rows kept for training", rows.len());
        }
        return Ok(TrainValidationSplit {
            train: rows,
            validation: Vec::new(),
            cutoff: None,
        });
    }

    let cutoff = dates[dates.len() - validation_dates];
    let (train, validation): (Vec<_>, Vec<_>) =
        rows.into_iter().partition(|r| r.window_end_date < cutoff);

    info!(
        "Chronological split at {}: {} train rows, {} validation rows",
        cutoff,
        train.len(),
        validation.len()
    );

    Ok(TrainValidationSplit {
        train,
        validation,
        cutoff: Some(cutoff),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::daily_series;
    use crate::{TrainingSetAssembler, WindowParams};
    use proptest::prelude::*;

    fn assembled(lengths: &[usize]) -> Vec<TrainingRow> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let mut records = Vec::new();
        for (idx, len) in lengths.iter().enumerate() {
            let totals: Vec<f64> = (0..*len).map(|i| (i % 9) as f64 + idx as f64).collect();
            records.extend(daily_series(&format!("type-{idx}"), start, &totals));
        }
        TrainingSetAssembler::new(WindowParams::default(), false)
            .unwrap()
            .assemble(&records)
            .unwrap()
            .rows
    }

    #[test]
    fn test_split_by_date_fraction() {
        // 44 records per category give 10 window end dates shared by both categories
        let rows = assembled(&[44, 44]);
        assert_eq!(rows.len(), 20);

        let split = chronological_split(rows, 0.2).unwrap();
        assert_eq!(split.train.len(), 16);
        assert_eq!(split.validation.len(), 4);
        assert_eq!(split.cutoff, Some(NaiveDate::from_ymd_opt(2024, 2, 5).unwrap()));
    }

    #[test]
    fn test_zero_fraction_keeps_everything() {
        let rows = assembled(&[40]);
        let total = rows.len();
        let split = chronological_split(rows, 0.0).unwrap();
        assert_eq!(split.train.len(), total);
        assert!(split.validation.is_empty());
        assert_eq!(split.cutoff, None);
    }

    #[test]
    fn test_single_date_stays_in_train() {
        let rows = assembled(&[35, 35]);
        let split = chronological_split(rows, 0.5).unwrap();
        assert_eq!(split.train.len(), 2);
        assert!(split.validation.is_empty());
    }

    #[test]
    fn test_invalid_fraction() {
        for fraction in [-0.1, 1.0, 1.5, f64::NAN] {
            assert!(matches!(
                chronological_split(Vec::new(), fraction),
                Err(DatasetError::InvalidValidationFraction(_))
            ));
        }
    }

    proptest! {
        #[test]
        fn no_date_in_both_partitions(
            lengths in prop::collection::vec(35usize..70, 1..4),
            fraction in 0.0f64..0.9,
        ) {
            let rows = assembled(&lengths);
            let total = rows.len();
            let split = chronological_split(rows, fraction).unwrap();

            prop_assert_eq!(split.train.len() + split.validation.len(), total);
            if let (Some(last_train), Some(first_val)) = (split.train.last(), split.validation.first()) {
                prop_assert!(last_train.window_end_date < first_val.window_end_date);
            }
        }
    }
}
