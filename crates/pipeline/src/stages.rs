//! Pipeline stages shared by the `build` and `inspect` commands.
//!
//! ingest -> preprocess -> daily features -> per-category windows ->
//! global ordering -> chronological split -> export

use std::path::{Path, PathBuf};

use anyhow::Context;
use dataset_io::{
    create_output, load_raw_records, write_daily_records, write_run_metadata, write_training_rows,
    RunMetadata,
};
use preprocessor::{add_daily_features, preprocess, DailyRecord, RawRecord};
use tracing::info;
use training_set::{
    chronological_split, partition_by_category, CategorySummary, TrainValidationSplit, TrainingRow,
    TrainingSetAssembler,
};

use crate::config::PipelineConfig;

pub const DAILY_RECORDS_FILE: &str = "daily_records.csv";
pub const TRAINING_SET_FILE: &str = "training_set.csv";
pub const TRAIN_FILE: &str = "train.csv";
pub const VALIDATION_FILE: &str = "validation.csv";
pub const METADATA_FILE: &str = "metadata.json";

/// In-memory results of every stage
#[derive(Debug, Clone)]
pub struct StageOutput {
    pub daily: Vec<DailyRecord>,
    pub categories: Vec<CategorySummary>,
    pub split: TrainValidationSplit,
}

impl StageOutput {
    /// All training rows in global order
    pub fn training_rows(&self) -> impl Iterator<Item = &TrainingRow> {
        self.split.train.iter().chain(&self.split.validation)
    }
}

/// Summary of a finished `build`
#[derive(Debug, Clone)]
pub struct BuildOutput {
    pub training_rows: usize,
    pub train_rows: usize,
    pub validation_rows: usize,
    pub files: Vec<PathBuf>,
}

/// Run preprocessing, windowing, assembly and the split on raw records
pub fn run_stages(raw: &[RawRecord], config: &PipelineConfig) -> anyhow::Result<StageOutput> {
    let hourly = preprocess(raw)?;
    let daily = add_daily_features(hourly, &config.peak_band)?;

    let assembler = TrainingSetAssembler::new(config.window, config.parallel)?;
    let assembled = assembler.assemble(&daily)?;
    let split = chronological_split(assembled.rows, config.validation_fraction)?;

    Ok(StageOutput {
        daily,
        categories: assembled.categories,
        split,
    })
}

/// Build the training set from a CSV file and write every output
pub fn run_build(input: &Path, config: &PipelineConfig) -> anyhow::Result<BuildOutput> {
    let table = load_raw_records(input)?;
    let output = run_stages(&table.records, config)?;

    config
        .paths
        .ensure_output_dirs()
        .context("Failed to create output directories")?;

    let daily_path = config.paths.interim_file(DAILY_RECORDS_FILE);
    write_daily_records(create_output(&daily_path)?, &output.daily)?;

    let all_path = config.paths.processed_file(TRAINING_SET_FILE);
    let training_rows = write_training_rows(create_output(&all_path)?, output.training_rows(), &config.window)?;

    let train_path = config.paths.processed_file(TRAIN_FILE);
    let train_rows = write_training_rows(create_output(&train_path)?, &output.split.train, &config.window)?;

    let validation_path = config.paths.processed_file(VALIDATION_FILE);
    let validation_rows =
        write_training_rows(create_output(&validation_path)?, &output.split.validation, &config.window)?;

    let metadata = RunMetadata {
        generated_at: RunMetadata::timestamp_now(),
        input: input.display().to_string(),
        window: config.window,
        peak_band: config.peak_band,
        records_read: table.records.len(),
        categories: output.categories.clone(),
        training_rows,
        train_rows,
        validation_rows,
        validation_fraction: config.validation_fraction,
        validation_cutoff: output.split.cutoff,
        feature_columns: TrainingRow::column_names(&config.window),
    };
    let metadata_path = config.paths.processed_file(METADATA_FILE);
    write_run_metadata(create_output(&metadata_path)?, &metadata)?;

    let files = vec![daily_path, all_path, train_path, validation_path, metadata_path];
    for file in &files {
        info!("Wrote {}", file.display());
    }

    Ok(BuildOutput {
        training_rows,
        train_rows,
        validation_rows,
        files,
    })
}

/// Count records and prospective windows per category without building features
pub fn run_inspect(input: &Path, config: &PipelineConfig) -> anyhow::Result<Vec<CategorySummary>> {
    let table = load_raw_records(input)?;
    let daily = add_daily_features(preprocess(&table.records)?, &config.peak_band)?;

    let summaries = partition_by_category(&daily)
        .into_iter()
        .map(|(category, series)| CategorySummary {
            windows: config.window.window_count(series.len()),
            records: series.len(),
            category,
        })
        .collect();

    Ok(summaries)
}
