//! Data Directory Layout

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::IoError;

/// Directory layout for raw, interim and processed data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataPaths {
    /// Source exports
    pub raw_dir: PathBuf,
    /// Preprocessed daily records
    pub interim_dir: PathBuf,
    /// Training sets and run metadata
    pub processed_dir: PathBuf,
}

impl Default for DataPaths {
    fn default() -> Self {
        Self::under("data")
    }
}

impl DataPaths {
    /// Standard `raw/`, `interim/` and `processed/` layout under `root`
    pub fn under(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            raw_dir: root.join("raw"),
            interim_dir: root.join("interim"),
            processed_dir: root.join("processed"),
        }
    }

    pub fn raw_file(&self, name: &str) -> PathBuf {
        self.raw_dir.join(name)
    }

    pub fn interim_file(&self, name: &str) -> PathBuf {
        self.interim_dir.join(name)
    }

    pub fn processed_file(&self, name: &str) -> PathBuf {
        self.processed_dir.join(name)
    }

    /// Create the interim and processed directories
    pub fn ensure_output_dirs(&self) -> Result<(), IoError> {
        ensure_dir(&self.interim_dir)?;
        ensure_dir(&self.processed_dir)?;
        Ok(())
    }
}

/// Create a directory and its parents if missing
pub fn ensure_dir(path: &Path) -> Result<PathBuf, IoError> {
    fs::create_dir_all(path).map_err(|source| IoError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(path.to_path_buf())
}
