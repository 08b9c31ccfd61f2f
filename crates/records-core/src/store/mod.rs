//! The record store: owns the data file and keeps the index in step with it.
//!
//! Every mutation (initialize, add, remove) finishes by rebuilding the index
//! from the data file. Nothing is cached between calls; each operation starts
//! from what is on disk.

mod builder;

pub use builder::RecordStoreBuilder;

use crate::config::{PathsConfig, StoreConfig};
use crate::error::{Result, StoreError};
use crate::fs::{append_line, atomic_write_lines, file_exists, read_lines};
use crate::index::IndexBuilder;
use crate::record::Record;
use crate::search;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Flat-file record store with a derived name index.
pub struct RecordStore {
    config: StoreConfig,
    seed: Vec<Record>,
    index: IndexBuilder,
}

impl RecordStore {
    /// Create a store over the given files, seeding with the default records.
    pub fn new(config: StoreConfig) -> Self {
        Self::with_seed(config, Record::seed())
    }

    pub(crate) fn with_seed(config: StoreConfig, seed: Vec<Record>) -> Self {
        let index = IndexBuilder::new(&config.data_path, &config.index_path);
        Self {
            config,
            seed,
            index,
        }
    }

    /// Create a builder rooted at `dir`.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let store = RecordStore::builder("./db")
    ///     .remove_match(RemoveMatch::Substring)
    ///     .build();
    /// store.initialize().await?;
    /// ```
    pub fn builder(dir: impl Into<PathBuf>) -> RecordStoreBuilder {
        RecordStoreBuilder::new(dir)
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn data_path(&self) -> &Path {
        &self.config.data_path
    }

    pub fn index_path(&self) -> &Path {
        self.index.index_path()
    }

    /// Create the data file with the seed records if it doesn't exist, then
    /// rebuild the index.
    ///
    /// Returns true if the seed was written.
    pub async fn initialize(&self) -> Result<bool> {
        let seeded = if file_exists(self.data_path()).await? {
            debug!("Data file {} exists, not seeding", self.data_path().display());
            false
        } else {
            let lines: Vec<String> = self.seed.iter().map(Record::to_line).collect();
            atomic_write_lines(self.data_path(), &lines).await?;
            info!(
                "Created {} with {} seed records",
                self.data_path().display(),
                lines.len()
            );
            true
        };

        self.index.rebuild().await?;
        Ok(seeded)
    }

    /// Validate and append a record, then rebuild the index.
    ///
    /// Ids are not checked for uniqueness.
    pub async fn add(&self, id: i64, name: &str, age: i64) -> Result<Record> {
        let record = Record::new(id, name, age).inspect_err(|e| {
            warn!("Rejected record ({}, {:?}, {}): {}", id, name, age, e);
        })?;

        if record.name.contains(PathsConfig::FIELD_DELIMITER) {
            warn!(
                "Name {:?} contains the field delimiter; the stored line will not parse back",
                record.name
            );
        }

        append_line(self.data_path(), &record.to_line()).await?;
        self.index.rebuild().await?;

        info!("Added record {}", record);
        Ok(record)
    }

    /// Remove every record matching `name` under the configured match mode.
    ///
    /// Returns the number of removed lines. When nothing matches, neither file
    /// is rewritten.
    pub async fn remove(&self, name: &str) -> Result<usize> {
        if name.trim().is_empty() {
            return Err(StoreError::validation("name", "must not be empty"));
        }

        let Some(lines) = self.read_if_indexed().await? else {
            warn!("Remove of {:?} skipped: data or index file missing", name);
            return Err(self.missing_files());
        };

        let original = lines.len();
        let mode = self.config.remove_match;
        let kept: Vec<String> = lines
            .into_iter()
            .filter(|line| !mode.matches(line, name))
            .collect();

        if kept.len() == original {
            debug!("No records matched {:?} ({:?})", name, mode);
            return Err(StoreError::RecordNotFound {
                name: name.to_string(),
            });
        }

        atomic_write_lines(self.data_path(), &kept).await?;
        self.index.rebuild().await?;

        let removed = original - kept.len();
        info!("Removed {} record(s) named {:?}", removed, name);
        Ok(removed)
    }

    /// Every line of the data file, in stored order.
    pub async fn read_all(&self) -> Result<Vec<String>> {
        read_lines(self.data_path())
            .await?
            .ok_or_else(|| StoreError::DataFileNotFound(self.config.data_path.clone()))
    }

    /// The data file parsed into records; unparsable lines are skipped.
    pub async fn records(&self) -> Result<Vec<Record>> {
        let lines = self.read_all().await?;
        let mut records = Vec::with_capacity(lines.len());
        for (n, line) in lines.iter().enumerate() {
            match Record::parse_line(line) {
                Some(record) => records.push(record),
                None => warn!("Skipping unparsable data line {}: {:?}", n + 1, line),
            }
        }
        Ok(records)
    }

    /// Look up records by exact name through the index.
    ///
    /// Returns the matching data lines in index order.
    pub async fn search(&self, name: &str) -> Result<Vec<String>> {
        search::find_by_name(self.data_path(), self.index_path(), name).await
    }

    /// Regenerate the index from the data file.
    pub async fn rebuild_index(&self) -> Result<usize> {
        self.index.rebuild().await
    }

    /// True when the index file matches the current data file.
    pub async fn index_is_current(&self) -> Result<bool> {
        self.index.is_current().await
    }

    /// Data lines, or `None` if either file is missing.
    async fn read_if_indexed(&self) -> Result<Option<Vec<String>>> {
        if !file_exists(self.index_path()).await? {
            return Ok(None);
        }
        read_lines(self.data_path()).await
    }

    fn missing_files(&self) -> StoreError {
        StoreError::IndexOrDataMissing {
            data: self.config.data_path.clone(),
            index: self.config.index_path.clone(),
        }
    }
}
