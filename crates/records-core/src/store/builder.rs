//! Builder for configuring a `RecordStore`.

use std::path::PathBuf;

use crate::config::{PathsConfig, RemoveMatch, StoreConfig};
use crate::record::Record;
use crate::store::RecordStore;

/// Builder for configuring a `RecordStore`.
///
/// File names default to [`PathsConfig::DATA_FILE_NAME`] and
/// [`PathsConfig::INDEX_FILE_NAME`] inside the root directory. Relative file
/// names given to [`data_file`](Self::data_file) and
/// [`index_file`](Self::index_file) are resolved against the root as well.
pub struct RecordStoreBuilder {
    root: PathBuf,
    data_file: PathBuf,
    index_file: PathBuf,
    remove_match: RemoveMatch,
    seed: Option<Vec<Record>>,
}

impl RecordStoreBuilder {
    /// Create a new builder rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            data_file: PathBuf::from(PathsConfig::DATA_FILE_NAME),
            index_file: PathBuf::from(PathsConfig::INDEX_FILE_NAME),
            remove_match: RemoveMatch::default(),
            seed: None,
        }
    }

    /// Use a different data file.
    pub fn data_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_file = path.into();
        self
    }

    /// Use a different index file.
    pub fn index_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.index_file = path.into();
        self
    }

    /// Choose how `remove` matches names.
    ///
    /// Default: [`RemoveMatch::FieldExact`]
    pub fn remove_match(mut self, mode: RemoveMatch) -> Self {
        self.remove_match = mode;
        self
    }

    /// Records written by `initialize` when the data file doesn't exist yet.
    ///
    /// Default: [`Record::seed`]
    pub fn seed(mut self, records: Vec<Record>) -> Self {
        self.seed = Some(records);
        self
    }

    /// The configuration this builder would produce.
    pub fn config(&self) -> StoreConfig {
        StoreConfig {
            data_path: self.root.join(&self.data_file),
            index_path: self.root.join(&self.index_file),
            remove_match: self.remove_match,
        }
    }

    /// Build the store. No files are touched until `initialize` or a mutation.
    pub fn build(self) -> RecordStore {
        let config = self.config();
        RecordStore::with_seed(config, self.seed.unwrap_or_else(Record::seed))
    }
}
