//! Configuration for the records store.
//!
//! File names and the on-disk delimiter live in [`PathsConfig`]; the per-store
//! choices (which files, how remove matches) live in [`StoreConfig`], which is
//! handed to the store when it is built.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File names and text-format constants.
pub struct PathsConfig;

impl PathsConfig {
    pub const DATA_FILE_NAME: &'static str = "data.txt";
    pub const INDEX_FILE_NAME: &'static str = "non_clustered_index.txt";
    pub const FIELD_DELIMITER: char = ',';
    #[cfg(windows)]
    pub const LINE_ENDING: &'static str = "\r\n";
    #[cfg(not(windows))]
    pub const LINE_ENDING: &'static str = "\n";
}

/// How `remove` decides that a stored line belongs to the given name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemoveMatch {
    /// The parsed name field must equal the given name.
    #[default]
    FieldExact,
    /// Any line containing `,<name>,` is removed.
    Substring,
}

impl RemoveMatch {
    /// Returns true if `line` should be removed for `name`.
    pub fn matches(&self, line: &str, name: &str) -> bool {
        match self {
            RemoveMatch::FieldExact => line
                .split(PathsConfig::FIELD_DELIMITER)
                .nth(1)
                .is_some_and(|field| field == name),
            RemoveMatch::Substring => {
                let delim = PathsConfig::FIELD_DELIMITER;
                line.contains(&format!("{delim}{name}{delim}"))
            }
        }
    }
}

/// Paths and behavior of a single store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreConfig {
    pub data_path: PathBuf,
    pub index_path: PathBuf,
    #[serde(default)]
    pub remove_match: RemoveMatch,
}

impl StoreConfig {
    /// Default file names placed in `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            data_path: dir.join(PathsConfig::DATA_FILE_NAME),
            index_path: dir.join(PathsConfig::INDEX_FILE_NAME),
            remove_match: RemoveMatch::default(),
        }
    }
}

impl Default for StoreConfig {
    /// Default file names relative to the working directory.
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(PathsConfig::DATA_FILE_NAME),
            index_path: PathBuf::from(PathsConfig::INDEX_FILE_NAME),
            remove_match: RemoveMatch::default(),
        }
    }
}
