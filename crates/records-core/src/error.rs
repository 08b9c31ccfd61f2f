//! Error types for the records store.
//!
//! Every condition the store can report is a variant here. Callers that need
//! the plain-text status line shown to users go through
//! [`StoreError::user_message`].

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the records store.
#[derive(Debug, Error)]
pub enum StoreError {
    // Input errors
    #[error("Validation error for {field}: {message}")]
    Validation { field: String, message: String },

    // File system errors
    #[error("IO error at {path:?}: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("Data file not found: {0}")]
    DataFileNotFound(PathBuf),

    #[error("Index or data file not found (data: {data:?}, index: {index:?})")]
    IndexOrDataMissing { data: PathBuf, index: PathBuf },

    // Lookup errors
    #[error("Record not found: {name}")]
    RecordNotFound { name: String },

    #[error("Index references ids missing from the data file: {ids:?}")]
    NotInDataFile { ids: Vec<String> },
}

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io {
            message: err.to_string(),
            path: None,
            source: Some(err),
        }
    }
}

/// Which operation a condition is reported for.
///
/// Search and remove word the same conditions differently, so the rendered
/// message depends on the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Initialize,
    Add,
    Search,
    Remove,
    RebuildIndex,
}

impl StoreError {
    /// Create an IO error with path context.
    pub fn io_with_path(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        StoreError::Io {
            message: err.to_string(),
            path: Some(path.into()),
            source: Some(err),
        }
    }

    /// Create a validation error.
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        StoreError::Validation {
            field: field.to_string(),
            message: message.into(),
        }
    }

    /// Render the status line reported to users for this condition.
    pub fn user_message(&self, op: Operation) -> String {
        match (self, op) {
            (StoreError::Validation { .. }, Operation::Add) => {
                "Invalid input. Record not added.".to_string()
            }
            (StoreError::Validation { .. }, _) => {
                "Invalid input. Name cannot be empty.".to_string()
            }
            (StoreError::IndexOrDataMissing { .. }, Operation::Remove) => {
                "Data or index file not found.".to_string()
            }
            (StoreError::IndexOrDataMissing { .. }, _) => {
                "Index or data file not found.".to_string()
            }
            (StoreError::DataFileNotFound(_), _) => {
                "Data file not found. Cannot update indexes.".to_string()
            }
            (StoreError::RecordNotFound { .. }, Operation::Remove) => {
                "Record not found. No changes made.".to_string()
            }
            (StoreError::RecordNotFound { .. }, _) => "Record not found.".to_string(),
            (StoreError::NotInDataFile { .. }, _) => "Record not found in data file.".to_string(),
            (StoreError::Io { .. }, _) => format!("Storage error: {}", self),
        }
    }

    /// True for conditions that are part of normal operation rather than
    /// storage failures.
    pub fn is_reported_condition(&self) -> bool {
        !matches!(self, StoreError::Io { .. })
    }
}
