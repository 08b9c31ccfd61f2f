//! Full regeneration of the name index from the data file.

use crate::error::{Result, StoreError};
use crate::fs::{atomic_write_lines, read_lines};
use crate::index::IndexEntry;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Derives the index file from the data file.
///
/// The index file is only ever written here, and only from a fresh read of the
/// data file.
#[derive(Debug, Clone)]
pub struct IndexBuilder {
    data_path: PathBuf,
    index_path: PathBuf,
}

impl IndexBuilder {
    pub fn new(data_path: impl Into<PathBuf>, index_path: impl Into<PathBuf>) -> Self {
        Self {
            data_path: data_path.into(),
            index_path: index_path.into(),
        }
    }

    pub fn index_path(&self) -> &Path {
        &self.index_path
    }

    /// Project data lines onto index entries, skipping lines with fewer than
    /// two fields.
    pub fn project<S: AsRef<str>>(data_lines: &[S]) -> Vec<IndexEntry> {
        data_lines
            .iter()
            .filter_map(|line| IndexEntry::from_data_line(line.as_ref()))
            .collect()
    }

    /// Rewrite the index file from the current data file.
    ///
    /// Leaves any existing index untouched if the data file is missing.
    /// Returns the number of entries written.
    pub async fn rebuild(&self) -> Result<usize> {
        let Some(data_lines) = read_lines(&self.data_path).await? else {
            warn!(
                "Data file {} not found, index not rebuilt",
                self.data_path.display()
            );
            return Err(StoreError::DataFileNotFound(self.data_path.clone()));
        };

        let entries = Self::project(&data_lines);
        let skipped = data_lines.len() - entries.len();
        if skipped > 0 {
            warn!("Skipped {} malformed data line(s) while indexing", skipped);
        }

        let lines: Vec<String> = entries.iter().map(IndexEntry::to_line).collect();
        atomic_write_lines(&self.index_path, &lines).await?;

        debug!(
            "Rebuilt index {} with {} entries",
            self.index_path.display(),
            lines.len()
        );
        Ok(lines.len())
    }

    /// True when the index file exists and holds exactly the projection of
    /// the current data file, in order.
    pub async fn is_current(&self) -> Result<bool> {
        let Some(data_lines) = read_lines(&self.data_path).await? else {
            return Err(StoreError::DataFileNotFound(self.data_path.clone()));
        };
        let Some(index_lines) = read_lines(&self.index_path).await? else {
            return Ok(false);
        };

        let expected: Vec<String> = Self::project(&data_lines)
            .iter()
            .map(IndexEntry::to_line)
            .collect();
        Ok(expected == index_lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn builder_in(dir: &TempDir) -> IndexBuilder {
        IndexBuilder::new(dir.path().join("data.txt"), dir.path().join("index.txt"))
    }

    #[test]
    fn test_project_skips_short_lines() {
        let entries = IndexBuilder::project(&["1,Ghias,30", "junk", "2,Riaz,25"]);
        let lines: Vec<String> = entries.iter().map(IndexEntry::to_line).collect();
        assert_eq!(lines, vec!["Ghias,1", "Riaz,2"]);
    }

    #[tokio::test]
    async fn test_rebuild_writes_projection() {
        let dir = TempDir::new().unwrap();
        let builder = builder_in(&dir);
        std::fs::write(dir.path().join("data.txt"), "1,Ghias,30\n2,Riaz,25\n").unwrap();

        let count = builder.rebuild().await.unwrap();
        assert_eq!(count, 2);

        let index = std::fs::read_to_string(dir.path().join("index.txt")).unwrap();
        let lines: Vec<&str> = index.lines().collect();
        assert_eq!(lines, vec!["Ghias,1", "Riaz,2"]);
        assert!(builder.is_current().await.unwrap());
    }

    #[tokio::test]
    async fn test_rebuild_discards_previous_index() {
        let dir = TempDir::new().unwrap();
        let builder = builder_in(&dir);
        std::fs::write(dir.path().join("index.txt"), "Stale,99\n").unwrap();
        std::fs::write(dir.path().join("data.txt"), "3,Ahmed,40\n").unwrap();
        assert!(!builder.is_current().await.unwrap());

        builder.rebuild().await.unwrap();
        let index = std::fs::read_to_string(dir.path().join("index.txt")).unwrap();
        assert!(!index.contains("Stale"));
        assert!(index.contains("Ahmed,3"));
    }

    #[tokio::test]
    async fn test_rebuild_without_data_leaves_index_untouched() {
        let dir = TempDir::new().unwrap();
        let builder = builder_in(&dir);
        std::fs::write(dir.path().join("index.txt"), "Old,1\n").unwrap();

        let err = builder.rebuild().await.unwrap_err();
        assert!(matches!(err, StoreError::DataFileNotFound(_)));
        assert_eq!(
            std::fs::read_to_string(dir.path().join("index.txt")).unwrap(),
            "Old,1\n"
        );
    }

    #[tokio::test]
    async fn test_rebuild_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let builder = builder_in(&dir);
        std::fs::write(dir.path().join("data.txt"), "1,A,2\n2,B,3\n").unwrap();

        builder.rebuild().await.unwrap();
        let first = std::fs::read(dir.path().join("index.txt")).unwrap();
        builder.rebuild().await.unwrap();
        let second = std::fs::read(dir.path().join("index.txt")).unwrap();
        assert_eq!(first, second);
    }
}
