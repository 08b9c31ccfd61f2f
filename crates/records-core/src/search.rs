//! Name lookup: narrow candidate ids through the index, then resolve them
//! against the data file.

use crate::config::PathsConfig;
use crate::error::{Result, StoreError};
use crate::fs::read_lines;
use crate::index::IndexEntry;
use std::path::Path;
use tracing::{debug, warn};

/// Find the data lines whose indexed name equals `name`.
///
/// Each candidate id resolves to the first data line starting with
/// `id` and the delimiter. Results follow index order.
pub async fn find_by_name(
    data_path: &Path,
    index_path: &Path,
    name: &str,
) -> Result<Vec<String>> {
    if name.trim().is_empty() {
        return Err(StoreError::validation("name", "must not be empty"));
    }

    let missing = || StoreError::IndexOrDataMissing {
        data: data_path.to_path_buf(),
        index: index_path.to_path_buf(),
    };

    let index_lines = read_lines(index_path).await?.ok_or_else(missing)?;
    let data_lines = read_lines(data_path).await?.ok_or_else(missing)?;

    let candidates: Vec<&str> = index_lines
        .iter()
        .filter_map(|line| IndexEntry::id_for(line, name))
        .collect();

    if candidates.is_empty() {
        debug!("No index entries for {:?}", name);
        return Err(StoreError::RecordNotFound {
            name: name.to_string(),
        });
    }

    let mut resolved = Vec::with_capacity(candidates.len());
    let mut unresolved = Vec::new();
    for id in &candidates {
        let prefix = format!("{}{}", id, PathsConfig::FIELD_DELIMITER);
        match data_lines.iter().find(|line| line.starts_with(&prefix)) {
            Some(line) => resolved.push(line.clone()),
            None => unresolved.push(id.to_string()),
        }
    }

    if !unresolved.is_empty() {
        warn!(
            "Index references id(s) {:?} missing from {}",
            unresolved,
            data_path.display()
        );
    }

    if resolved.is_empty() {
        return Err(StoreError::NotInDataFile { ids: unresolved });
    }

    debug!(
        "Resolved {} of {} candidate(s) for {:?}",
        resolved.len(),
        candidates.len(),
        name
    );
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    struct Files {
        _dir: TempDir,
        data: std::path::PathBuf,
        index: std::path::PathBuf,
    }

    fn files(data: &str, index: &str) -> Files {
        let dir = TempDir::new().unwrap();
        let data_path = dir.path().join("data.txt");
        let index_path = dir.path().join("index.txt");
        std::fs::write(&data_path, data).unwrap();
        std::fs::write(&index_path, index).unwrap();
        Files {
            _dir: dir,
            data: data_path,
            index: index_path,
        }
    }

    #[tokio::test]
    async fn test_finds_exact_name() {
        let f = files("1,Ghias,30\n2,Riaz,25\n", "Ghias,1\nRiaz,2\n");
        let found = find_by_name(&f.data, &f.index, "Ghias").await.unwrap();
        assert_eq!(found, vec!["1,Ghias,30"]);
    }

    #[tokio::test]
    async fn test_prefix_of_name_does_not_match() {
        let f = files("1,Ghias,30\n", "Ghias,1\n");
        let err = find_by_name(&f.data, &f.index, "Ghia").await.unwrap_err();
        assert!(matches!(err, StoreError::RecordNotFound { .. }));
    }

    #[tokio::test]
    async fn test_duplicates_keep_index_order() {
        let f = files(
            "1,Sam,30\n2,Ann,25\n3,Sam,40\n",
            "Sam,3\nAnn,2\nSam,1\n",
        );
        let found = find_by_name(&f.data, &f.index, "Sam").await.unwrap();
        assert_eq!(found, vec!["3,Sam,40", "1,Sam,30"]);
    }

    #[tokio::test]
    async fn test_duplicate_ids_resolve_to_first_line() {
        let f = files("1,Sam,30\n1,Sam,31\n", "Sam,1\nSam,1\n");
        let found = find_by_name(&f.data, &f.index, "Sam").await.unwrap();
        assert_eq!(found, vec!["1,Sam,30", "1,Sam,30"]);
    }

    #[tokio::test]
    async fn test_stale_index_reports_not_in_data_file() {
        let f = files("1,Ghias,30\n", "Gone,7\n");
        let err = find_by_name(&f.data, &f.index, "Gone").await.unwrap_err();
        match err {
            StoreError::NotInDataFile { ids } => assert_eq!(ids, vec!["7"]),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_id_prefix_does_not_resolve_longer_id() {
        let f = files("12,Other,30\n", "Ghost,1\n");
        let err = find_by_name(&f.data, &f.index, "Ghost").await.unwrap_err();
        assert!(matches!(err, StoreError::NotInDataFile { .. }));
    }

    #[tokio::test]
    async fn test_missing_files_and_empty_name() {
        let dir = TempDir::new().unwrap();
        let data = dir.path().join("data.txt");
        let index = dir.path().join("index.txt");

        let err = find_by_name(&data, &index, "Ghias").await.unwrap_err();
        assert!(matches!(err, StoreError::IndexOrDataMissing { .. }));

        let err = find_by_name(&data, &index, "  ").await.unwrap_err();
        assert!(matches!(err, StoreError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_index_without_data_file() {
        let dir = TempDir::new().unwrap();
        let data = dir.path().join("data.txt");
        let index = dir.path().join("index.txt");
        std::fs::write(&index, "Ghias,1\n").unwrap();

        let err = find_by_name(&data, &index, "Ghias").await.unwrap_err();
        assert!(matches!(err, StoreError::IndexOrDataMissing { .. }));
    }

    #[tokio::test]
    async fn test_data_file_without_index() {
        let dir = TempDir::new().unwrap();
        let data = dir.path().join("data.txt");
        let index = dir.path().join("index.txt");
        std::fs::write(&data, "1,Ghias,30\n").unwrap();

        let err = find_by_name(&data, &index, "Ghias").await.unwrap_err();
        assert!(matches!(err, StoreError::IndexOrDataMissing { .. }));
    }
}
