//! Whole-file line I/O.
//!
//! Rewrites follow the same sequence every time:
//! 1. Write all lines to a temp file with a unique PID+sequence suffix
//! 2. fsync so the data reaches disk
//! 3. Rename the temp file over the target
//!
//! A single file is therefore never observed half-written. Nothing here spans
//! two files.

use crate::config::PathsConfig;
use crate::error::{Result, StoreError};
use std::path::{Path, PathBuf};
use std::process;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::debug;

static TEMP_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Returns true if `path` exists.
pub async fn file_exists(path: &Path) -> Result<bool> {
    fs::try_exists(path)
        .await
        .map_err(|e| StoreError::io_with_path(e, path))
}

/// Read every line of a text file.
///
/// Returns `None` if the file doesn't exist. Both `\n` and `\r\n` endings are
/// accepted.
pub async fn read_lines(path: &Path) -> Result<Option<Vec<String>>> {
    match fs::read_to_string(path).await {
        Ok(contents) => Ok(Some(contents.lines().map(str::to_string).collect())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(StoreError::Io {
            message: format!("Failed to read {}", path.display()),
            path: Some(path.to_path_buf()),
            source: Some(e),
        }),
    }
}

/// Append one line (plus line ending) to a file, creating it if needed.
pub async fn append_line(path: &Path, line: &str) -> Result<()> {
    ensure_parent_dir(path).await?;

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await
        .map_err(|e| StoreError::Io {
            message: format!("Failed to open {} for append", path.display()),
            path: Some(path.to_path_buf()),
            source: Some(e),
        })?;

    let mut buf = String::with_capacity(line.len() + PathsConfig::LINE_ENDING.len());
    buf.push_str(line);
    buf.push_str(PathsConfig::LINE_ENDING);

    file.write_all(buf.as_bytes())
        .await
        .map_err(|e| StoreError::io_with_path(e, path))?;
    file.flush()
        .await
        .map_err(|e| StoreError::io_with_path(e, path))?;

    debug!("Appended 1 line to {}", path.display());
    Ok(())
}

/// Replace the contents of a file with `lines`, each terminated by the
/// platform line ending.
pub async fn atomic_write_lines<S: AsRef<str>>(path: &Path, lines: &[S]) -> Result<()> {
    ensure_parent_dir(path).await?;

    let temp_path = temp_path_for(path);
    let mut contents = String::new();
    for line in lines {
        contents.push_str(line.as_ref());
        contents.push_str(PathsConfig::LINE_ENDING);
    }

    {
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)
            .await
            .map_err(|e| StoreError::Io {
                message: format!("Failed to create temp file {}", temp_path.display()),
                path: Some(temp_path.clone()),
                source: Some(e),
            })?;

        file.write_all(contents.as_bytes())
            .await
            .map_err(|e| StoreError::Io {
                message: format!("Failed to write temp file {}", temp_path.display()),
                path: Some(temp_path.clone()),
                source: Some(e),
            })?;

        file.sync_all().await.map_err(|e| StoreError::Io {
            message: format!("Failed to sync temp file {}", temp_path.display()),
            path: Some(temp_path.clone()),
            source: Some(e),
        })?;
    }

    if let Err(e) = fs::rename(&temp_path, path).await {
        let _ = fs::remove_file(&temp_path).await;
        return Err(StoreError::Io {
            message: format!(
                "Failed to rename {} to {}",
                temp_path.display(),
                path.display()
            ),
            path: Some(path.to_path_buf()),
            source: Some(e),
        });
    }

    debug!("Atomically wrote {} lines to {}", lines.len(), path.display());
    Ok(())
}

async fn ensure_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).await.map_err(|e| StoreError::Io {
                message: format!("Failed to create directory {}", parent.display()),
                path: Some(parent.to_path_buf()),
                source: Some(e),
            })
        }
        _ => Ok(()),
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    let seq = TEMP_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(format!(".{}.{}.tmp", process::id(), seq));
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_and_read_lines() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("lines.txt");

        atomic_write_lines(&path, &["a,1", "b,2"]).await.unwrap();
        let lines = read_lines(&path).await.unwrap();
        assert_eq!(lines, Some(vec!["a,1".to_string(), "b,2".to_string()]));

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.ends_with(PathsConfig::LINE_ENDING));
    }

    #[tokio::test]
    async fn test_read_nonexistent() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.txt");
        assert_eq!(read_lines(&path).await.unwrap(), None);
        assert!(!file_exists(&path).await.unwrap());
    }

    #[tokio::test]
    async fn test_write_empty_truncates() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("lines.txt");

        atomic_write_lines(&path, &["x"]).await.unwrap();
        atomic_write_lines::<&str>(&path, &[]).await.unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    }

    #[tokio::test]
    async fn test_append_creates_file_and_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("data.txt");

        append_line(&path, "1,A,2").await.unwrap();
        append_line(&path, "2,B,3").await.unwrap();
        let lines = read_lines(&path).await.unwrap().unwrap();
        assert_eq!(lines, vec!["1,A,2", "2,B,3"]);
    }

    #[tokio::test]
    async fn test_no_temp_files_left_behind() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("lines.txt");

        atomic_write_lines(&path, &["a"]).await.unwrap();
        atomic_write_lines(&path, &["b"]).await.unwrap();

        let entries: Vec<_> = std::fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries.len(), 1);
    }
}
