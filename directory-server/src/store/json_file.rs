//! Flat JSON file store

use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::Value;
use shared::Directory;

use super::{EmployeeStore, StoreError, StoreResult};

/// Stores the directory as one pretty-printed JSON document
///
/// Writes go to `<file>.tmp` first and are renamed over the target, so a
/// failed write leaves the previous document intact. A file that is not JSON
/// reads as empty and is replaced on the next write; a JSON file of the wrong
/// shape also reads as empty but is never overwritten.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "db.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }

    /// Fail if the current file parses as JSON but not as a directory
    async fn guard_existing(&self) -> StoreResult<()> {
        let Ok(content) = tokio::fs::read_to_string(&self.path).await else {
            return Ok(());
        };
        let Ok(document) = serde_json::from_str::<Value>(&content) else {
            return Ok(());
        };
        match Directory::try_from(document) {
            Ok(_) => Ok(()),
            Err(source) => Err(StoreError::Incompatible {
                path: self.path.display().to_string(),
                source,
            }),
        }
    }
}

#[async_trait]
impl EmployeeStore for JsonFileStore {
    async fn load(&self) -> Directory {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Failed to read directory file, using empty directory"
                );
                return Directory::default();
            }
        };

        let document = match serde_json::from_str::<Value>(&content) {
            Ok(d) => d,
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Directory file is corrupt, using empty directory"
                );
                return Directory::default();
            }
        };

        let directory = match Directory::try_from(document) {
            Ok(d) => d,
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Directory file has an unexpected shape, using empty directory"
                );
                return Directory::default();
            }
        };
        if !directory.unreadable.is_empty() {
            tracing::warn!(
                path = %self.path.display(),
                count = directory.unreadable.len(),
                "Directory file has records without a usable id, keeping them as-is"
            );
        }
        directory
    }

    async fn save(&self, directory: &Directory) -> StoreResult<()> {
        self.guard_existing().await?;

        let content = serde_json::to_string_pretty(directory)?;
        let tmp_path = self.tmp_path();

        if let Err(e) = tokio::fs::write(&tmp_path, content).await {
            return Err(self.io_error(e));
        }
        if let Err(e) = tokio::fs::rename(&tmp_path, &self.path).await {
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(self.io_error(e));
        }

        tracing::debug!(
            path = %self.path.display(),
            employees = directory.len(),
            "Directory saved"
        );
        Ok(())
    }
}
