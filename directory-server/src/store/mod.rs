//! Record store - load/save of the directory document
//!
//! Every mutation is a full read-modify-write: `load()`, change the
//! [`Directory`] in memory, `save()` the whole thing back.
//!
//! There is no locking between `load` and `save`. Two requests mutating the
//! store at the same time race and the last `save` wins. This is a known
//! limitation of the single-process, single-admin deployment.

mod json_file;

pub use json_file::JsonFileStore;

use async_trait::async_trait;
use shared::{AppError, Directory, DirectoryError, ErrorCode};
use thiserror::Error;

/// Record store failure
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The file on disk is JSON of another shape; it is left alone
    #[error("Refusing to overwrite {path}: {source}")]
    Incompatible {
        path: String,
        #[source]
        source: DirectoryError,
    },

    #[error("Failed to serialize directory: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        tracing::error!(error = %e, "Record store error");
        AppError::new(ErrorCode::DatabaseError)
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence contract for the directory document
#[async_trait]
pub trait EmployeeStore: Send + Sync + std::fmt::Debug {
    /// Load the whole document
    ///
    /// Never fails: a missing or unreadable document is an empty directory.
    async fn load(&self) -> Directory;

    /// Replace the whole document
    ///
    /// Refuses to replace a stored document that is valid JSON but not a
    /// directory.
    async fn save(&self, directory: &Directory) -> StoreResult<()>;
}
