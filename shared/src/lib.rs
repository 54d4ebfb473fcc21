//! Shared types for the employee directory
//!
//! Data model of the persisted directory document, error codes and the
//! response bodies used by both the page and the JSON API surfaces.

pub mod error;
pub mod models;
pub mod response;

// Re-exports
pub use error::{AppError, AppResult, ErrorCategory, ErrorCode};
pub use models::{Directory, DirectoryError, Employee, EmployeeProfile, Location, Record};
pub use response::ActionResponse;
pub use serde::{Deserialize, Serialize};
