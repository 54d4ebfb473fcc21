//! Data models of the persisted directory document

pub mod directory;
pub mod employee;

pub use directory::{Directory, DirectoryError, Record};
pub use employee::{Employee, EmployeeProfile, Location};
