//! Error types for the job-data crate.

use thiserror::Error;

use crate::types::JobId;

/// Errors that can occur while loading or validating a job snapshot.
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The file was read but its contents are not a valid job list
    #[error("Parse error in {file}: {reason}")]
    ParseError { file: String, reason: String },

    /// A field held a value outside its catalog
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    /// Two records in one snapshot share an id
    #[error("Duplicate job id {id}")]
    DuplicateId { id: JobId },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
