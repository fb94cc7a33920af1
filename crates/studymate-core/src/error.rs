//! Core error types for studymate-core.
//!
//! Two families matter to callers: [`ValidationError`] blocks a single user
//! action and leaves state untouched, [`PersistenceError`] is recovered
//! inside the persistence gateway and only surfaces through its `try_*`
//! methods.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for studymate-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Storage-related errors
    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Rejected user input. The operation that raised it mutated nothing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required text field was empty
    #[error("'{field}' must not be empty")]
    EmptyField { field: &'static str },

    /// Grade outside the AA/A/B/C/D scale
    #[error("Invalid grade '{0}': expected one of AA, A, B, C, D")]
    InvalidGrade(String),

    /// Completion attempted without picking a grade
    #[error("A grade must be selected to complete a task")]
    MissingGrade,

    /// No active, uncompleted task with this id
    #[error("No open task with id '{id}'")]
    TaskNotFound { id: String },

    /// Numeric input that must be positive
    #[error("'{field}' must be a positive number (got {value})")]
    NonPositive { field: &'static str, value: i64 },
}

/// Storage-specific errors.
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// Failed to open the backing store
    #[error("Failed to open store at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Store is locked by another writer
    #[error("Store is locked")]
    Locked,

    /// No space left for the blob
    #[error("Storage quota exceeded")]
    StorageFull,

    /// Stored blob could not be decoded
    #[error("Stored data is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    /// Filesystem errors around the store
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not exist in the configuration
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),
}

impl From<rusqlite::Error> for PersistenceError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(e, _msg) => match e.code {
                rusqlite::ErrorCode::DatabaseLocked | rusqlite::ErrorCode::DatabaseBusy => {
                    PersistenceError::Locked
                }
                rusqlite::ErrorCode::DiskFull => PersistenceError::StorageFull,
                _ => PersistenceError::QueryFailed(err.to_string()),
            },
            _ => PersistenceError::QueryFailed(err.to_string()),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_converts_into_core_error() {
        let err: CoreError = ValidationError::MissingGrade.into();
        assert!(matches!(err, CoreError::Validation(ValidationError::MissingGrade)));
        assert!(err.to_string().contains("grade must be selected"));
    }

    #[test]
    fn non_sqlite_failures_become_query_failed() {
        let err: PersistenceError = rusqlite::Error::QueryReturnedNoRows.into();
        assert!(matches!(err, PersistenceError::QueryFailed(_)));
    }

    #[test]
    fn corrupt_blob_message_mentions_corruption() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err = PersistenceError::from(json_err);
        assert!(err.to_string().starts_with("Stored data is corrupt"));
    }
}
