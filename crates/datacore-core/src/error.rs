//! Error types for Datacore

use thiserror::Error;

/// Top-level error type for Datacore
#[derive(Debug, Error)]
pub enum DatacoreError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Back-end error: {0}")]
    Api(#[from] ApiError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Precondition failed: {0}")]
    Precondition(#[from] PreconditionError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors from the persisted key/value store
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Storage is read-only")]
    ReadOnly,
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Serialization(err.to_string())
    }
}

/// A failed back-end call.
///
/// The back-end surfaces every failure as an object with a `message`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ApiError {
    pub message: String,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// User input rejected before submission
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {reason}")]
pub struct ValidationError {
    pub field: &'static str,
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// An operation the data model forbids
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreconditionError {
    #[error("Column \"{name}\" still holds {task_count} task(s); move or delete them first")]
    ColumnNotEmpty { name: String, task_count: u32 },

    #[error("Operation requires confirmation")]
    Unconfirmed,
}

/// Errors loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {reason}")]
    Read { path: String, reason: String },

    #[error("Invalid config {path}: {reason}")]
    Parse { path: String, reason: String },
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, DatacoreError>;
