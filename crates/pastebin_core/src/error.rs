//! Application error types for core storage and domain logic.
use thiserror::Error;

/// Top-level application error type.
///
/// Variants carrying a `String` hold internal detail meant for logs; the HTTP
/// layer maps each kind to a generic user-facing message.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found")]
    NotFound,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Paste id '{0}' already exists")]
    DuplicateKey(String),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Internal server error")]
    Internal,
}

impl AppError {
    /// Whether this error came from the storage medium rather than the caller.
    pub fn is_storage_failure(&self) -> bool {
        matches!(self, Self::StorageUnavailable(_) | Self::DuplicateKey(_))
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::StorageUnavailable(value.to_string())
    }
}

impl From<rusqlite::Error> for AppError {
    fn from(value: rusqlite::Error) -> Self {
        Self::StorageUnavailable(value.to_string())
    }
}
