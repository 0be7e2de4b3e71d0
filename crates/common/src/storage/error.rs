//! Storage error types

use paylink_domain::PayLinkError;
use thiserror::Error;

/// Storage error type
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Keychain error: {0}")]
    Keychain(String),

    #[error("Storage file is corrupt: {0}")]
    Corrupt(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for PayLinkError {
    fn from(err: StorageError) -> Self {
        Self::Storage(err.to_string())
    }
}
