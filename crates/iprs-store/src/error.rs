//! Error types for the store module.

use iprs_core::CoreError;
use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database error from SQLite.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Stored or supplied record failed to decode or dispatch.
    #[error("record error: {0}")]
    Record(CoreError),

    /// Nothing stored at the path.
    #[error("no record at {0}")]
    NotFound(String),

    #[error("record store timeout")]
    Timeout,

    #[error("operation cancelled")]
    Cancelled,

    /// Migration error.
    #[error("migration error: {0}")]
    Migration(String),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

impl From<CoreError> for StoreError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Timeout => StoreError::Timeout,
            CoreError::Cancelled => StoreError::Cancelled,
            other => StoreError::Record(other),
        }
    }
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
