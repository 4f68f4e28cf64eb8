//! Error types for chain records.

use iprs_core::{CoreError, NodeHash};
use thiserror::Error;

/// Errors from decoding chain records and resolving their links.
#[derive(Debug, Error)]
pub enum ChainError {
    #[error("record error: {0}")]
    Core(CoreError),

    #[error("node not found: {0}")]
    NodeNotFound(NodeHash),

    #[error("deadline exceeded")]
    Timeout,

    #[error("operation cancelled")]
    Cancelled,
}

impl From<CoreError> for ChainError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Timeout => ChainError::Timeout,
            CoreError::Cancelled => ChainError::Cancelled,
            other => ChainError::Core(other),
        }
    }
}

/// Result type for chain operations.
pub type Result<T> = std::result::Result<T, ChainError>;
