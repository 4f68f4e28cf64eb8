//! Error types for the resolver.

use iprs_core::{CoreError, ValidationError};
use iprs_store::StoreError;
use thiserror::Error;

/// Errors that can occur while publishing or resolving records.
#[derive(Debug, Error)]
pub enum ResolverError {
    /// Storage error.
    #[error("storage error: {0}")]
    Store(StoreError),

    /// The record failed validation.
    #[error("invalid record: {0}")]
    Invalid(#[from] ValidationError),

    /// No record at the path.
    #[error("no record at {0}")]
    NotFound(String),

    /// The deadline passed before any candidate arrived.
    #[error("record store timeout")]
    Timeout,
}

impl ResolverError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, ResolverError::Timeout)
    }
}

impl From<StoreError> for ResolverError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Timeout => ResolverError::Timeout,
            StoreError::NotFound(path) => ResolverError::NotFound(path),
            other => ResolverError::Store(other),
        }
    }
}

impl From<CoreError> for ResolverError {
    fn from(err: CoreError) -> Self {
        StoreError::from(err).into()
    }
}

/// Result type for resolver operations.
pub type Result<T> = std::result::Result<T, ResolverError>;
