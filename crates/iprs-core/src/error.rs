//! Error types for IPRS core.

use thiserror::Error;

use crate::types::NodeHash;

/// Core errors that can occur while decoding and dispatching records.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid record. missing link: {0}")]
    MissingLink(String),

    #[error("malformed node: {0}")]
    Malformed(String),

    #[error("non-canonical encoding: {0}")]
    NonCanonical(String),

    #[error("record type mismatch: expected {expected}, got {actual}")]
    TypeMismatch { expected: NodeHash, actual: NodeHash },

    #[error("unsupported record type {0}")]
    UnsupportedType(NodeHash),

    #[error("deadline exceeded")]
    Timeout,

    #[error("operation cancelled")]
    Cancelled,
}

/// Validation errors returned by record validators.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("record rejected by validator")]
    Rejected,

    #[error("validation failed: {0}")]
    Failed(String),
}
