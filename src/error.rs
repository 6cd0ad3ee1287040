// Error types module

use thiserror::Error;

use crate::storage::StorageError;
use crate::transform::TransformError;

/// Centralized error type for the edge handler
///
/// Only infrastructure faults surface here; client-visible conditions
/// (forbidden extensions, missing objects) terminate as responses instead
/// of errors.
#[derive(Debug, Error)]
pub enum EdgeError {
    /// Configuration errors (missing env vars, bad overrides)
    #[error("configuration error: {0}")]
    Config(String),

    /// Malformed invocation payloads
    #[error("malformed event: {0}")]
    MalformedEvent(String),

    /// Storage access failures, propagated hard
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Transformation failures on decodable input
    #[error(transparent)]
    Transform(#[from] TransformError),

    /// Unexpected internal errors (blocking-task panics and the like)
    #[error("internal error: {0}")]
    Internal(String),
}

impl EdgeError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn malformed_event(msg: impl Into<String>) -> Self {
        Self::MalformedEvent(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
