//! Object storage access
//!
//! The pipeline fetches source bytes through the `ObjectStore` trait so the
//! production S3 client can be swapped for an in-memory store in tests.

pub mod memory;
pub mod s3;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

pub use memory::MemoryObjectStore;
pub use s3::S3ObjectStore;

/// Storage access failure; always propagated, never turned into a response
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage access failed for '{key}': {message}")]
    Access { key: String, message: String },
}

impl StorageError {
    pub fn access(key: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Self::Access {
            key: key.into(),
            message: message.to_string(),
        }
    }
}

/// Outcome of a fetch; `Missing` covers absent keys and empty objects
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Found(Bytes),
    Missing,
}

/// Abstraction over the origin object store
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Fetch an object's bytes by key
    async fn fetch(&self, key: &str) -> Result<FetchOutcome, StorageError>;
}
