//! In-memory object store for testing (HashMap-backed)

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::RwLock;

use super::{FetchOutcome, ObjectStore, StorageError};

/// Store that serves objects from memory
///
/// Zero-length objects are reported as `Missing`, mirroring the S3 store's
/// empty-body rule.
#[derive(Clone, Default)]
pub struct MemoryObjectStore {
    objects: Arc<RwLock<HashMap<String, Bytes>>>,
    /// Simulate an outage if true
    simulate_unavailable: Arc<RwLock<bool>>,
    fetch_count: Arc<AtomicU64>,
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an object under a key
    pub async fn put(&self, key: impl Into<String>, data: impl Into<Bytes>) {
        self.objects.write().await.insert(key.into(), data.into());
    }

    /// Enable outage simulation for testing
    pub async fn set_unavailable(&self, enabled: bool) {
        *self.simulate_unavailable.write().await = enabled;
    }

    /// Number of fetches served so far
    pub fn fetch_count(&self) -> u64 {
        self.fetch_count.load(Ordering::SeqCst)
    }

    /// Number of stored objects
    pub async fn object_count(&self) -> usize {
        self.objects.read().await.len()
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn fetch(&self, key: &str) -> Result<FetchOutcome, StorageError> {
        self.fetch_count.fetch_add(1, Ordering::SeqCst);

        if *self.simulate_unavailable.read().await {
            return Err(StorageError::access(key, "simulated storage outage"));
        }

        match self.objects.read().await.get(key) {
            Some(data) if data.is_empty() => Ok(FetchOutcome::Missing),
            Some(data) => Ok(FetchOutcome::Found(data.clone())),
            None => Ok(FetchOutcome::Missing),
        }
    }
}
