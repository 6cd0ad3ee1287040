//! S3-backed object store

use async_trait::async_trait;
use aws_sdk_s3::Client as S3Client;
use tracing::debug;

use super::{FetchOutcome, ObjectStore, StorageError};

/// Production store over a single S3 bucket
#[derive(Clone)]
pub struct S3ObjectStore {
    client: S3Client,
    bucket: String,
}

impl S3ObjectStore {
    pub fn new(client: S3Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    /// Build a store from the ambient AWS environment, optionally pinning
    /// the region instead of letting the provider chain pick one.
    pub async fn from_env(bucket: impl Into<String>, region: Option<String>) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
        if let Some(region) = region {
            loader = loader.region(aws_config::Region::new(region));
        }
        let config = loader.load().await;
        Self::new(S3Client::new(&config), bucket)
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn fetch(&self, key: &str) -> Result<FetchOutcome, StorageError> {
        let response = match self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                let service_err = err.into_service_error();
                if service_err.is_no_such_key() {
                    debug!(key = %key, "object not found");
                    return Ok(FetchOutcome::Missing);
                }
                return Err(StorageError::access(key, service_err));
            }
        };

        let bytes = response
            .body
            .collect()
            .await
            .map_err(|e| StorageError::access(key, e))?
            .into_bytes();

        // Zero-length objects are treated the same as absent ones
        if bytes.is_empty() {
            debug!(key = %key, "object is empty");
            return Ok(FetchOutcome::Missing);
        }

        Ok(FetchOutcome::Found(bytes))
    }
}
