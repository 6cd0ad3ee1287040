// Configuration module

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_MAX_OUTPUT_BYTES;
use crate::error::EdgeError;

/// Environment variable naming the bucket that backs the origin.
pub const ENV_BUCKET: &str = "SUZAKU_BUCKET";

/// Environment variable overriding the bucket's AWS region.
pub const ENV_REGION: &str = "SUZAKU_REGION";

/// Environment variable overriding the encoded payload budget, in bytes.
pub const ENV_MAX_OUTPUT_BYTES: &str = "SUZAKU_MAX_OUTPUT_BYTES";

fn default_max_output_bytes() -> usize {
    DEFAULT_MAX_OUTPUT_BYTES
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Bucket the origin responses are served from.
    pub bucket: String,

    /// Region override. When unset the SDK's own provider chain decides.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    /// Largest encoded payload the function will hand back, in bytes
    /// (default: 1 MiB).
    #[serde(default = "default_max_output_bytes")]
    pub max_output_bytes: usize,
}

impl Config {
    /// Load configuration from process environment variables.
    pub fn from_env() -> Result<Self, EdgeError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// Splitting the lookup out keeps the parsing testable without
    /// touching process-wide environment state.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, EdgeError> {
        let bucket = lookup(ENV_BUCKET)
            .ok_or_else(|| EdgeError::config(format!("{ENV_BUCKET} is not set")))?;

        let max_output_bytes = match lookup(ENV_MAX_OUTPUT_BYTES) {
            Some(raw) => raw.parse::<usize>().map_err(|_| {
                EdgeError::config(format!(
                    "{ENV_MAX_OUTPUT_BYTES} must be an integer byte count, got {raw:?}"
                ))
            })?,
            None => default_max_output_bytes(),
        };

        let config = Self {
            bucket,
            region: lookup(ENV_REGION),
            max_output_bytes,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check invariants that per-field parsing cannot express.
    pub fn validate(&self) -> Result<(), EdgeError> {
        if self.bucket.trim().is_empty() {
            return Err(EdgeError::config("bucket name must not be empty"));
        }
        if self.max_output_bytes == 0 {
            return Err(EdgeError::config(
                "max_output_bytes must be greater than zero",
            ));
        }
        Ok(())
    }
}
