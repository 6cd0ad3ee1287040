//! Per-invocation transformation metrics
//!
//! One record per transformed exchange, emitted through structured logging.
//! There are deliberately no process-wide counters: each Lambda invocation
//! stands alone and the log pipeline does the aggregation.

use std::time::Duration;

use tracing::info;

use crate::transform::ProcessedImage;

/// Metrics for a single transformation
#[derive(Debug, Clone)]
pub struct TransformMetrics {
    /// Source payload size in bytes
    pub original_size: usize,
    /// Final payload size in bytes
    pub encoded_size: usize,
    /// Intrinsic dimensions, when the source was decodable
    pub original_dimensions: Option<(u32, u32)>,
    /// Output dimensions, when the source was decodable
    pub output_dimensions: Option<(u32, u32)>,
    /// Format token of the final payload
    pub format: &'static str,
    /// Quality of the final encode
    pub quality: u8,
    /// Times the byte-budget loop lowered quality
    pub reduction_steps: u32,
    /// Wall time spent transforming
    pub elapsed: Duration,
}

impl TransformMetrics {
    /// Capture metrics from a finished transformation
    pub fn capture(original_size: usize, processed: &ProcessedImage, elapsed: Duration) -> Self {
        Self {
            original_size,
            encoded_size: processed.data.len(),
            original_dimensions: processed.original_size,
            output_dimensions: processed.output_size,
            format: processed.format,
            quality: processed.quality,
            reduction_steps: processed.reduction_steps,
            elapsed,
        }
    }

    /// Final size relative to the original (1.0 = unchanged)
    pub fn compression_ratio(&self) -> f64 {
        if self.original_size == 0 {
            0.0
        } else {
            self.encoded_size as f64 / self.original_size as f64
        }
    }

    /// Bytes saved by the transformation (negative when the payload grew)
    pub fn bytes_saved(&self) -> i64 {
        self.original_size as i64 - self.encoded_size as i64
    }

    pub fn was_resized(&self) -> bool {
        match (self.original_dimensions, self.output_dimensions) {
            (Some(original), Some(output)) => original != output,
            _ => false,
        }
    }

    /// Log the record at info level with structured fields
    pub fn emit(&self, key: &str) {
        info!(
            key = %key,
            original_bytes = self.original_size,
            encoded_bytes = self.encoded_size,
            format = self.format,
            quality = self.quality,
            reduction_steps = self.reduction_steps,
            resized = self.was_resized(),
            compression_ratio = self.compression_ratio(),
            elapsed_ms = self.elapsed.as_millis() as u64,
            "transformed image"
        );
    }
}
