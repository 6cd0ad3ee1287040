//! Pipeline orchestration
//!
//! The handler owns the injected object store and walks an intercepted
//! exchange through eligibility, parameter resolution, origin fetch, and
//! the adaptive encoder, finishing with one of the terminal responses.
//! Storage failures propagate as errors instead of synthesized responses.

pub mod response;

use std::sync::Arc;
use std::time::Instant;

use bytes::Bytes;
use tracing::{debug, info};

use crate::eligibility::{self, Continuation};
use crate::error::EdgeError;
use crate::event::{InterceptedExchange, OriginResponseEvent, ResponseDescriptor};
use crate::metrics::TransformMetrics;
use crate::storage::{FetchOutcome, ObjectStore};
use crate::transform::{self, ProcessedImage, SourceFormat, TransformRequest};

/// Edge handler with its injected collaborators
pub struct EdgeHandler {
    store: Arc<dyn ObjectStore>,
    max_output_bytes: usize,
}

impl EdgeHandler {
    pub fn new(store: Arc<dyn ObjectStore>, max_output_bytes: usize) -> Self {
        Self {
            store,
            max_output_bytes,
        }
    }

    /// Handle one origin-response event end to end
    pub async fn handle(
        &self,
        event: OriginResponseEvent,
    ) -> Result<ResponseDescriptor, EdgeError> {
        let exchange = InterceptedExchange::from_event(event)?;
        self.handle_exchange(exchange).await
    }

    /// Run the pipeline over an intercepted exchange
    pub async fn handle_exchange(
        &self,
        exchange: InterceptedExchange,
    ) -> Result<ResponseDescriptor, EdgeError> {
        let (key, format) = match eligibility::evaluate(&exchange) {
            Continuation::PassThrough => {
                debug!(
                    uri = %exchange.uri,
                    status = %exchange.upstream.status,
                    "pass-through: upstream not successful"
                );
                return Ok(exchange.upstream);
            }
            Continuation::Forbidden => {
                info!(uri = %exchange.uri, "forbidden: unsupported extension");
                return Ok(response::forbidden(exchange.upstream));
            }
            Continuation::Transformable { key, format } => (key, format),
        };

        let request = TransformRequest::from_query(&exchange.querystring);
        if request.is_passthrough() {
            debug!(key = %key, "pass-through: no transformation requested");
            return Ok(exchange.upstream);
        }

        let bytes = match self.store.fetch(&key).await? {
            FetchOutcome::Missing => {
                info!(key = %key, "not found: object absent or empty");
                return Ok(response::not_found(exchange.upstream));
            }
            FetchOutcome::Found(bytes) => bytes,
        };

        let started = Instant::now();
        let original_size = bytes.len();
        let processed = self.run_transform(bytes, format, request).await?;
        TransformMetrics::capture(original_size, &processed, started.elapsed()).emit(&key);

        Ok(response::success(exchange.upstream, &processed))
    }

    /// Run the CPU-bound transform on the blocking pool
    async fn run_transform(
        &self,
        data: Bytes,
        format: SourceFormat,
        request: TransformRequest,
    ) -> Result<ProcessedImage, EdgeError> {
        let max_output_bytes = self.max_output_bytes;
        let processed = tokio::task::spawn_blocking(move || {
            transform::process_image(&data, format, &request, max_output_bytes)
        })
        .await
        .map_err(|e| EdgeError::internal(format!("encode task failed: {e}")))??;

        Ok(processed)
    }
}
