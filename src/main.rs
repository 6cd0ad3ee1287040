use lambda_runtime::{service_fn, LambdaEvent};
use std::sync::Arc;
use suzaku::config::Config;
use suzaku::event::OriginResponseEvent;
use suzaku::handler::EdgeHandler;
use suzaku::storage::S3ObjectStore;

#[tokio::main]
async fn main() -> Result<(), lambda_runtime::Error> {
    // Initialize logging subsystem
    suzaku::logging::init_subscriber().expect("Failed to initialize logging subsystem");

    // Load Suzaku configuration from the function environment
    let config = Config::from_env().unwrap_or_else(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::process::exit(1);
    });

    tracing::info!(
        bucket = %config.bucket,
        region = config.region.as_deref().unwrap_or("provider chain"),
        max_output_bytes = config.max_output_bytes,
        "Configuration loaded successfully"
    );

    // Build the storage client and the handler once per process; warm
    // invocations reuse both.
    let store = S3ObjectStore::from_env(config.bucket.clone(), config.region.clone()).await;
    let handler = Arc::new(EdgeHandler::new(
        Arc::new(store),
        config.max_output_bytes,
    ));

    tracing::info!("Starting Suzaku origin-response handler");

    // Run the Lambda service loop (blocks until the runtime shuts down)
    lambda_runtime::run(service_fn(move |event: LambdaEvent<OriginResponseEvent>| {
        let handler = Arc::clone(&handler);
        async move {
            handler
                .handle(event.payload)
                .await
                .map_err(lambda_runtime::Error::from)
        }
    }))
    .await
}
