//! AWS Lambda entry point for the ingestion stage
//!
//! ## Deployment
//!
//! ```bash
//! cargo lambda build --release --arm64 -p ingestion-lambda
//! cargo lambda deploy ingestion-lambda --iam-role arn:aws:iam::ACCOUNT:role/ingestion-lambda
//! ```

use std::sync::Arc;

use aws_config::{BehaviorVersion, Region};
use ingestion_lambda::aws::{S3ObjectStore, TextractOcr};
use ingestion_lambda::handler::handle_event;
use ingestion_lambda::{Extractor, IngestionConfig};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde_json::Value;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = IngestionConfig::from_env();

    // CloudWatch-friendly JSON logs: no colours, no timestamps
    tracing_subscriber::fmt()
        .json()
        .with_ansi(false)
        .with_current_span(false)
        .without_time()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(format!("ingestion_lambda={}", config.runtime.log_level).parse()?),
        )
        .init();

    let sdk_config = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(config.runtime.region.clone()))
        .load()
        .await;

    let extractor = Arc::new(Extractor::new(
        Arc::new(S3ObjectStore::new(aws_sdk_s3::Client::new(&sdk_config))),
        Arc::new(TextractOcr::new(aws_sdk_textract::Client::new(&sdk_config))),
        config.poll,
    ));

    info!(
        version = ingestion_lambda::VERSION,
        region = %config.runtime.region,
        max_wait_secs = config.poll.max_wait.as_secs_f64(),
        "Starting ingestion Lambda"
    );

    run(service_fn(move |event: LambdaEvent<Value>| {
        let extractor = Arc::clone(&extractor);
        async move { handle_event(&extractor, event.payload).await }
    }))
    .await
}
