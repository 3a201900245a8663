//! AWS Lambda entry point for the compliance stage
//!
//! ## Deployment
//!
//! ```bash
//! cargo lambda build --release --arm64 -p compliance-lambda
//! cargo lambda deploy compliance-lambda --iam-role arn:aws:iam::ACCOUNT:role/compliance-lambda
//! ```

use std::sync::Arc;

use aws_config::{BehaviorVersion, Region};
use compliance_engine::ComplianceEngine;
use compliance_lambda::handler::handle_event;
use compliance_lambda::{BedrockAdvisoryClient, ComplianceConfig};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde_json::Value;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = ComplianceConfig::from_env();

    // CloudWatch-friendly JSON logs: no colours, no timestamps
    tracing_subscriber::fmt()
        .json()
        .with_ansi(false)
        .with_current_span(false)
        .without_time()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(format!("compliance_lambda={}", config.runtime.log_level).parse()?)
                .add_directive(format!("compliance_engine={}", config.runtime.log_level).parse()?),
        )
        .init();

    let engine = if config.use_advisory {
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.runtime.region.clone()))
            .load()
            .await;
        let client = aws_sdk_bedrockruntime::Client::new(&sdk_config);
        ComplianceEngine::with_advisory(Arc::new(BedrockAdvisoryClient::new(
            client,
            config.advisory.clone(),
        )))
    } else {
        ComplianceEngine::new()
    };
    let engine = Arc::new(engine);

    info!(
        version = compliance_lambda::VERSION,
        region = %config.runtime.region,
        advisory = config.use_advisory,
        model = %config.advisory.model_id,
        "Starting compliance Lambda"
    );

    run(service_fn(move |event: LambdaEvent<Value>| {
        let engine = Arc::clone(&engine);
        async move { handle_event(&engine, event.payload).await }
    }))
    .await
}
