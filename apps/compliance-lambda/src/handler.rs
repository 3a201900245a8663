//! Lambda event handling for the compliance stage

use compliance_engine::ComplianceEngine;
use lambda_runtime::Error;
use serde_json::Value;
use shared_types::{ComplianceRequest, ErrorResponse};
use tracing::error;

/// Evaluate one ingestion output. Failures come back as
/// `{"status": "error", "message"}` payloads.
pub async fn handle_event(engine: &ComplianceEngine, event: Value) -> Result<Value, Error> {
    if !event.is_object() {
        error!("Compliance event is not a JSON object");
        return Ok(serde_json::to_value(ErrorResponse::new(
            "Event must be a JSON object",
        ))?);
    }

    let request: ComplianceRequest = match serde_json::from_value(event) {
        Ok(request) => request,
        Err(err) => {
            error!(error = %err, "Malformed compliance event");
            return Ok(serde_json::to_value(ErrorResponse::new(format!(
                "Invalid event: {err}"
            )))?);
        }
    };

    match engine.evaluate(&request).await {
        Ok(report) => Ok(serde_json::to_value(report)?),
        Err(err) => {
            error!(error = %err, "Invalid compliance event");
            Ok(serde_json::to_value(ErrorResponse::new(err.to_string()))?)
        }
    }
}
