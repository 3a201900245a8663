//! Lambda event handling for the ingestion stage

use lambda_runtime::Error;
use serde_json::Value;
use shared_types::{ErrorResponse, ExtractionOutput, ExtractionRequest};
use tracing::{error, info};

use crate::extract::Extractor;

/// Handle one `{contract_id?, s3: {bucket, key}}` event.
///
/// Every outcome is a payload: the extraction output, or
/// `{"status": "error", "message", ...}`.
pub async fn handle_event(extractor: &Extractor, event: Value) -> Result<Value, Error> {
    if !event.is_object() {
        error!("Ingestion event is not a JSON object");
        return Ok(serde_json::to_value(ErrorResponse::new(
            "Event must be a JSON object",
        ))?);
    }

    let request: ExtractionRequest = match serde_json::from_value(event) {
        Ok(request) => request,
        Err(err) => {
            error!(error = %err, "Malformed ingestion event");
            return Ok(serde_json::to_value(ErrorResponse::new(format!(
                "Invalid event: {err}"
            )))?);
        }
    };

    let document = match request.validate() {
        Ok(document) => document,
        Err(err) => {
            error!(error = %err, "Invalid ingestion event");
            return Ok(serde_json::to_value(ErrorResponse::new(err.to_string()))?);
        }
    };

    match extractor.extract(&document).await {
        Ok(extraction) => {
            info!(
                contract_id = %document.contract_id,
                n_lines = extraction.n_lines,
                n_chars = extraction.n_chars,
                "Extraction complete"
            );
            Ok(serde_json::to_value(ExtractionOutput::new(document, extraction))?)
        }
        Err(err) => {
            error!(contract_id = %document.contract_id, error = %err, "Text extraction failed");
            Ok(serde_json::to_value(
                ErrorResponse::new(err.to_string()).for_document(&document),
            )?)
        }
    }
}
