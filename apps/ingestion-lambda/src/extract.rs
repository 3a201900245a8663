//! Extraction of document text from a stored object

use std::sync::Arc;

use shared_types::{DocumentReference, ExtractionResult};
use tracing::{info, instrument};

use crate::document::ExtractionMode;
use crate::error::ExtractionError;
use crate::ocr::{line_texts, ObjectStore, OcrService};
use crate::poller::{poll_until_done, PollSettings};

/// Turns a document reference into its text lines.
///
/// Holds the object store and OCR clients built at cold start; cheap to
/// share across concurrent invocations.
#[derive(Clone)]
pub struct Extractor {
    store: Arc<dyn ObjectStore>,
    ocr: Arc<dyn OcrService>,
    poll: PollSettings,
}

impl Extractor {
    pub fn new(store: Arc<dyn ObjectStore>, ocr: Arc<dyn OcrService>, poll: PollSettings) -> Self {
        Self { store, ocr, poll }
    }

    #[instrument(
        skip_all,
        fields(contract_id = %document.contract_id, bucket = %document.location.bucket, key = %document.location.key)
    )]
    pub async fn extract(
        &self,
        document: &DocumentReference,
    ) -> Result<ExtractionResult, ExtractionError> {
        let location = &document.location;
        let mode = ExtractionMode::for_key(&location.key);
        info!(?mode, "Extracting text");

        let lines = match mode {
            ExtractionMode::Async => {
                let job_id = self
                    .ocr
                    .start_text_detection(location)
                    .await?
                    .ok_or(ExtractionError::MissingJobId)?;
                info!(job_id = %job_id, "Started text detection job");
                poll_until_done(self.ocr.as_ref(), &job_id, &self.poll).await?
            }
            ExtractionMode::Sync => {
                let bytes = self.store.get_object(location).await?;
                let blocks = self.ocr.detect_text(bytes).await?;
                line_texts(&blocks)
            }
        };

        Ok(ExtractionResult::from_lines(lines))
    }
}
