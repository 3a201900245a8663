//! S3 and Textract implementations of the extraction seams

use async_trait::async_trait;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::Client as S3Client;
use aws_sdk_textract::primitives::Blob;
use aws_sdk_textract::types::{Block, BlockType, Document, DocumentLocation, S3Object};
use aws_sdk_textract::Client as TextractClient;
use shared_types::S3Location;
use tracing::instrument;

use crate::error::ExtractionError;
use crate::ocr::{BlockKind, JobPage, JobStatus, ObjectStore, OcrService, TextBlock};

pub struct S3ObjectStore {
    client: S3Client,
}

impl S3ObjectStore {
    pub fn new(client: S3Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    #[instrument(skip(self), fields(bucket = %location.bucket, key = %location.key))]
    async fn get_object(&self, location: &S3Location) -> Result<Vec<u8>, ExtractionError> {
        let output = self
            .client
            .get_object()
            .bucket(&location.bucket)
            .key(&location.key)
            .send()
            .await
            .map_err(|e| ExtractionError::ObjectStore(DisplayErrorContext(&e).to_string()))?;

        let body = output
            .body
            .collect()
            .await
            .map_err(|e| ExtractionError::ObjectStore(e.to_string()))?;

        Ok(body.into_bytes().to_vec())
    }
}

pub struct TextractOcr {
    client: TextractClient,
}

impl TextractOcr {
    pub fn new(client: TextractClient) -> Self {
        Self { client }
    }
}

fn ocr_error<E: std::error::Error>(err: E) -> ExtractionError {
    ExtractionError::Ocr(DisplayErrorContext(&err).to_string())
}

fn text_block(block: &Block) -> TextBlock {
    TextBlock {
        kind: match block.block_type() {
            Some(BlockType::Line) => BlockKind::Line,
            _ => BlockKind::Other,
        },
        text: block.text().map(str::to_string),
    }
}

#[async_trait]
impl OcrService for TextractOcr {
    #[instrument(skip_all, fields(bytes = document.len()))]
    async fn detect_text(&self, document: Vec<u8>) -> Result<Vec<TextBlock>, ExtractionError> {
        let output = self
            .client
            .detect_document_text()
            .document(Document::builder().bytes(Blob::new(document)).build())
            .send()
            .await
            .map_err(ocr_error)?;

        Ok(output.blocks().iter().map(text_block).collect())
    }

    #[instrument(skip(self), fields(bucket = %location.bucket, key = %location.key))]
    async fn start_text_detection(
        &self,
        location: &S3Location,
    ) -> Result<Option<String>, ExtractionError> {
        let object = S3Object::builder()
            .bucket(&location.bucket)
            .name(&location.key)
            .build();

        let output = self
            .client
            .start_document_text_detection()
            .document_location(DocumentLocation::builder().s3_object(object).build())
            .send()
            .await
            .map_err(ocr_error)?;

        Ok(output.job_id().map(str::to_string))
    }

    #[instrument(skip(self))]
    async fn get_text_detection(
        &self,
        job_id: &str,
        next_token: Option<&str>,
    ) -> Result<JobPage, ExtractionError> {
        let output = self
            .client
            .get_document_text_detection()
            .job_id(job_id)
            .set_next_token(next_token.map(str::to_string))
            .send()
            .await
            .map_err(ocr_error)?;

        Ok(JobPage {
            status: output
                .job_status()
                .map(|s| JobStatus::from_service(s.as_str()))
                .unwrap_or_else(|| JobStatus::Unknown(String::new())),
            status_message: output.status_message().map(str::to_string),
            blocks: output.blocks().iter().map(text_block).collect(),
            next_token: output.next_token().map(str::to_string),
        })
    }
}
