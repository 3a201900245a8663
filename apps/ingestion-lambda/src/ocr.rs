//! Seams to the object store and the OCR service
//!
//! The extractor only sees these traits; [`crate::aws`] provides the S3 and
//! Textract implementations and tests substitute in-memory fakes.

use async_trait::async_trait;
use shared_types::S3Location;

use crate::error::ExtractionError;

/// Read access to stored documents
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn get_object(&self, location: &S3Location) -> Result<Vec<u8>, ExtractionError>;
}

/// Text detection, synchronous and job-based
#[async_trait]
pub trait OcrService: Send + Sync {
    /// Analyse document bytes in a single call
    async fn detect_text(&self, document: Vec<u8>) -> Result<Vec<TextBlock>, ExtractionError>;

    /// Start a detection job against a stored object. `None` when the
    /// service accepted the request without returning a job id.
    async fn start_text_detection(
        &self,
        location: &S3Location,
    ) -> Result<Option<String>, ExtractionError>;

    /// Fetch one page of job status and results
    async fn get_text_detection(
        &self,
        job_id: &str,
        next_token: Option<&str>,
    ) -> Result<JobPage, ExtractionError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Line,
    Other,
}

/// One structured item returned by the OCR service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBlock {
    pub kind: BlockKind,
    pub text: Option<String>,
}

impl TextBlock {
    pub fn line(text: impl Into<String>) -> Self {
        Self {
            kind: BlockKind::Line,
            text: Some(text.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    InProgress,
    Succeeded,
    PartialSuccess,
    Failed,
    Unknown(String),
}

impl JobStatus {
    pub fn from_service(status: &str) -> Self {
        match status {
            "IN_PROGRESS" => JobStatus::InProgress,
            "SUCCEEDED" => JobStatus::Succeeded,
            "PARTIAL_SUCCESS" => JobStatus::PartialSuccess,
            "FAILED" => JobStatus::Failed,
            other => JobStatus::Unknown(other.to_string()),
        }
    }
}

/// One `GetDocumentTextDetection` response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobPage {
    pub status: JobStatus,
    pub status_message: Option<String>,
    pub blocks: Vec<TextBlock>,
    pub next_token: Option<String>,
}

impl JobPage {
    pub fn in_progress() -> Self {
        Self {
            status: JobStatus::InProgress,
            status_message: None,
            blocks: vec![],
            next_token: None,
        }
    }
}

/// Text of the LINE blocks, in service order
pub fn line_texts(blocks: &[TextBlock]) -> Vec<String> {
    blocks
        .iter()
        .filter(|b| b.kind == BlockKind::Line)
        .filter_map(|b| b.text.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_texts_keeps_lines_in_order() {
        let blocks = vec![
            TextBlock {
                kind: BlockKind::Other,
                text: None,
            },
            TextBlock::line("first"),
            TextBlock {
                kind: BlockKind::Other,
                text: Some("word".into()),
            },
            TextBlock {
                kind: BlockKind::Line,
                text: None,
            },
            TextBlock::line("second"),
        ];
        assert_eq!(line_texts(&blocks), vec!["first", "second"]);
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(JobStatus::from_service("SUCCEEDED"), JobStatus::Succeeded);
        assert_eq!(JobStatus::from_service("PARTIAL_SUCCESS"), JobStatus::PartialSuccess);
        assert_eq!(
            JobStatus::from_service("PENDING"),
            JobStatus::Unknown("PENDING".into())
        );
    }
}
