use std::time::Duration;

/// Failures while turning a stored document into text
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("Object store error: {0}")]
    ObjectStore(String),

    #[error("Textract error: {0}")]
    Ocr(String),

    #[error(
        "Textract job {job_id} failed{}",
        .message.as_deref().map(|m| format!(": {m}")).unwrap_or_default()
    )]
    JobFailed {
        job_id: String,
        message: Option<String>,
    },

    #[error("Textract job {job_id} did not complete within {} seconds", .waited.as_secs_f64())]
    JobTimeout { job_id: String, waited: Duration },

    #[error("Textract did not return a job id")]
    MissingJobId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let failed = ExtractionError::JobFailed {
            job_id: "j-1".into(),
            message: Some("UNSUPPORTED_DOCUMENT".into()),
        };
        assert_eq!(failed.to_string(), "Textract job j-1 failed: UNSUPPORTED_DOCUMENT");

        let bare = ExtractionError::JobFailed {
            job_id: "j-1".into(),
            message: None,
        };
        assert_eq!(bare.to_string(), "Textract job j-1 failed");

        let timeout = ExtractionError::JobTimeout {
            job_id: "j-2".into(),
            waited: Duration::from_secs(60),
        };
        assert_eq!(
            timeout.to_string(),
            "Textract job j-2 did not complete within 60 seconds"
        );
    }
}
