//! Ingestion stage: extracts text from documents stored in S3 using Textract
//!
//! Images are analysed synchronously from their bytes. Multi-page formats
//! (PDF, TIFF) go through an asynchronous detection job that is polled until
//! it completes, fails, or runs out of time.

pub mod aws;
pub mod document;
pub mod error;
pub mod extract;
pub mod handler;
pub mod ocr;
pub mod poller;

#[cfg(test)]
mod fakes;

pub use document::ExtractionMode;
pub use error::ExtractionError;
pub use extract::Extractor;
pub use poller::{poll_until_done, PollSettings};

use shared_types::RuntimeSettings;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Configuration for the ingestion Lambda, read once at cold start
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IngestionConfig {
    pub runtime: RuntimeSettings,
    pub poll: PollSettings,
}

impl IngestionConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            runtime: RuntimeSettings::from_lookup(&lookup),
            poll: PollSettings::from_lookup(&lookup),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_defaults() {
        let config = IngestionConfig::from_lookup(|_| None);
        assert_eq!(config.runtime.region, "us-west-2");
        assert_eq!(config.runtime.log_level, "info");
        assert_eq!(config.poll.max_wait, Duration::from_secs(60));
        assert_eq!(config.poll.poll_interval, Duration::from_secs(2));
    }

    #[test]
    fn test_overrides() {
        let config = IngestionConfig::from_lookup(|name| match name {
            "AWS_REGION" => Some("eu-central-1".into()),
            "LOG_LEVEL" => Some("DEBUG".into()),
            "TEXTRACT_MAX_WAIT_SECONDS" => Some("300".into()),
            _ => None,
        });
        assert_eq!(config.runtime.region, "eu-central-1");
        assert_eq!(config.runtime.log_level, "debug");
        assert_eq!(config.poll.max_wait, Duration::from_secs(300));
    }
}
