//! Drives an asynchronous text detection job to completion

use std::time::Duration;

use tokio::time::{sleep, Instant};
use tracing::{debug, instrument, warn};

use crate::error::ExtractionError;
use crate::ocr::{line_texts, JobStatus, OcrService};

pub const DEFAULT_MAX_WAIT: Duration = Duration::from_secs(60);
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    /// Budget for non-terminal statuses, measured from the first poll
    pub max_wait: Duration,
    pub poll_interval: Duration,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            max_wait: DEFAULT_MAX_WAIT,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl PollSettings {
    /// Read `TEXTRACT_MAX_WAIT_SECONDS` and `TEXTRACT_POLL_INTERVAL_SECONDS`.
    /// Unparseable or negative values keep the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let seconds = |name: &str, default: Duration| {
            lookup(name)
                .and_then(|v| v.trim().parse::<f64>().ok())
                .and_then(|s| Duration::try_from_secs_f64(s).ok())
                .unwrap_or(default)
        };

        Self {
            max_wait: seconds("TEXTRACT_MAX_WAIT_SECONDS", DEFAULT_MAX_WAIT),
            poll_interval: seconds("TEXTRACT_POLL_INTERVAL_SECONDS", DEFAULT_POLL_INTERVAL),
        }
    }
}

/// Poll a job until it reaches a terminal status and collect its lines.
///
/// A completed job is paged through with its continuation token, without
/// sleeping between pages. Non-terminal statuses check the elapsed time
/// against `max_wait` before each sleep.
#[instrument(skip(ocr, settings))]
pub async fn poll_until_done(
    ocr: &dyn OcrService,
    job_id: &str,
    settings: &PollSettings,
) -> Result<Vec<String>, ExtractionError> {
    let started = Instant::now();
    let mut next_token: Option<String> = None;
    let mut lines = Vec::new();

    loop {
        let page = ocr.get_text_detection(job_id, next_token.as_deref()).await?;
        debug!(status = ?page.status, "Polled text detection job");

        match page.status {
            status @ (JobStatus::Succeeded | JobStatus::PartialSuccess) => {
                if status == JobStatus::PartialSuccess {
                    warn!(
                        status_message = page.status_message.as_deref().unwrap_or_default(),
                        "Text detection job partially succeeded"
                    );
                }
                lines.extend(line_texts(&page.blocks));

                match page.next_token.filter(|t| !t.is_empty()) {
                    Some(token) => next_token = Some(token),
                    None => return Ok(lines),
                }
            }
            JobStatus::Failed => {
                return Err(ExtractionError::JobFailed {
                    job_id: job_id.to_string(),
                    message: page.status_message,
                });
            }
            JobStatus::InProgress | JobStatus::Unknown(_) => {
                if started.elapsed() > settings.max_wait {
                    return Err(ExtractionError::JobTimeout {
                        job_id: job_id.to_string(),
                        waited: settings.max_wait,
                    });
                }
                sleep(settings.poll_interval).await;
            }
        }
    }
}
