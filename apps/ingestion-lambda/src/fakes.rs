//! In-memory stand-ins for S3 and Textract

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use shared_types::S3Location;

use crate::error::ExtractionError;
use crate::ocr::{JobPage, ObjectStore, OcrService, TextBlock};

#[derive(Default)]
pub struct FakeStore {
    objects: HashMap<(String, String), Vec<u8>>,
    reads: Mutex<usize>,
}

impl FakeStore {
    pub fn with_object(bucket: &str, key: &str, body: &[u8]) -> Self {
        let mut store = Self::default();
        store
            .objects
            .insert((bucket.to_string(), key.to_string()), body.to_vec());
        store
    }

    pub fn reads(&self) -> usize {
        *self.reads.lock().unwrap()
    }
}

#[async_trait]
impl ObjectStore for FakeStore {
    async fn get_object(&self, location: &S3Location) -> Result<Vec<u8>, ExtractionError> {
        *self.reads.lock().unwrap() += 1;
        self.objects
            .get(&(location.bucket.clone(), location.key.clone()))
            .cloned()
            .ok_or_else(|| ExtractionError::ObjectStore("NoSuchKey".to_string()))
    }
}

/// Scripted OCR service. Job pages are served in order and the last one
/// repeats forever.
#[derive(Default)]
pub struct FakeOcr {
    pub sync_blocks: Vec<TextBlock>,
    pub job_id: Option<String>,
    pages: Mutex<VecDeque<JobPage>>,
    calls: Mutex<Vec<String>>,
}

impl FakeOcr {
    pub fn with_sync_blocks(blocks: Vec<TextBlock>) -> Self {
        Self {
            sync_blocks: blocks,
            ..Self::default()
        }
    }

    pub fn with_pages(pages: Vec<JobPage>) -> Self {
        Self {
            job_id: Some("job-1".to_string()),
            pages: Mutex::new(pages.into()),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl OcrService for FakeOcr {
    async fn detect_text(&self, document: Vec<u8>) -> Result<Vec<TextBlock>, ExtractionError> {
        self.record(format!("detect:{}", document.len()));
        Ok(self.sync_blocks.clone())
    }

    async fn start_text_detection(
        &self,
        location: &S3Location,
    ) -> Result<Option<String>, ExtractionError> {
        self.record(format!("start:{}/{}", location.bucket, location.key));
        Ok(self.job_id.clone())
    }

    async fn get_text_detection(
        &self,
        job_id: &str,
        next_token: Option<&str>,
    ) -> Result<JobPage, ExtractionError> {
        self.record(format!("get:{job_id}:{}", next_token.unwrap_or("-")));
        let mut pages = self.pages.lock().unwrap();
        let page = if pages.len() > 1 {
            pages.pop_front()
        } else {
            pages.front().cloned()
        };
        page.ok_or_else(|| ExtractionError::Ocr("no scripted page".to_string()))
    }
}
