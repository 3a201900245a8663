//! Routing of stored documents to the synchronous or asynchronous OCR path

/// How a document is sent to Textract
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionMode {
    /// Object bytes are downloaded and analysed in a single call
    Sync,
    /// A detection job is started against the stored object and polled
    Async,
}

/// Multi-page formats the synchronous API does not accept
const ASYNC_EXTENSIONS: &[&str] = &["pdf", "tif", "tiff"];

impl ExtractionMode {
    pub fn for_key(key: &str) -> Self {
        match extension(key) {
            Some(ext) if ASYNC_EXTENSIONS.iter().any(|a| ext.eq_ignore_ascii_case(a)) => {
                ExtractionMode::Async
            }
            _ => ExtractionMode::Sync,
        }
    }
}

/// Extension of the final path segment, without the dot.
/// Dotfiles like `.pdf` have no extension.
pub fn extension(key: &str) -> Option<&str> {
    let name = key.rsplit('/').next().unwrap_or(key);
    match name.rfind('.') {
        Some(0) | None => None,
        Some(dot) => Some(&name[dot + 1..]),
    }
}
