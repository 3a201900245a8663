pub mod config;
pub mod error;
pub mod payload;
pub mod types;

pub use config::RuntimeSettings;
pub use error::ValidationError;
pub use payload::{
    ComplianceRequest, ErrorResponse, ExtractionMetadata, ExtractionOutput, ExtractionRequest,
    S3LocationInput, Status, ValidatedDocument,
};
pub use types::{
    ComplianceSummary, DocumentReference, ExtractionResult, Finding, FindingDetail, PiiKind,
    RuleId, S3Location, Severity, SeverityCounts, SeverityLabel,
};
