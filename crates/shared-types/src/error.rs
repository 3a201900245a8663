/// Required input fields absent or empty
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
}

impl ValidationError {
    pub fn missing_fields(&self) -> &[&'static str] {
        match self {
            ValidationError::MissingFields(fields) => fields,
        }
    }
}
