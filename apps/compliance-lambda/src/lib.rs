//! Compliance stage: PII and financial-control checks over extracted text,
//! optionally supplemented by a Bedrock-hosted advisory model

pub mod bedrock;
pub mod handler;

use compliance_engine::advisory::{DEFAULT_MAX_TOKENS, DEFAULT_MODEL_ID};
use compliance_engine::AdvisoryModelSettings;
use shared_types::config::parse_flag;
use shared_types::RuntimeSettings;

pub use bedrock::BedrockAdvisoryClient;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Configuration for the compliance Lambda, read once at cold start
#[derive(Debug, Clone, PartialEq)]
pub struct ComplianceConfig {
    pub runtime: RuntimeSettings,
    /// `USE_BEDROCK`
    pub use_advisory: bool,
    pub advisory: AdvisoryModelSettings,
}

impl Default for ComplianceConfig {
    fn default() -> Self {
        Self {
            runtime: RuntimeSettings::default(),
            use_advisory: true,
            advisory: AdvisoryModelSettings::default(),
        }
    }
}

impl ComplianceConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let model_id = lookup("BEDROCK_MODEL_ID")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL_ID.to_string());
        let max_tokens = lookup("BEDROCK_MAX_TOKENS")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(DEFAULT_MAX_TOKENS);

        Self {
            runtime: RuntimeSettings::from_lookup(&lookup),
            use_advisory: parse_flag(lookup("USE_BEDROCK").as_deref(), true),
            advisory: AdvisoryModelSettings {
                model_id,
                max_tokens,
                ..AdvisoryModelSettings::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        assert_eq!(ComplianceConfig::from_lookup(|_| None), ComplianceConfig::default());
        let config = ComplianceConfig::default();
        assert!(config.use_advisory);
        assert_eq!(config.advisory.model_id, DEFAULT_MODEL_ID);
        assert_eq!(config.advisory.max_tokens, 500);
        assert_eq!(config.advisory.temperature, 0.0);
    }

    #[test]
    fn test_use_bedrock_flag() {
        for (raw, expected) in [
            ("1", true),
            ("TRUE", true),
            ("yes", true),
            ("0", false),
            ("false", false),
            ("off", false),
        ] {
            let config = ComplianceConfig::from_lookup(|name| {
                (name == "USE_BEDROCK").then(|| raw.to_string())
            });
            assert_eq!(config.use_advisory, expected, "USE_BEDROCK={raw}");
        }
    }

    #[test]
    fn test_model_overrides() {
        let config = ComplianceConfig::from_lookup(|name| match name {
            "BEDROCK_MODEL_ID" => Some("anthropic.claude-3-haiku-20240307-v1:0".into()),
            "BEDROCK_MAX_TOKENS" => Some("not a number".into()),
            _ => None,
        });
        assert_eq!(config.advisory.model_id, "anthropic.claude-3-haiku-20240307-v1:0");
        assert_eq!(config.advisory.max_tokens, DEFAULT_MAX_TOKENS);
    }
}
