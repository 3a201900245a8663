//! Settings shared by both pipeline stages

/// Region used when neither `AWS_REGION` nor `AWS_DEFAULT_REGION` is set
pub const DEFAULT_REGION: &str = "us-west-2";

/// Log level used when `LOG_LEVEL` is unset or unrecognised
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeSettings {
    /// Region for the S3, Textract and Bedrock clients
    pub region: String,

    /// Lower-case tracing level (`error`, `warn`, `info`, `debug`, `trace`)
    pub log_level: String,
}

impl Default for RuntimeSettings {
    fn default() -> Self {
        Self {
            region: DEFAULT_REGION.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl RuntimeSettings {
    /// Load from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load from an arbitrary variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let region = lookup("AWS_REGION")
            .filter(|v| !v.is_empty())
            .or_else(|| lookup("AWS_DEFAULT_REGION").filter(|v| !v.is_empty()))
            .unwrap_or_else(|| DEFAULT_REGION.to_string());

        Self {
            region,
            log_level: normalize_log_level(lookup("LOG_LEVEL").as_deref()),
        }
    }
}

/// Map `LOG_LEVEL` values (`INFO`, `warning`, ...) onto tracing levels
pub fn normalize_log_level(raw: Option<&str>) -> String {
    let level = match raw.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
        Some("error") | Some("critical") => "error",
        Some("warn") | Some("warning") => "warn",
        Some("debug") => "debug",
        Some("trace") => "trace",
        _ => DEFAULT_LOG_LEVEL,
    };
    level.to_string()
}

/// Interpret a boolean toggle such as `USE_BEDROCK`
pub fn parse_flag(raw: Option<&str>, default: bool) -> bool {
    match raw {
        Some(v) => matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"),
        None => default,
    }
}
