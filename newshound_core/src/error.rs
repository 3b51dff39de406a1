// src/error.rs

/// Failure raised by a single news source during one search call.
///
/// The collector records these per source and never lets them escape a
/// collection run.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Serde JSON error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Missing credentials: {0}")]
    MissingCredentials(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("{provider} API error: {status} - {body}")]
    Api {
        provider: &'static str,
        status: u16,
        body: String,
    },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Other error: {0}")]
    Other(String),
}

impl SourceError {
    pub fn code_str(&self) -> &'static str {
        match self {
            SourceError::InvalidInput(_) => "invalid_input",
            SourceError::Authentication(_) => "auth_failed",
            SourceError::MissingCredentials(_) => "missing_credentials",
            SourceError::Api { status, .. } if *status == 401 || *status == 403 => "auth_failed",
            SourceError::Api { status: 429, .. } => "rate_limited",
            SourceError::Api { .. } | SourceError::Http(_) => "upstream_error",
            SourceError::Parse(_) | SourceError::SerdeJson(_) => "parse_error",
            SourceError::Timeout(_) => "timeout",
            SourceError::Internal(_) | SourceError::Other(_) => "internal_error",
        }
    }

    /// Whether the failure is on our side of the wire rather than the provider's.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            SourceError::MissingCredentials(_)
                | SourceError::InvalidInput(_)
                | SourceError::Internal(_)
        )
    }

    pub(crate) fn api(provider: &'static str, status: reqwest::StatusCode, body: String) -> Self {
        SourceError::Api {
            provider,
            status: status.as_u16(),
            body,
        }
    }
}
