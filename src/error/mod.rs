use thiserror::Error;

/// Classification of a non-success response from a model provider.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// The API key was rejected (HTTP 401/403)
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Quota or rate limit exceeded (HTTP 429)
    #[error("rate limited: {details}")]
    RateLimited { details: String },

    /// The request was malformed or refused (HTTP 400)
    #[error("bad request: {details}")]
    BadRequest { details: String },

    /// The provider failed internally (HTTP 5xx)
    #[error("server error ({status}): {details}")]
    ServerError { status: u16, details: String },

    /// Any other non-success status
    #[error("unexpected status {status}: {details}")]
    UnexpectedStatus { status: u16, details: String },
}

/// Error types for the medreport library.
///
/// The report generator never translates these: whatever the model client returns is
/// handed back to the caller as-is.
///
/// # Examples
///
/// ```
/// use medreport::{ApiErrorKind, ReportError};
///
/// let err = ReportError::api_error("Gemini", ApiErrorKind::AuthenticationFailed);
/// assert_eq!(err.to_string(), "Gemini API error: authentication failed");
///
/// match err {
///     ReportError::ApiError { kind: ApiErrorKind::AuthenticationFailed, .. } => {
///         println!("check GEMINI_API_KEY")
///     }
///     e => println!("Unexpected error: {}", e),
/// }
/// ```
#[derive(Error, Debug)]
pub enum ReportError {
    /// The provider answered with a non-success status
    #[error("{provider} API error: {kind}")]
    ApiError {
        provider: String,
        kind: ApiErrorKind,
    },

    /// Invalid or missing configuration (API key, logging setup)
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Operation timed out
    #[error("Timeout error")]
    Timeout,

    /// HTTP client error (from reqwest)
    #[cfg(feature = "gemini")]
    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON parsing error (from serde_json)
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl ReportError {
    pub fn api_error(provider: impl Into<String>, kind: ApiErrorKind) -> Self {
        ReportError::ApiError {
            provider: provider.into(),
            kind,
        }
    }
}

// HttpError and JsonError never compare equal: their sources don't implement PartialEq
impl PartialEq for ReportError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Self::ApiError {
                    provider: pa,
                    kind: ka,
                },
                Self::ApiError {
                    provider: pb,
                    kind: kb,
                },
            ) => pa == pb && ka == kb,
            (Self::ConfigError(a), Self::ConfigError(b)) => a == b,
            (Self::Timeout, Self::Timeout) => true,
            _ => false,
        }
    }
}

/// A specialized Result type for medreport operations.
pub type Result<T> = std::result::Result<T, ReportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = ReportError::api_error(
            "Gemini",
            ApiErrorKind::ServerError {
                status: 503,
                details: "overloaded".to_string(),
            },
        );
        assert_eq!(err.to_string(), "Gemini API error: server error (503): overloaded");
    }

    #[test]
    fn test_json_errors_never_equal() {
        let a: ReportError = serde_json::from_str::<u8>("x").unwrap_err().into();
        let b: ReportError = serde_json::from_str::<u8>("x").unwrap_err().into();
        assert_ne!(a, b);
        assert_eq!(ReportError::Timeout, ReportError::Timeout);
    }
}
