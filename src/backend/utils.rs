use reqwest::Response;
use serde::Deserialize;
use tracing::error;

use crate::error::{ApiErrorKind, ReportError, Result};

/// Convert a reqwest error to a ReportError, handling timeout errors specially.
pub fn handle_http_error(e: reqwest::Error, provider_name: &str) -> ReportError {
    error!(error = %e, "HTTP request to {} failed", provider_name);
    if e.is_timeout() {
        ReportError::Timeout
    } else {
        ReportError::HttpError(e)
    }
}

/// Check HTTP response status and turn an unsuccessful one into an `ApiError`.
pub async fn check_response_status(response: Response, provider_name: &str) -> Result<Response> {
    let status = response.status();
    if !status.is_success() {
        let error_text = response.text().await?;
        error!(
            status = %status,
            error = %error_text,
            "{} API returned error response", provider_name
        );
        let kind = classify_status(status.as_u16(), extract_error_message(&error_text));
        return Err(ReportError::api_error(provider_name, kind));
    }
    Ok(response)
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Pull `error.message` out of a Google-style error envelope, falling back to the raw body.
pub(crate) fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .map(|envelope| envelope.error.message)
        .unwrap_or_else(|_| body.trim().to_string())
}

pub(crate) fn classify_status(status: u16, details: String) -> ApiErrorKind {
    match status {
        401 | 403 => ApiErrorKind::AuthenticationFailed,
        429 => ApiErrorKind::RateLimited { details },
        400 => ApiErrorKind::BadRequest { details },
        500..=599 => ApiErrorKind::ServerError { status, details },
        _ => ApiErrorKind::UnexpectedStatus { status, details },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_status() {
        assert_eq!(
            classify_status(401, String::new()),
            ApiErrorKind::AuthenticationFailed
        );
        assert_eq!(
            classify_status(403, String::new()),
            ApiErrorKind::AuthenticationFailed
        );
        assert_eq!(
            classify_status(429, "quota".to_string()),
            ApiErrorKind::RateLimited {
                details: "quota".to_string()
            }
        );
        assert_eq!(
            classify_status(503, "busy".to_string()),
            ApiErrorKind::ServerError {
                status: 503,
                details: "busy".to_string()
            }
        );
        assert!(matches!(
            classify_status(404, String::new()),
            ApiErrorKind::UnexpectedStatus { status: 404, .. }
        ));
    }

    #[test]
    fn test_extract_error_message() {
        let body = r#"{"error":{"code":400,"message":"API key not valid.","status":"INVALID_ARGUMENT"}}"#;
        assert_eq!(extract_error_message(body), "API key not valid.");
        assert_eq!(extract_error_message(" upstream down \n"), "upstream down");
    }
}
