//! Internal error types for backend HTTP calls.
//!
//! These errors are internal to `mcpdesk-http` and are mapped to
//! [`mcpdesk_core::BackendError`] at the port boundary.

use thiserror::Error;

/// Result type alias for backend HTTP operations.
pub type HttpResult<T> = Result<T, HttpClientError>;

/// Errors raised while talking to a backend server.
#[derive(Debug, Error)]
pub enum HttpClientError {
    /// The backend answered with a non-2xx status.
    #[error("Backend request failed with status {status}: {url}")]
    ApiRequestFailed {
        /// HTTP status code
        status: u16,
        /// The URL that was requested
        url: String,
        /// Response body, if any
        body: String,
    },

    /// The backend answered with something we cannot read.
    #[error("Invalid response from backend: {message}")]
    InvalidResponse {
        /// Description of what was invalid
        message: String,
    },

    /// Network or HTTP client error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The base URL parses but cannot address HTTP endpoints.
    #[error("Unsupported base URL: {url}")]
    UnsupportedBaseUrl {
        /// The offending URL
        url: String,
    },

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON encoding or decoding error.
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl HttpClientError {
    /// Human-readable detail for a failed request.
    ///
    /// Backends report failures as `{"detail": "..."}`; that text is preferred
    /// over the raw body, and the URL is used when the body is empty.
    pub(crate) fn detail(&self) -> String {
        match self {
            Self::ApiRequestFailed { url, body, .. } => {
                let detail = serde_json::from_str::<serde_json::Value>(body)
                    .ok()
                    .and_then(|v| v.get("detail").and_then(|d| d.as_str()).map(String::from));
                match detail {
                    Some(detail) => detail,
                    None if body.trim().is_empty() => url.clone(),
                    None => body.trim().to_string(),
                }
            }
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failed(body: &str) -> HttpClientError {
        HttpClientError::ApiRequestFailed {
            status: 500,
            url: "http://localhost:3001/api/mcp/reload".to_string(),
            body: body.to_string(),
        }
    }

    #[test]
    fn test_api_request_failed_error_message() {
        let msg = failed("").to_string();
        assert!(msg.contains("500"));
        assert!(msg.contains("/api/mcp/reload"));
    }

    #[test]
    fn test_detail_prefers_backend_detail_field() {
        assert_eq!(failed(r#"{"detail": "Invalid tenant"}"#).detail(), "Invalid tenant");
    }

    #[test]
    fn test_detail_falls_back_to_body_then_url() {
        assert_eq!(failed("Internal Server Error").detail(), "Internal Server Error");
        assert_eq!(failed("  ").detail(), "http://localhost:3001/api/mcp/reload");
    }

    #[test]
    fn test_invalid_response_error_message() {
        let error = HttpClientError::InvalidResponse {
            message: "expected a list of incidents".to_string(),
        };
        assert!(error.to_string().contains("expected a list"));
        assert_eq!(error.detail(), error.to_string());
    }
}
