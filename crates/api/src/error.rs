//! Error types for the backend API client.
//!
//! Taxonomy mirrors what callers actually handle: transport failures, HTTP
//! error responses (status + optional `message` body), local validation
//! failures that short-circuit before any network call, and session-store
//! failures.

use thiserror::Error;

use crate::session::SessionError;

/// Errors that can occur when interacting with the backend API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed (transport-level).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend returned an error response.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Message from the response body, or the raw body if unstructured.
        message: String,
    },

    /// Authentication failed or the session token was rejected.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Rate limited by the backend.
    #[error("rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Failed to parse a response body.
    #[error("parse error: {0}")]
    Parse(String),

    /// Local validation failed; no request was issued.
    #[error("{0}")]
    Validation(String),

    /// Reading a local file for upload failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Session persistence failed.
    #[error("session error: {0}")]
    Session(#[from] SessionError),
}

impl ApiError {
    /// Shorthand for a local validation failure.
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

/// Error response body the backend sends alongside 4xx/5xx statuses.
#[derive(Debug, serde::Deserialize)]
pub(crate) struct ApiErrorBody {
    /// Human-readable message, when the backend provides one.
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = ApiError::Api {
            status: 422,
            message: "The given data was invalid.".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "API error (422): The given data was invalid."
        );

        let err = ApiError::RateLimited(30);
        assert_eq!(err.to_string(), "rate limited, retry after 30 seconds");
    }

    #[test]
    fn test_validation_error_display_is_bare_message() {
        let err = ApiError::validation("Your cart is empty");
        assert_eq!(err.to_string(), "Your cart is empty");
    }

    #[test]
    fn test_error_body_deserialization() {
        let body: ApiErrorBody =
            serde_json::from_str(r#"{"message":"Credenciais inválidas"}"#).expect("deserialize");
        assert_eq!(body.message.as_deref(), Some("Credenciais inválidas"));

        let body: ApiErrorBody = serde_json::from_str(r#"{"errors":{}}"#).expect("deserialize");
        assert!(body.message.is_none());
    }
}
