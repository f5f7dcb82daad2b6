//! # API Errors
//!
//! Error types for API operations.

use thiserror::Error;

/// Errors that can occur during API operations.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Network or HTTP error.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The backend rejected the credential (HTTP 401).
    ///
    /// By the time the caller sees this, the durable session store has
    /// already been cleared and the unauthorized hook has fired.
    #[error("{0}")]
    Unauthorized(String),

    /// The backend returned a non-401 error response.
    #[error("backend error: {status} - {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message from the backend.
        message: String,
    },

    /// Failed to deserialize response.
    #[error("invalid response format: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    /// Builds an error from a non-success status and raw response body.
    ///
    /// The backend wraps error messages as `{"detail": "..."}`, so the
    /// detail field is extracted when present; otherwise the raw body is
    /// used as-is.
    pub(crate) fn from_status(status: u16, body: &str) -> Self {
        let message = extract_detail(body);
        if status == 401 {
            ApiError::Unauthorized(if message.is_empty() {
                "authentication rejected".to_string()
            } else {
                message
            })
        } else {
            ApiError::Api { status, message }
        }
    }
}

/// Pulls the human-readable `detail` field out of a backend error body.
fn extract_detail(body: &str) -> String {
    #[derive(serde::Deserialize)]
    struct Detail {
        detail: String,
    }

    match serde_json::from_str::<Detail>(body) {
        Ok(d) => d.detail,
        Err(_) => body.trim().to_string(),
    }
}

/// Result type for API operations.
pub type ApiResult<T> = Result<T, ApiError>;
