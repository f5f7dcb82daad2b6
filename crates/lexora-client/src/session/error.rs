//! Session error types.

use thiserror::Error;

use crate::api::ApiError;

/// Failure result of a mutating session operation.
///
/// Transport errors never cross this boundary: every [`ApiError`] is
/// folded into a best-effort human-readable message suitable for inline
/// display.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The backend rejected the operation or the request failed.
    #[error("{0}")]
    Rejected(String),

    /// An authenticated-only operation was called without a session.
    #[error("not authenticated")]
    NotAuthenticated,
}

impl SessionError {
    /// Folds an API error into a display message, falling back to the
    /// per-operation default when the backend supplied nothing useful.
    pub(crate) fn from_api(err: ApiError, fallback: &str) -> Self {
        let message = match err {
            ApiError::Api { message, .. } if !message.is_empty() => message,
            ApiError::Unauthorized(message) if !message.is_empty() => message,
            _ => fallback.to_string(),
        };
        SessionError::Rejected(message)
    }
}
