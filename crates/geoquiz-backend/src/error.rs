//! Backend error types.

use thiserror::Error;

/// Errors that can occur when talking to the hosted backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Credentials or API key were rejected.
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The requested row or resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// A request needs a signed-in user.
    #[error("no signed-in user for {0}")]
    NotSignedIn(&'static str),

    /// The API returned an error response.
    #[error("API error (HTTP {status}): {message}")]
    ApiError { status: u16, message: String },

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    NetworkError(String),
}
