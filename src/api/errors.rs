//! Sentiment service error types
//!
//! All failures talking to the analysis service are wrapped in `ApiError`,
//! which implements thiserror for consistent error handling.

use thiserror::Error;

/// Failure taxonomy surfaced to callers of the service contract
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No connection to the service could be made
    Unreachable,
    /// The request reached the service but failed
    Service,
    /// Input was rejected locally before any request was sent
    Validation,
}

/// Service-specific error types for API operations
#[derive(Error, Debug)]
pub enum ApiError {
    /// Connection refused, DNS failure or transport timeout
    #[error("Service unreachable: {0}")]
    Unreachable(String),

    /// Non-success HTTP status returned by the service
    #[error("Service error (status {status}): {message}")]
    Service { status: u16, message: String },

    /// Response body could not be decoded
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Blank or malformed input rejected before the network call
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for service operations
pub type ApiResult<T> = std::result::Result<T, ApiError>;

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Unreachable(_) => ErrorKind::Unreachable,
            ApiError::Service { .. } | ApiError::InvalidResponse(_) => ErrorKind::Service,
            ApiError::Validation(_) => ErrorKind::Validation,
        }
    }

    pub fn is_unreachable(&self) -> bool {
        self.kind() == ErrorKind::Unreachable
    }

    /// Single user-visible description of the failure.
    ///
    /// Connectivity failures point at the configured service address so the
    /// user knows the backend is down rather than misbehaving.
    pub fn user_message(&self, base_url: &str) -> String {
        match self {
            ApiError::Unreachable(_) => format!(
                "Failed to connect to the sentiment service. Make sure the backend is running on {}",
                base_url
            ),
            ApiError::Service { status, message } if message.is_empty() => {
                format!("The sentiment service returned an error (status {})", status)
            }
            ApiError::Service { status, message } => format!(
                "The sentiment service returned an error (status {}): {}",
                status, message
            ),
            ApiError::InvalidResponse(reason) => {
                format!("The sentiment service sent an unreadable response: {}", reason)
            }
            ApiError::Validation(reason) => reason.clone(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            ApiError::Unreachable(err.to_string())
        } else if err.is_decode() {
            ApiError::InvalidResponse(err.to_string())
        } else if let Some(status) = err.status() {
            ApiError::Service {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else if err.is_request() {
            // Request never got an answer (reset connection, broken pipe)
            ApiError::Unreachable(err.to_string())
        } else {
            ApiError::InvalidResponse(err.to_string())
        }
    }
}
