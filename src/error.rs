//! Application-wide error types using thiserror
//!
//! All errors in the application should be wrapped in AppError
//! to provide consistent error handling across the codebase.

use thiserror::Error;
use crate::api::errors::ApiError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = AppError::Config("dashboard.page_size must be > 0".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration error: dashboard.page_size must be > 0"
        );
    }

    #[test]
    fn test_api_error_conversion() {
        let err: AppError = ApiError::Unreachable("connection refused".to_string()).into();
        assert!(matches!(err, AppError::Api(ApiError::Unreachable(_))));
        assert!(err.to_string().starts_with("API error:"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: AppError = io.into();
        assert!(matches!(err, AppError::Io(_)));
    }
}
