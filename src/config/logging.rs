//! Logging configuration module
//!
//! Provides configurable JSON/Pretty logging output
//!
//! # Usage
//! ```ignore
//! use crypto_pulse::config::logging::init_logging;
//! init_logging();
//! ```
//!
//! # Environment Variables
//! - `LOG_FORMAT`: Output format - `json` (default) or `pretty`
//! - `RUST_LOG`: Log level filter (default: `info`)

use tracing_subscriber::EnvFilter;

/// Output format selected by `LOG_FORMAT`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl LogFormat {
    /// Anything other than an exact `pretty` selects JSON
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("pretty") => LogFormat::Pretty,
            _ => LogFormat::Json,
        }
    }

    pub fn from_env() -> Self {
        Self::parse(std::env::var("LOG_FORMAT").ok().as_deref())
    }
}

/// Initialize logging with configurable format
///
/// Reads `LOG_FORMAT` from environment:
/// - `json` (default): Machine-parseable JSON output
/// - `pretty`: Human-readable output for development
///
/// Also respects `RUST_LOG` for log level filtering (default: `info`)
pub fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match LogFormat::from_env() {
        LogFormat::Pretty => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .pretty()
                .init();
        }
        LogFormat::Json => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .json()
                .init();
        }
    }
}

#[cfg(test)]
mod tests {
    // NOTE: `init_logging()` itself is not unit tested: a tracing subscriber
    // can only be installed once per process.
    use super::*;

    #[test]
    fn test_log_format_default_is_json() {
        assert_eq!(LogFormat::parse(None), LogFormat::Json);
    }

    #[test]
    fn test_pretty_format_detection() {
        let test_cases = vec![
            ("pretty", LogFormat::Pretty),
            ("json", LogFormat::Json),
            ("PRETTY", LogFormat::Json), // Case sensitive
            ("", LogFormat::Json),
            ("other", LogFormat::Json),
        ];

        for (input, expected) in test_cases {
            assert_eq!(LogFormat::parse(Some(input)), expected, "Failed for input: {}", input);
        }
    }

    #[test]
    fn test_env_filter_fallback() {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        assert!(!format!("{:?}", filter).is_empty());
    }
}
