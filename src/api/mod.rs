//! Sentiment analysis service access
//!
//! This module provides the abstraction over the remote analysis service
//! and its reqwest-backed HTTP implementation.

pub mod errors;
pub mod http;
pub mod traits;
pub mod types;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types for convenience
pub use errors::{ApiError, ApiResult, ErrorKind};
pub use http::HttpSentimentApi;
pub use traits::SentimentApi;
pub use types::{
    parse_timestamp, AnalysisResult, AnalyzeRequest, LiveNewsItem, Model, ModelVerdict, NewsItem,
    SentimentLabel, Stats,
};
