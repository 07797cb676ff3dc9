//! Sentiment service trait definition
//!
//! The `SentimentApi` trait is the seam between the orchestration core and
//! the remote analysis service. The HTTP client implements it for
//! production; tests use the in-memory `MockSentimentApi`.

use async_trait::async_trait;

use crate::api::errors::ApiResult;
use crate::api::types::{AnalysisResult, LiveNewsItem, Model, NewsItem, Stats};

/// Consumed service contract
///
/// `entity` is `None` for an unfiltered query. Implementations must not
/// retry on failure; recovery is always an explicit user action.
#[async_trait]
pub trait SentimentApi: Send + Sync {
    /// Label counts, optionally scoped to one entity
    async fn stats(&self, entity: Option<&str>) -> ApiResult<Stats>;

    /// One page of labeled news in service order
    ///
    /// # Arguments
    /// * `entity` - Optional entity scope
    /// * `offset` - Number of items to skip
    /// * `limit` - Maximum number of items to return
    async fn news(&self, entity: Option<&str>, offset: usize, limit: usize)
        -> ApiResult<Vec<NewsItem>>;

    /// The whole live feed, capped by the service
    async fn live_news(&self) -> ApiResult<Vec<LiveNewsItem>>;

    /// Ask the service to ingest up to `limit` fresh live items
    ///
    /// Only success or failure matters to callers.
    async fn fetch_live_news(&self, limit: usize) -> ApiResult<()>;

    /// Score one piece of text with the selected model
    async fn analyze_text(&self, text: &str, model: Model) -> ApiResult<AnalysisResult>;

    /// Address used in user-facing connectivity messages
    fn base_url(&self) -> &str;
}
