//! HTTP client for the sentiment analysis service
//!
//! Implements [`SentimentApi`] over the service's REST endpoints with
//! reqwest. Transport failures map to `ApiError::Unreachable`, non-2xx
//! statuses to `ApiError::Service`, undecodable bodies to
//! `ApiError::InvalidResponse`. No request is ever retried.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::api::errors::{ApiError, ApiResult};
use crate::api::traits::SentimentApi;
use crate::api::types::{AnalysisResult, AnalyzeRequest, LiveNewsItem, Model, NewsItem, Stats};
use crate::config::ApiConfig;
use crate::error::AppError;

/// Longest body excerpt kept in error messages
const MAX_ERROR_BODY_CHARS: usize = 200;

/// reqwest-backed implementation of the service contract
#[derive(Debug, Clone)]
pub struct HttpSentimentApi {
    base_url: String,
    client: reqwest::Client,
}

impl HttpSentimentApi {
    /// Build a client from API configuration
    ///
    /// # Errors
    /// Returns `AppError::Config` if the underlying HTTP client cannot be built.
    pub fn new(config: &ApiConfig) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("crypto_pulse/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ApiResult<T> {
        debug!(path = %path, query = ?query, "GET");
        let response = self.client.get(self.url(path)).query(query).send().await?;
        decode(path, response).await
    }

    async fn check_status(path: &str, response: reqwest::Response) -> ApiResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let message: String = body.trim().chars().take(MAX_ERROR_BODY_CHARS).collect();
        warn!(path = %path, status = %status, body = %message, "Sentiment service returned an error");
        Err(ApiError::Service {
            status: status.as_u16(),
            message,
        })
    }
}

async fn decode<T: DeserializeOwned>(path: &str, response: reqwest::Response) -> ApiResult<T> {
    let response = HttpSentimentApi::check_status(path, response).await?;
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| {
        let excerpt: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
        ApiError::InvalidResponse(format!("{} from {}: {}", e, path, excerpt))
    })
}

/// Query pair for an entity scope; blank scopes are omitted entirely
fn scope_param(entity: Option<&str>) -> Option<(&'static str, String)> {
    entity
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .map(|e| ("q", e.to_string()))
}

#[async_trait]
impl SentimentApi for HttpSentimentApi {
    async fn stats(&self, entity: Option<&str>) -> ApiResult<Stats> {
        let query: Vec<(&str, String)> = scope_param(entity).into_iter().collect();
        self.get_json("/api/stats", &query).await
    }

    async fn news(
        &self,
        entity: Option<&str>,
        offset: usize,
        limit: usize,
    ) -> ApiResult<Vec<NewsItem>> {
        let mut query = vec![("skip", offset.to_string()), ("limit", limit.to_string())];
        query.extend(scope_param(entity));
        self.get_json("/api/news", &query).await
    }

    async fn live_news(&self) -> ApiResult<Vec<LiveNewsItem>> {
        self.get_json("/api/live_news", &[]).await
    }

    async fn fetch_live_news(&self, limit: usize) -> ApiResult<()> {
        let path = "/api/fetch_live_news";
        debug!(path = %path, limit = limit, "POST");
        let response = self
            .client
            .post(self.url(path))
            .query(&[("limit", limit.to_string())])
            .send()
            .await?;
        Self::check_status(path, response).await?;
        Ok(())
    }

    async fn analyze_text(&self, text: &str, model: Model) -> ApiResult<AnalysisResult> {
        let path = "/api/analyze_text";
        debug!(path = %path, model = %model, chars = text.chars().count(), "POST");
        let body = AnalyzeRequest {
            text: text.to_string(),
            model,
        };
        let response = self.client.post(self.url(path)).json(&body).send().await?;
        decode(path, response).await
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}
