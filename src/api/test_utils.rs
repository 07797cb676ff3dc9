//! Shared test utilities for service-dependent code
//!
//! Provides a configurable in-memory `MockSentimentApi` used by the
//! orchestration, live feed, market and analysis test modules.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::api::errors::{ApiError, ApiResult};
use crate::api::traits::SentimentApi;
use crate::api::types::{AnalysisResult, LiveNewsItem, Model, NewsItem, SentimentLabel, Stats};

/// Scope key used for unfiltered queries
pub const ALL_SCOPE: &str = "";

/// Unified in-memory service double
///
/// Data is keyed by scope (entity name, or `ALL_SCOPE`). News for a scope is
/// stored as one ordered list and sliced by offset/limit like the service.
pub struct MockSentimentApi {
    stats: Mutex<HashMap<String, Stats>>,
    news: Mutex<HashMap<String, Vec<NewsItem>>>,
    /// Scopes whose stats and news requests both fail
    failing_scopes: Mutex<HashSet<String>>,
    /// Scopes whose news request fails while stats succeed
    failing_news_scopes: Mutex<HashSet<String>>,
    /// Artificial latency per scope
    delays: Mutex<HashMap<String, Duration>>,
    unreachable: AtomicBool,
    live: Mutex<Vec<LiveNewsItem>>,
    /// Items appended to the live feed by a successful sync
    pending_ingest: Mutex<Vec<LiveNewsItem>>,
    live_should_fail: AtomicBool,
    sync_should_fail: AtomicBool,
    analysis: Mutex<AnalysisResult>,
    pub stats_calls: AtomicUsize,
    pub news_calls: AtomicUsize,
    pub live_calls: AtomicUsize,
    pub sync_calls: AtomicUsize,
    pub analyze_calls: AtomicUsize,
    /// Last (text, model) sent to `analyze_text`
    pub last_analysis_request: Mutex<Option<(String, Model)>>,
}

impl MockSentimentApi {
    pub fn new() -> Self {
        Self {
            stats: Mutex::new(HashMap::new()),
            news: Mutex::new(HashMap::new()),
            failing_scopes: Mutex::new(HashSet::new()),
            failing_news_scopes: Mutex::new(HashSet::new()),
            delays: Mutex::new(HashMap::new()),
            unreachable: AtomicBool::new(false),
            live: Mutex::new(Vec::new()),
            pending_ingest: Mutex::new(Vec::new()),
            live_should_fail: AtomicBool::new(false),
            sync_should_fail: AtomicBool::new(false),
            analysis: Mutex::new(AnalysisResult {
                label: SentimentLabel::Neutral,
                score: 0.0,
                error: None,
            }),
            stats_calls: AtomicUsize::new(0),
            news_calls: AtomicUsize::new(0),
            live_calls: AtomicUsize::new(0),
            sync_calls: AtomicUsize::new(0),
            analyze_calls: AtomicUsize::new(0),
            last_analysis_request: Mutex::new(None),
        }
    }

    pub fn with_stats(self, scope: &str, stats: Stats) -> Self {
        self.stats.lock().unwrap().insert(scope.to_string(), stats);
        self
    }

    pub fn with_news(self, scope: &str, items: Vec<NewsItem>) -> Self {
        self.news.lock().unwrap().insert(scope.to_string(), items);
        self
    }

    pub fn with_failing_scope(self, scope: &str) -> Self {
        self.failing_scopes.lock().unwrap().insert(scope.to_string());
        self
    }

    pub fn with_failing_news(self, scope: &str) -> Self {
        self.failing_news_scopes.lock().unwrap().insert(scope.to_string());
        self
    }

    pub fn with_delay(self, scope: &str, delay: Duration) -> Self {
        self.delays.lock().unwrap().insert(scope.to_string(), delay);
        self
    }

    pub fn with_live(self, items: Vec<LiveNewsItem>) -> Self {
        *self.live.lock().unwrap() = items;
        self
    }

    pub fn with_pending_ingest(self, items: Vec<LiveNewsItem>) -> Self {
        *self.pending_ingest.lock().unwrap() = items;
        self
    }

    pub fn with_analysis(self, result: AnalysisResult) -> Self {
        *self.analysis.lock().unwrap() = result;
        self
    }

    pub fn set_unreachable(&self, unreachable: bool) {
        self.unreachable.store(unreachable, Ordering::SeqCst);
    }

    pub fn set_failing_scope(&self, scope: &str, failing: bool) {
        let mut scopes = self.failing_scopes.lock().unwrap();
        if failing {
            scopes.insert(scope.to_string());
        } else {
            scopes.remove(scope);
        }
    }

    pub fn set_live_failure(&self, fail: bool) {
        self.live_should_fail.store(fail, Ordering::SeqCst);
    }

    pub fn set_sync_failure(&self, fail: bool) {
        self.sync_should_fail.store(fail, Ordering::SeqCst);
    }

    pub fn calls(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }

    fn scope_key(entity: Option<&str>) -> String {
        entity.map(str::trim).unwrap_or(ALL_SCOPE).to_string()
    }

    async fn simulate_latency(&self, scope: &str) {
        let delay = self.delays.lock().unwrap().get(scope).copied();
        match delay {
            Some(delay) => tokio::time::sleep(delay).await,
            None => tokio::task::yield_now().await,
        }
    }

    fn check_reachable(&self) -> ApiResult<()> {
        if self.unreachable.load(Ordering::SeqCst) {
            return Err(ApiError::Unreachable("connection refused".to_string()));
        }
        Ok(())
    }

    fn scope_failure(scope: &str) -> ApiError {
        ApiError::Service {
            status: 500,
            message: format!("mock failure for '{}'", scope),
        }
    }
}

impl Default for MockSentimentApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SentimentApi for MockSentimentApi {
    async fn stats(&self, entity: Option<&str>) -> ApiResult<Stats> {
        self.stats_calls.fetch_add(1, Ordering::SeqCst);
        let scope = Self::scope_key(entity);
        self.simulate_latency(&scope).await;
        self.check_reachable()?;

        if self.failing_scopes.lock().unwrap().contains(&scope) {
            return Err(Self::scope_failure(&scope));
        }
        Ok(self.stats.lock().unwrap().get(&scope).copied().unwrap_or_default())
    }

    async fn news(
        &self,
        entity: Option<&str>,
        offset: usize,
        limit: usize,
    ) -> ApiResult<Vec<NewsItem>> {
        self.news_calls.fetch_add(1, Ordering::SeqCst);
        let scope = Self::scope_key(entity);
        self.simulate_latency(&scope).await;
        self.check_reachable()?;

        if self.failing_scopes.lock().unwrap().contains(&scope)
            || self.failing_news_scopes.lock().unwrap().contains(&scope)
        {
            return Err(Self::scope_failure(&scope));
        }
        let news = self.news.lock().unwrap();
        Ok(news
            .get(&scope)
            .map(|items| items.iter().skip(offset).take(limit).cloned().collect())
            .unwrap_or_default())
    }

    async fn live_news(&self) -> ApiResult<Vec<LiveNewsItem>> {
        self.live_calls.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
        self.check_reachable()?;

        if self.live_should_fail.load(Ordering::SeqCst) {
            return Err(Self::scope_failure("live"));
        }
        Ok(self.live.lock().unwrap().clone())
    }

    async fn fetch_live_news(&self, _limit: usize) -> ApiResult<()> {
        self.sync_calls.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
        self.check_reachable()?;

        if self.sync_should_fail.load(Ordering::SeqCst) {
            return Err(Self::scope_failure("sync"));
        }
        let ingested: Vec<LiveNewsItem> = self.pending_ingest.lock().unwrap().drain(..).collect();
        let mut live = self.live.lock().unwrap();
        // Newest first, like the service
        for item in ingested.into_iter().rev() {
            live.insert(0, item);
        }
        Ok(())
    }

    async fn analyze_text(&self, text: &str, model: Model) -> ApiResult<AnalysisResult> {
        self.analyze_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_analysis_request.lock().unwrap() = Some((text.to_string(), model));
        tokio::task::yield_now().await;
        self.check_reachable()?;
        Ok(self.analysis.lock().unwrap().clone())
    }

    fn base_url(&self) -> &str {
        "http://mock.local"
    }
}

// =============================================================================
// Fixtures
// =============================================================================

/// News item with the given id and label
pub fn news_item(id: i64, label: &str, score: f64) -> NewsItem {
    NewsItem {
        id,
        title: format!("headline {}", id),
        summary: format!("summary {}", id),
        source: "mock".to_string(),
        url: format!("https://news.example/{}", id),
        published_date: "2024-03-01T12:00:00".to_string(),
        sentiment_label: SentimentLabel::from(label),
        sentiment_score: score,
    }
}

/// `count` sequential news items starting at `first_id`
pub fn news_batch(first_id: i64, count: usize) -> Vec<NewsItem> {
    (0..count as i64)
        .map(|i| news_item(first_id + i, "neutral", 0.0))
        .collect()
}

/// Live item dated `date` with the given consensus label
pub fn live_item(id: i64, date: &str, label: &str, score: f64) -> LiveNewsItem {
    LiveNewsItem {
        id,
        title: format!("live {}", id),
        summary: String::new(),
        source: "mock".to_string(),
        url: format!("https://live.example/{}", id),
        date: date.to_string(),
        sentiment_label: SentimentLabel::from(label),
        sentiment_score: score,
        vader_label: SentimentLabel::from(label),
        vader_score: score,
        finbert_label: SentimentLabel::from(label),
        finbert_score: score.abs(),
    }
}
