//! Live feed: fetch, ingestion trigger and date filtering
//!
//! The live feed slot is independent of the dashboard. It keeps the whole
//! feed as last fetched, the date range chosen by the user and the filtered
//! list derived from both. Fetch failures and sync failures are recorded
//! separately and neither discards the feed already displayed.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use super::orchestrator::FetchOutcome;
use super::sentiment::{aggregate, SentimentSummary};
use super::sequence::SequenceGate;
use crate::api::{ApiError, LiveNewsItem, Model, ModelVerdict, SentimentApi};

/// Type alias for shared live feed access across async tasks
pub type SharedLiveFeedState = Arc<RwLock<LiveFeedState>>;

/// Inclusive calendar-day range; an unset bound is unbounded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// An item without a readable date only passes an unbounded range
    pub fn contains(&self, date: Option<NaiveDate>) -> bool {
        if self.is_unbounded() {
            return true;
        }
        let Some(date) = date else {
            return false;
        };
        self.start.map_or(true, |start| date >= start) && self.end.map_or(true, |end| date <= end)
    }
}

/// Items of `items` whose publication day falls in `range`, order kept
pub fn filter_by_date(items: &[LiveNewsItem], range: &DateRange) -> Vec<LiveNewsItem> {
    items
        .iter()
        .filter(|item| range.contains(item.published_at().map(|at| at.date_naive())))
        .cloned()
        .collect()
}

/// Summaries over the filtered feed, one per label source
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct LiveFeedStats {
    pub consensus: SentimentSummary,
    pub vader: SentimentSummary,
    pub finbert: SentimentSummary,
}

impl LiveFeedStats {
    /// All three summaries come from the same list
    pub fn of(items: &[LiveNewsItem]) -> Self {
        Self {
            consensus: summarize(items, LiveNewsItem::consensus),
            vader: summarize(items, |i| i.verdict(Model::Vader)),
            finbert: summarize(items, |i| i.verdict(Model::Finbert)),
        }
    }
}

fn summarize<F>(items: &[LiveNewsItem], verdict_of: F) -> SentimentSummary
where
    F: Fn(&LiveNewsItem) -> ModelVerdict,
{
    let verdicts: Vec<ModelVerdict> = items.iter().map(verdict_of).collect();
    aggregate(&verdicts, |v| &v.label, |v| v.score)
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct LiveFeedState {
    /// Feed as last fetched, service order
    pub items: Vec<LiveNewsItem>,
    pub range: DateRange,
    /// `items` restricted to `range`
    pub filtered: Vec<LiveNewsItem>,
    pub loading: bool,
    pub syncing: bool,
    pub fetch_error: Option<String>,
    pub sync_error: Option<String>,
    #[serde(skip)]
    seq: SequenceGate,
}

impl LiveFeedState {
    fn refilter(&mut self) {
        self.filtered = filter_by_date(&self.items, &self.range);
    }

    pub fn stats(&self) -> LiveFeedStats {
        LiveFeedStats::of(&self.filtered)
    }
}

/// Result of a sync request
#[derive(Debug)]
pub enum SyncOutcome {
    /// A sync was already running; nothing was sent
    Skipped,
    /// The ingestion trigger failed; the feed is untouched
    Failed(ApiError),
    /// Ingestion succeeded and the feed was re-fetched
    Synced(FetchOutcome),
}

pub struct LiveFeedController {
    api: Arc<dyn SentimentApi>,
    state: SharedLiveFeedState,
}

impl LiveFeedController {
    pub fn new(api: Arc<dyn SentimentApi>) -> Self {
        Self {
            api,
            state: Arc::new(RwLock::new(LiveFeedState::default())),
        }
    }

    pub fn state(&self) -> &SharedLiveFeedState {
        &self.state
    }

    pub async fn snapshot(&self) -> LiveFeedState {
        self.state.read().await.clone()
    }

    /// Load the whole live feed
    pub async fn fetch(&self) -> FetchOutcome {
        let seq = {
            let mut state = self.state.write().await;
            let seq = state.seq.issue();
            state.loading = true;
            seq
        };

        let result = self.api.live_news().await;

        let mut state = self.state.write().await;
        if state.seq.is_latest(seq) {
            state.loading = false;
        }
        if !state.seq.accept(seq) {
            debug!(seq = seq, "Stale live feed response dropped");
            return FetchOutcome::Superseded;
        }

        match result {
            Ok(items) => {
                let fetched = items.len();
                state.items = items;
                state.refilter();
                state.fetch_error = None;
                info!(fetched = fetched, shown = state.filtered.len(), "Live feed updated");
                FetchOutcome::Applied {
                    fetched,
                    has_more: false,
                }
            }
            Err(e) => {
                warn!(error = %e, "Live feed fetch failed");
                state.fetch_error = Some(e.user_message(self.api.base_url()));
                FetchOutcome::Failed(e)
            }
        }
    }

    /// Trigger ingestion of up to `limit` items, then re-fetch the feed.
    ///
    /// Concurrent calls while a sync is running are skipped.
    pub async fn sync(&self, limit: usize) -> SyncOutcome {
        {
            let mut state = self.state.write().await;
            if state.syncing {
                debug!("Sync already running");
                return SyncOutcome::Skipped;
            }
            state.syncing = true;
        }

        let result = self.api.fetch_live_news(limit).await;

        {
            let mut state = self.state.write().await;
            state.syncing = false;
            if let Err(e) = result {
                warn!(limit = limit, error = %e, "Live sync failed");
                state.sync_error = Some(e.user_message(self.api.base_url()));
                return SyncOutcome::Failed(e);
            }
            state.sync_error = None;
        }

        info!(limit = limit, "Live sync completed");
        SyncOutcome::Synced(self.fetch().await)
    }

    /// Change the date range; no request is made
    pub async fn set_date_range(&self, range: DateRange) {
        let mut state = self.state.write().await;
        state.range = range;
        state.refilter();
        debug!(start = ?range.start, end = ?range.end, shown = state.filtered.len(), "Date range applied");
    }

    pub async fn filtered(&self) -> Vec<LiveNewsItem> {
        self.state.read().await.filtered.clone()
    }

    pub async fn stats(&self) -> LiveFeedStats {
        self.state.read().await.stats()
    }
}
