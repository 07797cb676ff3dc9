//! Paired stats + news fetching for the dashboard slot
//!
//! A fetch issues the stats query and the news page query for the same
//! filter concurrently and commits both results under one write lock, so
//! readers never observe stats for one filter next to news for another.
//! Overlapping fetches are ordered by [`SequenceGate`](super::SequenceGate):
//! a response older than the last applied one is dropped.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::pagination::{page_offset, FetchMode, InFlight, LoadKind};
use super::state::{DashboardView, FilterState, SharedDashboardView};
use crate::api::{ApiError, ApiResult, SentimentApi};

/// Result of one dashboard fetch
#[derive(Debug)]
pub enum FetchOutcome {
    /// Stats and news were committed to the view
    Applied { fetched: usize, has_more: bool },
    /// The fetch failed; previously displayed data is unchanged
    Failed(ApiError),
    /// A newer response was already applied; nothing changed
    Superseded,
}

impl FetchOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, FetchOutcome::Applied { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, FetchOutcome::Failed(_))
    }

    pub fn is_superseded(&self) -> bool {
        matches!(self, FetchOutcome::Superseded)
    }
}

/// A fetch that has been registered with the view but not yet resolved
///
/// The issued filter, page and mode live here until the fetch succeeds;
/// the view only learns them on commit.
#[derive(Debug, Clone)]
pub(crate) struct FetchTicket {
    seq: u64,
    filter: FilterState,
    page: usize,
    mode: FetchMode,
    offset: usize,
    limit: usize,
}

/// Owner of the dashboard slot
pub struct DataFetchOrchestrator {
    api: Arc<dyn SentimentApi>,
    view: SharedDashboardView,
}

impl DataFetchOrchestrator {
    pub fn new(api: Arc<dyn SentimentApi>, page_size: usize) -> Self {
        Self {
            api,
            view: DashboardView::new(page_size).into_shared(),
        }
    }

    /// Shared handle for readers
    pub fn view(&self) -> &SharedDashboardView {
        &self.view
    }

    /// Copy of the current view
    pub async fn snapshot(&self) -> DashboardView {
        self.view.read().await.clone()
    }

    /// Fetch stats and page `page` of news for `filter`.
    ///
    /// A filter different from the one on screen always loads page 0 in
    /// replace mode, whatever `page` and `mode` were requested. A page whose
    /// offset does not fit in `usize` fails before any request is sent.
    pub async fn fetch(&self, filter: FilterState, page: usize, mode: FetchMode) -> FetchOutcome {
        let ticket = {
            let mut view = self.view.write().await;
            self.begin_locked(&mut view, filter, page, mode)
        };
        match ticket {
            Ok(ticket) => self.complete(ticket).await,
            Err(e) => FetchOutcome::Failed(e),
        }
    }

    /// Register a fetch while the caller holds the view's write lock.
    ///
    /// Only the selection and the in-flight marker change here; filter,
    /// page and mode are committed by [`complete`](Self::complete) on
    /// success.
    pub(crate) fn begin_locked(
        &self,
        view: &mut DashboardView,
        filter: FilterState,
        page: usize,
        mode: FetchMode,
    ) -> ApiResult<FetchTicket> {
        let (page, mode) = if filter != view.filter {
            (0, FetchMode::Replace)
        } else {
            (page, mode)
        };
        let limit = view.page.page_size;
        let offset = page_offset(page, limit).ok_or_else(|| {
            warn!(page = page, page_size = limit, "Requested page is out of range");
            ApiError::Validation(format!("Page {} is out of range", page))
        })?;

        view.selection = filter.clone();
        let seq = view.seq.issue();
        let kind = match mode {
            FetchMode::Replace => LoadKind::Loading,
            FetchMode::Append => LoadKind::LoadingMore,
        };
        view.page.in_flight = Some(InFlight { kind, seq });

        debug!(seq = seq, entity = %filter, page = page, mode = ?mode, "Dashboard fetch issued");
        Ok(FetchTicket {
            seq,
            filter,
            page,
            mode,
            offset,
            limit,
        })
    }

    /// Run the paired requests for `ticket` and commit the result
    pub(crate) async fn complete(&self, ticket: FetchTicket) -> FetchOutcome {
        let scope = ticket.filter.scope();
        let result = tokio::try_join!(
            self.api.stats(scope),
            self.api.news(scope, ticket.offset, ticket.limit)
        );

        let mut view = self.view.write().await;
        if view.seq.is_latest(ticket.seq) {
            view.page.in_flight = None;
        }
        if !view.seq.accept(ticket.seq) {
            debug!(seq = ticket.seq, entity = %ticket.filter, "Stale dashboard response dropped");
            return FetchOutcome::Superseded;
        }

        match result {
            Ok((stats, batch)) => {
                let fetched = batch.len();
                view.filter = ticket.filter.clone();
                view.stats = stats;
                view.page.merge(ticket.page, ticket.mode, batch);
                view.error = None;
                info!(
                    entity = %ticket.filter,
                    page = ticket.page,
                    fetched = fetched,
                    total = stats.total,
                    has_more = view.page.has_more,
                    "Dashboard updated"
                );
                FetchOutcome::Applied {
                    fetched,
                    has_more: view.page.has_more,
                }
            }
            Err(e) => {
                warn!(entity = %ticket.filter, page = ticket.page, error = %e, "Dashboard fetch failed");
                view.error = Some(e.user_message(self.api.base_url()));
                FetchOutcome::Failed(e)
            }
        }
    }
}
