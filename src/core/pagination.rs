//! Paged news state and user pagination actions
//!
//! `PageState` tracks page index, continuation flag, accumulated items and
//! the merge mode of the next result. `PaginationController` turns the
//! user's "load more" and "go to page" actions into fetches on the shared
//! [`DataFetchOrchestrator`].

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use super::orchestrator::{DataFetchOrchestrator, FetchOutcome};
use crate::api::NewsItem;

/// How a fetched batch is merged into the accumulated list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum FetchMode {
    #[default]
    Replace,
    Append,
}

/// Which kind of load is outstanding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LoadKind {
    /// Replace-mode load (initial, search, page jump)
    Loading,
    /// Append-mode load triggered by "load more"
    LoadingMore,
}

/// The outstanding fetch for the slot
///
/// A single optional value keeps "loading" and "loading more" mutually
/// exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InFlight {
    pub kind: LoadKind,
    pub seq: u64,
}

/// Item offset of `page`, or `None` if it does not fit in `usize`
pub fn page_offset(page: usize, page_size: usize) -> Option<usize> {
    page.checked_mul(page_size)
}

#[derive(Debug, Clone, Serialize)]
pub struct PageState {
    /// Index of the last page merged into `items`
    pub page: usize,
    pub page_size: usize,
    /// True iff the last fetched batch filled a whole page
    pub has_more: bool,
    /// Accumulated items in service order
    pub items: Vec<NewsItem>,
    pub mode: FetchMode,
    pub in_flight: Option<InFlight>,
}

impl PageState {
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 0,
            page_size,
            has_more: false,
            items: Vec::new(),
            mode: FetchMode::Replace,
            in_flight: None,
        }
    }

    /// Back to page 0 in replace mode; displayed items stay until the next
    /// result replaces them
    pub fn reset(&mut self) {
        self.page = 0;
        self.mode = FetchMode::Replace;
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.in_flight, Some(InFlight { kind: LoadKind::Loading, .. }))
    }

    pub fn is_loading_more(&self) -> bool {
        matches!(self.in_flight, Some(InFlight { kind: LoadKind::LoadingMore, .. }))
    }

    pub fn can_load_more(&self) -> bool {
        self.has_more && self.in_flight.is_none()
    }

    /// Merge a fetched batch for `page`
    pub(crate) fn merge(&mut self, page: usize, mode: FetchMode, batch: Vec<NewsItem>) {
        self.has_more = batch.len() == self.page_size;
        match mode {
            FetchMode::Replace => self.items = batch,
            FetchMode::Append => self.items.extend(batch),
        }
        self.page = page;
        self.mode = mode;
    }
}

/// User-facing pagination actions on the dashboard slot
pub struct PaginationController {
    orchestrator: Arc<DataFetchOrchestrator>,
}

impl PaginationController {
    pub fn new(orchestrator: Arc<DataFetchOrchestrator>) -> Self {
        Self { orchestrator }
    }

    /// Fetch the next page of the entity on screen and append it.
    ///
    /// Returns `None` without issuing any request when there is nothing
    /// more to load or a fetch is already in flight. After a failed switch
    /// to another entity this continues the list that is still displayed.
    pub async fn load_more(&self) -> Option<FetchOutcome> {
        let ticket = {
            let mut view = self.orchestrator.view().write().await;
            if !view.page.can_load_more() {
                debug!(
                    has_more = view.page.has_more,
                    in_flight = view.page.in_flight.is_some(),
                    "Load more ignored"
                );
                return None;
            }
            let next = view.page.page.checked_add(1)?;
            let filter = view.filter.clone();
            self.orchestrator
                .begin_locked(&mut view, filter, next, FetchMode::Append)
        };
        match ticket {
            Ok(ticket) => Some(self.orchestrator.complete(ticket).await),
            Err(e) => Some(FetchOutcome::Failed(e)),
        }
    }

    /// Replace the list with page `page` of the entity on screen
    pub async fn go_to_page(&self, page: usize) -> FetchOutcome {
        let filter = self.orchestrator.view().read().await.filter.clone();
        self.orchestrator.fetch(filter, page, FetchMode::Replace).await
    }

    pub async fn reset(&self) {
        self.orchestrator.view().write().await.page.reset();
    }
}
