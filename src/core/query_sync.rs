//! Navigational parameter to dashboard selection
//!
//! The dashboard may be opened with an entity parameter (a shared link).
//! `QueryStateSync` turns that parameter into a filter and issues the first
//! fetch, re-runs the reconciliation when the parameter changes, and
//! handles explicit searches.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::info;

use super::orchestrator::{DataFetchOrchestrator, FetchOutcome};
use super::pagination::FetchMode;
use super::state::FilterState;

pub struct QueryStateSync {
    orchestrator: Arc<DataFetchOrchestrator>,
    /// Last navigational parameter seen; `None` before initialization
    param: Mutex<Option<Option<String>>>,
}

impl QueryStateSync {
    pub fn new(orchestrator: Arc<DataFetchOrchestrator>) -> Self {
        Self {
            orchestrator,
            param: Mutex::new(None),
        }
    }

    /// Seed the selection from the initial parameter and load page 0
    pub async fn initialize(&self, param: Option<&str>) -> FetchOutcome {
        *self.param.lock().await = Some(param.map(str::to_string));
        self.reconcile(param).await
    }

    /// React to a new navigational parameter.
    ///
    /// Returns `None` when the parameter is the one already applied.
    pub async fn on_param_change(&self, param: Option<&str>) -> Option<FetchOutcome> {
        {
            let mut last = self.param.lock().await;
            let next = Some(param.map(str::to_string));
            if *last == next {
                return None;
            }
            *last = next;
        }
        Some(self.reconcile(param).await)
    }

    /// Explicit user search; a blank query selects everything
    pub async fn search(&self, query: &str) -> FetchOutcome {
        let filter = FilterState::from_param(Some(query));
        info!(entity = %filter, "Search");
        self.orchestrator.fetch(filter, 0, FetchMode::Replace).await
    }

    /// Most recently requested filter, whether or not its data is on screen
    pub async fn selection(&self) -> FilterState {
        self.orchestrator.view().read().await.selection.clone()
    }

    async fn reconcile(&self, param: Option<&str>) -> FetchOutcome {
        let filter = FilterState::from_param(param);
        info!(entity = %filter, "Selection seeded from navigation");
        self.orchestrator.fetch(filter, 0, FetchMode::Replace).await
    }
}
