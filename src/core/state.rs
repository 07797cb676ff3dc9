//! Dashboard view state
//!
//! The dashboard slot holds the entity selection, the stats and paged news
//! currently displayed, and the last user-visible error. It is owned by
//! [`DataFetchOrchestrator`](super::DataFetchOrchestrator) and shared with
//! readers as [`SharedDashboardView`].

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;

use super::pagination::PageState;
use super::sequence::SequenceGate;
use crate::api::Stats;

/// Type alias for shared dashboard state access across async tasks
pub type SharedDashboardView = Arc<RwLock<DashboardView>>;

/// Reserved parameter value that selects the unfiltered view
pub const ALL_ENTITIES: &str = "All";

/// Entity a dashboard query is scoped to
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub enum EntityFilter {
    #[default]
    All,
    Entity(String),
}

/// Entity selection of the dashboard
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FilterState {
    pub entity: EntityFilter,
}

impl FilterState {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn entity(name: &str) -> Self {
        Self::from_param(Some(name))
    }

    /// Build a filter from a navigational or search parameter.
    ///
    /// Missing, blank or `All` values select the unfiltered view; anything
    /// else is used trimmed as the entity name.
    pub fn from_param(param: Option<&str>) -> Self {
        let entity = match param.map(str::trim) {
            Some(name) if !name.is_empty() && !name.eq_ignore_ascii_case(ALL_ENTITIES) => {
                EntityFilter::Entity(name.to_string())
            }
            _ => EntityFilter::All,
        };
        Self { entity }
    }

    /// Query scope sent to the service; `None` means unfiltered
    pub fn scope(&self) -> Option<&str> {
        match &self.entity {
            EntityFilter::All => None,
            EntityFilter::Entity(name) => Some(name),
        }
    }

    pub fn is_all(&self) -> bool {
        self.entity == EntityFilter::All
    }

    pub fn title(&self) -> String {
        match &self.entity {
            EntityFilter::All => "Market Sentiment Overview".to_string(),
            EntityFilter::Entity(name) => format!("{} Sentiment Analysis", name),
        }
    }
}

impl std::fmt::Display for FilterState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.scope().unwrap_or(ALL_ENTITIES))
    }
}

/// Everything the dashboard renders
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    /// Filter that `stats` and `page.items` were fetched with
    pub filter: FilterState,
    /// Most recently requested filter; differs from `filter` while a fetch
    /// for another entity is pending or after it failed
    pub selection: FilterState,
    pub stats: Stats,
    pub page: PageState,
    /// User-visible message of the last failed fetch
    pub error: Option<String>,
    #[serde(skip)]
    pub(crate) seq: SequenceGate,
}

impl DashboardView {
    pub fn new(page_size: usize) -> Self {
        Self {
            filter: FilterState::all(),
            selection: FilterState::all(),
            stats: Stats::zero(),
            page: PageState::new(page_size),
            error: None,
            seq: SequenceGate::new(),
        }
    }

    pub fn into_shared(self) -> SharedDashboardView {
        Arc::new(RwLock::new(self))
    }

    /// Title of the data on screen, not of a pending or failed request
    pub fn title(&self) -> String {
        self.filter.title()
    }
}
