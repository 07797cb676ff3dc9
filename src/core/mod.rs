//! Dashboard state and the components that drive it
//!
//! One shared [`DashboardView`] backs the main screen. The orchestrator,
//! the pagination controller and the URL query sync all act on it, and a
//! [`SequenceGate`] decides which response is allowed to land. The live
//! feed and the market overview keep their own state; the text analysis
//! workflow holds none.

pub mod analysis;
pub mod live_feed;
pub mod market;
pub mod orchestrator;
pub mod pagination;
pub mod query_sync;
pub mod sentiment;
pub mod sequence;
pub mod state;

// Explicit re-exports for state module
pub use state::{DashboardView, EntityFilter, FilterState, SharedDashboardView, ALL_ENTITIES};

// Explicit re-exports for orchestrator module
pub use orchestrator::{DataFetchOrchestrator, FetchOutcome};

// Explicit re-exports for pagination module
pub use pagination::{FetchMode, InFlight, LoadKind, PageState, PaginationController};

// Explicit re-exports for query sync module
pub use query_sync::QueryStateSync;

// Explicit re-exports for live feed module
pub use live_feed::{
    filter_by_date, DateRange, LiveFeedController, LiveFeedState, LiveFeedStats,
    SharedLiveFeedState, SyncOutcome,
};

// Explicit re-exports for sentiment module
pub use sentiment::{aggregate, SentimentSummary};

// Explicit re-exports for market module
pub use market::{
    classify, EntityOverview, MarketOverview, MarketOverviewAggregator, MarketSentiment,
    DOMINANCE_THRESHOLD,
};

// Explicit re-exports for analysis module
pub use analysis::{Analysis, TextAnalyzer, EMPTY_TEXT_MESSAGE};

// Explicit re-exports for sequence module
pub use sequence::SequenceGate;
