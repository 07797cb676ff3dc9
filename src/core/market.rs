//! Market overview across tracked entities.
//!
//! One stats request per tracked entity is issued concurrently. A failing
//! entity never fails the overview: it is shown with zero counts, flagged
//! as degraded and logged.

use std::sync::Arc;

use futures_util::future::join_all;
use serde::Serialize;
use tracing::{info, warn};

use crate::api::{SentimentApi, Stats};
use crate::config::TrackedEntity;

/// Share of items a polarity needs, beyond dominating the other polarity,
/// to set the market mood
pub const DOMINANCE_THRESHOLD: f64 = 0.4;

/// Mood of one entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MarketSentiment {
    Positive,
    Negative,
    Neutral,
    NoData,
}

impl std::fmt::Display for MarketSentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            MarketSentiment::Positive => "Positive",
            MarketSentiment::Negative => "Negative",
            MarketSentiment::Neutral => "Neutral",
            MarketSentiment::NoData => "No Data",
        };
        f.write_str(s)
    }
}

/// Classify an entity from its label counts.
///
/// A polarity wins only if its ratio is strictly above the other polarity's
/// and strictly above [`DOMINANCE_THRESHOLD`].
pub fn classify(stats: &Stats) -> MarketSentiment {
    if stats.total == 0 {
        return MarketSentiment::NoData;
    }
    let pos = stats.positive_ratio();
    let neg = stats.negative_ratio();
    if pos > neg && pos > DOMINANCE_THRESHOLD {
        MarketSentiment::Positive
    } else if neg > pos && neg > DOMINANCE_THRESHOLD {
        MarketSentiment::Negative
    } else {
        MarketSentiment::Neutral
    }
}

/// One row of the overview
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityOverview {
    pub entity: TrackedEntity,
    pub stats: Stats,
    pub sentiment: MarketSentiment,
    /// The entity's request failed and zero counts were substituted
    pub degraded: bool,
}

impl EntityOverview {
    pub fn positive_pct(&self) -> f64 {
        self.stats.positive_pct()
    }

    pub fn negative_pct(&self) -> f64 {
        self.stats.negative_pct()
    }

    pub fn neutral_pct(&self) -> f64 {
        self.stats.neutral_pct()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MarketOverview {
    /// Rows in tracked-entity order
    pub entities: Vec<EntityOverview>,
}

impl MarketOverview {
    pub fn get(&self, name: &str) -> Option<&EntityOverview> {
        self.entities
            .iter()
            .find(|row| row.entity.name.eq_ignore_ascii_case(name))
    }

    pub fn degraded_count(&self) -> usize {
        self.entities.iter().filter(|row| row.degraded).count()
    }
}

pub struct MarketOverviewAggregator {
    api: Arc<dyn SentimentApi>,
    entities: Vec<TrackedEntity>,
}

impl MarketOverviewAggregator {
    pub fn new(api: Arc<dyn SentimentApi>, entities: Vec<TrackedEntity>) -> Self {
        Self { api, entities }
    }

    /// Load stats for every tracked entity; never fails as a whole
    pub async fn load(&self) -> MarketOverview {
        let requests = self.entities.iter().map(|entity| async move {
            match self.api.stats(Some(&entity.name)).await {
                Ok(stats) => EntityOverview {
                    entity: entity.clone(),
                    stats,
                    sentiment: classify(&stats),
                    degraded: false,
                },
                Err(e) => {
                    warn!(entity = %entity, error = %e, "Entity stats unavailable, showing no data");
                    let stats = Stats::zero();
                    EntityOverview {
                        entity: entity.clone(),
                        stats,
                        sentiment: classify(&stats),
                        degraded: true,
                    }
                }
            }
        });

        let overview = MarketOverview {
            entities: join_all(requests).await,
        };
        info!(
            entities = overview.entities.len(),
            degraded = overview.degraded_count(),
            "Market overview loaded"
        );
        overview
    }
}
