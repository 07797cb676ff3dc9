//! Crypto Pulse - Entry Point
//!
//! Orchestrates:
//! 1. Config + logging initialization
//! 2. Persisted settings and the HTTP service client
//! 3. Dashboard seeded from the navigational entity argument
//! 4. Market overview across tracked entities
//! 5. Live feed sync and refresh
//!
//! Usage: `crypto_pulse [ENTITY] [TEXT TO ANALYZE...]`

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, warn};

use crypto_pulse::api::{HttpSentimentApi, SentimentApi};
use crypto_pulse::config::constants::config_path;
use crypto_pulse::config::{default_config, init_logging, load_config, PreferenceStore, Settings};
use crypto_pulse::core::{
    DataFetchOrchestrator, FetchOutcome, LiveFeedController, MarketOverviewAggregator,
    PaginationController, QueryStateSync, SyncOutcome, TextAnalyzer,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // =========================================================================
    // 1. Config + logging
    // =========================================================================
    dotenvy::dotenv().ok();
    init_logging();

    info!("=== Crypto Pulse ===");

    let path = PathBuf::from(config_path());
    let config = if path.exists() {
        load_config(&path)?
    } else {
        warn!(path = %path.display(), "Config file not found, using defaults");
        default_config()?
    };
    info!(
        api = %config.api.base_url,
        page_size = config.dashboard.page_size,
        entities = config.market.entities.len(),
        "Configuration loaded"
    );

    // =========================================================================
    // 2. Settings + service client
    // =========================================================================
    let settings = Settings::load(PreferenceStore::new(&config.preferences.path)).into_shared();
    let api: Arc<dyn SentimentApi> = Arc::new(HttpSentimentApi::new(&config.api)?);

    // =========================================================================
    // 3. Dashboard
    // =========================================================================
    let mut args = std::env::args().skip(1);
    let entity_param = args.next();

    let orchestrator = Arc::new(DataFetchOrchestrator::new(
        api.clone(),
        config.dashboard.page_size,
    ));
    let query_sync = QueryStateSync::new(orchestrator.clone());
    let pagination = PaginationController::new(orchestrator.clone());

    report_fetch("dashboard", query_sync.initialize(entity_param.as_deref()).await);
    if let Some(outcome) = pagination.load_more().await {
        report_fetch("dashboard page", outcome);
    }

    let view = orchestrator.snapshot().await;
    info!(
        title = %view.title(),
        total = view.stats.total,
        positive_pct = %format!("{:.1}", view.stats.positive_pct()),
        negative_pct = %format!("{:.1}", view.stats.negative_pct()),
        neutral_pct = %format!("{:.1}", view.stats.neutral_pct()),
        items = view.page.items.len(),
        has_more = view.page.has_more,
        "Dashboard"
    );

    // =========================================================================
    // 4. Market overview
    // =========================================================================
    let market = MarketOverviewAggregator::new(api.clone(), config.market.entities.clone());
    let overview = market.load().await;
    for row in &overview.entities {
        info!(
            entity = %row.entity,
            sentiment = %row.sentiment,
            total = row.stats.total,
            positive_pct = %format!("{:.1}", row.positive_pct()),
            negative_pct = %format!("{:.1}", row.negative_pct()),
            degraded = row.degraded,
            "Market"
        );
    }

    // =========================================================================
    // 5. Live feed
    // =========================================================================
    let live = LiveFeedController::new(api.clone());
    match live.sync(config.live.sync_limit).await {
        SyncOutcome::Synced(outcome) => report_fetch("live feed", outcome),
        SyncOutcome::Failed(e) => {
            warn!(error = %e.user_message(api.base_url()), "Live sync failed, showing current feed");
            report_fetch("live feed", live.fetch().await);
        }
        SyncOutcome::Skipped => {}
    }
    let stats = live.stats().await;
    info!(
        items = stats.consensus.total,
        positive = stats.consensus.positive,
        negative = stats.consensus.negative,
        vader_avg = %format!("{:.3}", stats.vader.avg_score),
        finbert_avg = %format!("{:.3}", stats.finbert.avg_score),
        "Live feed"
    );

    // =========================================================================
    // 6. Optional text analysis
    // =========================================================================
    let text: Vec<String> = args.collect();
    if !text.is_empty() {
        let analyzer = TextAnalyzer::new(api.clone(), settings.clone());
        match analyzer.analyze(&text.join(" ")).await {
            Ok(analysis) => info!(
                model = %analysis.model.display_name(),
                label = %analysis.result.label,
                confidence_pct = %format!("{:.1}", analysis.confidence_pct()),
                "Analysis"
            ),
            Err(e) => warn!(error = %e.user_message(api.base_url()), "Analysis failed"),
        }
    }

    Ok(())
}

fn report_fetch(what: &str, outcome: FetchOutcome) {
    match outcome {
        FetchOutcome::Applied { fetched, has_more } => {
            info!(view = %what, fetched = fetched, has_more = has_more, "Loaded")
        }
        FetchOutcome::Failed(e) => warn!(view = %what, error = %e, "Load failed"),
        FetchOutcome::Superseded => info!(view = %what, "Superseded by a newer load"),
    }
}
