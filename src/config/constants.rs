//! Application-wide constants and configuration defaults
//!
//! Centralizes hardcoded values. A few can be overridden via environment
//! variables so the binary can be pointed at another service without a
//! config file.

// =============================================================================
// Service
// =============================================================================

/// Default address of the sentiment analysis service
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";

/// Default HTTP request timeout in seconds
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 30;

/// Service base URL override (`PULSE_API_URL`)
pub fn api_base_url_override() -> Option<String> {
    std::env::var("PULSE_API_URL")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

// =============================================================================
// Views
// =============================================================================

/// News items per page on the dashboard
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Items requested from the ingestion trigger per live sync
pub const DEFAULT_LIVE_SYNC_LIMIT: usize = 5;

/// Entities shown on the market overview, as (name, symbol)
pub const DEFAULT_TRACKED_ENTITIES: &[(&str, &str)] = &[
    ("Bitcoin", "BTC"),
    ("Ethereum", "ETH"),
    ("Ripple", "XRP"),
    ("Litecoin", "LTC"),
    ("Dogecoin", "DOGE"),
    ("Cardano", "ADA"),
    ("Solana", "SOL"),
    ("Polkadot", "DOT"),
    ("Chainlink", "LINK"),
    ("Binance Coin", "BNB"),
];

// =============================================================================
// Files
// =============================================================================

/// Default configuration file
pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Default location of the persisted preference file
pub const DEFAULT_PREFERENCES_PATH: &str = ".crypto_pulse/preferences.json";

/// Config path override (`PULSE_CONFIG`)
pub fn config_path() -> String {
    std::env::var("PULSE_CONFIG")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string())
}
