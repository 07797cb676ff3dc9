//! Configuration types for the sentiment dashboard client
//!
//! This module defines all configuration structs that are loaded from YAML.
//! Every section has defaults, so an empty document is a valid config.

use serde::{Deserialize, Serialize};

use super::constants::{
    DEFAULT_API_BASE_URL, DEFAULT_API_TIMEOUT_SECS, DEFAULT_LIVE_SYNC_LIMIT, DEFAULT_PAGE_SIZE,
    DEFAULT_PREFERENCES_PATH, DEFAULT_TRACKED_ENTITIES,
};
use crate::error::AppError;

// ============================================================================
// Tracked entities
// ============================================================================

/// A named subject that stats and news queries can be scoped to
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct TrackedEntity {
    /// Query scope sent to the service (e.g. "Bitcoin")
    pub name: String,
    /// Ticker shown next to the name (e.g. "BTC")
    pub symbol: String,
}

impl TrackedEntity {
    pub fn new(name: &str, symbol: &str) -> Self {
        Self {
            name: name.to_string(),
            symbol: symbol.to_string(),
        }
    }
}

impl std::fmt::Display for TrackedEntity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.symbol)
    }
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Sentiment service connection settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_secs: DEFAULT_API_TIMEOUT_SECS,
        }
    }
}

impl ApiConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        let url = self.base_url.trim();
        if url.is_empty() {
            return Err(AppError::Config("api.base_url cannot be empty".to_string()));
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(AppError::Config(format!(
                "api.base_url must start with http:// or https:// (got {})",
                url
            )));
        }
        if self.timeout_secs == 0 {
            return Err(AppError::Config("api.timeout_secs must be > 0".to_string()));
        }
        Ok(())
    }
}

/// Paged news view settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DashboardConfig {
    /// Items per page; constant for the lifetime of a filter
    pub page_size: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Live feed settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LiveConfig {
    /// Limit passed to the ingestion trigger
    pub sync_limit: usize,
}

impl Default for LiveConfig {
    fn default() -> Self {
        Self {
            sync_limit: DEFAULT_LIVE_SYNC_LIMIT,
        }
    }
}

/// Market overview settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MarketConfig {
    pub entities: Vec<TrackedEntity>,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            entities: DEFAULT_TRACKED_ENTITIES
                .iter()
                .map(|(name, symbol)| TrackedEntity::new(name, symbol))
                .collect(),
        }
    }
}

impl MarketConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.entities.is_empty() {
            return Err(AppError::Config(
                "market.entities must contain at least one entity".to_string(),
            ));
        }

        let mut seen = std::collections::HashSet::new();
        for entity in &self.entities {
            let name = entity.name.trim();
            if name.is_empty() {
                return Err(AppError::Config("Tracked entity name cannot be empty".to_string()));
            }
            if !seen.insert(name.to_lowercase()) {
                return Err(AppError::Config(format!(
                    "Duplicate tracked entity: '{}'",
                    name
                )));
            }
        }
        Ok(())
    }
}

/// Persisted client preference location
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PreferencesConfig {
    pub path: String,
}

impl Default for PreferencesConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_PREFERENCES_PATH.to_string(),
        }
    }
}

/// Root application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub dashboard: DashboardConfig,
    pub live: LiveConfig,
    pub market: MarketConfig,
    pub preferences: PreferencesConfig,
}

impl AppConfig {
    /// Validate all configuration rules
    pub fn validate(&self) -> Result<(), AppError> {
        self.api.validate()?;

        if self.dashboard.page_size == 0 {
            return Err(AppError::Config("dashboard.page_size must be > 0".to_string()));
        }

        if self.live.sync_limit == 0 {
            return Err(AppError::Config("live.sync_limit must be > 0".to_string()));
        }

        self.market.validate()?;

        if self.preferences.path.trim().is_empty() {
            return Err(AppError::Config("preferences.path cannot be empty".to_string()));
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let cfg = AppConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.dashboard.page_size, 20);
        assert_eq!(cfg.live.sync_limit, 5);
        assert_eq!(cfg.market.entities.len(), 10);
        assert_eq!(cfg.api.base_url, "http://127.0.0.1:8000");
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let cfg: AppConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let yaml = r#"
api:
  base_url: https://sentiment.example.com
dashboard:
  page_size: 50
"#;
        let cfg: AppConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.api.base_url, "https://sentiment.example.com");
        assert_eq!(cfg.api.timeout_secs, 30);
        assert_eq!(cfg.dashboard.page_size, 50);
        assert_eq!(cfg.live.sync_limit, 5);
    }

    #[test]
    fn test_zero_page_size_fails() {
        let mut cfg = AppConfig::default();
        cfg.dashboard.page_size = 0;
        let result = cfg.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("page_size must be > 0"));
    }

    #[test]
    fn test_zero_sync_limit_fails() {
        let mut cfg = AppConfig::default();
        cfg.live.sync_limit = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_bad_scheme_fails() {
        let mut cfg = AppConfig::default();
        cfg.api.base_url = "ftp://127.0.0.1".to_string();
        let result = cfg.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("http:// or https://"));
    }

    #[test]
    fn test_empty_base_url_fails() {
        let mut cfg = AppConfig::default();
        cfg.api.base_url = "   ".to_string();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_zero_timeout_fails() {
        let mut cfg = AppConfig::default();
        cfg.api.timeout_secs = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_empty_entities_fails() {
        let mut cfg = AppConfig::default();
        cfg.market.entities.clear();
        let result = cfg.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("at least one entity"));
    }

    #[test]
    fn test_duplicate_entity_case_insensitive_fails() {
        let mut cfg = AppConfig::default();
        cfg.market.entities = vec![
            TrackedEntity::new("Bitcoin", "BTC"),
            TrackedEntity::new("bitcoin", "XBT"),
        ];
        let result = cfg.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Duplicate tracked entity"));
    }

    #[test]
    fn test_blank_entity_name_fails() {
        let mut cfg = AppConfig::default();
        cfg.market.entities = vec![TrackedEntity::new("  ", "X")];
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_tracked_entity_display() {
        assert_eq!(TrackedEntity::new("Solana", "SOL").to_string(), "Solana (SOL)");
    }
}
