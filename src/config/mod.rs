//! Configuration module for client settings and YAML loading
//!
//! This module provides:
//! - Configuration types (`AppConfig` and its sections)
//! - YAML loading functionality (`load_config`)
//! - Logging configuration (`init_logging`)
//! - The persisted model preference (`Settings`)

pub mod constants;
mod loader;
pub mod logging;
pub mod preferences;
mod types;

// Re-export types
pub use types::{
    ApiConfig, AppConfig, DashboardConfig, LiveConfig, MarketConfig, PreferencesConfig,
    TrackedEntity,
};

// Re-export loader functions
pub use loader::{default_config, load_config, load_config_from_str};

// Re-export logging functions
pub use logging::init_logging;

// Re-export preference types
pub use preferences::{PreferenceStore, Settings, SharedSettings};
