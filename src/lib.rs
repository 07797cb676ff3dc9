//! Crypto Pulse - sentiment dashboard client
//!
//! Client-side orchestration for a crypto news sentiment service:
//! - Shareable filter state and paginated news fetching
//! - Live feed ingestion with date range filtering
//! - Per-entity market overview and sentiment tallies
//! - On-demand text analysis with a persisted model preference

pub mod api;
pub mod config;
pub mod core;
pub mod error;

pub use error::AppError;
