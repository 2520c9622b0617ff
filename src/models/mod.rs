//! Data models for weatherlog
//!
//! - Forecast: per-day forecast values and the per-location result
//! - History: persisted search log entries

pub mod forecast;
pub mod history;

// Re-export all public types for convenient access
pub use forecast::{ForecastDay, LocationResult};
pub use history::HistoryEntry;
