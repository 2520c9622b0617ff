//! `weatherlog` - server-rendered 7-day weather forecasts with a search log
//!
//! A location typed into the home page is looked up at the Weatherbit daily
//! forecast API (or answered from canned data for the location `test`),
//! rendered as HTML and appended to a JSON history file.

pub mod api;
pub mod config;
pub mod error;
pub mod history;
pub mod models;
pub mod render;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use config::AppConfig;
pub use error::WeatherLogError;
pub use history::HistoryStore;
pub use models::{ForecastDay, HistoryEntry, LocationResult};
pub use weather::ForecastClient;
pub use web::{AppState, app};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, WeatherLogError>;
