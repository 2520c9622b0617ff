//! Configuration management for weatherlog
//!
//! Settings come from environment variables (optionally seeded from a `.env`
//! file by the binary) and are read exactly once at startup. The resulting
//! [`AppConfig`] is immutable and shared with every handler through the
//! router state.

use crate::{Result, WeatherLogError};
use std::path::PathBuf;

/// Root configuration structure for weatherlog
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Background colour applied to every page
    pub bg_color: String,
    /// Weather provider configuration
    pub weather: WeatherConfig,
    /// Search history location
    pub history_file: PathBuf,
    /// When set, `/download` only serves files below this directory
    pub download_root: Option<PathBuf>,
    /// Listen port
    pub port: u16,
}

/// Weather API configuration settings
#[derive(Debug, Clone)]
pub struct WeatherConfig {
    /// Weatherbit API key
    pub api_key: Option<String>,
    /// Base URL for the forecast API
    pub base_url: String,
}

// Default value functions
fn default_bg_color() -> String {
    "white".to_string()
}

fn default_weather_base_url() -> String {
    "http://api.weatherbit.io".to_string()
}

fn default_history_file() -> PathBuf {
    PathBuf::from("search_history.json")
}

fn default_port() -> u16 {
    5000
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bg_color: default_bg_color(),
            weather: WeatherConfig {
                api_key: None,
                base_url: default_weather_base_url(),
            },
            history_file: default_history_file(),
            download_root: None,
            port: default_port(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let mut config = Self::default();

        if let Some(color) = get("BG_COLOR") {
            config.bg_color = color.trim().to_string();
        }
        config.weather.api_key = get("API_KEY");
        if let Some(base_url) = get("WEATHER_API_BASE_URL") {
            config.weather.base_url = base_url.trim_end_matches('/').to_string();
        }
        if let Some(history_file) = get("HISTORY_FILE") {
            config.history_file = PathBuf::from(history_file);
        }
        config.download_root = get("DOWNLOAD_ROOT").map(PathBuf::from);
        if let Some(port) = get("PORT") {
            config.port = port.trim().parse().map_err(|_| {
                WeatherLogError::config(format!("Invalid PORT '{port}': expected 1-65535"))
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        if self.port == 0 {
            return Err(WeatherLogError::config("PORT cannot be 0"));
        }

        if !self.weather.base_url.starts_with("http://")
            && !self.weather.base_url.starts_with("https://")
        {
            return Err(WeatherLogError::config(
                "Weather API base URL must be a valid HTTP or HTTPS URL",
            ));
        }

        if self.bg_color.is_empty()
            || self
                .bg_color
                .chars()
                .any(|c| matches!(c, '<' | '>' | '"' | ';' | '{' | '}'))
        {
            return Err(WeatherLogError::config(format!(
                "Invalid BG_COLOR '{}'",
                self.bg_color
            )));
        }

        Ok(())
    }
}
