//! Forecast fetcher
//!
//! Turns a free-text location into a [`LocationResult`], either by one GET
//! against the Weatherbit daily forecast endpoint or, for the reserved
//! location `test`, from a fixed dataset without touching the network.
//! There is no retry, no timeout override and no caching.

use chrono::NaiveDate;
use isocountry::CountryCode;
use reqwest::Client;
use tracing::{debug, info, instrument, warn};

use crate::config::WeatherConfig;
use crate::models::{ForecastDay, LocationResult};
use crate::{Result, WeatherLogError};

pub mod weatherbit;

/// Location that bypasses the provider
pub const SENTINEL_LOCATION: &str = "test";

/// Number of days requested from the provider
pub const FORECAST_DAYS: u8 = 7;

/// Whether the input is the sentinel location, ignoring case
#[must_use]
pub fn is_sentinel(location: &str) -> bool {
    location.to_lowercase() == SENTINEL_LOCATION
}

/// Reformat an ISO date (`YYYY-MM-DD`) to the display form `DD.MM`
pub fn format_date(iso_date: &str) -> Result<String> {
    let date = NaiveDate::parse_from_str(iso_date, "%Y-%m-%d").map_err(|e| {
        WeatherLogError::invalid_payload(format!("Invalid forecast date '{iso_date}': {e}"))
    })?;
    Ok(date.format("%d.%m").to_string())
}

/// Resolve an ISO 3166-1 alpha-2 code to the country's full name
pub fn resolve_country(code: &str) -> Result<String> {
    CountryCode::for_alpha2(code)
        .map(|country| country.name().to_string())
        .map_err(|_| WeatherLogError::unresolved_country(code))
}

/// The fixed forecast returned for the sentinel location
#[must_use]
pub fn canned_forecast() -> LocationResult {
    const DAYS: [(&str, f64, f64, u8, &str); 7] = [
        ("27.05", 19.3, 19.4, 49, "c01d"),
        ("28.05", 22.6, 19.1, 69, "c02d"),
        ("29.05", 21.8, 17.1, 66, "c03d"),
        ("30.05", 19.3, 17.5, 65, "r01d"),
        ("31.05", 22.1, 18.1, 61, "r02d"),
        ("01.06", 19.3, 18.6, 58, "s01d"),
        ("02.06", 24.2, 19.7, 58, "c01d"),
    ];

    LocationResult {
        location: "Test City".to_string(),
        country: "Test Country".to_string(),
        forecast: DAYS
            .iter()
            .map(|&(date, temp_day, temp_night, humidity, icon)| ForecastDay {
                date: date.to_string(),
                temp_day,
                temp_night,
                humidity,
                icon: icon.to_string(),
            })
            .collect(),
    }
}

/// HTTP client for the forecast provider
#[derive(Debug, Clone)]
pub struct ForecastClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl ForecastClient {
    /// Create a new forecast client
    pub fn new(config: &WeatherConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("weatherlog/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    /// Get the 7-day forecast for a location
    #[instrument(skip(self))]
    pub async fn get_forecast(&self, location: &str) -> Result<LocationResult> {
        if is_sentinel(location) {
            debug!("Sentinel location, serving canned forecast");
            return Ok(canned_forecast());
        }

        self.get_provider_forecast(location).await
    }

    async fn get_provider_forecast(&self, location: &str) -> Result<LocationResult> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| WeatherLogError::config("API_KEY is not set"))?;

        let url = format!(
            "{}/v2.0/forecast/daily?key={}&city={}&days={}",
            self.base_url,
            urlencoding::encode(api_key),
            urlencoding::encode(location),
            FORECAST_DAYS
        );
        debug!("Calling the forecast API");

        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            warn!("Forecast API returned {}", status);
            return Err(WeatherLogError::ProviderHttp {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let body = response.text().await?;
        if body.trim().is_empty() {
            // Weatherbit answers 204 with no body for cities it cannot find
            return Err(WeatherLogError::provider_api(format!(
                "No forecast found for '{location}'"
            )));
        }

        let value: serde_json::Value = serde_json::from_str(&body)
            .map_err(|e| WeatherLogError::invalid_payload(format!("Body is not JSON: {e}")))?;

        if let Some(error) = value.get("error") {
            let message = error
                .as_str()
                .map_or_else(|| error.to_string(), str::to_string);
            warn!("Forecast API reported an error: {}", message);
            return Err(WeatherLogError::provider_api(message));
        }

        let forecast: weatherbit::ForecastResponse = serde_json::from_value(value)
            .map_err(|e| WeatherLogError::invalid_payload(e.to_string()))?;
        let result = forecast.into_location_result()?;

        info!(
            "Retrieved {} forecast days for {}",
            result.forecast.len(),
            result.display_name()
        );
        Ok(result)
    }
}
