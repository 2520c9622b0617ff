//! Daily forecast model

use serde::{Deserialize, Serialize};

/// One day of a multi-day forecast
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ForecastDay {
    /// Display date, `DD.MM`
    pub date: String,
    /// Day temperature in Celsius
    pub temp_day: f64,
    /// Night (minimum) temperature in Celsius
    pub temp_night: f64,
    /// Relative humidity in percent
    pub humidity: u8,
    /// Provider icon code, e.g. `c01d`
    pub icon: String,
}

/// Forecast for a resolved place
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LocationResult {
    /// City name as reported by the provider
    pub location: String,
    /// Full country name
    pub country: String,
    /// Days in provider order
    pub forecast: Vec<ForecastDay>,
}

impl ForecastDay {
    /// Format temperature with unit
    #[must_use]
    pub fn format_temperature(celsius: f64) -> String {
        format!("{celsius:.1}°C")
    }
}

impl LocationResult {
    /// `City, Country` heading
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{}, {}", self.location, self.country)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forecast_day_serializes_with_history_field_names() {
        let day = ForecastDay {
            date: "27.05".to_string(),
            temp_day: 19.3,
            temp_night: 19.4,
            humidity: 49,
            icon: "c01d".to_string(),
        };

        let json = serde_json::to_value(&day).unwrap();
        assert_eq!(json["date"], "27.05");
        assert_eq!(json["temp_day"], 19.3);
        assert_eq!(json["temp_night"], 19.4);
        assert_eq!(json["humidity"], 49);
        assert_eq!(json["icon"], "c01d");
    }

    #[test]
    fn test_display_name_and_temperature() {
        let result = LocationResult {
            location: "Berlin".to_string(),
            country: "Germany".to_string(),
            forecast: Vec::new(),
        };
        assert_eq!(result.display_name(), "Berlin, Germany");
        assert_eq!(ForecastDay::format_temperature(21.84), "21.8°C");
    }
}
