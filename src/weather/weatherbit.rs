//! Weatherbit daily forecast response structures and conversion

use super::{format_date, resolve_country};
use crate::Result;
use crate::models::{ForecastDay, LocationResult};
use serde::Deserialize;

/// `/v2.0/forecast/daily` response body
#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    pub city_name: String,
    /// ISO 3166-1 alpha-2
    pub country_code: String,
    pub data: Vec<DailyData>,
}

#[derive(Debug, Deserialize)]
pub struct DailyData {
    /// `YYYY-MM-DD`
    pub valid_date: String,
    /// Average temperature
    pub temp: f64,
    pub min_temp: f64,
    /// Relative humidity
    pub rh: u8,
    pub weather: WeatherDescription,
}

#[derive(Debug, Deserialize)]
pub struct WeatherDescription {
    pub icon: String,
}

impl ForecastResponse {
    /// Map the provider payload onto our own forecast model
    pub fn into_location_result(self) -> Result<LocationResult> {
        let country = resolve_country(&self.country_code)?;

        let forecast = self
            .data
            .into_iter()
            .map(|day| {
                Ok(ForecastDay {
                    date: format_date(&day.valid_date)?,
                    temp_day: day.temp,
                    temp_night: day.min_temp,
                    humidity: day.rh,
                    icon: day.weather.icon,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(LocationResult {
            location: self.city_name,
            country,
            forecast,
        })
    }
}
