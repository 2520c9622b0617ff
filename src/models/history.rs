//! Persisted search history entry

use super::LocationResult;
use chrono::{Local, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// One past query and its result
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct HistoryEntry {
    /// Raw user input
    pub location: String,
    /// When the query was made, local time, second precision
    #[serde(with = "timestamp_format")]
    pub date: NaiveDateTime,
    /// Result shown to the user
    pub data: LocationResult,
}

impl HistoryEntry {
    /// Create an entry stamped with the current local time
    #[must_use]
    pub fn now(location: String, data: LocationResult) -> Self {
        let date = Local::now().naive_local();
        // Drop sub-second precision so the in-memory value matches what is stored
        let date = date.with_nanosecond(0).unwrap_or(date);
        Self {
            location,
            date,
            data,
        }
    }

    #[must_use]
    pub fn format_date(&self) -> String {
        self.date.format(timestamp_format::FORMAT).to_string()
    }
}

mod timestamp_format {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S>(date: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&s, FORMAT).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ForecastDay;

    fn sample_result() -> LocationResult {
        LocationResult {
            location: "Paris".to_string(),
            country: "France".to_string(),
            forecast: vec![ForecastDay {
                date: "01.06".to_string(),
                temp_day: 22.0,
                temp_night: 14.5,
                humidity: 60,
                icon: "c02d".to_string(),
            }],
        }
    }

    #[test]
    fn test_entry_json_layout() {
        let date =
            NaiveDateTime::parse_from_str("2024-05-27 14:03:09", "%Y-%m-%d %H:%M:%S").unwrap();
        let entry = HistoryEntry {
            location: "paris".to_string(),
            date,
            data: sample_result(),
        };

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["location"], "paris");
        assert_eq!(json["date"], "2024-05-27 14:03:09");
        assert_eq!(json["data"]["location"], "Paris");
        assert_eq!(json["data"]["country"], "France");
        assert_eq!(json["data"]["forecast"][0]["date"], "01.06");
    }

    #[test]
    fn test_entry_parses_stored_form() {
        let raw = r#"{
            "location": "Tokyo",
            "date": "2024-06-02 08:00:00",
            "data": {"location": "Tokyo", "country": "Japan", "forecast": []}
        }"#;
        let entry: HistoryEntry = serde_json::from_str(raw).unwrap();
        assert_eq!(entry.format_date(), "2024-06-02 08:00:00");
        assert_eq!(entry.data.country, "Japan");
    }

    #[test]
    fn test_rejects_malformed_date() {
        let raw = r#"{"location": "x", "date": "yesterday",
            "data": {"location": "x", "country": "y", "forecast": []}}"#;
        assert!(serde_json::from_str::<HistoryEntry>(raw).is_err());
    }

    #[test]
    fn test_now_has_second_precision() {
        let entry = HistoryEntry::now("test".to_string(), sample_result());
        assert_eq!(entry.date.nanosecond(), 0);
    }
}
