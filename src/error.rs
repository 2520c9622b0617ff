//! Error types and handling for the weatherlog application

use thiserror::Error;

/// Main error type for the weatherlog application
#[derive(Error, Debug)]
pub enum WeatherLogError {
    /// Provider answered with a non-success HTTP status
    #[error("Provider HTTP error: {status} - {reason}")]
    ProviderHttp { status: u16, reason: String },

    /// Provider answered 2xx but the body carried an `error` field
    #[error("Provider API error: {message}")]
    ProviderApi { message: String },

    /// Country code in the provider payload is not an ISO 3166-1 alpha-2 code
    #[error("Unknown country code: {code}")]
    UnresolvedCountry { code: String },

    /// Provider body could not be mapped onto a forecast
    #[error("Invalid provider payload: {message}")]
    InvalidPayload { message: String },

    /// Transport-level failure talking to the provider
    #[error("Network error: {source}")]
    Network {
        #[from]
        source: reqwest::Error,
    },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// History file (de)serialization errors
    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
}

impl WeatherLogError {
    /// Create a new provider API error
    pub fn provider_api<S: Into<String>>(message: S) -> Self {
        Self::ProviderApi {
            message: message.into(),
        }
    }

    /// Create a new unresolved country error
    pub fn unresolved_country<S: Into<String>>(code: S) -> Self {
        Self::UnresolvedCountry { code: code.into() }
    }

    /// Create a new invalid payload error
    pub fn invalid_payload<S: Into<String>>(message: S) -> Self {
        Self::InvalidPayload {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Whether the error belongs on the weather page rather than a 500
    #[must_use]
    pub fn is_user_facing(&self) -> bool {
        !matches!(self, Self::Io { .. } | Self::Json { .. })
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            WeatherLogError::ProviderHttp { status, reason } => {
                format!("Error fetching weather data: {status} - {reason}")
            }
            WeatherLogError::ProviderApi { message } => format!("API error: {message}"),
            WeatherLogError::UnresolvedCountry { code } => {
                format!("Unknown country code '{code}' in weather data")
            }
            WeatherLogError::InvalidPayload { .. } => {
                "The weather service returned data that could not be read.".to_string()
            }
            WeatherLogError::Network { .. } => {
                "Unable to reach the weather service. Please try again later.".to_string()
            }
            WeatherLogError::Config { .. } => {
                "The weather service is not configured. Please set API_KEY.".to_string()
            }
            WeatherLogError::Validation { message } => message.clone(),
            WeatherLogError::Io { .. } | WeatherLogError::Json { .. } => {
                "Search history could not be accessed.".to_string()
            }
        }
    }
}
