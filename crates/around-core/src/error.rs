//! Error types for Around

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AroundError {
    // Geolocation errors
    #[error("Your browser does not support geolocation!")]
    GeolocationUnsupported,

    #[error("Failed to get user location: {reason}")]
    GeolocationFailed { reason: String },

    #[error("Location unknown. Retry geolocation first.")]
    LocationUnknown,

    #[error("Invalid position: latitude {latitude}, longitude {longitude}")]
    InvalidPosition { latitude: f64, longitude: f64 },

    // Backend errors
    #[error("Query failed with status {status}: {body}")]
    Query { status: u16, body: String },

    #[error("Failed to create a post: {reason}")]
    Ingest { reason: String },

    #[error("Request failed: {reason}")]
    Transport { reason: String },

    // Configuration errors
    #[error("Missing required configuration: {key}")]
    ConfigMissing { key: String },

    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for AroundError {
    fn from(err: serde_json::Error) -> Self {
        AroundError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AroundError>;
