//! Error types and handling for pvtariff
//!
//! This module defines the error types used throughout the application,
//! providing consistent error handling and reporting.

use chrono::NaiveDateTime;
use thiserror::Error;

/// Result type alias for pvtariff operations
pub type Result<T> = std::result::Result<T, TariffError>;

/// Main error type for pvtariff
#[derive(Debug, Error)]
pub enum TariffError {
    /// Malformed tariff catalog or configuration
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Schema validation errors for the configuration file
    #[error("Validation error: {field} - {message}")]
    Validation { field: String, message: String },

    /// No tariff (not even a fallback) applies at the given local time
    #[error("No applicable tariff at {at}")]
    NoApplicableTariff { at: NaiveDateTime },

    /// Holiday calendar unsupported or unavailable
    #[error("Holiday calendar error: {message}")]
    Holiday { message: String },

    /// Serialization/deserialization errors
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// File I/O errors
    #[error("I/O error: {message}")]
    Io { message: String },

    /// Network-related errors
    #[error("Network error: {message}")]
    Network { message: String },

    /// PVOutput API rejected the request
    #[error("API error: {message}")]
    Api { message: String },

    /// Generic errors with context
    #[error("Error: {message}")]
    Generic { message: String },
}

impl TariffError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        TariffError::Config {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<F: Into<String>, S: Into<String>>(field: F, message: S) -> Self {
        TariffError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new "no applicable tariff" error
    pub fn no_applicable_tariff(at: NaiveDateTime) -> Self {
        TariffError::NoApplicableTariff { at }
    }

    /// Create a new holiday calendar error
    pub fn holiday<S: Into<String>>(message: S) -> Self {
        TariffError::Holiday {
            message: message.into(),
        }
    }

    /// Create a new I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        TariffError::Io {
            message: message.into(),
        }
    }

    /// Create a new network error
    pub fn network<S: Into<String>>(message: S) -> Self {
        TariffError::Network {
            message: message.into(),
        }
    }

    /// Create a new API error
    pub fn api<S: Into<String>>(message: S) -> Self {
        TariffError::Api {
            message: message.into(),
        }
    }

    /// Create a new generic error
    pub fn generic<S: Into<String>>(message: S) -> Self {
        TariffError::Generic {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for TariffError {
    fn from(err: std::io::Error) -> Self {
        TariffError::io(err.to_string())
    }
}

impl From<serde_yaml::Error> for TariffError {
    fn from(err: serde_yaml::Error) -> Self {
        TariffError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for TariffError {
    fn from(err: serde_json::Error) -> Self {
        TariffError::Serialization {
            message: err.to_string(),
        }
    }
}

#[cfg(feature = "upload")]
impl From<reqwest::Error> for TariffError {
    fn from(err: reqwest::Error) -> Self {
        TariffError::network(err.to_string())
    }
}

impl From<chrono::ParseError> for TariffError {
    fn from(err: chrono::ParseError) -> Self {
        TariffError::validation("datetime", err.to_string())
    }
}
