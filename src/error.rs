// src/error.rs

//! Unified error handling for the application.

use std::fmt;

use thiserror::Error;

/// Result type alias for yasku operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization failed
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Topic search rejected by the upstream endpoint
    #[error("NCBI search failed for {topic} (status {status})")]
    Search { topic: String, status: u16 },

    /// Detail fetch failed or returned an unreadable body
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// Webhook delivery failed
    #[error("Delivery error: {0}")]
    Delivery(String),
}

impl AppError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a search error for a topic.
    pub fn search(topic: impl Into<String>, status: u16) -> Self {
        Self::Search {
            topic: topic.into(),
            status,
        }
    }

    /// Create a fetch error.
    pub fn fetch(message: impl fmt::Display) -> Self {
        Self::Fetch(message.to_string())
    }

    /// Create a delivery error.
    pub fn delivery(message: impl fmt::Display) -> Self {
        Self::Delivery(message.to_string())
    }
}
