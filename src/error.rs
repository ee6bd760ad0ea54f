// src/error.rs

//! Unified error handling for the job monitor.

use std::fmt;

use thiserror::Error;

/// Result type alias for monitor operations.
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

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// CSS selector parsing failed
    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A source adapter could not contribute anything this run
    #[error("Adapter error for {source_id}: {message}")]
    Adapter { source_id: String, message: String },

    /// Render capability failure (navigation, activation, history)
    #[error("Render error during {context}: {message}")]
    Render { context: String, message: String },

    /// SMTP transport failure
    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    /// Email message construction failure
    #[error("Email error: {0}")]
    Email(#[from] lettre::error::Error),

    /// Email address parsing failure
    #[error("Address error: {0}")]
    Address(#[from] lettre::address::AddressError),
}

impl AppError {
    /// Create a selector parsing error.
    pub fn selector(selector: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Selector {
            selector: selector.into(),
            message: message.to_string(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an adapter error tagged with its source id.
    pub fn adapter(source_id: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Adapter {
            source_id: source_id.into(),
            message: message.to_string(),
        }
    }

    /// Create a render error with context.
    pub fn render(context: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Render {
            context: context.into(),
            message: message.to_string(),
        }
    }
}
