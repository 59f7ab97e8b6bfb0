//! Error types for retryctl.
//!
//! This module defines the error handling strategy for the ambient layer
//! around the decision core. There are two error types: `RetryCtlError`
//! (main error enum) and `ConfigError` (configuration-specific).
//!
//! ## Error Handling Philosophy
//!
//! Library code uses `crate::error::Result<T>` which returns
//! `RetryCtlError`. CLI code uses `anyhow::Result<T>` for top-level error
//! handling. The conversion happens at the CLI boundary using
//! `anyhow::Error::from` to preserve error chains.
//!
//! This split exists because:
//! - Library code benefits from structured error types for programmatic handling
//! - CLI code benefits from `anyhow`'s context chains and user-friendly display
//! - Conversion preserves full error information (not just strings)
//!
//! ## Scope
//!
//! The decision core itself (`classifier`, `backoff`) is total: it never
//! returns an error. Everything here exists for the layers around it:
//! parsing a config file, validating a scenario file before it reaches
//! `next_backoff`, reporting an exit code.

use thiserror::Error;

/// Main error type for retryctl's ambient layer.
#[derive(Error, Debug)]
pub enum RetryCtlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid scenario: {reason}")]
    InvalidScenario { reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Unknown policy preset: {0}")]
    UnknownPreset(String),

    #[error("Failed to parse config: {0}")]
    ParseError(String),
}

/// Result type alias.
pub type Result<T> = std::result::Result<T, RetryCtlError>;
