//! Core error types for respite-core.
//!
//! This module defines the error hierarchy using thiserror. Note that most
//! engine operations do not surface errors at all: per the failure policy,
//! bad input is normalized and persistence failures are logged and swallowed.
//! The types here cover the paths where a caller genuinely needs to know.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for respite-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Settings load/save errors
    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Settings-specific errors.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// Failed to load the settings document
    #[error("Failed to load settings from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save the settings document
    #[error("Failed to save settings to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Failed to parse the settings document
    #[error("Failed to parse settings: {0}")]
    ParseFailed(String),

    /// The settings directory could not be resolved or created
    #[error("Cannot resolve settings directory: {0}")]
    DirUnavailable(String),
}

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Invalid value for a named field
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },

    /// Unknown settings key in a dot-path lookup
    #[error("Unknown settings key: {0}")]
    UnknownKey(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
