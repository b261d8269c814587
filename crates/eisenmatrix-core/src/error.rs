//! Core error types for eisenmatrix-core.
//!
//! Out-of-range numeric input (importance sliders, negative dimensions) is
//! clamped where it enters the engine and never surfaces here. What remains
//! are the failures a caller must not paper over: an unusable canvas frame,
//! a task record missing the fields classification depends on, and
//! configuration that cannot be loaded.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for eisenmatrix-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Canvas frame errors
    #[error("Invalid frame: {0}")]
    Frame(#[from] FrameError),

    /// Task validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Canvas frame errors.
///
/// A frame whose margin swallows half of either dimension leaves no drawable
/// range, so rendering must stop rather than proceed with collapsed axes.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FrameError {
    /// Margin is too large for the frame width
    #[error("margin {margin} must be smaller than half the width ({width})")]
    MarginExceedsWidth { width: f64, margin: f64 },

    /// Margin is too large for the frame height
    #[error("margin {margin} must be smaller than half the height ({height})")]
    MarginExceedsHeight { height: f64, margin: f64 },

    /// A dimension is NaN or infinite
    #[error("frame dimension '{field}' is not a finite number")]
    NonFinite { field: &'static str },
}

/// Task validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A task record lacks a field the engine cannot default
    #[error("Invalid task '{id}': missing {field}")]
    MissingField { id: String, field: &'static str },

    /// A task record carries a value that cannot be classified
    #[error("Invalid task '{id}': {field} {message}")]
    InvalidValue {
        id: String,
        field: &'static str,
        message: String,
    },
}

impl ValidationError {
    /// Identifier of the offending task.
    pub fn task_id(&self) -> &str {
        match self {
            ValidationError::MissingField { id, .. } | ValidationError::InvalidValue { id, .. } => {
                id
            }
        }
    }
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Home/config directory could not be determined
    #[error("Could not determine configuration directory")]
    NoConfigDir,
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
