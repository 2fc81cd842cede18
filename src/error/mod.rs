// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Error types for valkit.
//!
//! Two failure channels are kept apart: a caller asking for rules that were
//! never registered ([`ValkitError::RulesNotRegistered`]) and a validation that
//! did not pass while `throw_on_failure` is enabled
//! ([`ValkitError::ValidationFailed`]), which carries the full result.

use std::path::PathBuf;
use thiserror::Error;

use crate::rules::ValidationResult;

/// The main error type for valkit operations.
#[derive(Error, Debug)]
pub enum ValkitError {
    // Caller requested rules that are missing from the registry
    #[error("The following rules are not registered: {}", .keys.join(", "))]
    RulesNotRegistered { keys: Vec<String> },

    // Validation did not pass and throw-on-failure was requested
    #[error("Validation failed: {}", .0.summary())]
    ValidationFailed(Box<ValidationResult>),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ValkitError {
    /// The validation result carried by a [`ValkitError::ValidationFailed`].
    pub fn validation_result(&self) -> Option<&ValidationResult> {
        match self {
            ValkitError::ValidationFailed(result) => Some(result),
            _ => None,
        }
    }

    /// Unwrap the validation result carried by a [`ValkitError::ValidationFailed`].
    pub fn into_validation_result(self) -> Option<ValidationResult> {
        match self {
            ValkitError::ValidationFailed(result) => Some(*result),
            _ => None,
        }
    }
}

/// Configuration-related errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Failed to parse configuration: {message}")]
    ParseError { message: String },

    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    #[error("Unknown built-in rule '{rule}' configured for key '{key}'")]
    UnknownRule { key: String, rule: String },
}

/// Result type alias for valkit operations.
pub type Result<T> = std::result::Result<T, ValkitError>;
