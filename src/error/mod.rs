//! Error handling for qbank.
//!
//! This module provides:
//! - [`QbError`]: The main error enum for all qbank operations
//! - [`ErrorCode`]: Standardized error codes for machine parsing
//! - [`StructuredError`]: Rich error type with suggestions and context
//! - Suggestion helpers for context-aware error recovery hints
//!
//! Parse problems inside an Aiken file are *not* errors at this level; they
//! are collected in [`crate::aiken::ParsedResults`]. Likewise a single failed
//! record during import is collected in [`crate::bank::ImportSummary`].

mod codes;
mod suggestions;

use std::io;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub use codes::ErrorCode;
pub use suggestions::suggest_for_error;

/// Main error type for qbank operations.
#[derive(Error, Debug)]
pub enum QbError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Input not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Missing required config: {0}")]
    MissingConfig(String),

    #[error("Import refused: {0}")]
    Precondition(String),

    #[error("Question bank API error{}: {message}", .status.map(|s| format!(" ({s})")).unwrap_or_default())]
    Api { status: Option<u16>, message: String },

    #[error("Import error: {0}")]
    Import(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl QbError {
    /// Get the error code for this error.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Io(_) => ErrorCode::IoError,
            Self::Json(_) | Self::Serialization(_) => ErrorCode::SerializationError,
            Self::Http(err) if err.is_timeout() => ErrorCode::NetworkTimeout,
            Self::Http(_) => ErrorCode::NetworkUnreachable,
            Self::NotFound(_) => ErrorCode::InputNotFound,
            Self::InvalidInput(_) => ErrorCode::InputUnreadable,
            Self::ValidationFailed(_) => ErrorCode::InputHasErrors,
            Self::Config(_) => ErrorCode::ConfigInvalid,
            Self::MissingConfig(_) => ErrorCode::ConfigMissingRequired,
            Self::Precondition(_) => ErrorCode::ImportPrecondition,
            Self::Api {
                status: Some(401 | 403),
                ..
            } => ErrorCode::NetworkAuthFailed,
            Self::Api { .. } => ErrorCode::ApiRejected,
            Self::Import(_) => ErrorCode::ImportFailed,
        }
    }

    /// Get context information for this error as JSON.
    #[must_use]
    pub fn context(&self) -> Option<Value> {
        match self {
            Self::NotFound(path) => Some(serde_json::json!({ "path": path })),
            Self::MissingConfig(key) => Some(serde_json::json!({ "config_key": key })),
            Self::Precondition(reason) => Some(serde_json::json!({ "reason": reason })),
            Self::Api { status, message } => {
                Some(serde_json::json!({ "status": status, "message": message }))
            }
            _ => None,
        }
    }

    /// Convert this error to a structured error.
    #[must_use]
    pub fn to_structured(&self) -> StructuredError {
        StructuredError::from_qb_error(self)
    }
}

/// A structured error with machine-readable code, suggestion, and context.
///
/// This type is designed for robot mode output where scripts need to
/// parse errors and take appropriate action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredError {
    /// The error code (e.g., "CONFIG_MISSING_REQUIRED")
    pub code: ErrorCode,

    /// The numeric error code (e.g., 304)
    pub numeric_code: u16,

    /// Human-readable error message
    pub message: String,

    /// Actionable suggestion for recovery
    pub suggestion: String,

    /// Additional context for debugging
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,

    /// Whether this error is potentially recoverable by the user
    pub recoverable: bool,

    /// Error category (e.g., "input", "config", "network")
    pub category: String,
}

impl StructuredError {
    /// Create a new structured error.
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            numeric_code: code.numeric(),
            suggestion: code.suggestion().to_string(),
            context: None,
            recoverable: code.is_recoverable(),
            category: code.category().to_string(),
            code,
            message: message.into(),
        }
    }

    /// Create a structured error from a QbError.
    #[must_use]
    pub fn from_qb_error(err: &QbError) -> Self {
        let code = err.code();
        let context = err.context();
        let suggestion = suggest_for_error(code, context.as_ref());

        Self {
            code,
            numeric_code: code.numeric(),
            message: err.to_string(),
            suggestion,
            context,
            recoverable: code.is_recoverable(),
            category: code.category().to_string(),
        }
    }
}

impl std::fmt::Display for StructuredError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

/// Result type alias using QbError.
pub type Result<T> = std::result::Result<T, QbError>;
