//! Standardized error codes for machine-parseable output.
//!
//! Error codes follow a numeric taxonomy:
//! - 1xx: Input errors (question bank files)
//! - 3xx: Config errors
//! - 5xx: Network / API errors
//! - 6xx: Import errors
//! - 9xx: Internal errors

use serde::{Deserialize, Serialize};

/// Standardized error codes for robot mode output.
///
/// Each variant maps to a numeric code (e.g., `InputNotFound` -> E101).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // ========================================
    // Input errors (1xx)
    // ========================================
    /// E101: Question bank file does not exist
    InputNotFound,
    /// E102: Question bank file could not be read as UTF-8 text
    InputUnreadable,
    /// E103: Question bank contains invalid blocks (strict mode)
    InputHasErrors,

    // ========================================
    // Config errors (3xx)
    // ========================================
    /// E301: Config file not found
    ConfigNotFound,
    /// E302: Config file has invalid syntax or values
    ConfigInvalid,
    /// E304: Required config value is missing
    ConfigMissingRequired,

    // ========================================
    // Network errors (5xx)
    // ========================================
    /// E501: Cannot reach the question bank API
    NetworkUnreachable,
    /// E502: Request timed out
    NetworkTimeout,
    /// E503: API rejected the credentials
    NetworkAuthFailed,
    /// E504: API returned an error response
    ApiRejected,

    // ========================================
    // Import errors (6xx)
    // ========================================
    /// E601: Import refused before any request was sent
    ImportPrecondition,
    /// E602: Import ran but no question was created
    ImportFailed,

    // ========================================
    // Internal errors (9xx)
    // ========================================
    /// E901: Unexpected internal error
    InternalError,
    /// E902: Serialization/deserialization failed
    SerializationError,
    /// E906: IO operation failed
    IoError,
}

impl ErrorCode {
    /// Get the numeric error code (e.g., `InputNotFound` -> 101).
    #[must_use]
    pub const fn numeric(&self) -> u16 {
        match self {
            Self::InputNotFound => 101,
            Self::InputUnreadable => 102,
            Self::InputHasErrors => 103,

            Self::ConfigNotFound => 301,
            Self::ConfigInvalid => 302,
            Self::ConfigMissingRequired => 304,

            Self::NetworkUnreachable => 501,
            Self::NetworkTimeout => 502,
            Self::NetworkAuthFailed => 503,
            Self::ApiRejected => 504,

            Self::ImportPrecondition => 601,
            Self::ImportFailed => 602,

            Self::InternalError => 901,
            Self::SerializationError => 902,
            Self::IoError => 906,
        }
    }

    /// Get the error code as a formatted string (e.g., "E101").
    #[must_use]
    pub fn code_string(&self) -> String {
        format!("E{}", self.numeric())
    }

    /// Get the default suggestion for this error code.
    #[must_use]
    pub const fn suggestion(&self) -> &'static str {
        match self {
            Self::InputNotFound => "Check the file path. Use `-` to read the question bank from stdin",
            Self::InputUnreadable => "Save the question bank as UTF-8 plain text and try again",
            Self::InputHasErrors => "Run `qbank check <file>` to list the invalid lines, fix them, then retry",

            Self::ConfigNotFound => "Create ~/.config/qbank/config.toml or pass --config <path>",
            Self::ConfigInvalid => "Run `qbank config` to see current values. Check TOML syntax in config file",
            Self::ConfigMissingRequired => "Set the value in config.toml or through the matching QBANK_* environment variable",

            Self::NetworkUnreachable => "Check your network connection and the configured api.base_url",
            Self::NetworkTimeout => "The question bank API is slow or unreachable. Raise api.timeout_secs or retry later",
            Self::NetworkAuthFailed => "Verify api.token (or QBANK_API_TOKEN) has permission to create questions",
            Self::ApiRejected => "The API rejected the request. Check the folder id, difficulty and mark values",

            Self::ImportPrecondition => "Select a target folder with --folder and make sure the file has at least one valid question",
            Self::ImportFailed => "No question was created. Check the failure messages above and the API logs",

            Self::InternalError => "An unexpected error occurred. Please report this issue with full error output",
            Self::SerializationError => "The data format may be corrupted. Check input data for validity",
            Self::IoError => "File operation failed. Check path exists and permissions are correct",
        }
    }

    /// Check if this error is potentially recoverable by the user.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        match self {
            Self::InputNotFound
            | Self::InputUnreadable
            | Self::InputHasErrors
            | Self::ConfigNotFound
            | Self::ConfigInvalid
            | Self::ConfigMissingRequired
            | Self::NetworkUnreachable
            | Self::NetworkTimeout
            | Self::NetworkAuthFailed
            | Self::ApiRejected
            | Self::ImportPrecondition
            | Self::ImportFailed
            | Self::IoError => true,

            Self::InternalError | Self::SerializationError => false,
        }
    }

    /// Get the error category name.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self.numeric() / 100 {
            1 => "input",
            3 => "config",
            5 => "network",
            6 => "import",
            9 => "internal",
            _ => "unknown",
        }
    }

    /// Iterate over all error codes.
    pub fn all() -> impl Iterator<Item = Self> {
        [
            Self::InputNotFound,
            Self::InputUnreadable,
            Self::InputHasErrors,
            Self::ConfigNotFound,
            Self::ConfigInvalid,
            Self::ConfigMissingRequired,
            Self::NetworkUnreachable,
            Self::NetworkTimeout,
            Self::NetworkAuthFailed,
            Self::ApiRejected,
            Self::ImportPrecondition,
            Self::ImportFailed,
            Self::InternalError,
            Self::SerializationError,
            Self::IoError,
        ]
        .into_iter()
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code_string())
    }
}
