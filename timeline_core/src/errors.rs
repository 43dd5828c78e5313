//! # Error Types
//!
//! Structured error types for timeline_core. Every variant carries enough
//! context for a caller (or a rendering layer) to report which input was
//! wrong without re-parsing a message string.
//!
//! ## Example
//!
//! ```rust
//! use timeline_core::errors::{TimelineError, TimelineResult};
//!
//! fn validate_month(month: u32) -> TimelineResult<()> {
//!     if !(1..=12).contains(&month) {
//!         return Err(TimelineError::invalid_input(
//!             "month",
//!             month.to_string(),
//!             "Month must be between 1 and 12",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_month(13).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for timeline_core operations
pub type TimelineResult<T> = Result<T, TimelineError>;

/// Structured error type for timeline operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum TimelineError {
    /// Display window end precedes its start (or the window would be empty)
    #[error("Invalid range: end {end} precedes start {start}")]
    InvalidRange { start: String, end: String },

    /// A date or year-month string could not be parsed
    #[error("Could not parse date for '{field}': '{value}'")]
    DateParse { field: String, value: String },

    /// An input value is invalid (out of range, duplicate, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Plan tree nests deeper than focus area / objective / activity
    #[error("Item {id} is nested at depth {depth}; at most 3 levels are supported")]
    HierarchyTooDeep { id: u64, depth: usize },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Configuration file could not be parsed
    #[error("Config error: {reason}")]
    ConfigError { reason: String },

    /// Plan schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },
}

impl TimelineError {
    /// Create an InvalidRange error
    pub fn invalid_range(start: impl ToString, end: impl ToString) -> Self {
        TimelineError::InvalidRange {
            start: start.to_string(),
            end: end.to_string(),
        }
    }

    /// Create a DateParse error
    pub fn date_parse(field: impl Into<String>, value: impl Into<String>) -> Self {
        TimelineError::DateParse {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        TimelineError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        TimelineError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            TimelineError::InvalidRange { .. } => "INVALID_RANGE",
            TimelineError::DateParse { .. } => "DATE_PARSE",
            TimelineError::InvalidInput { .. } => "INVALID_INPUT",
            TimelineError::HierarchyTooDeep { .. } => "HIERARCHY_TOO_DEEP",
            TimelineError::FileError { .. } => "FILE_ERROR",
            TimelineError::SerializationError { .. } => "SERIALIZATION_ERROR",
            TimelineError::ConfigError { .. } => "CONFIG_ERROR",
            TimelineError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}
