//! # Error Types
//!
//! Structured error types for micromech_core. Every failure belongs to one of
//! a few kinds so that callers (the CLI re-prompt loops in particular) can tell
//! a badly formatted value apart from a wrong kind of argument or a missing file.
//!
//! ## Example
//!
//! ```rust
//! use micromech_core::errors::{ErrorKind, MechError, MechResult};
//!
//! fn check_index(index: i64) -> MechResult<usize> {
//!     if !(0..=100).contains(&index) {
//!         return Err(MechError::invalid_value(
//!             "index",
//!             index.to_string(),
//!             "Index must be between 0 and 100",
//!         ));
//!     }
//!     Ok(index as usize)
//! }
//!
//! let err = check_index(101).unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::Value);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for micromech_core operations
pub type MechResult<T> = Result<T, MechError>;

/// Coarse classification of a [`MechError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    /// A value has the right shape but violates a format or range rule.
    Value,
    /// An argument is missing or of the wrong kind.
    Type,
    /// A referenced file does not exist.
    NotFound,
    /// Reading or writing a file failed.
    Io,
}

/// Structured error type for validation, calculation and file operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum MechError {
    /// A value violates a format or range rule (empty, whitespace, not positive,
    /// ratio above 0.5, index outside 0..=100, override mismatch, ...)
    #[error("Invalid value for '{field}': {value} - {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    /// An argument is missing or is not of an accepted kind
    #[error("Invalid type for '{field}': {reason}")]
    InvalidType { field: String, reason: String },

    /// A file that should be read does not exist
    #[error("File not found: '{path}'")]
    FileNotFound { path: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON or CSV (de)serialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl MechError {
    /// Create an InvalidValue error
    pub fn invalid_value(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        MechError::InvalidValue {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidType error
    pub fn invalid_type(field: impl Into<String>, reason: impl Into<String>) -> Self {
        MechError::InvalidType {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileNotFound error
    pub fn file_not_found(path: impl Into<String>) -> Self {
        MechError::FileNotFound { path: path.into() }
    }

    /// Create a FileError
    pub fn file_error(
        operation: impl Into<String>,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        MechError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        MechError::SerializationError {
            reason: reason.into(),
        }
    }

    /// Classify the error into one of the [`ErrorKind`]s.
    pub fn kind(&self) -> ErrorKind {
        match self {
            MechError::InvalidValue { .. } => ErrorKind::Value,
            MechError::InvalidType { .. } => ErrorKind::Type,
            MechError::FileNotFound { .. } => ErrorKind::NotFound,
            MechError::FileError { .. } | MechError::SerializationError { .. } => ErrorKind::Io,
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            MechError::InvalidValue { .. } => "INVALID_VALUE",
            MechError::InvalidType { .. } => "INVALID_TYPE",
            MechError::FileNotFound { .. } => "FILE_NOT_FOUND",
            MechError::FileError { .. } => "FILE_ERROR",
            MechError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<csv::Error> for MechError {
    fn from(err: csv::Error) -> Self {
        MechError::serialization(err.to_string())
    }
}

impl From<serde_json::Error> for MechError {
    fn from(err: serde_json::Error) -> Self {
        MechError::serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = MechError::invalid_value("youngs_modulus", "-5", "Value must be positive");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"InvalidValue\""));
        let roundtrip: MechError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(MechError::invalid_value("v", "0.6", "too big").kind(), ErrorKind::Value);
        assert_eq!(MechError::invalid_type("index", "missing").kind(), ErrorKind::Type);
        assert_eq!(MechError::file_not_found("a.csv").kind(), ErrorKind::NotFound);
        assert_eq!(MechError::file_error("write", "a.csv", "denied").kind(), ErrorKind::Io);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(MechError::invalid_type("fiber", "missing").error_code(), "INVALID_TYPE");
        assert_eq!(MechError::file_not_found("x.csv").error_code(), "FILE_NOT_FOUND");
    }

    #[test]
    fn test_error_display() {
        let err =
            MechError::invalid_value("name", "Fiber Glass", "Name must not contain whitespace");
        assert_eq!(
            err.to_string(),
            "Invalid value for 'name': Fiber Glass - Name must not contain whitespace"
        );
    }
}
