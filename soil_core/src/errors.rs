//! # Error Types
//!
//! Structured error types for soil_core. Errors carry enough context for a
//! front end (or an LLM driving the JSON API) to tell the user what to fix.
//!
//! Note that "not enough information to derive anything" is *not* an error:
//! the phase solver reports it through
//! [`SolveOutcome::InsufficientData`](crate::calculations::phase::SolveOutcome).
//!
//! ## Example
//!
//! ```rust
//! use soil_core::errors::{CalcError, CalcResult};
//!
//! fn validate_void_ratio(e: f64) -> CalcResult<()> {
//!     if e <= 0.0 {
//!         return Err(CalcError::InvalidInput {
//!             field: "e".to_string(),
//!             value: e.to_string(),
//!             reason: "Void ratio must be positive".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for soil_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (out of range, non-finite, inconsistent bounds)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A quantity symbol that is not one of the twelve phase quantities
    #[error("Unknown quantity '{symbol}' (expected one of: {expected})")]
    UnknownQuantity { symbol: String, expected: String },

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
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an UnknownQuantity error
    pub fn unknown_quantity(symbol: impl Into<String>, expected: impl Into<String>) -> Self {
        CalcError::UnknownQuantity {
            symbol: symbol.into(),
            expected: expected.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::UnknownQuantity { .. } => "UNKNOWN_QUANTITY",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(err: serde_json::Error) -> Self {
        CalcError::SerializationError {
            reason: err.to_string(),
        }
    }
}
