//! # Error Types
//!
//! Structured error types for vbelt_core. Every failure in this crate is a
//! deterministic function of its input, so errors carry enough context
//! (table, parameter, offending value) to fix the call rather than retry it.
//!
//! ## Example
//!
//! ```rust
//! use vbelt_core::errors::{CalcError, CalcResult};
//!
//! fn validate_rpm(rpm: f64) -> CalcResult<()> {
//!     if rpm <= 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "rpm",
//!             rpm.to_string(),
//!             "Rotational speed must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for vbelt_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for sizing operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// A query value lies outside the domain covered by a table or a
    /// model's validity window
    #[error("Out of range in '{table}': {parameter} = {value} - {reason}")]
    OutOfRange {
        table: String,
        parameter: String,
        value: String,
        reason: String,
    },

    /// An identifier (model, profile, material, device) is not known
    #[error("Not valid for '{field}': {value} - {reason}")]
    NotValid {
        field: String,
        value: String,
        reason: String,
    },

    /// The commercial diameter solver ran out of time
    #[error("No convergence after {elapsed_ms} ms: {reason}")]
    Convergence { elapsed_ms: u64, reason: String },

    /// A named dataset is not bundled with the library
    #[error("Dataset not found: {table}")]
    DataNotFound { table: String },

    /// A bundled dataset is malformed
    #[error("Malformed dataset '{table}': {reason}")]
    DataFormat { table: String, reason: String },

    /// A numeric input is malformed (NaN, infinite, wrong sign)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Solver settings could not be read
    #[error("Configuration error: {reason}")]
    Config { reason: String },
}

impl CalcError {
    /// Create an OutOfRange error
    pub fn out_of_range(
        table: impl Into<String>,
        parameter: impl Into<String>,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::OutOfRange {
            table: table.into(),
            parameter: parameter.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// Create a NotValid error
    pub fn not_valid(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::NotValid {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a Convergence error
    pub fn convergence(elapsed_ms: u64, reason: impl Into<String>) -> Self {
        CalcError::Convergence {
            elapsed_ms,
            reason: reason.into(),
        }
    }

    /// Create a DataNotFound error
    pub fn data_not_found(table: impl Into<String>) -> Self {
        CalcError::DataNotFound { table: table.into() }
    }

    /// Create a DataFormat error
    pub fn data_format(table: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::DataFormat {
            table: table.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a Config error
    pub fn config(reason: impl Into<String>) -> Self {
        CalcError::Config { reason: reason.into() }
    }

    /// Check if this is a recoverable error.
    ///
    /// Nothing here is: the same input always fails the same way.
    pub fn is_recoverable(&self) -> bool {
        false
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::OutOfRange { .. } => "OUT_OF_RANGE",
            CalcError::NotValid { .. } => "NOT_VALID",
            CalcError::Convergence { .. } => "CONVERGENCE",
            CalcError::DataNotFound { .. } => "DATA_NOT_FOUND",
            CalcError::DataFormat { .. } => "DATA_FORMAT",
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::Config { .. } => "CONFIG",
        }
    }
}

/// Reject NaN and infinities.
pub(crate) fn ensure_finite(field: &str, value: f64) -> CalcResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::invalid_input(field, value.to_string(), "Value must be a finite number"))
    }
}

/// Reject anything that is not a finite, strictly positive number.
pub(crate) fn ensure_positive(field: &str, value: f64) -> CalcResult<f64> {
    ensure_finite(field, value)?;
    if value <= 0.0 {
        return Err(CalcError::invalid_input(field, value.to_string(), "Value must be positive"));
    }
    Ok(value)
}
