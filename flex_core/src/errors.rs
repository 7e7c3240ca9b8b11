//! # Error Types
//!
//! Structured error types for flex_core. Every failure an analysis run can
//! hit is a concrete variant with enough context to understand and fix the
//! problem programmatically — degenerate input is reported at the boundary
//! instead of flowing through the pipeline as silent zeros.
//!
//! ## Example
//!
//! ```rust
//! use flex_core::errors::{CalcError, CalcResult};
//!
//! fn validate_length(length: f64) -> CalcResult<()> {
//!     if length <= 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "length",
//!             length.to_string(),
//!             "Member length must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for flex_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for analysis operations.
///
/// Each variant provides specific context about what went wrong so callers
/// can react without string-matching error messages.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (out of range, wrong sign, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// The structure is valid input but outside the solvable model
    /// (e.g. a support release that introduces an unknown the equation
    /// system cannot carry)
    #[error("Unsupported configuration: {reason}")]
    UnsupportedConfiguration { reason: String },

    /// The equilibrium system has no unique solution
    #[error("Singular system: {detail}")]
    SingularSystem { detail: String },

    /// A symbolic equation term did not match the expression grammar
    #[error("Unrecognized term '{term}' in equation '{equation}'")]
    ParseError { term: String, equation: String },

    /// Calculation failed for a structural reason not covered above
    #[error("Calculation failed: {calculation_type} - {reason}")]
    CalculationFailed {
        calculation_type: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        CalcError::MissingField {
            field: field.into(),
        }
    }

    /// Create an UnsupportedConfiguration error
    pub fn unsupported(reason: impl Into<String>) -> Self {
        CalcError::UnsupportedConfiguration {
            reason: reason.into(),
        }
    }

    /// Create a SingularSystem error
    pub fn singular(detail: impl Into<String>) -> Self {
        CalcError::SingularSystem {
            detail: detail.into(),
        }
    }

    /// Create a ParseError
    pub fn parse_error(term: impl Into<String>, equation: impl Into<String>) -> Self {
        CalcError::ParseError {
            term: term.into(),
            equation: equation.into(),
        }
    }

    /// Create a CalculationFailed error
    pub fn calculation_failed(
        calculation_type: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::CalculationFailed {
            calculation_type: calculation_type.into(),
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MissingField { .. } => "MISSING_FIELD",
            CalcError::UnsupportedConfiguration { .. } => "UNSUPPORTED_CONFIGURATION",
            CalcError::SingularSystem { .. } => "SINGULAR_SYSTEM",
            CalcError::ParseError { .. } => "PARSE_ERROR",
            CalcError::CalculationFailed { .. } => "CALCULATION_FAILED",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_input("length", "-5.0", "Member length must be positive");
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::missing_field("spans").error_code(), "MISSING_FIELD");
        assert_eq!(
            CalcError::singular("determinant below tolerance").error_code(),
            "SINGULAR_SYSTEM"
        );
        assert_eq!(
            CalcError::parse_error("2EIx", "2EIx + 3").error_code(),
            "PARSE_ERROR"
        );
    }
}
