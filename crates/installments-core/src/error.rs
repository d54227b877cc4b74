//! # Error Types
//!
//! Domain-specific error types for installments-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  installments-core errors (this file)                                  │
//! │  ├── CoreError        - Domain rule violations                         │
//! │  └── ValidationError  - Option / price input issues                    │
//! │                                                                         │
//! │  installments-widget errors (separate crate)                           │
//! │  └── WidgetError      - Config parse failures, bad attributes          │
//! │                                                                         │
//! │  None of these reach the shopper: every one is recovered locally       │
//! │  (safe default, empty config, or fallback formatting).                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Price is outside the accepted domain (negative cents).
    #[error("Invalid price: {cents} cents")]
    InvalidPrice { cents: i64 },

    /// A rate schedule was built with an unusable shape.
    #[error("Invalid rate schedule: {reason}")]
    InvalidSchedule { reason: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation issues.
///
/// Raised while sanitizing installment options. The sanitizer always
/// produces a usable option alongside the issue, so these are reported
/// (logged by the widget layer) rather than propagated.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Value must be positive.
    #[error("{field} must be positive, got {value}")]
    MustBePositive { field: String, value: i64 },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value is not a finite number.
    #[error("{field} must be a finite number")]
    NotFinite { field: String },

    /// Invalid format (e.g. a rate given as non-numeric text).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InvalidPrice { cents: -5 };
        assert_eq!(err.to_string(), "Invalid price: -5 cents");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::MustBePositive {
            field: "count".to_string(),
            value: 0,
        };
        assert_eq!(err.to_string(), "count must be positive, got 0");

        let err = ValidationError::NotFinite {
            field: "rate".to_string(),
        };
        assert_eq!(err.to_string(), "rate must be a finite number");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::NotFinite {
            field: "rate".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
