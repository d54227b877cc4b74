//! # Validation Module
//!
//! Sanitizes installment options and prices with safe defaults.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Config loader (installments-widget)                          │
//! │  ├── JSON syntax, entity-escaped quotes                                │
//! │  └── Lenient field reads (numbers or numeric strings)                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── count ≤ 0        → coerced to 1                                   │
//! │  ├── rate non-finite  → coerced to 0 (no interest)                     │
//! │  └── rate < 0         → coerced to 0 (no interest)                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Calculator                                                    │
//! │  └── count == 0 guard, has_interest requires rate > 0                  │
//! │                                                                         │
//! │  Nothing here aborts a render: one bad option never hides the table.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use installments_core::validation::sanitize_option;
//!
//! let sanitized = sanitize_option(0, true, Some(f64::NAN));
//! assert_eq!(sanitized.option.count, 1);
//! assert!(!sanitized.option.has_interest());
//! assert_eq!(sanitized.issues.len(), 2);
//! ```

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::InstallmentOption;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Largest installment count accepted as-is.
pub const MAX_INSTALLMENT_COUNT: u32 = 48;

// =============================================================================
// Sanitized Option
// =============================================================================

/// An option with safe defaults applied, plus the issues that forced them.
#[derive(Debug, Clone, PartialEq)]
pub struct Sanitized {
    pub option: InstallmentOption,
    pub issues: Vec<ValidationError>,
}

impl Sanitized {
    /// Returns true if the raw input needed no correction.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Builds an option from raw values, coercing anything unusable.
///
/// ## Rules
/// - `count` ≤ 0 becomes 1; counts above [`MAX_INSTALLMENT_COUNT`] are clamped
/// - a missing rate is 0 and raises no issue
/// - a non-finite or negative rate becomes 0
pub fn sanitize_option(count: i64, interest: bool, rate: Option<f64>) -> Sanitized {
    let mut issues = Vec::new();

    let count = match validate_count(count) {
        Ok(count) => count,
        Err(err) => {
            let fallback = if count <= 0 { 1 } else { MAX_INSTALLMENT_COUNT };
            issues.push(err);
            fallback
        }
    };

    let rate = match rate.map(validate_rate).transpose() {
        Ok(rate) => rate.unwrap_or(0.0),
        Err(err) => {
            issues.push(err);
            0.0
        }
    };

    Sanitized {
        option: InstallmentOption {
            count,
            interest,
            rate,
        },
        issues,
    }
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates an installment count.
///
/// ## Example
/// ```rust
/// use installments_core::validation::validate_count;
///
/// assert_eq!(validate_count(12).unwrap(), 12);
/// assert!(validate_count(0).is_err());
/// assert!(validate_count(-3).is_err());
/// ```
pub fn validate_count(count: i64) -> ValidationResult<u32> {
    if count <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "count".to_string(),
            value: count,
        });
    }

    if count > i64::from(MAX_INSTALLMENT_COUNT) {
        return Err(ValidationError::OutOfRange {
            field: "count".to_string(),
            min: 1,
            max: i64::from(MAX_INSTALLMENT_COUNT),
        });
    }

    // Bounded above, so the conversion cannot truncate.
    Ok(count as u32)
}

/// Validates an interest rate fraction.
///
/// Zero is valid (interest-free). Negative and non-finite values are not.
pub fn validate_rate(rate: f64) -> ValidationResult<f64> {
    if !rate.is_finite() {
        return Err(ValidationError::NotFinite {
            field: "rate".to_string(),
        });
    }

    if rate < 0.0 {
        return Err(ValidationError::InvalidFormat {
            field: "rate".to_string(),
            reason: "must not be negative".to_string(),
        });
    }

    Ok(rate)
}

/// Validates a price in cents.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items)
///
/// ## Example
/// ```rust
/// use installments_core::validation::validate_price_cents;
///
/// assert!(validate_price_cents(1099).is_ok());
/// assert!(validate_price_cents(0).is_ok());
/// assert!(validate_price_cents(-100).is_err());
/// ```
pub fn validate_price_cents(cents: i64) -> CoreResult<Money> {
    if cents < 0 {
        return Err(CoreError::InvalidPrice { cents });
    }

    Ok(Money::from_cents(cents))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_count() {
        assert_eq!(validate_count(1).unwrap(), 1);
        assert_eq!(validate_count(48).unwrap(), 48);

        assert!(validate_count(0).is_err());
        assert!(validate_count(-1).is_err());
        assert!(validate_count(49).is_err());
    }

    #[test]
    fn test_validate_rate() {
        assert_eq!(validate_rate(0.0).unwrap(), 0.0);
        assert_eq!(validate_rate(0.081).unwrap(), 0.081);

        assert!(validate_rate(-0.01).is_err());
        assert!(validate_rate(f64::NAN).is_err());
        assert!(validate_rate(f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn test_validate_price_cents() {
        assert_eq!(validate_price_cents(0).unwrap(), Money::from_cents(0));
        assert_eq!(validate_price_cents(1099).unwrap().cents(), 1099);
        assert!(matches!(
            validate_price_cents(-100),
            Err(CoreError::InvalidPrice { cents: -100 })
        ));
    }

    #[test]
    fn test_sanitize_clean_option() {
        let sanitized = sanitize_option(12, true, Some(0.1042));
        assert!(sanitized.is_clean());
        assert_eq!(sanitized.option, InstallmentOption::with_interest(12, 0.1042));
    }

    #[test]
    fn test_sanitize_coerces_non_positive_count() {
        let sanitized = sanitize_option(-2, false, None);
        assert_eq!(sanitized.option.count, 1);
        assert_eq!(sanitized.issues.len(), 1);
    }

    #[test]
    fn test_sanitize_clamps_large_count() {
        let sanitized = sanitize_option(500, false, None);
        assert_eq!(sanitized.option.count, MAX_INSTALLMENT_COUNT);
        assert!(matches!(
            sanitized.issues.first(),
            Some(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_sanitize_bad_rate_means_no_interest() {
        let sanitized = sanitize_option(10, true, Some(f64::NAN));
        assert_eq!(sanitized.option.rate, 0.0);
        assert!(sanitized.option.interest);
        assert!(!sanitized.option.has_interest());
        assert_eq!(sanitized.issues.len(), 1);
    }

    #[test]
    fn test_sanitize_missing_rate_is_clean() {
        let sanitized = sanitize_option(6, true, None);
        assert!(sanitized.is_clean());
        assert!(!sanitized.option.has_interest());
    }
}
