//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  PRICES ARRIVE IN CENTS                                                 │
//! │                                                                         │
//! │  The storefront publishes variant prices as integer cents:              │
//! │    { price: 10000 }  →  R$ 100,00                                       │
//! │                                                                         │
//! │  Interest and splitting are the ONLY places floats appear, and each    │
//! │  result is rounded straight back to whole cents:                        │
//! │    10000 × 1.1042 = 11042        (total with interest)                 │
//! │    11042 ÷ 12     =   920.17 → 920 (per installment)                   │
//! │                                                                         │
//! │  920 × 12 = 11040 ≠ 11042: per-installment drift is accepted and       │
//! │  documented, the total stays authoritative.                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use installments_core::money::Money;
//!
//! let price = Money::from_cents(10_000);
//! assert_eq!(price.split(6).cents(), 1667);
//! assert_eq!(price.points(), 100);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::CENTS_PER_POINT;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (centavos for BRL).
///
/// ## Design Decisions
/// - **i64 (signed)**: matches the integer prices the storefront publishes
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Newtype serde**: serializes as a bare number of cents
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use installments_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // R$ 10,99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole currency units (reais) portion, truncated toward zero.
    #[inline]
    pub const fn whole_units(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Applies a fractional rate and rounds to the nearest cent.
    ///
    /// `round(cents × (1 + rate))`, rounding half away from zero.
    ///
    /// ## Example
    /// ```rust
    /// use installments_core::money::Money;
    ///
    /// let total = Money::from_cents(10_000).apply_rate(0.1042);
    /// assert_eq!(total.cents(), 11_042);
    /// ```
    pub fn apply_rate(&self, rate: f64) -> Money {
        Money::from_cents((self.0 as f64 * (1.0 + rate)).round() as i64)
    }

    /// Splits the amount into `count` equal parts, rounded to the nearest cent.
    ///
    /// A zero count returns the amount unchanged.
    ///
    /// ## Example
    /// ```rust
    /// use installments_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(10_000).split(6).cents(), 1667);
    /// assert_eq!(Money::from_cents(10_000).split(0).cents(), 10_000);
    /// ```
    pub fn split(&self, count: u32) -> Money {
        if count == 0 {
            return *self;
        }

        Money::from_cents((self.0 as f64 / f64::from(count)).round() as i64)
    }

    /// Loyalty points earned for this amount: one per whole unit, never negative.
    #[inline]
    pub fn points(&self) -> i64 {
        self.0.div_euclid(CENTS_PER_POINT).max(0)
    }

    /// Renders the amount with two decimals and the given decimal separator.
    ///
    /// No thousands grouping is applied.
    ///
    /// ## Example
    /// ```rust
    /// use installments_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(123_456).to_decimal_string(','), "1234,56");
    /// assert_eq!(Money::from_cents(-550).to_decimal_string('.'), "-5.50");
    /// ```
    pub fn to_decimal_string(&self, separator: char) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!(
            "{}{}{}{:02}",
            sign,
            self.whole_units().abs(),
            separator,
            self.cents_part()
        )
    }

    /// Renders the amount rounded to whole units (half away from zero).
    pub fn to_whole_string(&self) -> String {
        let rounded = (self.0 as f64 / 100.0).round() as i64;
        rounded.to_string()
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain two-decimal rendering with a point separator.
///
/// ## Note
/// This is for debugging. Shopper-facing text goes through
/// [`crate::format::MoneyFormat`].
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_decimal_string('.'))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
