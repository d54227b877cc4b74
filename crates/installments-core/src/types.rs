//! # Domain Types
//!
//! Core domain types used by the installment widgets.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────────┐        ┌──────────────────────────┐           │
//! │  │  InstallmentOption  │        │    InstallmentTotals     │           │
//! │  │  ─────────────────  │  ───►  │  ──────────────────────  │           │
//! │  │  count   (u32 ≥ 1)  │ price  │  count                   │           │
//! │  │  interest (bool)    │        │  rate                    │           │
//! │  │  rate    (f64 ≥ 0)  │        │  has_interest            │           │
//! │  └─────────────────────┘        │  total (Money)           │           │
//! │    configured, immutable        │  per_installment (Money) │           │
//! │                                 └──────────────────────────┘           │
//! │                                   derived, rebuilt per price            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Installment Option
// =============================================================================

/// One configured way to split a price.
///
/// Options arrive as an ordered list; list order is display order.
/// `count` is expected to be unique within a list but that is not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InstallmentOption {
    /// Number of installments (1 = paid in full).
    pub count: u32,

    /// Whether the merchant charges interest for this option.
    #[serde(default)]
    pub interest: bool,

    /// Interest as a fraction of the price (0.1042 = 10.42%).
    #[serde(default)]
    pub rate: f64,
}

impl InstallmentOption {
    /// An interest-free option.
    #[inline]
    pub const fn interest_free(count: u32) -> Self {
        InstallmentOption {
            count,
            interest: false,
            rate: 0.0,
        }
    }

    /// An option charging `rate` on top of the price.
    #[inline]
    pub const fn with_interest(count: u32, rate: f64) -> Self {
        InstallmentOption {
            count,
            interest: true,
            rate,
        }
    }

    /// Returns true when interest actually applies.
    ///
    /// The `interest` flag alone is not enough: a zero, negative or
    /// non-finite rate means the option is charged as interest-free.
    #[inline]
    pub fn has_interest(&self) -> bool {
        self.interest && self.rate.is_finite() && self.rate > 0.0
    }
}

// =============================================================================
// Installment Totals
// =============================================================================

/// Totals derived from a price and one option.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct InstallmentTotals {
    pub count: u32,
    pub rate: f64,
    pub has_interest: bool,
    /// Amount the shopper pays across all installments.
    pub total: Money,
    /// Amount of a single installment (may not sum exactly to `total`).
    pub per_installment: Money,
}

impl InstallmentTotals {
    /// Table label, e.g. `"6x"`.
    pub fn label(&self) -> String {
        format!("{}x", self.count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
