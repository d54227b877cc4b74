//! # installments-core: Pure Installment Logic
//!
//! This crate is the **heart** of the storefront installment widgets. It
//! contains all computation as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  Storefront Installments Architecture                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Storefront view layer (JS)                      │   │
//! │  │        Table rows ──► Summary line ──► Points ──► Disclaimer   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ InstallmentsView (ts-rs)               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              installments-widget (lifecycle)                    │   │
//! │  │      element snapshot, config loader, variant bus, registry    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            ★ installments-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │  ┌──────────┐ ┌────────────┐ ┌──────────┐ ┌──────────────────┐ │   │
//! │  │  │  money   │ │ calculator │ │  format  │ │       view       │ │   │
//! │  │  │  Money   │ │  totals    │ │ fallback │ │  rows / summary  │ │   │
//! │  │  └──────────┘ └────────────┘ └──────────┘ └──────────────────┘ │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (InstallmentOption, InstallmentTotals)
//! - [`money`] - Money type with integer cents
//! - [`calculator`] - Totals and summary selection
//! - [`schedule`] - Fixed rate tables that generate option lists
//! - [`format`] - Money formatting capability and its fallback chain
//! - [`view`] - Render projection handed to the view layer
//! - [`validation`] - Option sanitizing with safe defaults
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use installments_core::calculator::compute_totals;
//! use installments_core::{InstallmentOption, Money};
//!
//! let price = Money::from_cents(10_000); // R$ 100,00
//! let option = InstallmentOption::with_interest(12, 0.1042);
//!
//! let totals = compute_totals(price, &option);
//! assert_eq!(totals.total.cents(), 11_042);
//! assert_eq!(totals.per_installment.cents(), 920);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod calculator;
pub mod error;
pub mod format;
pub mod money;
pub mod schedule;
pub mod types;
pub mod validation;
pub mod view;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use format::{DecimalSeparator, MoneyFormat, MoneyFormatter};
pub use money::Money;
pub use schedule::RateSchedule;
pub use types::*;
pub use view::{InstallmentRow, InstallmentSummary, InstallmentsView, Projector, ViewTemplates};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Placeholder replaced by the installment count in summary templates.
pub const COUNT_TOKEN: &str = "%count%";

/// Placeholder replaced by the formatted per-installment value in summary templates.
pub const VALUE_TOKEN: &str = "%value%";

/// Placeholder replaced by the earned points in the points template.
pub const POINTS_TOKEN: &str = "%points%";

/// Cents per loyalty point (one point per whole currency unit).
pub const CENTS_PER_POINT: i64 = 100;
