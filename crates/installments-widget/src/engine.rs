//! # Installment Engine
//!
//! One engine per widget. Owns the option list parsed at initialization and
//! the current price; every price change recomputes all totals and the
//! summary from scratch.
//!
//! ```text
//!   price ──► InstallmentEngine ──► Projector ──► InstallmentsView
//!               │ options (immutable)
//!               │ initial price
//!               └ table expanded flag
//! ```

use installments_core::{InstallmentOption, InstallmentsView, Money, Projector};

/// Per-widget computation state.
#[derive(Debug, Clone)]
pub struct InstallmentEngine {
    options: Vec<InstallmentOption>,
    projector: Projector,
    initial_price: Money,
    price: Money,
    table_expanded: bool,
}

impl InstallmentEngine {
    pub fn new(
        options: Vec<InstallmentOption>,
        projector: Projector,
        initial_price: Money,
        table_expanded: bool,
    ) -> Self {
        InstallmentEngine {
            options,
            projector,
            initial_price,
            price: initial_price,
            table_expanded,
        }
    }

    pub fn options(&self) -> &[InstallmentOption] {
        &self.options
    }

    /// Price to render for a variant notification.
    ///
    /// A missing price means the initial price. A non-positive result is
    /// ignored (`None`).
    pub fn resolve_price(&self, price: Option<i64>) -> Option<Money> {
        let cents = price.unwrap_or(self.initial_price.cents());
        (cents > 0).then(|| Money::from_cents(cents))
    }

    /// Sets a new price and renders it.
    pub fn update(&mut self, price: Money) -> InstallmentsView {
        self.price = price;
        self.render()
    }

    /// Renders the current state.
    pub fn render(&self) -> InstallmentsView {
        self.projector
            .project(self.price, &self.options, self.table_expanded)
    }

    /// Flips the table, or forces it to `expanded`. Returns the new state.
    pub fn toggle_table(&mut self, expanded: Option<bool>) -> bool {
        self.table_expanded = expanded.unwrap_or(!self.table_expanded);
        self.table_expanded
    }
}
