//! # Installment Calculator
//!
//! Derives totals for each configured option and picks the summary option.
//!
//! ## User Workflow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Shopper picks variant "110V" (price 10000)                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  compute_all(price, options) ← every option, independently             │
//! │       │                                                                 │
//! │       ├── 1x  sem juros  → total 10000, per 10000                      │
//! │       ├── 6x  sem juros  → total 10000, per  1667                      │
//! │       └── 12x 10,42%     → total 11042, per   920                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  select_summary_option(options, highlight = 6) → 6x                    │
//! │  (no 6x configured → falls back to the LAST option, 12x)               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::money::Money;
use crate::types::{InstallmentOption, InstallmentTotals};

/// Computes totals for one option.
///
/// - `total = round(price × (1 + rate))` when interest applies, else `price`
/// - `per_installment = round(total / count)`, or `total` when `count == 0`
///
/// ## Example
/// ```rust
/// use installments_core::calculator::compute_totals;
/// use installments_core::{InstallmentOption, Money};
///
/// let totals = compute_totals(Money::from_cents(10_000), &InstallmentOption::interest_free(6));
/// assert_eq!(totals.total.cents(), 10_000);
/// assert_eq!(totals.per_installment.cents(), 1667);
/// ```
pub fn compute_totals(price: Money, option: &InstallmentOption) -> InstallmentTotals {
    let has_interest = option.has_interest();

    let total = if has_interest {
        price.apply_rate(option.rate)
    } else {
        price
    };

    InstallmentTotals {
        count: option.count,
        rate: option.rate,
        has_interest,
        total,
        per_installment: total.split(option.count),
    }
}

/// Computes totals for every option, preserving configured order.
pub fn compute_all(price: Money, options: &[InstallmentOption]) -> Vec<InstallmentTotals> {
    options
        .iter()
        .map(|option| compute_totals(price, option))
        .collect()
}

/// Picks the option shown in the one-line summary.
///
/// The first option whose count equals `highlight` wins. Otherwise the last
/// configured option is used: the longest plan, usually the one with
/// interest.
///
/// ## Example
/// ```rust
/// use installments_core::calculator::select_summary_option;
/// use installments_core::InstallmentOption;
///
/// let options = [
///     InstallmentOption::interest_free(1),
///     InstallmentOption::with_interest(12, 0.1042),
/// ];
/// assert_eq!(select_summary_option(&options, Some(6)).map(|o| o.count), Some(12));
/// assert!(select_summary_option(&[], Some(6)).is_none());
/// ```
pub fn select_summary_option(
    options: &[InstallmentOption],
    highlight: Option<u32>,
) -> Option<&InstallmentOption> {
    highlight
        .and_then(|count| options.iter().find(|option| option.count == count))
        .or_else(|| options.last())
}

/// Returns true if any option actually charges interest.
pub fn any_interest(totals: &[InstallmentTotals]) -> bool {
    totals.iter().any(|totals| totals.has_interest)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> Vec<InstallmentOption> {
        vec![
            InstallmentOption::interest_free(1),
            InstallmentOption::interest_free(6),
            InstallmentOption::with_interest(12, 0.1042),
        ]
    }

    #[test]
    fn test_interest_free_total_equals_price() {
        for price in [0, 1, 99, 10_000, 123_457] {
            for count in 1..=12 {
                let totals =
                    compute_totals(Money::from_cents(price), &InstallmentOption::interest_free(count));
                assert_eq!(totals.total.cents(), price);
                assert_eq!(
                    totals.per_installment.cents(),
                    (price as f64 / f64::from(count)).round() as i64
                );
                assert!(!totals.has_interest);
            }
        }
    }

    #[test]
    fn test_interest_total_never_below_price() {
        for price in [0, 1, 99, 10_000, 123_457] {
            for rate in [0.0001, 0.0748, 0.1042, 1.5] {
                let totals =
                    compute_totals(Money::from_cents(price), &InstallmentOption::with_interest(12, rate));
                assert_eq!(
                    totals.total.cents(),
                    (price as f64 * (1.0 + rate)).round() as i64
                );
                assert!(totals.total.cents() >= price);
                assert!(totals.has_interest);
            }
        }
    }

    #[test]
    fn test_six_installments_of_one_hundred() {
        let totals = compute_totals(Money::from_cents(10_000), &InstallmentOption::interest_free(6));
        assert_eq!(totals.total.cents(), 10_000);
        assert_eq!(totals.per_installment.cents(), 1667);
    }

    #[test]
    fn test_twelve_installments_with_interest() {
        let totals = compute_totals(
            Money::from_cents(10_000),
            &InstallmentOption::with_interest(12, 0.1042),
        );
        assert_eq!(totals.total.cents(), 11_042);
        assert_eq!(totals.per_installment.cents(), 920);
        assert_eq!(totals.count, 12);
        assert!((totals.rate - 0.1042).abs() < f64::EPSILON);
    }

    #[test]
    fn test_interest_flag_with_zero_rate_is_interest_free() {
        let totals = compute_totals(
            Money::from_cents(10_000),
            &InstallmentOption::with_interest(10, 0.0),
        );
        assert!(!totals.has_interest);
        assert_eq!(totals.total.cents(), 10_000);
        assert_eq!(totals.per_installment.cents(), 1000);
    }

    #[test]
    fn test_zero_count_guard() {
        let option = InstallmentOption {
            count: 0,
            interest: true,
            rate: 0.1,
        };
        let totals = compute_totals(Money::from_cents(1000), &option);
        assert_eq!(totals.total.cents(), 1100);
        assert_eq!(totals.per_installment.cents(), 1100);
    }

    #[test]
    fn test_compute_all_keeps_order() {
        let totals = compute_all(Money::from_cents(10_000), &options());
        let counts: Vec<u32> = totals.iter().map(|t| t.count).collect();
        assert_eq!(counts, vec![1, 6, 12]);
        assert!(any_interest(&totals));
    }

    #[test]
    fn test_select_summary_empty() {
        assert!(select_summary_option(&[], Some(6)).is_none());
        assert!(select_summary_option(&[], None).is_none());
    }

    #[test]
    fn test_select_summary_highlight_present() {
        let options = options();
        let selected = select_summary_option(&options, Some(6));
        assert_eq!(selected.map(|o| o.count), Some(6));
    }

    #[test]
    fn test_select_summary_falls_back_to_last() {
        let options = vec![
            InstallmentOption::interest_free(1),
            InstallmentOption::with_interest(12, 0.1042),
        ];
        assert_eq!(select_summary_option(&options, Some(6)).map(|o| o.count), Some(12));
        assert_eq!(select_summary_option(&options, None).map(|o| o.count), Some(12));
    }

    #[test]
    fn test_select_summary_uses_configured_order_not_sorted() {
        let options = vec![
            InstallmentOption::interest_free(10),
            InstallmentOption::interest_free(2),
        ];
        assert_eq!(select_summary_option(&options, Some(7)).map(|o| o.count), Some(2));
    }

    #[test]
    fn test_select_summary_first_duplicate_wins() {
        let options = vec![
            InstallmentOption::interest_free(6),
            InstallmentOption::with_interest(6, 0.05),
        ];
        let selected = select_summary_option(&options, Some(6));
        assert_eq!(selected, Some(&InstallmentOption::interest_free(6)));
    }
}
