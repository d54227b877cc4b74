//! # Rate Schedules
//!
//! Some storefront blocks carry no per-element configuration: they show a
//! fixed 1x..12x table where short plans are interest-free and longer plans
//! use a merchant-wide rate table. [`RateSchedule`] generates the option list
//! for that case, so the same calculator and projection serve both blocks.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::types::InstallmentOption;
use crate::validation::MAX_INSTALLMENT_COUNT;

/// A generated option list: counts `1..=max_count`, interest-free up to a
/// threshold, then charged from a per-count rate table.
///
/// Deserializing goes through [`RateSchedule::new`], so a schedule read from
/// configuration is validated the same way as one built in code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ScheduleFields")]
pub struct RateSchedule {
    max_count: u32,
    interest_free_up_to: u32,
    rates: BTreeMap<u32, f64>,
    highlight: Option<u32>,
}

impl RateSchedule {
    /// Creates a schedule.
    ///
    /// # Errors
    /// `CoreError::InvalidSchedule` if `max_count` is zero or above
    /// [`MAX_INSTALLMENT_COUNT`], or a rate is negative or non-finite.
    pub fn new(
        max_count: u32,
        interest_free_up_to: u32,
        rates: BTreeMap<u32, f64>,
    ) -> CoreResult<Self> {
        if max_count == 0 || max_count > MAX_INSTALLMENT_COUNT {
            return Err(CoreError::InvalidSchedule {
                reason: format!(
                    "max_count must be between 1 and {MAX_INSTALLMENT_COUNT}, got {max_count}"
                ),
            });
        }

        if let Some((count, rate)) = rates
            .iter()
            .find(|(_, rate)| !rate.is_finite() || **rate < 0.0)
        {
            return Err(CoreError::InvalidSchedule {
                reason: format!("rate for {count}x must be a non-negative number, got {rate}"),
            });
        }

        Ok(RateSchedule {
            max_count,
            interest_free_up_to,
            rates,
            highlight: None,
        })
    }

    /// The merchant default: 12 installments, interest-free up to 6x,
    /// highlighting 6x.
    pub fn benefits() -> Self {
        let rates = BTreeMap::from([
            (7, 0.0748),
            (8, 0.081),
            (9, 0.0872),
            (10, 0.0917),
            (11, 0.0979),
            (12, 0.1042),
        ]);

        RateSchedule {
            max_count: 12,
            interest_free_up_to: 6,
            rates,
            highlight: Some(6),
        }
    }

    /// Sets the count highlighted in the table and used for the summary.
    pub fn with_highlight(mut self, count: u32) -> Self {
        self.highlight = Some(count);
        self
    }

    /// Highlighted count, if any.
    pub fn highlight(&self) -> Option<u32> {
        self.highlight
    }

    /// Rate charged for `count` installments (0 when interest-free or unlisted).
    pub fn rate_for(&self, count: u32) -> f64 {
        if count <= self.interest_free_up_to {
            return 0.0;
        }

        self.rates.get(&count).copied().unwrap_or(0.0)
    }

    /// Expands the schedule into display-ordered options.
    pub fn options(&self) -> Vec<InstallmentOption> {
        (1..=self.max_count)
            .map(|count| match self.rate_for(count) {
                rate if rate > 0.0 => InstallmentOption::with_interest(count, rate),
                _ => InstallmentOption::interest_free(count),
            })
            .collect()
    }
}

/// Serialized shape of a schedule, before validation.
#[derive(Deserialize)]
struct ScheduleFields {
    max_count: u32,
    #[serde(default)]
    interest_free_up_to: u32,
    #[serde(default)]
    rates: BTreeMap<u32, f64>,
    #[serde(default)]
    highlight: Option<u32>,
}

impl TryFrom<ScheduleFields> for RateSchedule {
    type Error = CoreError;

    fn try_from(fields: ScheduleFields) -> CoreResult<Self> {
        let schedule = RateSchedule::new(fields.max_count, fields.interest_free_up_to, fields.rates)?;

        Ok(match fields.highlight {
            Some(count) => schedule.with_highlight(count),
            None => schedule,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::compute_totals;
    use crate::money::Money;

    #[test]
    fn test_benefits_schedule_shape() {
        let schedule = RateSchedule::benefits();
        let options = schedule.options();

        assert_eq!(options.len(), 12);
        assert_eq!(schedule.highlight(), Some(6));
        assert!(options.iter().take(6).all(|o| !o.has_interest()));
        assert!(options.iter().skip(6).all(|o| o.has_interest()));
        assert_eq!(options.last().map(|o| o.rate), Some(0.1042));
    }

    #[test]
    fn test_rate_for_threshold_and_missing_entries() {
        let schedule = RateSchedule::new(10, 3, BTreeMap::from([(2, 0.5), (5, 0.05)])).unwrap();

        // Below the threshold the table is ignored.
        assert_eq!(schedule.rate_for(2), 0.0);
        assert_eq!(schedule.rate_for(5), 0.05);
        // Above the threshold but unlisted.
        assert_eq!(schedule.rate_for(7), 0.0);
    }

    #[test]
    fn test_benefits_totals() {
        let options = RateSchedule::benefits().options();
        let price = Money::from_cents(10_000);

        let eight = options.iter().find(|o| o.count == 8).map(|o| compute_totals(price, o));
        assert_eq!(eight.map(|t| t.total.cents()), Some(10_810));
        assert_eq!(eight.map(|t| t.per_installment.cents()), Some(1351));
    }

    #[test]
    fn test_invalid_schedules() {
        assert!(RateSchedule::new(0, 0, BTreeMap::new()).is_err());
        assert!(RateSchedule::new(12, 6, BTreeMap::from([(7, -0.1)])).is_err());
        assert!(RateSchedule::new(12, 6, BTreeMap::from([(7, f64::NAN)])).is_err());
        assert!(RateSchedule::new(MAX_INSTALLMENT_COUNT + 1, 6, BTreeMap::new()).is_err());
    }

    #[test]
    fn test_deserialize_validates() {
        let schedule: RateSchedule = serde_json::from_str(
            r#"{"max_count": 10, "interest_free_up_to": 3, "rates": {"10": 0.0917}, "highlight": 3}"#,
        )
        .unwrap();
        assert_eq!(schedule.highlight(), Some(3));
        assert_eq!(schedule.rate_for(10), 0.0917);

        assert!(serde_json::from_str::<RateSchedule>(r#"{"max_count": 0}"#).is_err());
        assert!(serde_json::from_str::<RateSchedule>(r#"{"max_count": 100000}"#).is_err());
        assert!(
            serde_json::from_str::<RateSchedule>(r#"{"max_count": 12, "rates": {"7": -1.0}}"#)
                .is_err()
        );
    }

    #[test]
    fn test_with_highlight() {
        let schedule = RateSchedule::new(3, 3, BTreeMap::new()).unwrap().with_highlight(2);
        assert_eq!(schedule.highlight(), Some(2));
        assert_eq!(schedule.options().len(), 3);
    }
}
