//! # Money & Rate Formatting
//!
//! Shopper-facing amounts are normally rendered by the storefront's own
//! currency formatter. That formatter is an injected capability
//! ([`MoneyFormatter`]); when it is absent, [`MoneyFormat`] degrades through a
//! local fallback chain instead of failing.
//!
//! ## Fallback Chain
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  MoneyFormat::format(amount)                                            │
//! │       │                                                                 │
//! │       ├── formatter injected?          → formatter.format(amount, tpl) │
//! │       │                                                                 │
//! │       ├── template has a placeholder?  → substitute_template(...)      │
//! │       │     "R$ {{amount_with_comma_separator}}" → "R$ 100,00"         │
//! │       │                                                                 │
//! │       └── otherwise                    → "<symbol> <amount>"           │
//! │             "R$ 100,00"                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::money::Money;

/// `{{amount}}` → `1134.65`
pub const AMOUNT: &str = "{{amount}}";
/// `{{amount_no_decimals}}` → `1135`
pub const AMOUNT_NO_DECIMALS: &str = "{{amount_no_decimals}}";
/// `{{amount_with_comma_separator}}` → `1134,65`
pub const AMOUNT_WITH_COMMA: &str = "{{amount_with_comma_separator}}";
/// `{{amount_no_decimals_with_comma_separator}}` → `1135`
pub const AMOUNT_NO_DECIMALS_WITH_COMMA: &str = "{{amount_no_decimals_with_comma_separator}}";

/// Symbol used by the minimal fallback rendering.
pub const DEFAULT_CURRENCY_SYMBOL: &str = "R$";

// =============================================================================
// Formatter Capability
// =============================================================================

/// The storefront's currency formatter.
///
/// Implementations receive the amount in cents and the merchant's money
/// format template (possibly empty).
pub trait MoneyFormatter {
    fn format(&self, amount: Money, template: &str) -> String;
}

// =============================================================================
// Decimal Separator
// =============================================================================

/// Decimal separator of the target locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecimalSeparator {
    /// `1234,56` (pt-BR).
    #[default]
    Comma,
    /// `1234.56`.
    Point,
}

impl DecimalSeparator {
    pub fn as_char(&self) -> char {
        match self {
            DecimalSeparator::Comma => ',',
            DecimalSeparator::Point => '.',
        }
    }
}

impl std::str::FromStr for DecimalSeparator {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "comma" | "," => Ok(DecimalSeparator::Comma),
            "point" | "dot" | "." => Ok(DecimalSeparator::Point),
            other => Err(ValidationError::InvalidFormat {
                field: "decimal_separator".to_string(),
                reason: format!("unknown separator '{other}', expected comma or point"),
            }),
        }
    }
}

// =============================================================================
// Money Format (fallback chain)
// =============================================================================

/// Formats amounts for one widget.
#[derive(Clone)]
pub struct MoneyFormat {
    formatter: Option<Rc<dyn MoneyFormatter>>,
    template: Option<String>,
    symbol: String,
    separator: DecimalSeparator,
}

impl fmt::Debug for MoneyFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MoneyFormat")
            .field("formatter", &self.formatter.is_some())
            .field("template", &self.template)
            .field("symbol", &self.symbol)
            .field("separator", &self.separator)
            .finish()
    }
}

impl Default for MoneyFormat {
    fn default() -> Self {
        MoneyFormat {
            formatter: None,
            template: None,
            symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            separator: DecimalSeparator::default(),
        }
    }
}

impl MoneyFormat {
    /// Creates a format with the given template and no external formatter.
    pub fn new(template: Option<String>) -> Self {
        MoneyFormat {
            template: template.filter(|t| !t.trim().is_empty()),
            ..Default::default()
        }
    }

    /// Injects the storefront formatter.
    pub fn with_formatter(mut self, formatter: Option<Rc<dyn MoneyFormatter>>) -> Self {
        self.formatter = formatter;
        self
    }

    /// Overrides the symbol used by the minimal fallback.
    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = symbol.into();
        self
    }

    /// Overrides the decimal separator used by the minimal fallback.
    pub fn with_separator(mut self, separator: DecimalSeparator) -> Self {
        self.separator = separator;
        self
    }

    /// Formats an amount through the fallback chain.
    pub fn format(&self, amount: Money) -> String {
        if let Some(formatter) = &self.formatter {
            return formatter.format(amount, self.template.as_deref().unwrap_or(""));
        }

        self.template
            .as_deref()
            .and_then(|template| substitute_template(amount, template))
            .unwrap_or_else(|| {
                format!(
                    "{} {}",
                    self.symbol,
                    amount.to_decimal_string(self.separator.as_char())
                )
            })
    }
}

/// Substitutes every known amount placeholder in `template`.
///
/// Returns `None` when the template contains no placeholder at all, so the
/// caller can fall back to the minimal rendering.
///
/// ## Example
/// ```rust
/// use installments_core::format::substitute_template;
/// use installments_core::Money;
///
/// let text = substitute_template(Money::from_cents(10_000), "R$ {{amount_with_comma_separator}}");
/// assert_eq!(text.as_deref(), Some("R$ 100,00"));
/// assert!(substitute_template(Money::from_cents(10_000), "R$").is_none());
/// ```
pub fn substitute_template(amount: Money, template: &str) -> Option<String> {
    let placeholders = [
        (AMOUNT_NO_DECIMALS_WITH_COMMA, amount.to_whole_string()),
        (AMOUNT_WITH_COMMA, amount.to_decimal_string(',')),
        (AMOUNT_NO_DECIMALS, amount.to_whole_string()),
        (AMOUNT, amount.to_decimal_string('.')),
    ];

    if !placeholders.iter().any(|(token, _)| template.contains(token)) {
        return None;
    }

    let text = placeholders
        .iter()
        .fold(template.to_string(), |text, (token, value)| {
            text.replace(token, value)
        });

    Some(text)
}

/// Formats a rate fraction as a percentage with exactly two decimals.
///
/// Returns `None` when the rate is non-finite or not positive, so callers
/// omit the percentage entirely.
///
/// ## Example
/// ```rust
/// use installments_core::format::format_rate_percent;
/// use installments_core::DecimalSeparator;
///
/// assert_eq!(format_rate_percent(0.1042, DecimalSeparator::Comma).as_deref(), Some("10,42%"));
/// assert_eq!(format_rate_percent(0.0, DecimalSeparator::Comma), None);
/// ```
pub fn format_rate_percent(rate: f64, separator: DecimalSeparator) -> Option<String> {
    if !rate.is_finite() || rate <= 0.0 {
        return None;
    }

    let digits = format!("{:.2}", rate * 100.0);
    let digits = match separator {
        DecimalSeparator::Comma => digits.replace('.', ","),
        DecimalSeparator::Point => digits,
    };

    Some(format!("{digits}%"))
}

// =============================================================================
// Unit Tests
// =============================================================================
