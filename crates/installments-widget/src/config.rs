//! # Widget Configuration
//!
//! Reads everything a widget needs from its element snapshot.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Option List Priority                                 │
//! │                                                                         │
//! │  1. <script data-installments-config> text (highest priority)          │
//! │     [{"count": 6, "interest": false, "rate": 0}]                        │
//! │     unparseable → warn, fall through                                    │
//! │                                                                         │
//! │  2. data-installments-config attribute                                 │
//! │     tried raw, then with &quot; / &#34; / &#x22; decoded                │
//! │     unparseable → warn, EMPTY list (widget stays inert)                 │
//! │                                                                         │
//! │  3. data-installments-schedule="benefits"                              │
//! │     built-in 1x..12x rate schedule                                      │
//! │                                                                         │
//! │  4. Nothing → EMPTY list                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example Settings (TOML)
//! ```toml
//! section_id = "template--main-product"
//! initial_price = 10000
//! highlight = 6
//! money_format = "R$ {{amount_with_comma_separator}}"
//!
//! [templates]
//! decimal_separator = "comma"
//! summary_template = "ou %count%x de %value%"
//! summary_interest_template = "ou %count%x de %value%*"
//! ```

use std::rc::Rc;
use std::str::FromStr;

use installments_core::format::DEFAULT_CURRENCY_SYMBOL;
use installments_core::validation::{sanitize_option, validate_price_cents};
use installments_core::{
    DecimalSeparator, InstallmentOption, MoneyFormat, MoneyFormatter, Projector, RateSchedule,
    ViewTemplates,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::element::*;
use crate::error::{WidgetError, WidgetResult};

/// Name of the built-in rate schedule.
pub const BENEFITS_SCHEDULE: &str = "benefits";

// =============================================================================
// Option List Loading
// =============================================================================

/// Loads the option list for an element, recovering from every failure.
///
/// Returns an empty list when nothing usable is configured; the caller
/// treats that as "stay inert".
pub fn load_options(element: &WidgetElement) -> Vec<InstallmentOption> {
    if let Some(script) = element.script_text() {
        match parse_options(script) {
            Ok(options) => return options,
            Err(e) => warn!(
                widget_id = %element.id,
                error = %e,
                "Unable to parse installments configuration from script"
            ),
        }
    }

    if let Some(raw) = element.attribute(ATTR_CONFIG) {
        let parsed = parse_options(raw).or_else(|first| {
            debug!(widget_id = %element.id, error = %first, "Retrying config with decoded entities");
            parse_options(&decode_entities(raw))
        });

        return match parsed {
            Ok(options) => options,
            Err(e) => {
                warn!(
                    widget_id = %element.id,
                    error = %e,
                    "Unable to parse installments configuration"
                );
                Vec::new()
            }
        };
    }

    match element.attribute(ATTR_SCHEDULE) {
        Some(BENEFITS_SCHEDULE) => RateSchedule::benefits().options(),
        Some(other) => {
            warn!(widget_id = %element.id, schedule = %other, "Unknown installments schedule");
            Vec::new()
        }
        None => Vec::new(),
    }
}

/// Parses a JSON option list (or a single option object).
///
/// Fields are read leniently and sanitized; sanitizing issues are logged,
/// never returned.
///
/// # Errors
/// - [`WidgetError::ConfigParse`] if the text is not JSON
/// - [`WidgetError::ConfigShape`] if the JSON is a bare string or number
pub fn parse_options(text: &str) -> WidgetResult<Vec<InstallmentOption>> {
    let value: Value = serde_json::from_str(text.trim())?;

    let items = match value {
        Value::Array(items) => items,
        Value::Object(_) => vec![value],
        Value::Null => Vec::new(),
        other => return Err(WidgetError::ConfigShape(other.to_string())),
    };

    let options = items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| {
            let option = option_from_value(item);
            if option.is_none() {
                warn!(index, item = %item, "Skipping installment option that is not an object");
            }
            option
        })
        .collect();

    Ok(options)
}

fn option_from_value(item: &Value) -> Option<InstallmentOption> {
    let fields = item.as_object()?;

    let count = fields.get("count").and_then(lenient_integer).unwrap_or(0);
    let interest = fields.get("interest").map(lenient_bool).unwrap_or(false);
    let rate = fields.get("rate").and_then(lenient_rate);

    let sanitized = sanitize_option(count, interest, rate);
    if !sanitized.is_clean() {
        for issue in &sanitized.issues {
            warn!(count, issue = %issue, "Installment option corrected with safe default");
        }
    }

    Some(sanitized.option)
}

fn lenient_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().map(|f| f as i64))
        }
        _ => None,
    }
}

fn lenient_bool(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => matches!(s.trim().to_lowercase().as_str(), "true" | "1" | "yes"),
        _ => false,
    }
}

/// `None` for an absent/null rate; NaN for a present but non-numeric one,
/// so the sanitizer reports it.
fn lenient_rate(value: &Value) -> Option<f64> {
    match value {
        Value::Null => None,
        Value::Number(n) => n.as_f64(),
        Value::String(s) => Some(s.trim().parse::<f64>().unwrap_or(f64::NAN)),
        _ => Some(f64::NAN),
    }
}

/// Decodes the HTML entities themes leave in attribute JSON.
///
/// ## Example
/// ```rust
/// use installments_widget::config::decode_entities;
///
/// assert_eq!(decode_entities("[{&quot;count&quot;:6}]"), r#"[{"count":6}]"#);
/// ```
pub fn decode_entities(raw: &str) -> String {
    raw.replace("&quot;", "\"")
        .replace("&#34;", "\"")
        .replace("&#x22;", "\"")
        .replace("&#X22;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
        .trim()
        .to_string()
}

// =============================================================================
// Widget Settings
// =============================================================================

/// Per-widget settings other than the option list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetSettings {
    /// Section whose variant changes this widget follows.
    #[serde(default)]
    pub section_id: Option<String>,

    /// Price in cents for the first render.
    #[serde(default)]
    pub initial_price: i64,

    /// Count to highlight and summarize.
    #[serde(default)]
    pub highlight: Option<u32>,

    /// Merchant money format template.
    #[serde(default)]
    pub money_format: Option<String>,

    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    /// Whether the table starts expanded.
    #[serde(default = "default_table_expanded")]
    pub table_expanded: bool,

    #[serde(default)]
    pub templates: ViewTemplates,
}

fn default_currency_symbol() -> String {
    DEFAULT_CURRENCY_SYMBOL.to_string()
}

fn default_table_expanded() -> bool {
    true
}

impl Default for WidgetSettings {
    fn default() -> Self {
        WidgetSettings {
            section_id: None,
            initial_price: 0,
            highlight: None,
            money_format: None,
            currency_symbol: default_currency_symbol(),
            table_expanded: default_table_expanded(),
            templates: ViewTemplates::default(),
        }
    }
}

impl WidgetSettings {
    /// Reads settings from element attributes.
    ///
    /// Unusable numeric attributes are logged and replaced by their default.
    pub fn from_element(element: &WidgetElement) -> Self {
        let mut settings = WidgetSettings {
            section_id: element.attribute(ATTR_SECTION).map(str::to_string),
            money_format: element.attribute(ATTR_MONEY_FORMAT).map(decode_entities),
            ..Default::default()
        };

        settings.initial_price = read_or_default(element, ATTR_INITIAL_PRICE, parse_price, 0);

        settings.highlight = read_or_default(
            element,
            ATTR_HIGHLIGHT,
            |raw| parse_value::<u32>(raw).map(Some),
            None,
        )
        .or_else(|| schedule_highlight(element));

        settings.table_expanded = read_or_default(
            element,
            ATTR_TABLE_EXPANDED,
            parse_value::<bool>,
            default_table_expanded(),
        );

        if let Some(symbol) = element.attribute(ATTR_CURRENCY_SYMBOL) {
            settings.currency_symbol = symbol.to_string();
        }

        let templates = &mut settings.templates;
        templates.decimal_separator = read_or_default(
            element,
            ATTR_DECIMAL_SEPARATOR,
            parse_value::<DecimalSeparator>,
            DecimalSeparator::default(),
        );

        let text = |name: &str| element.attribute(name).map(str::to_string);

        if let Some(label) = text(ATTR_INTEREST_LABEL) {
            templates.interest_label = label;
        }
        if let Some(label) = text(ATTR_NO_INTEREST_LABEL) {
            templates.no_interest_label = label;
        }
        if let Some(template) = text(ATTR_SUMMARY_TEMPLATE) {
            templates.summary_template = template;
        }
        templates.summary_interest_template = text(ATTR_SUMMARY_TEMPLATE_INTEREST);
        if let Some(template) = text(ATTR_POINTS_TEMPLATE) {
            templates.points_template = template;
        }
        templates.heading_installments = text(ATTR_HEADING_INSTALLMENTS).unwrap_or_default();
        templates.heading_value = text(ATTR_HEADING_VALUE).unwrap_or_default();

        settings
    }

    /// Money format chain for this widget.
    pub fn money_format(&self, formatter: Option<Rc<dyn MoneyFormatter>>) -> MoneyFormat {
        MoneyFormat::new(self.money_format.clone())
            .with_symbol(self.currency_symbol.clone())
            .with_separator(self.templates.decimal_separator)
            .with_formatter(formatter)
    }

    /// Projector for this widget.
    pub fn projector(&self, formatter: Option<Rc<dyn MoneyFormatter>>) -> Projector {
        Projector::new(
            self.templates.clone(),
            self.money_format(formatter),
            self.highlight,
        )
    }
}

fn schedule_highlight(element: &WidgetElement) -> Option<u32> {
    match element.attribute(ATTR_SCHEDULE) {
        Some(BENEFITS_SCHEDULE) => RateSchedule::benefits().highlight(),
        _ => None,
    }
}

fn read_or_default<T>(
    element: &WidgetElement,
    name: &str,
    parse: impl Fn(&str) -> Option<T>,
    default: T,
) -> T {
    let Some(raw) = element.attribute(name) else {
        return default;
    };

    match parse(raw) {
        Some(value) => value,
        None => {
            let err = WidgetError::InvalidAttribute {
                name: name.to_string(),
                value: raw.to_string(),
            };
            warn!(widget_id = %element.id, error = %err, "Using default");
            default
        }
    }
}

fn parse_value<T: FromStr>(raw: &str) -> Option<T> {
    raw.parse().ok()
}

/// Integer cents; a fractional value is rounded, a negative one rejected.
fn parse_price(raw: &str) -> Option<i64> {
    let cents = raw
        .parse::<i64>()
        .ok()
        .or_else(|| {
            raw.parse::<f64>()
                .ok()
                .filter(|f| f.is_finite())
                .map(|f| f.round() as i64)
        })?;

    validate_price_cents(cents).ok().map(|price| price.cents())
}

// =============================================================================
// Unit Tests
// =============================================================================
