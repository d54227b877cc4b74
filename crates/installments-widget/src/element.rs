//! # Element Snapshot
//!
//! The page hands each widget over as a read-only snapshot of its root
//! element: the `data-*` attributes plus the text of an embedded
//! `<script data-installments-config>` block, if there is one.
//!
//! Widget state lives in the registry keyed by [`WidgetId`], never on the
//! element itself.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Embedded or attribute JSON option list.
pub const ATTR_CONFIG: &str = "data-installments-config";
/// Merchant money format, e.g. `R$ {{amount_with_comma_separator}}`.
pub const ATTR_MONEY_FORMAT: &str = "data-money-format";
/// Installment count to highlight and summarize.
pub const ATTR_HIGHLIGHT: &str = "data-highlight-installment";
/// Price in cents rendered before any variant change.
pub const ATTR_INITIAL_PRICE: &str = "data-initial-price";
/// Section the widget belongs to; variant changes are filtered on it.
pub const ATTR_SECTION: &str = "data-section";
pub const ATTR_SUMMARY_TEMPLATE: &str = "data-summary-template";
pub const ATTR_SUMMARY_TEMPLATE_INTEREST: &str = "data-summary-template-interest";
pub const ATTR_POINTS_TEMPLATE: &str = "data-installments-points-template";
pub const ATTR_INTEREST_LABEL: &str = "data-interest-label";
pub const ATTR_NO_INTEREST_LABEL: &str = "data-no-interest-label";
pub const ATTR_HEADING_INSTALLMENTS: &str = "data-table-heading-installments";
pub const ATTR_HEADING_VALUE: &str = "data-table-heading-value";
pub const ATTR_CURRENCY_SYMBOL: &str = "data-currency-symbol";
/// `comma` or `point`; applies to money amounts and rate percentages.
pub const ATTR_DECIMAL_SEPARATOR: &str = "data-decimal-separator";
/// Whether the table starts expanded (`true` unless set to `false`).
pub const ATTR_TABLE_EXPANDED: &str = "data-installments-expanded";
/// Named rate schedule used when no option list is configured (`benefits`).
pub const ATTR_SCHEDULE: &str = "data-installments-schedule";

// =============================================================================
// Widget Id
// =============================================================================

/// Stable identifier of one widget element.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WidgetId(String);

impl WidgetId {
    pub fn new(id: impl Into<String>) -> Self {
        WidgetId(id.into())
    }

    /// A fresh id for elements that carry none of their own.
    pub fn generate() -> Self {
        WidgetId(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WidgetId {
    fn from(id: &str) -> Self {
        WidgetId::new(id)
    }
}

// =============================================================================
// Widget Element
// =============================================================================

/// Read-only view of a widget's root element.
///
/// An element deserialized without an `id` gets a generated one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetElement {
    #[serde(default = "WidgetId::generate")]
    pub id: WidgetId,

    #[serde(default)]
    pub attributes: BTreeMap<String, String>,

    /// Text content of the embedded config script, if present.
    #[serde(default)]
    pub config_script: Option<String>,
}

impl WidgetElement {
    pub fn new(id: impl Into<WidgetId>) -> Self {
        WidgetElement {
            id: id.into(),
            attributes: BTreeMap::new(),
            config_script: None,
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_config_script(mut self, text: impl Into<String>) -> Self {
        self.config_script = Some(text.into());
        self
    }

    /// Attribute value, trimmed. Empty values read as absent.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .get(name)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }

    /// Embedded script text, trimmed. Empty scripts read as absent.
    pub fn script_text(&self) -> Option<&str> {
        self.config_script
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_reads_trimmed_values() {
        let element = WidgetElement::new("w1")
            .with_attribute(ATTR_SECTION, "  main-product  ")
            .with_attribute(ATTR_HIGHLIGHT, "   ");

        assert_eq!(element.attribute(ATTR_SECTION), Some("main-product"));
        assert_eq!(element.attribute(ATTR_HIGHLIGHT), None);
        assert_eq!(element.attribute(ATTR_MONEY_FORMAT), None);
    }

    #[test]
    fn test_script_text() {
        assert_eq!(WidgetElement::new("w1").script_text(), None);
        assert_eq!(WidgetElement::new("w1").with_config_script("\n  ").script_text(), None);
        assert_eq!(
            WidgetElement::new("w1").with_config_script(" [] ").script_text(),
            Some("[]")
        );
    }

    #[test]
    fn test_generated_ids_are_unique() {
        assert_ne!(WidgetId::generate(), WidgetId::generate());
    }

    #[test]
    fn test_missing_id_is_generated() {
        let first: WidgetElement =
            serde_json::from_str(r#"{"attributes":{"data-section":"main"}}"#).unwrap();
        let second: WidgetElement = serde_json::from_str(r#"{}"#).unwrap();

        assert!(!first.id.as_str().is_empty());
        assert_ne!(first.id, second.id);
        assert_eq!(first.attribute(ATTR_SECTION), Some("main"));

        let named: WidgetElement = serde_json::from_str(r#"{"id":"w1"}"#).unwrap();
        assert_eq!(named.id, WidgetId::new("w1"));
    }
}
