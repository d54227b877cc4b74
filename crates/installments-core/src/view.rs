//! # Render Projection
//!
//! Turns a price and an option list into the plain data the storefront view
//! layer paints. Nothing here touches the DOM; every string is final text.
//!
//! ## Projection Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  InstallmentsView                                                       │
//! │  ├── rows[]        one per option, configured order                     │
//! │  │     "6x"  "Sem juros"            "R$ 16,67"                          │
//! │  │     "12x" "Com juros (10,42%)"   "R$ 9,20" *                         │
//! │  ├── summary       highlighted option (or last), templated line         │
//! │  ├── points        floor(price / 100), templated line                   │
//! │  ├── disclaimer    visible when any option charges interest             │
//! │  └── headings, table_expanded                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::calculator::{any_interest, compute_all, compute_totals, select_summary_option};
use crate::format::{format_rate_percent, DecimalSeparator, MoneyFormat};
use crate::money::Money;
use crate::types::{InstallmentOption, InstallmentTotals};
use crate::{COUNT_TOKEN, POINTS_TOKEN, VALUE_TOKEN};

// =============================================================================
// Templates
// =============================================================================

/// Text fragments a merchant can override per widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewTemplates {
    #[serde(default = "default_interest_label")]
    pub interest_label: String,

    #[serde(default = "default_no_interest_label")]
    pub no_interest_label: String,

    /// Summary line; `%count%` and `%value%` are substituted.
    #[serde(default = "default_summary_template")]
    pub summary_template: String,

    /// Summary line used instead when the summary option charges interest.
    #[serde(default)]
    pub summary_interest_template: Option<String>,

    /// Points line; `%points%` is substituted.
    #[serde(default = "default_points_template")]
    pub points_template: String,

    #[serde(default)]
    pub heading_installments: String,

    #[serde(default)]
    pub heading_value: String,

    /// Separator for rate percentages.
    #[serde(default)]
    pub decimal_separator: DecimalSeparator,
}

fn default_interest_label() -> String {
    "Com juros".to_string()
}

fn default_no_interest_label() -> String {
    "Sem juros".to_string()
}

fn default_summary_template() -> String {
    "%count%x de %value%".to_string()
}

fn default_points_template() -> String {
    "Pontos: ganhe %points% pontos".to_string()
}

impl Default for ViewTemplates {
    fn default() -> Self {
        ViewTemplates {
            interest_label: default_interest_label(),
            no_interest_label: default_no_interest_label(),
            summary_template: default_summary_template(),
            summary_interest_template: None,
            points_template: default_points_template(),
            heading_installments: String::new(),
            heading_value: String::new(),
            decimal_separator: DecimalSeparator::default(),
        }
    }
}

impl ViewTemplates {
    /// Interest column text for one row.
    pub fn interest_text(&self, totals: &InstallmentTotals) -> String {
        if !totals.has_interest {
            return self.no_interest_label.clone();
        }

        match format_rate_percent(totals.rate, self.decimal_separator) {
            Some(rate) => format!("{} ({rate})", self.interest_label).trim().to_string(),
            None => self.interest_label.clone(),
        }
    }

    /// Summary template for the selected option.
    pub fn summary_template_for(&self, has_interest: bool) -> &str {
        match &self.summary_interest_template {
            Some(template) if has_interest && !template.is_empty() => template,
            _ => &self.summary_template,
        }
    }

    /// Points line; a template without `%points%` is shown verbatim.
    pub fn points_text(&self, points: i64) -> String {
        self.points_template.replace(POINTS_TOKEN, &points.to_string())
    }
}

// =============================================================================
// Projection Records
// =============================================================================

/// One table row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct InstallmentRow {
    pub count: u32,
    /// `"<count>x"`
    pub label: String,
    pub interest_text: String,
    pub formatted_per_installment: String,
    pub formatted_total: String,
    pub is_highlighted: bool,
    /// Interest footnote marker next to the value.
    pub show_footnote: bool,
}

/// The one-line summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct InstallmentSummary {
    pub count: u32,
    pub formatted_per_installment: String,
    pub has_interest: bool,
    pub text: String,
}

/// Everything the view layer needs to paint one widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct InstallmentsView {
    pub price: Money,
    pub rows: Vec<InstallmentRow>,
    /// `None` only when there are no options.
    pub summary: Option<InstallmentSummary>,
    pub points: i64,
    pub points_text: String,
    pub disclaimer_visible: bool,
    pub heading_installments: String,
    pub heading_value: String,
    pub table_expanded: bool,
}

// =============================================================================
// Projector
// =============================================================================

/// Builds [`InstallmentsView`]s for one widget's templates and money format.
#[derive(Debug, Clone, Default)]
pub struct Projector {
    templates: ViewTemplates,
    money: MoneyFormat,
    highlight: Option<u32>,
}

impl Projector {
    pub fn new(templates: ViewTemplates, money: MoneyFormat, highlight: Option<u32>) -> Self {
        Projector {
            templates,
            money,
            highlight,
        }
    }

    /// Recomputes every option for `price` and renders the result.
    pub fn project(
        &self,
        price: Money,
        options: &[InstallmentOption],
        table_expanded: bool,
    ) -> InstallmentsView {
        let totals = compute_all(price, options);

        let rows = totals.iter().map(|totals| self.row(totals)).collect();

        let summary = select_summary_option(options, self.highlight)
            .map(|option| self.summary(&compute_totals(price, option)));

        let points = price.points();

        InstallmentsView {
            price,
            rows,
            summary,
            points,
            points_text: self.templates.points_text(points),
            disclaimer_visible: any_interest(&totals),
            heading_installments: self.templates.heading_installments.clone(),
            heading_value: self.templates.heading_value.clone(),
            table_expanded,
        }
    }

    fn row(&self, totals: &InstallmentTotals) -> InstallmentRow {
        InstallmentRow {
            count: totals.count,
            label: totals.label(),
            interest_text: self.templates.interest_text(totals),
            formatted_per_installment: self.money.format(totals.per_installment),
            formatted_total: self.money.format(totals.total),
            is_highlighted: self.highlight == Some(totals.count),
            show_footnote: totals.has_interest,
        }
    }

    fn summary(&self, totals: &InstallmentTotals) -> InstallmentSummary {
        let formatted = self.money.format(totals.per_installment);
        let text = self
            .templates
            .summary_template_for(totals.has_interest)
            .replace(COUNT_TOKEN, &totals.count.to_string())
            .replace(VALUE_TOKEN, &formatted);

        InstallmentSummary {
            count: totals.count,
            formatted_per_installment: formatted,
            has_interest: totals.has_interest,
            text,
        }
    }
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

    fn projector(highlight: Option<u32>) -> Projector {
        let templates = ViewTemplates {
            summary_interest_template: Some("ou %count%x de %value%*".to_string()),
            ..Default::default()
        };
        let money = MoneyFormat::new(Some("R$ {{amount_with_comma_separator}}".to_string()));
        Projector::new(templates, money, highlight)
    }

    #[test]
    fn test_rows_follow_configured_order() {
        let view = projector(Some(6)).project(Money::from_cents(10_000), &options(), true);

        let labels: Vec<&str> = view.rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["1x", "6x", "12x"]);
        assert!(view.table_expanded);
    }

    #[test]
    fn test_row_texts() {
        let view = projector(Some(6)).project(Money::from_cents(10_000), &options(), true);

        let six = &view.rows[1];
        assert_eq!(six.interest_text, "Sem juros");
        assert_eq!(six.formatted_per_installment, "R$ 16,67");
        assert_eq!(six.formatted_total, "R$ 100,00");
        assert!(six.is_highlighted);
        assert!(!six.show_footnote);

        let twelve = &view.rows[2];
        assert_eq!(twelve.interest_text, "Com juros (10,42%)");
        assert_eq!(twelve.formatted_per_installment, "R$ 9,20");
        assert_eq!(twelve.formatted_total, "R$ 110,42");
        assert!(!twelve.is_highlighted);
        assert!(twelve.show_footnote);
    }

    #[test]
    fn test_summary_uses_highlight() {
        let view = projector(Some(6)).project(Money::from_cents(10_000), &options(), true);
        let summary = view.summary.unwrap();

        assert_eq!(summary.count, 6);
        assert!(!summary.has_interest);
        assert_eq!(summary.text, "6x de R$ 16,67");
    }

    #[test]
    fn test_summary_interest_template_for_fallback_option() {
        let view = projector(Some(5)).project(Money::from_cents(10_000), &options(), true);
        let summary = view.summary.unwrap();

        assert_eq!(summary.count, 12);
        assert!(summary.has_interest);
        assert_eq!(summary.text, "ou 12x de R$ 9,20*");
    }

    #[test]
    fn test_interest_flag_with_zero_rate_renders_as_interest_free() {
        let options = vec![InstallmentOption::with_interest(10, 0.0)];
        let view = projector(None).project(Money::from_cents(10_000), &options, true);

        assert_eq!(view.rows[0].interest_text, "Sem juros");
        assert!(!view.rows[0].show_footnote);
        assert!(!view.disclaimer_visible);
        assert_eq!(view.summary.map(|s| s.has_interest), Some(false));
    }

    #[test]
    fn test_points() {
        let view = projector(None).project(Money::from_cents(12_999), &options(), true);
        assert_eq!(view.points, 129);
        assert_eq!(view.points_text, "Pontos: ganhe 129 pontos");
    }

    #[test]
    fn test_points_template_without_token_is_verbatim() {
        let templates = ViewTemplates {
            points_template: "Ganhe pontos".to_string(),
            ..Default::default()
        };
        assert_eq!(templates.points_text(10), "Ganhe pontos");
    }

    #[test]
    fn test_disclaimer_visibility() {
        let view = projector(None).project(Money::from_cents(10_000), &options(), true);
        assert!(view.disclaimer_visible);

        let free = vec![InstallmentOption::interest_free(3)];
        let view = projector(None).project(Money::from_cents(10_000), &free, true);
        assert!(!view.disclaimer_visible);
    }

    #[test]
    fn test_empty_options_render_nothing() {
        let view = projector(Some(6)).project(Money::from_cents(10_000), &[], false);
        assert!(view.rows.is_empty());
        assert!(view.summary.is_none());
        assert!(!view.disclaimer_visible);
    }

    #[test]
    fn test_empty_interest_label_keeps_rate() {
        let templates = ViewTemplates {
            interest_label: String::new(),
            ..Default::default()
        };
        let totals = compute_totals(
            Money::from_cents(10_000),
            &InstallmentOption::with_interest(8, 0.081),
        );
        assert_eq!(templates.interest_text(&totals), "(8,10%)");
    }

    #[test]
    fn test_view_serializes_camel_case() {
        let view = projector(Some(6)).project(Money::from_cents(10_000), &options(), true);
        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["price"], 10_000);
        assert_eq!(json["disclaimerVisible"], true);
        assert_eq!(json["rows"][0]["formattedPerInstallment"], "R$ 100,00");
    }
}
