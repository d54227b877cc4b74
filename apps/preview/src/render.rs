//! Plain-text rendering of installment views.

use std::fmt::{self, Write};

use installments_core::InstallmentsView;
use installments_widget::{ViewSink, WidgetId};
use tracing::warn;

/// Renders a view as the table a shopper would see.
pub fn render_text(id: &WidgetId, view: &InstallmentsView) -> Result<String, fmt::Error> {
    let mut out = String::new();

    writeln!(out, "── {id} ── price {} ──", view.price)?;

    if let Some(summary) = &view.summary {
        let marker = if summary.has_interest { "*" } else { "" };
        writeln!(out, "  {}{marker}", summary.text)?;
    }

    if view.table_expanded {
        if !view.heading_installments.is_empty() || !view.heading_value.is_empty() {
            writeln!(
                out,
                "  {:<6} {:<24} {}",
                view.heading_installments, "", view.heading_value
            )?;
        }

        for row in &view.rows {
            let highlight = if row.is_highlighted { ">" } else { " " };
            let footnote = if row.show_footnote { "*" } else { "" };
            writeln!(
                out,
                " {highlight}{:<6} {:<24} {}{footnote}  (total {})",
                row.label, row.interest_text, row.formatted_per_installment, row.formatted_total
            )?;
        }
    } else {
        writeln!(out, "  [{} options hidden]", view.rows.len())?;
    }

    writeln!(out, "  {}", view.points_text)?;

    if view.disclaimer_visible {
        writeln!(out, "  * Parcelamento com juros.")?;
    }

    Ok(out)
}

/// Prints every render to stdout.
pub struct StdoutSink;

impl ViewSink for StdoutSink {
    fn paint(&self, id: &WidgetId, view: &InstallmentsView) {
        match render_text(id, view) {
            Ok(text) => println!("{text}"),
            Err(e) => warn!(widget_id = %id, error = %e, "Failed to render view"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use installments_core::{InstallmentOption, Money, MoneyFormat, Projector, ViewTemplates};

    fn view(expanded: bool) -> InstallmentsView {
        let options = [
            InstallmentOption::interest_free(6),
            InstallmentOption::with_interest(12, 0.1042),
        ];
        let projector = Projector::new(ViewTemplates::default(), MoneyFormat::default(), Some(6));
        projector.project(Money::from_cents(10_000), &options, expanded)
    }

    #[test]
    fn test_expanded_table() {
        let text = render_text(&WidgetId::new("w1"), &view(true)).unwrap();

        assert!(text.contains("6x de R$ 16,67"));
        assert!(text.contains(">6x"));
        assert!(text.contains("Com juros (10,42%)"));
        assert!(text.contains("R$ 9,20*"));
        assert!(text.contains("Pontos: ganhe 100 pontos"));
        assert!(text.contains("Parcelamento com juros"));
    }

    #[test]
    fn test_collapsed_table() {
        let text = render_text(&WidgetId::new("w1"), &view(false)).unwrap();

        assert!(text.contains("[2 options hidden]"));
        assert!(!text.contains("Com juros"));
    }
}
