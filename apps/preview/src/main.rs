//! # Installments Preview
//!
//! Replays a storefront fixture against the widget registry.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Load fixture (argument, INSTALLMENTS_PREVIEW_CONFIG, or demo)       │
//! │  2. Initialize every widget                → initial renders            │
//! │  3. Replay events in order                                              │
//! │       variant → LocalBus::publish          → matching widgets repaint   │
//! │       toggle  → WidgetRegistry::toggle_table                            │
//! │       unload  → WidgetRegistry::teardown_all                            │
//! │  4. Tear down whatever is left                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod render;

use std::path::PathBuf;
use std::rc::Rc;

use installments_widget::{InitOutcome, LocalBus, VariantChange, WidgetId, WidgetRegistry};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::config::{PreviewConfig, PreviewEvent};
use crate::render::StdoutSink;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting installments preview...");

    let config = PreviewConfig::load(std::env::args().nth(1).map(PathBuf::from))?;
    info!(
        widgets = config.widgets.len(),
        events = config.events.len(),
        "Fixture loaded"
    );

    let bus = Rc::new(LocalBus::new());
    let mut registry = WidgetRegistry::new(bus.clone(), Rc::new(StdoutSink), None);

    let outcomes = registry.initialize_all(&config.widgets);
    let inert = outcomes
        .iter()
        .filter(|outcome| **outcome == InitOutcome::Inert)
        .count();
    if inert > 0 {
        warn!(inert, "Some widgets have no usable installment options");
    }
    info!(registered = registry.len(), "Widgets initialized");

    for event in &config.events {
        match event {
            PreviewEvent::Variant { section_id, price } => {
                info!(section_id = %section_id, price = ?price, "Publishing variant change");
                bus.publish(&VariantChange::new(section_id.clone(), *price));
            }
            PreviewEvent::Toggle { widget, expanded } => {
                if registry
                    .toggle_table(&WidgetId::new(widget.clone()), *expanded)
                    .is_none()
                {
                    warn!(widget = %widget, "Toggle for unknown widget");
                }
            }
            PreviewEvent::Unload { section_id } => {
                let removed = registry.teardown_all(section_id.as_deref());
                info!(section_id = ?section_id, removed, "Section unloaded");
            }
        }
    }

    let remaining = registry.teardown_all(None);
    info!(remaining, "Preview finished");

    Ok(())
}
