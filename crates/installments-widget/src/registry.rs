//! # Widget Registry
//!
//! Owns every live widget on the page and drives its lifecycle.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Widget Lifecycle                                 │
//! │                                                                         │
//! │   initialize(element)                                                   │
//! │        │                                                                │
//! │        ├── already registered ──────────────► AlreadyInitialized        │
//! │        │                                                                │
//! │        ├── option list empty ───────────────► Inert (not registered,    │
//! │        │                                       re-parsed next time)     │
//! │        ▼                                                                │
//! │   ┌─────────┐  paint(initial price)  ┌──────────────────────────┐      │
//! │   │  Idle   │ ─────────────────────► │ Subscribed(subscription) │      │
//! │   └─────────┘   bus.subscribe        └────────────┬─────────────┘      │
//! │                                                   │                     │
//! │       VariantChange ─► section matches? ─► price > 0? ─► recompute      │
//! │                                                   │         + paint     │
//! │                                                   ▼                     │
//! │                              teardown(id): unsubscribe, drop record     │
//! │                              (second teardown is a no-op)               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Bus listeners hold a `Weak` handle to their widget; once the registry
//! drops the record, a late notification finds nothing to update.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use installments_core::{InstallmentsView, Money, MoneyFormatter};
use tracing::{debug, info};

use crate::bus::{SubscriptionId, VariantBus, VariantChange, VariantListener};
use crate::config::{load_options, WidgetSettings};
use crate::element::{WidgetElement, WidgetId};
use crate::engine::InstallmentEngine;
use crate::sink::ViewSink;

// =============================================================================
// State
// =============================================================================

/// Subscription state of a registered widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetState {
    Idle,
    Subscribed(SubscriptionId),
}

/// Result of [`WidgetRegistry::initialize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    /// Rendered and subscribed.
    Initialized,
    /// The id was already live; nothing changed.
    AlreadyInitialized,
    /// No usable options; nothing rendered, nothing subscribed.
    Inert,
}

struct Widget {
    id: WidgetId,
    section_id: Option<String>,
    engine: InstallmentEngine,
    state: WidgetState,
}

impl Widget {
    /// Applies a variant change, returning the view to paint if accepted.
    fn on_variant_change(&mut self, change: &VariantChange) -> Option<InstallmentsView> {
        if self.section_id.as_deref() != Some(change.section_id.as_str()) {
            debug!(
                widget_id = %self.id,
                section_id = %change.section_id,
                "Ignoring variant change for another section"
            );
            return None;
        }

        let Some(price) = self.engine.resolve_price(change.price) else {
            debug!(widget_id = %self.id, price = ?change.price, "Ignoring variant change without a price");
            return None;
        };

        debug!(widget_id = %self.id, price = price.cents(), "Recomputing installments");
        Some(self.engine.update(price))
    }
}

// =============================================================================
// Registry
// =============================================================================

/// Page-level owner of widget records.
pub struct WidgetRegistry {
    bus: Rc<dyn VariantBus>,
    sink: Rc<dyn ViewSink>,
    formatter: Option<Rc<dyn MoneyFormatter>>,
    widgets: HashMap<WidgetId, Rc<RefCell<Widget>>>,
}

impl WidgetRegistry {
    pub fn new(
        bus: Rc<dyn VariantBus>,
        sink: Rc<dyn ViewSink>,
        formatter: Option<Rc<dyn MoneyFormatter>>,
    ) -> Self {
        WidgetRegistry {
            bus,
            sink,
            formatter,
            widgets: HashMap::new(),
        }
    }

    /// Brings one element to life.
    pub fn initialize(&mut self, element: &WidgetElement) -> InitOutcome {
        let id = element.id.clone();

        if self.widgets.contains_key(&id) {
            debug!(widget_id = %id, "Widget already initialized");
            return InitOutcome::AlreadyInitialized;
        }

        let options = load_options(element);
        if options.is_empty() {
            debug!(widget_id = %id, "No installment options; widget stays inert");
            return InitOutcome::Inert;
        }

        let settings = WidgetSettings::from_element(element);
        let engine = InstallmentEngine::new(
            options,
            settings.projector(self.formatter.clone()),
            Money::from_cents(settings.initial_price),
            settings.table_expanded,
        );

        self.sink.paint(&id, &engine.render());

        let widget = Rc::new(RefCell::new(Widget {
            id: id.clone(),
            section_id: settings.section_id.clone(),
            engine,
            state: WidgetState::Idle,
        }));

        let subscription = self
            .bus
            .subscribe(variant_listener(Rc::downgrade(&widget), Rc::clone(&self.sink)));
        widget.borrow_mut().state = WidgetState::Subscribed(subscription);

        info!(
            widget_id = %id,
            section_id = ?settings.section_id,
            options = widget.borrow().engine.options().len(),
            "Installments widget initialized"
        );

        self.widgets.insert(id, widget);
        InitOutcome::Initialized
    }

    /// Initializes every element of a freshly loaded section.
    pub fn initialize_all<'a>(
        &mut self,
        elements: impl IntoIterator<Item = &'a WidgetElement>,
    ) -> Vec<InitOutcome> {
        elements
            .into_iter()
            .map(|element| self.initialize(element))
            .collect()
    }

    /// Unsubscribes and drops a widget. Returns false if it was not live.
    pub fn teardown(&mut self, id: &WidgetId) -> bool {
        let Some(widget) = self.widgets.remove(id) else {
            debug!(widget_id = %id, "Teardown of unknown widget ignored");
            return false;
        };

        let state = std::mem::replace(&mut widget.borrow_mut().state, WidgetState::Idle);
        if let WidgetState::Subscribed(subscription) = state {
            self.bus.unsubscribe(subscription);
        }

        info!(widget_id = %id, "Installments widget torn down");
        true
    }

    /// Tears down every widget of a section, or all widgets when `None`.
    /// Returns how many were removed.
    pub fn teardown_all(&mut self, section_id: Option<&str>) -> usize {
        let ids: Vec<WidgetId> = self
            .widgets
            .iter()
            .filter(|(_, widget)| {
                section_id.is_none() || widget.borrow().section_id.as_deref() == section_id
            })
            .map(|(id, _)| id.clone())
            .collect();

        ids.iter().filter(|id| self.teardown(id)).count()
    }

    /// Flips the table (or sets it) and repaints. `None` if the id is not live.
    pub fn toggle_table(&mut self, id: &WidgetId, expanded: Option<bool>) -> Option<bool> {
        let widget = self.widgets.get(id)?;

        let (expanded, view) = {
            let mut widget = widget.borrow_mut();
            let expanded = widget.engine.toggle_table(expanded);
            (expanded, widget.engine.render())
        };

        debug!(widget_id = %id, expanded, "Installments table toggled");
        self.sink.paint(id, &view);
        Some(expanded)
    }

    /// Current render of a live widget.
    pub fn view(&self, id: &WidgetId) -> Option<InstallmentsView> {
        self.widgets.get(id).map(|widget| widget.borrow().engine.render())
    }

    pub fn state(&self, id: &WidgetId) -> Option<WidgetState> {
        self.widgets.get(id).map(|widget| widget.borrow().state)
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }
}

fn variant_listener(widget: Weak<RefCell<Widget>>, sink: Rc<dyn ViewSink>) -> VariantListener {
    Rc::new(move |change: &VariantChange| {
        let Some(widget) = widget.upgrade() else {
            return;
        };

        let update = {
            let mut widget = widget.borrow_mut();
            widget
                .on_variant_change(change)
                .map(|view| (widget.id.clone(), view))
        };

        if let Some((id, view)) = update {
            sink.paint(&id, &view);
        }
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
