//! # View Sinks
//!
//! Where finished [`InstallmentsView`]s go. The page's view layer implements
//! [`ViewSink`] and paints the projection into the widget's markup.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use installments_core::InstallmentsView;

use crate::element::WidgetId;

/// Receives every render of every widget.
pub trait ViewSink {
    fn paint(&self, id: &WidgetId, view: &InstallmentsView);
}

/// Sink that discards renders.
pub struct NoOpSink;

impl ViewSink for NoOpSink {
    fn paint(&self, _id: &WidgetId, _view: &InstallmentsView) {}
}

/// Sink that keeps the latest render per widget.
#[derive(Default)]
pub struct MemorySink {
    views: RefCell<HashMap<WidgetId, InstallmentsView>>,
    paints: Cell<usize>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest render for a widget.
    pub fn latest(&self, id: &WidgetId) -> Option<InstallmentsView> {
        self.views.borrow().get(id).cloned()
    }

    /// Total number of paints across all widgets.
    pub fn paint_count(&self) -> usize {
        self.paints.get()
    }
}

impl ViewSink for MemorySink {
    fn paint(&self, id: &WidgetId, view: &InstallmentsView) {
        self.views.borrow_mut().insert(id.clone(), view.clone());
        self.paints.set(self.paints.get() + 1);
    }
}
