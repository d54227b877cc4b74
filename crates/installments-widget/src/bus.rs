//! # Variant Change Bus
//!
//! Page-wide publish/subscribe channel for "the selected variant changed".
//!
//! ```text
//! ┌──────────────┐  publish(VariantChange)  ┌──────────────┐
//! │ variant      │ ───────────────────────► │  LocalBus    │
//! │ picker       │                          │              │
//! └──────────────┘                          └──────┬───────┘
//!                                                  │ every listener, in
//!                                                  │ subscription order
//!                                   ┌──────────────┼──────────────┐
//!                                   ▼              ▼              ▼
//!                              widget A       widget B       widget C
//!                              (filters on section_id itself)
//! ```
//!
//! Listeners are snapshotted before dispatch, so a listener may subscribe
//! or unsubscribe (itself included) while a change is being delivered.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// Payload of a variant change notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantChange {
    /// Section the change belongs to.
    pub section_id: String,

    /// New price in cents, absent when the variant has none.
    #[serde(default)]
    pub price: Option<i64>,
}

impl VariantChange {
    pub fn new(section_id: impl Into<String>, price: Option<i64>) -> Self {
        VariantChange {
            section_id: section_id.into(),
            price,
        }
    }
}

/// Handle returned by [`VariantBus::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

pub type VariantListener = Rc<dyn Fn(&VariantChange)>;

/// Subscription side of the bus, as seen by widgets.
pub trait VariantBus {
    fn subscribe(&self, listener: VariantListener) -> SubscriptionId;

    /// Removes a subscription. Returns false if it was already gone.
    fn unsubscribe(&self, id: SubscriptionId) -> bool;
}

// =============================================================================
// Local Bus
// =============================================================================

/// In-process bus for one page.
#[derive(Default)]
pub struct LocalBus {
    listeners: RefCell<Vec<(SubscriptionId, VariantListener)>>,
    next_id: Cell<u64>,
}

impl LocalBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delivers a change to every current listener.
    pub fn publish(&self, change: &VariantChange) {
        let snapshot: Vec<VariantListener> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();

        for listener in snapshot {
            listener(change);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

impl VariantBus for LocalBus {
    fn subscribe(&self, listener: VariantListener) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.listeners.borrow_mut().push((id, listener));
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }
}
