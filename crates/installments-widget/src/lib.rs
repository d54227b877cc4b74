//! # installments-widget: Widget Lifecycle
//!
//! Connects storefront widget elements to the pure installment engine in
//! `installments-core`.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  WidgetElement ──► config::load_options ──► InstallmentEngine           │
//! │  (attributes,      WidgetSettings              │                        │
//! │   config script)                               │ render()               │
//! │                                                ▼                        │
//! │  LocalBus ── VariantChange ──► WidgetRegistry ──► ViewSink::paint       │
//! │                                (Idle / Subscribed)                      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`element`] - Element snapshot and attribute names
//! - [`config`] - Option list loader and per-widget settings
//! - [`bus`] - Variant change publish/subscribe
//! - [`engine`] - Per-widget recomputation
//! - [`registry`] - Widget lifecycle
//! - [`sink`] - Render destinations
//! - [`error`] - Widget error types
//!
//! Everything here runs on one thread; shared handles are `Rc`/`RefCell`.

pub mod bus;
pub mod config;
pub mod element;
pub mod engine;
pub mod error;
pub mod registry;
pub mod sink;

pub use bus::{LocalBus, SubscriptionId, VariantBus, VariantChange, VariantListener};
pub use config::{load_options, parse_options, WidgetSettings};
pub use element::{WidgetElement, WidgetId};
pub use engine::InstallmentEngine;
pub use error::{WidgetError, WidgetResult};
pub use registry::{InitOutcome, WidgetRegistry, WidgetState};
pub use sink::{MemorySink, NoOpSink, ViewSink};
