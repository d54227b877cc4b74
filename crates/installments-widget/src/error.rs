//! # Widget Error Types
//!
//! Error types for widget initialization.
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Widget Error Categories                           │
//! │                                                                         │
//! │  ┌─────────────────────┐  ┌─────────────────────┐                      │
//! │  │   Configuration     │  │     Attributes      │                      │
//! │  │                     │  │                     │                      │
//! │  │  ConfigParse        │  │  InvalidAttribute   │                      │
//! │  │  ConfigShape        │  │                     │                      │
//! │  └─────────────────────┘  └─────────────────────┘                      │
//! │                                                                         │
//! │  Every variant is recovered inside this crate: a bad config makes the  │
//! │  widget inert, a bad attribute falls back to its default. Nothing is   │
//! │  thrown to the page.                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Result type alias for widget operations.
pub type WidgetResult<T> = Result<T, WidgetError>;

/// Widget error type.
#[derive(Debug, Error)]
pub enum WidgetError {
    /// Configuration text is not valid JSON.
    #[error("Failed to parse installments configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// Configuration parsed but is neither an option nor a list of options.
    #[error("Unexpected installments configuration shape: {0}")]
    ConfigShape(String),

    /// An element attribute holds an unusable value.
    #[error("Invalid value for attribute {name}: {value:?}")]
    InvalidAttribute { name: String, value: String },
}
