//! Preview fixture configuration.
//!
//! Load order: built-in demo → TOML fixture file → environment overrides,
//! then validation.
//!
//! ## Fixture Format
//! ```toml
//! [[widgets]]
//! id = "main-table"
//! config_script = '[{"count": 6}, {"count": 12, "interest": true, "rate": 0.1042}]'
//!
//! [widgets.attributes]
//! data-section = "main"
//! data-initial-price = "10000"
//! data-highlight-installment = "6"
//!
//! [[events]]
//! action = "variant"
//! section_id = "main"
//! price = 20000
//!
//! [[events]]
//! action = "unload"
//! section_id = "main"
//! ```
//!
//! ## Environment
//! - `INSTALLMENTS_PREVIEW_CONFIG`: fixture path when none is given
//! - `INSTALLMENTS_PREVIEW_PRICE`: initial price (cents) for every widget
//! - `INSTALLMENTS_PREVIEW_HIGHLIGHT`: highlighted count for every widget

use std::collections::HashSet;
use std::env;
use std::path::PathBuf;

use installments_widget::element::{
    ATTR_HIGHLIGHT, ATTR_INITIAL_PRICE, ATTR_SCHEDULE, ATTR_SECTION,
};
use installments_widget::WidgetElement;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

pub const ENV_CONFIG_PATH: &str = "INSTALLMENTS_PREVIEW_CONFIG";
pub const ENV_PRICE: &str = "INSTALLMENTS_PREVIEW_PRICE";
pub const ENV_HIGHLIGHT: &str = "INSTALLMENTS_PREVIEW_HIGHLIGHT";

/// Preview errors.
#[derive(Debug, thiserror::Error)]
pub enum PreviewError {
    #[error("Failed to read fixture: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse fixture: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid fixture: {0}")]
    InvalidConfig(String),
}

pub type PreviewResult<T> = Result<T, PreviewError>;

/// One scripted step replayed after initialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum PreviewEvent {
    /// Publishes a variant change on the bus.
    Variant {
        section_id: String,
        #[serde(default)]
        price: Option<i64>,
    },

    /// Flips (or sets) a widget's table.
    Toggle {
        widget: String,
        #[serde(default)]
        expanded: Option<bool>,
    },

    /// Tears down a section's widgets, or all widgets when no section is given.
    Unload {
        #[serde(default)]
        section_id: Option<String>,
    },
}

/// A storefront page to preview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewConfig {
    #[serde(default)]
    pub widgets: Vec<WidgetElement>,

    #[serde(default)]
    pub events: Vec<PreviewEvent>,
}

impl Default for PreviewConfig {
    /// A single widget on the built-in benefits schedule.
    fn default() -> Self {
        let demo = WidgetElement::new("demo")
            .with_attribute(ATTR_SCHEDULE, "benefits")
            .with_attribute(ATTR_SECTION, "main")
            .with_attribute(ATTR_INITIAL_PRICE, "10000");

        PreviewConfig {
            widgets: vec![demo],
            events: vec![PreviewEvent::Variant {
                section_id: "main".to_string(),
                price: Some(25_990),
            }],
        }
    }
}

impl PreviewConfig {
    /// Loads the fixture at `path` (or `INSTALLMENTS_PREVIEW_CONFIG`).
    pub fn load(path: Option<PathBuf>) -> PreviewResult<Self> {
        let mut config = Self::default();

        if let Some(path) = path.or_else(|| env::var(ENV_CONFIG_PATH).ok().map(PathBuf::from)) {
            if path.exists() {
                info!(?path, "Loading preview fixture");
                let contents = std::fs::read_to_string(&path)?;
                config = Self::from_toml(&contents)?;
            } else {
                warn!(?path, "Fixture not found, using built-in demo");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    pub fn from_toml(contents: &str) -> PreviewResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Every widget id must be non-empty and unique.
    ///
    /// Widgets listed without an `id` were given a generated one on parse.
    pub fn validate(&self) -> PreviewResult<()> {
        if self.widgets.is_empty() {
            return Err(PreviewError::InvalidConfig("no widgets defined".into()));
        }

        let mut seen = HashSet::new();
        for widget in &self.widgets {
            let id = widget.id.as_str();
            if id.trim().is_empty() {
                return Err(PreviewError::InvalidConfig("widget id must not be empty".into()));
            }
            if !seen.insert(id) {
                return Err(PreviewError::InvalidConfig(format!("duplicate widget id {id:?}")));
            }
        }

        Ok(())
    }

    /// Forces every widget's initial price.
    pub fn override_initial_price(&mut self, cents: i64) {
        for widget in &mut self.widgets {
            widget
                .attributes
                .insert(ATTR_INITIAL_PRICE.to_string(), cents.to_string());
        }
    }

    /// Forces every widget's highlighted count.
    pub fn override_highlight(&mut self, count: u32) {
        for widget in &mut self.widgets {
            widget
                .attributes
                .insert(ATTR_HIGHLIGHT.to_string(), count.to_string());
        }
    }

    fn apply_env_overrides(&mut self) {
        let price = env::var(ENV_PRICE).ok();
        let highlight = env::var(ENV_HIGHLIGHT).ok();
        self.apply_overrides(price.as_deref(), highlight.as_deref());
    }

    /// Applies raw override values; non-numeric ones are logged and skipped.
    fn apply_overrides(&mut self, price: Option<&str>, highlight: Option<&str>) {
        if let Some(price) = price {
            match price.trim().parse::<i64>() {
                Ok(cents) => {
                    debug!(price = cents, "Overriding initial price from environment");
                    self.override_initial_price(cents);
                }
                Err(_) => warn!(value = %price, "Ignoring non-numeric {}", ENV_PRICE),
            }
        }

        if let Some(highlight) = highlight {
            match highlight.trim().parse::<u32>() {
                Ok(count) => {
                    debug!(highlight = count, "Overriding highlight from environment");
                    self.override_highlight(count);
                }
                Err(_) => warn!(value = %highlight, "Ignoring non-numeric {}", ENV_HIGHLIGHT),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use installments_widget::element::ATTR_CONFIG;

    const FIXTURE: &str = r#"
        [[widgets]]
        id = "main-table"
        config_script = '[{"count": 6}, {"count": 12, "interest": true, "rate": 0.1042}]'

        [widgets.attributes]
        data-section = "main"
        data-initial-price = "10000"

        [[widgets]]
        id = "featured"

        [widgets.attributes]
        data-section = "featured"
        data-installments-config = '[{"count": 3}]'

        [[events]]
        action = "variant"
        section_id = "main"
        price = 20000

        [[events]]
        action = "variant"
        section_id = "main"

        [[events]]
        action = "toggle"
        widget = "main-table"

        [[events]]
        action = "unload"
        section_id = "featured"
    "#;

    #[test]
    fn test_default_is_valid_demo() {
        let config = PreviewConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.widgets[0].attribute(ATTR_SCHEDULE), Some("benefits"));
    }

    #[test]
    fn test_parse_fixture() {
        let config = PreviewConfig::from_toml(FIXTURE).unwrap();

        assert_eq!(config.widgets.len(), 2);
        assert_eq!(config.widgets[0].attribute(ATTR_SECTION), Some("main"));
        assert!(config.widgets[0].script_text().is_some());
        assert_eq!(config.widgets[1].attribute(ATTR_CONFIG), Some(r#"[{"count": 3}]"#));

        assert_eq!(
            config.events,
            vec![
                PreviewEvent::Variant {
                    section_id: "main".into(),
                    price: Some(20_000)
                },
                PreviewEvent::Variant {
                    section_id: "main".into(),
                    price: None
                },
                PreviewEvent::Toggle {
                    widget: "main-table".into(),
                    expanded: None
                },
                PreviewEvent::Unload {
                    section_id: Some("featured".into())
                },
            ]
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_duplicates_and_empty() {
        let mut config = PreviewConfig::default();
        config.widgets.push(WidgetElement::new("demo"));
        assert!(matches!(config.validate(), Err(PreviewError::InvalidConfig(_))));

        let empty = PreviewConfig {
            widgets: Vec::new(),
            events: Vec::new(),
        };
        assert!(matches!(empty.validate(), Err(PreviewError::InvalidConfig(_))));
    }

    #[test]
    fn test_bad_toml() {
        assert!(matches!(
            PreviewConfig::from_toml("[[widgets]\nid ="),
            Err(PreviewError::Toml(_))
        ));
    }

    #[test]
    fn test_price_override() {
        let mut config = PreviewConfig::from_toml(FIXTURE).unwrap();
        config.override_initial_price(4_990);

        for widget in &config.widgets {
            assert_eq!(widget.attribute(ATTR_INITIAL_PRICE), Some("4990"));
        }
    }

    #[test]
    fn test_widget_without_id_gets_one() {
        let config = PreviewConfig::from_toml(
            r#"
            [[widgets]]
            [widgets.attributes]
            data-installments-schedule = "benefits"

            [[widgets]]
            [widgets.attributes]
            data-installments-schedule = "benefits"
            "#,
        )
        .unwrap();

        assert_eq!(config.widgets.len(), 2);
        assert!(!config.widgets[0].id.as_str().is_empty());
        assert_ne!(config.widgets[0].id, config.widgets[1].id);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overrides_from_raw_values() {
        let mut config = PreviewConfig::from_toml(FIXTURE).unwrap();
        config.apply_overrides(Some(" 2590 "), Some("3"));

        for widget in &config.widgets {
            assert_eq!(widget.attribute(ATTR_INITIAL_PRICE), Some("2590"));
            assert_eq!(widget.attribute(ATTR_HIGHLIGHT), Some("3"));
        }
    }

    #[test]
    fn test_non_numeric_overrides_are_ignored() {
        let original = PreviewConfig::from_toml(FIXTURE).unwrap();

        let mut config = original.clone();
        config.apply_overrides(Some("cheap"), Some("six"));
        assert_eq!(config, original);

        config.apply_overrides(None, None);
        assert_eq!(config, original);
    }

    #[test]
    fn test_missing_file_falls_back_to_demo() {
        let config = PreviewConfig::load(Some(PathBuf::from("/nonexistent/fixture.toml"))).unwrap();
        assert_eq!(config.widgets[0].id.as_str(), "demo");
    }
}
