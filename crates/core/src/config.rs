use plotpage_protocol::{ElementId, ScrollBehavior};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::binding::DEFAULT_CHARTS;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("breakpoint must be a positive width, got {0}")]
    Breakpoint(f64),
    #[error("font size must be positive, got {0}")]
    FontSize(f64),
    #[error("scroll threshold must be a non-negative offset, got {0}")]
    ScrollThreshold(f64),
    #[error("{0} must not be empty")]
    EmptyName(&'static str),
}

/// Tunables for the page behavior.
///
/// Every field has a default matching the rainfall page, so an empty JSON
/// object is a complete configuration. The plot display config is not
/// tunable: every chart is plotted with `PlotConfig::default()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PageConfig {
    /// Viewport widths strictly below this use the compact font.
    pub breakpoint_px: f64,
    pub compact_font_size: f64,
    pub regular_font_size: f64,
    /// Scroll offsets strictly above this show the affordance.
    pub scroll_threshold_px: f64,
    pub affordance_id: ElementId,
    pub affordance_class: ElementId,
    pub scroll_behavior: ScrollBehavior,
    /// Short names of the charts the page carries; chart `n` is read from
    /// `graphs_n` and plotted into `chart_n`.
    pub charts: Vec<String>,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            breakpoint_px: 768.0,
            compact_font_size: 9.0,
            regular_font_size: 11.0,
            scroll_threshold_px: 250.0,
            affordance_id: ElementId::from("scrollToTop"),
            affordance_class: ElementId::from("visible"),
            scroll_behavior: ScrollBehavior::Smooth,
            charts: DEFAULT_CHARTS.into_iter().map(String::from).collect(),
        }
    }
}

impl PageConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json(data: &[u8]) -> Result<Self, ConfigError> {
        let config: PageConfig = serde_json::from_slice(data)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.breakpoint_px.is_finite() && self.breakpoint_px > 0.0) {
            return Err(ConfigError::Breakpoint(self.breakpoint_px));
        }
        for size in [self.compact_font_size, self.regular_font_size] {
            if !(size.is_finite() && size > 0.0) {
                return Err(ConfigError::FontSize(size));
            }
        }
        if !(self.scroll_threshold_px.is_finite() && self.scroll_threshold_px >= 0.0) {
            return Err(ConfigError::ScrollThreshold(self.scroll_threshold_px));
        }
        if self.affordance_id.is_blank() {
            return Err(ConfigError::EmptyName("affordance_id"));
        }
        if self.affordance_class.is_blank() {
            return Err(ConfigError::EmptyName("affordance_class"));
        }
        if self.charts.iter().any(|name| name.trim().is_empty()) {
            return Err(ConfigError::EmptyName("chart name"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_yields_defaults() {
        let config = PageConfig::from_json(b"{}").unwrap();
        assert_eq!(config, PageConfig::default());
        assert_eq!(config.breakpoint_px, 768.0);
        assert_eq!(config.compact_font_size, 9.0);
        assert_eq!(config.regular_font_size, 11.0);
        assert_eq!(config.scroll_threshold_px, 250.0);
        assert_eq!(config.affordance_id, "scrollToTop");
        assert_eq!(config.affordance_class, "visible");
        assert_eq!(config.charts, DEFAULT_CHARTS);
    }

    #[test]
    fn partial_override() {
        let config =
            PageConfig::from_json(br#"{"breakpoint_px": 1024, "scroll_behavior": "instant"}"#)
                .unwrap();
        assert_eq!(config.breakpoint_px, 1024.0);
        assert_eq!(config.scroll_behavior, ScrollBehavior::Instant);
        assert_eq!(config.regular_font_size, 11.0);
    }

    #[test]
    fn rejects_unknown_keys() {
        let result = PageConfig::from_json(br#"{"breakpoint": 768}"#);
        assert!(matches!(result, Err(ConfigError::Json(_))));
    }

    #[test]
    fn rejects_invalid_values() {
        assert!(matches!(
            PageConfig::from_json(br#"{"breakpoint_px": 0}"#),
            Err(ConfigError::Breakpoint(_))
        ));
        assert!(matches!(
            PageConfig::from_json(br#"{"compact_font_size": -1}"#),
            Err(ConfigError::FontSize(_))
        ));
        assert!(matches!(
            PageConfig::from_json(br#"{"scroll_threshold_px": -0.5}"#),
            Err(ConfigError::ScrollThreshold(_))
        ));
        assert!(matches!(
            PageConfig::from_json(br#"{"affordance_id": " "}"#),
            Err(ConfigError::EmptyName("affordance_id"))
        ));
    }

    #[test]
    fn display_config_is_not_overridable() {
        let result = PageConfig::from_json(
            br#"{"plot_config": {"responsive": false, "scrollZoom": false}}"#,
        );
        assert!(matches!(result, Err(ConfigError::Json(_))));
    }

    #[test]
    fn chart_subset() {
        let config = PageConfig::from_json(br#"{"charts": ["averages", "linreg"]}"#).unwrap();
        assert_eq!(config.charts, ["averages", "linreg"]);
        assert!(matches!(
            PageConfig::from_json(br#"{"charts": ["averages", ""]}"#),
            Err(ConfigError::EmptyName("chart name"))
        ));
    }

    #[test]
    fn zero_threshold_is_allowed() {
        let config = PageConfig::from_json(br#"{"scroll_threshold_px": 0}"#).unwrap();
        assert_eq!(config.scroll_threshold_px, 0.0);
    }
}
