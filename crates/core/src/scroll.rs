use crate::config::PageConfig;

/// Visibility rule for the scroll-to-top control: shown once the page has
/// been scrolled strictly past `threshold_px`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollAffordance {
    pub threshold_px: f64,
}

impl Default for ScrollAffordance {
    fn default() -> Self {
        Self::from_config(&PageConfig::default())
    }
}

impl ScrollAffordance {
    pub fn from_config(config: &PageConfig) -> Self {
        Self {
            threshold_px: config.scroll_threshold_px,
        }
    }

    pub fn is_visible(&self, scroll_y: f64) -> bool {
        scroll_y > self.threshold_px
    }
}
