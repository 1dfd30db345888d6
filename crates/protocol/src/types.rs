use serde::{Deserialize, Serialize};

/// A reading of the browser viewport at event time.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Viewport {
    /// Horizontal visible size in CSS pixels.
    pub width: f64,
    /// Vertical scroll offset in CSS pixels.
    pub scroll_y: f64,
}

impl Viewport {
    pub fn new(width: f64, scroll_y: f64) -> Self {
        Self { width, scroll_y }
    }
}
