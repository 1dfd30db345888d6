use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::element_id::ElementId;
use crate::figure::Figure;

/// A single, stateless page instruction.
///
/// The controller emits a `Vec<PageCommand>` per event. Hosts apply them
/// in order; each command carries everything it needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum PageCommand {
    /// (Re)plot `figure` into the element `container`, replacing whatever
    /// was drawn there before.
    NewPlot {
        container: ElementId,
        figure: Figure,
        /// Layout overrides passed next to the figure. Always empty today.
        layout: Map<String, Value>,
        config: PlotConfig,
    },

    /// Add (`enabled`) or remove a CSS class on an element.
    SetClass {
        element: ElementId,
        class: ElementId,
        enabled: bool,
    },

    /// Scroll the window to a vertical offset.
    ScrollTo { top: f64, behavior: ScrollBehavior },
}

/// Display configuration handed to the plotting library with every plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlotConfig {
    pub responsive: bool,
    pub scroll_zoom: bool,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            responsive: true,
            scroll_zoom: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollBehavior {
    #[default]
    Smooth,
    Instant,
    Auto,
}
