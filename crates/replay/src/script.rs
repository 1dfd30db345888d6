use anyhow::{Context, Result};
use plotpage_core::binding::container_for_global;
use plotpage_core::{ChartBinding, ChartBindings, PageEvent, SimulatedHost};
use serde::Deserialize;
use serde_json::{Map, Value};

/// One step of a replay script. Steps that carry a reading update the
/// simulated viewport before their event fires.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReplayStep {
    Load,
    Resize { width: f64 },
    Scroll { offset: f64 },
    Click,
}

impl ReplayStep {
    pub fn apply(self, host: &mut SimulatedHost) -> PageEvent {
        match self {
            ReplayStep::Load => PageEvent::Load,
            ReplayStep::Resize { width } => {
                host.set_width(width);
                PageEvent::Resize
            }
            ReplayStep::Scroll { offset } => {
                host.set_scroll_y(offset);
                PageEvent::Scroll
            }
            ReplayStep::Click => PageEvent::AffordanceClick,
        }
    }
}

pub fn parse_steps(data: &[u8]) -> Result<Vec<ReplayStep>> {
    serde_json::from_slice(data).context("events file must be a JSON array of steps")
}

/// Parse `{ "<global or container>": <figure>, ... }`.
pub fn load_charts(data: &[u8]) -> Result<ChartBindings> {
    let payloads: Map<String, Value> =
        serde_json::from_slice(data).context("charts file must be a JSON object")?;
    let mut bindings = ChartBindings::new();
    for (name, figure) in payloads {
        bindings.insert(ChartBinding::from_value(container_for_global(&name), figure)?);
    }
    Ok(bindings)
}
