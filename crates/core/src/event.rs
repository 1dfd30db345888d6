use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Page events the controller reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageEvent {
    Load,
    Resize,
    Scroll,
    /// The scroll-to-top control was activated.
    AffordanceClick,
}

impl PageEvent {
    /// DOM event type the browser bridge listens for.
    pub fn dom_type(self) -> &'static str {
        match self {
            PageEvent::Load => "load",
            PageEvent::Resize => "resize",
            PageEvent::Scroll => "scroll",
            PageEvent::AffordanceClick => "click",
        }
    }

    /// Window events that re-plot the charts. These need nothing but the
    /// window, so they are subscribed before the control is looked up.
    pub const RENDER: [PageEvent; 2] = [PageEvent::Load, PageEvent::Resize];

    /// Events driving the scroll-to-top control.
    pub const AFFORDANCE: [PageEvent; 2] = [PageEvent::AffordanceClick, PageEvent::Scroll];
}

/// A pull-based source of page events.
///
/// The browser pushes events through listeners instead; this seam exists so
/// tests and the replay tool can feed a scripted sequence.
pub trait EventSource {
    fn next_event(&mut self) -> Option<PageEvent>;
}

/// A fixed, in-order sequence of events.
#[derive(Debug, Clone, Default)]
pub struct ScriptedEvents {
    queue: VecDeque<PageEvent>,
}

impl ScriptedEvents {
    pub fn new(events: impl IntoIterator<Item = PageEvent>) -> Self {
        Self {
            queue: events.into_iter().collect(),
        }
    }

    pub fn push(&mut self, event: PageEvent) {
        self.queue.push_back(event);
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl EventSource for ScriptedEvents {
    fn next_event(&mut self) -> Option<PageEvent> {
        self.queue.pop_front()
    }
}
