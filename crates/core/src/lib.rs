//! Page behavior for plotpage: responsive chart re-rendering and the
//! scroll-to-top control, expressed as commands against a [`PageHost`].

pub mod binding;
pub mod config;
pub mod controller;
pub mod event;
pub mod host;
pub mod responsive;
pub mod scroll;

pub use binding::{BindingError, ChartBinding, ChartBindings};
pub use config::{ConfigError, PageConfig};
pub use controller::PageBehaviorController;
pub use event::{EventSource, PageEvent, ScriptedEvents};
pub use host::{HostError, PageHost, SimulatedHost};
pub use responsive::{ResponsiveThreshold, SizeClass};
pub use scroll::ScrollAffordance;
