pub mod commands;
pub mod element_id;
pub mod figure;
pub mod types;

pub use commands::{PageCommand, PlotConfig, ScrollBehavior};
pub use element_id::ElementId;
pub use figure::{Figure, Font, Layout};
pub use types::Viewport;
