use std::collections::{BTreeSet, HashMap, HashSet};

use plotpage_protocol::{ElementId, Figure, PageCommand, PlotConfig, Viewport};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HostError {
    #[error("no element with id '{0}'")]
    MissingElement(ElementId),
    #[error("plotting into '{container}' failed: {message}")]
    Plot {
        container: ElementId,
        message: String,
    },
    #[error("script error: {0}")]
    Script(String),
}

/// The environment a controller runs against: something that can be read
/// for the current viewport and that applies page commands.
pub trait PageHost {
    fn viewport(&self) -> Viewport;

    fn execute(&mut self, command: PageCommand) -> Result<(), HostError>;

    /// Apply commands in order, stopping at the first failure.
    fn execute_all(&mut self, commands: Vec<PageCommand>) -> Result<(), HostError> {
        for command in commands {
            self.execute(command)?;
        }
        Ok(())
    }
}

/// The last plot applied to a container.
#[derive(Debug, Clone, PartialEq)]
pub struct PlottedChart {
    pub figure: Figure,
    pub config: PlotConfig,
    /// How many times the container has been (re)plotted.
    pub renders: usize,
}

/// An in-memory page: mutable viewport, element registry, class lists, and
/// a log of every command applied.
///
/// Scrolling is applied instantly regardless of the requested behavior.
#[derive(Debug, Clone, Default)]
pub struct SimulatedHost {
    viewport: Viewport,
    /// `None` accepts any element id.
    elements: Option<HashSet<ElementId>>,
    classes: HashMap<ElementId, BTreeSet<ElementId>>,
    plots: HashMap<ElementId, PlottedChart>,
    log: Vec<PageCommand>,
}

impl SimulatedHost {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            ..Self::default()
        }
    }

    /// Only the listed element ids exist; commands naming others fail.
    pub fn with_elements<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<ElementId>,
    {
        self.elements = Some(ids.into_iter().map(Into::into).collect());
        self
    }

    pub fn set_width(&mut self, width: f64) {
        self.viewport.width = width;
    }

    pub fn set_scroll_y(&mut self, scroll_y: f64) {
        self.viewport.scroll_y = scroll_y;
    }

    pub fn has_class(&self, element: &str, class: &str) -> bool {
        self.classes
            .get(element)
            .is_some_and(|set| set.contains(class))
    }

    pub fn plot(&self, container: &str) -> Option<&PlottedChart> {
        self.plots.get(container)
    }

    /// Every command applied so far, in order.
    pub fn log(&self) -> &[PageCommand] {
        &self.log
    }

    /// Drain the command log.
    pub fn take_log(&mut self) -> Vec<PageCommand> {
        std::mem::take(&mut self.log)
    }

    fn require(&self, id: &ElementId) -> Result<(), HostError> {
        match &self.elements {
            Some(known) if !known.contains(id) => Err(HostError::MissingElement(id.clone())),
            _ => Ok(()),
        }
    }
}

impl PageHost for SimulatedHost {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn execute(&mut self, command: PageCommand) -> Result<(), HostError> {
        match &command {
            PageCommand::NewPlot {
                container,
                figure,
                config,
                ..
            } => {
                self.require(container)?;
                let renders = self.plots.get(container).map_or(0, |p| p.renders) + 1;
                self.plots.insert(
                    container.clone(),
                    PlottedChart {
                        figure: figure.clone(),
                        config: *config,
                        renders,
                    },
                );
            }
            PageCommand::SetClass {
                element,
                class,
                enabled,
            } => {
                self.require(element)?;
                let set = self.classes.entry(element.clone()).or_default();
                if *enabled {
                    set.insert(class.clone());
                } else {
                    set.remove(class.as_str());
                }
            }
            PageCommand::ScrollTo { top, .. } => {
                self.viewport.scroll_y = *top;
            }
        }
        self.log.push(command);
        Ok(())
    }
}
