use log::{debug, trace};
use plotpage_protocol::{PageCommand, PlotConfig, Viewport};
use serde_json::Map;

use crate::binding::ChartBindings;
use crate::config::PageConfig;
use crate::event::{EventSource, PageEvent};
use crate::host::{HostError, PageHost};
use crate::responsive::{ResponsiveThreshold, SizeClass};
use crate::scroll::ScrollAffordance;

/// Drives the charts and the scroll-to-top control of one page.
///
/// Owns the chart bindings for the page's lifetime. Every operation reads
/// the viewport from the host at call time; the only state carried between
/// events is the bindings' font size, which is always overwritten before use.
#[derive(Debug, Clone)]
pub struct PageBehaviorController {
    config: PageConfig,
    threshold: ResponsiveThreshold,
    affordance: ScrollAffordance,
    bindings: ChartBindings,
    size_class: Option<SizeClass>,
}

impl PageBehaviorController {
    pub fn new(config: PageConfig, bindings: ChartBindings) -> Self {
        Self {
            threshold: ResponsiveThreshold::from_config(&config),
            affordance: ScrollAffordance::from_config(&config),
            config,
            bindings,
            size_class: None,
        }
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    pub fn bindings(&self) -> &ChartBindings {
        &self.bindings
    }

    /// Size class applied by the most recent render, if any.
    pub fn size_class(&self) -> Option<SizeClass> {
        self.size_class
    }

    /// Apply the font size for `viewport.width` to every binding and return
    /// one plot command per binding.
    pub fn render_commands(&mut self, viewport: &Viewport) -> Vec<PageCommand> {
        let class = self.threshold.classify(viewport.width);
        if self.size_class != Some(class) {
            debug!(
                "viewport width {} selects {:?} fonts",
                viewport.width, class
            );
            self.size_class = Some(class);
        }
        let font_size = self.threshold.font_size(class);

        let mut commands = Vec::with_capacity(self.bindings.len());
        for binding in self.bindings.iter_mut() {
            binding.figure.set_font_size(font_size);
            commands.push(PageCommand::NewPlot {
                container: binding.container.clone(),
                figure: binding.figure.clone(),
                layout: Map::new(),
                config: PlotConfig::default(),
            });
        }
        commands
    }

    pub fn affordance_command(&self, viewport: &Viewport) -> PageCommand {
        PageCommand::SetClass {
            element: self.config.affordance_id.clone(),
            class: self.config.affordance_class.clone(),
            enabled: self.affordance.is_visible(viewport.scroll_y),
        }
    }

    pub fn scroll_to_top_command(&self) -> PageCommand {
        PageCommand::ScrollTo {
            top: 0.0,
            behavior: self.config.scroll_behavior,
        }
    }

    /// Re-plot every chart with the font size for the current width.
    pub fn render_all<H: PageHost + ?Sized>(&mut self, host: &mut H) -> Result<(), HostError> {
        let viewport = host.viewport();
        let commands = self.render_commands(&viewport);
        dispatch(host, commands)
    }

    /// Show or hide the scroll-to-top control for the current offset.
    /// Returns whether it is now visible.
    pub fn update_scroll_affordance<H: PageHost + ?Sized>(
        &self,
        host: &mut H,
    ) -> Result<bool, HostError> {
        let viewport = host.viewport();
        let visible = self.affordance.is_visible(viewport.scroll_y);
        dispatch(host, vec![self.affordance_command(&viewport)])?;
        Ok(visible)
    }

    pub fn scroll_to_top<H: PageHost + ?Sized>(&self, host: &mut H) -> Result<(), HostError> {
        dispatch(host, vec![self.scroll_to_top_command()])
    }

    pub fn handle<H: PageHost + ?Sized>(
        &mut self,
        event: PageEvent,
        host: &mut H,
    ) -> Result<(), HostError> {
        debug!("handling {event:?}");
        match event {
            PageEvent::Load | PageEvent::Resize => self.render_all(host),
            PageEvent::Scroll => self.update_scroll_affordance(host).map(|_| ()),
            PageEvent::AffordanceClick => self.scroll_to_top(host),
        }
    }

    /// Handle every event from `source` in order. Stops at the first host
    /// error.
    pub fn run<S, H>(&mut self, source: &mut S, host: &mut H) -> Result<usize, HostError>
    where
        S: EventSource + ?Sized,
        H: PageHost + ?Sized,
    {
        let mut handled = 0;
        while let Some(event) = source.next_event() {
            self.handle(event, host)?;
            handled += 1;
        }
        Ok(handled)
    }
}

fn dispatch<H: PageHost + ?Sized>(host: &mut H, commands: Vec<PageCommand>) -> Result<(), HostError> {
    for command in &commands {
        trace!("{command:?}");
    }
    host.execute_all(commands)
}
