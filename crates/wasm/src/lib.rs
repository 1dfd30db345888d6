use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, error, info};
use plotpage_core::{
    BindingError, ChartBindings, HostError, PageBehaviorController, PageConfig, PageEvent,
    PageHost,
};
use plotpage_protocol::{Figure, PageCommand, ScrollBehavior, Viewport};
use serde::Serialize;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

/// Install the panic hook and route `log` to the browser console.
fn init_logging() {
    #[cfg(target_arch = "wasm32")]
    {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            debug!("console logger already installed");
        }
    }
}

/// Wire the page up: bind the injected chart payloads, subscribe the chart
/// re-plot to `load` and `resize`, then wire the scroll-to-top control
/// (`click` on it, `scroll` on the window).
///
/// `config_json` overrides the defaults (768px breakpoint, 250px threshold,
/// `#scrollToTop.visible`, the four rainfall charts). Every configured chart
/// must have its `graphs_<name>` global. A missing control fails `start`
/// only after the charts are wired, so they still render.
#[wasm_bindgen]
pub fn start(config_json: Option<String>) -> Result<(), JsError> {
    init_logging();

    let config = match config_json {
        Some(json) => PageConfig::from_json(json.as_bytes())?,
        None => PageConfig::default(),
    };
    let window = web_sys::window().ok_or_else(|| JsError::new("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsError::new("no document"))?;

    let names = config.charts.iter().map(String::as_str);
    let bindings = ChartBindings::from_globals(names, |global| injected_figure(&window, global))?;
    info!("plotpage: {} chart(s) bound", bindings.len());

    let page = Rc::new(Page {
        controller: RefCell::new(PageBehaviorController::new(config, bindings)),
        host: RefCell::new(WebHost {
            window: window.clone(),
            document: document.clone(),
        }),
    });

    for event in PageEvent::RENDER {
        listen(window.as_ref(), event, &page)?;
    }
    // The module usually finishes loading after `load` has fired.
    let ready_state = js_sys::Reflect::get(&document, &JsValue::from_str("readyState"))
        .ok()
        .and_then(|v| v.as_string());
    if ready_state.as_deref() == Some("complete") {
        page.dispatch(PageEvent::Load);
    }

    let affordance_id = page.controller.borrow().config().affordance_id.clone();
    let affordance = document
        .get_element_by_id(&affordance_id)
        .ok_or_else(|| JsError::new(&format!("no element with id '{affordance_id}'")))?;
    for event in PageEvent::AFFORDANCE {
        let target: &web_sys::EventTarget = match event {
            PageEvent::AffordanceClick => affordance.as_ref(),
            _ => window.as_ref(),
        };
        listen(target, event, &page)?;
    }
    Ok(())
}

/// Read one injected payload global. Payloads may be objects or JSON
/// strings; `undefined` and `null` count as absent.
fn injected_figure(
    window: &web_sys::Window,
    global: &str,
) -> Result<Option<Figure>, BindingError> {
    let invalid = |message: String| BindingError::Payload {
        global: format!("window.{global}"),
        message,
    };
    let value = js_sys::Reflect::get(window, &JsValue::from_str(global))
        .map_err(|e| invalid(describe(&e)))?;
    if value.is_undefined() || value.is_null() {
        return Ok(None);
    }
    let figure = match value.as_string() {
        Some(json) => serde_json::from_str(&json).map_err(|e| invalid(e.to_string()))?,
        None => serde_wasm_bindgen::from_value(value).map_err(|e| invalid(e.to_string()))?,
    };
    Ok(Some(figure))
}

/// `Plotly.newPlot(id, figure, layout, config)` from the page's plotly.js.
fn new_plot(
    window: &web_sys::Window,
    container: &str,
    figure: &JsValue,
    layout: &JsValue,
    config: &JsValue,
) -> Result<JsValue, JsValue> {
    let plotly = js_sys::Reflect::get(window, &JsValue::from_str("Plotly"))?;
    let new_plot: js_sys::Function =
        js_sys::Reflect::get(&plotly, &JsValue::from_str("newPlot"))?.dyn_into()?;
    let args = js_sys::Array::of4(&JsValue::from_str(container), figure, layout, config);
    new_plot.apply(&plotly, &args)
}

struct Page {
    controller: RefCell<PageBehaviorController>,
    host: RefCell<WebHost>,
}

impl Page {
    /// Handle one event. A host failure is logged and rethrown into JS as
    /// an uncaught exception.
    fn dispatch(&self, event: PageEvent) {
        let result = {
            let (Ok(mut controller), Ok(mut host)) =
                (self.controller.try_borrow_mut(), self.host.try_borrow_mut())
            else {
                debug!("ignoring re-entrant {} event", event.dom_type());
                return;
            };
            controller.handle(event, &mut *host)
        };
        // Borrows are released before throwing: the throw skips destructors.
        if let Err(err) = result {
            error!("{} handler failed: {err}", event.dom_type());
            wasm_bindgen::throw_str(&err.to_string());
        }
    }
}

fn listen(
    target: &web_sys::EventTarget,
    event: PageEvent,
    page: &Rc<Page>,
) -> Result<(), JsError> {
    let page = Rc::clone(page);
    let callback = Closure::<dyn FnMut()>::new(move || page.dispatch(event));
    target
        .add_event_listener_with_callback(event.dom_type(), callback.as_ref().unchecked_ref())
        .map_err(|e| JsError::new(&describe(&e)))?;
    // Listeners live as long as the page.
    callback.forget();
    Ok(())
}

/// `PageHost` over the live DOM and plotly.js.
struct WebHost {
    window: web_sys::Window,
    document: web_sys::Document,
}

impl PageHost for WebHost {
    fn viewport(&self) -> Viewport {
        // An unreadable width is NaN, which selects the regular font size.
        let width = self
            .window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(f64::NAN);
        let scroll_y = self.window.scroll_y().unwrap_or(0.0);
        Viewport::new(width, scroll_y)
    }

    fn execute(&mut self, command: PageCommand) -> Result<(), HostError> {
        match command {
            PageCommand::NewPlot {
                container,
                figure,
                layout,
                config,
            } => {
                let figure = to_js(&figure)?;
                let layout = to_js(&layout)?;
                let config = to_js(&config)?;
                new_plot(&self.window, &container, &figure, &layout, &config).map_err(|e| {
                    HostError::Plot {
                        container: container.clone(),
                        message: describe(&e),
                    }
                })?;
            }
            PageCommand::SetClass {
                element,
                class,
                enabled,
            } => {
                let node = self
                    .document
                    .get_element_by_id(&element)
                    .ok_or_else(|| HostError::MissingElement(element.clone()))?;
                let classes = node.class_list();
                let toggled = if enabled {
                    classes.add_1(&class)
                } else {
                    classes.remove_1(&class)
                };
                toggled.map_err(|e| HostError::Script(describe(&e)))?;
            }
            PageCommand::ScrollTo { top, behavior } => {
                let options = web_sys::ScrollToOptions::new();
                options.set_top(top);
                options.set_behavior(match behavior {
                    ScrollBehavior::Smooth => web_sys::ScrollBehavior::Smooth,
                    ScrollBehavior::Instant => web_sys::ScrollBehavior::Instant,
                    ScrollBehavior::Auto => web_sys::ScrollBehavior::Auto,
                });
                self.window.scroll_to_with_scroll_to_options(&options);
            }
        }
        Ok(())
    }
}

/// Serialize to a plain JS object (maps become objects, not `Map`s).
fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, HostError> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| HostError::Script(e.to_string()))
}

fn describe(value: &JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}
