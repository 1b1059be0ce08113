//! Browser host: binds an [`EngineCore`] to a Plotly graph div.
//!
//! Event closures only translate Plotly and DOM events into core calls, then
//! apply the returned [`Action`]s. The core lives in an `Rc<RefCell<_>>`
//! shared by those closures; it is never borrowed while actions are applied,
//! so an action may safely call back into the core.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Array, Function, JSON, Object, Promise, Reflect};
use log::{debug, error, warn};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::{JsCast, closure::Closure};
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{HtmlElement, MouseEvent};

use crate::axis::{AxisMapper, Viewport};
use crate::config::SceneConfig;
use crate::engine::{Action, EngineCore};
use crate::error::PlotError;
use crate::geometry::Point;
use crate::hit::ClickEvent;
use crate::relayout::RelayoutEvent;
use crate::render::{SceneFrame, plot_spec};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = Plotly, js_name = newPlot, catch)]
    fn new_plot(root: &HtmlElement, data: &JsValue, layout: &JsValue, config: &JsValue) -> Result<Promise, JsValue>;

    #[wasm_bindgen(js_namespace = Plotly, catch)]
    fn redraw(root: &HtmlElement) -> Result<Promise, JsValue>;

    #[wasm_bindgen(js_namespace = Plotly, catch)]
    fn relayout(root: &HtmlElement, update: &JsValue) -> Result<Promise, JsValue>;

    #[wasm_bindgen(js_namespace = Plotly, catch)]
    fn purge(root: &HtmlElement) -> Result<JsValue, JsValue>;
}

fn surface_error(err: JsValue) -> PlotError {
    PlotError::Surface(format!("{err:?}"))
}

impl From<PlotError> for JsValue {
    fn from(err: PlotError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}

fn get(target: &JsValue, key: &str) -> Result<JsValue, PlotError> {
    Reflect::get(target, &JsValue::from_str(key)).map_err(surface_error)
}

fn set(target: &JsValue, key: &str, value: &JsValue) -> Result<(), PlotError> {
    Reflect::set(target, &JsValue::from_str(key), value).map_err(surface_error)?;
    Ok(())
}

fn item(list: &JsValue, index: usize) -> Result<JsValue, PlotError> {
    let list: &Array = list
        .dyn_ref()
        .ok_or_else(|| PlotError::Surface(format!("expected an array around index {index}")))?;
    let key = u32::try_from(index).map_err(|_| PlotError::Surface(format!("index {index} out of range")))?;
    Ok(list.get(key))
}

fn number(target: &JsValue, key: &str) -> Result<f64, PlotError> {
    get(target, key)?
        .as_f64()
        .ok_or_else(|| PlotError::Surface(format!("`{key}` is not a number")))
}

/// Hand a Rust value to JS through `JSON.parse`.
fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, PlotError> {
    let json = serde_json::to_string(value)?;
    JSON::parse(&json).map_err(surface_error)
}

/// Read a flat JS object back through `JSON.stringify`.
fn to_json(value: &JsValue) -> Result<String, PlotError> {
    Ok(JSON::stringify(value).map_err(surface_error)?.into())
}

/// Log a rejected promise without blocking the caller.
fn settle(promise: Promise, what: &'static str) {
    spawn_local(async move {
        if let Err(err) = JsFuture::from(promise).await {
            warn!("web: {what} rejected: {err:?}");
        }
    });
}

// =============================================================
// Axes
// =============================================================

/// One live Plotly axis (`_fullLayout.xaxis` / `yaxis`).
///
/// Ranges are read on every call so pans show up without a new snapshot.
/// `fallback` is the range seen when the axis was wrapped.
struct PlotlyAxis {
    axis: JsValue,
    fallback: [f64; 2],
}

impl PlotlyAxis {
    fn from_layout(root: &HtmlElement, name: &str) -> Result<Self, PlotError> {
        let layout = get(root, "_fullLayout")?;
        if layout.is_undefined() {
            return Err(PlotError::NotMounted);
        }
        let axis = get(&layout, name)?;
        if axis.is_undefined() {
            return Err(PlotError::Surface(format!("layout has no `{name}`")));
        }
        let fallback = read_range(&axis)?;
        Ok(Self { axis, fallback })
    }

    fn p2l(&self, px: f64) -> Result<f64, PlotError> {
        let offset = number(&self.axis, "_offset")?;
        let p2l: Function = get(&self.axis, "p2l")?
            .dyn_into()
            .map_err(|_| PlotError::Surface("axis has no p2l".into()))?;
        p2l.call1(&self.axis, &JsValue::from_f64(px - offset))
            .map_err(surface_error)?
            .as_f64()
            .ok_or_else(|| PlotError::Surface("p2l returned a non-number".into()))
    }
}

fn read_range(axis: &JsValue) -> Result<[f64; 2], PlotError> {
    let range: Array = get(axis, "range")?
        .dyn_into()
        .map_err(|_| PlotError::Surface("axis range is not an array".into()))?;
    match (range.get(0).as_f64(), range.get(1).as_f64()) {
        (Some(min), Some(max)) => Ok([min, max]),
        _ => Err(PlotError::Surface("axis range is not numeric".into())),
    }
}

impl AxisMapper for PlotlyAxis {
    fn range(&self) -> [f64; 2] {
        match read_range(&self.axis) {
            Ok(range) => range,
            Err(err) => {
                warn!("web: {err}");
                self.fallback
            }
        }
    }

    fn pixel_to_data(&self, px: f64) -> f64 {
        match self.p2l(px) {
            Ok(value) => value,
            Err(err) => {
                warn!("web: {err}");
                f64::NAN
            }
        }
    }
}

// =============================================================
// Host
// =============================================================

/// Everything the event closures share.
#[derive(Clone)]
struct Host {
    root: HtmlElement,
    core: Rc<RefCell<EngineCore>>,
    on_controls: Rc<RefCell<Option<Function>>>,
}

impl Host {
    fn viewport(&self) -> Result<Viewport, PlotError> {
        Ok(Viewport::new(
            PlotlyAxis::from_layout(&self.root, "xaxis")?,
            PlotlyAxis::from_layout(&self.root, "yaxis")?,
        ))
    }

    fn apply(&self, actions: Vec<Action>) {
        for action in actions {
            if let Err(err) = self.apply_one(action) {
                error!("web: {err}");
            }
        }
    }

    fn apply_one(&self, action: Action) -> Result<(), PlotError> {
        match action {
            Action::Redraw(frame) => {
                self.write_frame(&frame)?;
                settle(redraw(&self.root).map_err(surface_error)?, "redraw");
            }
            Action::Relayout(correction) => {
                let promise = relayout(&self.root, &to_js(&correction.to_update())?).map_err(surface_error)?;
                let host = self.clone();
                spawn_local(async move {
                    if let Err(err) = JsFuture::from(promise).await {
                        warn!("web: relayout rejected: {err:?}");
                        return;
                    }
                    match host.viewport() {
                        Ok(viewport) => {
                            let actions = host.core.borrow_mut().on_relayout_complete(viewport);
                            host.apply(actions);
                        }
                        Err(err) => error!("web: {err}"),
                    }
                });
            }
            Action::RequestFrame => self.request_frame(),
            Action::ControlsChanged { angles, arc } => {
                // The callback may re-enter the engine and register a new callback.
                let callback = self.on_controls.borrow().clone();
                if let Some(callback) = callback {
                    let angles: Array = angles.iter().map(|a| JsValue::from_f64(*a)).collect();
                    callback
                        .call2(&JsValue::NULL, &angles, &JsValue::from_f64(arc))
                        .map_err(surface_error)?;
                }
            }
            Action::SetCursor(cursor) => {
                self.root.style().set_property("cursor", &cursor).map_err(surface_error)?;
            }
        }
        Ok(())
    }

    /// Copy a frame into the live plot's traces and shapes.
    fn write_frame(&self, frame: &SceneFrame) -> Result<(), PlotError> {
        let data = get(&self.root, "data")?;
        for (index, series) in frame.traces() {
            let trace = item(&data, index)?;
            set(&trace, "x", &to_js(&series.x)?)?;
            set(&trace, "y", &to_js(&series.y)?)?;
        }
        let shapes = get(&get(&self.root, "layout")?, "shapes")?;
        for (index, path) in frame.shape_paths() {
            let shape = item(&shapes, index)?;
            set(&shape, "path", &JsValue::from_str(&path.to_string()))?;
        }
        Ok(())
    }

    fn request_frame(&self) {
        let Some(window) = web_sys::window() else {
            self.run_frame();
            return;
        };

        let host = self.clone();
        let holder: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
        let holder_for_cb = Rc::clone(&holder);
        let cb = Closure::wrap(Box::new(move |_ts: f64| {
            host.run_frame();
            holder_for_cb.borrow_mut().take();
        }) as Box<dyn FnMut(f64)>);

        if window.request_animation_frame(cb.as_ref().unchecked_ref()).is_ok() {
            *holder.borrow_mut() = Some(cb);
        } else {
            self.run_frame();
        }
    }

    fn run_frame(&self) {
        let actions = self.core.borrow_mut().on_animation_frame();
        self.apply(actions);
    }

    // --- Event translation ---

    fn handle_click(&self, data: &JsValue) -> Result<(), PlotError> {
        let event = click_event(data)?;
        let viewport = self.viewport()?;
        let actions = self.core.borrow_mut().on_click(&event, viewport);
        self.apply(actions);
        Ok(())
    }

    fn handle_relayout(&self, data: &JsValue) -> Result<(), PlotError> {
        let event = RelayoutEvent::from_json(&to_json(data)?)?;
        let viewport = self.viewport()?;
        let actions = self.core.borrow_mut().on_relayout(&event, viewport);
        self.apply(actions);
        Ok(())
    }

    fn handle_mouse_move(&self, event: &MouseEvent) {
        let rect = self.root.get_bounding_client_rect();
        let px = Point::new(f64::from(event.client_x()) - rect.left(), f64::from(event.client_y()) - rect.top());
        let actions = self.core.borrow_mut().on_pointer_move(px);
        self.apply(actions);
    }

    fn handle_mouse_up(&self) {
        let actions = self.core.borrow_mut().on_release();
        self.apply(actions);
    }
}

/// Pull `curveNumber`/`pointIndex` out of a Plotly click payload.
///
/// The payload's points reference the full trace and figure, which cannot be
/// stringified, so only the two needed fields are copied over.
fn click_event(data: &JsValue) -> Result<ClickEvent, PlotError> {
    let points: Array = get(data, "points")?
        .dyn_into()
        .map_err(|_| PlotError::Surface("click payload has no points".into()))?;
    let picked = Array::new();
    for point in points.iter() {
        let flat = Object::new();
        for key in ["curveNumber", "pointIndex"] {
            set(&flat, key, &get(&point, key)?)?;
        }
        picked.push(&flat);
    }
    let wrapper = Object::new();
    set(&wrapper, "points", &picked)?;
    Ok(serde_json::from_str(&to_json(&wrapper)?)?)
}

fn init_logging(config: &SceneConfig) -> Result<(), PlotError> {
    console_error_panic_hook::set_once();
    if let Some(level) = config.level_filter()?.to_level() {
        if let Err(err) = console_log::init_with_level(level) {
            debug!("web: logger already installed: {err}");
        }
    }
    Ok(())
}

// =============================================================
// Engine
// =============================================================

/// Closures kept alive for as long as the plot is mounted.
struct Listeners {
    _click: Closure<dyn FnMut(JsValue)>,
    _relayout: Closure<dyn FnMut(JsValue)>,
    mouse_move: Closure<dyn FnMut(MouseEvent)>,
    mouse_up: Closure<dyn FnMut(MouseEvent)>,
}

/// The interactive plot, mounted into one container element.
#[wasm_bindgen]
pub struct Engine {
    host: Host,
    listeners: Listeners,
}

#[wasm_bindgen]
impl Engine {
    /// Create the plot inside `container` and wire its events.
    ///
    /// `config_json` is a (possibly empty) JSON `SceneConfig`.
    ///
    /// # Errors
    ///
    /// Rejects on an invalid config or when Plotly fails to create the plot.
    pub async fn mount(container: HtmlElement, config_json: String) -> Result<Engine, JsValue> {
        let config = SceneConfig::from_json(&config_json).map_err(PlotError::from)?;
        init_logging(&config)?;

        let spec = plot_spec(&config);
        let promise = new_plot(&container, &to_js(&spec.data)?, &to_js(&spec.layout)?, &to_js(&spec.config)?)
            .map_err(surface_error)?;
        JsFuture::from(promise).await.map_err(surface_error)?;

        let host = Host {
            root: container,
            core: Rc::new(RefCell::new(EngineCore::new(config))),
            on_controls: Rc::new(RefCell::new(None)),
        };
        let viewport = host.viewport()?;
        let actions = host.core.borrow_mut().on_plot_ready(viewport);
        host.apply(actions);

        let listeners = subscribe(&host)?;
        debug!("web: plot mounted");
        Ok(Engine { host, listeners })
    }

    /// Register `callback(angles, arc)`, called whenever the scene changes.
    ///
    /// Called once right away with the current values.
    pub fn on_controls(&self, callback: Function) {
        *self.host.on_controls.borrow_mut() = Some(callback);
        let (angles, arc) = {
            let core = self.host.core.borrow();
            (core.angles(), core.arc_coordinate())
        };
        self.host.apply(vec![Action::ControlsChanged { angles, arc }]);
    }

    /// Numeric angle input for ray `index`, in degrees.
    pub fn set_ray_angle(&self, index: usize, deg: f64) {
        let actions = self.host.core.borrow_mut().set_ray_angle(index, deg);
        self.host.apply(actions);
    }

    /// Numeric radius input for the arc.
    pub fn set_arc_coordinate(&self, value: f64) {
        let actions = self.host.core.borrow_mut().set_arc_coordinate(value);
        self.host.apply(actions);
    }

    /// Current ray angles in degrees.
    #[must_use]
    pub fn angles(&self) -> Vec<f64> {
        self.host.core.borrow().angles().to_vec()
    }

    /// Current arc radius.
    #[must_use]
    pub fn arc_coordinate(&self) -> f64 {
        self.host.core.borrow().arc_coordinate()
    }
}

fn subscribe(host: &Host) -> Result<Listeners, PlotError> {
    let click = {
        let host = host.clone();
        Closure::wrap(Box::new(move |data: JsValue| {
            if let Err(err) = host.handle_click(&data) {
                warn!("web: ignoring click: {err}");
            }
        }) as Box<dyn FnMut(JsValue)>)
    };
    let relayout = {
        let host = host.clone();
        Closure::wrap(Box::new(move |data: JsValue| {
            if let Err(err) = host.handle_relayout(&data) {
                warn!("web: ignoring relayout: {err}");
            }
        }) as Box<dyn FnMut(JsValue)>)
    };
    let mouse_move = {
        let host = host.clone();
        Closure::wrap(Box::new(move |event: MouseEvent| host.handle_mouse_move(&event)) as Box<dyn FnMut(MouseEvent)>)
    };
    let mouse_up = {
        let host = host.clone();
        Closure::wrap(Box::new(move |_event: MouseEvent| host.handle_mouse_up()) as Box<dyn FnMut(MouseEvent)>)
    };

    let on: Function = get(&host.root, "on")?
        .dyn_into()
        .map_err(|_| PlotError::Surface("graph div has no `on`".into()))?;
    on.call2(&host.root, &JsValue::from_str("plotly_click"), click.as_ref())
        .map_err(surface_error)?;
    on.call2(&host.root, &JsValue::from_str("plotly_relayout"), relayout.as_ref())
        .map_err(surface_error)?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| PlotError::Surface("no document".into()))?;
    document
        .add_event_listener_with_callback("mousemove", mouse_move.as_ref().unchecked_ref())
        .map_err(surface_error)?;
    document
        .add_event_listener_with_callback("mouseup", mouse_up.as_ref().unchecked_ref())
        .map_err(surface_error)?;

    Ok(Listeners { _click: click, _relayout: relayout, mouse_move, mouse_up })
}

impl Drop for Engine {
    fn drop(&mut self) {
        if let Some(document) = web_sys::window().and_then(|w| w.document()) {
            for (kind, cb) in [("mousemove", &self.listeners.mouse_move), ("mouseup", &self.listeners.mouse_up)] {
                if let Err(err) = document.remove_event_listener_with_callback(kind, cb.as_ref().unchecked_ref()) {
                    warn!("web: removing {kind} listener: {err:?}");
                }
            }
        }
        // Drops the plot's click/relayout handlers before their closures go away.
        if let Err(err) = purge(&self.host.root) {
            warn!("web: purge failed: {err:?}");
        }
    }
}
