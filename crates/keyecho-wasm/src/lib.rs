//! WASM bridge for keyecho — runs the gradient/key-log demo in a browser.
//!
//! Compiled via `wasm-pack build --target web`. The page calls
//! `KeyEchoApp.start("canvas-id", configJson)`; key events go to
//! `console.log` in the same format the desktop host prints to stdout.

mod console;
mod input;
mod surface;

use input::{DomKey, SharedQueue, SideTracker, translate_key};
use keyecho_core::{App, DemoConfig, DemoError, Event, RunState};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use surface::{CanvasSurface, js_error};
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, KeyboardEvent};

type BrowserApp = App<CanvasSurface, SharedQueue, console::ConsoleWriter>;

/// A running demo. Dropping it (or calling `stop`) detaches every listener
/// and timer.
#[wasm_bindgen]
pub struct KeyEchoApp {
    app: Rc<RefCell<BrowserApp>>,
    queue: SharedQueue,
    interval: Rc<Cell<Option<i32>>>,
    _tick: Closure<dyn FnMut()>,
    keydown: Closure<dyn FnMut(KeyboardEvent)>,
    keyup: Closure<dyn FnMut(KeyboardEvent)>,
    pagehide: Closure<dyn FnMut(web_sys::Event)>,
}

#[wasm_bindgen]
impl KeyEchoApp {
    /// Attach to the canvas with id `canvas_id` and start the run loop.
    ///
    /// `config_json` may be empty or a partial object such as
    /// `{"alpha":"opaque","driver":{"kind":"polling","delay_ms":500}}`.
    pub fn start(canvas_id: &str, config_json: &str) -> Result<KeyEchoApp, JsValue> {
        console::install_panic_hook();
        console::init_logging(log::LevelFilter::Info);
        Self::try_start(canvas_id, config_json).map_err(|e| {
            log::error!("{e}");
            JsValue::from_str(&e.to_string())
        })
    }

    /// Queue a quit, as if the page were being hidden.
    pub fn request_quit(&self) {
        self.queue.push(Event::Quit);
    }

    /// Whether the run loop is still ticking.
    pub fn is_running(&self) -> bool {
        self.app.borrow().state().is_running()
    }

    /// Number of full-surface repaints so far.
    pub fn repaint_count(&self) -> f64 {
        self.app.borrow().renderer().repaint_count() as f64
    }

    /// Stop ticking immediately. `is_running` reports `false` afterwards.
    pub fn stop(&self) {
        stop_app(&self.app, &self.interval);
    }
}

impl KeyEchoApp {
    fn try_start(canvas_id: &str, config_json: &str) -> Result<Self, DemoError> {
        let config = parse_config(config_json)?;
        let window = web_sys::window().ok_or_else(|| DemoError::InitFailure("no window".into()))?;
        let canvas = window
            .document()
            .and_then(|doc| doc.get_element_by_id(canvas_id))
            .ok_or_else(|| DemoError::InitFailure(format!("no element with id '{canvas_id}'")))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| DemoError::InitFailure(format!("'{canvas_id}' is not a canvas")))?;

        let surface = CanvasSurface::new(&canvas, config.lock_options())?;
        let queue = SharedQueue::default();
        let mut app = App::new(&config, surface, queue.clone(), console::ConsoleWriter::new());
        app.start()?;
        let app = Rc::new(RefCell::new(app));

        let tracker = Rc::new(RefCell::new(SideTracker::default()));
        let keydown = key_listener(&queue, &tracker, true);
        let keyup = key_listener(&queue, &tracker, false);
        let pagehide = {
            let queue = queue.clone();
            Closure::<dyn FnMut(web_sys::Event)>::new(move |_| queue.push(Event::Quit))
        };
        let init_err = |e: JsValue| DemoError::InitFailure(js_error(&e));
        window
            .add_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref())
            .map_err(init_err)?;
        window
            .add_event_listener_with_callback("keyup", keyup.as_ref().unchecked_ref())
            .map_err(init_err)?;
        window
            .add_event_listener_with_callback("pagehide", pagehide.as_ref().unchecked_ref())
            .map_err(init_err)?;

        let interval = Rc::new(Cell::new(None));
        let tick = {
            let app = app.clone();
            let interval = interval.clone();
            Closure::<dyn FnMut()>::new(move || {
                let result = app.borrow_mut().run_one_iteration();
                match result {
                    Ok(RunState::Running) => {}
                    Ok(RunState::Stopped) => clear_interval(&interval),
                    Err(e) => {
                        log::error!("{e}");
                        clear_interval(&interval);
                    }
                }
            })
        };
        let period_ms = config.driver.period().as_millis().clamp(1, i32::MAX as u128) as i32;
        let id = window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                tick.as_ref().unchecked_ref(),
                period_ms,
            )
            .map_err(init_err)?;
        interval.set(Some(id));
        log::info!("ticking every {period_ms} ms ({:?})", config.driver);

        Ok(Self {
            app,
            queue,
            interval,
            _tick: tick,
            keydown,
            keyup,
            pagehide,
        })
    }
}

impl Drop for KeyEchoApp {
    fn drop(&mut self) {
        clear_interval(&self.interval);
        if let Some(window) = web_sys::window() {
            let listeners: [(&str, &JsValue); 3] = [
                ("keydown", self.keydown.as_ref()),
                ("keyup", self.keyup.as_ref()),
                ("pagehide", self.pagehide.as_ref()),
            ];
            for (name, callback) in listeners {
                let _ = window.remove_event_listener_with_callback(name, callback.unchecked_ref());
            }
        }
    }
}

fn key_listener(
    queue: &SharedQueue,
    tracker: &Rc<RefCell<SideTracker>>,
    pressed: bool,
) -> Closure<dyn FnMut(KeyboardEvent)> {
    let queue = queue.clone();
    let tracker = tracker.clone();
    Closure::<dyn FnMut(KeyboardEvent)>::new(move |e: KeyboardEvent| {
        let dom = DomKey::from_event(&e);
        let key = translate_key(&mut tracker.borrow_mut(), &dom, pressed);
        queue.push(Event::Key(key));
    })
}

fn stop_app(app: &RefCell<BrowserApp>, interval: &Cell<Option<i32>>) {
    clear_interval(interval);
    if let Ok(mut app) = app.try_borrow_mut() {
        app.stop();
    }
}

fn clear_interval(interval: &Cell<Option<i32>>) {
    if let Some(id) = interval.take()
        && let Some(window) = web_sys::window()
    {
        window.clear_interval_with_handle(id);
        log::info!("run loop stopped");
    }
}

fn parse_config(json: &str) -> Result<DemoConfig, DemoError> {
    if json.trim().is_empty() {
        return Ok(DemoConfig::default());
    }
    serde_json::from_str(json).map_err(|e| DemoError::InvalidConfig(e.to_string()))
}

// ─── Standalone helpers (no canvas needed) ───────────────────────────────

/// Validate a config object. Returns JSON: `{"ok":true}` or `{"ok":false,"error":"..."}`.
#[wasm_bindgen]
pub fn validate_config(json: &str) -> String {
    match parse_config(json) {
        Ok(_) => r#"{"ok":true}"#.to_string(),
        Err(e) => serde_json::json!({ "ok": false, "error": e.to_string() }).to_string(),
    }
}
