//! Application state and the per-tick iteration shared by every driver.

use crate::config::DemoConfig;
use crate::dispatch::{EventHandler, RunState, poll_once};
use crate::error::DemoError;
use crate::event::{EventSource, KeyEvent};
use crate::render::Renderer;
use crate::report::report_key;
use crate::surface::Surface;
use std::io::Write;

/// Introductory text printed once at startup. The HTML-significant
/// characters are written verbatim.
pub const INTRO: &str = "you should see a smoothly-colored square - no sharp lines but the square borders!\n\
and here is some text that should be HTML-friendly: amp: |&| double-quote: |\"| quote: |'| less-than, greater-than, html-like tags: |<cheez></cheez>|\n\
another line.\n";

/// Everything the run loop touches, owned in one place.
pub struct App<S, E, W> {
    renderer: Renderer,
    state: RunState,
    surface: S,
    events: E,
    out: W,
}

impl<S, E, W> App<S, E, W>
where
    S: Surface,
    E: EventSource,
    W: Write,
{
    pub fn new(config: &DemoConfig, surface: S, events: E, out: W) -> Self {
        Self {
            renderer: Renderer::new(config.alpha),
            state: RunState::Running,
            surface,
            events,
            out,
        }
    }

    /// Paint the first frame and print the introduction.
    pub fn start(&mut self) -> Result<(), DemoError> {
        self.renderer.repaint(&mut self.surface)?;
        self.out.write_all(INTRO.as_bytes())?;
        self.out.flush()?;
        log::info!("started ({:?} alpha)", self.renderer.alpha_mode());
        Ok(())
    }

    /// One tick: drain all pending events. Key events repaint as a side
    /// effect. Returns the state after the drain.
    pub fn run_one_iteration(&mut self) -> Result<RunState, DemoError> {
        let mut handler = Handler {
            renderer: &mut self.renderer,
            state: &mut self.state,
            surface: &mut self.surface,
            out: &mut self.out,
        };
        poll_once(&mut self.events, &mut handler)?;
        self.out.flush()?;
        Ok(self.state)
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Stop from outside the event stream (host teardown). Like a quit
    /// event, this is irreversible.
    pub fn stop(&mut self) {
        if self.state.is_running() {
            log::info!("stopped by host");
        }
        self.state.stop();
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn events_mut(&mut self) -> &mut E {
        &mut self.events
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    /// Tear down, handing back the log sink.
    pub fn into_output(self) -> W {
        self.out
    }
}

/// Borrowed view of the app fields the dispatcher needs.
struct Handler<'a, S: ?Sized, W: ?Sized> {
    renderer: &'a mut Renderer,
    state: &'a mut RunState,
    surface: &'a mut S,
    out: &'a mut W,
}

impl<S, W> EventHandler for Handler<'_, S, W>
where
    S: Surface + ?Sized,
    W: Write + ?Sized,
{
    fn on_key(&mut self, key: &KeyEvent) -> Result<(), DemoError> {
        report_key(&mut *self.renderer, &mut *self.surface, &mut *self.out, key)
    }

    fn on_quit(&mut self) {
        if self.state.is_running() {
            log::info!("quit requested");
        }
        self.state.stop();
    }
}
