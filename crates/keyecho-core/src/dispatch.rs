//! Event dispatcher: drains the event source once per iteration.

use crate::error::DemoError;
use crate::event::{Event, EventSource, KeyEvent};

/// Lifecycle of the run loop. `Stopped` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Running,
    Stopped,
}

impl RunState {
    pub fn is_running(self) -> bool {
        self == Self::Running
    }

    /// Enter `Stopped`. There is no way back.
    pub fn stop(&mut self) {
        *self = Self::Stopped;
    }
}

/// Receives classified events from [`poll_once`].
pub trait EventHandler {
    fn on_key(&mut self, key: &KeyEvent) -> Result<(), DemoError>;

    fn on_quit(&mut self);
}

/// Drain every currently queued event, routing keys and quits to `handler`.
///
/// Never blocks: returns as soon as the source reports an empty queue.
/// Returns the number of events taken from the queue.
pub fn poll_once<E, H>(events: &mut E, handler: &mut H) -> Result<usize, DemoError>
where
    E: EventSource + ?Sized,
    H: EventHandler + ?Sized,
{
    events.pump();

    let mut drained = 0;
    while let Some(event) = events.poll_event() {
        drained += 1;
        match event {
            Event::Key(key) => handler.on_key(&key)?,
            Event::Quit => handler.on_quit(),
            Event::Other => log::trace!("ignoring non-keyboard event"),
        }
    }
    Ok(drained)
}
