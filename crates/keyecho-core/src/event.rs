//! Input events and the event-source seam hosts implement.

use std::collections::VecDeque;

bitflags::bitflags! {
    /// Active modifier keys, laid out like the SDL 1.2 `SDLMod` mask.
    ///
    /// The combined `CTRL`/`SHIFT`/`ALT`/`META` flags cover both sides, so a
    /// single left-control press intersects both `LCTRL` and `CTRL`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u16 {
        const LSHIFT = 0x0001;
        const RSHIFT = 0x0002;
        const LCTRL  = 0x0040;
        const RCTRL  = 0x0080;
        const LALT   = 0x0100;
        const RALT   = 0x0200;
        const LMETA  = 0x0400;
        const RMETA  = 0x0800;
        const NUM    = 0x1000;
        const CAPS   = 0x2000;
        const MODE   = 0x4000;

        const CTRL  = Self::LCTRL.bits() | Self::RCTRL.bits();
        const SHIFT = Self::LSHIFT.bits() | Self::RSHIFT.bits();
        const ALT   = Self::LALT.bits() | Self::RALT.bits();
        const META  = Self::LMETA.bits() | Self::RMETA.bits();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDirection {
    Press,
    Release,
}

/// One key press or release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    pub direction: KeyDirection,
    /// Hardware scan code.
    pub scancode: u32,
    /// Symbolic key name as resolved by the platform (e.g. `"a"`, `"left ctrl"`).
    pub sym: String,
    /// Unicode code point produced by the key. Only meaningful on press.
    pub unicode: u32,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn press(scancode: u32, sym: impl Into<String>, unicode: u32, modifiers: Modifiers) -> Self {
        Self {
            direction: KeyDirection::Press,
            scancode,
            sym: sym.into(),
            unicode,
            modifiers,
        }
    }

    /// Release events carry no character.
    pub fn release(scancode: u32, sym: impl Into<String>, modifiers: Modifiers) -> Self {
        Self {
            direction: KeyDirection::Release,
            scancode,
            sym: sym.into(),
            unicode: 0,
            modifiers,
        }
    }

    pub fn is_press(&self) -> bool {
        self.direction == KeyDirection::Press
    }
}

/// An event pulled from the platform queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Key(KeyEvent),
    /// The window was closed or the page is going away.
    Quit,
    /// Anything the demo does not react to (mouse, focus, resize...).
    Other,
}

/// Non-blocking source of platform events.
pub trait EventSource {
    /// Move newly arrived platform events into the queue. Called once at
    /// the start of every dispatch pass.
    fn pump(&mut self) {}

    /// Take the next queued event, or `None` when the queue is empty.
    fn poll_event(&mut self) -> Option<Event>;
}

/// FIFO event source. Used directly by hosts that receive events through
/// callbacks, and by tests to script input.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: VecDeque<Event>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: Event) {
        self.events.push_back(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl FromIterator<Event> for EventQueue {
    fn from_iter<I: IntoIterator<Item = Event>>(iter: I) -> Self {
        Self {
            events: iter.into_iter().collect(),
        }
    }
}

impl EventSource for EventQueue {
    fn poll_event(&mut self) -> Option<Event> {
        self.events.pop_front()
    }
}
