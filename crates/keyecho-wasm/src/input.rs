//! DOM keyboard events → demo events.
//!
//! DOM listeners push into a [`SharedQueue`]; the dispatcher drains it on
//! the next tick.

use keyecho_core::{Event, EventQueue, EventSource, KeyEvent, Modifiers};
use std::cell::RefCell;
use std::rc::Rc;
use web_sys::KeyboardEvent;

const LOCATION_RIGHT: u32 = 2;

/// Event queue shared between DOM callbacks and the run loop.
#[derive(Clone, Default)]
pub struct SharedQueue(Rc<RefCell<EventQueue>>);

impl SharedQueue {
    pub fn push(&self, event: Event) {
        self.0.borrow_mut().push(event);
    }
}

impl EventSource for SharedQueue {
    fn poll_event(&mut self) -> Option<Event> {
        self.0.borrow_mut().poll_event()
    }
}

/// The fields of a DOM `KeyboardEvent` the demo reads.
#[derive(Debug, Clone, Default)]
pub struct DomKey {
    pub key: String,
    pub key_code: u32,
    pub location: u32,
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
    pub caps_lock: bool,
    pub num_lock: bool,
}

impl DomKey {
    pub fn from_event(e: &KeyboardEvent) -> Self {
        Self {
            key: e.key(),
            key_code: e.key_code(),
            location: e.location(),
            shift: e.shift_key(),
            ctrl: e.ctrl_key(),
            alt: e.alt_key(),
            meta: e.meta_key(),
            caps_lock: e.get_modifier_state("CapsLock"),
            num_lock: e.get_modifier_state("NumLock"),
        }
    }

    fn is_right(&self) -> bool {
        self.location == LOCATION_RIGHT
    }
}

/// Remembers which side of each modifier was pressed; DOM flags such as
/// `ctrlKey` do not say.
#[derive(Debug, Default)]
pub struct SideTracker {
    held: Modifiers,
}

impl SideTracker {
    fn apply(&mut self, dom: &DomKey, pressed: bool) {
        let (left, right) = match dom.key.as_str() {
            "Shift" => (Modifiers::LSHIFT, Modifiers::RSHIFT),
            "Control" => (Modifiers::LCTRL, Modifiers::RCTRL),
            "Alt" => (Modifiers::LALT, Modifiers::RALT),
            "AltGraph" => (Modifiers::RALT, Modifiers::RALT),
            "Meta" | "OS" => (Modifiers::LMETA, Modifiers::RMETA),
            _ => return,
        };
        let flag = if dom.is_right() { right } else { left };
        self.held.set(flag, pressed);
    }

    /// Combine DOM modifier flags with the remembered sides. A group that is
    /// active with no known side reports its left key.
    fn compose(&mut self, dom: &DomKey) -> Modifiers {
        let groups = [
            (Modifiers::SHIFT, Modifiers::LSHIFT, dom.shift),
            (Modifiers::CTRL, Modifiers::LCTRL, dom.ctrl),
            (Modifiers::ALT, Modifiers::LALT, dom.alt),
            (Modifiers::META, Modifiers::LMETA, dom.meta),
        ];

        let mut mods = Modifiers::empty();
        for (group, left, active) in groups {
            let sides = self.held & group;
            if !active {
                self.held.remove(group);
            } else if sides.is_empty() {
                mods |= left;
            } else {
                mods |= sides;
            }
        }
        mods.set(Modifiers::CAPS, dom.caps_lock);
        mods.set(Modifiers::NUM, dom.num_lock);
        mods
    }
}

/// Translate a `keydown` (`pressed`) or `keyup` into a demo key event.
pub fn translate_key(tracker: &mut SideTracker, dom: &DomKey, pressed: bool) -> KeyEvent {
    tracker.apply(dom, pressed);
    let modifiers = tracker.compose(dom);
    let sym = dom_key_name(dom);

    if pressed {
        KeyEvent::press(dom.key_code, sym, unicode_of(&dom.key), modifiers)
    } else {
        KeyEvent::release(dom.key_code, sym, modifiers)
    }
}

/// Code point of a single-character `key` value, 0 for named keys.
fn unicode_of(key: &str) -> u32 {
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => u32::from(c),
        _ => 0,
    }
}

/// Lower-case key names in the style of SDL 1.2.
pub fn dom_key_name(dom: &DomKey) -> String {
    let side = if dom.is_right() { "right" } else { "left" };
    let name = match dom.key.as_str() {
        "Shift" => return format!("{side} shift"),
        "Control" => return format!("{side} ctrl"),
        "Alt" => return format!("{side} alt"),
        "Meta" | "OS" => return format!("{side} super"),
        "AltGraph" => "right alt",
        "CapsLock" => "caps lock",
        "NumLock" => "numlock",
        "ScrollLock" => "scroll lock",
        "Enter" => "return",
        " " => "space",
        "ArrowUp" => "up",
        "ArrowDown" => "down",
        "ArrowLeft" => "left",
        "ArrowRight" => "right",
        "PageUp" => "page up",
        "PageDown" => "page down",
        "PrintScreen" => "print screen",
        "ContextMenu" => "menu",
        "Dead" => "compose",
        "Unidentified" | "" => "unknown key",
        other => return other.to_lowercase(),
    };
    name.to_string()
}
