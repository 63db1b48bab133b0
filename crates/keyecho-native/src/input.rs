//! winit event translation.
//!
//! `NativeEvents` owns the event loop. Each `pump` drains the pending OS
//! events without blocking and queues them as demo events.

use keyecho_core::{Event, EventQueue, EventSource, KeyEvent, Modifiers};
use std::time::Duration;
use winit::application::ApplicationHandler;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{Key, KeyCode, ModifiersState, NamedKey, PhysicalKey};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::platform::scancode::PhysicalKeyExtScancode;
use winit::window::WindowId;

pub struct NativeEvents {
    event_loop: EventLoop<()>,
    collector: Collector,
}

impl NativeEvents {
    /// `collector` may already hold events recorded while the window was
    /// being created.
    pub fn new(event_loop: EventLoop<()>, collector: Collector) -> Self {
        Self {
            event_loop,
            collector,
        }
    }
}

impl EventSource for NativeEvents {
    fn pump(&mut self) {
        let status = self
            .event_loop
            .pump_app_events(Some(Duration::ZERO), &mut self.collector);
        self.collector.on_status(status);
    }

    fn poll_event(&mut self) -> Option<Event> {
        self.collector.queue.poll_event()
    }
}

/// `ApplicationHandler` that only records events.
#[derive(Default)]
pub struct Collector {
    queue: EventQueue,
    tracker: ModifierTracker,
}

impl Collector {
    /// Queue the demo event for a window event.
    pub fn record(&mut self, event: WindowEvent) {
        let event = match event {
            WindowEvent::CloseRequested => Event::Quit,
            WindowEvent::ModifiersChanged(mods) => {
                self.tracker.reconcile(mods.state());
                Event::Other
            }
            WindowEvent::KeyboardInput { event, .. } => Event::Key(translate_key(
                &mut self.tracker,
                event.physical_key,
                &event.logical_key,
                event.text.as_deref(),
                event.state,
                event.repeat,
            )),
            _ => Event::Other,
        };
        self.queue.push(event);
    }

    /// Turn an exited event loop into a quit.
    pub fn on_status(&mut self, status: PumpStatus) {
        if let PumpStatus::Exit(code) = status {
            log::info!("event loop exited with code {code}");
            self.queue.push(Event::Quit);
        }
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}

impl ApplicationHandler for Collector {
    fn resumed(&mut self, _: &ActiveEventLoop) {}

    fn window_event(&mut self, _: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
        self.record(event);
    }
}

// ─── Modifier tracking ───────────────────────────────────────────────────

/// Modifier mask maintained from key presses, so the mask reported with a
/// modifier key already includes (or excludes) that key.
#[derive(Debug, Default, Clone, Copy)]
pub struct ModifierTracker {
    held: Modifiers,
    locks: Modifiers,
}

impl ModifierTracker {
    pub fn current(&self) -> Modifiers {
        self.held | self.locks
    }

    /// Update for a physical key going down or up.
    pub fn apply(&mut self, code: KeyCode, state: ElementState, repeat: bool) {
        let pressed = state.is_pressed();
        match code {
            KeyCode::CapsLock if pressed && !repeat => self.locks.toggle(Modifiers::CAPS),
            KeyCode::NumLock if pressed && !repeat => self.locks.toggle(Modifiers::NUM),
            _ => {
                if let Some(flag) = side_flag(code) {
                    self.held.set(flag, pressed);
                }
            }
        }
    }

    /// Drop held bits the platform says are no longer active (e.g. a key
    /// released while the window was unfocused).
    pub fn reconcile(&mut self, state: ModifiersState) {
        let groups = [
            (Modifiers::SHIFT, state.shift_key()),
            (Modifiers::CTRL, state.control_key()),
            (Modifiers::ALT, state.alt_key()),
            (Modifiers::META, state.super_key()),
        ];
        for (group, active) in groups {
            if !active {
                self.held.remove(group);
            }
        }
    }
}

fn side_flag(code: KeyCode) -> Option<Modifiers> {
    Some(match code {
        KeyCode::ShiftLeft => Modifiers::LSHIFT,
        KeyCode::ShiftRight => Modifiers::RSHIFT,
        KeyCode::ControlLeft => Modifiers::LCTRL,
        KeyCode::ControlRight => Modifiers::RCTRL,
        KeyCode::AltLeft => Modifiers::LALT,
        KeyCode::AltRight => Modifiers::RALT,
        KeyCode::SuperLeft => Modifiers::LMETA,
        KeyCode::SuperRight => Modifiers::RMETA,
        _ => return None,
    })
}

// ─── Key translation ─────────────────────────────────────────────────────

/// Build a demo key event from the parts of a winit `KeyEvent`.
pub fn translate_key(
    tracker: &mut ModifierTracker,
    physical: PhysicalKey,
    logical: &Key,
    text: Option<&str>,
    state: ElementState,
    repeat: bool,
) -> KeyEvent {
    if let PhysicalKey::Code(code) = physical {
        tracker.apply(code, state, repeat);
    }
    let scancode = physical.to_scancode().unwrap_or(0);
    let sym = key_name(physical, logical);
    let modifiers = tracker.current();

    match state {
        ElementState::Pressed => KeyEvent::press(scancode, sym, unicode_of(text), modifiers),
        ElementState::Released => KeyEvent::release(scancode, sym, modifiers),
    }
}

/// First code point of the produced text, or 0 when the key produced none.
pub fn unicode_of(text: Option<&str>) -> u32 {
    text.and_then(|t| t.chars().next()).map_or(0, u32::from)
}

/// Lower-case key names in the style of SDL 1.2 (`"left ctrl"`, `"return"`).
pub fn key_name(physical: PhysicalKey, logical: &Key) -> String {
    if let PhysicalKey::Code(code) = physical
        && let Some(name) = physical_name(code)
    {
        return name.to_string();
    }

    match logical {
        Key::Character(s) => s.to_lowercase(),
        Key::Named(named) => named_key_name(*named),
        Key::Dead(_) => "compose".to_string(),
        Key::Unidentified(_) => "unknown key".to_string(),
    }
}

/// Names that depend on the physical side or are layout-independent.
fn physical_name(code: KeyCode) -> Option<&'static str> {
    Some(match code {
        KeyCode::ShiftLeft => "left shift",
        KeyCode::ShiftRight => "right shift",
        KeyCode::ControlLeft => "left ctrl",
        KeyCode::ControlRight => "right ctrl",
        KeyCode::AltLeft => "left alt",
        KeyCode::AltRight => "right alt",
        KeyCode::SuperLeft => "left super",
        KeyCode::SuperRight => "right super",
        KeyCode::CapsLock => "caps lock",
        KeyCode::NumLock => "numlock",
        KeyCode::ScrollLock => "scroll lock",
        KeyCode::NumpadEnter => "enter",
        _ => return None,
    })
}

fn named_key_name(named: NamedKey) -> String {
    let name = match named {
        NamedKey::Enter => "return",
        NamedKey::Escape => "escape",
        NamedKey::Space => "space",
        NamedKey::Tab => "tab",
        NamedKey::Backspace => "backspace",
        NamedKey::Delete => "delete",
        NamedKey::Insert => "insert",
        NamedKey::Home => "home",
        NamedKey::End => "end",
        NamedKey::PageUp => "page up",
        NamedKey::PageDown => "page down",
        NamedKey::ArrowUp => "up",
        NamedKey::ArrowDown => "down",
        NamedKey::ArrowLeft => "left",
        NamedKey::ArrowRight => "right",
        NamedKey::PrintScreen => "print screen",
        NamedKey::Pause => "pause",
        NamedKey::ContextMenu => "menu",
        NamedKey::F1 => "f1",
        NamedKey::F2 => "f2",
        NamedKey::F3 => "f3",
        NamedKey::F4 => "f4",
        NamedKey::F5 => "f5",
        NamedKey::F6 => "f6",
        NamedKey::F7 => "f7",
        NamedKey::F8 => "f8",
        NamedKey::F9 => "f9",
        NamedKey::F10 => "f10",
        NamedKey::F11 => "f11",
        NamedKey::F12 => "f12",
        other => return format!("{other:?}").to_lowercase(),
    };
    name.to_string()
}
