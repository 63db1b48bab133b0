//! Integration tests: app start, event dispatch, and drivers end to end.

use keyecho_core::{
    AlphaMode, App, DemoConfig, Event, EventQueue, EventSource, INTRO, KeyEvent, LoopDriver,
    MemorySurface, Modifiers, PixelFormat, RunState, SURFACE_SIZE, Surface, run_blocking,
};
use pretty_assertions::assert_eq;
use std::time::Duration;

type TestApp = App<MemorySurface, EventQueue, Vec<u8>>;

fn make_app(events: impl IntoIterator<Item = Event>) -> TestApp {
    let config = DemoConfig {
        alpha: AlphaMode::Test,
        driver: LoopDriver::default(),
    };
    let surface =
        MemorySurface::new(SURFACE_SIZE, SURFACE_SIZE, PixelFormat::Argb8888).with_locking();
    App::new(&config, surface, events.into_iter().collect(), Vec::new())
}

fn press_a() -> Event {
    Event::Key(KeyEvent::press(0x04, "a", 0x41, Modifiers::empty()))
}

// ─── Press 'A' then quit ─────────────────────────────────────────────────

#[test]
fn press_then_quit_repaints_once_and_stops() {
    let mut app = make_app([press_a(), Event::Quit]);

    let state = app.run_one_iteration().unwrap();

    assert_eq!(state, RunState::Stopped);
    assert_eq!(app.renderer().repaint_count(), 1);
    assert_eq!(app.surface().flip_count(), 1);
    assert_eq!(
        String::from_utf8(app.into_output()).unwrap(),
        "Press:- Scancode: 0x04, Name: a, Unicode: A (0x0041)\nModifers: None\n"
    );
}

#[test]
fn blocking_loop_ends_after_quit_without_more_repaints() {
    let mut app = make_app([press_a(), Event::Quit]);
    app.start().unwrap();
    let mut sleeps = Vec::new();

    let iterations = run_blocking(&mut app, LoopDriver::Polling { delay_ms: 500 }, |d| {
        sleeps.push(d)
    })
    .unwrap();

    assert_eq!(iterations, 1);
    assert!(sleeps.is_empty());
    // Startup paint plus the key-triggered one.
    assert_eq!(app.renderer().repaint_count(), 2);
    assert!(!app.renderer().color_flag());
    assert_eq!(app.state(), RunState::Stopped);

    let expected = format!(
        "{INTRO}Press:- Scancode: 0x04, Name: a, Unicode: A (0x0041)\nModifers: None\n"
    );
    assert_eq!(String::from_utf8(app.into_output()).unwrap(), expected);
}

/// Source that stays empty for a number of pumps, then reports a quit.
struct QuitAfter {
    idle_pumps: usize,
    queue: EventQueue,
}

impl EventSource for QuitAfter {
    fn pump(&mut self) {
        if self.idle_pumps == 0 {
            self.queue.push(Event::Quit);
        } else {
            self.idle_pumps -= 1;
            self.queue.push(Event::Other);
        }
    }

    fn poll_event(&mut self) -> Option<Event> {
        self.queue.poll_event()
    }
}

#[test]
fn idle_ticks_sleep_between_iterations() {
    let surface = MemorySurface::new(SURFACE_SIZE, SURFACE_SIZE, PixelFormat::Xrgb8888);
    let events = QuitAfter {
        idle_pumps: 3,
        queue: EventQueue::new(),
    };
    let mut app = App::new(&DemoConfig::default(), surface, events, Vec::new());
    let mut sleeps = Vec::new();

    let iterations = run_blocking(&mut app, LoopDriver::Polling { delay_ms: 500 }, |d| {
        sleeps.push(d)
    })
    .unwrap();

    assert_eq!(iterations, 4);
    assert_eq!(sleeps, vec![Duration::from_millis(500); 3]);
    assert_eq!(app.surface().flip_count(), 0);
    assert!(app.output().is_empty());
}

// ─── Driver equivalence ──────────────────────────────────────────────────

#[test]
fn both_drivers_produce_identical_output() {
    let script = || {
        vec![
            Event::Key(KeyEvent::press(0xE0, "left ctrl", 0, Modifiers::LCTRL)),
            Event::Other,
            Event::Key(KeyEvent::press(0x04, "a", 0x61, Modifiers::LCTRL)),
            Event::Key(KeyEvent::release(0x04, "a", Modifiers::LCTRL)),
            Event::Key(KeyEvent::release(0xE0, "left ctrl", Modifiers::empty())),
            Event::Quit,
        ]
    };

    let mut fixed = make_app(script());
    fixed.start().unwrap();
    run_blocking(&mut fixed, LoopDriver::FixedRate { hz: 60 }, |_| {}).unwrap();

    let mut polling = make_app(script());
    polling.start().unwrap();
    run_blocking(&mut polling, LoopDriver::Polling { delay_ms: 500 }, |_| {}).unwrap();

    assert_eq!(fixed.renderer().repaint_count(), 5);
    assert_eq!(
        fixed.surface().pixels().as_slice(),
        polling.surface().pixels().as_slice()
    );

    let fixed_text = String::from_utf8(fixed.into_output()).unwrap();
    let polling_text = String::from_utf8(polling.into_output()).unwrap();
    assert_eq!(fixed_text, polling_text);
    assert!(fixed_text.contains("Press:- Scancode: 0xE0, Name: left ctrl, Unicode: ? (0x0000)\nModifers: LCTRL CTRL \n"));
    assert!(fixed_text.ends_with("Release:- Scancode: 0xE0, Name: left ctrl\nModifers: None\n"));
}
