//! keyecho desktop host — gradient window with a keyboard event log.
//!
//! Paints a 256×256 gradient, then echoes every key press and release to
//! stdout, repainting on each one. Closing the window ends the program.
//!
//! Configuration comes from the environment:
//! - `KEYECHO_DRIVER=fixed|polling` — 60 Hz ticks or a 500 ms polling loop.
//! - `KEYECHO_ALPHA=opaque|test` — alpha channel contents.
//! - `RUST_LOG` — diagnostic log filter (default `info`).

mod input;
mod window;

use input::{Collector, NativeEvents};
use keyecho_core::{App, DemoConfig, DemoError, run_blocking};
use std::io;
use std::process::ExitCode;
use window::{NativeSurface, open_window};
use winit::event_loop::EventLoop;

fn run() -> Result<(), DemoError> {
    let config = DemoConfig::from_env()?;

    let mut event_loop = EventLoop::new()
        .map_err(|e| DemoError::InitFailure(format!("event loop creation failed: {e}")))?;
    let mut collector = Collector::default();
    let window = open_window(&mut event_loop, &mut collector)?;
    let surface = NativeSurface::new(window)?;
    let events = NativeEvents::new(event_loop, collector);

    let mut app = App::new(&config, surface, events, io::stdout().lock());
    app.start()?;
    run_blocking(&mut app, config.driver, std::thread::sleep)?;
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
