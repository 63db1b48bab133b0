pub mod app;
pub mod config;
pub mod dispatch;
pub mod driver;
pub mod error;
pub mod event;
pub mod pixel;
pub mod render;
pub mod report;
pub mod surface;

pub use app::{App, INTRO};
pub use config::{AlphaMode, DemoConfig, LockOptions};
pub use dispatch::{EventHandler, RunState, poll_once};
pub use driver::{LoopDriver, Ticker, run_blocking};
pub use error::DemoError;
pub use event::{Event, EventQueue, EventSource, KeyDirection, KeyEvent, Modifiers};
pub use pixel::{PixelBuffer, PixelFormat};
pub use render::{Renderer, SURFACE_SIZE};
pub use report::{report_key, report_modifiers};
pub use surface::{MemorySurface, PixelAccess, Surface, SurfaceLock};
