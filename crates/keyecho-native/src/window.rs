//! Window creation and the softbuffer-backed surface.
//!
//! winit 0.30 only creates windows inside `resumed()`, so the event loop is
//! pumped once to obtain the window before the demo loop starts. Events
//! arriving during that pump go to the same [`Collector`] the run loop
//! drains later.

use crate::input::Collector;
use keyecho_core::{DemoError, PixelAccess, PixelBuffer, PixelFormat, SURFACE_SIZE, Surface};
use softbuffer::Context;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::platform::pump_events::EventLoopExtPumpEvents;
use winit::window::{Window, WindowAttributes, WindowId};

const TITLE: &str = "keyecho";

/// Create the fixed-size, non-resizable demo window.
pub fn open_window(
    event_loop: &mut EventLoop<()>,
    collector: &mut Collector,
) -> Result<Arc<Window>, DemoError> {
    let size = PhysicalSize::new(SURFACE_SIZE, SURFACE_SIZE);
    let attrs = WindowAttributes::default()
        .with_title(TITLE)
        .with_inner_size(size)
        .with_min_inner_size(size)
        .with_max_inner_size(size)
        .with_resizable(false);

    struct Creator<'a> {
        attrs: Option<WindowAttributes>,
        result: Option<Result<Arc<Window>, DemoError>>,
        collector: &'a mut Collector,
    }

    impl ApplicationHandler for Creator<'_> {
        fn resumed(&mut self, event_loop: &ActiveEventLoop) {
            let Some(attrs) = self.attrs.take() else {
                return;
            };
            let window = event_loop
                .create_window(attrs)
                .map(Arc::new)
                .map_err(|e| DemoError::InitFailure(format!("window creation failed: {e}")));
            self.result = Some(window);
        }

        fn window_event(&mut self, _: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
            self.collector.record(event);
        }
    }

    let mut creator = Creator {
        attrs: Some(attrs),
        result: None,
        collector,
    };

    // resumed() fires synchronously during the first pump on desktop platforms.
    let status = event_loop.pump_app_events(Some(Duration::from_millis(100)), &mut creator);
    creator.collector.on_status(status);
    if creator.collector.pending() > 0 {
        log::debug!("{} events queued during window creation", creator.collector.pending());
    }

    creator
        .result
        .unwrap_or_else(|| Err(DemoError::InitFailure("resumed() never fired".into())))
}

// ─── Surface ─────────────────────────────────────────────────────────────

/// Window surface. The pixel buffer is plain memory, so no locking is
/// needed; `flip` copies it into the softbuffer frame and presents.
///
/// Softbuffer frames are `0x00RRGGBB`: any alpha written by the renderer
/// is discarded on pack.
pub struct NativeSurface {
    surface: softbuffer::Surface<Arc<Window>, Arc<Window>>,
    _context: Context<Arc<Window>>,
    buffer: PixelBuffer,
}

impl NativeSurface {
    pub fn new(window: Arc<Window>) -> Result<Self, DemoError> {
        let unavailable = |e: softbuffer::SoftBufferError| DemoError::SurfaceUnavailable(e.to_string());

        let context = Context::new(window.clone()).map_err(unavailable)?;
        let mut surface = softbuffer::Surface::new(&context, window).map_err(unavailable)?;

        let side = NonZeroU32::new(SURFACE_SIZE)
            .ok_or_else(|| DemoError::SurfaceUnavailable("zero-sized surface".into()))?;
        surface.resize(side, side).map_err(unavailable)?;

        Ok(Self {
            surface,
            _context: context,
            buffer: PixelBuffer::new(SURFACE_SIZE, SURFACE_SIZE, PixelFormat::Xrgb8888),
        })
    }
}

impl Surface for NativeSurface {
    fn must_lock(&self) -> bool {
        false
    }

    fn lock(&mut self) -> Result<(), DemoError> {
        Ok(())
    }

    fn unlock(&mut self) {}

    fn pixels(&self) -> &PixelBuffer {
        &self.buffer
    }

    fn pixels_mut(&mut self, _: &PixelAccess) -> &mut PixelBuffer {
        &mut self.buffer
    }

    fn flip(&mut self) -> Result<(), DemoError> {
        let mut frame = self
            .surface
            .buffer_mut()
            .map_err(|e| DemoError::SurfaceUnavailable(e.to_string()))?;
        for (dst, src) in frame.iter_mut().zip(self.buffer.as_slice()) {
            *dst = *src;
        }
        frame
            .present()
            .map_err(|e| DemoError::SurfaceUnavailable(e.to_string()))
    }
}
