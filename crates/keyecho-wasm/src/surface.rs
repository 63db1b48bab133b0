//! `<canvas>` 2D surface.
//!
//! The front buffer lives in the browser, so the surface must be locked:
//! `lock` optionally reads the canvas back into the pixel buffer and `flip`
//! uploads the buffer with `putImageData`.

use keyecho_core::{DemoError, LockOptions, PixelAccess, PixelBuffer, PixelFormat, SURFACE_SIZE, Surface};
use wasm_bindgen::{Clamped, JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, ImageData};

pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    buffer: PixelBuffer,
    options: LockOptions,
    locked: bool,
}

impl CanvasSurface {
    /// Size the canvas to the demo surface and acquire its 2D context.
    pub fn new(canvas: &HtmlCanvasElement, options: LockOptions) -> Result<Self, DemoError> {
        canvas.set_width(SURFACE_SIZE);
        canvas.set_height(SURFACE_SIZE);

        // An opaque front buffer ignores per-pixel alpha at composite time.
        let attrs = js_sys::Object::new();
        js_sys::Reflect::set(
            &attrs,
            &"alpha".into(),
            &JsValue::from_bool(!options.opaque_front_buffer),
        )
        .map_err(|e| DemoError::SurfaceUnavailable(js_error(&e)))?;

        let ctx = canvas
            .get_context_with_context_options("2d", &attrs)
            .map_err(|e| DemoError::SurfaceUnavailable(js_error(&e)))?
            .ok_or_else(|| DemoError::SurfaceUnavailable("2d context not supported".into()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| DemoError::SurfaceUnavailable("context is not 2d".into()))?;

        Ok(Self {
            ctx,
            buffer: PixelBuffer::new(SURFACE_SIZE, SURFACE_SIZE, PixelFormat::Abgr8888),
            options,
            locked: false,
        })
    }
}

impl Surface for CanvasSurface {
    fn must_lock(&self) -> bool {
        true
    }

    fn lock(&mut self) -> Result<(), DemoError> {
        if self.locked {
            return Err(DemoError::LockFailure("canvas already locked".into()));
        }
        if self.options.reads_back() {
            let side = SURFACE_SIZE as f64;
            let image = self
                .ctx
                .get_image_data(0.0, 0.0, side, side)
                .map_err(|e| DemoError::LockFailure(js_error(&e)))?;
            self.buffer.copy_from_le_bytes(&image.data());
        }
        self.locked = true;
        Ok(())
    }

    fn unlock(&mut self) {
        self.locked = false;
    }

    fn pixels(&self) -> &PixelBuffer {
        &self.buffer
    }

    fn pixels_mut(&mut self, _: &PixelAccess) -> &mut PixelBuffer {
        &mut self.buffer
    }

    fn flip(&mut self) -> Result<(), DemoError> {
        let bytes = self.buffer.to_le_bytes();
        let image = ImageData::new_with_u8_clamped_array_and_sh(
            Clamped(bytes.as_slice()),
            self.buffer.width(),
            self.buffer.height(),
        )
        .map_err(|e| DemoError::SurfaceUnavailable(js_error(&e)))?;
        self.ctx
            .put_image_data(&image, 0.0, 0.0)
            .map_err(|e| DemoError::SurfaceUnavailable(js_error(&e)))
    }
}

pub(crate) fn js_error(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}
