//! Gradient renderer.
//!
//! Each repaint flips between two gradient formulas and redraws the whole
//! 256×256 surface inside a single lock, then presents it.

use crate::config::AlphaMode;
use crate::error::DemoError;
use crate::surface::{Surface, SurfaceLock};

/// Edge length of the square surface, in pixels.
pub const SURFACE_SIZE: u32 = 256;

#[derive(Debug)]
pub struct Renderer {
    alpha: AlphaMode,
    /// Selects the gradient formula; toggled at the start of every repaint.
    color_flag: bool,
    repaints: u64,
}

impl Renderer {
    pub fn new(alpha: AlphaMode) -> Self {
        Self {
            alpha,
            color_flag: false,
            repaints: 0,
        }
    }

    pub fn alpha_mode(&self) -> AlphaMode {
        self.alpha
    }

    pub fn color_flag(&self) -> bool {
        self.color_flag
    }

    pub fn repaint_count(&self) -> u64 {
        self.repaints
    }

    /// Toggle the color mode, redraw every pixel, and flip the surface.
    ///
    /// # Errors
    /// `LockFailure` if the surface refuses the lock, or whatever the
    /// surface's `flip` reports. Both are fatal to the caller.
    pub fn repaint<S: Surface + ?Sized>(&mut self, surface: &mut S) -> Result<(), DemoError> {
        self.color_flag = !self.color_flag;
        self.repaints += 1;

        {
            let mut lock = SurfaceLock::acquire(surface)?;
            let format = lock.format();
            for i in 0..SURFACE_SIZE {
                for j in 0..SURFACE_SIZE {
                    let (r, g, b) = gradient_rgb(self.color_flag, i, j);
                    let a = self.alpha.alpha_at(i, j);
                    lock.set_pixel(j, i, format.map_rgba(r, g, b, a));
                }
            }
        }

        surface.flip()?;
        log::debug!(
            "repaint #{} (color_flag={}, alpha={:?})",
            self.repaints,
            self.color_flag,
            self.alpha
        );
        Ok(())
    }
}

/// RGB of pixel row `i`, column `j` for the given color mode.
pub fn gradient_rgb(color_flag: bool, i: u32, j: u32) -> (u8, u8, u8) {
    let (i, j) = (i as u8, j as u8);
    if color_flag {
        (j, i, i)
    } else {
        (i, j, 255 - i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel::PixelFormat;
    use crate::surface::MemorySurface;

    fn surface() -> MemorySurface {
        MemorySurface::new(SURFACE_SIZE, SURFACE_SIZE, PixelFormat::Argb8888).with_locking()
    }

    fn rgba_at(surface: &MemorySurface, i: u32, j: u32) -> (u8, u8, u8, u8) {
        let p = surface.pixels().pixel(j, i).unwrap();
        surface.format().get_rgba(p)
    }

    #[test]
    fn odd_repaint_uses_first_formula() {
        let mut renderer = Renderer::new(AlphaMode::Opaque);
        let mut surface = surface();
        renderer.repaint(&mut surface).unwrap();

        assert!(renderer.color_flag());
        assert_eq!(rgba_at(&surface, 10, 200), (200, 10, 10, 255));
        assert_eq!(rgba_at(&surface, 255, 0), (0, 255, 255, 255));
    }

    #[test]
    fn even_repaint_uses_second_formula() {
        let mut renderer = Renderer::new(AlphaMode::Opaque);
        let mut surface = surface();
        renderer.repaint(&mut surface).unwrap();
        renderer.repaint(&mut surface).unwrap();

        assert!(!renderer.color_flag());
        assert_eq!(rgba_at(&surface, 10, 200), (10, 200, 245, 255));
        assert_eq!(rgba_at(&surface, 0, 0), (0, 0, 255, 255));
    }

    #[test]
    fn test_alpha_is_written_on_alpha_formats() {
        let mut renderer = Renderer::new(AlphaMode::Test);
        let mut surface = surface();
        renderer.repaint(&mut surface).unwrap();

        assert_eq!(rgba_at(&surface, 100, 54).3, 154);
        assert_eq!(rgba_at(&surface, 200, 55).3, 0);
    }

    #[test]
    fn test_alpha_is_discarded_without_alpha_channel() {
        let mut renderer = Renderer::new(AlphaMode::Test);
        let mut surface = MemorySurface::new(SURFACE_SIZE, SURFACE_SIZE, PixelFormat::Xrgb8888);
        renderer.repaint(&mut surface).unwrap();

        assert!(surface.pixels().as_slice().iter().all(|p| p >> 24 == 0));
    }

    #[test]
    fn repaint_locks_once_and_flips_once() {
        let mut renderer = Renderer::new(AlphaMode::Test);
        let mut surface = surface();
        renderer.repaint(&mut surface).unwrap();

        assert_eq!(surface.lock_count(), 1);
        assert_eq!(surface.flip_count(), 1);
        assert!(!surface.is_locked());
        assert_eq!(renderer.repaint_count(), 1);
    }

    #[test]
    fn repaints_never_write_while_unlocked() {
        let mut renderer = Renderer::new(AlphaMode::Opaque);
        let mut surface = surface();
        for _ in 0..3 {
            renderer.repaint(&mut surface).unwrap();
        }

        assert_eq!(surface.unlocked_writes(), 0);
        assert_eq!(surface.lock_count(), 3);
    }

    #[test]
    fn lock_failure_propagates_and_still_toggles() {
        let mut renderer = Renderer::new(AlphaMode::Test);
        let mut surface = surface();
        surface.lock().unwrap();

        let err = renderer.repaint(&mut surface).unwrap_err();
        assert!(matches!(err, DemoError::LockFailure(_)));
        assert!(renderer.color_flag());
        assert_eq!(surface.flip_count(), 0);
    }
}
