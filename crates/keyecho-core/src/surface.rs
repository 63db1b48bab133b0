//! Display surface abstraction and scoped pixel locking.
//!
//! Hosts implement [`Surface`]. Pixel writes go through [`SurfaceLock`],
//! which locks on creation (when the surface needs it) and unlocks on drop.
//! `Surface::pixels_mut` takes a [`PixelAccess`] token that only the guard
//! can construct, so no other path reaches the pixel memory for writing.

use crate::error::DemoError;
use crate::pixel::{PixelBuffer, PixelFormat};

/// Proof that the caller holds a [`SurfaceLock`]. Cannot be built outside
/// this module.
#[derive(Debug)]
pub struct PixelAccess(());

/// A presentable pixel surface.
pub trait Surface {
    /// Whether pixel memory must be locked before direct writes.
    /// Single-buffered surfaces return `false` and never see `lock`/`unlock`.
    fn must_lock(&self) -> bool;

    fn lock(&mut self) -> Result<(), DemoError>;

    fn unlock(&mut self);

    fn pixels(&self) -> &PixelBuffer;

    /// Writable pixels. Only reachable from [`SurfaceLock`].
    fn pixels_mut(&mut self, access: &PixelAccess) -> &mut PixelBuffer;

    /// Present the current pixels to the display.
    fn flip(&mut self) -> Result<(), DemoError>;

    fn format(&self) -> PixelFormat {
        self.pixels().format()
    }

    fn size(&self) -> (u32, u32) {
        let px = self.pixels();
        (px.width(), px.height())
    }
}

/// Exclusive write access to a surface's pixels for the guard's lifetime.
pub struct SurfaceLock<'a, S: Surface + ?Sized> {
    surface: &'a mut S,
    locked: bool,
}

impl<'a, S: Surface + ?Sized> SurfaceLock<'a, S> {
    pub fn acquire(surface: &'a mut S) -> Result<Self, DemoError> {
        let locked = surface.must_lock();
        if locked {
            surface.lock()?;
        }
        Ok(Self { surface, locked })
    }

    pub fn format(&self) -> PixelFormat {
        self.surface.format()
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, color: u32) -> bool {
        self.surface.pixels_mut(&PixelAccess(())).set_pixel(x, y, color)
    }
}

impl<S: Surface + ?Sized> Drop for SurfaceLock<'_, S> {
    fn drop(&mut self) {
        if self.locked {
            self.surface.unlock();
        }
    }
}

// ─── In-memory surface ───────────────────────────────────────────────────

/// Surface backed only by memory. Counts locks, flips, and any write
/// access granted while a locking surface is unlocked.
#[derive(Debug)]
pub struct MemorySurface {
    buffer: PixelBuffer,
    must_lock: bool,
    locked: bool,
    lock_count: usize,
    flip_count: usize,
    unlocked_writes: usize,
}

impl MemorySurface {
    pub fn new(width: u32, height: u32, format: PixelFormat) -> Self {
        Self {
            buffer: PixelBuffer::new(width, height, format),
            must_lock: false,
            locked: false,
            lock_count: 0,
            flip_count: 0,
            unlocked_writes: 0,
        }
    }

    /// Require explicit locking, like a hardware or browser-backed surface.
    pub fn with_locking(mut self) -> Self {
        self.must_lock = true;
        self
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn lock_count(&self) -> usize {
        self.lock_count
    }

    pub fn flip_count(&self) -> usize {
        self.flip_count
    }

    /// Write accesses handed out while `must_lock` held and no lock was
    /// taken. Stays 0 as long as every write goes through [`SurfaceLock`].
    pub fn unlocked_writes(&self) -> usize {
        self.unlocked_writes
    }
}

impl Surface for MemorySurface {
    fn must_lock(&self) -> bool {
        self.must_lock
    }

    fn lock(&mut self) -> Result<(), DemoError> {
        if self.locked {
            return Err(DemoError::LockFailure("surface already locked".into()));
        }
        self.locked = true;
        self.lock_count += 1;
        Ok(())
    }

    fn unlock(&mut self) {
        self.locked = false;
    }

    fn pixels(&self) -> &PixelBuffer {
        &self.buffer
    }

    fn pixels_mut(&mut self, _: &PixelAccess) -> &mut PixelBuffer {
        if self.must_lock && !self.locked {
            log::warn!("pixel write on an unlocked surface");
            self.unlocked_writes += 1;
        }
        &mut self.buffer
    }

    fn flip(&mut self) -> Result<(), DemoError> {
        if self.locked {
            return Err(DemoError::SurfaceUnavailable("flip while locked".into()));
        }
        self.flip_count += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lock_guard_unlocks_on_drop() {
        let mut surface = MemorySurface::new(2, 2, PixelFormat::Argb8888).with_locking();
        {
            let mut guard = SurfaceLock::acquire(&mut surface).unwrap();
            assert!(guard.set_pixel(1, 1, 0xFF));
        }
        assert!(!surface.is_locked());
        assert_eq!(surface.lock_count(), 1);
        assert_eq!(surface.pixels().pixel(1, 1), Some(0xFF));
        assert_eq!(surface.unlocked_writes(), 0);
    }

    #[test]
    fn write_access_without_lock_is_recorded() {
        let mut surface = MemorySurface::new(4, 4, PixelFormat::Argb8888).with_locking();
        surface.pixels_mut(&PixelAccess(())).set_pixel(1, 1, 0xDEAD_BEEF);
        assert_eq!(surface.unlocked_writes(), 1);
        assert_eq!(surface.lock_count(), 0);

        surface.lock().unwrap();
        surface.pixels_mut(&PixelAccess(())).set_pixel(2, 2, 0xFF);
        surface.unlock();
        assert_eq!(surface.unlocked_writes(), 1);
    }

    #[test]
    fn unlocked_writes_only_counted_on_locking_surfaces() {
        let mut surface = MemorySurface::new(2, 2, PixelFormat::Xrgb8888);
        SurfaceLock::acquire(&mut surface).unwrap().set_pixel(0, 0, 1);
        assert_eq!(surface.unlocked_writes(), 0);
    }

    #[test]
    fn unlocked_surfaces_skip_lock_calls() {
        let mut surface = MemorySurface::new(2, 2, PixelFormat::Xrgb8888);
        drop(SurfaceLock::acquire(&mut surface).unwrap());
        assert_eq!(surface.lock_count(), 0);
    }

    #[test]
    fn double_lock_fails() {
        let mut surface = MemorySurface::new(1, 1, PixelFormat::Argb8888).with_locking();
        surface.lock().unwrap();
        assert!(matches!(surface.lock(), Err(DemoError::LockFailure(_))));
    }

    #[test]
    fn flip_refused_while_locked() {
        let mut surface = MemorySurface::new(1, 1, PixelFormat::Argb8888).with_locking();
        surface.lock().unwrap();
        assert!(surface.flip().is_err());
        surface.unlock();
        surface.flip().unwrap();
        assert_eq!(surface.flip_count(), 1);
    }
}
