//! Integration tests: gradient contents after repeated repaints.
//!
//! Checks every pixel of the 256×256 surface against the two color
//! formulas and both alpha modes.

use keyecho_core::{AlphaMode, MemorySurface, PixelFormat, Renderer, SURFACE_SIZE, Surface};

fn lockable(format: PixelFormat) -> MemorySurface {
    MemorySurface::new(SURFACE_SIZE, SURFACE_SIZE, format).with_locking()
}

fn assert_every_pixel(surface: &MemorySurface, expected: impl Fn(u32, u32) -> (u8, u8, u8, u8)) {
    let format = surface.format();
    for i in 0..SURFACE_SIZE {
        for j in 0..SURFACE_SIZE {
            let p = surface.pixels().pixel(j, i).expect("pixel in bounds");
            assert_eq!(
                format.get_rgba(p),
                expected(i, j),
                "mismatch at row {i}, column {j}"
            );
        }
    }
}

// ─── Color formulas ──────────────────────────────────────────────────────

#[test]
fn odd_repaints_paint_mode_a() {
    let mut renderer = Renderer::new(AlphaMode::Opaque);
    let mut surface = lockable(PixelFormat::Argb8888);

    for _ in 0..3 {
        renderer.repaint(&mut surface).unwrap();
    }

    assert_every_pixel(&surface, |i, j| (j as u8, i as u8, i as u8, 255));
}

#[test]
fn even_repaints_paint_mode_b() {
    let mut renderer = Renderer::new(AlphaMode::Opaque);
    let mut surface = lockable(PixelFormat::Abgr8888);

    for _ in 0..4 {
        renderer.repaint(&mut surface).unwrap();
    }

    assert_every_pixel(&surface, |i, j| (i as u8, j as u8, 255 - i as u8, 255));
}

#[test]
fn color_flag_parity_tracks_repaint_count() {
    let mut renderer = Renderer::new(AlphaMode::Test);
    let mut surface = lockable(PixelFormat::Argb8888);
    assert!(!renderer.color_flag());

    for n in 1..=6u64 {
        renderer.repaint(&mut surface).unwrap();
        assert_eq!(renderer.color_flag(), n % 2 == 1, "after repaint {n}");
    }
    assert_eq!(surface.lock_count(), 6);
    assert_eq!(surface.flip_count(), 6);
}

// ─── Alpha ───────────────────────────────────────────────────────────────

#[test]
fn test_mode_alpha_is_diagonal_modulo() {
    let mut renderer = Renderer::new(AlphaMode::Test);
    let mut surface = lockable(PixelFormat::Argb8888);
    renderer.repaint(&mut surface).unwrap();

    assert_every_pixel(&surface, |i, j| {
        (j as u8, i as u8, i as u8, ((i + j) % 255) as u8)
    });
}

#[test]
fn opaque_mode_alpha_is_full() {
    let mut renderer = Renderer::new(AlphaMode::Opaque);
    let mut surface = lockable(PixelFormat::Abgr8888);
    renderer.repaint(&mut surface).unwrap();

    let format = surface.format();
    assert!(
        surface
            .pixels()
            .as_slice()
            .iter()
            .all(|&p| format.get_rgba(p).3 == 255)
    );
}

#[test]
fn alpha_free_surface_matches_regardless_of_mode() {
    let mut opaque = MemorySurface::new(SURFACE_SIZE, SURFACE_SIZE, PixelFormat::Xrgb8888);
    let mut test = MemorySurface::new(SURFACE_SIZE, SURFACE_SIZE, PixelFormat::Xrgb8888);
    Renderer::new(AlphaMode::Opaque).repaint(&mut opaque).unwrap();
    Renderer::new(AlphaMode::Test).repaint(&mut test).unwrap();

    assert_eq!(opaque.pixels().as_slice(), test.pixels().as_slice());
}
