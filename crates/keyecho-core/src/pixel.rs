//! Pixel formats and the bounds-checked pixel buffer.
//!
//! Colors are always packed through [`PixelFormat::map_rgba`], so the byte
//! order of a buffer follows whatever layout its host presents.

/// Native 32-bit pixel layouts a host can present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// `0xAARRGGBB`.
    Argb8888,
    /// `0x00RRGGBB` — no alpha channel, alpha is discarded on pack.
    Xrgb8888,
    /// `0xAABBGGRR`; little-endian bytes are `R, G, B, A` (browser `ImageData`).
    Abgr8888,
}

struct Layout {
    r_shift: u32,
    g_shift: u32,
    b_shift: u32,
    a_shift: Option<u32>,
}

impl PixelFormat {
    const fn layout(self) -> Layout {
        match self {
            Self::Argb8888 => Layout {
                r_shift: 16,
                g_shift: 8,
                b_shift: 0,
                a_shift: Some(24),
            },
            Self::Xrgb8888 => Layout {
                r_shift: 16,
                g_shift: 8,
                b_shift: 0,
                a_shift: None,
            },
            Self::Abgr8888 => Layout {
                r_shift: 0,
                g_shift: 8,
                b_shift: 16,
                a_shift: Some(24),
            },
        }
    }

    pub const fn has_alpha(self) -> bool {
        self.layout().a_shift.is_some()
    }

    /// Pack independent channels into this format's integer layout.
    pub fn map_rgba(self, r: u8, g: u8, b: u8, a: u8) -> u32 {
        let l = self.layout();
        let rgb = ((r as u32) << l.r_shift) | ((g as u32) << l.g_shift) | ((b as u32) << l.b_shift);
        match l.a_shift {
            Some(shift) => rgb | ((a as u32) << shift),
            None => rgb,
        }
    }

    /// Unpack a pixel into `(r, g, b, a)`. Formats without alpha read as opaque.
    pub fn get_rgba(self, pixel: u32) -> (u8, u8, u8, u8) {
        let l = self.layout();
        let channel = |shift: u32| ((pixel >> shift) & 0xFF) as u8;
        let a = l.a_shift.map(channel).unwrap_or(0xFF);
        (channel(l.r_shift), channel(l.g_shift), channel(l.b_shift), a)
    }
}

/// A `width × height` grid of packed pixels in one [`PixelFormat`].
#[derive(Debug, Clone)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    format: PixelFormat,
    pixels: Vec<u32>,
}

impl PixelBuffer {
    /// Create a zero-filled buffer.
    pub fn new(width: u32, height: u32, format: PixelFormat) -> Self {
        Self {
            width,
            height,
            format,
            pixels: vec![0; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }

    /// Write one packed pixel. Returns `false` (and writes nothing) when
    /// `(x, y)` lies outside the buffer.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: u32) -> bool {
        match self.offset(x, y) {
            Some(idx) => {
                self.pixels[idx] = color;
                true
            }
            None => false,
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        self.offset(x, y).map(|idx| self.pixels[idx])
    }

    /// Row-major pixels.
    pub fn as_slice(&self) -> &[u32] {
        &self.pixels
    }

    /// Pixels serialized as little-endian bytes, four per pixel.
    pub fn to_le_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| p.to_le_bytes()).collect()
    }

    /// Overwrite pixels from little-endian bytes. Trailing bytes that do not
    /// form a whole pixel, or pixels past the end of the buffer, are ignored.
    pub fn copy_from_le_bytes(&mut self, bytes: &[u8]) {
        for (dst, chunk) in self.pixels.iter_mut().zip(bytes.chunks_exact(4)) {
            *dst = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
    }
}
