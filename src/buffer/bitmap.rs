//! Bitmap: the RGB24 image sent to the terminal.
//!
//! Pixels are stored in row-major order, three bytes (R, G, B) each:
//! `index = (row * width + col) * 3`.

use super::MonoBuffer;
use crate::color::{ColorMap, Rgb};

/// Bytes per pixel in the `f=24` format.
pub const BYTES_PER_PIXEL: usize = 3;

/// RGB24 image with the same dimensions as its source [`MonoBuffer`].
#[derive(Clone, PartialEq, Eq)]
pub struct Bitmap {
    data: Vec<u8>,
    width: u16,
    height: u16,
}

impl Bitmap {
    /// Create a bitmap with every pixel black.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            data: vec![0; width as usize * height as usize * BYTES_PER_PIXEL],
            width,
            height,
        }
    }

    /// Render a buffer through a color map into a new bitmap.
    pub fn render<M: ColorMap + ?Sized>(buffer: &MonoBuffer, colors: &M) -> Self {
        let mut bitmap = Self::new(buffer.width(), buffer.height());
        bitmap.render_from(buffer, colors);
        bitmap
    }

    /// Re-render in place, reusing the allocation.
    ///
    /// Resizes first if the buffer dimensions changed.
    pub fn render_from<M: ColorMap + ?Sized>(&mut self, buffer: &MonoBuffer, colors: &M) {
        if self.width != buffer.width() || self.height != buffer.height() {
            *self = Self::new(buffer.width(), buffer.height());
        }

        let width = self.width as usize;
        for (pixel_ix, rgb) in self.data.chunks_exact_mut(BYTES_PER_PIXEL).enumerate() {
            // pixel_ix < width * height, both u16
            let row = (pixel_ix / width) as u16;
            let col = (pixel_ix % width) as u16;
            let color = colors.map(buffer.bit(row, col), row, col);
            rgb.copy_from_slice(&color.to_bytes());
        }
    }

    /// Width in pixels.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// The raw RGB24 bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Length in bytes (`width * height * 3`).
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the bitmap holds no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Color of the pixel at `(row, col)`.
    ///
    /// Returns `None` if out of bounds.
    pub fn pixel(&self, row: u16, col: u16) -> Option<Rgb> {
        if row >= self.height || col >= self.width {
            return None;
        }
        let idx = (row as usize * self.width as usize + col as usize) * BYTES_PER_PIXEL;
        Some(Rgb::new(self.data[idx], self.data[idx + 1], self.data[idx + 2]))
    }
}

impl std::fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bitmap")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.data.len())
            .finish()
    }
}
