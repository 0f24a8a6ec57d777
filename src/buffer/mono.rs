//! `MonoBuffer`: MONO_VLSB monochrome pixel storage.
//!
//! # Memory Layout
//!
//! The buffer is split into pages of 8 pixel rows. Each page is `width`
//! consecutive bytes, one per column, and each byte packs the 8 vertically
//! stacked pixels of that column, least-significant bit on top.
//!
//! ```text
//!            col 0      col 1            col W-1
//! page 0   [byte 0]   [byte 1]   ...   [byte W-1]      rows 0..8
//! page 1   [byte W]   [byte W+1] ...   [byte 2W-1]     rows 8..16
//!
//! byte bit:  0 -> row page*8 + 0
//!            7 -> row page*8 + 7
//! ```
//!
//! This is the layout SSD1306/SH1106 controllers expect, so code written
//! against such displays can draw into this buffer unchanged.

use crate::error::{Error, Result};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::{DrawTarget, OriginDimensions, Pixel, Size};

/// Monochrome pixel buffer in MONO_VLSB layout.
///
/// Access goes through the addressing law:
/// `page_index(row, col) = (row / 8) * width + col`,
/// `bit_offset(row) = row % 8`.
#[derive(Clone, PartialEq, Eq)]
pub struct MonoBuffer {
    /// Page-major byte storage.
    bytes: Vec<u8>,
    /// Width in pixels.
    width: u16,
    /// Height in pixels (multiple of 8).
    height: u16,
}

impl MonoBuffer {
    /// Create a buffer with every pixel off.
    ///
    /// Fails if either dimension is zero or the height is not a multiple of 8.
    pub fn new(width: u16, height: u16) -> Result<Self> {
        Self::check_geometry(width, height)?;
        let len = Self::byte_len(width, height);
        Ok(Self {
            bytes: vec![0; len],
            width,
            height,
        })
    }

    /// Adopt existing MONO_VLSB storage.
    pub fn from_bytes(width: u16, height: u16, bytes: Vec<u8>) -> Result<Self> {
        Self::check_geometry(width, height)?;
        let expected = Self::byte_len(width, height);
        if bytes.len() != expected {
            return Err(Error::BufferLength {
                expected,
                actual: bytes.len(),
            });
        }
        Ok(Self { bytes, width, height })
    }

    fn check_geometry(width: u16, height: u16) -> Result<()> {
        if width == 0 || height == 0 {
            return Err(Error::EmptyCanvas { width, height });
        }
        if height % 8 != 0 {
            return Err(Error::UnalignedHeight { height });
        }
        Ok(())
    }

    const fn byte_len(width: u16, height: u16) -> usize {
        (height as usize / 8) * width as usize
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

    /// Number of 8-row pages.
    #[inline]
    pub const fn pages(&self) -> u16 {
        self.height / 8
    }

    /// Length of the byte storage.
    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Always `false` after construction.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The raw page bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Mutable access to the raw page bytes, for drawing code that writes
    /// the layout directly.
    #[inline]
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    /// Index of the byte holding `(row, col)`. Does not check bounds.
    #[inline]
    pub const fn page_index(&self, row: u16, col: u16) -> usize {
        (row as usize / 8) * self.width as usize + col as usize
    }

    /// Bit position of `row` inside its page byte.
    #[inline]
    pub const fn bit_offset(row: u16) -> u8 {
        (row % 8) as u8
    }

    #[inline]
    const fn contains(&self, row: u16, col: u16) -> bool {
        row < self.height && col < self.width
    }

    const fn out_of_bounds(&self, row: u16, col: u16) -> Error {
        Error::OutOfBounds {
            row,
            col,
            width: self.width,
            height: self.height,
        }
    }

    /// Read the pixel at `(row, col)`.
    pub fn read(&self, row: u16, col: u16) -> Result<bool> {
        if !self.contains(row, col) {
            return Err(self.out_of_bounds(row, col));
        }
        Ok(self.bit(row, col))
    }

    /// Set the pixel at `(row, col)`.
    pub fn write(&mut self, row: u16, col: u16, on: bool) -> Result<()> {
        if !self.contains(row, col) {
            return Err(self.out_of_bounds(row, col));
        }
        self.put(row, col, on);
        Ok(())
    }

    /// Set every pixel on or off.
    pub fn fill(&mut self, on: bool) {
        self.bytes.fill(if on { 0xFF } else { 0x00 });
    }

    /// Number of lit pixels.
    pub fn count_on(&self) -> usize {
        self.bytes.iter().map(|b| b.count_ones() as usize).sum()
    }

    #[inline]
    pub(crate) fn bit(&self, row: u16, col: u16) -> bool {
        (self.bytes[self.page_index(row, col)] >> Self::bit_offset(row)) & 1 == 1
    }

    #[inline]
    pub(crate) fn put(&mut self, row: u16, col: u16, on: bool) {
        let idx = self.page_index(row, col);
        let mask = 1u8 << Self::bit_offset(row);
        if on {
            self.bytes[idx] |= mask;
        } else {
            self.bytes[idx] &= !mask;
        }
    }
}

impl OriginDimensions for MonoBuffer {
    fn size(&self) -> Size {
        Size::new(u32::from(self.width), u32::from(self.height))
    }
}

impl DrawTarget for MonoBuffer {
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    /// Pixels outside the canvas are clipped.
    fn draw_iter<I>(&mut self, pixels: I) -> std::result::Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            let (Ok(col), Ok(row)) = (u16::try_from(point.x), u16::try_from(point.y)) else {
                continue;
            };
            if self.contains(row, col) {
                self.put(row, col, color.is_on());
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> std::result::Result<(), Self::Error> {
        self.fill(color.is_on());
        Ok(())
    }
}

impl std::fmt::Debug for MonoBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MonoBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("pages", &self.pages())
            .field("lit", &self.count_on())
            .finish()
    }
}
