//! Color mapping: turning monochrome bits into RGB24 pixels.
//!
//! A [`ColorMap`] is a pure function of the bit state and the pixel
//! position. The position lets a policy decorate the canvas, e.g. the
//! white frame drawn by [`BorderedPalette`].

/// True-color RGB representation.
///
/// Uses 3 bytes for 24-bit color depth, the `f=24` pixel format of the
/// graphics protocol.
#[repr(C)]
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgb {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
}

impl Rgb {
    /// Create a new RGB color.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Black (0, 0, 0)
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// White (255, 255, 255)
    pub const WHITE: Self = Self::new(255, 255, 255);
    /// Cyan (0, 255, 255), the glow of a typical blue/cyan OLED.
    pub const CYAN: Self = Self::new(0, 255, 255);

    /// Create from a 24-bit hex color (e.g., 0xFF5500).
    #[inline]
    pub const fn from_u32(hex: u32) -> Self {
        Self::new(
            ((hex >> 16) & 0xFF) as u8,
            ((hex >> 8) & 0xFF) as u8,
            (hex & 0xFF) as u8,
        )
    }

    /// The channels in wire order.
    #[inline]
    pub const fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl std::fmt::Debug for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<(u8, u8, u8)> for Rgb {
    #[inline]
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

impl From<u32> for Rgb {
    /// Convert from a 24-bit hex color (e.g., 0xFF5500)
    #[inline]
    fn from(hex: u32) -> Self {
        Self::from_u32(hex)
    }
}

/// Maps a pixel's bit state to its displayed color.
///
/// Implementations must be pure: the same inputs always give the same color.
pub trait ColorMap {
    /// Color of the pixel at `(row, col)` whose bit is `on`.
    fn map(&self, on: bool, row: u16, col: u16) -> Rgb;
}

/// Two-color palette. Position is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Palette {
    /// Color of lit pixels.
    pub on: Rgb,
    /// Color of dark pixels.
    pub off: Rgb,
}

impl Palette {
    /// Create a palette from explicit colors.
    pub const fn new(on: Rgb, off: Rgb) -> Self {
        Self { on, off }
    }
}

impl Default for Palette {
    /// Cyan on black.
    fn default() -> Self {
        Self::new(Rgb::CYAN, Rgb::BLACK)
    }
}

impl ColorMap for Palette {
    #[inline]
    fn map(&self, on: bool, _row: u16, _col: u16) -> Rgb {
        if on {
            self.on
        } else {
            self.off
        }
    }
}

/// Palette that outlines the canvas edge.
///
/// Dark pixels on the outermost rows and columns are drawn in the border
/// color. Lit pixels keep the palette's `on` color, so drawing on the edge
/// stays visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BorderedPalette {
    /// Colors for everything the border does not override.
    pub inner: Palette,
    /// Color of dark edge pixels.
    pub border: Rgb,
    width: u16,
    height: u16,
}

impl BorderedPalette {
    /// White border around a canvas of the given size.
    pub const fn new(inner: Palette, width: u16, height: u16) -> Self {
        Self {
            inner,
            border: Rgb::WHITE,
            width,
            height,
        }
    }

    /// Override the border color.
    #[must_use]
    pub const fn with_border(mut self, border: Rgb) -> Self {
        self.border = border;
        self
    }

    #[inline]
    const fn is_edge(&self, row: u16, col: u16) -> bool {
        row == 0
            || col == 0
            || row.saturating_add(1) == self.height
            || col.saturating_add(1) == self.width
    }
}

impl ColorMap for BorderedPalette {
    #[inline]
    fn map(&self, on: bool, row: u16, col: u16) -> Rgb {
        if !on && self.is_edge(row, col) {
            self.border
        } else {
            self.inner.map(on, row, col)
        }
    }
}

/// Either of the built-in color policies, chosen from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorPolicy {
    /// Plain two-color palette.
    Plain(Palette),
    /// Palette with a canvas outline.
    Bordered(BorderedPalette),
}

impl ColorMap for ColorPolicy {
    #[inline]
    fn map(&self, on: bool, row: u16, col: u16) -> Rgb {
        match self {
            Self::Plain(palette) => palette.map(on, row, col),
            Self::Bordered(palette) => palette.map(on, row, col),
        }
    }
}
