//! Configuration for a [`TermBuffer`](crate::TermBuffer).

use crate::color::{BorderedPalette, ColorPolicy, Palette};
use crate::error::{Error, Result};
use crate::protocol::{check_chunk_size, DEFAULT_CHUNK_SIZE};
use crate::session::{FixedId, IdPolicy, RandomIds, SequentialIds, SessionMode};

/// Display width hint sent as `c`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplayColumns {
    /// Omit `c`; the terminal shows the image at its pixel size.
    Native,
    /// Stretch the image over this many columns.
    Fixed(u32),
    /// Derive the column count from the terminal's reported cell size,
    /// falling back to `Native` if the terminal does not report it.
    Auto,
}

impl Default for DisplayColumns {
    fn default() -> Self {
        Self::Fixed(32)
    }
}

/// How image identifiers are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IdStrategy {
    /// Random non-zero identifier.
    #[default]
    Random,
    /// Counter starting at `start`.
    Sequential {
        /// First identifier handed out.
        start: u32,
    },
    /// Caller-supplied identifier.
    Fixed(u32),
}

impl IdStrategy {
    /// Build the policy object.
    pub fn into_policy(self) -> Box<dyn IdPolicy> {
        match self {
            Self::Random => Box::new(RandomIds),
            Self::Sequential { start } => Box::new(SequentialIds::new(start)),
            Self::Fixed(id) => Box::new(FixedId(id)),
        }
    }
}

/// Configuration for a [`TermBuffer`](crate::TermBuffer).
#[derive(Debug, Clone)]
pub struct TermBufferConfig {
    /// Image lifecycle mode.
    pub mode: SessionMode,
    /// Maximum base64 bytes per command.
    pub chunk_size: usize,
    /// Display width hint.
    pub columns: DisplayColumns,
    /// Colors of lit and dark pixels.
    pub palette: Palette,
    /// Outline the canvas edge in white.
    pub border: bool,
    /// Quiet level (`q`); `None` leaves terminal responses on.
    pub quiet: Option<u32>,
    /// Keep the cursor in place after drawing (`C=1`).
    pub suppress_cursor_move: bool,
    /// Pixel offset inside the first cell (`X`, `Y`).
    pub placement_offset: Option<(u32, u32)>,
    /// Identifier selection.
    pub ids: IdStrategy,
    /// Send `f=24,r=1` with frame updates.
    pub edit_in_place: bool,
}

impl Default for TermBufferConfig {
    fn default() -> Self {
        Self {
            mode: SessionMode::Session,
            chunk_size: DEFAULT_CHUNK_SIZE,
            columns: DisplayColumns::default(),
            palette: Palette::default(),
            border: false,
            quiet: None,
            suppress_cursor_move: true,
            placement_offset: None,
            ids: IdStrategy::Random,
            edit_in_place: false,
        }
    }
}

impl TermBufferConfig {
    /// Transmit-only configuration: a new image on every render.
    pub fn transmit_only() -> Self {
        Self {
            mode: SessionMode::TransmitOnly,
            ..Self::default()
        }
    }

    /// Check every field.
    pub fn validate(&self) -> Result<()> {
        check_chunk_size(self.chunk_size)?;
        match self.ids {
            IdStrategy::Fixed(0) => {
                return Err(Error::InvalidConfig("image identifier 0 is reserved".into()));
            }
            IdStrategy::Sequential { start: 0 } => {
                return Err(Error::InvalidConfig("sequential identifiers must start at 1 or above".into()));
            }
            _ => {}
        }
        if self.columns == DisplayColumns::Fixed(0) {
            return Err(Error::InvalidConfig("display columns must be non-zero".into()));
        }
        if self.quiet.is_some_and(|q| q > 2) {
            return Err(Error::InvalidConfig("quiet level must be 0, 1 or 2".into()));
        }
        Ok(())
    }

    /// Color policy for a canvas of the given size.
    pub const fn color_policy(&self, width: u16, height: u16) -> ColorPolicy {
        if self.border {
            ColorPolicy::Bordered(BorderedPalette::new(self.palette, width, height))
        } else {
            ColorPolicy::Plain(self.palette)
        }
    }
}
