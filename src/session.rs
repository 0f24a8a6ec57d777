//! Image session: lifecycle of the terminal-side image.
//!
//! ```text
//! Uninitialized --open()--> Created --next_frame()--> Updating --+
//!                                                        ^       |
//!                                                        +-------+
//! ```
//!
//! In [`SessionMode::Session`] the image is transmitted once (`a=T`) and
//! every later render replaces its data in place (`a=f`) under the same
//! identifier. In [`SessionMode::TransmitOnly`] every render transmits a
//! new image with a fresh identifier. The terminal keeps all of them, so
//! this mode grows terminal-side state with every call.
//!
//! No transition deletes the image.

use crate::protocol::{Action, ControlFrame, ControlKey, FORMAT_RGB24};
use rand::Rng;

/// Lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    /// Nothing sent yet.
    Uninitialized,
    /// Transmit command produced; no frame update yet.
    Created,
    /// At least one render after creation.
    Updating,
}

/// How renders address the terminal-side image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionMode {
    /// Transmit once, then update frames under a stable identifier.
    #[default]
    Session,
    /// Transmit a new image on every render.
    TransmitOnly,
}

/// Source of image identifiers.
pub trait IdPolicy {
    /// Next identifier. Must never be 0, which the terminal reads as "unset".
    fn next_id(&mut self) -> u32;
}

/// Uniformly random non-zero identifiers.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIds;

impl IdPolicy for RandomIds {
    fn next_id(&mut self) -> u32 {
        rand::rng().random_range(1..=u32::MAX)
    }
}

/// Incrementing identifiers, skipping 0 on wrap-around.
#[derive(Debug, Clone, Copy)]
pub struct SequentialIds {
    next: u32,
}

impl SequentialIds {
    /// Start counting at `start` (0 is bumped to 1).
    pub const fn new(start: u32) -> Self {
        Self {
            next: if start == 0 { 1 } else { start },
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new(1)
    }
}

impl IdPolicy for SequentialIds {
    fn next_id(&mut self) -> u32 {
        let id = self.next;
        self.next = self.next.checked_add(1).unwrap_or(1);
        id
    }
}

/// Always the same caller-supplied identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedId(
    /// The identifier handed out on every call.
    pub u32,
);

impl IdPolicy for FixedId {
    fn next_id(&mut self) -> u32 {
        self.0
    }
}

/// Image metadata shared by every command of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImageMeta {
    /// Bitmap width in pixels.
    pub width: u16,
    /// Bitmap height in pixels.
    pub height: u16,
    /// Display width in terminal columns (`c`).
    pub columns: Option<u32>,
    /// Quiet level (`q`).
    pub quiet: Option<u32>,
    /// Emit `C=1` so the cursor stays put after drawing.
    pub suppress_cursor_move: bool,
    /// Pixel offset inside the first cell (`X`, `Y`).
    pub offset: Option<(u32, u32)>,
    /// Add `f=24` and `r=1` to frame updates so the terminal decodes RGB
    /// data and replaces the root frame rather than appending a new one.
    pub edit_in_place: bool,
}

impl ImageMeta {
    /// Metadata with only the dimensions set.
    pub const fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            columns: None,
            quiet: None,
            suppress_cursor_move: false,
            offset: None,
            edit_in_place: false,
        }
    }

    /// Full metadata set for a transmit command.
    pub fn transmit_frame(&self, image_id: u32) -> ControlFrame {
        ControlFrame::new()
            .with(ControlKey::Action, Action::Transmit)
            .with(ControlKey::Format, FORMAT_RGB24)
            .with(ControlKey::ImageId, image_id)
            .with(ControlKey::Width, self.width)
            .with(ControlKey::Height, self.height)
            .with_opt(ControlKey::Columns, self.columns)
            .with_opt(ControlKey::NoCursorMove, self.suppress_cursor_move.then_some(true))
            .with_opt(ControlKey::Quiet, self.quiet)
            .with_opt(ControlKey::OffsetX, self.offset.map(|(x, _)| x))
            .with_opt(ControlKey::OffsetY, self.offset.map(|(_, y)| y))
    }

    /// Minimal field set for a frame update.
    pub fn update_frame(&self, image_id: u32) -> ControlFrame {
        ControlFrame::new()
            .with(ControlKey::Action, Action::Frame)
            .with_opt(ControlKey::Format, self.edit_in_place.then_some(FORMAT_RGB24))
            .with(ControlKey::ImageId, image_id)
            .with_opt(ControlKey::FrameNumber, self.edit_in_place.then_some(1u32))
            .with(ControlKey::Width, self.width)
            .with(ControlKey::Height, self.height)
            .with_opt(ControlKey::Quiet, self.quiet)
    }
}

/// Tracks whether the image exists on the terminal side and which
/// identifier addresses it.
pub struct ImageSession {
    mode: SessionMode,
    state: SessionState,
    image_id: Option<u32>,
    ids: Box<dyn IdPolicy>,
}

impl ImageSession {
    /// New session in the `Uninitialized` state.
    pub fn new(mode: SessionMode, ids: Box<dyn IdPolicy>) -> Self {
        Self {
            mode,
            state: SessionState::Uninitialized,
            image_id: None,
            ids,
        }
    }

    /// Session mode with random identifiers.
    pub fn with_random_ids(mode: SessionMode) -> Self {
        Self::new(mode, Box::new(RandomIds))
    }

    /// Current state.
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// Configured mode.
    pub const fn mode(&self) -> SessionMode {
        self.mode
    }

    /// Identifier of the most recently transmitted image.
    pub const fn image_id(&self) -> Option<u32> {
        self.image_id
    }

    /// Create the image: pick an identifier and produce the transmit frame.
    ///
    /// Calling it again after creation re-transmits under the existing
    /// identifier without changing state.
    pub fn open(&mut self, meta: &ImageMeta) -> ControlFrame {
        let id = match self.image_id {
            Some(id) if self.state != SessionState::Uninitialized => id,
            _ => {
                let id = self.ids.next_id();
                self.image_id = Some(id);
                self.state = SessionState::Created;
                tracing::debug!(image_id = id, mode = ?self.mode, "image session created");
                id
            }
        };
        meta.transmit_frame(id)
    }

    /// Control frame for the next render.
    pub fn next_frame(&mut self, meta: &ImageMeta) -> ControlFrame {
        match (self.mode, self.state) {
            (SessionMode::Session, SessionState::Uninitialized) => self.open(meta),
            (SessionMode::Session, _) => {
                self.state = SessionState::Updating;
                match self.image_id {
                    Some(id) => meta.update_frame(id),
                    // Created/Updating always carry an id; reopen if not.
                    None => {
                        self.state = SessionState::Uninitialized;
                        self.open(meta)
                    }
                }
            }
            (SessionMode::TransmitOnly, _) => {
                let id = self.ids.next_id();
                self.image_id = Some(id);
                self.state = SessionState::Updating;
                tracing::trace!(image_id = id, "transmitting new image");
                meta.transmit_frame(id)
            }
        }
    }
}

impl std::fmt::Debug for ImageSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageSession")
            .field("mode", &self.mode)
            .field("state", &self.state)
            .field("image_id", &self.image_id)
            .finish_non_exhaustive()
    }
}
