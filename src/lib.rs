//! # Termbuf
//!
//! Render monochrome display framebuffers inside a terminal.
//!
//! Termbuf lets code written for small monochrome displays (SSD1306-style
//! OLEDs) draw into an in-memory MONO_VLSB buffer and show the result in
//! any terminal that speaks the kitty graphics protocol.
//!
//! ## Core Concepts
//!
//! - **MONO_VLSB buffer**: 8 vertical pixels per byte, pages of 8 rows
//! - **Color mapping**: each bit becomes an RGB24 pixel
//! - **Image session**: transmit once, then update the same image in place
//! - **Chunked encoding**: base64 payload split into escape sequences of at most 4096 bytes
//!
//! ## Example
//!
//! ```rust,no_run
//! use termbuf::TermBuffer;
//!
//! let mut oled = TermBuffer::new(128, 32)?;
//! oled.text("I love Kitty,", 0, 16, true);
//! oled.line(0, 31, 127, 0, true);
//! oled.show()?;
//! # Ok::<(), termbuf::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod buffer;
pub mod canvas;
pub mod color;
pub mod config;
pub mod error;
pub mod protocol;
pub mod session;
pub mod terminal;

// Re-exports for convenience
pub use buffer::{Bitmap, MonoBuffer};
pub use canvas::TermBuffer;
pub use color::{BorderedPalette, ColorMap, ColorPolicy, Palette, Rgb};
pub use config::{DisplayColumns, IdStrategy, TermBufferConfig};
pub use error::{Error, ErrorKind, Result};
pub use protocol::{encode, Action, ControlFrame, ControlKey, GraphicsCommand};
pub use session::{FixedId, IdPolicy, ImageMeta, ImageSession, RandomIds, SequentialIds, SessionMode, SessionState};
pub use terminal::TerminalSink;
