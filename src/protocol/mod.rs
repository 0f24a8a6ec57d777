//! Protocol module: kitty graphics escape commands.
//!
//! This module contains:
//! - [`ControlFrame`]: ordered `key=value` control fields
//! - [`GraphicsCommand`]: one `ESC _ G ... ESC \` sequence
//! - [`encode`]: base64 framing and chunking of a bitmap
//!
//! Reference: <https://sw.kovidgoyal.net/kitty/graphics-protocol/>

mod command;
mod control;
mod encoder;

pub use command::{GraphicsCommand, APC_START, ST};
pub use control::{Action, ControlFrame, ControlKey, ControlValue};
pub use encoder::{
    check_chunk_size, decode_payload, encode, encode_payload, DEFAULT_CHUNK_SIZE, MAX_CHUNK_SIZE,
};

/// Pixel format value for 24-bit RGB (`f=24`).
pub const FORMAT_RGB24: u32 = 24;
