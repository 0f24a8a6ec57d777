//! `GraphicsCommand`: one escape sequence on the wire.
//!
//! ```text
//! ESC _ G <key>=<value>,... [; <base64 chunk>] ESC \
//! ```

use super::control::ControlFrame;
use std::fmt;

/// Start of a graphics APC sequence.
pub const APC_START: &str = "\x1b_G";

/// String terminator.
pub const ST: &str = "\x1b\\";

/// A single graphics protocol command: control fields plus an optional
/// base64 payload chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphicsCommand {
    /// Control fields.
    pub control: ControlFrame,
    /// Base64 text. Empty means no `;` separator is written.
    pub payload: String,
}

impl GraphicsCommand {
    /// Create a command.
    pub fn new(control: ControlFrame, payload: impl Into<String>) -> Self {
        Self {
            control,
            payload: payload.into(),
        }
    }

    /// Append the escape sequence to `out`.
    pub fn write_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(APC_START.as_bytes());
        out.extend_from_slice(self.control.to_string().as_bytes());
        if !self.payload.is_empty() {
            out.push(b';');
            out.extend_from_slice(self.payload.as_bytes());
        }
        out.extend_from_slice(ST.as_bytes());
    }

    /// The escape sequence as bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(APC_START.len() + 64 + self.payload.len() + ST.len());
        self.write_to(&mut out);
        out
    }
}

impl fmt::Display for GraphicsCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(APC_START)?;
        write!(f, "{}", self.control)?;
        if !self.payload.is_empty() {
            write!(f, ";{}", self.payload)?;
        }
        f.write_str(ST)
    }
}

impl crossterm::Command for GraphicsCommand {
    fn write_ansi(&self, f: &mut impl fmt::Write) -> fmt::Result {
        write!(f, "{self}")
    }

    #[cfg(windows)]
    fn execute_winapi(&self) -> std::io::Result<()> {
        Err(std::io::Error::new(
            std::io::ErrorKind::Unsupported,
            "graphics commands require an ANSI terminal",
        ))
    }
}
