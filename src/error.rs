//! Error types for the render pipeline.
//!
//! Every failure is surfaced to the caller; nothing inside the pipeline is
//! retried. [`Error::kind`] groups the variants into the three classes a
//! caller usually cares about.

use std::io;

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Canvas geometry or pixel coordinates violate the MONO_VLSB layout.
    Layout,
    /// Payload framing or configuration problem. Indicates a programming error.
    Encoding,
    /// Writing to the terminal failed.
    Sink,
}

/// Errors produced by termbuf.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Width or height is zero.
    #[error("canvas dimensions must be non-zero: {width}x{height}")]
    EmptyCanvas {
        /// Requested width in pixels.
        width: u16,
        /// Requested height in pixels.
        height: u16,
    },

    /// Height is not a multiple of 8 (one page = 8 rows).
    #[error("canvas height {height} is not a multiple of 8")]
    UnalignedHeight {
        /// Requested height in pixels.
        height: u16,
    },

    /// Pixel coordinates outside the canvas.
    #[error("pixel (row {row}, col {col}) out of bounds for {width}x{height} canvas")]
    OutOfBounds {
        /// Requested row.
        row: u16,
        /// Requested column.
        col: u16,
        /// Canvas width.
        width: u16,
        /// Canvas height.
        height: u16,
    },

    /// Adopted byte storage does not match `pages * width`.
    #[error("buffer length {actual} does not match expected {expected}")]
    BufferLength {
        /// Expected length in bytes.
        expected: usize,
        /// Provided length in bytes.
        actual: usize,
    },

    /// Chunk size outside `1..=max`.
    #[error("invalid chunk size {size}: must be within 1..={max}")]
    InvalidChunkSize {
        /// Requested chunk size.
        size: usize,
        /// Largest size the terminal accepts.
        max: usize,
    },

    /// Bitmap length does not match `width * height * 3`.
    #[error("bitmap length {actual} does not match {width}x{height} RGB24 ({expected} bytes)")]
    BitmapLength {
        /// Bitmap width.
        width: u16,
        /// Bitmap height.
        height: u16,
        /// Expected length in bytes.
        expected: usize,
        /// Provided length in bytes.
        actual: usize,
    },

    /// Payload could not be base64-decoded.
    #[error("base64 decode error: {0}")]
    Base64Decode(#[from] base64::DecodeError),

    /// A configuration value is unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The terminal write failed (closed stream, broken pipe, ...).
    #[error("terminal write failed: {0}")]
    Sink(#[from] io::Error),
}

impl Error {
    /// Classify this error.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyCanvas { .. }
            | Self::UnalignedHeight { .. }
            | Self::OutOfBounds { .. }
            | Self::BufferLength { .. } => ErrorKind::Layout,
            Self::InvalidChunkSize { .. }
            | Self::BitmapLength { .. }
            | Self::Base64Decode(_)
            | Self::InvalidConfig(_) => ErrorKind::Encoding,
            Self::Sink(_) => ErrorKind::Sink,
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
