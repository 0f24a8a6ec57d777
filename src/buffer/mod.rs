//! Buffer module: pixel storage for the render pipeline.
//!
//! This module contains:
//! - [`MonoBuffer`]: MONO_VLSB monochrome storage that drawing code writes into
//! - [`Bitmap`]: the RGB24 image computed from it on every render

mod bitmap;
mod mono;

pub use bitmap::{Bitmap, BYTES_PER_PIXEL};
pub use mono::MonoBuffer;
