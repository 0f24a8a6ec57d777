//! `TermBuffer`: a monochrome display that renders into the terminal.
//!
//! The canvas owns a [`MonoBuffer`] and forwards drawing to it, either
//! through the `embedded-graphics` [`DrawTarget`] trait or through the
//! framebuf-style helpers below. [`TermBuffer::show`] pushes the current
//! contents to the terminal.
//!
//! ## Example
//!
//! ```rust,no_run
//! use termbuf::TermBuffer;
//!
//! // mimic a 0.91" 128x32 OLED
//! let mut oled = TermBuffer::new(128, 32)?;
//! oled.fill(false);
//! oled.text("Roses are red,", 0, 0, true);
//! oled.show()?;
//! # Ok::<(), termbuf::Error>(())
//! ```

use crate::buffer::{Bitmap, MonoBuffer};
use crate::color::ColorPolicy;
use crate::config::{DisplayColumns, TermBufferConfig};
use crate::error::Result;
use crate::protocol::{encode, GraphicsCommand};
use crate::session::{ImageMeta, ImageSession, SessionMode, SessionState};
use crate::terminal::{self, TerminalSink};
use embedded_graphics::mono_font::ascii::FONT_5X8;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};
use std::convert::Infallible;
use std::io::{self, Stdout, Write};

const fn color(on: bool) -> BinaryColor {
    if on {
        BinaryColor::On
    } else {
        BinaryColor::Off
    }
}

/// A monochrome display rendered through the kitty graphics protocol.
pub struct TermBuffer<W: Write = Stdout> {
    buffer: MonoBuffer,
    /// Reused between renders.
    bitmap: Bitmap,
    colors: ColorPolicy,
    session: ImageSession,
    meta: ImageMeta,
    chunk_size: usize,
    sink: TerminalSink<W>,
}

impl TermBuffer<Stdout> {
    /// Canvas on standard output with the default configuration.
    ///
    /// In session mode (the default) the blank image is transmitted
    /// immediately.
    ///
    /// # Errors
    ///
    /// Fails on invalid dimensions or if the initial write fails.
    pub fn new(width: u16, height: u16) -> Result<Self> {
        if !terminal::stdout_is_tty() {
            tracing::warn!("stdout is not a terminal; graphics commands may be shown as text");
        }
        Self::with_config(width, height, &TermBufferConfig::default(), io::stdout())
    }
}

impl<W: Write> TermBuffer<W> {
    /// Canvas with a custom configuration and writer.
    pub fn with_config(width: u16, height: u16, config: &TermBufferConfig, writer: W) -> Result<Self> {
        let session = ImageSession::new(config.mode, config.ids.into_policy());
        Self::with_session(width, height, config, session, writer)
    }

    /// Canvas with a caller-built session, e.g. one using a custom
    /// [`IdPolicy`](crate::IdPolicy). `config.mode` and `config.ids` are
    /// ignored in favor of the session's own.
    pub fn with_session(
        width: u16,
        height: u16,
        config: &TermBufferConfig,
        session: ImageSession,
        writer: W,
    ) -> Result<Self> {
        config.validate()?;
        let buffer = MonoBuffer::new(width, height)?;

        let columns = match config.columns {
            DisplayColumns::Native => None,
            DisplayColumns::Fixed(n) => Some(n),
            DisplayColumns::Auto => terminal::query_columns(width),
        };
        let meta = ImageMeta {
            width,
            height,
            columns,
            quiet: config.quiet,
            suppress_cursor_move: config.suppress_cursor_move,
            offset: config.placement_offset,
            edit_in_place: config.edit_in_place,
        };

        let mut canvas = Self {
            bitmap: Bitmap::new(width, height),
            colors: config.color_policy(width, height),
            buffer,
            session,
            meta,
            chunk_size: config.chunk_size,
            sink: TerminalSink::new(writer),
        };

        if canvas.session.mode() == SessionMode::Session
            && canvas.session.state() == SessionState::Uninitialized
        {
            canvas.show()?;
        }
        Ok(canvas)
    }

    /// Width in pixels.
    pub const fn width(&self) -> u16 {
        self.buffer.width()
    }

    /// Height in pixels.
    pub const fn height(&self) -> u16 {
        self.buffer.height()
    }

    /// The pixel buffer.
    pub const fn buffer(&self) -> &MonoBuffer {
        &self.buffer
    }

    /// Mutable access to the pixel buffer.
    pub fn buffer_mut(&mut self) -> &mut MonoBuffer {
        &mut self.buffer
    }

    /// The image session.
    pub const fn session(&self) -> &ImageSession {
        &self.session
    }

    /// Metadata sent with transmit commands.
    pub const fn meta(&self) -> &ImageMeta {
        &self.meta
    }

    /// The output sink.
    pub const fn sink(&self) -> &TerminalSink<W> {
        &self.sink
    }

    /// Consume the canvas and return its writer.
    pub fn into_writer(self) -> W {
        self.sink.into_inner()
    }

    /// Recompute the RGB24 bitmap from the buffer.
    pub fn render_bitmap(&mut self) -> &Bitmap {
        self.bitmap.render_from(&self.buffer, &self.colors);
        &self.bitmap
    }

    /// Build the commands for the next render without writing them.
    ///
    /// Advances the session exactly like [`show`](Self::show).
    pub fn frame_commands(&mut self) -> Result<Vec<GraphicsCommand>> {
        self.bitmap.render_from(&self.buffer, &self.colors);
        let control = self.session.next_frame(&self.meta);
        encode(
            self.bitmap.as_bytes(),
            self.width(),
            self.height(),
            &control,
            self.chunk_size,
        )
    }

    /// Push the current buffer contents to the terminal.
    ///
    /// Blocks until every command is written and flushed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Sink`](crate::Error::Sink) if the terminal write fails.
    pub fn show(&mut self) -> Result<()> {
        let commands = self.frame_commands()?;
        self.sink.write_all(&commands)?;
        tracing::trace!(
            image_id = ?self.session.image_id(),
            chunks = commands.len(),
            bytes_written = self.sink.stats().bytes_written,
            "frame shown"
        );
        Ok(())
    }

    // framebuf-style drawing helpers. Coordinates are (x = column, y = row);
    // anything outside the canvas is clipped.

    /// Set every pixel on or off.
    pub fn fill(&mut self, on: bool) {
        self.buffer.fill(on);
    }

    /// Set one pixel.
    pub fn pixel(&mut self, x: i32, y: i32, on: bool) {
        self.draw_or_clip(Pixel(Point::new(x, y), color(on)));
    }

    /// Read one pixel; `None` outside the canvas.
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<bool> {
        let col = u16::try_from(x).ok()?;
        let row = u16::try_from(y).ok()?;
        self.buffer.read(row, col).ok()
    }

    /// Horizontal line of `w` pixels starting at `(x, y)`.
    pub fn hline(&mut self, x: i32, y: i32, w: u32, on: bool) {
        self.rect(x, y, w, 1, on, true);
    }

    /// Vertical line of `h` pixels starting at `(x, y)`.
    pub fn vline(&mut self, x: i32, y: i32, h: u32, on: bool) {
        self.rect(x, y, 1, h, on, true);
    }

    /// Line between two points, inclusive.
    pub fn line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, on: bool) {
        let line = Line::new(Point::new(x1, y1), Point::new(x2, y2))
            .into_styled(PrimitiveStyle::with_stroke(color(on), 1));
        self.draw_or_clip(line);
    }

    /// Rectangle with top-left corner `(x, y)`, outlined or filled.
    pub fn rect(&mut self, x: i32, y: i32, w: u32, h: u32, on: bool, fill: bool) {
        let style = if fill {
            PrimitiveStyle::with_fill(color(on))
        } else {
            PrimitiveStyle::with_stroke(color(on), 1)
        };
        self.draw_or_clip(Rectangle::new(Point::new(x, y), Size::new(w, h)).into_styled(style));
    }

    /// Ellipse centered on `(x, y)` with radii `xr` and `yr`.
    ///
    /// Only rows inside the canvas are visited, so any radius is accepted.
    pub fn ellipse(&mut self, x: i32, y: i32, xr: u32, yr: u32, on: bool, fill: bool) {
        let (cx, cy) = (i64::from(x), i64::from(y));
        let (xr, yr) = (i64::from(xr), i64::from(yr));
        let top = (cy - yr).max(0);
        let bottom = (cy + yr).min(i64::from(self.height()) - 1);
        for row in top..=bottom {
            let dy = (row - cy).abs();
            let outer = half_width(xr, yr, dy);
            if fill || dy == yr {
                self.span(row, cx - outer, cx + outer, on);
            } else {
                // Outline: cover the gap down to the next row's edge.
                let inner = half_width(xr, yr, dy + 1).min(outer - 1);
                self.span(row, cx - outer, cx - inner - 1, on);
                self.span(row, cx + inner + 1, cx + outer, on);
            }
        }
    }

    /// Text with its top-left corner at `(x, y)`, in a 5x8 font.
    /// `on = false` erases the glyph pixels.
    ///
    /// Returns the x position after the last glyph.
    pub fn text(&mut self, text: &str, x: i32, y: i32, on: bool) -> i32 {
        let style = MonoTextStyle::new(&FONT_5X8, color(on));
        Text::with_baseline(text, Point::new(x, y), style, Baseline::Top)
            .draw(&mut self.buffer)
            .unwrap_or_else(|never: Infallible| match never {})
            .x
    }

    /// Pixels `x0..=x1` of `row`, clipped to the canvas.
    fn span(&mut self, row: i64, x0: i64, x1: i64, on: bool) {
        let Ok(row) = u16::try_from(row) else { return };
        if row >= self.height() {
            return;
        }
        let x0 = x0.max(0);
        let x1 = x1.min(i64::from(self.width()) - 1);
        for col in x0..=x1 {
            if let Ok(col) = u16::try_from(col) {
                self.buffer.put(row, col, on);
            }
        }
    }

    fn draw_or_clip<D>(&mut self, drawable: D)
    where
        D: Drawable<Color = BinaryColor>,
    {
        // Drawing into a MonoBuffer cannot fail.
        if let Err(never) = drawable.draw(&mut self.buffer) {
            match never {}
        }
    }
}

/// Half-width of the ellipse row `dy` rows away from the center.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn half_width(xr: i64, yr: i64, dy: i64) -> i64 {
    if yr == 0 {
        return xr;
    }
    let t = dy as f64 / yr as f64;
    (xr as f64 * (-t).mul_add(t, 1.0).max(0.0).sqrt()).round() as i64
}

impl<W: Write> OriginDimensions for TermBuffer<W> {
    fn size(&self) -> Size {
        self.buffer.size()
    }
}

impl<W: Write> DrawTarget for TermBuffer<W> {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> std::result::Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        self.buffer.draw_iter(pixels)
    }

    fn clear(&mut self, color: Self::Color) -> std::result::Result<(), Self::Error> {
        DrawTarget::clear(&mut self.buffer, color)
    }
}

impl<W: Write> std::fmt::Debug for TermBuffer<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TermBuffer")
            .field("buffer", &self.buffer)
            .field("session", &self.session)
            .field("meta", &self.meta)
            .field("chunk_size", &self.chunk_size)
            .field("sink", &self.sink)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IdStrategy;
    use crate::error::{Error, ErrorKind};
    use crate::protocol::{decode_payload, Action, ControlKey};
    use crate::session::FixedId;

    fn config(mode: SessionMode, ids: IdStrategy) -> TermBufferConfig {
        TermBufferConfig { mode, ids, ..TermBufferConfig::default() }
    }

    fn output(canvas: TermBuffer<Vec<u8>>) -> String {
        String::from_utf8(canvas.into_writer()).unwrap()
    }

    #[test]
    fn test_session_mode_transmits_on_construction() {
        let canvas = TermBuffer::with_config(
            128,
            32,
            &config(SessionMode::Session, IdStrategy::Fixed(7)),
            Vec::new(),
        )
        .unwrap();
        assert_eq!(canvas.session().state(), SessionState::Created);
        assert_eq!(canvas.sink().stats().commands, 4);

        let out = output(canvas);
        assert!(out.starts_with("\x1b_Ga=T,f=24,i=7,s=128,v=32,c=32,C=1,m=1;"));
        assert!(out.ends_with("\x1b\\"));
        assert_eq!(out.matches("\x1b_G").count(), 4);
        assert_eq!(out.matches("a=T").count(), 1);
    }

    #[test]
    fn test_session_mode_updates_same_image() {
        let mut canvas = TermBuffer::with_config(
            128,
            32,
            &config(SessionMode::Session, IdStrategy::Sequential { start: 11 }),
            Vec::new(),
        )
        .unwrap();
        canvas.pixel(3, 3, true);
        canvas.show().unwrap();
        canvas.show().unwrap();
        assert_eq!(canvas.session().state(), SessionState::Updating);
        assert_eq!(canvas.session().image_id(), Some(11));

        let out = output(canvas);
        assert_eq!(out.matches("a=T,f=24,i=11,").count(), 1);
        assert_eq!(out.matches("\x1b_Ga=f,i=11,s=128,v=32,m=1;").count(), 2);
        assert!(!out.contains("i=12"));
    }

    #[test]
    fn test_transmit_only_blank_canvas() {
        let mut canvas = TermBuffer::with_config(
            128,
            32,
            &config(SessionMode::TransmitOnly, IdStrategy::Sequential { start: 1 }),
            Vec::new(),
        )
        .unwrap();
        // Nothing is written until the first render.
        assert_eq!(canvas.sink().stats().commands, 0);

        let commands = canvas.frame_commands().unwrap();
        assert_eq!(commands[0].control.action(), Some(Action::Transmit));
        let bitmap = decode_payload(&commands).unwrap();
        assert_eq!(bitmap.len(), 128 * 32 * 3);
        assert!(bitmap.iter().all(|&b| b == 0));

        let next = canvas.frame_commands().unwrap();
        assert_eq!(next[0].control.image_id(), Some(2));
    }

    #[test]
    fn test_one_pixel_round_trip() {
        let mut canvas = TermBuffer::with_config(
            128,
            32,
            &TermBufferConfig::transmit_only(),
            Vec::new(),
        )
        .unwrap();
        canvas.pixel(5, 20, true);
        let bitmap = decode_payload(&canvas.frame_commands().unwrap()).unwrap();
        let base = (20 * 128 + 5) * 3;
        assert_eq!(&bitmap[base..base + 3], &[0, 255, 255]);
        let lit = bitmap.chunks_exact(3).filter(|px| px != &[0, 0, 0]).count();
        assert_eq!(lit, 1);
    }

    #[test]
    fn test_custom_session_policy() {
        let session = ImageSession::new(SessionMode::Session, Box::new(FixedId(1234)));
        let mut canvas = TermBuffer::with_session(
            16,
            8,
            &TermBufferConfig::default(),
            session,
            Vec::new(),
        )
        .unwrap();
        let commands = canvas.frame_commands().unwrap();
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].control.to_string(), "a=f,i=1234,s=16,v=8,m=0");
    }

    #[test]
    fn test_native_columns_and_offset() {
        let config = TermBufferConfig {
            columns: DisplayColumns::Native,
            suppress_cursor_move: false,
            placement_offset: Some((2, 4)),
            quiet: Some(1),
            ids: IdStrategy::Fixed(5),
            ..TermBufferConfig::default()
        };
        let canvas = TermBuffer::with_config(8, 8, &config, Vec::new()).unwrap();
        assert!(!canvas.meta().transmit_frame(5).contains(ControlKey::Columns));
        assert!(output(canvas).starts_with("\x1b_Ga=T,f=24,i=5,s=8,v=8,q=1,X=2,Y=4,m=0;"));
    }

    #[test]
    fn test_rejects_bad_geometry() {
        let err = TermBuffer::with_config(128, 30, &TermBufferConfig::default(), Vec::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Layout);
        assert!(matches!(err, Error::UnalignedHeight { height: 30 }));
    }

    #[test]
    fn test_rejects_bad_config() {
        let config = TermBufferConfig { chunk_size: 0, ..TermBufferConfig::default() };
        let err = TermBuffer::with_config(8, 8, &config, Vec::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Encoding);
    }

    #[test]
    fn test_sink_failure_surfaces() {
        struct Closed;
        impl Write for Closed {
            fn write(&mut self, _: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }
        let err = TermBuffer::with_config(8, 8, &TermBufferConfig::default(), Closed).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Sink);
    }

    #[test]
    fn test_bordered_config() {
        let config = TermBufferConfig { border: true, ..TermBufferConfig::transmit_only() };
        let mut canvas = TermBuffer::with_config(16, 8, &config, Vec::new()).unwrap();
        let bitmap = canvas.render_bitmap();
        assert_eq!(bitmap.pixel(0, 5), Some(crate::Rgb::WHITE));
        assert_eq!(bitmap.pixel(4, 5), Some(crate::Rgb::BLACK));
    }

    #[test]
    fn test_drawing_helpers() {
        let mut canvas = TermBuffer::with_config(32, 16, &TermBufferConfig::transmit_only(), Vec::new()).unwrap();

        canvas.hline(0, 0, 10, true);
        assert_eq!(canvas.buffer().count_on(), 10);

        canvas.fill(false);
        canvas.vline(4, 2, 5, true);
        assert_eq!(canvas.get_pixel(4, 6), Some(true));
        assert_eq!(canvas.get_pixel(4, 7), Some(false));

        canvas.fill(false);
        canvas.rect(0, 0, 4, 4, true, false);
        assert_eq!(canvas.buffer().count_on(), 12);
        assert_eq!(canvas.get_pixel(1, 1), Some(false));

        canvas.fill(false);
        canvas.line(0, 15, 31, 0, true);
        assert_eq!(canvas.get_pixel(0, 15), Some(true));
        assert_eq!(canvas.get_pixel(31, 0), Some(true));

        canvas.fill(false);
        canvas.ellipse(16, 8, 4, 4, true, true);
        assert_eq!(canvas.get_pixel(16, 8), Some(true));
        assert_eq!(canvas.get_pixel(0, 0), Some(false));

        canvas.pixel(-1, 100, true);
        assert_eq!(canvas.get_pixel(-1, 100), None);
    }

    #[test]
    fn test_text_draws_glyphs() {
        let mut canvas = TermBuffer::with_config(64, 8, &TermBufferConfig::transmit_only(), Vec::new()).unwrap();
        let end = canvas.text("Hi", 0, 0, true);
        assert_eq!(end, 10);
        assert!(canvas.buffer().count_on() > 0);
        // Nothing below the 8-pixel glyph cell.
        canvas.fill(false);
        canvas.text(" ", 0, 0, true);
        assert_eq!(canvas.buffer().count_on(), 0);
    }

    #[test]
    fn test_text_erases_with_off_color() {
        let mut canvas = TermBuffer::with_config(64, 8, &TermBufferConfig::transmit_only(), Vec::new()).unwrap();
        canvas.text("Hi", 0, 0, true);
        let lit = canvas.buffer().count_on();
        assert!(lit > 0);

        canvas.text("Hi", 0, 0, false);
        assert_eq!(canvas.buffer().count_on(), 0);

        // Glyph pixels go dark on a lit background.
        canvas.fill(true);
        canvas.text("Hi", 0, 0, false);
        assert_eq!(canvas.buffer().count_on(), 64 * 8 - lit);
    }

    #[test]
    fn test_oversized_ellipse_clips() {
        let mut canvas = TermBuffer::with_config(16, 8, &TermBufferConfig::transmit_only(), Vec::new()).unwrap();
        canvas.ellipse(0, 0, u32::MAX / 2 + 1, 1, true, false);
        // Center row: only the right-hand arc is on the canvas.
        assert_eq!(canvas.get_pixel(0, 0), Some(false));
        assert_eq!(canvas.get_pixel(15, 0), Some(true));
        // Bottom row of the ellipse is a single pixel below the center.
        assert_eq!(canvas.get_pixel(0, 1), Some(true));
        assert_eq!(canvas.get_pixel(1, 1), Some(false));
        assert_eq!(canvas.buffer().count_on(), 16);

        canvas.fill(false);
        canvas.ellipse(8, 4, u32::MAX, u32::MAX, true, true);
        assert_eq!(canvas.buffer().count_on(), 16 * 8);
    }

    #[test]
    fn test_ellipse_outline_is_hollow() {
        let mut canvas = TermBuffer::with_config(32, 16, &TermBufferConfig::transmit_only(), Vec::new()).unwrap();
        canvas.ellipse(16, 8, 4, 4, true, false);
        for (x, y) in [(16, 4), (16, 12), (12, 8), (20, 8)] {
            assert_eq!(canvas.get_pixel(x, y), Some(true), "({x}, {y})");
        }
        assert_eq!(canvas.get_pixel(16, 8), Some(false));
    }

    #[test]
    fn test_custom_writer_does_not_warn_about_stdout() {
        #[derive(Clone, Default)]
        struct Captured(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);
        impl Write for Captured {
            fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
                self.0.lock().unwrap().extend_from_slice(buf);
                Ok(buf.len())
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let logs = Captured::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            TermBuffer::with_config(16, 8, &TermBufferConfig::default(), Vec::new()).unwrap();
        });
        let logs = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(!logs.contains("not a terminal"), "{logs}");
    }

    #[test]
    fn test_edit_in_place_frame_update() {
        let config = TermBufferConfig {
            edit_in_place: true,
            ids: IdStrategy::Fixed(3),
            ..TermBufferConfig::default()
        };
        let mut canvas = TermBuffer::with_config(16, 8, &config, Vec::new()).unwrap();
        let commands = canvas.frame_commands().unwrap();
        assert_eq!(commands[0].control.to_string(), "a=f,f=24,i=3,r=1,s=16,v=8,m=0");
    }
}
