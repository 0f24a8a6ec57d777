//! The MicroPython logo on a 256x256 canvas, using the bordered palette.

use termbuf::{TermBuffer, TermBufferConfig};
use tracing_subscriber::EnvFilter;

fn main() -> termbuf::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let dim: i32 = 256;
    let wide = (dim * 11) / 50;
    let narrow = (dim * 2) / 50;
    let eye_pad_right = (dim * 4) / 50;
    let eye_pad_bottom = (dim * 5) / 50;
    let eye_width = (dim * 2) / 50;
    let eye_height = (dim * 4) / 50;

    let config = TermBufferConfig {
        border: true,
        ..TermBufferConfig::default()
    };
    let mut display = TermBuffer::with_config(256, 256, &config, std::io::stdout())?;

    let (wide_u, narrow_u) = (wide.unsigned_abs(), narrow.unsigned_abs());
    for i in 0..4 {
        display.rect(i * (wide + narrow), 0, wide_u, dim.unsigned_abs(), true, true);
    }
    for i in 0..3 {
        let y = if i % 2 == 0 { 0 } else { dim - wide };
        display.rect(wide + i * (narrow + wide), y, narrow_u, wide_u, true, true);
    }

    display.rect(
        dim - eye_pad_right - eye_width,
        dim - eye_pad_bottom - eye_height,
        eye_width.unsigned_abs(),
        eye_height.unsigned_abs(),
        false,
        true,
    );

    display.show()?;
    println!();
    Ok(())
}
