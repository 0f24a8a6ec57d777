//! Saturn: a planet and its ring on a 0.96" 128x64 OLED.

use termbuf::TermBuffer;
use tracing_subscriber::EnvFilter;

fn main() -> termbuf::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let (w, h) = (128, 64);
    let mut display = TermBuffer::new(w, h)?;

    let (w, h) = (i32::from(w), i32::from(h));
    display.line(0, h - 1, w - 1, 0, true);
    let r = w.min(h).unsigned_abs() / 4;
    display.ellipse(w / 2, h / 2, r, r, true, false);
    display.show()?;

    println!();
    Ok(())
}
