//! Typewriter: type a poem one glyph at a time on a 0.96" 128x64 OLED.

use std::thread;
use std::time::Duration;

use termbuf::TermBuffer;
use tracing_subscriber::EnvFilter;

const LINES: [&str; 6] = [
    "Roses are red,",
    " Violets R blue,",
    "",
    "Rust is",
    "    cool,",
    " and U R too! <3",
];

fn main() -> termbuf::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    println!();
    println!("animation starting...");

    let mut oled = TermBuffer::new(128, 64)?;
    oled.fill(false);

    for (y, line) in (0i32..).zip(LINES) {
        for (x, c) in (0i32..).zip(line.chars()) {
            let mut glyph = [0u8; 4];
            oled.text(c.encode_utf8(&mut glyph), x * 8, y * 8, true);
            oled.show()?;
            if c != ' ' {
                thread::sleep(Duration::from_millis(200));
            }
        }
    }

    println!("done!");
    Ok(())
}
