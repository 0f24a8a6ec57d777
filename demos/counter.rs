//! Counter: redraw the same image once per second.
//!
//! Every frame reuses the image created at startup, so the terminal
//! updates in place instead of stacking new images.

use std::io::Write;
use std::thread;
use std::time::Duration;

use termbuf::TermBuffer;
use tracing_subscriber::EnvFilter;

fn main() -> termbuf::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    println!();
    print!("oled ready");

    // mimic a 0.91" 128x32 monochrome OLED
    let mut oled = TermBuffer::new(128, 32)?;

    for i in 0u64.. {
        thread::sleep(Duration::from_secs(1));
        oled.fill(false);
        oled.text("Roses are red,", 0, 0, true);
        oled.text("  Violets R blu,", 0, 8, true);
        oled.text("  I love Kitty,", 0, 16, true);
        oled.text(&format!("{i} & U will too."), 0, 24, true);
        oled.show()?;

        print!(".");
        std::io::stdout().flush()?;
    }
    Ok(())
}
