//! Roses are red: four lines of text on a 0.91" 128x32 OLED.

use termbuf::TermBuffer;
use tracing_subscriber::EnvFilter;

fn main() -> termbuf::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut oled = TermBuffer::new(128, 32)?;

    oled.fill(false);
    oled.text("Roses are red,", 0, 0, true);
    oled.text("  Violets R blu,", 0, 8, true);
    oled.text("  I love Kitty,", 0, 16, true);
    oled.text("  & U will too.", 0, 24, true);

    oled.show()?;
    println!();
    Ok(())
}
