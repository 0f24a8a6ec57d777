//! Smoke test: Verify the render pipeline without touching the terminal.

use termbuf::{protocol, MonoBuffer, TermBuffer, TermBufferConfig};

fn main() -> termbuf::Result<()> {
    println!("Termbuf Smoke Test");
    println!("==================");
    println!();

    // Create a buffer
    let buffer = MonoBuffer::new(128, 32)?;
    println!("Buffer: {}x{} = {} pages, {} bytes", buffer.width(), buffer.height(), buffer.pages(), buffer.len());
    println!();

    // Render into memory instead of stdout
    let mut canvas = TermBuffer::with_config(128, 32, &TermBufferConfig::transmit_only(), Vec::new())?;
    canvas.text("smoke", 0, 0, true);
    let commands = canvas.frame_commands()?;
    let bitmap = protocol::decode_payload(&commands)?;
    println!("Commands: {}", commands.len());
    println!("Bitmap:   {} bytes", bitmap.len());
    println!("First:    {}", commands[0].control);
    println!();

    println!("Pipeline working!");
    Ok(())
}
