//! `TerminalSink`: writes graphics commands to the terminal.

use crate::protocol::GraphicsCommand;
use std::io::{self, Stdout, Write};

/// Counters for everything a sink has written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SinkStats {
    /// Commands written.
    pub commands: u64,
    /// Bytes written.
    pub bytes_written: u64,
}

/// Synchronous writer for graphics commands.
///
/// Each command is assembled in a reusable staging buffer, written with a
/// single `write_all`, and flushed before `write` returns. Errors are
/// returned as-is; nothing is retried.
pub struct TerminalSink<W: Write = Stdout> {
    writer: W,
    /// Staging buffer for one escape sequence.
    staging: Vec<u8>,
    stats: SinkStats,
}

impl TerminalSink<Stdout> {
    /// Sink on standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalSink<W> {
    /// Wrap a writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            // one full-size chunk plus control fields
            staging: Vec::with_capacity(4096 + 128),
            stats: SinkStats::default(),
        }
    }

    /// Write one command and flush.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    pub fn write(&mut self, command: &GraphicsCommand) -> io::Result<()> {
        self.staging.clear();
        command.write_to(&mut self.staging);
        self.writer.write_all(&self.staging)?;
        self.writer.flush()?;

        self.stats.commands += 1;
        self.stats.bytes_written += self.staging.len() as u64;
        Ok(())
    }

    /// Write a sequence of commands, flushing after each one.
    pub fn write_all(&mut self, commands: &[GraphicsCommand]) -> io::Result<()> {
        commands.iter().try_for_each(|command| self.write(command))
    }

    /// Counters so far.
    pub const fn stats(&self) -> SinkStats {
        self.stats
    }

    /// The wrapped writer.
    pub const fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Unwrap the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> std::fmt::Debug for TerminalSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerminalSink")
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}
