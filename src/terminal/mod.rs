//! Terminal module: output sink and terminal geometry queries.

mod output;

pub use output::{SinkStats, TerminalSink};

use crossterm::terminal::WindowSize;
use crossterm::tty::IsTty;

/// Columns needed to show `image_width` pixels at the terminal's native
/// cell size.
///
/// Returns `None` when the terminal does not report its pixel size.
pub fn fit_columns(image_width: u16, window: &WindowSize) -> Option<u32> {
    if window.width == 0 || window.columns == 0 {
        return None;
    }
    let cell_width = (u32::from(window.width) / u32::from(window.columns)).max(1);
    Some(u32::from(image_width).div_ceil(cell_width).max(1))
}

/// Query the terminal and compute [`fit_columns`] for standard output.
pub fn query_columns(image_width: u16) -> Option<u32> {
    match crossterm::terminal::window_size() {
        Ok(window) => fit_columns(image_width, &window),
        Err(e) => {
            tracing::debug!(error = %e, "window size query failed");
            None
        }
    }
}

/// Check whether standard output is a terminal.
pub fn stdout_is_tty() -> bool {
    std::io::stdout().is_tty()
}
