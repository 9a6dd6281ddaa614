//! Terminal lifecycle: alternate screen, raw mode and mouse capture.

use std::io::{self, Stdout, stdout};
use std::panic;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::warn;
use ratatui::{Terminal, backend::CrosstermBackend};

pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Takes over the terminal. Mouse capture is needed for the click targets.
pub fn init() -> io::Result<Tui> {
    install_panic_hook();
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen, EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    terminal.clear()?;
    Ok(terminal)
}

pub fn restore() -> io::Result<()> {
    execute!(stdout(), DisableMouseCapture, LeaveAlternateScreen)?;
    disable_raw_mode()
}

/// Runs `restore_terminal` whatever the main loop returned. A loop error wins over a
/// restore error, which is only logged then.
pub fn finish<T>(
    result: anyhow::Result<T>,
    restore_terminal: impl FnOnce() -> io::Result<()>,
) -> anyhow::Result<T> {
    match (result, restore_terminal()) {
        (Ok(value), Ok(())) => Ok(value),
        (Ok(_), Err(err)) => Err(anyhow::Error::new(err).context("Failed to restore terminal")),
        (Err(err), restored) => {
            if let Err(restore_err) = restored {
                warn!("Failed to restore terminal: {}", restore_err);
            }
            Err(err)
        }
    }
}

/// Puts the terminal back before the default hook prints the panic message.
fn install_panic_hook() {
    let original = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let _ = restore();
        original(info);
    }));
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use anyhow::anyhow;

    use super::*;

    #[test]
    fn loop_error_still_restores() {
        let restored = Cell::new(false);
        let result: anyhow::Result<()> = finish(Err(anyhow!("draw failed")), || {
            restored.set(true);
            Ok(())
        });
        assert!(restored.get());
        assert_eq!(result.unwrap_err().to_string(), "draw failed");
    }

    #[test]
    fn restore_error_surfaces_after_clean_exit() {
        let result = finish(Ok(()), || Err(io::Error::other("tty gone")));
        assert!(result.is_err());
    }

    #[test]
    fn loop_error_wins_over_restore_error() {
        let result: anyhow::Result<()> =
            finish(Err(anyhow!("draw failed")), || Err(io::Error::other("tty gone")));
        assert_eq!(result.unwrap_err().to_string(), "draw failed");
    }
}
