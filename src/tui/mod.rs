//! Terminal UI: menus, board and game-over popup.

mod controller;
mod input;
mod screen;
mod screens;
mod ui;

pub use controller::Controller;
pub use screen::{Screen, ScreenTransition};

use std::io;

use crossterm::{
    cursor::Show,
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{debug, error, info, instrument, warn};

use crate::{GameConfig, GameMode};

/// Runs the terminal UI until the user quits.
///
/// Opens a game in `mode` directly when given, otherwise starts at the menu.
/// The terminal is restored before any error is returned.
#[instrument(skip(config))]
pub async fn run(config: GameConfig, mode: Option<GameMode>) -> anyhow::Result<()> {
    info!("Starting tic-tac-toe TUI");

    enable_raw_mode()?;
    let _guard = TerminalGuard::new(restore_terminal);

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut controller = match mode {
        Some(mode) => Controller::in_game(config, mode),
        None => Controller::new(config),
    };
    let res = controller.run(&mut terminal).await;

    if let Err(e) = &res {
        error!(error = ?e, "Event loop error");
    }
    res
}

/// Leaves raw mode and the alternate screen, logging anything that fails.
fn restore_terminal() {
    if let Err(e) = disable_raw_mode() {
        warn!(error = %e, "Failed to disable raw mode");
    }
    if let Err(e) = execute!(io::stdout(), LeaveAlternateScreen, Show) {
        warn!(error = %e, "Failed to leave alternate screen");
    }
}

/// Restores the terminal on drop, on both the success and error paths.
struct TerminalGuard<F: FnMut()> {
    restore: F,
}

impl<F: FnMut()> TerminalGuard<F> {
    fn new(restore: F) -> Self {
        Self { restore }
    }
}

impl<F: FnMut()> Drop for TerminalGuard<F> {
    fn drop(&mut self) {
        debug!("Restoring terminal");
        (self.restore)();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn fail_after_setup(restored: &Cell<bool>) -> anyhow::Result<()> {
        let _guard = TerminalGuard::new(|| restored.set(true));
        anyhow::bail!("alternate screen unavailable")
    }

    #[test]
    fn test_guard_restores_on_early_error() {
        let restored = Cell::new(false);
        assert!(fail_after_setup(&restored).is_err());
        assert!(restored.get());
    }

    #[test]
    fn test_guard_restores_on_success() {
        let restored = Cell::new(false);
        {
            let _guard = TerminalGuard::new(|| restored.set(true));
            assert!(!restored.get());
        }
        assert!(restored.get());
    }
}
