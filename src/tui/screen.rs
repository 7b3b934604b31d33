//! Screen trait and transition type for the menu state machine.

use crossterm::event::KeyEvent;
use ratatui::Frame;

use crate::GameMode;

/// The result of handling an input event on a screen.
///
/// Screens return this from [`Screen::handle_key`] and [`Screen::tick`] to
/// drive the [`Controller`](super::Controller) state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenTransition {
    /// Stay on the current screen.
    Stay,
    /// Navigate to the start menu.
    GoToStartMenu,
    /// Navigate to the opponent selection menu.
    GoToOpponentSelect,
    /// Start a new game in the given mode.
    StartGame(GameMode),
    /// Exit the application cleanly.
    Quit,
}

/// Trait implemented by each screen in the state machine.
///
/// Each screen owns its own state, renders its UI, and handles key events.
pub trait Screen {
    /// Renders the screen into the provided [`Frame`].
    fn render(&self, frame: &mut Frame);

    /// Handles a key event and returns the resulting [`ScreenTransition`].
    fn handle_key(&mut self, key: KeyEvent) -> ScreenTransition;

    /// Called once per loop iteration, with or without input.
    fn tick(&mut self) -> ScreenTransition {
        ScreenTransition::Stay
    }
}
