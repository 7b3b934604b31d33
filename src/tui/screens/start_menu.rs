//! Start menu: the first screen shown.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};
use tracing::{info, instrument};

use super::menu::{Menu, MenuOption};
use crate::tui::screen::{Screen, ScreenTransition};
use crate::tui::ui::{draw_help, draw_title};

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumIter)]
enum StartOption {
    StartGame,
    ExitGame,
}

impl MenuOption for StartOption {
    fn label(self) -> &'static str {
        match self {
            Self::StartGame => "Start Game",
            Self::ExitGame => "Exit Game",
        }
    }
}

/// State for the start menu.
#[derive(Debug)]
pub struct StartMenuScreen {
    menu: Menu<StartOption>,
}

impl StartMenuScreen {
    /// Creates the start menu with "Start Game" selected.
    #[instrument]
    pub fn new() -> Self {
        Self { menu: Menu::new() }
    }
}

impl Default for StartMenuScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen for StartMenuScreen {
    #[instrument(skip(self, frame))]
    fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(4),
                Constraint::Length(3),
            ])
            .split(frame.area());

        draw_title(frame, chunks[0], "Tic Tac Toe");
        self.menu.render(frame, chunks[1], "Menu");
        draw_help(frame, chunks[2], "↑↓: Navigate | Enter: Select | q: Quit");
    }

    #[instrument(skip(self, key))]
    fn handle_key(&mut self, key: KeyEvent) -> ScreenTransition {
        match key.code {
            KeyCode::Up => {
                self.menu.select_previous();
                ScreenTransition::Stay
            }
            KeyCode::Down => {
                self.menu.select_next();
                ScreenTransition::Stay
            }
            KeyCode::Enter => {
                let option = self.menu.selected();
                info!(?option, "Start menu option selected");
                match option {
                    StartOption::StartGame => ScreenTransition::GoToOpponentSelect,
                    StartOption::ExitGame => ScreenTransition::Quit,
                }
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => ScreenTransition::Quit,
            _ => ScreenTransition::Stay,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(screen: &mut StartMenuScreen, code: KeyCode) -> ScreenTransition {
        screen.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_start_game_opens_opponent_select() {
        let mut screen = StartMenuScreen::new();
        assert_eq!(press(&mut screen, KeyCode::Enter), ScreenTransition::GoToOpponentSelect);
    }

    #[test]
    fn test_exit_game_quits() {
        let mut screen = StartMenuScreen::new();
        assert_eq!(press(&mut screen, KeyCode::Down), ScreenTransition::Stay);
        assert_eq!(press(&mut screen, KeyCode::Enter), ScreenTransition::Quit);
    }
}
