//! Opponent selection: AI, another human, or back to the start menu.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};
use tracing::{info, instrument};

use super::menu::{Menu, MenuOption};
use crate::GameMode;
use crate::tui::screen::{Screen, ScreenTransition};
use crate::tui::ui::{draw_help, draw_title};

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumIter)]
enum OpponentOption {
    PlayWithAi,
    PlayWithHuman,
    BackToMenu,
}

impl MenuOption for OpponentOption {
    fn label(self) -> &'static str {
        match self {
            Self::PlayWithAi => "Play with AI",
            Self::PlayWithHuman => "Play with Human",
            Self::BackToMenu => "Back to Menu",
        }
    }
}

/// State for the opponent selection screen.
#[derive(Debug)]
pub struct OpponentSelectScreen {
    menu: Menu<OpponentOption>,
}

impl OpponentSelectScreen {
    /// Creates the screen with "Play with AI" selected.
    #[instrument]
    pub fn new() -> Self {
        Self { menu: Menu::new() }
    }
}

impl Default for OpponentSelectScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen for OpponentSelectScreen {
    #[instrument(skip(self, frame))]
    fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(5),
                Constraint::Length(3),
            ])
            .split(frame.area());

        draw_title(frame, chunks[0], "Choose Opponent");
        self.menu.render(frame, chunks[1], "Opponent");
        draw_help(frame, chunks[2], "↑↓: Navigate | Enter: Select | Esc: Back | q: Quit");
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
                info!(?option, "Opponent option selected");
                match option {
                    OpponentOption::PlayWithAi => ScreenTransition::StartGame(GameMode::HumanVsAi),
                    OpponentOption::PlayWithHuman => {
                        ScreenTransition::StartGame(GameMode::HumanVsHuman)
                    }
                    OpponentOption::BackToMenu => ScreenTransition::GoToStartMenu,
                }
            }
            KeyCode::Esc => ScreenTransition::GoToStartMenu,
            KeyCode::Char('q') | KeyCode::Char('Q') => ScreenTransition::Quit,
            _ => ScreenTransition::Stay,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(screen: &mut OpponentSelectScreen, code: KeyCode) -> ScreenTransition {
        screen.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_options_in_order() {
        let mut screen = OpponentSelectScreen::new();
        assert_eq!(
            press(&mut screen, KeyCode::Enter),
            ScreenTransition::StartGame(GameMode::HumanVsAi)
        );
        press(&mut screen, KeyCode::Down);
        assert_eq!(
            press(&mut screen, KeyCode::Enter),
            ScreenTransition::StartGame(GameMode::HumanVsHuman)
        );
        press(&mut screen, KeyCode::Down);
        assert_eq!(press(&mut screen, KeyCode::Enter), ScreenTransition::GoToStartMenu);
    }

    #[test]
    fn test_escape_goes_back() {
        let mut screen = OpponentSelectScreen::new();
        assert_eq!(press(&mut screen, KeyCode::Esc), ScreenTransition::GoToStartMenu);
    }
}
