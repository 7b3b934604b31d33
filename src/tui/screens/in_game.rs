//! In-game screen: the board, the cursor and the game-over popup.
//!
//! The screen owns the [`GameSession`] and the receiving end of its event
//! channel. Key presses become session requests; the status line and popup
//! are driven only by the events the session publishes.

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph},
};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument};

use super::menu::{Menu, MenuOption};
use crate::tui::input::{digit_index, move_cursor};
use crate::tui::screen::{Screen, ScreenTransition};
use crate::tui::ui::{center_rect, draw_board, draw_help, draw_title};
use crate::{GameEvent, GameMode, GameSession, Mark, Outcome, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumIter)]
enum GameOverOption {
    PlayAgain,
    ExitGame,
}

impl MenuOption for GameOverOption {
    fn label(self) -> &'static str {
        match self {
            Self::PlayAgain => "Play Again",
            Self::ExitGame => "Exit Game",
        }
    }
}

/// Popup shown once the game has ended.
#[derive(Debug)]
struct GameOverPopup {
    /// Winning mark; `None` for a draw.
    winner: Option<Mark>,
    menu: Menu<GameOverOption>,
}

impl GameOverPopup {
    /// Builds the popup for a finished game, or `None` while still in progress.
    fn for_outcome(outcome: Outcome) -> Option<Self> {
        let winner = match outcome {
            Outcome::InProgress => return None,
            Outcome::Win(mark) => Some(mark),
            Outcome::Draw => None,
        };
        Some(Self {
            winner,
            menu: Menu::new(),
        })
    }

    fn message(&self) -> String {
        match self.winner {
            Some(mark) => format!("{} Wins!", mark),
            None => "Draw".to_string(),
        }
    }
}

/// In-game screen for one session.
#[derive(Debug)]
pub struct InGameScreen {
    session: GameSession,
    events: mpsc::UnboundedReceiver<GameEvent>,
    cursor: Position,
    status: String,
    ai_delay: Duration,
    ai_due: Option<Instant>,
    popup: Option<GameOverPopup>,
}

impl InGameScreen {
    /// Creates a screen running a fresh game in `mode`.
    #[instrument]
    pub fn new(mode: GameMode, ai_seed: Option<u64>, ai_delay: Duration) -> Self {
        let (session, events) = GameSession::new(mode, ai_seed);
        info!(%mode, "Starting game");
        Self {
            session,
            events,
            cursor: Position::Center,
            status: "X to move".to_string(),
            ai_delay,
            ai_due: None,
            popup: None,
        }
    }

    /// The session this screen is playing.
    #[cfg(test)]
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Current status line.
    #[cfg(test)]
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Position under the cursor.
    #[cfg(test)]
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// True while the game-over popup is up.
    pub fn game_over_shown(&self) -> bool {
        self.popup.is_some()
    }

    #[instrument(skip(self))]
    fn place(&mut self, index: usize) {
        if self.session.request_move(index).is_ok() && self.session.awaiting_ai() {
            self.ai_due = Some(Instant::now() + self.ai_delay);
        }
        self.drain_events();
    }

    /// Applies every pending session event to the status line and popup.
    fn drain_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            debug!(?event, "Handling game event");
            match event {
                GameEvent::MovePlayed {
                    mark,
                    position,
                    outcome,
                } => {
                    self.status = match outcome {
                        Outcome::InProgress => {
                            format!("{} played {}. {} to move", mark, position, mark.opponent())
                        }
                        Outcome::Win(winner) => format!("{} wins!", winner),
                        Outcome::Draw => "It's a draw!".to_string(),
                    };
                    if let Some(popup) = GameOverPopup::for_outcome(outcome) {
                        info!(?outcome, "Game over");
                        self.ai_due = None;
                        self.popup = Some(popup);
                    }
                }
                GameEvent::MoveRejected(e) => {
                    self.status = format!("Invalid move: {}", e);
                }
                GameEvent::Reset => {
                    self.status = "New game. X to move".to_string();
                    self.cursor = Position::Center;
                    self.ai_due = None;
                    self.popup = None;
                }
            }
        }
    }

    fn handle_popup_key(&mut self, key: KeyEvent) -> ScreenTransition {
        let Some(popup) = self.popup.as_mut() else {
            return ScreenTransition::Stay;
        };
        match key.code {
            KeyCode::Up => popup.menu.select_previous(),
            KeyCode::Down => popup.menu.select_next(),
            KeyCode::Enter => match popup.menu.selected() {
                GameOverOption::PlayAgain => {
                    info!("Play again selected");
                    self.session.request_reset();
                    self.drain_events();
                }
                GameOverOption::ExitGame => return ScreenTransition::Quit,
            },
            KeyCode::Esc => return ScreenTransition::GoToStartMenu,
            KeyCode::Char('q') | KeyCode::Char('Q') => return ScreenTransition::Quit,
            _ => {}
        }
        ScreenTransition::Stay
    }

    fn render_popup(&self, frame: &mut Frame, popup: &GameOverPopup) {
        let area = center_rect(frame.area(), 30, 9);
        frame.render_widget(Clear, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(4)])
            .split(area);

        let message = Paragraph::new(popup.message())
            .style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Game Over"));
        frame.render_widget(message, chunks[0]);
        popup.menu.render(frame, chunks[1], "");
    }
}

impl Screen for InGameScreen {
    #[instrument(skip(self, frame))]
    fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(11),
                Constraint::Length(3),
                Constraint::Length(3),
            ])
            .split(frame.area());

        draw_title(frame, chunks[0], &format!("Tic Tac Toe - {}", self.session.mode()));

        let cursor = (!self.game_over_shown()).then_some(self.cursor);
        draw_board(frame, chunks[1], self.session.state().board(), cursor);

        let status = Paragraph::new(self.status.as_str())
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Status"));
        frame.render_widget(status, chunks[2]);

        draw_help(
            frame,
            chunks[3],
            "Arrows: Move | Enter/Space: Place | 1-9: Place | Esc: Menu | q: Quit",
        );

        if let Some(popup) = &self.popup {
            self.render_popup(frame, popup);
        }
    }

    #[instrument(skip(self, key))]
    fn handle_key(&mut self, key: KeyEvent) -> ScreenTransition {
        if self.popup.is_some() {
            return self.handle_popup_key(key);
        }

        match key.code {
            KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
                self.cursor = move_cursor(self.cursor, key.code);
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.place(self.cursor.to_index()),
            KeyCode::Esc => return ScreenTransition::GoToStartMenu,
            KeyCode::Char('q') | KeyCode::Char('Q') => return ScreenTransition::Quit,
            code => {
                if let Some(index) = digit_index(code) {
                    self.cursor = Position::from_index(index).unwrap_or(self.cursor);
                    self.place(index);
                }
            }
        }
        ScreenTransition::Stay
    }

    fn tick(&mut self) -> ScreenTransition {
        if let Some(due) = self.ai_due
            && Instant::now() >= due
        {
            self.ai_due = None;
            if self.session.awaiting_ai() {
                // Rejections are published and shown like any other.
                let _ = self.session.request_ai_move();
            }
            self.drain_events();
        }
        ScreenTransition::Stay
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(screen: &mut InGameScreen, code: KeyCode) -> ScreenTransition {
        screen.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn human_game() -> InGameScreen {
        InGameScreen::new(GameMode::HumanVsHuman, None, Duration::ZERO)
    }

    #[test]
    fn test_digit_places_mark() {
        let mut screen = human_game();
        press(&mut screen, KeyCode::Char('1'));
        assert_eq!(
            screen.session().state().board().get(Position::TopLeft).mark(),
            Some(Mark::X)
        );
        assert_eq!(screen.cursor(), Position::TopLeft);
        assert_eq!(screen.status(), "X played Top-left. O to move");
    }

    #[test]
    fn test_enter_places_at_cursor() {
        let mut screen = human_game();
        press(&mut screen, KeyCode::Up);
        press(&mut screen, KeyCode::Enter);
        assert_eq!(
            screen.session().state().board().get(Position::TopCenter).mark(),
            Some(Mark::X)
        );
    }

    #[test]
    fn test_occupied_cell_reports_invalid_move() {
        let mut screen = human_game();
        press(&mut screen, KeyCode::Char('5'));
        press(&mut screen, KeyCode::Char('5'));
        assert_eq!(screen.status(), "Invalid move: Center is already occupied");
        assert_eq!(screen.session().state().turn(), Mark::O);
    }

    #[test]
    fn test_win_shows_popup_and_play_again_resets() {
        let mut screen = human_game();
        for key in ['1', '4', '2', '5', '3'] {
            press(&mut screen, KeyCode::Char(key));
        }
        assert!(screen.game_over_shown());
        assert_eq!(screen.status(), "X wins!");

        // Board input is disabled while the popup is up.
        press(&mut screen, KeyCode::Char('9'));
        assert!(screen.session().state().board().is_empty(Position::BottomRight));

        assert_eq!(press(&mut screen, KeyCode::Enter), ScreenTransition::Stay);
        assert!(!screen.game_over_shown());
        assert_eq!(*screen.session().state(), crate::GameState::new());
    }

    #[test]
    fn test_draw_shows_draw_popup() {
        let mut screen = human_game();
        // X O X / X O O / O X X
        for key in ['1', '2', '3', '5', '4', '6', '8', '7', '9'] {
            press(&mut screen, KeyCode::Char(key));
        }
        assert_eq!(screen.status(), "It's a draw!");
        let popup = screen.popup.as_ref().expect("popup shown after draw");
        assert_eq!(popup.winner, None);
        assert_eq!(popup.message(), "Draw");
    }

    #[test]
    fn test_no_popup_while_in_progress() {
        assert!(GameOverPopup::for_outcome(Outcome::InProgress).is_none());
        let popup = GameOverPopup::for_outcome(Outcome::Win(Mark::O)).unwrap();
        assert_eq!(popup.message(), "O Wins!");
    }

    #[test]
    fn test_exit_from_popup_quits() {
        let mut screen = human_game();
        for key in ['1', '4', '2', '5', '3'] {
            press(&mut screen, KeyCode::Char(key));
        }
        press(&mut screen, KeyCode::Down);
        assert_eq!(press(&mut screen, KeyCode::Enter), ScreenTransition::Quit);
    }

    #[test]
    fn test_ai_answers_on_tick() {
        let mut screen = InGameScreen::new(GameMode::HumanVsAi, Some(3), Duration::ZERO);
        press(&mut screen, KeyCode::Char('5'));
        assert!(screen.session().awaiting_ai());

        // Human input is refused while the AI is to move.
        press(&mut screen, KeyCode::Char('1'));
        assert_eq!(screen.session().state().history().len(), 1);

        screen.tick();
        assert_eq!(screen.session().state().history().len(), 2);
        assert_eq!(screen.session().state().turn(), Mark::X);
    }

    #[test]
    fn test_escape_returns_to_menu() {
        let mut screen = human_game();
        assert_eq!(press(&mut screen, KeyCode::Esc), ScreenTransition::GoToStartMenu);
    }
}
