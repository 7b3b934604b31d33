//! A game session: the boundary between game state and the shell.
//!
//! The shell owns a [`GameSession`], sends it move and reset requests, and
//! reads [`GameEvent`]s from the receiving half of the session's channel
//! instead of inspecting the state after every keystroke.

use derive_getters::Getters;
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

use super::action::MoveError;
use super::ai::RandomAi;
use super::game::GameState;
use super::position::Position;
use super::types::{Mark, Outcome};

/// Who sits across the board from the human.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum GameMode {
    /// Two humans share the keyboard.
    #[display("Human vs Human")]
    HumanVsHuman,
    /// The human plays X against a random AI playing O.
    #[display("Human vs AI")]
    HumanVsAi,
}

/// Notification published after each request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// A move was accepted.
    MovePlayed {
        /// Mark that was placed.
        mark: Mark,
        /// Where it was placed.
        position: Position,
        /// Outcome after the move.
        outcome: Outcome,
    },
    /// A move request was turned down; nothing changed.
    MoveRejected(MoveError),
    /// The board was cleared for a new round.
    Reset,
}

/// One game plus its opponent and event channel.
#[derive(Debug, Getters)]
pub struct GameSession {
    state: GameState,
    #[getter(skip)]
    mode: GameMode,
    #[getter(skip)]
    ai: Option<RandomAi>,
    #[getter(skip)]
    events: mpsc::UnboundedSender<GameEvent>,
}

impl GameSession {
    /// Creates a session and the receiver its events are published on.
    ///
    /// In AI mode the AI plays O, seeded from `ai_seed` when given.
    #[instrument]
    pub fn new(mode: GameMode, ai_seed: Option<u64>) -> (Self, mpsc::UnboundedReceiver<GameEvent>) {
        let (events, rx) = mpsc::unbounded_channel();
        let ai = match mode {
            GameMode::HumanVsHuman => None,
            GameMode::HumanVsAi => Some(RandomAi::from_seed(Mark::O, ai_seed)),
        };
        info!(%mode, "Game session created");
        let session = Self {
            state: GameState::new(),
            mode,
            ai,
            events,
        };
        (session, rx)
    }

    /// The session's mode.
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// The AI's mark, if this session has an AI.
    pub fn ai_mark(&self) -> Option<Mark> {
        self.ai.as_ref().map(RandomAi::mark)
    }

    /// True when the game is waiting on the AI.
    pub fn awaiting_ai(&self) -> bool {
        !self.state.is_over() && self.ai_mark() == Some(self.state.turn())
    }

    /// Handles a human move request at `index` (0-8).
    ///
    /// # Errors
    ///
    /// Everything [`GameState::apply_move`] rejects, plus
    /// [`MoveError::NotYourTurn`] while the AI is to move.
    #[instrument(skip(self), fields(mode = %self.mode))]
    pub fn request_move(&mut self, index: usize) -> Result<Outcome, MoveError> {
        let result = if self.awaiting_ai() {
            Err(MoveError::NotYourTurn(self.state.turn().opponent()))
        } else {
            let mark = self.state.turn();
            self.state.apply_move(index).map(|outcome| (mark, outcome))
        };

        match result {
            Ok((mark, outcome)) => {
                // apply_move only accepts in-range indices.
                if let Some(position) = Position::from_index(index) {
                    self.publish(GameEvent::MovePlayed {
                        mark,
                        position,
                        outcome,
                    });
                }
                Ok(outcome)
            }
            Err(e) => {
                debug!(error = %e, "Move request rejected");
                self.publish(GameEvent::MoveRejected(e));
                Err(e)
            }
        }
    }

    /// Lets the AI take its turn.
    ///
    /// # Errors
    ///
    /// [`MoveError::NoAiOpponent`] outside AI mode, otherwise whatever
    /// [`GameState::ai_move`] rejects.
    #[instrument(skip(self), fields(mode = %self.mode))]
    pub fn request_ai_move(&mut self) -> Result<Position, MoveError> {
        let result = match self.ai.as_mut() {
            Some(ai) => self.state.ai_move(ai).map(|pos| (ai.mark(), pos)),
            None => Err(MoveError::NoAiOpponent),
        };

        match result {
            Ok((mark, position)) => {
                self.publish(GameEvent::MovePlayed {
                    mark,
                    position,
                    outcome: self.state.outcome(),
                });
                Ok(position)
            }
            Err(e) => {
                debug!(error = %e, "AI move request rejected");
                self.publish(GameEvent::MoveRejected(e));
                Err(e)
            }
        }
    }

    /// Clears the board for a new round.
    #[instrument(skip(self))]
    pub fn request_reset(&mut self) {
        self.state.reset();
        self.publish(GameEvent::Reset);
    }

    fn publish(&self, event: GameEvent) {
        if let Err(e) = self.events.send(event) {
            warn!(event = ?e.0, "Event receiver dropped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_human_mode_has_no_ai() {
        let (mut session, _rx) = GameSession::new(GameMode::HumanVsHuman, None);
        assert_eq!(session.ai_mark(), None);
        assert!(!session.awaiting_ai());
        assert_eq!(session.request_ai_move(), Err(MoveError::NoAiOpponent));
    }

    #[test]
    fn test_closed_receiver_does_not_fail_moves() {
        let (mut session, rx) = GameSession::new(GameMode::HumanVsHuman, None);
        drop(rx);
        assert_eq!(session.request_move(0), Ok(Outcome::InProgress));
    }
}
