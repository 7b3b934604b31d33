//! First-class action types for tic-tac-toe.
//!
//! Moves are domain events, not side effects. They record who placed which
//! mark where, and carry the reasons a request can be turned down.

use super::{Mark, Position};
use serde::{Deserialize, Serialize};

/// A move in tic-tac-toe: a mark placed at a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// The mark that was placed.
    pub mark: Mark,
    /// Where it was placed.
    pub position: Position,
}

impl Move {
    /// Creates a new move.
    pub fn new(mark: Mark, position: Position) -> Self {
        Self { mark, position }
    }
}

/// Reason a move request was rejected.
///
/// A rejected move never changes the game state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum MoveError {
    /// Index is not on the board.
    #[display("Position {} is out of range (must be 0-8)", _0)]
    OutOfRange(#[error(not(source))] usize),

    /// The cell is already occupied.
    #[display("{} is already occupied", _0)]
    CellOccupied(#[error(not(source))] Position),

    /// The game is already over.
    #[display("Game is already over")]
    GameOver,

    /// The request came from the side that is not to move.
    #[display("It's not {}'s turn", _0)]
    NotYourTurn(#[error(not(source))] Mark),

    /// An AI move was requested in a game without an AI.
    #[display("No AI opponent in this game")]
    NoAiOpponent,
}
