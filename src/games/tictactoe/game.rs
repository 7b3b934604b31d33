//! Game state for a single round of tic-tac-toe.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use super::action::{Move, MoveError};
use super::ai::RandomAi;
use super::position::Position;
use super::rules;
use super::types::{Board, Cell, Mark, Outcome};

/// Board, turn and outcome of one game.
///
/// Cells only ever go from empty to occupied, and the turn flips exactly
/// once per accepted move. The flip also happens on the move that ends the
/// game; it has no effect because every later move is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(from = "GameStateRecord")]
pub struct GameState {
    /// The board.
    board: Board,
    /// Mark to place on the next accepted move.
    #[getter(skip)]
    turn: Mark,
    /// Outcome after the last accepted move.
    #[getter(skip)]
    outcome: Outcome,
    /// Accepted moves, oldest first.
    history: Vec<Move>,
}

impl GameState {
    /// Creates a new game with X to move.
    #[instrument]
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            turn: Mark::X,
            outcome: Outcome::InProgress,
            history: Vec::new(),
        }
    }

    /// Builds a state around an existing board.
    ///
    /// The outcome is evaluated from the board; history starts empty.
    #[instrument(skip(board))]
    pub fn from_board(board: Board, turn: Mark) -> Self {
        let outcome = rules::evaluate(&board);
        Self {
            board,
            turn,
            outcome,
            history: Vec::new(),
        }
    }

    /// Mark to place on the next accepted move.
    pub fn turn(&self) -> Mark {
        self.turn
    }

    /// Outcome after the last accepted move.
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Returns true once the game has been won or drawn.
    pub fn is_over(&self) -> bool {
        self.outcome.is_terminal()
    }

    /// Places the current mark at `index` (0-8).
    ///
    /// # Errors
    ///
    /// Rejects out-of-range indices, occupied cells and moves after the game
    /// has ended. A rejected move leaves the state untouched.
    #[instrument(skip(self), fields(turn = %self.turn))]
    pub fn apply_move(&mut self, index: usize) -> Result<Outcome, MoveError> {
        let pos = Position::from_index(index).ok_or(MoveError::OutOfRange(index))?;
        if self.is_over() {
            debug!("Move rejected, game over");
            return Err(MoveError::GameOver);
        }
        if !self.board.is_empty(pos) {
            debug!(%pos, "Move rejected, cell occupied");
            return Err(MoveError::CellOccupied(pos));
        }

        let mark = self.turn;
        self.board.set(pos, Cell::Occupied(mark));
        self.history.push(Move::new(mark, pos));
        self.outcome = self.evaluate();
        self.turn = mark.opponent();

        info!(%mark, %pos, outcome = ?self.outcome, "Move applied");
        Ok(self.outcome)
    }

    /// Classifies the current board.
    pub fn evaluate(&self) -> Outcome {
        rules::evaluate(&self.board)
    }

    /// Lets `ai` place its mark on a random empty cell.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::NotYourTurn`] when the turn is not the AI's and
    /// [`MoveError::GameOver`] once the game has ended.
    #[instrument(skip(self, ai), fields(ai_mark = %ai.mark()))]
    pub fn ai_move(&mut self, ai: &mut RandomAi) -> Result<Position, MoveError> {
        if self.is_over() {
            return Err(MoveError::GameOver);
        }
        if self.turn != ai.mark() {
            return Err(MoveError::NotYourTurn(ai.mark()));
        }
        // In progress means at least one empty cell.
        let pos = ai.choose(&self.board).ok_or(MoveError::GameOver)?;
        self.apply_move(pos.to_index())?;
        Ok(pos)
    }

    /// Starts over: empty board, X to move.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        info!(moves = self.history.len(), "Resetting game");
        *self = Self::new();
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

/// Serialized form of [`GameState`].
///
/// The stored outcome is not trusted; it is re-derived from the board.
#[derive(Serialize, Deserialize)]
struct GameStateRecord {
    board: Board,
    turn: Mark,
    #[serde(default)]
    outcome: Outcome,
    #[serde(default)]
    history: Vec<Move>,
}

impl From<GameStateRecord> for GameState {
    fn from(record: GameStateRecord) -> Self {
        let outcome = rules::evaluate(&record.board);
        if outcome != record.outcome {
            warn!(stored = ?record.outcome, ?outcome, "Stored outcome disagrees with board");
        }
        Self {
            board: record.board,
            turn: record.turn,
            outcome,
            history: record.history,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_flips_after_winning_move() {
        let mut game = GameState::new();
        // X: 0, 1, 2 / O: 3, 4
        for index in [0, 3, 1, 4, 2] {
            game.apply_move(index).unwrap();
        }
        assert_eq!(game.outcome(), Outcome::Win(Mark::X));
        assert_eq!(game.turn(), Mark::O);
    }

    #[test]
    fn test_rejected_move_keeps_history() {
        let mut game = GameState::new();
        game.apply_move(4).unwrap();
        assert_eq!(game.apply_move(4), Err(MoveError::CellOccupied(Position::Center)));
        assert_eq!(game.history().len(), 1);
    }

    #[test]
    fn test_loaded_outcome_follows_board() {
        const X: Cell = Cell::Occupied(Mark::X);
        const O: Cell = Cell::Occupied(Mark::O);
        // X X X / O _ _ / _ _ _ saved as if still in progress.
        let record = GameStateRecord {
            board: Board::from_cells([X, X, X, O, Cell::Empty, Cell::Empty, Cell::Empty, Cell::Empty, Cell::Empty]),
            turn: Mark::O,
            outcome: Outcome::InProgress,
            history: Vec::new(),
        };
        let text = toml::to_string(&record).unwrap();

        let mut game: GameState = toml::from_str(&text).unwrap();
        assert_eq!(game.outcome(), Outcome::Win(Mark::X));
        assert_eq!(game.apply_move(4), Err(MoveError::GameOver));
        assert_eq!(game.turn(), Mark::O);
    }

    #[test]
    fn test_out_of_range_checked_before_game_over() {
        let mut game = GameState::new();
        for index in [0, 3, 1, 4, 2] {
            game.apply_move(index).unwrap();
        }
        assert_eq!(game.apply_move(9), Err(MoveError::OutOfRange(9)));
        assert_eq!(game.apply_move(8), Err(MoveError::GameOver));
    }
}
