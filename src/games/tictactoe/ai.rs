//! Uniform-random AI opponent.

use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::IndexedRandom;
use tracing::{debug, instrument};

use super::{Board, Mark, Position};

/// AI that picks uniformly at random among the empty cells.
///
/// No lookahead: it neither blocks nor completes lines on purpose.
#[derive(Debug, Clone)]
pub struct RandomAi {
    mark: Mark,
    rng: SmallRng,
}

impl RandomAi {
    /// Creates an AI playing `mark`, seeded from OS entropy.
    #[instrument]
    pub fn new(mark: Mark) -> Self {
        Self {
            mark,
            rng: SmallRng::from_os_rng(),
        }
    }

    /// Creates an AI with a fixed seed, for reproducible games.
    #[instrument]
    pub fn seeded(mark: Mark, seed: u64) -> Self {
        Self {
            mark,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Creates an AI from an optional seed.
    pub fn from_seed(mark: Mark, seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(mark, seed),
            None => Self::new(mark),
        }
    }

    /// The mark this AI plays.
    pub fn mark(&self) -> Mark {
        self.mark
    }

    /// Picks an empty cell, or `None` if the board is full.
    #[instrument(skip(self, board), fields(mark = %self.mark))]
    pub fn choose(&mut self, board: &Board) -> Option<Position> {
        let choice = Position::valid_moves(board).choose(&mut self.rng).copied();
        debug!(?choice, "AI chose position");
        choice
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::Cell;

    #[test]
    fn test_full_board_has_no_choice() {
        let mut ai = RandomAi::seeded(Mark::O, 7);
        let board = Board::from_cells([Cell::Occupied(Mark::X); 9]);
        assert_eq!(ai.choose(&board), None);
    }

    #[test]
    fn test_choice_is_always_empty() {
        let mut ai = RandomAi::seeded(Mark::O, 42);
        let mut board = Board::new();
        board.set(Position::Center, Cell::Occupied(Mark::X));
        board.set(Position::TopLeft, Cell::Occupied(Mark::O));
        for _ in 0..100 {
            let pos = ai.choose(&board).expect("board has empty cells");
            assert!(board.is_empty(pos));
        }
    }

    #[test]
    fn test_choice_covers_every_empty_cell() {
        let mut ai = RandomAi::seeded(Mark::O, 1);
        let board = Board::new();
        let mut seen = [false; 9];
        for _ in 0..500 {
            if let Some(pos) = ai.choose(&board) {
                seen[pos.to_index()] = true;
            }
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_same_seed_same_choices() {
        let board = Board::new();
        let mut a = RandomAi::seeded(Mark::O, 99);
        let mut b = RandomAi::seeded(Mark::O, 99);
        for _ in 0..20 {
            assert_eq!(a.choose(&board), b.choose(&board));
        }
    }
}
