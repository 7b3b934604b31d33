//! Tic-tac-toe game core.

mod action;
mod ai;
mod game;
mod position;
pub mod rules;
mod session;
mod types;

pub use action::{Move, MoveError};
pub use ai::RandomAi;
pub use game::GameState;
pub use position::Position;
pub use session::{GameEvent, GameMode, GameSession};
pub use types::{Board, Cell, Mark, Outcome};
