//! Terminal tic-tac-toe.
//!
//! # Architecture
//!
//! - **Game core**: [`GameState`] owns the board, turn and outcome; rules
//!   live in [`rules`] as pure functions over a [`Board`].
//! - **Session**: [`GameSession`] is what a front end talks to. It accepts
//!   move, AI-move and reset requests and publishes a [`GameEvent`] for each.
//! - **AI**: [`RandomAi`] picks uniformly among empty cells.
//! - **TUI**: menus, board and game-over popup built on ratatui.
//!
//! # Example
//!
//! ```
//! use tictactoe_tui::{GameMode, GameSession, Outcome};
//!
//! let (mut session, _events) = GameSession::new(GameMode::HumanVsHuman, None);
//! assert_eq!(session.request_move(4), Ok(Outcome::InProgress));
//! assert!(session.request_move(4).is_err());
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod games;
pub mod tui;

// Crate-level exports - Configuration
pub use config::{ConfigError, GameConfig};

// Crate-level exports - Game types (tic-tac-toe)
pub use games::tictactoe::{
    Board, Cell, GameEvent, GameMode, GameSession, GameState, Mark, Move, MoveError, Outcome,
    Position, RandomAi, rules,
};
