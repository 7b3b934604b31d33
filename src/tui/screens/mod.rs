//! Screen implementations for the menu state machine.

mod in_game;
mod menu;
mod opponent_select;
mod start_menu;

pub use in_game::InGameScreen;
pub use opponent_select::OpponentSelectScreen;
pub use start_menu::StartMenuScreen;
