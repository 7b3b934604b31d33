//! Command-line interface for the tic-tac-toe binary.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use tictactoe_tui::GameMode;

/// Tic-tac-toe in the terminal
#[derive(Parser, Debug)]
#[command(name = "tictactoe")]
#[command(about = "Play tic-tac-toe against a friend or a random AI", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Skip the menus and start a game in this mode
    #[arg(short, long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Seed for the AI (overrides the config file)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log file (overrides the config file)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Opponent choice on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Two players on one keyboard
    Human,
    /// Play X against the random AI
    Ai,
}

impl From<ModeArg> for GameMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Human => GameMode::HumanVsHuman,
            ModeArg::Ai => GameMode::HumanVsAi,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mode_and_seed() {
        let cli = Cli::try_parse_from(["tictactoe", "--mode", "ai", "--seed", "5"]).unwrap();
        assert_eq!(cli.mode, Some(ModeArg::Ai));
        assert_eq!(cli.seed, Some(5));
        assert_eq!(GameMode::from(ModeArg::Ai), GameMode::HumanVsAi);
    }

    #[test]
    fn test_defaults_show_menu() {
        let cli = Cli::try_parse_from(["tictactoe"]).unwrap();
        assert!(cli.mode.is_none());
        assert!(cli.config.is_none());
    }
}
