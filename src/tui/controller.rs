//! Controller: the state machine driving the screens.

use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{Terminal, backend::Backend};
use tokio::time::{Duration, sleep};
use tracing::{debug, info, instrument};

use crate::GameConfig;
use crate::tui::screen::{Screen, ScreenTransition};
use crate::tui::screens::{InGameScreen, OpponentSelectScreen, StartMenuScreen};

/// Active screen in the state machine.
#[derive(Debug)]
enum ActiveScreen {
    StartMenu(StartMenuScreen),
    OpponentSelect(OpponentSelectScreen),
    InGame(Box<InGameScreen>),
}

impl ActiveScreen {
    fn as_screen(&self) -> &dyn Screen {
        match self {
            Self::StartMenu(s) => s,
            Self::OpponentSelect(s) => s,
            Self::InGame(s) => &**s,
        }
    }

    fn as_screen_mut(&mut self) -> &mut dyn Screen {
        match self {
            Self::StartMenu(s) => s,
            Self::OpponentSelect(s) => s,
            Self::InGame(s) => &mut **s,
        }
    }
}

/// Drives screen transitions until the user quits.
#[derive(Debug)]
pub struct Controller {
    config: GameConfig,
    screen: ActiveScreen,
}

impl Controller {
    /// Creates a controller showing the start menu.
    #[instrument(skip(config))]
    pub fn new(config: GameConfig) -> Self {
        info!("Creating Controller");
        Self {
            config,
            screen: ActiveScreen::StartMenu(StartMenuScreen::new()),
        }
    }

    /// Creates a controller that skips the menus and opens a game.
    #[instrument(skip(config))]
    pub fn in_game(config: GameConfig, mode: crate::GameMode) -> Self {
        let mut controller = Self::new(config);
        controller.apply_transition(ScreenTransition::StartGame(mode));
        controller
    }

    /// Runs the event loop until a screen asks to quit.
    #[instrument(skip(self, terminal))]
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()>
    where
        <B as Backend>::Error: Send + Sync + 'static,
    {
        info!("Starting event loop");

        loop {
            terminal.draw(|f| self.screen.as_screen().render(f))?;

            // Poll for input with short timeout to keep the loop responsive.
            if event::poll(Duration::from_millis(50))?
                && let Event::Key(key) = event::read()?
                // Skip key release events (crossterm fires both press and release).
                && key.kind != KeyEventKind::Release
            {
                let transition = self.screen.as_screen_mut().handle_key(key);
                if !self.apply_transition(transition) {
                    info!("Quitting");
                    return Ok(());
                }
            }

            let transition = self.screen.as_screen_mut().tick();
            if !self.apply_transition(transition) {
                info!("Quitting");
                return Ok(());
            }

            sleep(Duration::from_millis(10)).await;
        }
    }

    /// Applies a screen transition. Returns `false` on quit.
    #[instrument(skip(self))]
    fn apply_transition(&mut self, transition: ScreenTransition) -> bool {
        if transition != ScreenTransition::Stay {
            debug!(?transition, "Applying screen transition");
        }
        match transition {
            ScreenTransition::Stay => {}
            ScreenTransition::GoToStartMenu => {
                self.screen = ActiveScreen::StartMenu(StartMenuScreen::new());
            }
            ScreenTransition::GoToOpponentSelect => {
                self.screen = ActiveScreen::OpponentSelect(OpponentSelectScreen::new());
            }
            ScreenTransition::StartGame(mode) => {
                self.screen = ActiveScreen::InGame(Box::new(InGameScreen::new(
                    mode,
                    *self.config.seed(),
                    self.config.ai_delay(),
                )));
            }
            ScreenTransition::Quit => return false,
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GameMode;

    #[test]
    fn test_menu_flow_reaches_game() {
        let mut controller = Controller::new(GameConfig::default());
        assert!(matches!(controller.screen, ActiveScreen::StartMenu(_)));

        assert!(controller.apply_transition(ScreenTransition::GoToOpponentSelect));
        assert!(matches!(controller.screen, ActiveScreen::OpponentSelect(_)));

        assert!(controller.apply_transition(ScreenTransition::StartGame(GameMode::HumanVsAi)));
        match &controller.screen {
            ActiveScreen::InGame(s) => assert_eq!(s.session().mode(), GameMode::HumanVsAi),
            other => panic!("expected in-game screen, got {:?}", other),
        }

        assert!(controller.apply_transition(ScreenTransition::GoToStartMenu));
        assert!(matches!(controller.screen, ActiveScreen::StartMenu(_)));
        assert!(!controller.apply_transition(ScreenTransition::Quit));
    }

    #[test]
    fn test_in_game_skips_menus() {
        let controller = Controller::in_game(GameConfig::default(), GameMode::HumanVsHuman);
        assert!(matches!(controller.screen, ActiveScreen::InGame(_)));
    }
}
