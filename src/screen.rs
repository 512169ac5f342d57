/// Top-level screen state machine: Title → Game → GameOver → Game → …
///
/// Each screen owns its state outright.  Transitions consume the current
/// screen and return the next one, so nothing leaks from one round into the
/// following one except the winner shown on the game-over screen.

use log::info;

use crate::compute::{fire_laser, init_state, steer_ship, tick};
use crate::config::GameConfig;
use crate::entities::{GameState, Side};
use crate::input::Command;

#[derive(Clone, Debug, PartialEq)]
pub enum Screen {
    Title,
    Game(GameState),
    GameOver { winner: Side },
}

impl Screen {
    /// React to one input command.  `Command::Quit` is handled by the caller
    /// and leaves the screen unchanged here.
    pub fn handle(self, command: Command, config: &GameConfig) -> Screen {
        match (self, command) {
            (Screen::Title, Command::Confirm) => {
                info!("title confirmed, starting a round");
                Screen::Game(init_state(config))
            }
            (Screen::GameOver { winner }, Command::Confirm) => {
                info!("restarting after {} won", winner.label());
                Screen::Game(init_state(config))
            }
            (Screen::Game(state), Command::Steer(side, steer)) => {
                Screen::Game(steer_ship(&state, side, steer, config))
            }
            (Screen::Game(state), Command::Fire(side)) => {
                Screen::Game(fire_laser(&state, side, config))
            }
            (screen, _) => screen,
        }
    }

    /// Advance one frame.  Only the game screen has anything to simulate; it
    /// hands over to the game-over screen on the frame a winner is decided.
    pub fn update(self, config: &GameConfig) -> Screen {
        match self {
            Screen::Game(state) => {
                let next = tick(&state, config);
                match next.winner() {
                    Some(winner) => {
                        info!("{} wins on frame {}", winner.label(), next.frame);
                        Screen::GameOver { winner }
                    }
                    None => Screen::Game(next),
                }
            }
            other => other,
        }
    }
}
