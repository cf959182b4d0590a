//! Game cartridges
//!
//! A cartridge describes one game for the menu and creates fresh sessions.
//! The shared play loop in [`session`] drives any session with input,
//! fixed-interval physics and rendering, then runs the game-over screen.

pub mod galaga;
mod session;
pub mod tetris;

use std::time::Duration;

use anyhow::Result;
use arcade_core::config::GameConfig;
use arcade_core::scores::{ScoreEntry, ScoreStore};
use crossterm::event::KeyEvent;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use super::canvas::Canvas;
use super::input::InputSource;
use super::terminal::Screen;
use super::themes::Palette;

pub use galaga::GalagaCartridge;
pub use session::{run_session, SessionOutcome};
pub use tetris::TetrisCartridge;

/// Final numbers of a finished game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSummary {
    pub score: u32,
    pub level: u32,
    /// Cleared lines, for games that count them
    pub lines: Option<u32>,
}

/// One play-through of a game
pub trait GameSession {
    /// Time between physics steps; may change as the game speeds up
    fn physics_interval(&self) -> Duration;

    /// Apply one key press. `now` is time since the session started.
    fn handle_key(&mut self, key: &KeyEvent, now: Duration);

    /// One physics step
    fn step(&mut self);

    /// Timed events that run every frame (spawns, level progression)
    fn tick(&mut self, _now: Duration) {}

    /// The player pressed Q; end the game before the game-over screen
    fn quit(&mut self);

    fn render(&self, canvas: &mut dyn Canvas);

    fn is_over(&self) -> bool;

    fn summary(&self) -> GameSummary;
}

/// Everything a session needs from the shell
pub struct PlayContext<'a> {
    pub screen: &'a mut dyn Screen,
    pub input: &'a mut dyn InputSource,
    pub scores: &'a dyn ScoreStore,
    pub palette: &'a Palette,
    pub config: &'a GameConfig,
    /// Fixed seed for reproducible games; entropy otherwise
    pub seed: Option<u64>,
}

impl PlayContext<'_> {
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

pub trait Cartridge {
    /// Stable key, also used for the score file
    fn id(&self) -> &str;

    /// Menu title
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    fn version(&self) -> &str {
        "1.0"
    }

    fn icon(&self) -> &str;

    fn new_session(&self, rng: StdRng, config: &GameConfig) -> Box<dyn GameSession>;

    /// Play one full game, including name entry and score submission
    fn play(&self, ctx: &mut PlayContext<'_>) -> Result<SessionOutcome> {
        debug!(game = self.id(), version = self.version(), "Inserting cartridge");
        let session = self.new_session(ctx.rng(), ctx.config);
        run_session(self.id(), self.name(), session, ctx)
    }

    fn high_scores(&self, store: &dyn ScoreStore) -> Vec<ScoreEntry> {
        store.load_top_scores(self.id())
    }

    fn reset_high_scores(&self, store: &dyn ScoreStore) -> Result<()> {
        store.reset_scores(self.id())
    }
}

/// Every cartridge in menu order
pub fn registry() -> Vec<Box<dyn Cartridge>> {
    vec![Box::new(TetrisCartridge), Box::new(GalagaCartridge)]
}

/// Find a cartridge by id or name, ignoring case
pub fn find<'a>(cartridges: &'a [Box<dyn Cartridge>], key: &str) -> Option<&'a dyn Cartridge> {
    cartridges
        .iter()
        .find(|c| c.id().eq_ignore_ascii_case(key) || c.name().eq_ignore_ascii_case(key))
        .map(|c| &**c)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_registry_ids_and_names_unique() {
        let cartridges = registry();
        let ids: HashSet<_> = cartridges.iter().map(|c| c.id()).collect();
        let names: HashSet<_> = cartridges.iter().map(|c| c.name()).collect();
        assert_eq!(ids.len(), cartridges.len());
        assert_eq!(names.len(), cartridges.len());
    }

    #[test]
    fn test_cartridge_metadata() {
        let cartridges = registry();
        let tetris = find(&cartridges, "tetris").unwrap();
        assert_eq!(tetris.name(), "TETRIS");
        assert_eq!(tetris.description(), "Classic falling blocks puzzle");
        assert_eq!(tetris.version(), "1.0");

        let galaga = find(&cartridges, "GALAGA").unwrap();
        assert_eq!(galaga.id(), "galaga");
        assert_eq!(galaga.description(), "Classic space shooter");

        assert!(find(&cartridges, "pong").is_none());
    }
}
