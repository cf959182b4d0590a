//! Arcade Core Library
//!
//! Game engines, persistent high scores, color themes and configuration
//! for the ArcadeTUI terminal arcade.

pub mod config;
pub mod games;
pub mod paths;
pub mod scores;
pub mod themes;

pub use config::{ArcadeConfig, ConfigError, GameConfig};
pub use scores::{JsonScoreStore, ScoreEntry, ScoreStore};
pub use themes::{ColorRole, Rgb, Theme, ThemeError, ThemeManager};
