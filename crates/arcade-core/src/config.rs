//! Arcade configuration
//!
//! Loaded from `config.toml` in the data directory. Every key is optional:
//!
//! ```toml
//! seed = 42
//!
//! [game]
//! input_poll_ms = 50
//! frame_delay_ms = 50
//! min_drop_interval_ms = 100
//! name_max_len = 10
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Loop timing and input limits shared by every cartridge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Longest wait for a key per loop iteration
    pub input_poll_ms: u64,
    /// Sleep after each rendered frame
    pub frame_delay_ms: u64,
    /// Fastest Tetris gravity
    pub min_drop_interval_ms: u64,
    /// Longest name accepted on the game-over screen
    pub name_max_len: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            input_poll_ms: 50,
            frame_delay_ms: 50,
            min_drop_interval_ms: 100,
            name_max_len: crate::scores::NAME_MAX_LEN,
        }
    }
}

/// Floor for the loop waits, a zero would spin the CPU
const MIN_WAIT: Duration = Duration::from_millis(1);

impl GameConfig {
    pub fn input_poll(&self) -> Duration {
        Duration::from_millis(self.input_poll_ms).max(MIN_WAIT)
    }

    pub fn frame_delay(&self) -> Duration {
        Duration::from_millis(self.frame_delay_ms).max(MIN_WAIT)
    }

    pub fn min_drop_interval(&self) -> Duration {
        Duration::from_millis(self.min_drop_interval_ms)
    }

    /// Name length limit, never above what the score store keeps
    pub fn name_limit(&self) -> usize {
        self.name_max_len.clamp(1, crate::scores::NAME_MAX_LEN)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArcadeConfig {
    /// Fixed RNG seed for reproducible games
    pub seed: Option<u64>,
    pub game: GameConfig,
}

impl ArcadeConfig {
    /// Read `path`, or return defaults if it does not exist
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No config at {:?}, using defaults", path);
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        Self::parse(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = ArcadeConfig::load(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, ArcadeConfig::default());
        assert_eq!(config.game.input_poll(), Duration::from_millis(50));
        assert_eq!(config.game.min_drop_interval(), Duration::from_millis(100));
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let config = ArcadeConfig::parse("seed = 7\n[game]\nframe_delay_ms = 16\n").unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.game.frame_delay_ms, 16);
        assert_eq!(config.game.input_poll_ms, 50);
        assert_eq!(config.game.name_max_len, 10);
    }

    #[test]
    fn test_bad_file_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[game]\ninput_poll_ms = \"fast\"\n").unwrap();
        assert!(matches!(
            ArcadeConfig::load(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_zero_waits_are_clamped() {
        let config = GameConfig {
            input_poll_ms: 0,
            frame_delay_ms: 0,
            ..GameConfig::default()
        };
        assert_eq!(config.input_poll(), Duration::from_millis(1));
        assert_eq!(config.frame_delay(), Duration::from_millis(1));
    }

    #[test]
    fn test_name_limit_clamped() {
        let long = GameConfig {
            name_max_len: 40,
            ..GameConfig::default()
        };
        assert_eq!(long.name_limit(), 10);
        let zero = GameConfig {
            name_max_len: 0,
            ..GameConfig::default()
        };
        assert_eq!(zero.name_limit(), 1);
    }
}
