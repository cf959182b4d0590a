//! Locations of everything the arcade keeps on disk

use std::path::{Path, PathBuf};

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "ARCADE_TUI_DATA";

const APP_DIR_NAME: &str = "arcade-tui";
const FALLBACK_DIR: &str = "arcade-data";

/// Resolve the data directory: explicit override, then `$ARCADE_TUI_DATA`,
/// then the platform data directory, then `./arcade-data`.
pub fn resolve_data_dir(explicit: Option<&Path>) -> PathBuf {
    if let Some(dir) = explicit {
        return dir.to_path_buf();
    }
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
        return PathBuf::from(dir);
    }
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(FALLBACK_DIR))
}

/// Well-known files and folders under one data directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    root: PathBuf,
}

impl DataPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_file(&self) -> PathBuf {
        self.root.join("config.toml")
    }

    pub fn log_file(&self) -> PathBuf {
        self.root.join("arcade.log")
    }

    pub fn scores_dir(&self) -> PathBuf {
        self.root.join("scores")
    }

    pub fn themes_dir(&self) -> PathBuf {
        self.root.join("themes")
    }
}
