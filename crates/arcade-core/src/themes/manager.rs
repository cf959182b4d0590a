//! Theme discovery, selection and persistence
//!
//! Layout under the themes directory:
//! - `custom/<name>.json` - user themes, one per file
//! - `current_theme.json` - `{"currentTheme": "<name>"}`

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::builtin::{self, BUILTIN_THEMES};
use super::{Theme, ThemeError};

const CUSTOM_DIR: &str = "custom";
const CURRENT_THEME_FILE: &str = "current_theme.json";

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CurrentThemeFile {
    current_theme: String,
}

/// Serialization format of a theme document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeFormat {
    Json,
    Yaml,
}

impl ThemeFormat {
    /// YAML for `.yaml`/`.yml` URLs, JSON otherwise
    pub fn from_url(url: &str) -> Self {
        let path = url.split(['?', '#']).next().unwrap_or(url);
        if path.ends_with(".yaml") || path.ends_with(".yml") {
            ThemeFormat::Yaml
        } else {
            ThemeFormat::Json
        }
    }

    pub fn parse(self, content: &str) -> Result<Theme, ThemeError> {
        let theme = match self {
            ThemeFormat::Json => Theme::from_json(content)?,
            ThemeFormat::Yaml => Theme::from_yaml(content)?,
        };
        if theme.name.trim().is_empty() {
            return Err(ThemeError::Parse("theme name cannot be empty".to_string()));
        }
        Ok(theme)
    }
}

/// File name a custom theme is stored under: lowercase, spaces and path
/// separators replaced by `_`.
pub fn custom_file_name(name: &str) -> String {
    let stem: String = name
        .to_lowercase()
        .chars()
        .map(|c| match c {
            ' ' | '/' | '\\' => '_',
            c => c,
        })
        .collect();
    format!("{stem}.json")
}

/// Owns the active theme and the user's custom themes on disk
#[derive(Debug, Clone)]
pub struct ThemeManager {
    dir: PathBuf,
    current: Theme,
}

impl ThemeManager {
    /// Open the themes directory and restore the saved selection. Missing
    /// or unknown selections fall back to Classic.
    pub fn load(dir: impl Into<PathBuf>) -> Self {
        let mut manager = Self {
            dir: dir.into(),
            current: builtin::classic(),
        };
        if let Some(theme) = manager.saved_selection() {
            manager.current = theme;
        }
        info!("Active theme: {}", manager.current.name);
        manager
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn custom_dir(&self) -> PathBuf {
        self.dir.join(CUSTOM_DIR)
    }

    pub fn current(&self) -> &Theme {
        &self.current
    }

    /// Custom themes from disk, sorted by file name. Files that fail to
    /// parse are skipped.
    pub fn custom_themes(&self) -> Vec<Theme> {
        let custom_dir = self.custom_dir();
        let entries = match std::fs::read_dir(&custom_dir) {
            Ok(entries) => entries,
            Err(_) => return Vec::new(),
        };

        let mut paths: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
            .collect();
        paths.sort();

        paths
            .into_iter()
            .filter_map(|path| {
                let content = match std::fs::read_to_string(&path) {
                    Ok(content) => content,
                    Err(e) => {
                        warn!("Failed to read theme {:?}: {}", path, e);
                        return None;
                    }
                };
                match Theme::from_json(&content) {
                    Ok(theme) => Some(theme),
                    Err(e) => {
                        warn!("Skipping theme {:?}: {}", path, e);
                        None
                    }
                }
            })
            .collect()
    }

    /// Built-ins followed by custom themes
    pub fn all_themes(&self) -> Vec<Theme> {
        let mut themes = BUILTIN_THEMES.clone();
        themes.extend(self.custom_themes());
        themes
    }

    /// Find a theme by exact name, then ignoring case
    pub fn find(&self, name: &str) -> Option<Theme> {
        let themes = self.all_themes();
        let index = themes
            .iter()
            .position(|t| t.name == name)
            .or_else(|| {
                themes
                    .iter()
                    .position(|t| t.name.eq_ignore_ascii_case(name))
            })?;
        themes.into_iter().nth(index)
    }

    /// Activate `theme` and persist the choice
    pub fn set_current(&mut self, theme: Theme) -> Result<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("creating themes directory {:?}", self.dir))?;

        let file = CurrentThemeFile {
            current_theme: theme.name.clone(),
        };
        let path = self.dir.join(CURRENT_THEME_FILE);
        let json = serde_json::to_string_pretty(&file)?;
        std::fs::write(&path, json).with_context(|| format!("writing {:?}", path))?;

        info!("Theme changed to {}", theme.name);
        self.current = theme;
        Ok(())
    }

    pub fn set_current_by_name(&mut self, name: &str) -> Result<&Theme> {
        let theme = self
            .find(name)
            .ok_or_else(|| ThemeError::UnknownTheme(name.to_string()))?;
        self.set_current(theme)?;
        Ok(&self.current)
    }

    /// Write `theme` into the custom directory, replacing any theme that
    /// maps to the same file name.
    pub fn save_custom_theme(&self, theme: &Theme) -> Result<PathBuf> {
        let custom_dir = self.custom_dir();
        std::fs::create_dir_all(&custom_dir)
            .with_context(|| format!("creating {:?}", custom_dir))?;

        let path = custom_dir.join(custom_file_name(&theme.name));
        let json = serde_json::to_string_pretty(theme)?;
        std::fs::write(&path, json).with_context(|| format!("writing {:?}", path))?;
        debug!("Saved custom theme {} to {:?}", theme.name, path);
        Ok(path)
    }

    /// Download a theme document and store it as a custom theme
    pub async fn add_theme_from_url(&self, client: &reqwest::Client, url: &str) -> Result<Theme> {
        info!("Downloading theme from {}", url);
        let response = client
            .get(url)
            .header("User-Agent", "arcade-tui")
            .send()
            .await
            .with_context(|| format!("fetching theme from {url}"))?;

        let status = response.status();
        if !status.is_success() {
            warn!("Theme download from {} failed: {}", url, status);
            return Err(ThemeError::HttpStatus(status.as_u16()).into());
        }

        let content = response.text().await.context("reading theme body")?;
        let theme = ThemeFormat::from_url(url).parse(&content)?;

        let custom_dir = self.custom_dir();
        tokio::fs::create_dir_all(&custom_dir)
            .await
            .with_context(|| format!("creating {:?}", custom_dir))?;
        let path = custom_dir.join(custom_file_name(&theme.name));
        tokio::fs::write(&path, serde_json::to_string_pretty(&theme)?)
            .await
            .with_context(|| format!("writing {:?}", path))?;

        info!("Installed theme {} to {:?}", theme.name, path);
        Ok(theme)
    }

    /// Remove a custom theme file. Returns whether one existed. Removing the
    /// active theme switches back to Classic.
    pub fn delete_custom_theme(&mut self, name: &str) -> Result<bool> {
        let path = self.custom_dir().join(custom_file_name(name));
        if !path.exists() {
            return Ok(false);
        }
        std::fs::remove_file(&path).with_context(|| format!("removing {:?}", path))?;
        info!("Removed custom theme {}", name);

        if custom_file_name(&self.current.name) == custom_file_name(name)
            && !builtin::is_builtin(&self.current.name)
        {
            self.set_current(builtin::classic())?;
        }
        Ok(true)
    }

    fn saved_selection(&self) -> Option<Theme> {
        let path = self.dir.join(CURRENT_THEME_FILE);
        let content = std::fs::read_to_string(&path).ok()?;
        let saved = match serde_json::from_str::<CurrentThemeFile>(&content) {
            Ok(saved) => saved,
            Err(e) => {
                warn!("Ignoring unparsable {:?}: {}", path, e);
                return None;
            }
        };

        let theme = self
            .all_themes()
            .into_iter()
            .find(|t| t.name == saved.current_theme);
        if theme.is_none() {
            warn!(
                "Saved theme '{}' not found, using {}",
                saved.current_theme,
                builtin::DEFAULT_THEME
            );
        }
        theme
    }
}
