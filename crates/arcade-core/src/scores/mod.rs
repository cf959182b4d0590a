//! Persistent high scores
//!
//! One pretty-printed JSON file per game under the scores directory,
//! holding at most [`MAX_SCORES`] entries sorted highest first. Writes are
//! plain overwrites; a missing or damaged file reads as "no scores".

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Entries kept per game
pub const MAX_SCORES: usize = 10;
/// Longest player name stored
pub const NAME_MAX_LEN: usize = 10;

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

fn default_level() -> u32 {
    1
}

/// One finished game on the leaderboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreEntry {
    pub player_name: String,
    pub score: u32,
    /// Local time, `YYYY-MM-DD HH:MM`
    pub date: String,
    #[serde(default = "default_level")]
    pub level: u32,
}

impl ScoreEntry {
    /// Entry stamped with the current local time
    pub fn new(player_name: &str, score: u32, level: u32) -> Self {
        let date = Local::now().format(DATE_FORMAT).to_string();
        Self::with_date(player_name, score, date, level)
    }

    pub fn with_date(player_name: &str, score: u32, date: String, level: u32) -> Self {
        Self {
            player_name: player_name.chars().take(NAME_MAX_LEN).collect(),
            score,
            date,
            level,
        }
    }
}

/// Where finished games are recorded
pub trait ScoreStore {
    /// Record `entry` for `game_id`. Returns whether it made the top list.
    fn submit_score(&self, game_id: &str, entry: ScoreEntry) -> Result<bool>;

    /// Top entries for `game_id`, highest first
    fn load_top_scores(&self, game_id: &str) -> Vec<ScoreEntry>;

    /// Forget every score for `game_id`
    fn reset_scores(&self, game_id: &str) -> Result<()>;
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScoreFile {
    game_name: String,
    scores: Vec<ScoreEntry>,
}

/// [`ScoreStore`] backed by `<dir>/<game_id>-scores.json`
#[derive(Debug, Clone)]
pub struct JsonScoreStore {
    dir: PathBuf,
}

impl JsonScoreStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn file_for(&self, game_id: &str) -> PathBuf {
        self.dir.join(format!("{}-scores.json", game_id.to_lowercase()))
    }

    fn save(&self, game_id: &str, scores: Vec<ScoreEntry>) -> Result<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("creating scores directory {:?}", self.dir))?;

        let file = ScoreFile {
            game_name: game_id.to_string(),
            scores,
        };
        let json = serde_json::to_string_pretty(&file).context("serializing scores")?;
        let path = self.file_for(game_id);
        std::fs::write(&path, json).with_context(|| format!("writing {:?}", path))?;
        Ok(())
    }
}

impl ScoreStore for JsonScoreStore {
    fn submit_score(&self, game_id: &str, entry: ScoreEntry) -> Result<bool> {
        let mut scores = self.load_top_scores(game_id);

        // Stable sort puts the new entry after existing ties
        let rank = scores.iter().filter(|s| s.score >= entry.score).count();
        let score = entry.score;
        scores.insert(rank, entry);
        scores.sort_by(|a, b| b.score.cmp(&a.score));
        scores.truncate(MAX_SCORES);

        self.save(game_id, scores)?;

        let is_high_score = rank < MAX_SCORES;
        info!(game_id, score, rank, is_high_score, "Score submitted");
        Ok(is_high_score)
    }

    fn load_top_scores(&self, game_id: &str) -> Vec<ScoreEntry> {
        let path = self.file_for(game_id);
        if !path.exists() {
            debug!("No score file at {:?}", path);
            return Vec::new();
        }

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Failed to read score file {:?}: {}", path, e);
                return Vec::new();
            }
        };

        match serde_json::from_str::<ScoreFile>(&content) {
            Ok(file) => {
                let mut scores = file.scores;
                scores.sort_by(|a, b| b.score.cmp(&a.score));
                scores.truncate(MAX_SCORES);
                scores
            }
            Err(e) => {
                warn!("Ignoring unparsable score file {:?}: {}", path, e);
                Vec::new()
            }
        }
    }

    fn reset_scores(&self, game_id: &str) -> Result<()> {
        let path = self.file_for(game_id);
        if path.exists() {
            std::fs::remove_file(&path).with_context(|| format!("removing {:?}", path))?;
            info!(game_id, "Scores reset");
        }
        Ok(())
    }
}
