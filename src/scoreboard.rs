//! Best score and leaderboard persistence
//!
//! The engine never touches storage. The host feeds the scoreboard the
//! [`TickEvents`] of every tick, and the scoreboard keeps the best score and
//! the top results in a small JSON file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::game::TickEvents;

/// Number of results kept on the leaderboard
pub const LEADERBOARD_SIZE: usize = 3;

/// The persisted part of the scoreboard
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    /// Highest score ever reached, even mid-game
    pub best: u32,
    /// Final scores, highest first
    pub leaderboard: Vec<u32>,
}

pub struct Scoreboard {
    record: ScoreRecord,
    path: Option<PathBuf>,
}

impl Scoreboard {
    /// A scoreboard that is never written to disk
    pub fn in_memory() -> Self {
        Self {
            record: ScoreRecord::default(),
            path: None,
        }
    }

    /// Load the scoreboard stored at `path`, starting empty if the file does
    /// not exist yet
    pub fn load(path: &Path) -> Result<Self> {
        let record = if path.exists() {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read scores from {:?}", path))?;
            let mut record: ScoreRecord =
                serde_json::from_str(&json).context("Failed to deserialize scores")?;
            normalize(&mut record.leaderboard);
            record
        } else {
            ScoreRecord::default()
        };

        Ok(Self {
            record,
            path: Some(path.to_path_buf()),
        })
    }

    /// Like [`Scoreboard::load`], but an unreadable file only costs the old
    /// scores: play starts from an empty board that still saves to `path`
    pub fn load_or_empty(path: &Path) -> Self {
        Self::load(path).unwrap_or_else(|err| {
            warn!("Starting with an empty scoreboard: {err:#}");
            Self {
                record: ScoreRecord::default(),
                path: Some(path.to_path_buf()),
            }
        })
    }

    pub fn best(&self) -> u32 {
        self.record.best
    }

    pub fn leaderboard(&self) -> &[u32] {
        &self.record.leaderboard
    }

    pub fn record(&self) -> &ScoreRecord {
        &self.record
    }

    /// Track a running score; returns true when it set a new best
    pub fn on_score_changed(&mut self, score: u32) -> Result<bool> {
        if score <= self.record.best {
            return Ok(false);
        }
        self.record.best = score;
        self.save()?;
        Ok(true)
    }

    pub fn on_game_over(&mut self, final_score: u32) -> Result<()> {
        self.record.best = self.record.best.max(final_score);
        self.record.leaderboard.push(final_score);
        normalize(&mut self.record.leaderboard);
        self.save()
    }

    /// Forward the interesting parts of a tick.
    ///
    /// Every callback runs even if an earlier save failed; the first error is
    /// returned afterwards.
    pub fn dispatch(&mut self, events: &TickEvents) -> Result<()> {
        let mut result = Ok(());
        if let Some(score) = events.score_changed {
            result = self.on_score_changed(score).map(|_| ());
        }
        if let Some(game_over) = events.game_over {
            result = result.and(self.on_game_over(game_over.final_score));
        }
        result
    }

    fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }

        let json =
            serde_json::to_string_pretty(&self.record).context("Failed to serialize scores")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write scores to {:?}", path))?;
        Ok(())
    }
}

fn normalize(leaderboard: &mut Vec<u32>) {
    leaderboard.sort_unstable_by(|a, b| b.cmp(a));
    leaderboard.truncate(LEADERBOARD_SIZE);
}
