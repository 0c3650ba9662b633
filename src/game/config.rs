use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::state::Position;

/// Difficulty setting: picks the per-food score and a default speed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// Speed preset applied when the difficulty is selected
    pub fn default_speed(&self) -> u32 {
        match self {
            Difficulty::Easy => 3,
            Difficulty::Medium => 5,
            Difficulty::Hard => 8,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

/// Points awarded per food item, per difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreTable {
    pub easy: u32,
    pub medium: u32,
    pub hard: u32,
}

impl Default for ScoreTable {
    fn default() -> Self {
        Self {
            easy: 5,
            medium: 10,
            hard: 15,
        }
    }
}

impl ScoreTable {
    pub fn increment(&self, difficulty: Difficulty) -> u32 {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
        }
    }

    pub fn max_increment(&self) -> u32 {
        self.easy.max(self.medium).max(self.hard)
    }
}

/// Maps a speed setting to a tick interval:
/// `max(floor, base - (speed - 1) * step)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedPolicy {
    pub min_speed: u32,
    pub max_speed: u32,
    pub base_interval_ms: u64,
    pub step_ms: u64,
    pub floor_ms: u64,
}

impl Default for SpeedPolicy {
    fn default() -> Self {
        Self {
            min_speed: 1,
            max_speed: 10,
            base_interval_ms: 200,
            step_ms: 15,
            floor_ms: 50,
        }
    }
}

impl SpeedPolicy {
    pub fn clamp(&self, speed: u32) -> u32 {
        speed.clamp(self.min_speed, self.max_speed)
    }

    pub fn interval_ms(&self, speed: u32) -> u64 {
        let speed = u64::from(self.clamp(speed));
        let reduction = (speed - 1).saturating_mul(self.step_ms);
        self.base_interval_ms
            .saturating_sub(reduction)
            .max(self.floor_ms)
    }
}

/// Configuration problems caught before an engine is built
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("board size must be at least 2, got {0}")]
    BoardTooSmall(usize),
    #[error("start position ({x}, {y}) is outside a {size}x{size} board")]
    StartOutOfBounds { x: i32, y: i32, size: usize },
    #[error("speed range {min}..={max} is invalid")]
    InvalidSpeedRange { min: u32, max: u32 },
    #[error("tick interval floor must be positive")]
    ZeroIntervalFloor,
    #[error("{increment} points per food can overflow the score on a {size}x{size} board")]
    ScoreOverflow { increment: u32, size: usize },
}

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Side length of the square board, in cells
    pub board_size: usize,
    /// Where the one-segment snake appears after a reset
    pub start: Position,
    pub difficulty: Difficulty,
    /// Speed setting within `speed_policy`'s range
    pub speed: u32,
    pub speed_policy: SpeedPolicy,
    pub score_table: ScoreTable,
}

impl Default for GameConfig {
    fn default() -> Self {
        let difficulty = Difficulty::default();
        Self {
            board_size: 20,
            start: Position::new(10, 10),
            difficulty,
            speed: difficulty.default_speed(),
            speed_policy: SpeedPolicy::default(),
            score_table: ScoreTable::default(),
        }
    }
}

impl GameConfig {
    /// Create a configuration with a custom board size, starting in the centre
    pub fn new(board_size: usize) -> Self {
        let centre = (board_size / 2) as i32;
        Self {
            board_size,
            start: Position::new(centre, centre),
            ..Default::default()
        }
    }

    /// Create a small board for testing
    pub fn small() -> Self {
        Self::new(10)
    }

    /// Select a difficulty and apply its speed preset
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self.speed = self.speed_policy.clamp(difficulty.default_speed());
        self
    }

    pub fn with_speed(mut self, speed: u32) -> Self {
        self.speed = self.speed_policy.clamp(speed);
        self
    }

    pub fn score_increment(&self) -> u32 {
        self.score_table.increment(self.difficulty)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.speed_policy.interval_ms(self.speed))
    }

    pub fn board_area(&self) -> usize {
        self.board_size.saturating_mul(self.board_size)
    }

    /// Load a (possibly partial) configuration from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let config: GameConfig = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config in {:?}", path))?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_size < 2 {
            return Err(ConfigError::BoardTooSmall(self.board_size));
        }
        if !self.start.is_within(self.board_size) {
            return Err(ConfigError::StartOutOfBounds {
                x: self.start.x,
                y: self.start.y,
                size: self.board_size,
            });
        }
        let policy = &self.speed_policy;
        if policy.min_speed == 0 || policy.min_speed > policy.max_speed {
            return Err(ConfigError::InvalidSpeedRange {
                min: policy.min_speed,
                max: policy.max_speed,
            });
        }
        if policy.floor_ms == 0 {
            return Err(ConfigError::ZeroIntervalFloor);
        }

        // Every free cell eaten at the highest increment must still fit
        let increment = self.score_table.max_increment();
        let max_foods = self.board_area().saturating_sub(1) as u64;
        let overflows = u64::from(increment)
            .checked_mul(max_foods)
            .is_none_or(|total| total > u64::from(u32::MAX));
        if overflows {
            return Err(ConfigError::ScoreOverflow {
                increment,
                size: self.board_size,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.board_size, 20);
        assert_eq!(config.start, Position::new(10, 10));
        assert_eq!(config.difficulty, Difficulty::Medium);
        assert_eq!(config.speed, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_score_table() {
        let table = ScoreTable::default();
        assert_eq!(table.increment(Difficulty::Easy), 5);
        assert_eq!(table.increment(Difficulty::Medium), 10);
        assert_eq!(table.increment(Difficulty::Hard), 15);
    }

    #[test]
    fn test_speed_interval_mapping() {
        let policy = SpeedPolicy::default();
        assert_eq!(policy.interval_ms(1), 200);
        assert_eq!(policy.interval_ms(5), 140);
        assert_eq!(policy.interval_ms(10), 65);
        // Out-of-range speeds are clamped first
        assert_eq!(policy.interval_ms(0), 200);
        assert_eq!(policy.interval_ms(50), 65);

        let steep = SpeedPolicy {
            step_ms: 40,
            ..Default::default()
        };
        assert_eq!(steep.interval_ms(10), 50);
    }

    #[test]
    fn test_difficulty_presets() {
        let config = GameConfig::default().with_difficulty(Difficulty::Hard);
        assert_eq!(config.speed, 8);
        assert_eq!(config.score_increment(), 15);
        assert_eq!(config.tick_interval(), Duration::from_millis(95));

        let config = config.with_speed(42);
        assert_eq!(config.speed, 10);
    }

    #[test]
    fn test_validation_errors() {
        assert_eq!(
            GameConfig::new(1).validate(),
            Err(ConfigError::BoardTooSmall(1))
        );

        let config = GameConfig {
            start: Position::new(20, 3),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::StartOutOfBounds { x: 20, .. })
        ));

        let mut config = GameConfig::default();
        config.speed_policy.min_speed = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidSpeedRange { .. })
        ));

        let mut config = GameConfig::default();
        config.speed_policy.floor_ms = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroIntervalFloor));
    }

    #[test]
    fn test_score_table_must_fit_the_board() {
        let mut config = GameConfig::default();
        config.score_table.medium = u32::MAX / 2 + 1;
        assert_eq!(
            config.validate(),
            Err(ConfigError::ScoreOverflow {
                increment: u32::MAX / 2 + 1,
                size: 20
            })
        );

        // 399 foods on a 20x20 board; the largest increment that still fits
        let mut config = GameConfig::default();
        config.score_table.hard = u32::MAX / 399;
        assert_eq!(config.board_area(), 400);
        assert!(config.validate().is_ok());
        config.score_table.hard += 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: GameConfig =
            serde_json::from_str(r#"{"difficulty":"hard","score_table":{"hard":20}}"#).unwrap();
        assert_eq!(config.board_size, 20);
        assert_eq!(config.difficulty, Difficulty::Hard);
        assert_eq!(config.score_increment(), 20);
        assert_eq!(config.score_table.easy, 5);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("snake.json");
        std::fs::write(&path, r#"{"board_size": 12, "start": {"x": 6, "y": 6}}"#).unwrap();

        let config = GameConfig::from_json_file(&path).unwrap();
        assert_eq!(config.board_size, 12);
        assert_eq!(config.start, Position::new(6, 6));

        assert!(GameConfig::from_json_file(&dir.path().join("missing.json")).is_err());
    }
}
