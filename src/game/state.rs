use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::action::Direction;
use super::config::Difficulty;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }

    /// Check if the position lies on a square board of the given size
    pub fn is_within(&self, board_size: usize) -> bool {
        let size = board_size as i32;
        (0..size).contains(&self.x) && (0..size).contains(&self.y)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at the front
    body: VecDeque<Position>,
    /// Current direction of movement
    pub direction: Direction,
}

impl Snake {
    /// A single-segment snake at rest
    pub fn new(head: Position) -> Self {
        Self {
            body: VecDeque::from([head]),
            direction: Direction::None,
        }
    }

    /// Build a snake from explicit segments, head first.
    ///
    /// Returns `None` for an empty body or one that overlaps itself.
    pub fn from_segments(segments: Vec<Position>, direction: Direction) -> Option<Self> {
        let snake = Self {
            body: segments.into(),
            direction,
        };
        let overlaps = snake
            .segments()
            .enumerate()
            .any(|(i, a)| snake.segments().skip(i + 1).any(|b| a == b));
        if snake.is_empty() || overlaps {
            return None;
        }
        Some(snake)
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }

    /// Check if any segment, head included, occupies `pos`
    pub fn contains(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    pub(crate) fn push_head(&mut self, pos: Position) {
        self.body.push_front(pos);
    }

    pub(crate) fn pop_tail(&mut self) {
        if self.body.len() > 1 {
            self.body.pop_back();
        }
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Lifecycle phase of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    Idle,
    Running,
    Paused,
    Over,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Idle => "idle",
            GamePhase::Running => "running",
            GamePhase::Paused => "paused",
            GamePhase::Over => "over",
        }
    }
}

impl std::fmt::Display for GamePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    /// Snake left the board
    Wall,
    /// Snake ran into its own body
    SelfCollision,
    /// Snake covers every cell, no room left for food
    BoardFull,
}

/// Mutable simulation state owned by the engine
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    /// `None` only once the board is full
    pub food: Option<Position>,
    pub pending_direction: Direction,
    pub score: u32,
    pub steps: u32,
    pub phase: GamePhase,
    pub end_reason: Option<EndReason>,
}

impl GameState {
    pub fn new(snake: Snake, food: Option<Position>) -> Self {
        Self {
            snake,
            food,
            pending_direction: Direction::None,
            score: 0,
            steps: 0,
            phase: GamePhase::Idle,
            end_reason: None,
        }
    }
}

/// Read-only view handed to the renderer and scoreboard
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub snake: Vec<Position>,
    pub food: Option<Position>,
    pub board_size: usize,
    pub phase: GamePhase,
    pub score: u32,
    pub steps: u32,
    pub score_increment: u32,
    pub difficulty: Difficulty,
    pub speed: u32,
    pub tick_interval_ms: u64,
    pub direction: Direction,
    pub end_reason: Option<EndReason>,
}

impl Snapshot {
    pub fn head(&self) -> Option<Position> {
        self.snake.first().copied()
    }
}
