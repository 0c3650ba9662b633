//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O, timing or
//! rendering dependencies. The host drives it by calling commands and `tick`.

pub mod action;
pub mod config;
pub mod engine;
pub mod error;
pub mod food;
pub mod state;

// Re-export commonly used types
pub use action::{Axis, Direction};
pub use config::{ConfigError, Difficulty, GameConfig, ScoreTable, SpeedPolicy};
pub use engine::{GameEngine, GameOver, TickEvents};
pub use error::GameError;
pub use food::place_food;
pub use state::{EndReason, GamePhase, GameState, Position, Snake, Snapshot};
