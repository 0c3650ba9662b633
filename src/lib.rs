//! Grid Snake - a terminal Snake game around a call-driven engine
//!
//! This library provides:
//! - Core game logic and the phase state machine (game module)
//! - Tick scheduling for hosts (scheduler module)
//! - Best score and leaderboard persistence (scoreboard module)
//! - TUI rendering and input translation (render, input modules)
//! - The interactive terminal host (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod scheduler;
pub mod scoreboard;
