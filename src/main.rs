use anyhow::{Context, Result};
use clap::Parser;
use grid_snake::game::{Difficulty, GameConfig, GameEngine};
use grid_snake::modes::HumanMode;
use grid_snake::scoreboard::Scoreboard;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Snake on a fixed square grid, in the terminal")]
struct Cli {
    /// Difficulty; also picks the matching speed unless --speed is given
    #[arg(long, value_enum)]
    difficulty: Option<Difficulty>,

    /// Speed setting (1 = slowest)
    #[arg(long)]
    speed: Option<u32>,

    /// Side length of the square board, in cells
    #[arg(long)]
    board_size: Option<usize>,

    /// Seed for food placement, for reproducible games
    #[arg(long)]
    seed: Option<u64>,

    /// JSON game configuration; command-line flags override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where the best score and leaderboard are kept
    #[arg(long, default_value = "snake_scores.json")]
    scores: PathBuf,

    /// Write logs to this file (the terminal is taken by the game)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_json_file(path)?,
            None => GameConfig::default(),
        };

        if let Some(board_size) = self.board_size {
            let start = GameConfig::new(board_size).start;
            config.board_size = board_size;
            config.start = start;
        }
        if let Some(difficulty) = self.difficulty {
            config = config.with_difficulty(difficulty);
        }
        if let Some(speed) = self.speed {
            config = config.with_speed(speed);
        }

        config.validate().context("Invalid game configuration")?;
        Ok(config)
    }
}

fn init_tracing(log_file: Option<&Path>) -> Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };

    let file = File::create(path).with_context(|| format!("Failed to create log file {:?}", path))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_deref())?;

    let config = cli.game_config()?;
    let engine = match cli.seed {
        Some(seed) => GameEngine::with_seed(config, seed),
        None => GameEngine::new(config),
    }
    .context("Failed to create game engine")?;

    let scoreboard = Scoreboard::load_or_empty(&cli.scores);
    info!(scores = ?cli.scores, best = scoreboard.best(), "scoreboard loaded");

    let mut human_mode = HumanMode::new(engine, scoreboard);
    human_mode.run().await?;

    Ok(())
}
