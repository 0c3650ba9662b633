use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use super::{
    action::Direction,
    config::{ConfigError, Difficulty, GameConfig},
    error::GameError,
    food::place_food,
    state::{EndReason, GamePhase, GameState, Position, Snake, Snapshot},
};

/// Final result of a game, reported once on the tick that ends it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOver {
    pub final_score: u32,
    pub reason: EndReason,
}

/// What happened during one tick, for the host to dispatch to collaborators
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickEvents {
    /// The snake advanced by one cell
    pub moved: bool,
    /// The snake ate the food this tick
    pub food_eaten: bool,
    /// New score, when it changed
    pub score_changed: Option<u32>,
    /// Set on the tick that ended the game
    pub game_over: Option<GameOver>,
}

impl TickEvents {
    fn ended(final_score: u32, reason: EndReason) -> Self {
        Self {
            game_over: Some(GameOver {
                final_score,
                reason,
            }),
            ..Default::default()
        }
    }
}

/// The game engine: owns the board and the phase state machine.
///
/// The engine has no clock. Every call to [`GameEngine::tick`] advances the
/// simulation by exactly one step, and the host decides when to call it based
/// on [`GameEngine::phase`] and [`GameEngine::tick_interval`].
pub struct GameEngine<R = StdRng> {
    config: GameConfig,
    rng: R,
    state: GameState,
}

impl GameEngine<StdRng> {
    /// Create an engine seeded from system entropy
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create an engine whose food placement is reproducible
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> GameEngine<R> {
    pub fn with_rng(config: GameConfig, mut rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let state = Self::fresh_state(&config, &mut rng);
        Ok(Self { config, rng, state })
    }

    fn fresh_state(config: &GameConfig, rng: &mut R) -> GameState {
        let snake = Snake::new(config.start);
        // A validated board has at least four cells, so this always succeeds
        let food = place_food(rng, config.board_size, &snake).ok();
        GameState::new(snake, food)
    }

    /// Return to `Idle` with a fresh board, from any phase
    pub fn reset(&mut self) {
        self.state = Self::fresh_state(&self.config, &mut self.rng);
        debug!(food = ?self.state.food, "game reset");
    }

    /// Begin a game from `Idle`, or a new one from `Over`
    pub fn start(&mut self) -> Result<(), GameError> {
        match self.state.phase {
            GamePhase::Idle => {}
            GamePhase::Over => self.reset(),
            phase => {
                return Err(GameError::InvalidTransition {
                    command: "start",
                    phase,
                });
            }
        }
        self.state.phase = GamePhase::Running;
        debug!(difficulty = ?self.config.difficulty, speed = self.config.speed, "game started");
        Ok(())
    }

    pub fn pause(&mut self) -> Result<(), GameError> {
        self.transition("pause", GamePhase::Running, GamePhase::Paused)
    }

    pub fn resume(&mut self) -> Result<(), GameError> {
        self.transition("resume", GamePhase::Paused, GamePhase::Running)
    }

    /// Pause a running game or resume a paused one
    pub fn toggle_pause(&mut self) -> Result<(), GameError> {
        match self.state.phase {
            GamePhase::Running => self.pause(),
            GamePhase::Paused => self.resume(),
            phase => Err(GameError::InvalidTransition {
                command: "pause",
                phase,
            }),
        }
    }

    fn transition(
        &mut self,
        command: &'static str,
        from: GamePhase,
        to: GamePhase,
    ) -> Result<(), GameError> {
        let phase = self.state.phase;
        if phase != from {
            return Err(GameError::InvalidTransition { command, phase });
        }
        self.state.phase = to;
        debug!(%from, %to, "phase changed");
        Ok(())
    }

    /// Buffer a direction for the next tick.
    ///
    /// The request must change the axis of the current motion; otherwise it
    /// is rejected and any earlier pending request stays in place.
    pub fn request_direction(&mut self, direction: Direction) -> Result<(), GameError> {
        let phase = self.state.phase;
        if matches!(phase, GamePhase::Paused | GamePhase::Over) {
            return Err(GameError::InvalidTransition {
                command: "steer",
                phase,
            });
        }

        let current = self.state.snake.direction;
        if !current.accepts(direction) {
            return Err(GameError::RejectedDirection {
                requested: direction,
                current,
            });
        }

        self.state.pending_direction = direction;
        Ok(())
    }

    /// Advance the simulation by one step. Does nothing unless `Running`.
    pub fn tick(&mut self) -> TickEvents {
        if self.state.phase != GamePhase::Running {
            return TickEvents::default();
        }

        let pending = std::mem::take(&mut self.state.pending_direction);
        if !pending.is_none() {
            self.state.snake.direction = pending;
        }

        let direction = self.state.snake.direction;
        if direction.is_none() {
            return TickEvents::default();
        }

        let new_head = self.state.snake.head().moved_in_direction(direction);

        if !new_head.is_within(self.config.board_size) {
            return self.end_game(EndReason::Wall);
        }

        // Checked against the whole body: the tail cell is still occupied
        if self.state.snake.contains(new_head) {
            return self.end_game(EndReason::SelfCollision);
        }

        self.state.snake.push_head(new_head);
        self.state.steps += 1;

        let mut events = TickEvents {
            moved: true,
            ..Default::default()
        };

        if self.state.food == Some(new_head) {
            self.state.score = self.state.score.saturating_add(self.config.score_increment());
            events.food_eaten = true;
            events.score_changed = Some(self.state.score);
            debug!(score = self.state.score, length = self.state.snake.len(), "food eaten");

            match place_food(&mut self.rng, self.config.board_size, &self.state.snake) {
                Ok(food) => self.state.food = Some(food),
                Err(_) => {
                    self.state.food = None;
                    events.game_over = self.end_game(EndReason::BoardFull).game_over;
                }
            }
        } else {
            self.state.snake.pop_tail();
        }

        events
    }

    fn end_game(&mut self, reason: EndReason) -> TickEvents {
        self.state.phase = GamePhase::Over;
        self.state.end_reason = Some(reason);
        info!(
            ?reason,
            score = self.state.score,
            length = self.state.snake.len(),
            steps = self.state.steps,
            "game over"
        );
        TickEvents::ended(self.state.score, reason)
    }

    /// Select a difficulty and apply its speed preset
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.config = self.config.clone().with_difficulty(difficulty);
        debug!(?difficulty, speed = self.config.speed, "difficulty changed");
    }

    /// Change the speed setting; returns the value actually applied
    pub fn set_speed(&mut self, speed: u32) -> u32 {
        self.config.speed = self.config.speed_policy.clamp(speed);
        self.config.speed
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn snake(&self) -> &Snake {
        &self.state.snake
    }

    pub fn food(&self) -> Option<Position> {
        self.state.food
    }

    pub fn current_direction(&self) -> Direction {
        self.state.snake.direction
    }

    pub fn pending_direction(&self) -> Direction {
        self.state.pending_direction
    }

    pub fn board_size(&self) -> usize {
        self.config.board_size
    }

    pub fn difficulty(&self) -> Difficulty {
        self.config.difficulty
    }

    pub fn speed(&self) -> u32 {
        self.config.speed
    }

    /// Points the next food item is worth
    pub fn score_increment(&self) -> u32 {
        self.config.score_increment()
    }

    /// Spacing the scheduler should keep between ticks
    pub fn tick_interval(&self) -> Duration {
        self.config.tick_interval()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            snake: self.state.snake.segments().copied().collect(),
            food: self.state.food,
            board_size: self.config.board_size,
            phase: self.state.phase,
            score: self.state.score,
            steps: self.state.steps,
            score_increment: self.score_increment(),
            difficulty: self.config.difficulty,
            speed: self.config.speed,
            tick_interval_ms: self.config.speed_policy.interval_ms(self.config.speed),
            direction: self.state.snake.direction,
            end_reason: self.state.end_reason,
        }
    }
}
