use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::interval;
use tracing::{debug, info, warn};

use crate::game::{GameEngine, GameError, GamePhase, TickEvents};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;
use crate::scheduler::TickScheduler;
use crate::scoreboard::Scoreboard;

pub struct HumanMode {
    engine: GameEngine,
    scoreboard: Scoreboard,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(engine: GameEngine, scoreboard: Scoreboard) -> Self {
        Self {
            engine,
            scoreboard,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen, EnableMouseCapture)
            .context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut scheduler = TickScheduler::new(self.engine.tick_interval());

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        info!(
            board_size = self.engine.board_size(),
            difficulty = ?self.engine.difficulty(),
            "human mode started"
        );

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                // Game logic tick, only while running
                _ = scheduler.tick(), if scheduler.is_armed() => {
                    self.update_game();
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    let snapshot = self.engine.snapshot();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &snapshot, &self.scoreboard, &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            scheduler.sync(self.engine.phase(), self.engine.tick_interval());

            if self.should_quit {
                break;
            }
        }

        info!(games_played = self.metrics.games_played, "human mode finished");
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        let action = match event {
            // Only process key press events, not release
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                self.input_handler.handle_key_event(key)
            }
            Event::Mouse(mouse) => self.input_handler.handle_mouse_event(mouse),
            _ => KeyAction::None,
        };

        self.apply_action(action);
    }

    fn apply_action(&mut self, action: KeyAction) {
        let result = match action {
            KeyAction::Steer(direction) => self.engine.request_direction(direction),
            KeyAction::StartOrPause => self.start_or_pause(),
            KeyAction::Restart => {
                self.engine.reset();
                self.metrics.on_reset();
                Ok(())
            }
            KeyAction::SetDifficulty(difficulty) => {
                self.engine.set_difficulty(difficulty);
                Ok(())
            }
            KeyAction::SpeedUp => {
                self.engine.set_speed(self.engine.speed() + 1);
                Ok(())
            }
            KeyAction::SpeedDown => {
                self.engine.set_speed(self.engine.speed().saturating_sub(1));
                Ok(())
            }
            KeyAction::Quit => {
                self.should_quit = true;
                Ok(())
            }
            KeyAction::None => Ok(()),
        };

        if let Err(err) = result {
            debug!(%err, "input ignored");
        }
    }

    fn start_or_pause(&mut self) -> Result<(), GameError> {
        match self.engine.phase() {
            GamePhase::Idle | GamePhase::Over => {
                self.engine.start()?;
                self.metrics.on_game_start();
            }
            GamePhase::Running => {
                self.engine.pause()?;
                self.metrics.on_pause();
            }
            GamePhase::Paused => {
                self.engine.resume()?;
                self.metrics.on_resume();
            }
        }
        Ok(())
    }

    fn update_game(&mut self) {
        let events = self.engine.tick();
        self.dispatch(&events);
    }

    /// Hand tick events to the collaborators; their failures never stop play
    fn dispatch(&mut self, events: &TickEvents) {
        if let Err(err) = self.scoreboard.dispatch(events) {
            warn!("Failed to update scoreboard: {err:#}");
        }
        if let Some(game_over) = events.game_over {
            self.metrics.on_game_over(game_over.final_score);
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )
        .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
