use std::time::{Duration, Instant};

/// Per-session play statistics shown in the header
pub struct GameMetrics {
    /// When the current game started, if one has
    pub start_time: Option<Instant>,
    /// Play time of the current game, excluding pauses
    pub elapsed_time: Duration,
    pub high_score: u32,
    pub games_played: u32,
    paused_since: Option<Instant>,
    paused_total: Duration,
    finished: bool,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: None,
            elapsed_time: Duration::ZERO,
            high_score: 0,
            games_played: 0,
            paused_since: None,
            paused_total: Duration::ZERO,
            finished: false,
        }
    }

    pub fn update(&mut self) {
        if self.finished || self.paused_since.is_some() {
            return;
        }
        if let Some(start) = self.start_time {
            self.elapsed_time = start.elapsed().saturating_sub(self.paused_total);
        }
    }

    pub fn on_game_start(&mut self) {
        self.start_time = Some(Instant::now());
        self.elapsed_time = Duration::ZERO;
        self.paused_since = None;
        self.paused_total = Duration::ZERO;
        self.finished = false;
    }

    /// Back to the idle board: clock stopped at zero
    pub fn on_reset(&mut self) {
        self.on_game_start();
        self.start_time = None;
    }

    pub fn on_pause(&mut self) {
        self.update();
        if self.paused_since.is_none() {
            self.paused_since = Some(Instant::now());
        }
    }

    pub fn on_resume(&mut self) {
        if let Some(since) = self.paused_since.take() {
            self.paused_total += since.elapsed();
        }
    }

    pub fn on_game_over(&mut self, final_score: u32) {
        self.update();
        self.finished = true;
        self.games_played += 1;
        if final_score > self.high_score {
            self.high_score = final_score;
        }
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
