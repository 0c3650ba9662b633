//! Tick cadence for the engine
//!
//! The engine is timer-agnostic; this scheduler is the clock. It only fires
//! while the game is running, and it never bursts to catch up after a slow
//! step, so one tick always finishes before the next is due.

use std::time::Duration;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};

use crate::game::GamePhase;

pub struct TickScheduler {
    timer: Interval,
    period: Duration,
    armed: bool,
}

impl TickScheduler {
    /// Create a disarmed scheduler with the given period
    pub fn new(period: Duration) -> Self {
        Self {
            timer: Self::timer(period),
            period,
            armed: false,
        }
    }

    fn timer(period: Duration) -> Interval {
        // First tick one full period from now, not immediately
        let mut timer = interval_at(Instant::now() + period, period);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        timer
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Align the scheduler with the engine: armed only while running, and
    /// restarted whenever the period changes or the game (re)starts.
    pub fn sync(&mut self, phase: GamePhase, period: Duration) {
        let should_arm = phase == GamePhase::Running;

        if period != self.period || (should_arm && !self.armed) {
            self.period = period;
            self.timer = Self::timer(period);
        }
        self.armed = should_arm;
    }

    /// Wait for the next tick.
    ///
    /// Meant for a `tokio::select!` branch guarded by [`Self::is_armed`]; a
    /// disarmed scheduler never completes.
    pub async fn tick(&mut self) {
        if !self.armed {
            std::future::pending::<()>().await;
        }
        self.timer.tick().await;
    }
}
