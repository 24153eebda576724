use std::time::Duration;

use serde::Serialize;
use tracing::info;

use crate::config::GameConfig;

/// Session lifecycle. `Finished` is terminal.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    Running,
    Finished,
}

/// Why a session ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    Wall,
    SelfCollision,
}

/// Score and tick-interval bookkeeping.
#[derive(Debug, Clone)]
pub struct Progression {
    score: u32,
    base_speed: Duration,
    min_speed: Duration,
    speed: Duration,
    thresholds: Vec<u32>,
}

impl Progression {
    #[must_use]
    pub fn new(config: &GameConfig) -> Self {
        Self {
            score: 0,
            base_speed: config.base_tick_interval(),
            min_speed: config.min_tick_interval(),
            speed: config.base_tick_interval(),
            thresholds: config.speed_thresholds.clone(),
        }
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Current tick interval.
    #[must_use]
    pub fn speed(&self) -> Duration {
        self.speed
    }

    /// True while the score sits exactly on a speed threshold.
    #[must_use]
    pub fn on_threshold(&self) -> bool {
        self.thresholds.contains(&self.score)
    }

    /// Adds one point for an eaten food item.
    ///
    /// Returns the new interval when the score lands exactly on a threshold
    /// and the resulting interval is faster than the current one.
    pub fn record_food(&mut self) -> Option<Duration> {
        self.score += 1;

        if !self.on_threshold() {
            return None;
        }

        let target = self
            .base_speed
            .saturating_sub(Duration::from_millis(u64::from(self.score)))
            .max(self.min_speed);
        if target >= self.speed {
            return None;
        }

        self.speed = target;
        info!(score = self.score, speed = ?self.speed, "speed increased");
        Some(self.speed)
    }
}
