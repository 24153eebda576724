use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use crate::collision::{self, Collision};
use crate::config::GameConfig;
use crate::food::{FoodPool, FoodSpawner};
use crate::grid::{Coordinate, Grid};
use crate::input::{Direction, GameInput};
use crate::movement::{self, MoveOutcome};
use crate::progression::{FinishReason, GameStatus, Progression};
use crate::snake::Snake;
use crate::view::SessionView;

/// What one tick did, for the scheduler and presenters.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct TickReport {
    /// The body shifted this tick.
    pub moved: bool,
    /// A food item was eaten.
    pub ate: bool,
    /// New tick interval to re-arm the scheduler with.
    pub speed_changed: Option<Duration>,
    /// The session ended on this tick.
    pub finished: Option<FinishReason>,
}

/// Complete mutable game state for one session.
#[derive(Debug, Clone)]
pub struct GameSession {
    pub snake: Snake,
    pub food: FoodPool,
    grid: Grid,
    progression: Progression,
    status: GameStatus,
    finish_reason: Option<FinishReason>,
    tick_count: u64,
    spawner: FoodSpawner,
    food_capacity: usize,
    config: GameConfig,
    rng: StdRng,
}

impl GameSession {
    /// Creates a session seeded from OS entropy.
    #[must_use]
    pub fn new(grid: Grid, config: GameConfig) -> Self {
        Self::with_rng(grid, config, StdRng::from_entropy())
    }

    /// Creates a deterministic session for tests and reproducible runs.
    #[must_use]
    pub fn new_with_seed(grid: Grid, config: GameConfig, seed: u64) -> Self {
        Self::with_rng(grid, config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(grid: Grid, config: GameConfig, mut rng: StdRng) -> Self {
        let snake = Snake::new(Coordinate::ORIGIN, config.initial_heading);
        let spawner = FoodSpawner::new(config.spawn_policy, config.spawn_retry_limit);
        let mut food = FoodPool::default();
        spawner.fill(&mut rng, grid, &snake, &mut food, config.food_pool_size);

        info!(
            rows = grid.rows(),
            cols = grid.cols(),
            food = food.len(),
            policy = ?spawner.policy(),
            "session started"
        );

        Self {
            snake,
            food,
            grid,
            progression: Progression::new(&config),
            status: GameStatus::Running,
            finish_reason: None,
            tick_count: 0,
            spawner,
            food_capacity: config.food_pool_size,
            config,
            rng,
        }
    }

    /// Starts over on `grid` with the same configuration and a fresh snake,
    /// food pool, score and speed.
    pub fn restart(&mut self, grid: Grid) {
        let rng = StdRng::from_rng(&mut self.rng).unwrap_or_else(|_| StdRng::from_entropy());
        *self = Self::with_rng(grid, self.config.clone(), rng);
    }

    /// Advances the session by one tick.
    ///
    /// Moves the snake, then checks wall, food and self collisions in that
    /// order. A finished session ignores further ticks.
    pub fn tick(&mut self) -> TickReport {
        let mut report = TickReport::default();
        if self.status != GameStatus::Running {
            return report;
        }

        self.tick_count += 1;
        let direction = match movement::advance(&mut self.snake) {
            MoveOutcome::Moved { direction } => direction,
            MoveOutcome::Blocked => return report,
        };
        report.moved = true;

        let head = self.snake.head();
        if collision::hits_wall(self.grid, head) {
            report.finished = Some(self.finish(Collision::Wall));
            return report;
        }

        if let Some(index) = collision::food_under(&self.food, head) {
            self.eat(index, direction, &mut report);
        }

        if collision::hits_self(&self.snake) {
            report.finished = Some(self.finish(Collision::SelfCollision));
            return report;
        }

        debug!(tick = self.tick_count, ?head, score = self.score(), "tick committed");
        report
    }

    fn eat(&mut self, index: usize, direction: Direction, report: &mut TickReport) {
        let eaten = self.food.remove(index);
        self.snake.grow_behind(direction);
        report.ate = true;

        report.speed_changed = self.progression.record_food();

        if let Some(cell) = self.spawner.spawn(&mut self.rng, self.grid, &self.snake, &self.food) {
            self.food.push(cell);
        }

        debug!(?eaten, score = self.score(), length = self.snake.len(), "food eaten");
    }

    fn finish(&mut self, collision: Collision) -> FinishReason {
        let reason = match collision {
            Collision::Wall => FinishReason::Wall,
            Collision::SelfCollision => FinishReason::SelfCollision,
        };

        self.status = GameStatus::Finished;
        self.finish_reason = Some(reason);
        info!(?reason, score = self.score(), length = self.snake.len(), "session finished");
        reason
    }

    /// Latches the heading for the next tick. Ignored once finished.
    pub fn set_heading(&mut self, direction: Direction) {
        if self.status == GameStatus::Running {
            self.snake.set_heading(direction);
        }
    }

    /// Applies one external input event. Only directions affect the session.
    pub fn apply_input(&mut self, input: GameInput) {
        if let GameInput::Direction(direction) = input {
            self.set_heading(direction);
        }
    }

    #[must_use]
    pub fn grid(&self) -> Grid {
        self.grid
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn finish_reason(&self) -> Option<FinishReason> {
        self.finish_reason
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.progression.score()
    }

    /// Current tick interval.
    #[must_use]
    pub fn speed(&self) -> Duration {
        self.progression.speed()
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Number of food items the pool is kept at.
    #[must_use]
    pub fn food_capacity(&self) -> usize {
        self.food_capacity
    }

    /// Snapshot for presenters.
    #[must_use]
    pub fn view(&self) -> SessionView {
        SessionView {
            segments: self.snake.segments().to_vec(),
            facing: self.snake.travel(),
            head_angle: self.snake.travel().angle_degrees(),
            food: self.food.items().to_vec(),
            score: self.score(),
            speed_ms: u64::try_from(self.speed().as_millis()).unwrap_or(u64::MAX),
            speed_boost: self.progression.on_threshold(),
            rows: self.grid.rows(),
            cols: self.grid.cols(),
            status: self.status,
            finish_reason: self.finish_reason,
        }
    }
}
