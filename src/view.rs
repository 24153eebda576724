use serde::Serialize;

use crate::grid::Coordinate;
use crate::input::Direction;
use crate::progression::{FinishReason, GameStatus};

/// Read-only projection of a session, produced after every tick.
///
/// Presenters draw from this and never touch the session itself.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct SessionView {
    /// Segments from head to tail.
    pub segments: Vec<Coordinate>,
    pub facing: Direction,
    /// Head sprite rotation in degrees.
    pub head_angle: i16,
    pub food: Vec<Coordinate>,
    pub score: u32,
    pub speed_ms: u64,
    /// Set while the score sits exactly on a speed threshold.
    pub speed_boost: bool,
    pub rows: u16,
    pub cols: u16,
    pub status: GameStatus,
    pub finish_reason: Option<FinishReason>,
}

impl SessionView {
    #[must_use]
    pub fn head(&self) -> Option<Coordinate> {
        self.segments.first().copied()
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.status == GameStatus::Finished
    }
}

#[cfg(test)]
mod tests {
    use crate::config::GameConfig;
    use crate::food::FoodPool;
    use crate::game::GameSession;
    use crate::grid::{Coordinate, Grid};
    use crate::input::Direction;
    use crate::snake::Snake;

    #[test]
    fn view_mirrors_session_state() {
        let grid = Grid::new(8, 9).expect("grid should be valid");
        let mut session = GameSession::new_with_seed(grid, GameConfig::default(), 21);
        session.snake = Snake::new(Coordinate::new(4, 4), Direction::Right);
        session.food = FoodPool::from_items(vec![Coordinate::new(7, 7)]);

        session.set_heading(Direction::Up);
        session.tick();
        let view = session.view();

        assert_eq!(view.head(), Some(Coordinate::new(3, 4)));
        assert_eq!(view.facing, Direction::Up);
        assert_eq!(view.head_angle, -90);
        assert_eq!(view.food, vec![Coordinate::new(7, 7)]);
        assert_eq!((view.rows, view.cols), (8, 9));
        assert_eq!(view.speed_ms, 160);
        assert!(!view.speed_boost);
        assert!(!view.is_finished());
    }

    #[test]
    fn view_serializes_for_external_presenters() {
        let grid = Grid::new(4, 4).expect("grid should be valid");
        let session = GameSession::new_with_seed(grid, GameConfig::default(), 2);

        let json = serde_json::to_value(session.view()).expect("view should serialize");

        assert_eq!(json["status"], "running");
        assert_eq!(json["segments"][0]["row"], 0);
        assert_eq!(json["facing"], "right");
        assert!(json["finish_reason"].is_null());
    }
}
