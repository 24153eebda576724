use crate::food::FoodPool;
use crate::grid::{Coordinate, Grid};
use crate::snake::Snake;

/// Fatal collision kinds.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Collision {
    Wall,
    SelfCollision,
}

/// Returns true when the head has left the grid.
#[must_use]
pub fn hits_wall(grid: Grid, head: Coordinate) -> bool {
    !grid.in_bounds(head)
}

/// Returns the pool index of the food under the head, if any.
#[must_use]
pub fn food_under(pool: &FoodPool, head: Coordinate) -> Option<usize> {
    pool.position(head)
}

/// Returns true when the head overlaps the rest of the body.
#[must_use]
pub fn hits_self(snake: &Snake) -> bool {
    snake.head_overlaps_body()
}

#[cfg(test)]
mod tests {
    use crate::food::FoodPool;
    use crate::grid::{Coordinate, Grid};
    use crate::input::Direction;
    use crate::snake::Snake;

    use super::{food_under, hits_self, hits_wall};

    fn c(row: i32, col: i32) -> Coordinate {
        Coordinate::new(row, col)
    }

    #[test]
    fn wall_check_covers_all_four_edges() {
        let grid = Grid::new(10, 10).expect("grid should be valid");

        assert!(hits_wall(grid, c(-1, 5)));
        assert!(hits_wall(grid, c(10, 5)));
        assert!(hits_wall(grid, c(5, -1)));
        assert!(hits_wall(grid, c(5, 10)));
        assert!(!hits_wall(grid, c(9, 9)));
    }

    #[test]
    fn food_check_finds_matching_item() {
        let pool = FoodPool::from_items(vec![c(1, 1), c(2, 2)]);

        assert_eq!(food_under(&pool, c(2, 2)), Some(1));
        assert_eq!(food_under(&pool, c(3, 3)), None);
    }

    #[test]
    fn self_check_detects_loop() {
        let snake = Snake::from_segments(
            vec![c(2, 2), c(2, 1), c(1, 1), c(1, 2), c(2, 2)],
            Direction::Left,
        )
        .expect("segments should be non-empty");

        assert!(hits_self(&snake));
    }
}
