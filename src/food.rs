use rand::Rng;
use tracing::warn;

use crate::config::SpawnPolicy;
use crate::grid::{Coordinate, Grid};
use crate::snake::Snake;

/// Food items currently on the board.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct FoodPool {
    items: Vec<Coordinate>,
}

impl FoodPool {
    /// Creates a pool holding exactly `items`.
    #[must_use]
    pub fn from_items(items: Vec<Coordinate>) -> Self {
        Self { items }
    }

    #[must_use]
    pub fn items(&self) -> &[Coordinate] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn contains(&self, position: Coordinate) -> bool {
        self.items.contains(&position)
    }

    /// Returns the index of the item at `position`.
    #[must_use]
    pub fn position(&self, position: Coordinate) -> Option<usize> {
        self.items.iter().position(|item| *item == position)
    }

    pub(crate) fn remove(&mut self, index: usize) -> Coordinate {
        self.items.swap_remove(index)
    }

    pub(crate) fn push(&mut self, position: Coordinate) {
        self.items.push(position);
    }
}

/// Picks cells for new food.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct FoodSpawner {
    policy: SpawnPolicy,
    retry_limit: u32,
}

impl FoodSpawner {
    #[must_use]
    pub fn new(policy: SpawnPolicy, retry_limit: u32) -> Self {
        Self {
            policy,
            retry_limit,
        }
    }

    #[must_use]
    pub fn policy(self) -> SpawnPolicy {
        self.policy
    }

    /// Chooses a cell for one new food item.
    ///
    /// `Legacy` returns any cell. `Hardened` skips cells held by the snake or
    /// by `pool`, and returns `None` when the board has no free cell left.
    pub fn spawn<R: Rng + ?Sized>(
        self,
        rng: &mut R,
        grid: Grid,
        snake: &Snake,
        pool: &FoodPool,
    ) -> Option<Coordinate> {
        match self.policy {
            SpawnPolicy::Legacy => Some(random_cell(rng, grid)),
            SpawnPolicy::Hardened => {
                let is_free = |cell: Coordinate| !snake.occupies(cell) && !pool.contains(cell);

                for _ in 0..self.retry_limit {
                    let cell = random_cell(rng, grid);
                    if is_free(cell) {
                        return Some(cell);
                    }
                }

                let candidates: Vec<Coordinate> =
                    grid.cells().filter(|cell| is_free(*cell)).collect();
                if candidates.is_empty() {
                    warn!(rows = grid.rows(), cols = grid.cols(), "no free cell left for food");
                    return None;
                }

                let index = rng.gen_range(0..candidates.len());
                Some(candidates[index])
            }
        }
    }

    /// Spawns items until `pool` holds `capacity` or no free cell remains.
    pub fn fill<R: Rng + ?Sized>(
        self,
        rng: &mut R,
        grid: Grid,
        snake: &Snake,
        pool: &mut FoodPool,
        capacity: usize,
    ) {
        while pool.len() < capacity {
            let Some(cell) = self.spawn(rng, grid, snake, pool) else {
                break;
            };
            pool.push(cell);
        }
    }
}

fn random_cell<R: Rng + ?Sized>(rng: &mut R, grid: Grid) -> Coordinate {
    Coordinate {
        row: rng.gen_range(0..i32::from(grid.rows())),
        col: rng.gen_range(0..i32::from(grid.cols())),
    }
}
