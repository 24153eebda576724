use tracing::debug;

use crate::input::Direction;
use crate::snake::Snake;

/// Result of one movement step.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum MoveOutcome {
    /// The body shifted one cell in `direction`.
    Moved { direction: Direction },
    /// The latched heading pointed straight back into the neck; nothing moved.
    Blocked,
}

/// Advances the snake one cell along its latched heading.
///
/// A snake longer than two segments refuses to turn onto its own neck: the
/// step is dropped and the heading falls back to the last committed
/// direction, which the next tick then follows.
pub fn advance(snake: &mut Snake) -> MoveOutcome {
    let direction = snake.heading();
    let candidate = snake.head().offset(direction.delta());

    if snake.len() > 2 && candidate == snake.segments()[1] {
        debug!(?direction, prior = ?snake.travel(), "reversal into neck refused");
        snake.revert_heading();
        return MoveOutcome::Blocked;
    }

    snake.shift_to(candidate, direction);
    MoveOutcome::Moved { direction }
}
