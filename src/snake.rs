use crate::grid::Coordinate;
use crate::input::Direction;

/// Snake body and latched steering state.
///
/// `body[0]` is the head. The body is never empty.
#[derive(Debug, Clone)]
pub struct Snake {
    body: Vec<Coordinate>,
    heading: Direction,
    travel: Direction,
}

impl Snake {
    /// Creates a one-cell snake at `start` facing `heading`.
    #[must_use]
    pub fn new(start: Coordinate, heading: Direction) -> Self {
        Self {
            body: vec![start],
            heading,
            travel: heading,
        }
    }

    /// Creates a snake from explicit body segments (front is head).
    ///
    /// Returns `None` for an empty segment list.
    #[must_use]
    pub fn from_segments(segments: Vec<Coordinate>, heading: Direction) -> Option<Self> {
        if segments.is_empty() {
            return None;
        }

        Some(Self {
            body: segments,
            heading,
            travel: heading,
        })
    }

    /// Latches the next heading. Reversals are only refused when the move
    /// is committed.
    pub fn set_heading(&mut self, direction: Direction) {
        self.heading = direction;
    }

    /// Returns the latched heading used by the next tick.
    #[must_use]
    pub fn heading(&self) -> Direction {
        self.heading
    }

    /// Returns the direction of the last committed move.
    #[must_use]
    pub fn travel(&self) -> Direction {
        self.travel
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Coordinate {
        self.body[0]
    }

    /// Returns the last segment.
    #[must_use]
    pub fn tail(&self) -> Coordinate {
        self.body[self.body.len() - 1]
    }

    /// Body segments from head to tail.
    #[must_use]
    pub fn segments(&self) -> &[Coordinate] {
        &self.body
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Coordinate) -> bool {
        self.body.contains(&position)
    }

    /// Returns true if the head overlaps any non-head segment.
    #[must_use]
    pub fn head_overlaps_body(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|segment| *segment == head)
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Never true: the body always holds the head.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Moves the head to `new_head`; every other segment takes the pre-move
    /// position of the segment ahead of it.
    pub(crate) fn shift_to(&mut self, new_head: Coordinate, direction: Direction) {
        let previous = self.body.clone();
        self.body[0] = new_head;
        for (segment, ahead) in self.body.iter_mut().skip(1).zip(previous.iter()) {
            *segment = *ahead;
        }
        self.travel = direction;
    }

    /// Drops the latched heading in favour of the last committed direction.
    pub(crate) fn revert_heading(&mut self) {
        self.heading = self.travel;
    }

    /// Appends one segment behind the tail, one step against `direction`.
    ///
    /// When that cell is already part of the body the segment goes straight
    /// out from the tail instead, then to any free neighbour of the tail, so
    /// the body never doubles back on itself.
    pub(crate) fn grow_behind(&mut self, direction: Direction) {
        let tail = self.tail();
        let preferred = tail.offset(direction.opposite().delta());

        let straight = self.body.len().checked_sub(2).map(|index| {
            let before = self.body[index];
            tail.offset((tail.row - before.row, tail.col - before.col))
        });
        let neighbours = [Direction::Up, Direction::Down, Direction::Left, Direction::Right]
            .map(|side| tail.offset(side.delta()));

        let extension = std::iter::once(preferred)
            .chain(straight)
            .chain(neighbours)
            .find(|cell| !self.occupies(*cell))
            .unwrap_or(preferred);
        self.body.push(extension);
    }
}
