use std::collections::VecDeque;

use crate::board::Position;
use crate::input::{Direction, direction_change_is_valid};

/// Snake body plus active and pending facing.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Position>,
    direction: Direction,
    pending_direction: Option<Direction>,
}

impl Snake {
    /// Creates a one-cell snake at `start` with the provided direction.
    #[must_use]
    pub fn new(start: Position, direction: Direction) -> Self {
        let mut body = VecDeque::new();
        body.push_front(start);

        Self {
            body,
            direction,
            pending_direction: None,
        }
    }

    /// Creates a snake from explicit body segments (front is head).
    ///
    /// An empty segment list falls back to a one-cell snake at the origin so
    /// the body is never empty.
    #[must_use]
    pub fn from_segments(segments: Vec<Position>, direction: Direction) -> Self {
        let mut body = VecDeque::from(segments);
        if body.is_empty() {
            body.push_front(Position::new(0, 0));
        }

        Self {
            body,
            direction,
            pending_direction: None,
        }
    }

    /// Queues `direction` for the next move.
    ///
    /// Reversals of the active direction are dropped and leave any earlier
    /// queued turn untouched. Otherwise the new value replaces the queued one.
    /// Returns whether the change was accepted.
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        if !direction_change_is_valid(self.direction, direction) {
            tracing::trace!(?direction, active = ?self.direction, "reversal ignored");
            return false;
        }
        self.pending_direction = Some(direction);
        true
    }

    /// Direction the next move will use.
    #[must_use]
    pub fn upcoming_direction(&self) -> Direction {
        self.pending_direction.unwrap_or(self.direction)
    }

    /// Returns the cell the head will enter on the next move.
    #[must_use]
    pub fn next_head(&self) -> Position {
        self.head().offset(self.upcoming_direction().unit_vector())
    }

    /// Applies one movement step, committing any pending direction first.
    ///
    /// The new head is pushed before the tail is dropped; with `grow` the tail
    /// is kept and the body gains one segment.
    pub fn move_forward(&mut self, grow: bool) {
        if let Some(next) = self.pending_direction.take() {
            self.direction = next;
        }

        let new_head = self.head().offset(self.direction.unit_vector());
        self.body.push_front(new_head);
        if !grow {
            let _ = self.body.pop_back();
        }
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        *self
            .body
            .front()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns the tail position.
    #[must_use]
    pub fn tail(&self) -> Position {
        *self
            .body
            .back()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns true if any segment, head included, occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.body.contains(&position)
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false; the body holds at least one segment.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Returns the active movement direction.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[must_use]
    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending_direction
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }
}
