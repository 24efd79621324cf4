use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Canonical movement directions for snake input.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Returns the `(dx, dy)` step for one cell of movement. `y` grows downwards.
    #[must_use]
    pub fn unit_vector(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    /// Parses a single-letter code (`U`, `D`, `L`, `R`, case-insensitive).
    #[must_use]
    pub fn from_char(code: char) -> Option<Self> {
        match code.to_ascii_lowercase() {
            'u' => Some(Self::Up),
            'd' => Some(Self::Down),
            'l' => Some(Self::Left),
            'r' => Some(Self::Right),
            _ => None,
        }
    }
}

/// Error returned when a direction name cannot be parsed.
#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
#[error("unknown direction '{0}' (expected up, down, left or right)")]
pub struct ParseDirectionError(pub String);

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "up" | "u" => Ok(Self::Up),
            "down" | "d" => Ok(Self::Down),
            "left" | "l" => Ok(Self::Left),
            "right" | "r" => Ok(Self::Right),
            _ => Err(ParseDirectionError(raw.to_owned())),
        }
    }
}

/// Returns whether a direction change is legal (no immediate 180° turns).
#[must_use]
pub fn direction_change_is_valid(current: Direction, next: Direction) -> bool {
    next != current.opposite()
}

/// Input staging between two ticks.
///
/// Holds at most one direction (last write wins) and a one-shot pause
/// request. While inverted, captured directions are stored as their
/// opposites, which is how the control-inversion effect reaches the snake.
#[derive(Debug, Clone, Default)]
pub struct InputLatch {
    pending: Option<Direction>,
    pause_requested: bool,
    inverted: bool,
}

impl InputLatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a requested direction, replacing any earlier one.
    pub fn capture(&mut self, direction: Direction) {
        let effective = if self.inverted {
            direction.opposite()
        } else {
            direction
        };
        self.pending = Some(effective);
    }

    /// Flags a pause toggle for the next poll.
    pub fn request_pause(&mut self) {
        self.pause_requested = true;
    }

    /// Takes the staged direction, leaving the slot empty.
    pub fn take_direction(&mut self) -> Option<Direction> {
        self.pending.take()
    }

    /// Returns and clears the pause request.
    pub fn take_pause_request(&mut self) -> bool {
        std::mem::take(&mut self.pause_requested)
    }

    pub fn set_inverted(&mut self, inverted: bool) {
        self.inverted = inverted;
    }

    #[must_use]
    pub fn is_inverted(&self) -> bool {
        self.inverted
    }
}

#[cfg(test)]
mod tests {
    use super::{Direction, InputLatch, direction_change_is_valid};

    #[test]
    fn opposite_direction_is_correct() {
        assert_eq!(Direction::Up.opposite(), Direction::Down);
        assert_eq!(Direction::Down.opposite(), Direction::Up);
        assert_eq!(Direction::Left.opposite(), Direction::Right);
        assert_eq!(Direction::Right.opposite(), Direction::Left);
    }

    #[test]
    fn reversal_is_not_a_valid_change() {
        assert!(!direction_change_is_valid(Direction::Up, Direction::Down));
        assert!(!direction_change_is_valid(
            Direction::Right,
            Direction::Left
        ));

        assert!(direction_change_is_valid(Direction::Up, Direction::Left));
        assert!(direction_change_is_valid(Direction::Up, Direction::Up));
    }

    #[test]
    fn unit_vectors_point_the_right_way() {
        assert_eq!(Direction::Up.unit_vector(), (0, -1));
        assert_eq!(Direction::Down.unit_vector(), (0, 1));
        assert_eq!(Direction::Left.unit_vector(), (-1, 0));
        assert_eq!(Direction::Right.unit_vector(), (1, 0));
    }

    #[test]
    fn directions_parse_from_names_and_letters() {
        assert_eq!("Up".parse::<Direction>(), Ok(Direction::Up));
        assert_eq!(" left ".parse::<Direction>(), Ok(Direction::Left));
        assert_eq!("r".parse::<Direction>(), Ok(Direction::Right));
        assert!("sideways".parse::<Direction>().is_err());

        assert_eq!(Direction::from_char('D'), Some(Direction::Down));
        assert_eq!(Direction::from_char('.'), None);
    }

    #[test]
    fn latch_keeps_only_the_latest_direction() {
        let mut latch = InputLatch::new();

        latch.capture(Direction::Up);
        latch.capture(Direction::Left);

        assert_eq!(latch.take_direction(), Some(Direction::Left));
        assert_eq!(latch.take_direction(), None);
    }

    #[test]
    fn inverted_latch_stores_the_opposite() {
        let mut latch = InputLatch::new();
        latch.set_inverted(true);

        latch.capture(Direction::Up);

        assert_eq!(latch.take_direction(), Some(Direction::Down));
    }

    #[test]
    fn pause_request_is_consumed_once() {
        let mut latch = InputLatch::new();
        latch.request_pause();

        assert!(latch.take_pause_request());
        assert!(!latch.take_pause_request());
    }
}
