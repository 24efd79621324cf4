use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Grid position in logical cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the position offset by `(dx, dy)`.
    #[must_use]
    pub fn offset(self, (dx, dy): (i32, i32)) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Canonical key of a board cell, usable in sets and maps.
///
/// Keys are row-major cell indices, so they are collision-free for every
/// in-bounds position. Keys for out-of-bounds positions carry no guarantee.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct CellKey(i64);

impl CellKey {
    /// Returns the raw row-major index.
    #[must_use]
    pub fn index(self) -> i64 {
        self.0
    }
}

/// Fixed-size rectangular play field.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Board {
    width: u16,
    height: u16,
}

impl Board {
    /// Creates a board; both dimensions must be non-zero.
    pub fn new(width: u16, height: u16) -> Result<Self, ConfigError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::ZeroDimension { width, height });
        }
        Ok(Self { width, height })
    }

    #[must_use]
    pub fn width(self) -> u16 {
        self.width
    }

    #[must_use]
    pub fn height(self) -> u16 {
        self.height
    }

    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn cell_count(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    /// Returns the centre cell, rounding towards the origin.
    #[must_use]
    pub fn center(self) -> Position {
        Position {
            x: i32::from(self.width / 2),
            y: i32::from(self.height / 2),
        }
    }

    /// Returns true when the position lies inside the board.
    #[must_use]
    pub fn in_bounds(self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && position.x < i32::from(self.width)
            && position.y < i32::from(self.height)
    }

    #[must_use]
    pub fn key(self, position: Position) -> CellKey {
        CellKey(i64::from(position.y) * i64::from(self.width) + i64::from(position.x))
    }

    /// Inverse of [`Board::key`] for in-bounds positions.
    #[must_use]
    pub fn from_key(self, key: CellKey) -> Position {
        let width = i64::from(self.width);
        // In-bounds keys lie in [0, width * height), so both parts fit in i32.
        Position {
            x: key.0.rem_euclid(width) as i32,
            y: key.0.div_euclid(width) as i32,
        }
    }

    /// Iterates every cell in row-major order (y outer, x inner).
    pub fn cells(self) -> impl Iterator<Item = Position> {
        let width = i32::from(self.width);
        (0..i32::from(self.height)).flat_map(move |y| (0..width).map(move |x| Position { x, y }))
    }
}
