use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building a board or game from configuration.
///
/// The simulation itself never fails once constructed; everything here is
/// detected up front.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("board dimensions must be non-zero (got {width}x{height})")]
    ZeroDimension { width: u16, height: u16 },

    #[error("start position ({x}, {y}) lies outside the {width}x{height} board")]
    StartOutOfBounds {
        x: i32,
        y: i32,
        width: u16,
        height: u16,
    },

    #[error("food count {food_count} exceeds the {cells} cells on the board")]
    TooManyFoods { food_count: usize, cells: usize },

    #[error("base tick interval must be greater than zero")]
    InvalidTickInterval,

    #[error("speed multiplier must be a finite value >= 1.0 (got {0})")]
    InvalidSpeedMultiplier(f64),

    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}
