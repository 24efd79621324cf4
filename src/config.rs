use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::board::{Board, Position};
use crate::error::ConfigError;
use crate::game::GameOptions;
use crate::input::Direction;

/// Default board width in cells.
pub const DEFAULT_GRID_WIDTH: u16 = 30;

/// Default board height in cells.
pub const DEFAULT_GRID_HEIGHT: u16 = 20;

/// Default number of food items kept on the board.
pub const DEFAULT_FOOD_COUNT: usize = 1;

/// Base tick interval in milliseconds.
pub const BASE_TICK_MS: u64 = 200;

/// Tick rate multiplier while the speed boost is active.
pub const SPEED_MULTIPLIER: f64 = 1.5;

/// Control inversion duration in milliseconds.
pub const INVERT_MS: u64 = 30_000;

/// Speed boost duration in milliseconds.
pub const SPEEDBOOST_MS: u64 = 15_000;

pub const CHERRY_VALUE: u32 = 100;
pub const MUSHROOM_VALUE: u32 = 350;
pub const PIZZA_VALUE: u32 = 400;

/// Session configuration, loadable from JSON.
///
/// Every field is optional in the file; missing fields take the defaults
/// above. `start` defaults to the board centre.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub width: u16,
    pub height: u16,
    pub food_count: usize,
    pub start: Option<Position>,
    pub start_direction: Direction,
    pub base_tick_ms: u64,
    pub speed_multiplier: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_WIDTH,
            height: DEFAULT_GRID_HEIGHT,
            food_count: DEFAULT_FOOD_COUNT,
            start: None,
            start_direction: Direction::Right,
            base_tick_ms: BASE_TICK_MS,
            speed_multiplier: SPEED_MULTIPLIER,
        }
    }
}

impl GameConfig {
    /// Reads and validates a JSON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    /// Parses and validates a JSON config document.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config = serde_json::from_str::<Self>(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every invariant the simulation relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let board = self.board()?;

        if let Some(start) = self.start {
            if !board.in_bounds(start) {
                return Err(ConfigError::StartOutOfBounds {
                    x: start.x,
                    y: start.y,
                    width: self.width,
                    height: self.height,
                });
            }
        }

        if self.food_count > board.cell_count() {
            return Err(ConfigError::TooManyFoods {
                food_count: self.food_count,
                cells: board.cell_count(),
            });
        }

        if self.base_tick_ms == 0 {
            return Err(ConfigError::InvalidTickInterval);
        }

        if !self.speed_multiplier.is_finite() || self.speed_multiplier < 1.0 {
            return Err(ConfigError::InvalidSpeedMultiplier(self.speed_multiplier));
        }

        Ok(())
    }

    pub fn board(&self) -> Result<Board, ConfigError> {
        Board::new(self.width, self.height)
    }

    /// Options for constructing a game from this config.
    #[must_use]
    pub fn options(&self) -> GameOptions {
        GameOptions {
            food_count: Some(self.food_count),
            start: self.start,
            start_direction: Some(self.start_direction),
            base_tick_ms: Some(self.base_tick_ms),
            speed_multiplier: Some(self.speed_multiplier),
        }
    }
}
