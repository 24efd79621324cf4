use std::collections::HashSet;

use serde::Serialize;

use crate::board::{Board, CellKey, Position};
use crate::config::{BASE_TICK_MS, DEFAULT_FOOD_COUNT, GameConfig, SPEED_MULTIPLIER};
use crate::effects::{EffectKind, Effects};
use crate::error::ConfigError;
use crate::food::{Food, FoodSet};
use crate::input::Direction;
use crate::rng::{RandomSource, SeededRandom};
use crate::snake::Snake;

/// Why the snake died.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeathReason {
    Wall,
    SelfCollision,
}

/// Outcome of one [`GameState::step`] call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepResult {
    pub ate: Option<Food>,
    pub collided: bool,
    pub expired_effects: Vec<EffectKind>,
    pub score: u32,
}

/// Construction and reset overrides. `None` fields fall back to defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GameOptions {
    pub food_count: Option<usize>,
    pub start: Option<Position>,
    pub start_direction: Option<Direction>,
    pub base_tick_ms: Option<u64>,
    pub speed_multiplier: Option<f64>,
}

/// Authoritative simulation state for one session.
///
/// The board and random source live for the whole session; everything else
/// is rebuilt by [`GameState::reset`].
#[derive(Debug, Clone)]
pub struct GameState<R = SeededRandom> {
    board: Board,
    rng: R,
    snake: Snake,
    foods: FoodSet,
    effects: Effects,
    score: u32,
    alive: bool,
    death_reason: Option<DeathReason>,
    start: Position,
    start_direction: Direction,
    base_tick_ms: u64,
    speed_multiplier: f64,
}

impl GameState<SeededRandom> {
    /// Creates a deterministic state for tests and reproducible simulations.
    #[must_use]
    pub fn new_with_seed(board: Board, seed: u64, options: GameOptions) -> Self {
        Self::new(board, SeededRandom::from_seed(seed), options)
    }
}

impl<R: RandomSource> GameState<R> {
    /// Creates a session and performs the initial food spawn.
    ///
    /// The start position is not validated; use [`GameState::from_config`]
    /// for checked construction.
    #[must_use]
    pub fn new(board: Board, rng: R, options: GameOptions) -> Self {
        let start = options.start.unwrap_or_else(|| board.center());
        let start_direction = options.start_direction.unwrap_or(Direction::Right);
        let food_count = options.food_count.unwrap_or(DEFAULT_FOOD_COUNT);

        let mut state = Self {
            board,
            rng,
            snake: Snake::new(start, start_direction),
            foods: FoodSet::new(food_count),
            effects: Effects::new(),
            score: 0,
            alive: true,
            death_reason: None,
            start,
            start_direction,
            base_tick_ms: options.base_tick_ms.unwrap_or(BASE_TICK_MS),
            speed_multiplier: options.speed_multiplier.unwrap_or(SPEED_MULTIPLIER),
        };
        state.ensure_food_spawn();
        state
    }

    /// Validates `config` and builds a session from it.
    pub fn from_config(config: &GameConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config.board()?, rng, config.options()))
    }

    /// Advances the simulation by one tick at timestamp `now_ms`.
    pub fn step(&mut self, now_ms: u64) -> StepResult {
        if !self.alive {
            return StepResult {
                ate: None,
                collided: true,
                expired_effects: Vec::new(),
                score: self.score,
            };
        }

        let next_head = self.snake.next_head();

        if !self.board.in_bounds(next_head) {
            return self.die(DeathReason::Wall, next_head, now_ms);
        }

        // Checked against the full pre-move body, tail included.
        if self.snake.occupies(next_head) {
            return self.die(DeathReason::SelfCollision, next_head, now_ms);
        }

        let eaten = self.foods.consume_at(next_head);
        self.snake.move_forward(eaten.is_some());

        if let Some(food) = eaten {
            if let Some(effect) = food.kind.effect() {
                self.effects.apply_default(effect, now_ms);
            }
            self.score = self.score.saturating_add(food.value);
            tracing::debug!(
                kind = ?food.kind,
                value = food.value,
                score = self.score,
                length = self.snake.len(),
                "food eaten"
            );
        }

        self.ensure_food_spawn();

        let expired_effects = self.effects.purge_expired(now_ms);
        if !expired_effects.is_empty() {
            tracing::debug!(?expired_effects, now_ms, "effects expired");
        }

        StepResult {
            ate: eaten,
            collided: false,
            expired_effects,
            score: self.score,
        }
    }

    /// Queues a direction change for the next tick. Returns whether it was
    /// accepted; reversals of the active direction are dropped.
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        self.snake.set_direction(direction)
    }

    /// Starts a fresh episode on the same board and random source.
    ///
    /// Unset options fall back to the values this session was created with
    /// (or the last reset), not to the board centre, `Right` and one food.
    /// The base tick keeps its current value unless overridden.
    pub fn reset(&mut self, options: GameOptions) {
        self.start = options.start.unwrap_or(self.start);
        self.start_direction = options.start_direction.unwrap_or(self.start_direction);
        let food_count = options.food_count.unwrap_or(self.foods.desired_count());

        self.snake = Snake::new(self.start, self.start_direction);
        self.foods = FoodSet::new(food_count);
        self.effects.clear();
        self.score = 0;
        self.alive = true;
        self.death_reason = None;
        self.base_tick_ms = options.base_tick_ms.unwrap_or(self.base_tick_ms);
        self.speed_multiplier = options.speed_multiplier.unwrap_or(self.speed_multiplier);

        tracing::debug!(
            x = self.start.x,
            y = self.start.y,
            direction = ?self.start_direction,
            food_count,
            "game reset"
        );
        self.ensure_food_spawn();
    }

    /// Interval the driving scheduler should wait before the next tick.
    #[must_use]
    pub fn tick_ms(&self, now_ms: u64) -> u64 {
        if self.effects.is_active(EffectKind::SpeedBoost, now_ms) {
            (self.base_tick_ms as f64 / self.speed_multiplier).floor() as u64
        } else {
            self.base_tick_ms
        }
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    #[must_use]
    pub fn death_reason(&self) -> Option<DeathReason> {
        self.death_reason
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Body cells from head to tail.
    #[must_use]
    pub fn snake_body(&self) -> Vec<Position> {
        self.snake.segments().copied().collect()
    }

    #[must_use]
    pub fn head(&self) -> Position {
        self.snake.head()
    }

    #[must_use]
    pub fn snake_len(&self) -> usize {
        self.snake.len()
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.snake.direction()
    }

    #[must_use]
    pub fn foods(&self) -> &[Food] {
        self.foods.foods()
    }

    #[must_use]
    pub fn desired_food_count(&self) -> usize {
        self.foods.desired_count()
    }

    #[must_use]
    pub fn board(&self) -> Board {
        self.board
    }

    #[must_use]
    pub fn base_tick_ms(&self) -> u64 {
        self.base_tick_ms
    }

    #[must_use]
    pub fn is_invert_active(&self, now_ms: u64) -> bool {
        self.effects.is_active(EffectKind::InvertControls, now_ms)
    }

    #[must_use]
    pub fn is_speed_active(&self, now_ms: u64) -> bool {
        self.effects.is_active(EffectKind::SpeedBoost, now_ms)
    }

    #[must_use]
    pub fn effect_remaining_ms(&self, kind: EffectKind, now_ms: u64) -> u64 {
        self.effects.remaining_ms(kind, now_ms)
    }

    /// Returns the random source, e.g. to inspect a scripted double.
    #[must_use]
    pub fn rng(&self) -> &R {
        &self.rng
    }

    fn die(&mut self, reason: DeathReason, next_head: Position, now_ms: u64) -> StepResult {
        self.alive = false;
        self.death_reason = Some(reason);
        tracing::debug!(
            ?reason,
            x = next_head.x,
            y = next_head.y,
            score = self.score,
            "snake died"
        );

        StepResult {
            ate: None,
            collided: true,
            expired_effects: self.effects.purge_expired(now_ms),
            score: self.score,
        }
    }

    fn occupied_keys(&self) -> HashSet<CellKey> {
        self.snake
            .segments()
            .copied()
            .chain(self.foods.foods().iter().map(|food| food.position))
            .map(|position| self.board.key(position))
            .collect()
    }

    fn ensure_food_spawn(&mut self) {
        let mut occupied = self.occupied_keys();
        self.foods.ensure_spawn(self.board, &mut occupied, &mut self.rng);
    }
}
