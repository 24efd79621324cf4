use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::board::{Board, CellKey, Position};
use crate::config::{CHERRY_VALUE, MUSHROOM_VALUE, PIZZA_VALUE};
use crate::effects::EffectKind;
use crate::rng::RandomSource;

/// Number of distinct food kinds drawn from when spawning.
pub const FOOD_KIND_COUNT: usize = 3;

/// Food type and associated metadata.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FoodKind {
    /// Plain points, no effect.
    Cherry,
    /// Inverts controls.
    Mushroom,
    /// Speeds the game up.
    Pizza,
}

impl FoodKind {
    /// Maps a random draw in `[0, FOOD_KIND_COUNT)` to a kind.
    #[must_use]
    pub fn from_index(index: usize) -> Self {
        match index {
            0 => Self::Cherry,
            1 => Self::Mushroom,
            _ => Self::Pizza,
        }
    }

    /// Returns the score value granted when eaten.
    #[must_use]
    pub fn value(self) -> u32 {
        match self {
            Self::Cherry => CHERRY_VALUE,
            Self::Mushroom => MUSHROOM_VALUE,
            Self::Pizza => PIZZA_VALUE,
        }
    }

    /// Effect triggered when eaten, if any.
    #[must_use]
    pub fn effect(self) -> Option<EffectKind> {
        match self {
            Self::Cherry => None,
            Self::Mushroom => Some(EffectKind::InvertControls),
            Self::Pizza => Some(EffectKind::SpeedBoost),
        }
    }
}

/// Food item on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct Food {
    pub kind: FoodKind,
    pub value: u32,
    pub position: Position,
}

impl Food {
    #[must_use]
    pub fn new(kind: FoodKind, position: Position) -> Self {
        Self {
            kind,
            value: kind.value(),
            position,
        }
    }
}

/// Active food items, kept topped up to a desired count.
#[derive(Debug, Clone)]
pub struct FoodSet {
    foods: Vec<Food>,
    desired_count: usize,
}

impl FoodSet {
    #[must_use]
    pub fn new(desired_count: usize) -> Self {
        Self {
            foods: Vec::new(),
            desired_count,
        }
    }

    #[must_use]
    pub fn foods(&self) -> &[Food] {
        &self.foods
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.foods.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.foods.is_empty()
    }

    #[must_use]
    pub fn desired_count(&self) -> usize {
        self.desired_count
    }

    pub fn clear(&mut self) {
        self.foods.clear();
    }

    /// Test hook for placing food at a known cell.
    pub fn push(&mut self, food: Food) {
        self.foods.push(food);
    }

    /// Spawns food until the desired count is reached or the board is full.
    ///
    /// Each spawned cell is added to `occupied` so later spawns in the same
    /// call cannot land on it. Running out of free cells is not an error.
    pub fn ensure_spawn<R: RandomSource + ?Sized>(
        &mut self,
        board: Board,
        occupied: &mut HashSet<CellKey>,
        rng: &mut R,
    ) {
        while self.foods.len() < self.desired_count {
            let Some(food) = spawn_one(board, occupied, rng) else {
                tracing::trace!(
                    missing = self.desired_count - self.foods.len(),
                    "no free cell for food"
                );
                break;
            };

            tracing::trace!(kind = ?food.kind, x = food.position.x, y = food.position.y, "food spawned");
            occupied.insert(board.key(food.position));
            self.foods.push(food);
        }
    }

    /// Removes and returns the first food at `position`.
    pub fn consume_at(&mut self, position: Position) -> Option<Food> {
        let index = self.foods.iter().position(|food| food.position == position)?;
        Some(self.foods.remove(index))
    }
}

fn spawn_one<R: RandomSource + ?Sized>(
    board: Board,
    occupied: &HashSet<CellKey>,
    rng: &mut R,
) -> Option<Food> {
    let free_cells: Vec<Position> = board
        .cells()
        .filter(|cell| !occupied.contains(&board.key(*cell)))
        .collect();

    if free_cells.is_empty() {
        return None;
    }

    let position = free_cells[rng.next_int(free_cells.len())];
    let kind = FoodKind::from_index(rng.next_int(FOOD_KIND_COUNT));

    Some(Food::new(kind, position))
}
