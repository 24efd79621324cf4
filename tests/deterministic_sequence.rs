use effect_snake::board::{Board, Position};
use effect_snake::config::{BASE_TICK_MS, INVERT_MS};
use effect_snake::effects::EffectKind;
use effect_snake::food::FoodKind;
use effect_snake::game::{DeathReason, GameOptions, GameState};
use effect_snake::input::{Direction, InputLatch};
use effect_snake::rng::ScriptedRandom;

fn options_at(start: Position) -> GameOptions {
    GameOptions {
        food_count: Some(1),
        start: Some(start),
        start_direction: Some(Direction::Right),
        base_tick_ms: Some(BASE_TICK_MS),
        ..GameOptions::default()
    }
}

#[test]
fn stepwise_food_collection_and_wall_collision() {
    let board = Board::new(6, 4).expect("board should be valid");
    // Spawn 1: free index 7 is (2, 1), kind 1 is a mushroom.
    // Spawn 2: free index 0 is (0, 0), kind 2 is a pizza.
    let rng = ScriptedRandom::new(vec![7, 1, 0, 2]);
    let mut state = GameState::new(board, rng, options_at(Position::new(1, 1)));

    assert_eq!(state.foods().len(), 1);
    assert_eq!(state.foods()[0].position, Position::new(2, 1));
    assert_eq!(state.foods()[0].kind, FoodKind::Mushroom);

    let first = state.step(0);
    assert!(!first.collided);
    assert_eq!(first.ate.map(|food| food.kind), Some(FoodKind::Mushroom));
    assert_eq!(first.score, 350);
    assert_eq!(
        state.snake_body(),
        vec![Position::new(2, 1), Position::new(1, 1)]
    );
    assert_eq!(state.foods()[0].position, Position::new(0, 0));
    assert_eq!(state.foods()[0].kind, FoodKind::Pizza);
    assert!(state.is_invert_active(0));
    assert_eq!(state.rng().draws(), 4);

    // The inversion effect reaches the snake through the input latch.
    let mut latch = InputLatch::new();
    latch.set_inverted(state.is_invert_active(200));
    latch.capture(Direction::Down);
    let direction = latch.take_direction().expect("direction should be staged");
    assert_eq!(direction, Direction::Up);
    assert!(state.set_direction(direction));

    let second = state.step(200);
    assert!(!second.collided);
    assert_eq!(state.head(), Position::new(2, 0));
    assert_eq!(state.snake_len(), 2);

    let third = state.step(400);
    assert!(third.collided);
    assert!(!state.is_alive());
    assert_eq!(state.death_reason(), Some(DeathReason::Wall));
    assert_eq!(third.score, 350);

    // Effects keep their own clock; nothing expired during this short game.
    assert_eq!(
        state.effect_remaining_ms(EffectKind::InvertControls, 400),
        INVERT_MS - 400
    );
}

#[test]
fn unredirected_snake_hits_the_wall_after_reaching_the_edge() {
    let board = Board::new(5, 5).expect("board should be valid");
    let mut state = GameState::new_with_seed(board, 11, options_at(Position::new(2, 2)));

    assert!(!state.step(0).collided);
    assert!(!state.step(200).collided);
    let crash = state.step(400);

    assert!(crash.collided);
    assert!(!state.is_alive());
    assert_eq!(state.head(), Position::new(4, 2));

    for now in [600, 800, 1_000] {
        let after = state.step(now);
        assert!(after.collided);
        assert_eq!(after.score, crash.score);
    }
}

#[test]
fn reset_after_death_starts_over_on_the_same_board() {
    let board = Board::new(5, 5).expect("board should be valid");
    let mut state = GameState::new(
        board,
        ScriptedRandom::zeros(),
        options_at(Position::new(3, 3)),
    );

    state.step(0);
    state.step(200);
    assert!(!state.is_alive());

    state.reset(GameOptions::default());

    assert!(state.is_alive());
    assert_eq!(state.score(), 0);
    assert_eq!(state.head(), Position::new(3, 3));
    assert_eq!(state.foods().len(), 1);
    assert_eq!(state.foods()[0].position, Position::new(0, 0));
    assert_eq!(state.board(), board);
    assert!(!state.step(400).collided);
}
