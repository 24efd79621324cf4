//! Deterministic simulation core for a grid snake game with timed food effects.
//!
//! [`game::GameState`] advances one tick per [`game::GameState::step`] call and
//! reports what happened. Drawing, real-time scheduling and device input live
//! outside this crate; they drive the state through its public methods.

pub mod board;
pub mod config;
pub mod effects;
pub mod error;
pub mod food;
pub mod game;
pub mod input;
pub mod rng;
pub mod snake;
