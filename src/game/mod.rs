//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The frame loop owns a [`GameState`] and hands it by reference to the
//! input mapper and the simulation step, the only two places that mutate it.

pub mod action;
pub mod config;
pub mod engine;
pub mod food;
pub mod intent;
pub mod sound;
pub mod state;

// Re-export commonly used types
pub use action::Direction;
pub use config::{ConfigError, GameConfig};
pub use engine::{FoodRespawn, GameEngine, StepInfo, StepResult};
pub use intent::Key;
pub use sound::{Sound, Tone};
pub use state::{Bounds, CollisionType, GamePhase, GameState, Playfield, Position, Snake};
