//! Core simulation for N-dimensional Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! Front ends, the RL environment and sessions drive it through [`Game`].

pub mod action;
pub mod cell;
pub mod config;
pub mod diff;
pub mod engine;
pub mod error;
pub mod level;
pub mod state;

// Re-export commonly used types
pub use action::{Action, Direction, Sign};
pub use cell::CellState;
pub use config::GameConfig;
pub use diff::{diff, LevelDiff};
pub use engine::{Game, GameOptions};
pub use error::GameError;
pub use level::Level;
pub use state::{CollisionType, GameStatus, Position};
