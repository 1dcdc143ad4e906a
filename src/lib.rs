//! Ouroboros - Snake in any number of dimensions
//!
//! This library provides:
//! - Core simulation: levels, the snake and turn resolution (game module)
//! - A discrete-action RL environment on top of it (env module)
//! - Player sessions that report turns as level diffs (session module)
//! - Episode recordings as an initial level plus per-turn diffs (replay module)
//! - Text command parsing, episode statistics and run modes for the binary

pub mod env;
pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod replay;
pub mod session;
