//! Reinforcement learning environment for Snake
//!
//! Provides:
//! - Dense cell-code observations with a one-hot helper
//! - A discrete action space of two actions per axis
//! - Stagnation truncation and win bonus on top of the fruit reward

pub mod config;
pub mod environment;
pub mod observation;

pub use config::EnvConfig;
pub use environment::{Info, SnakeEnvironment, Transition};
pub use observation::{create_observation, Observation};
