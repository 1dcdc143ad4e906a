use thiserror::Error;

/// Errors raised by the simulation core.
///
/// In-game losses and wins are not errors; they are terminal states read
/// back through [`Game::status`](super::Game::status).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("invalid level shape {shape:?}: every dimension must be positive")]
    InvalidShape { shape: Vec<usize> },

    #[error("position {position:?} is outside a level of shape {shape:?}")]
    OutOfBounds {
        position: Vec<i64>,
        shape: Vec<usize>,
    },

    #[error("no empty cell is available to place the snake")]
    NoSpace,

    #[error("invalid direction vector {0:?}: expected exactly one component of +1 or -1")]
    InvalidDirection(Vec<i64>),

    #[error("expected {expected} dimensions, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("snapshots differ in size: {previous} vs {next} cells")]
    SnapshotMismatch { previous: usize, next: usize },

    #[error("action {action} is outside the action space of size {action_count}")]
    InvalidAction { action: usize, action_count: usize },
}
