use super::action::Direction;
use serde::{Deserialize, Serialize};

/// A position on an N-dimensional level
///
/// Components are signed so that a step off the low edge stays representable
/// and is caught by the bounds check instead of wrapping.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Position(Vec<i64>);

impl Position {
    pub fn new(components: Vec<i64>) -> Self {
        Self(components)
    }

    pub fn ndim(&self) -> usize {
        self.0.len()
    }

    pub fn components(&self) -> &[i64] {
        &self.0
    }

    /// Move position by a step vector
    pub fn moved_by(&self, delta: &[i64]) -> Self {
        Self(self.0.iter().zip(delta).map(|(c, d)| c + d).collect())
    }

    /// Move position in a direction
    ///
    /// An axis the position does not have leaves it unchanged.
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let mut moved = self.clone();
        if let Some(component) = moved.0.get_mut(direction.axis) {
            *component += direction.sign.delta();
        }
        moved
    }
}

impl From<Vec<i64>> for Position {
    fn from(components: Vec<i64>) -> Self {
        Self(components)
    }
}

impl<const N: usize> From<[i64; N]> for Position {
    fn from(components: [i64; N]) -> Self {
        Self(components.to_vec())
    }
}

/// What ended the game on a losing step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionType {
    /// Snake left the level
    OutOfBounds,
    /// Snake hit a wall cell
    Wall,
    /// Snake hit its own body
    SelfCollision,
}

/// Coarse game status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "u8")]
pub enum GameStatus {
    Playing,
    Lost,
    Won,
}

impl GameStatus {
    /// Numeric status code: 0 playing, 1 lost, 2 won
    pub fn code(self) -> u8 {
        match self {
            GameStatus::Playing => 0,
            GameStatus::Lost => 1,
            GameStatus::Won => 2,
        }
    }

    pub fn is_terminal(self) -> bool {
        self != GameStatus::Playing
    }
}

impl From<GameStatus> for u8 {
    fn from(status: GameStatus) -> Self {
        status.code()
    }
}
