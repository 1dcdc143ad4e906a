use super::error::GameError;
use rand::Rng;

/// Sign of a unit step along one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sign {
    Negative,
    Positive,
}

impl Sign {
    pub fn delta(self) -> i64 {
        match self {
            Sign::Negative => -1,
            Sign::Positive => 1,
        }
    }

    pub fn flipped(self) -> Sign {
        match self {
            Sign::Negative => Sign::Positive,
            Sign::Positive => Sign::Negative,
        }
    }
}

/// Direction the snake can move: a unit step along a single axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Direction {
    pub axis: usize,
    pub sign: Sign,
}

impl Direction {
    pub fn new(axis: usize, sign: Sign) -> Self {
        Self { axis, sign }
    }

    pub fn positive(axis: usize) -> Self {
        Self::new(axis, Sign::Positive)
    }

    pub fn negative(axis: usize) -> Self {
        Self::new(axis, Sign::Negative)
    }

    /// Parse a step vector such as `[0, -1, 0]`
    pub fn from_vector(vector: &[i64]) -> Result<Self, GameError> {
        let mut nonzero = vector
            .iter()
            .copied()
            .enumerate()
            .filter(|&(_, v)| v != 0);
        match (nonzero.next(), nonzero.next()) {
            (Some((axis, 1)), None) => Ok(Self::positive(axis)),
            (Some((axis, -1)), None) => Ok(Self::negative(axis)),
            _ => Err(GameError::InvalidDirection(vector.to_vec())),
        }
    }

    /// Map a discrete action to a direction
    ///
    /// Actions `0..ndim` step positively along each axis, `ndim..2*ndim`
    /// step negatively.
    pub fn from_action(action: usize, ndim: usize) -> Result<Self, GameError> {
        let action_count = 2 * ndim;
        if action >= action_count {
            return Err(GameError::InvalidAction {
                action,
                action_count,
            });
        }
        let axis = action % ndim;
        if action / ndim == 1 {
            Ok(Self::negative(axis))
        } else {
            Ok(Self::positive(axis))
        }
    }

    /// Inverse of [`Direction::from_action`]
    pub fn to_action(self, ndim: usize) -> usize {
        match self.sign {
            Sign::Positive => self.axis,
            Sign::Negative => self.axis + ndim,
        }
    }

    /// Pick an axis uniformly, then a sign uniformly
    pub fn random<R: Rng + ?Sized>(ndim: usize, rng: &mut R) -> Self {
        let axis = rng.gen_range(0..ndim);
        let sign = if rng.gen_bool(0.5) {
            Sign::Positive
        } else {
            Sign::Negative
        };
        Self::new(axis, sign)
    }

    pub fn to_vector(self, ndim: usize) -> Vec<i64> {
        let mut vector = vec![0; ndim];
        if let Some(component) = vector.get_mut(self.axis) {
            *component = self.sign.delta();
        }
        vector
    }

    pub fn opposite(self) -> Self {
        Self::new(self.axis, self.sign.flipped())
    }

    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(&self, other: Direction) -> bool {
        self.axis == other.axis && self.sign != other.sign
    }
}

/// Action that can be taken in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Move in a specific direction
    Move(Direction),
    /// Continue in current direction
    Continue,
}

impl From<Direction> for Action {
    fn from(direction: Direction) -> Self {
        Action::Move(direction)
    }
}
