use crate::game::{CellState, Game, Level};
use serde::Serialize;

/// Dense snapshot of the level as cell codes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Observation {
    /// Level shape, one entry per axis
    pub shape: Vec<usize>,
    /// Row-major cell codes in `0..CellState::NUM_STATES`
    pub cells: Vec<u8>,
}

impl Observation {
    /// One-hot encoding with one channel per cell state
    ///
    /// Returns a flat `[NUM_STATES, cells]` buffer, channel-major.
    pub fn one_hot(&self) -> Vec<f32> {
        let n = self.cells.len();
        let mut data = vec![0.0; CellState::NUM_STATES * n];
        for (i, &code) in self.cells.iter().enumerate() {
            data[code as usize * n + i] = 1.0;
        }
        data
    }
}

/// Create an observation from the level of a game
pub fn create_observation(game: &Game) -> Observation {
    observe_level(game.level())
}

pub fn observe_level(level: &Level) -> Observation {
    Observation {
        shape: level.shape().to_vec(),
        cells: level.cells().iter().map(|cell| cell.code()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Position;

    #[test]
    fn test_observation_matches_level() {
        let mut level = Level::cube(2, 2).unwrap();
        level.set(&Position::from([0, 1]), CellState::Head).unwrap();
        level.set(&Position::from([1, 1]), CellState::Wall).unwrap();

        let obs = observe_level(&level);
        assert_eq!(obs.shape, vec![2, 2]);
        assert_eq!(obs.cells, vec![0, 1, 0, 4]);
    }

    #[test]
    fn test_one_hot_channels() {
        let obs = Observation {
            shape: vec![3],
            cells: vec![0, 3, 4],
        };
        let data = obs.one_hot();
        assert_eq!(data.len(), 15);

        // Every cell is hot in exactly one channel
        for i in 0..3 {
            let hot: f32 = (0..CellState::NUM_STATES).map(|c| data[c * 3 + i]).sum();
            assert_eq!(hot, 1.0);
        }
        assert_eq!(data[0], 1.0); // empty channel, cell 0
        assert_eq!(data[3 * 3 + 1], 1.0); // fruit channel, cell 1
        assert_eq!(data[4 * 3 + 2], 1.0); // wall channel, cell 2
    }

    #[test]
    fn test_create_observation_from_game() {
        let game = Game::new(Level::cube(4, 3).unwrap()).unwrap();
        let obs = create_observation(&game);
        assert_eq!(obs.shape, vec![4, 4, 4]);
        assert_eq!(obs.cells.iter().filter(|&&c| c == 1).count(), 1);
        assert_eq!(obs.cells.iter().filter(|&&c| c == 3).count(), 1);
    }
}
