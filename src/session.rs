//! A single player's game, with state reported as diffs
//!
//! A front end owns one [`Session`] per connected player. After an initial
//! [`FullState`], every turn is reported as a [`StepReport`] carrying only the
//! cells that changed.

use crate::game::{
    diff, Action, CellState, Direction, Game, GameConfig, GameError, GameStatus, LevelDiff,
};
use serde::Serialize;
use tracing::debug;

/// Complete level contents plus game status
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FullState {
    pub shape: Vec<usize>,
    pub cells: Vec<CellState>,
    pub status: GameStatus,
    pub timestep: u64,
    pub snake_length: usize,
}

/// Outcome of one turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepReport {
    pub timestep: u64,
    pub fruit_eaten: bool,
    pub status: GameStatus,
    pub snake_length: usize,
    pub latest_fruit_timestep: u64,
    /// Flat index to new value for the cells changed since the last report
    pub changes: LevelDiff,
}

pub struct Session {
    config: GameConfig,
    game: Game,
    /// What the other side last saw
    baseline: Vec<CellState>,
}

impl Session {
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        let game = Game::from_config(&config)?;
        let baseline = game.level().snapshot();
        Ok(Self {
            config,
            game,
            baseline,
        })
    }

    /// A session on an empty hypercube level
    pub fn cube(level_size: usize, n_dims: usize, seed: Option<u64>) -> Result<Self, GameError> {
        Self::new(GameConfig {
            seed,
            ..GameConfig::new(level_size, n_dims)
        })
    }

    /// Full state of the level; later diffs are relative to it
    pub fn full_state(&mut self) -> FullState {
        self.baseline = self.game.level().snapshot();
        FullState {
            shape: self.game.level().shape().to_vec(),
            cells: self.baseline.clone(),
            status: self.game.status(),
            timestep: self.game.timestep(),
            snake_length: self.game.snake_length(),
        }
    }

    /// Turn towards `direction` and advance one turn
    pub fn progress(&mut self, direction: Direction) -> Result<StepReport, GameError> {
        self.advance(Action::Move(direction))
    }

    pub fn advance(&mut self, action: Action) -> Result<StepReport, GameError> {
        let fruit_eaten = self.game.apply(action)?;
        let next = self.game.level().snapshot();
        let changes = diff(&self.baseline, &next)?;
        self.baseline = next;

        let report = StepReport {
            timestep: self.game.timestep(),
            fruit_eaten,
            status: self.game.status(),
            snake_length: self.game.snake_length(),
            latest_fruit_timestep: self.game.latest_fruit_timestep(),
            changes,
        };
        debug!(
            timestep = report.timestep,
            changed = report.changes.len(),
            status = ?report.status,
            "session advanced"
        );
        Ok(report)
    }

    /// Start a fresh game with the same configuration
    pub fn restart(&mut self) -> Result<FullState, GameError> {
        let mut config = self.config.clone();
        // A fixed seed would replay the previous game exactly
        config.seed = self.config.seed.map(|seed| seed.wrapping_add(self.game.timestep() + 1));
        self.game = Game::from_config(&config)?;
        Ok(self.full_state())
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}
