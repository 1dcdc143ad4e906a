use super::config::EnvConfig;
use super::observation::{create_observation, Observation};
use crate::game::{Direction, Game, GameError, GameStatus};
use anyhow::{anyhow, Result};
use serde::Serialize;
use tracing::debug;

/// Auxiliary information returned with every observation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Info {
    pub snake_length: usize,
    pub timestep: u64,
}

/// Result of one environment step
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transition {
    pub observation: Observation,
    pub reward: f32,
    /// The game reached a terminal state
    pub terminated: bool,
    /// The snake went too long without eating
    pub truncated: bool,
    pub info: Info,
}

impl Transition {
    pub fn done(&self) -> bool {
        self.terminated || self.truncated
    }
}

/// Snake environment for reinforcement learning
///
/// Wraps a [`Game`] behind a discrete action space of size `2 * n_dims`:
/// action `a` steps along axis `a % n_dims`, negatively when `a >= n_dims`.
pub struct SnakeEnvironment {
    config: EnvConfig,
    game: Game,
    episode: u64,
}

impl SnakeEnvironment {
    /// Create a new environment and start its first episode
    pub fn new(config: EnvConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|e| anyhow!("invalid environment config: {e}"))?;
        let game = Game::from_config(&config.game)?;
        Ok(Self {
            config,
            game,
            episode: 0,
        })
    }

    /// Number of discrete actions
    pub fn action_count(&self) -> usize {
        2 * self.config.game.n_dims
    }

    /// Direction for a discrete action
    pub fn action_to_direction(&self, action: usize) -> Result<Direction, GameError> {
        Direction::from_action(action, self.config.game.n_dims)
    }

    /// Start a new episode
    ///
    /// With an explicit seed the episode is reproducible. Without one, a
    /// seeded config still yields distinct, reproducible episodes.
    pub fn reset(&mut self, seed: Option<u64>) -> Result<(Observation, Info), GameError> {
        self.episode += 1;
        let mut game_config = self.config.game.clone();
        game_config.seed = seed.or_else(|| {
            self.config
                .game
                .seed
                .map(|base| base.wrapping_add(self.episode))
        });
        self.game = Game::from_config(&game_config)?;
        Ok((create_observation(&self.game), self.info()))
    }

    /// Step the environment with a discrete action
    pub fn step(&mut self, action: usize) -> Result<Transition, GameError> {
        let direction = self.action_to_direction(action)?;
        let was_finished = self.game.is_finished();
        self.game.change_direction(direction)?;
        let ate_fruit = self.game.step();

        let mut reward = if ate_fruit {
            self.config.fruit_reward
        } else {
            0.0
        };
        let terminated = self.game.is_finished();
        if terminated && !was_finished && self.game.status() == GameStatus::Won {
            reward += self.config.win_bonus;
        }
        let truncated = !terminated && self.game.stagnation() >= self.config.stagnation_limit();

        if terminated && !was_finished {
            debug!(
                episode = self.episode,
                status = ?self.game.status(),
                length = self.game.snake_length(),
                "episode terminated"
            );
        }

        Ok(Transition {
            observation: create_observation(&self.game),
            reward,
            terminated,
            truncated,
            info: self.info(),
        })
    }

    /// Get current observation without stepping
    pub fn observation(&self) -> Observation {
        create_observation(&self.game)
    }

    pub fn info(&self) -> Info {
        Info {
            snake_length: self.game.snake_length(),
            timestep: self.game.timestep(),
        }
    }

    pub fn config(&self) -> &EnvConfig {
        &self.config
    }

    /// Get reference to the current game (for testing/debugging)
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Episodes started by [`SnakeEnvironment::reset`]
    pub fn episode(&self) -> u64 {
        self.episode
    }
}
