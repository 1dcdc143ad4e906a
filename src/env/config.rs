//! Environment configuration

use crate::game::GameConfig;
use serde::{Deserialize, Serialize};

/// Configuration for the RL environment
///
/// # Example
///
/// ```rust
/// use ouroboros::env::EnvConfig;
///
/// let config = EnvConfig {
///     win_bonus: 25.0,
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvConfig {
    /// Level and game settings for every episode
    pub game: GameConfig,

    /// Turns without eating before an episode is truncated
    ///
    /// Default: three times the number of cells
    pub max_stagnant_timesteps: Option<u64>,

    /// Reward for eating a fruit
    ///
    /// Default: 1.0
    pub fruit_reward: f32,

    /// Extra reward for the step that fills the level
    ///
    /// Default: 10.0
    pub win_bonus: f32,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            max_stagnant_timesteps: None,
            fruit_reward: 1.0,
            win_bonus: 10.0,
        }
    }
}

impl EnvConfig {
    pub fn new(level_size: usize, n_dims: usize) -> Self {
        Self {
            game: GameConfig::new(level_size, n_dims),
            ..Default::default()
        }
    }

    /// Truncation limit after applying the default
    pub fn stagnation_limit(&self) -> u64 {
        self.max_stagnant_timesteps
            .unwrap_or_else(|| 3 * self.game.cell_count() as u64)
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<(), String> {
        self.game.validate()?;

        if self.max_stagnant_timesteps == Some(0) {
            return Err("max_stagnant_timesteps must be at least 1".to_string());
        }

        if !self.fruit_reward.is_finite() {
            return Err(format!(
                "fruit_reward must be finite, got {}",
                self.fruit_reward
            ));
        }

        if !self.win_bonus.is_finite() {
            return Err(format!("win_bonus must be finite, got {}", self.win_bonus));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EnvConfig::default();
        assert_eq!(config.fruit_reward, 1.0);
        assert_eq!(config.win_bonus, 10.0);
        assert_eq!(config.stagnation_limit(), 243);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_stagnation_limit_override() {
        let config = EnvConfig {
            max_stagnant_timesteps: Some(12),
            ..EnvConfig::new(5, 3)
        };
        assert_eq!(config.stagnation_limit(), 12);
        assert_eq!(EnvConfig::new(5, 3).stagnation_limit(), 375);
    }

    #[test]
    fn test_validation() {
        let mut config = EnvConfig::default();
        config.max_stagnant_timesteps = Some(0);
        assert!(config.validate().is_err());

        let mut config = EnvConfig::default();
        config.fruit_reward = f32::NAN;
        assert!(config.validate().is_err());

        let mut config = EnvConfig::default();
        config.win_bonus = f32::INFINITY;
        assert!(config.validate().is_err());

        assert!(EnvConfig::new(0, 2).validate().is_err());
    }
}
