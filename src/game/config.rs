use super::{error::GameError, level::Level, state::Position};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for a game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Cells along each axis
    pub level_size: usize,
    /// Number of axes
    pub n_dims: usize,
    /// Wall cells placed before the snake
    pub walls: Vec<Position>,
    /// Seed for reproducible games; entropy when unset
    pub seed: Option<u64>,
    /// Ignore direction changes that reverse onto the body
    pub reject_reversal: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            level_size: Level::DEFAULT_SIZE,
            n_dims: Level::DEFAULT_DIMS,
            walls: Vec::new(),
            seed: None,
            reject_reversal: false,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with a custom level size
    pub fn new(level_size: usize, n_dims: usize) -> Self {
        Self {
            level_size,
            n_dims,
            ..Default::default()
        }
    }

    /// Create a small level for testing
    pub fn small() -> Self {
        Self::new(5, 2)
    }

    /// Total number of cells in the configured level
    pub fn cell_count(&self) -> usize {
        self.level_size.saturating_pow(self.n_dims as u32)
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<(), String> {
        if self.level_size == 0 {
            return Err("level_size must be at least 1".to_string());
        }
        if self.n_dims == 0 {
            return Err("n_dims must be at least 1".to_string());
        }
        if let Some(wall) = self.walls.iter().find(|w| w.ndim() != self.n_dims) {
            return Err(format!(
                "wall {:?} has {} components, expected {}",
                wall.components(),
                wall.ndim(),
                self.n_dims
            ));
        }
        Ok(())
    }

    pub fn build_level(&self) -> Result<Level, GameError> {
        Level::new(vec![self.level_size; self.n_dims], self.walls.iter().cloned())
    }

    /// Load a configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let config: Self = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config {:?}", path))?;
        config
            .validate()
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("Invalid config {:?}", path))?;
        Ok(config)
    }

    /// Save the configuration as pretty JSON, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }
        let json = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, json).with_context(|| format!("Failed to write config to {:?}", path))
    }
}
