//! Recorded episodes for later playback
//!
//! A [`Replay`] stores the level once, then only the cells each turn changed.
//! Any frame can be rebuilt by applying the diffs in order.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

use crate::game::{diff, CellState, GameError, Level, LevelDiff};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Replay {
    shape: Vec<usize>,
    initial: Vec<CellState>,
    turns: Vec<LevelDiff>,
    /// Last recorded frame, the baseline for the next diff
    #[serde(skip)]
    latest: Vec<CellState>,
}

impl Replay {
    /// Start a recording from the current contents of `level`
    pub fn new(level: &Level) -> Self {
        let initial = level.snapshot();
        Self {
            shape: level.shape().to_vec(),
            latest: initial.clone(),
            initial,
            turns: Vec::new(),
        }
    }

    /// Append the changes since the previous frame as one turn
    pub fn record(&mut self, level: &Level) -> Result<(), GameError> {
        let changes = diff(&self.latest, level.cells())?;
        self.latest.clone_from_slice(level.cells());
        self.turns.push(changes);
        Ok(())
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn initial(&self) -> &[CellState] {
        &self.initial
    }

    pub fn turns(&self) -> &[LevelDiff] {
        &self.turns
    }

    /// Number of recorded turns
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Level contents after `turn` turns; clamps to the last recorded frame
    pub fn frame(&self, turn: usize) -> Result<Vec<CellState>, GameError> {
        let mut cells = self.initial.clone();
        for changes in self.turns.iter().take(turn) {
            diff::apply(&mut cells, changes)?;
        }
        Ok(cells)
    }

    /// Level contents after the last recorded turn
    pub fn final_frame(&self) -> Result<Vec<CellState>, GameError> {
        self.frame(self.turns.len())
    }
}

/// Write a list of replays as pretty JSON, creating parent directories
pub fn save_replays(replays: &[Replay], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {:?}", parent))?;
    }
    let json = serde_json::to_string_pretty(replays).context("Failed to serialize replays")?;
    std::fs::write(path, json).with_context(|| format!("Failed to write replays to {:?}", path))
}
