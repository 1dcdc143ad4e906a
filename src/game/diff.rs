//! Cell-level differences between two level snapshots.

use super::{cell::CellState, error::GameError};
use std::collections::BTreeMap;

/// Flat index to new value for every cell that changed between snapshots
pub type LevelDiff = BTreeMap<usize, CellState>;

/// Compare two row-major snapshots of the same level
pub fn diff(previous: &[CellState], next: &[CellState]) -> Result<LevelDiff, GameError> {
    if previous.len() != next.len() {
        return Err(GameError::SnapshotMismatch {
            previous: previous.len(),
            next: next.len(),
        });
    }
    Ok(previous
        .iter()
        .zip(next)
        .enumerate()
        .filter(|(_, (before, after))| before != after)
        .map(|(flat, (_, &after))| (flat, after))
        .collect())
}

/// Apply a diff produced by [`diff`] to a snapshot in place
pub fn apply(snapshot: &mut [CellState], changes: &LevelDiff) -> Result<(), GameError> {
    if let Some((&flat, _)) = changes.iter().next_back() {
        if flat >= snapshot.len() {
            return Err(GameError::SnapshotMismatch {
                previous: snapshot.len(),
                next: flat + 1,
            });
        }
    }
    for (&flat, &value) in changes {
        snapshot[flat] = value;
    }
    Ok(())
}
