//! Dense N-dimensional level with an incrementally maintained index of empty
//! cells.

use super::cell::CellState;
use super::error::GameError;
use super::state::Position;
use rand::Rng;

/// Set of empty flat indices supporting O(1) insert, remove and uniform
/// sampling.
///
/// `members` is the dense list sampled from; `slots[i]` is the position of
/// flat index `i` inside `members`, if present.
#[derive(Debug, Clone)]
struct EmptyIndex {
    members: Vec<usize>,
    slots: Vec<Option<usize>>,
}

impl EmptyIndex {
    fn new(cell_count: usize) -> Self {
        Self {
            members: Vec::with_capacity(cell_count),
            slots: vec![None; cell_count],
        }
    }

    fn insert(&mut self, flat: usize) {
        if self.slots[flat].is_none() {
            self.slots[flat] = Some(self.members.len());
            self.members.push(flat);
        }
    }

    fn remove(&mut self, flat: usize) {
        if let Some(slot) = self.slots[flat].take() {
            self.members.swap_remove(slot);
            if let Some(&moved) = self.members.get(slot) {
                self.slots[moved] = Some(slot);
            }
        }
    }

    fn contains(&self, flat: usize) -> bool {
        self.slots[flat].is_some()
    }

    fn len(&self) -> usize {
        self.members.len()
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<usize> {
        if self.members.is_empty() {
            return None;
        }
        Some(self.members[rng.gen_range(0..self.members.len())])
    }
}

/// The playing field
///
/// Cells are stored row-major (last axis varies fastest). Every write goes
/// through [`Level::set`], which keeps the empty-cell index exact.
#[derive(Debug, Clone)]
pub struct Level {
    shape: Vec<usize>,
    strides: Vec<usize>,
    cells: Vec<CellState>,
    empty: EmptyIndex,
}

// The empty index order depends on write history, so only the grid counts.
impl PartialEq for Level {
    fn eq(&self, other: &Self) -> bool {
        self.shape == other.shape && self.cells == other.cells
    }
}

impl Eq for Level {}

impl Level {
    /// Side length of the default level
    pub const DEFAULT_SIZE: usize = 9;
    /// Dimensionality of the default level
    pub const DEFAULT_DIMS: usize = 2;

    /// Create an empty level of the given shape with optional wall cells
    pub fn new<I>(shape: Vec<usize>, walls: I) -> Result<Self, GameError>
    where
        I: IntoIterator<Item = Position>,
    {
        let cell_count = checked_cell_count(&shape)?;
        let mut cells = vec![CellState::Empty; cell_count];
        let strides = strides_for(&shape);

        for wall in walls {
            let flat = flat_index_in(&shape, &strides, &wall)?;
            cells[flat] = CellState::Wall;
        }

        Ok(Self::assemble(shape, strides, cells))
    }

    /// Create a level from existing cell contents in row-major order
    pub fn from_cells(shape: Vec<usize>, cells: Vec<CellState>) -> Result<Self, GameError> {
        let cell_count = checked_cell_count(&shape)?;
        if cells.len() != cell_count {
            return Err(GameError::SnapshotMismatch {
                previous: cell_count,
                next: cells.len(),
            });
        }
        let strides = strides_for(&shape);
        Ok(Self::assemble(shape, strides, cells))
    }

    /// A hypercube level of `size` cells along each of `n_dims` axes
    pub fn cube(size: usize, n_dims: usize) -> Result<Self, GameError> {
        Self::new(vec![size; n_dims], std::iter::empty())
    }

    // The only full scan of the cells happens here.
    fn assemble(shape: Vec<usize>, strides: Vec<usize>, cells: Vec<CellState>) -> Self {
        let mut empty = EmptyIndex::new(cells.len());
        for (flat, cell) in cells.iter().enumerate() {
            if cell.is_empty() {
                empty.insert(flat);
            }
        }
        Self {
            shape,
            strides,
            cells,
            empty,
        }
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Total number of cells
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Number of cells currently empty
    pub fn empty_count(&self) -> usize {
        self.empty.len()
    }

    /// Check if a position is within the level bounds
    pub fn in_bounds(&self, pos: &Position) -> bool {
        pos.ndim() == self.ndim()
            && pos
                .components()
                .iter()
                .zip(&self.shape)
                .all(|(&c, &size)| c >= 0 && (c as u64) < size as u64)
    }

    /// Row-major flat index of a position
    pub fn flat_index(&self, pos: &Position) -> Result<usize, GameError> {
        flat_index_in(&self.shape, &self.strides, pos)
    }

    /// Inverse of [`Level::flat_index`]
    ///
    /// # Panics
    ///
    /// Panics if `flat` is not below [`Level::cell_count`].
    pub fn unravel(&self, flat: usize) -> Position {
        assert!(flat < self.cells.len(), "flat index {flat} out of range");
        let components = self
            .strides
            .iter()
            .zip(&self.shape)
            .map(|(&stride, &size)| ((flat / stride) % size) as i64)
            .collect();
        Position::new(components)
    }

    pub fn get(&self, pos: &Position) -> Result<CellState, GameError> {
        let flat = self.flat_index(pos)?;
        Ok(self.cells[flat])
    }

    /// Write a cell, keeping the empty-cell index in sync
    ///
    /// Returns the previous value.
    pub fn set(&mut self, pos: &Position, value: CellState) -> Result<CellState, GameError> {
        let flat = self.flat_index(pos)?;
        Ok(self.set_flat(flat, value))
    }

    pub(crate) fn set_flat(&mut self, flat: usize, value: CellState) -> CellState {
        let previous = std::mem::replace(&mut self.cells[flat], value);
        match (previous.is_empty(), value.is_empty()) {
            (true, false) => self.empty.remove(flat),
            (false, true) => self.empty.insert(flat),
            _ => {}
        }
        previous
    }

    /// Uniformly pick one of the currently empty cells
    ///
    /// Returns `None` when the level is full.
    pub fn choose_random_empty<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Position> {
        self.empty.sample(rng).map(|flat| self.unravel(flat))
    }

    pub(crate) fn choose_random_empty_flat<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<usize> {
        self.empty.sample(rng)
    }

    pub fn is_empty_at(&self, pos: &Position) -> bool {
        self.flat_index(pos)
            .map(|flat| self.empty.contains(flat))
            .unwrap_or(false)
    }

    /// Positions of every empty cell, in no particular order
    pub fn empty_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.empty.members.iter().map(|&flat| self.unravel(flat))
    }

    /// Read-only view of the cells in row-major order
    pub fn cells(&self) -> &[CellState] {
        &self.cells
    }

    /// Owned copy of the cells in row-major order
    pub fn snapshot(&self) -> Vec<CellState> {
        self.cells.clone()
    }

    /// Every non-empty cell with its value, in row-major order
    pub fn occupied(&self) -> Vec<(Position, CellState)> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| !cell.is_empty())
            .map(|(flat, &cell)| (self.unravel(flat), cell))
            .collect()
    }

    /// Number of cells holding `state`
    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|&&cell| cell == state).count()
    }

    /// Full-scan check that the empty-cell index matches the cells exactly
    pub fn empty_index_is_consistent(&self) -> bool {
        let empty_cells = self.cells.iter().filter(|cell| cell.is_empty()).count();
        empty_cells == self.empty.len()
            && self
                .cells
                .iter()
                .enumerate()
                .all(|(flat, cell)| cell.is_empty() == self.empty.contains(flat))
    }
}

impl Default for Level {
    fn default() -> Self {
        let shape = vec![Self::DEFAULT_SIZE; Self::DEFAULT_DIMS];
        let strides = strides_for(&shape);
        let cells = vec![CellState::Empty; Self::DEFAULT_SIZE.pow(Self::DEFAULT_DIMS as u32)];
        Self::assemble(shape, strides, cells)
    }
}

fn checked_cell_count(shape: &[usize]) -> Result<usize, GameError> {
    let invalid = || GameError::InvalidShape {
        shape: shape.to_vec(),
    };
    if shape.is_empty() || shape.contains(&0) {
        return Err(invalid());
    }
    shape
        .iter()
        .try_fold(1usize, |acc, &size| acc.checked_mul(size))
        .ok_or_else(invalid)
}

fn strides_for(shape: &[usize]) -> Vec<usize> {
    let mut strides = vec![1; shape.len()];
    for axis in (0..shape.len().saturating_sub(1)).rev() {
        strides[axis] = strides[axis + 1] * shape[axis + 1];
    }
    strides
}

fn flat_index_in(shape: &[usize], strides: &[usize], pos: &Position) -> Result<usize, GameError> {
    let out_of_bounds = || GameError::OutOfBounds {
        position: pos.components().to_vec(),
        shape: shape.to_vec(),
    };
    if pos.ndim() != shape.len() {
        return Err(out_of_bounds());
    }
    pos.components()
        .iter()
        .zip(shape.iter().zip(strides))
        .try_fold(0usize, |flat, (&c, (&size, &stride))| {
            if c < 0 || c as u64 >= size as u64 {
                None
            } else {
                Some(flat + c as usize * stride)
            }
        })
        .ok_or_else(out_of_bounds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::SmallRng, SeedableRng};
    use std::collections::HashSet;

    fn pos<const N: usize>(components: [i64; N]) -> Position {
        Position::from(components)
    }

    #[test]
    fn test_new_level_is_empty() {
        let level = Level::cube(4, 3).unwrap();
        assert_eq!(level.shape(), &[4, 4, 4]);
        assert_eq!(level.ndim(), 3);
        assert_eq!(level.cell_count(), 64);
        assert_eq!(level.empty_count(), 64);
        assert!(level.empty_index_is_consistent());
    }

    #[test]
    fn test_default_level() {
        let level = Level::default();
        assert_eq!(level.shape(), &[9, 9]);
        assert_eq!(level.empty_count(), 81);
        assert_eq!(level, Level::cube(9, 2).unwrap());
    }

    #[test]
    fn test_equality_ignores_write_order() {
        let mut first = Level::cube(3, 2).unwrap();
        first.set(&pos([0, 0]), CellState::Wall).unwrap();
        first.set(&pos([2, 2]), CellState::Wall).unwrap();
        first.set(&pos([0, 0]), CellState::Empty).unwrap();

        let mut second = Level::cube(3, 2).unwrap();
        second.set(&pos([2, 2]), CellState::Wall).unwrap();

        assert_eq!(first.snapshot(), second.snapshot());
        assert_eq!(first, second);

        second.set(&pos([1, 1]), CellState::Fruit).unwrap();
        assert_ne!(first, second);
        let flat = Level::new(vec![1, 4], std::iter::empty()).unwrap();
        assert_ne!(Level::cube(2, 2).unwrap(), flat);
    }

    #[test]
    fn test_invalid_shapes() {
        assert_eq!(
            Level::cube(0, 2),
            Err(GameError::InvalidShape { shape: vec![0, 0] })
        );
        assert!(Level::new(vec![3, 0, 2], std::iter::empty()).is_err());
        assert!(Level::new(vec![], std::iter::empty()).is_err());
        assert!(Level::new(vec![usize::MAX, 3], std::iter::empty()).is_err());
    }

    #[test]
    fn test_walls_are_not_empty() {
        let level = Level::new(vec![3, 3], vec![pos([0, 0]), pos([2, 1])]).unwrap();
        assert_eq!(level.get(&pos([0, 0])), Ok(CellState::Wall));
        assert_eq!(level.get(&pos([2, 1])), Ok(CellState::Wall));
        assert_eq!(level.empty_count(), 7);
        assert!(!level.is_empty_at(&pos([2, 1])));
        assert!(level.empty_index_is_consistent());
    }

    #[test]
    fn test_wall_out_of_bounds_is_rejected() {
        let result = Level::new(vec![3, 3], vec![pos([3, 0])]);
        assert!(matches!(result, Err(GameError::OutOfBounds { .. })));
    }

    #[test]
    fn test_bounds_checking() {
        let level = Level::new(vec![2, 5], std::iter::empty()).unwrap();
        assert!(level.in_bounds(&pos([0, 0])));
        assert!(level.in_bounds(&pos([1, 4])));
        assert!(!level.in_bounds(&pos([-1, 0])));
        assert!(!level.in_bounds(&pos([2, 0])));
        assert!(!level.in_bounds(&pos([0, 5])));
        assert!(!level.in_bounds(&pos([0])));
        assert!(!level.in_bounds(&pos([0, 0, 0])));
    }

    #[test]
    fn test_bounds_unaffected_by_writes() {
        let mut level = Level::cube(3, 2).unwrap();
        let probes = [pos([0, 0]), pos([2, 2]), pos([3, 1]), pos([-1, 2])];
        let before: Vec<bool> = probes.iter().map(|p| level.in_bounds(p)).collect();

        level.set(&pos([1, 1]), CellState::Wall).unwrap();
        level.set(&pos([0, 2]), CellState::Fruit).unwrap();

        let after: Vec<bool> = probes.iter().map(|p| level.in_bounds(p)).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_get_set_out_of_bounds() {
        let mut level = Level::cube(3, 2).unwrap();
        assert!(matches!(
            level.get(&pos([3, 0])),
            Err(GameError::OutOfBounds { .. })
        ));
        assert!(matches!(
            level.set(&pos([0, -1]), CellState::Body),
            Err(GameError::OutOfBounds { .. })
        ));
        assert_eq!(level.empty_count(), 9);
        assert!(level.empty_index_is_consistent());
    }

    #[test]
    fn test_set_tracks_empty_cells() {
        let mut level = Level::cube(3, 2).unwrap();

        assert_eq!(level.set(&pos([1, 1]), CellState::Head), Ok(CellState::Empty));
        assert_eq!(level.empty_count(), 8);
        assert!(level.empty_index_is_consistent());

        // Non-empty to non-empty leaves the index alone
        assert_eq!(level.set(&pos([1, 1]), CellState::Body), Ok(CellState::Head));
        assert_eq!(level.empty_count(), 8);

        // Same-value writes are harmless
        level.set(&pos([1, 1]), CellState::Body).unwrap();
        level.set(&pos([0, 0]), CellState::Empty).unwrap();
        assert_eq!(level.empty_count(), 8);
        assert!(level.empty_index_is_consistent());

        level.set(&pos([1, 1]), CellState::Empty).unwrap();
        assert_eq!(level.empty_count(), 9);
        assert!(level.empty_index_is_consistent());
    }

    #[test]
    fn test_index_stays_exact_under_random_writes() {
        let mut rng = SmallRng::seed_from_u64(0x5EED);
        let mut level = Level::new(vec![4, 3, 5], std::iter::empty()).unwrap();

        for _ in 0..2_000 {
            let flat = rng.gen_range(0..level.cell_count());
            let target = level.unravel(flat);
            let value = CellState::ALL[rng.gen_range(0..CellState::NUM_STATES)];
            level.set(&target, value).unwrap();
            assert!(level.empty_index_is_consistent());
        }
    }

    #[test]
    fn test_flat_index_round_trip() {
        let level = Level::new(vec![2, 3, 4], std::iter::empty()).unwrap();
        assert_eq!(level.flat_index(&pos([0, 0, 1])), Ok(1));
        assert_eq!(level.flat_index(&pos([0, 1, 0])), Ok(4));
        assert_eq!(level.flat_index(&pos([1, 0, 0])), Ok(12));
        assert_eq!(level.unravel(23), pos([1, 2, 3]));
    }

    #[test]
    fn test_choose_random_empty() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut level = Level::cube(2, 2).unwrap();

        for p in [pos([0, 0]), pos([0, 1]), pos([1, 0])] {
            level.set(&p, CellState::Body).unwrap();
        }
        for _ in 0..20 {
            assert_eq!(level.choose_random_empty(&mut rng), Some(pos([1, 1])));
        }

        level.set(&pos([1, 1]), CellState::Fruit).unwrap();
        assert_eq!(level.choose_random_empty(&mut rng), None);
    }

    #[test]
    fn test_choose_random_empty_is_uniform() {
        let mut rng = SmallRng::seed_from_u64(0xD1CE);
        let mut level = Level::cube(10, 2).unwrap();
        let keep = [pos([0, 0]), pos([9, 9])];

        for flat in 0..level.cell_count() {
            let p = level.unravel(flat);
            if !keep.contains(&p) {
                level.set(&p, CellState::Body).unwrap();
            }
        }
        assert_eq!(level.empty_count(), 2);

        let trials = 10_000;
        let mut first = 0;
        for _ in 0..trials {
            match level.choose_random_empty(&mut rng) {
                Some(p) if p == keep[0] => first += 1,
                Some(p) => assert_eq!(p, keep[1]),
                None => panic!("level unexpectedly full"),
            }
        }
        // 5 standard deviations around 5000
        assert!((first as i64 - 5_000).abs() < 250, "first chosen {first} times");
    }

    #[test]
    fn test_empty_positions_and_occupied() {
        let mut level = Level::cube(2, 2).unwrap();
        level.set(&pos([0, 1]), CellState::Fruit).unwrap();
        level.set(&pos([1, 0]), CellState::Head).unwrap();

        let empty: HashSet<Position> = level.empty_positions().collect();
        assert_eq!(empty, HashSet::from([pos([0, 0]), pos([1, 1])]));

        assert_eq!(
            level.occupied(),
            vec![
                (pos([0, 1]), CellState::Fruit),
                (pos([1, 0]), CellState::Head)
            ]
        );
        assert_eq!(level.count(CellState::Fruit), 1);
    }

    #[test]
    fn test_from_cells() {
        let cells = vec![
            CellState::Wall,
            CellState::Empty,
            CellState::Fruit,
            CellState::Empty,
        ];
        let level = Level::from_cells(vec![2, 2], cells.clone()).unwrap();
        assert_eq!(level.cells(), cells.as_slice());
        assert_eq!(level.empty_count(), 2);
        assert!(level.empty_index_is_consistent());

        assert!(Level::from_cells(vec![3, 3], cells).is_err());
    }
}
