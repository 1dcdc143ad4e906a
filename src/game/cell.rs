use serde::{Deserialize, Serialize};
use thiserror::Error;

/// State of a single level cell
///
/// Serialized as its numeric code so a full level snapshot is a flat list of
/// small integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum CellState {
    #[default]
    Empty,
    Head,
    Body,
    Fruit,
    Wall,
}

impl CellState {
    /// Number of distinct cell states
    pub const NUM_STATES: usize = 5;

    pub const ALL: [CellState; Self::NUM_STATES] = [
        CellState::Empty,
        CellState::Head,
        CellState::Body,
        CellState::Fruit,
        CellState::Wall,
    ];

    /// Stable numeric code (0 = empty .. 4 = wall)
    pub fn code(self) -> u8 {
        match self {
            CellState::Empty => 0,
            CellState::Head => 1,
            CellState::Body => 2,
            CellState::Fruit => 3,
            CellState::Wall => 4,
        }
    }

    /// True for cells occupied by the snake
    pub fn is_snake(self) -> bool {
        matches!(self, CellState::Head | CellState::Body)
    }

    pub fn is_empty(self) -> bool {
        self == CellState::Empty
    }
}

impl From<CellState> for u8 {
    fn from(cell: CellState) -> Self {
        cell.code()
    }
}

/// Returned when a numeric code has no matching [`CellState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unknown cell code {0}")]
pub struct UnknownCellCode(pub u8);

impl TryFrom<u8> for CellState {
    type Error = UnknownCellCode;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        CellState::ALL
            .get(code as usize)
            .copied()
            .ok_or(UnknownCellCode(code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_stable() {
        for (i, cell) in CellState::ALL.iter().enumerate() {
            assert_eq!(cell.code() as usize, i);
            assert_eq!(CellState::try_from(i as u8), Ok(*cell));
        }
        assert_eq!(CellState::try_from(5), Err(UnknownCellCode(5)));
        assert_eq!(UnknownCellCode(7).to_string(), "unknown cell code 7");
    }

    #[test]
    fn test_serializes_as_code() {
        let json = serde_json::to_string(&vec![CellState::Empty, CellState::Fruit]).unwrap();
        assert_eq!(json, "[0,3]");

        let cells: Vec<CellState> = serde_json::from_str("[1,2,4]").unwrap();
        assert_eq!(cells, vec![CellState::Head, CellState::Body, CellState::Wall]);

        assert!(serde_json::from_str::<CellState>("9").is_err());
    }

    #[test]
    fn test_snake_cells() {
        assert!(CellState::Head.is_snake());
        assert!(CellState::Body.is_snake());
        assert!(!CellState::Fruit.is_snake());
        assert!(!CellState::Empty.is_snake());
    }
}
