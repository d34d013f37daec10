#![no_std]

extern crate alloc;

use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use error::*;
pub use generator::*;
pub use session::*;
pub use status::*;
pub use tile::*;
pub use types::*;

mod board;
mod error;
mod generator;
mod session;
mod status;
mod tile;
mod types;

/// Shape of a game: side length of the square board and how many mines it holds.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub size: Coord,
    pub mines: CellCount,
}

impl BoardConfig {
    pub const fn new_unchecked(size: Coord, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// Validates that the board has tiles, at least one mine and at least one safe tile.
    pub fn new(size: Coord, mines: CellCount) -> Result<Self> {
        if size == 0 {
            return Err(GameError::EmptyBoard);
        }
        if mines == 0 {
            return Err(GameError::NoMines);
        }
        if mines >= square(size) {
            return Err(GameError::TooManyMines);
        }
        Ok(Self::new_unchecked(size, mines))
    }

    pub const fn total_tiles(&self) -> CellCount {
        square(self.size)
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::new_unchecked(10, 10)
    }
}

/// Side length of a grid that is square and fits in a `Coord`.
pub(crate) fn square_side<T>(grid: &Array2<T>) -> Result<Coord> {
    let (rows, cols) = grid.dim();
    if rows != cols {
        return Err(GameError::InvalidBoardShape);
    }
    rows.try_into().map_err(|_| GameError::InvalidBoardShape)
}

/// Immutable mine layout a board is built from, always square.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MinefieldSnapshot")]
pub struct Minefield {
    mines: Array2<bool>,
    count: CellCount,
}

#[derive(Deserialize)]
struct MinefieldSnapshot {
    mines: Array2<bool>,
    count: CellCount,
}

impl TryFrom<MinefieldSnapshot> for Minefield {
    type Error = GameError;

    fn try_from(snapshot: MinefieldSnapshot) -> Result<Self> {
        let field = Self::from_mine_mask(snapshot.mines)?;
        if field.count != snapshot.count {
            return Err(GameError::InvalidBoardShape);
        }
        Ok(field)
    }
}

impl Minefield {
    pub fn from_mine_mask(mines: Array2<bool>) -> Result<Self> {
        square_side(&mines)?;
        Ok(Self::counted(mines))
    }

    /// Callers guarantee the mask is square.
    pub(crate) fn counted(mines: Array2<bool>) -> Self {
        let count = mines.iter().filter(|&&is_mine| is_mine).count() as CellCount;
        Self { mines, count }
    }

    pub fn from_mine_coords(size: Coord, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mines: Array2<bool> = Array2::default((size, size).to_nd_index());

        for &coords in mine_coords {
            if coords.0 >= size || coords.1 >= size {
                return Err(GameError::InvalidCoords);
            }
            mines[coords.to_nd_index()] = true;
        }

        Ok(Self::counted(mines))
    }

    pub fn size(&self) -> Coord {
        self.mines.nrows() as Coord
    }

    pub fn mine_count(&self) -> CellCount {
        self.count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords]
    }
}

impl Index<Coord2> for Minefield {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mines[coords.to_nd_index()]
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_rejects_impossible_boards() {
        assert_eq!(BoardConfig::new(0, 1), Err(GameError::EmptyBoard));
        assert_eq!(BoardConfig::new(3, 0), Err(GameError::NoMines));
        assert_eq!(BoardConfig::new(3, 9), Err(GameError::TooManyMines));
        assert_eq!(BoardConfig::new(1, 1), Err(GameError::TooManyMines));
    }

    #[test]
    fn config_accepts_all_but_one_mine() {
        let config = BoardConfig::new(3, 8).unwrap();
        assert_eq!(config.total_tiles(), 9);
    }

    #[test]
    fn largest_board_does_not_overflow() {
        let config = BoardConfig::new(Coord::MAX, 1000).unwrap();
        assert_eq!(config.total_tiles(), 65025);
    }

    #[test]
    fn minefield_from_coords_counts_distinct_mines() {
        let field = Minefield::from_mine_coords(3, &[(0, 0), (2, 1), (0, 0)]).unwrap();
        assert_eq!(field.mine_count(), 2);
        assert_eq!(field.size(), 3);
        assert!(field.contains_mine((2, 1)));
        assert!(!field.contains_mine((1, 2)));
    }

    #[test]
    fn minefield_mask_must_be_square() {
        let mask: Array2<bool> = Array2::default([2, 3]);
        assert_eq!(Minefield::from_mine_mask(mask), Err(GameError::InvalidBoardShape));

        let mask: Array2<bool> = Array2::default([256, 256]);
        assert_eq!(Minefield::from_mine_mask(mask), Err(GameError::InvalidBoardShape));
    }

    #[test]
    fn deserialized_minefield_is_checked() {
        let mask: Array2<bool> = Array2::default([2, 3]);
        let json = serde_json::json!({ "mines": mask, "count": 0 });
        assert!(serde_json::from_value::<Minefield>(json).is_err());

        let field = Minefield::from_mine_coords(3, &[(1, 1)]).unwrap();
        let mut json = serde_json::to_value(&field).unwrap();
        json["count"] = serde_json::json!(4);
        assert!(serde_json::from_value::<Minefield>(json).is_err());

        let json = serde_json::to_value(&field).unwrap();
        assert_eq!(serde_json::from_value::<Minefield>(json).unwrap(), field);
    }

    #[test]
    fn minefield_rejects_out_of_grid_mines() {
        assert_eq!(
            Minefield::from_mine_coords(3, &[(3, 0)]),
            Err(GameError::InvalidCoords)
        );
    }
}
