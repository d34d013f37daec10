use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::GameError;

/// Single coordinate axis, also used for the board's side length.
pub type Coord = u8;

/// Count type used for mine counts and total-tile counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(x, y)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

/// Number of tiles on a square board of side `size`.
pub const fn square(size: Coord) -> CellCount {
    let size = size as CellCount;
    size.saturating_mul(size)
}

/// Identifies a tile on the board, textual form is `"x-y"`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileId(pub Coord2);

impl TileId {
    pub const fn new(x: Coord, y: Coord) -> Self {
        Self((x, y))
    }

    pub const fn coords(self) -> Coord2 {
        self.0
    }
}

impl From<Coord2> for TileId {
    fn from(coords: Coord2) -> Self {
        Self(coords)
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.0.0, self.0.1)
    }
}

impl FromStr for TileId {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = s.split_once('-').ok_or(GameError::InvalidTileId)?;
        let x = x.parse().map_err(|_| GameError::InvalidTileId)?;
        let y = y.parse().map_err(|_| GameError::InvalidTileId)?;
        Ok(Self((x, y)))
    }
}

/// Offsets of the Moore neighborhood, row by row.
const MOORE_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Iterates the in-bounds neighbors of `center` on a square board, edges are clipped and never wrapped.
#[derive(Clone, Debug)]
pub struct Neighbors {
    center: Coord2,
    size: Coord,
    next: usize,
}

impl Neighbors {
    pub fn new(center: Coord2, size: Coord) -> Self {
        Self {
            center,
            size,
            next: 0,
        }
    }

    fn offset(&self, (dx, dy): (i8, i8)) -> Option<Coord2> {
        let x = self.center.0.checked_add_signed(dx)?;
        let y = self.center.1.checked_add_signed(dy)?;
        (x < self.size && y < self.size).then_some((x, y))
    }
}

impl Iterator for Neighbors {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(&delta) = MOORE_OFFSETS.get(self.next) {
            self.next += 1;
            if let Some(coords) = self.offset(delta) {
                return Some(coords);
            }
        }
        None
    }
}
