use serde::{Deserialize, Serialize};

use crate::*;

/// Player-visible state of a tile.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileStatus {
    Hidden,
    /// Opened safe tile, its value holds the adjacent mine count
    Number,
    /// Opened mine
    Mine,
    Marked,
}

impl TileStatus {
    /// Whether the player has opened the tile; opened tiles never change again.
    pub const fn is_revealed(self) -> bool {
        matches!(self, Self::Number | Self::Mine)
    }

    pub const fn name(self) -> &'static str {
        use TileStatus::*;
        match self {
            Hidden => "hidden",
            Number => "number",
            Mine => "mine",
            Marked => "marked",
        }
    }
}

impl Default for TileStatus {
    fn default() -> Self {
        Self::Hidden
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    coords: Coord2,
    is_mine: bool,
    status: TileStatus,
    value: u8,
}

impl Tile {
    pub const fn new(coords: Coord2, is_mine: bool) -> Self {
        Self {
            coords,
            is_mine,
            status: TileStatus::Hidden,
            value: 0,
        }
    }

    pub const fn coords(&self) -> Coord2 {
        self.coords
    }

    pub const fn id(&self) -> TileId {
        TileId(self.coords)
    }

    pub const fn is_mine(&self) -> bool {
        self.is_mine
    }

    pub const fn status(&self) -> TileStatus {
        self.status
    }

    /// Adjacent mine count, only meaningful once the status is `Number`
    pub const fn value(&self) -> u8 {
        self.value
    }

    pub(crate) fn set_value(&mut self, value: u8) {
        self.value = value;
    }

    /// Opens a hidden tile, returns whether anything changed.
    pub fn reveal(&mut self) -> bool {
        if self.status != TileStatus::Hidden {
            return false;
        }
        self.status = if self.is_mine {
            TileStatus::Mine
        } else {
            TileStatus::Number
        };
        true
    }

    /// Toggles the mark on a tile that has not been opened, returns whether anything changed.
    pub fn mark(&mut self) -> bool {
        use TileStatus::*;
        self.status = match self.status {
            Hidden => Marked,
            Marked => Hidden,
            Number | Mine => return false,
        };
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reveal_safe_tile_becomes_number() {
        let mut tile = Tile::new((1, 2), false);
        assert!(tile.reveal());
        assert_eq!(tile.status(), TileStatus::Number);
    }

    #[test]
    fn reveal_mine_tile_becomes_mine() {
        let mut tile = Tile::new((0, 0), true);
        assert!(tile.reveal());
        assert_eq!(tile.status(), TileStatus::Mine);
    }

    #[test]
    fn reveal_is_idempotent() {
        let mut tile = Tile::new((0, 0), false);
        tile.reveal();
        let once = tile;
        assert!(!tile.reveal());
        assert_eq!(tile, once);
    }

    #[test]
    fn marked_tile_is_not_revealed() {
        let mut tile = Tile::new((0, 0), true);
        assert!(tile.mark());
        assert!(!tile.reveal());
        assert_eq!(tile.status(), TileStatus::Marked);
    }

    #[test]
    fn mark_toggles() {
        let mut tile = Tile::new((0, 0), false);
        tile.mark();
        assert_eq!(tile.status(), TileStatus::Marked);
        tile.mark();
        assert_eq!(tile.status(), TileStatus::Hidden);
    }

    #[test]
    fn opened_tiles_cannot_be_marked() {
        let mut safe = Tile::new((0, 0), false);
        let mut mine = Tile::new((0, 1), true);
        safe.reveal();
        mine.reveal();
        assert!(!safe.mark());
        assert!(!mine.mark());
        assert_eq!(safe.status(), TileStatus::Number);
        assert_eq!(mine.status(), TileStatus::Mine);
    }
}
