use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - InProgress -> Won
/// - InProgress -> Lost
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    InProgress,
    /// Every safe tile was opened
    Won,
    /// A mine was opened
    Lost,
}

impl GameState {
    /// Indicates the game has ended and no moves can be made anymore
    pub const fn is_final(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }

    pub const fn name(self) -> &'static str {
        use GameState::*;
        match self {
            InProgress => "in-progress",
            Won => "won",
            Lost => "lost",
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::InProgress
    }
}

/// The grid of tiles for one game, indexed `[x][y]`, always square.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BoardSnapshot")]
pub struct Board {
    tiles: Array2<Tile>,
    mine_count: CellCount,
    state: GameState,
}

#[derive(Deserialize)]
struct BoardSnapshot {
    tiles: Array2<Tile>,
    mine_count: CellCount,
    state: GameState,
}

impl TryFrom<BoardSnapshot> for Board {
    type Error = GameError;

    /// Every tile must sit at its own coordinates and the mine count must match the tiles.
    fn try_from(snapshot: BoardSnapshot) -> Result<Self> {
        let BoardSnapshot {
            tiles,
            mine_count,
            state,
        } = snapshot;
        square_side(&tiles)?;

        let misplaced = tiles
            .indexed_iter()
            .any(|((x, y), tile)| tile.coords().to_nd_index() != [x, y]);
        let mines = tiles.iter().filter(|tile| tile.is_mine()).count();
        if misplaced || mines != usize::from(mine_count) {
            return Err(GameError::InvalidBoardShape);
        }

        Ok(Self {
            tiles,
            mine_count,
            state,
        })
    }
}

impl Board {
    pub fn new(minefield: Minefield) -> Self {
        let size = minefield.size();
        // the minefield is square with a side that fits in a Coord
        let tiles = Array2::from_shape_fn((size, size).to_nd_index(), |(x, y)| {
            let coords = (x as Coord, y as Coord);
            Tile::new(coords, minefield.contains_mine(coords))
        });
        Self {
            tiles,
            mine_count: minefield.mine_count(),
            state: Default::default(),
        }
    }

    /// Lays out `config.mines` mines uniformly at random and builds the tiles.
    pub fn generate(config: BoardConfig, seed: u64) -> Self {
        Self::new(RandomMinefieldGenerator::new(seed).generate(config))
    }

    pub fn from_mine_coords(size: Coord, mine_coords: &[Coord2]) -> Result<Self> {
        Minefield::from_mine_coords(size, mine_coords).map(Self::new)
    }

    /// Side length, construction and deserialization keep it within `Coord`
    pub fn size(&self) -> Coord {
        self.tiles.nrows() as Coord
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn config(&self) -> BoardConfig {
        BoardConfig::new_unchecked(self.size(), self.mine_count)
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_final(&self) -> bool {
        self.state.is_final()
    }

    pub fn tile(&self, coords: Coord2) -> Option<&Tile> {
        self.tiles.get(coords.to_nd_index())
    }

    fn tile_mut(&mut self, coords: Coord2) -> Option<&mut Tile> {
        self.tiles.get_mut(coords.to_nd_index())
    }

    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    pub fn neighbors(&self, coords: Coord2) -> Neighbors {
        Neighbors::new(coords, self.size())
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        let count = self
            .neighbors(coords)
            .filter(|&pos| self.tiles[pos.to_nd_index()].is_mine())
            .count();
        count as u8
    }

    pub fn marked_count(&self) -> CellCount {
        let count = self
            .tiles
            .iter()
            .filter(|tile| tile.status() == TileStatus::Marked)
            .count();
        count as CellCount
    }

    /// How many mines have not been marked yet, negative when over-marked
    pub fn mines_left(&self) -> isize {
        (self.mine_count as isize) - (self.marked_count() as isize)
    }

    fn check_not_final(&self) -> Result<()> {
        if self.state.is_final() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }

    /// Opens a hidden tile, flood-filling through tiles with no adjacent mines.
    ///
    /// Coordinates outside the grid and tiles that are not hidden are left alone.
    pub fn reveal_tile(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        self.check_not_final()?;

        let Some(tile) = self.tile_mut(coords) else {
            log::debug!("Ignoring reveal outside the board at {:?}", coords);
            return Ok(RevealOutcome::NoChange);
        };
        if !tile.reveal() {
            return Ok(RevealOutcome::NoChange);
        }
        if tile.status() == TileStatus::Mine {
            log::debug!("Revealed mine at {:?}", coords);
            return Ok(RevealOutcome::HitMine);
        }

        let mut to_visit = Vec::from([coords]);
        while let Some(visit_coords) = to_visit.pop() {
            let count = self.adjacent_mine_count(visit_coords);
            self.tiles[visit_coords.to_nd_index()].set_value(count);
            log::trace!("Opened tile at {:?}, mine count: {}", visit_coords, count);

            if count > 0 {
                continue;
            }

            // no adjacent mines, so every hidden neighbor is safe to open
            for pos in self.neighbors(visit_coords) {
                if self.tiles[pos.to_nd_index()].reveal() {
                    to_visit.push(pos);
                }
            }
        }

        log::debug!("Revealed tile at {:?}", coords);
        Ok(RevealOutcome::Revealed)
    }

    /// Toggles the mark on a tile, coordinates outside the grid are left alone.
    pub fn mark(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        self.check_not_final()?;

        let Some(tile) = self.tile_mut(coords) else {
            log::debug!("Ignoring mark outside the board at {:?}", coords);
            return Ok(MarkOutcome::NoChange);
        };
        Ok(if tile.mark() {
            MarkOutcome::Changed
        } else {
            MarkOutcome::NoChange
        })
    }

    /// All safe tiles are open and no mine is.
    pub fn check_win(&self) -> bool {
        self.tiles.iter().all(|tile| match tile.status() {
            TileStatus::Number => true,
            TileStatus::Hidden | TileStatus::Marked => tile.is_mine(),
            TileStatus::Mine => false,
        })
    }

    pub fn check_lose(&self) -> bool {
        self.tiles
            .iter()
            .any(|tile| tile.status() == TileStatus::Mine)
    }

    /// Moves the game into its terminal state when won or lost, opening every mine on a loss.
    pub fn check_game_end(&mut self) -> GameState {
        if self.state.is_final() {
            return self.state;
        }

        if self.check_lose() {
            self.state = GameState::Lost;
            self.reveal_mines();
            log::debug!("Game lost");
        } else if self.check_win() {
            self.state = GameState::Won;
            log::debug!("Game won");
        }
        self.state
    }

    /// Clears every mark and opens every mine.
    pub fn reveal_mines(&mut self) {
        for tile in self.tiles.iter_mut() {
            if tile.status() == TileStatus::Marked {
                tile.mark();
            }
            if tile.is_mine() {
                tile.reveal();
            }
        }
    }
}
