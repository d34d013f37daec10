use alloc::vec::Vec;
use ndarray::Array2;

use super::*;

/// Uniform placement: every tile is equally likely to hold a mine and no tile gets two.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMinefieldGenerator {
    seed: u64,
}

impl RandomMinefieldGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MinefieldGenerator for RandomMinefieldGenerator {
    fn generate(self, config: BoardConfig) -> Minefield {
        use rand::{Rng, SeedableRng, rngs::SmallRng};

        let size = usize::from(config.size);
        let total_tiles = usize::from(config.total_tiles());
        let mut mines_wanted = usize::from(config.mines);

        if mines_wanted > total_tiles {
            log::warn!(
                "Minefield already full, requested {} mines but only {} tiles fit",
                mines_wanted,
                total_tiles
            );
            mines_wanted = total_tiles;
        }

        // partial Fisher-Yates: the first `mines_wanted` slots end up as a uniform sample without repeats
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut tiles: Vec<usize> = (0..total_tiles).collect();
        for i in 0..mines_wanted {
            let pick = rng.random_range(i..total_tiles);
            tiles.swap(i, pick);
        }

        let mut mines: Array2<bool> = Array2::default((config.size, config.size).to_nd_index());
        for &index in &tiles[..mines_wanted] {
            mines[[index / size, index % size]] = true;
        }

        let field = Minefield::counted(mines);
        if field.mine_count() != config.mines {
            log::warn!(
                "Generated minefield count mismatch, actual: {}, requested: {}",
                field.mine_count(),
                config.mines
            );
        }
        log::debug!(
            "Generated {0}x{0} minefield with {1} mines (seed {2})",
            config.size,
            field.mine_count(),
            self.seed
        );
        field
    }
}
