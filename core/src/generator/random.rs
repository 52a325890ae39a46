use ndarray::Array2;
use rand::prelude::*;
use rand::rngs::SmallRng;

use super::*;

/// Purely random placement of `floor(rows * cols * difficulty / 100)` mines,
/// reproducible from its seed.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomBoardGenerator {
    seed: u64,
}

impl RandomBoardGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Generator seeded from the thread-local entropy source.
    #[cfg(feature = "std")]
    pub fn from_entropy() -> Self {
        Self::new(rand::rng().random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(self, config: BoardConfig) -> Board {
        let mut rng = SmallRng::seed_from_u64(self.seed);
        Board::from_checked_mask(&place_mines(config, &mut rng))
    }
}

/// Seeds mines into an empty `rows x cols` mask.
///
/// Draws a uniformly random cell index and keeps it only when that cell holds
/// no mine yet, until the target count is reached.
pub fn place_mines<R: Rng + ?Sized>(config: BoardConfig, rng: &mut R) -> Array2<bool> {
    let total_cells = usize::from(config.total_cells());
    let target = config.target_mines();

    // optimize for full boards
    if usize::from(target) >= total_cells {
        return Array2::from_elem(config.size().to_nd_index(), true);
    }

    let mut mines: Array2<bool> = Array2::default(config.size().to_nd_index());
    let mut remaining = target;
    let mut draws: u32 = 0;
    {
        let Some(cells) = mines.as_slice_mut() else {
            log::warn!("Mine mask is not in standard layout, generated an empty board");
            return mines;
        };
        while remaining > 0 {
            let place = rng.random_range(0..total_cells);
            draws = draws.saturating_add(1);
            if cells[place] {
                continue;
            }
            cells[place] = true;
            remaining -= 1;
        }
    }
    log::trace!("Placed {} mines in {} draws", target, draws);

    // double check mine count
    let count = mines.iter().filter(|&&is_mine| is_mine).count();
    if count != usize::from(target) {
        log::warn!(
            "Generated board mine count mismatch, actual: {}, requested: {}",
            count,
            target
        );
    }
    mines
}
