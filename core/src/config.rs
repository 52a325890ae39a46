use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::*;

/// Highest accepted mine density, in percent.
pub const MAX_DIFFICULTY: u8 = 100;

/// Board dimensions and mine density for a new game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub rows: Coord,
    pub cols: Coord,
    /// Percentage of cells seeded as mines, `0..=100`.
    pub difficulty: u8,
}

impl BoardConfig {
    pub const fn new_unchecked(rows: Coord, cols: Coord, difficulty: u8) -> Self {
        Self {
            rows,
            cols,
            difficulty,
        }
    }

    pub fn new(rows: Coord, cols: Coord, difficulty: u8) -> Self {
        if difficulty > MAX_DIFFICULTY {
            log::warn!(
                "Difficulty {}% is out of range, clamped to {}%",
                difficulty,
                MAX_DIFFICULTY
            );
        }
        Self::new_unchecked(rows, cols, difficulty.min(MAX_DIFFICULTY))
    }

    pub const fn size(&self) -> Coord2 {
        (self.rows, self.cols)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.rows, self.cols)
    }

    /// `floor(rows * cols * difficulty / 100)`.
    pub fn target_mines(&self) -> CellCount {
        let difficulty = u32::from(self.difficulty.min(MAX_DIFFICULTY));
        let mines = u32::from(self.total_cells()) * difficulty / 100;
        // never exceeds total_cells, which is a CellCount
        mines as CellCount
    }
}

impl From<Level> for BoardConfig {
    fn from(level: Level) -> Self {
        level.config()
    }
}

/// Preset games offered by the level selector.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Level {
    #[default]
    Easy,
    Moderate,
    Hard,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::Easy, Level::Moderate, Level::Hard];

    pub const fn config(self) -> BoardConfig {
        match self {
            Self::Easy => BoardConfig::new_unchecked(10, 10, 5),
            Self::Moderate => BoardConfig::new_unchecked(15, 15, 10),
            Self::Hard => BoardConfig::new_unchecked(20, 20, 25),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Easy => "EASY",
            Self::Moderate => "MODERATE",
            Self::Hard => "HARD",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Level {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|level| level.name().eq_ignore_ascii_case(s.trim()))
            .ok_or(GameError::UnknownLevel)
    }
}
