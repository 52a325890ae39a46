use serde::{Deserialize, Serialize};

use crate::*;

/// Value reported by [`Cell::live_neighbors`] for mine cells.
pub const MINE_SENTINEL: u8 = 9;

/// Gameplay state of one grid position.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    id: CellId,
    live_neighbors: u8,
    is_mine: bool,
    is_flagged: bool,
    is_exploded: bool,
    is_shown: bool,
}

impl Cell {
    const fn hidden(id: CellId) -> Self {
        Self {
            id,
            live_neighbors: 0,
            is_mine: false,
            is_flagged: false,
            is_exploded: false,
            is_shown: false,
        }
    }

    pub(crate) const fn mine(id: CellId) -> Self {
        Self {
            live_neighbors: MINE_SENTINEL,
            is_mine: true,
            ..Self::hidden(id)
        }
    }

    pub(crate) const fn safe(id: CellId, live_neighbors: u8) -> Self {
        Self {
            live_neighbors,
            ..Self::hidden(id)
        }
    }

    pub const fn id(&self) -> CellId {
        self.id
    }

    pub const fn row(&self) -> Coord {
        self.id.row
    }

    pub const fn col(&self) -> Coord {
        self.id.col
    }

    /// Mines among the eight neighbors, or [`MINE_SENTINEL`] for a mine.
    pub const fn live_neighbors(&self) -> u8 {
        self.live_neighbors
    }

    pub const fn is_mine(&self) -> bool {
        self.is_mine
    }

    pub const fn is_flagged(&self) -> bool {
        self.is_flagged
    }

    pub const fn is_exploded(&self) -> bool {
        self.is_exploded
    }

    pub const fn is_shown(&self) -> bool {
        self.is_shown
    }

    /// Hidden and not flagged, i.e. a candidate for automatic reveal.
    pub const fn is_open_to_reveal(&self) -> bool {
        !self.is_shown && !self.is_flagged
    }

    pub(crate) fn show(&mut self) {
        self.is_shown = true;
    }

    pub(crate) fn explode(&mut self) {
        if self.is_mine {
            self.is_exploded = true;
            self.is_flagged = false;
        }
    }

    pub(crate) fn set_flagged(&mut self, flagged: bool) {
        self.is_flagged = flagged;
    }
}
