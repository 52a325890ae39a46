use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::*;

/// Cells highlighted while a chord is pending.
///
/// Purely visual: kept apart from [`Board`] and merged by whoever renders it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveOverlay {
    active: HashSet<CellId>,
}

impl ActiveOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overlay with `ids` marked active as well. Ids not on `board` are ignored.
    pub fn add_neighbors_active(&self, board: &Board, ids: &[CellId]) -> Self {
        let mut active = self.active.clone();
        active.extend(ids.iter().copied().filter(|&id| board.contains(id)));
        Self { active }
    }

    pub fn remove_all_active(&self) -> Self {
        Self::default()
    }

    pub fn is_active(&self, id: CellId) -> bool {
        self.active.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = CellId> + '_ {
        self.active.iter().copied()
    }
}
