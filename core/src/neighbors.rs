use ndarray::Array2;
use smallvec::SmallVec;

use crate::*;

/// Up to eight neighbor ids, stored inline.
pub type NeighborIds = SmallVec<[CellId; 8]>;

/// Row-major offsets `(d_row, d_col)`, skipping the center.
const DISPLACEMENTS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Ids of the grid-adjacent positions of `id` on a board of `size`.
///
/// Order is row-major by row offset then column offset. A 1x1 board yields no
/// neighbors.
pub fn neighbor_ids(id: CellId, size: Coord2) -> NeighborIds {
    NeighborIter::new(id.coords(), size).map(CellId::from).collect()
}

pub trait NeighborIterExt {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter {
        let (rows, cols) = self.dim();
        let size = (
            rows.try_into().unwrap_or(Coord::MAX),
            cols.try_into().unwrap_or(Coord::MAX),
        );
        NeighborIter::new(index, size)
    }
}

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Coord2, delta: (i8, i8), bounds: Coord2) -> Option<Coord2> {
    let (row, col) = coords;
    let (d_row, d_col) = delta;
    let (rows, cols) = bounds;

    let next_row = row.checked_add_signed(d_row)?;
    if next_row >= rows {
        return None;
    }

    let next_col = col.checked_add_signed(d_col)?;
    if next_col >= cols {
        return None;
    }

    Some((next_row, next_col))
}

#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    index: u8,
}

impl NeighborIter {
    pub fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let delta = *DISPLACEMENTS.get(usize::from(self.index))?;
            self.index += 1;

            if let Some(next_item) = apply_delta(self.center, delta, self.bounds) {
                return Some(next_item);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::{String, ToString};
    use alloc::vec::Vec;

    use super::*;

    fn ids(id: &str, size: Coord2) -> Vec<String> {
        neighbor_ids(id.parse().unwrap(), size)
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn center_of_three_by_three_has_all_others() {
        assert_eq!(
            ids("1,1", (3, 3)),
            ["0,0", "0,1", "0,2", "1,0", "1,2", "2,0", "2,1", "2,2"]
        );
    }

    #[test]
    fn side_cell_has_five_neighbors() {
        assert_eq!(ids("1,0", (3, 3)), ["0,0", "0,1", "1,1", "2,0", "2,1"]);
    }

    #[test]
    fn corner_cells_have_three_neighbors() {
        assert_eq!(ids("0,0", (3, 3)), ["0,1", "1,0", "1,1"]);
        assert_eq!(ids("0,2", (3, 3)), ["0,1", "1,1", "1,2"]);
        assert_eq!(ids("2,0", (3, 3)), ["1,0", "1,1", "2,1"]);
        assert_eq!(ids("2,2", (3, 3)), ["1,1", "1,2", "2,1"]);
    }

    #[test]
    fn single_cell_board_has_no_neighbors() {
        assert!(ids("0,0", (1, 1)).is_empty());
    }

    #[test]
    fn wide_board_neighbor_counts() {
        let size = (2, 5);
        assert_eq!(neighbor_ids(CellId::new(0, 0), size).len(), 3);
        assert_eq!(neighbor_ids(CellId::new(0, 2), size).len(), 5);
        assert_eq!(neighbor_ids(CellId::new(1, 4), size).len(), 3);
    }

    #[test]
    fn array_extension_uses_array_bounds() {
        let grid: Array2<bool> = Array2::default([4, 2]);
        let found: Vec<_> = grid.iter_neighbors((3, 1)).collect();
        assert_eq!(found, [(2, 0), (2, 1), (3, 0)]);
    }
}
