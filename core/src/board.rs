use alloc::vec;
use core::ops::Index;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Every cell of one game, one per `(row, col)`, iterated in row-major order.
///
/// Operations never mutate the receiver: each one returns the next board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<Cell>,
}

impl Board {
    /// Builds a board from a mine mask indexed `[row, col]`, deriving every
    /// neighbor count.
    pub fn from_mine_mask(mine_mask: Array2<bool>) -> Result<Self> {
        let (rows, cols) = mine_mask.dim();
        if rows > usize::from(Coord::MAX) || cols > usize::from(Coord::MAX) {
            return Err(GameError::InvalidCoords);
        }
        Ok(Self::from_checked_mask(&mine_mask))
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[CellId]) -> Result<Self> {
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &id in mine_coords {
            if !id.is_within(size) {
                return Err(GameError::InvalidCoords);
            }
            mine_mask[id.to_nd_index()] = true;
        }

        Ok(Self::from_checked_mask(&mine_mask))
    }

    /// Random board for `config`, seeded from entropy.
    #[cfg(feature = "std")]
    pub fn setup(config: BoardConfig) -> Self {
        RandomBoardGenerator::from_entropy().generate(config)
    }

    /// `mine_mask` dimensions must fit in [`Coord`].
    pub(crate) fn from_checked_mask(mine_mask: &Array2<bool>) -> Self {
        let cells = Array2::from_shape_fn(mine_mask.dim(), |(row, col)| {
            let id = CellId::new(row as Coord, col as Coord);
            if mine_mask[(row, col)] {
                Cell::mine(id)
            } else {
                let adjacent = mine_mask
                    .iter_neighbors(id.coords())
                    .filter(|&pos| mine_mask[pos.to_nd_index()])
                    .count();
                Cell::safe(id, adjacent as u8)
            }
        });
        Self { cells }
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.cells.dim();
        (rows as Coord, cols as Coord)
    }

    pub fn rows(&self) -> Coord {
        self.size().0
    }

    pub fn cols(&self) -> Coord {
        self.size().1
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = CellId> + '_ {
        self.iter().map(Cell::id)
    }

    pub fn contains(&self, id: CellId) -> bool {
        id.is_within(self.size())
    }

    pub fn get(&self, id: CellId) -> Option<&Cell> {
        self.cells.get(id.to_nd_index())
    }

    /// Like [`Board::get`], but a miss is an error: the caller and the board
    /// disagree about which cells exist.
    pub fn cell(&self, id: CellId) -> Result<&Cell> {
        self.get(id).ok_or(GameError::UnknownCell(id))
    }

    pub fn neighbor_ids(&self, id: CellId) -> NeighborIds {
        neighbor_ids(id, self.size())
    }

    pub fn mine_count(&self) -> CellCount {
        self.count_where(Cell::is_mine)
    }

    pub fn shown_count(&self) -> CellCount {
        self.count_where(Cell::is_shown)
    }

    pub fn flag_count(&self) -> CellCount {
        self.count_where(Cell::is_flagged)
    }

    fn count_where(&self, predicate: impl Fn(&Cell) -> bool) -> CellCount {
        let count = self.iter().filter(|cell| predicate(*cell)).count();
        // a board never holds more than Coord::MAX^2 cells
        count as CellCount
    }

    /// Reveals `id`: a mine explodes the board, anything else flood fills.
    ///
    /// The returned outcome tags what happened; `has_exploded_mine` on the new
    /// board gives the same loss signal.
    pub fn reveal(&self, id: CellId) -> Result<(Board, RevealOutcome)> {
        self.cell(id)?;
        let mut board = self.clone();
        let outcome = board.reveal_in_place(id);
        Ok((board, outcome))
    }

    pub fn visit_cell(&self, id: CellId) -> Result<Board> {
        self.reveal(id).map(|(board, _)| board)
    }

    /// Detonation: every mine is exploded and unflagged, other cells are kept.
    pub fn exploded(&self) -> Board {
        let mut board = self.clone();
        board.explode_in_place();
        board
    }

    /// Shows `id` and, while the shown cells have no adjacent mines, every
    /// hidden unflagged neighbor, transitively.
    pub fn flood_fill(&self, id: CellId) -> Result<Board> {
        self.cell(id)?;
        let mut board = self.clone();
        board.flood_in_place(id);
        Ok(board)
    }

    /// Reveals every listed cell that is still hidden and unflagged at the time
    /// it comes up, each seeing the board left by the previous one.
    ///
    /// No flag-count gate is applied here. Ids not on the board are skipped.
    pub fn reveal_all(&self, ids: &[CellId]) -> (Board, RevealOutcome) {
        let mut board = self.clone();
        let mut outcome = RevealOutcome::NoChange;
        for &id in ids {
            if board.get(id).is_some_and(Cell::is_open_to_reveal) {
                outcome = outcome | board.reveal_in_place(id);
            }
        }
        (board, outcome)
    }

    pub fn visit_all_cells(&self, ids: &[CellId]) -> Board {
        self.reveal_all(ids).0
    }

    /// Toggles the flag on a hidden cell; shown or unknown cells are left as is.
    pub fn mark(&self, id: CellId) -> (Board, MarkOutcome) {
        let mut board = self.clone();
        let outcome = match board.cells.get_mut(id.to_nd_index()) {
            Some(cell) if !cell.is_shown() => {
                cell.set_flagged(!cell.is_flagged());
                MarkOutcome::Changed
            }
            _ => MarkOutcome::NoChange,
        };
        (board, outcome)
    }

    pub fn toggle_flag(&self, id: CellId) -> Board {
        self.mark(id).0
    }

    /// Number of the given cells currently flagged. Unknown ids count as unflagged.
    pub fn neighbor_flag_count(&self, ids: &[CellId]) -> CellCount {
        let count = ids
            .iter()
            .filter(|&&id| self.get(id).is_some_and(Cell::is_flagged))
            .count();
        count as CellCount
    }

    /// Whether the only hidden cells left are mines. Trivially true when
    /// nothing is hidden.
    pub fn all_hidden_are_mines(&self) -> bool {
        self.iter()
            .filter(|cell| !cell.is_shown())
            .all(Cell::is_mine)
    }

    pub fn has_exploded_mine(&self) -> bool {
        self.iter().any(Cell::is_exploded)
    }

    fn reveal_in_place(&mut self, id: CellId) -> RevealOutcome {
        if self[id].is_mine() {
            log::debug!("Mine at {} detonated", id);
            self.explode_in_place();
            RevealOutcome::Detonated
        } else if self.flood_in_place(id) > 0 {
            RevealOutcome::Revealed
        } else {
            RevealOutcome::NoChange
        }
    }

    fn explode_in_place(&mut self) {
        self.cells.map_inplace(Cell::explode);
    }

    /// Explicit-stack flood fill, returns how many cells became shown.
    ///
    /// The start cell is shown unconditionally, every other cell only when it
    /// is hidden and unflagged as the fill reaches it.
    fn flood_in_place(&mut self, start: CellId) -> CellCount {
        let size = self.size();
        let mut newly_shown: CellCount = 0;

        let start_cell = &mut self.cells[start.to_nd_index()];
        if !start_cell.is_shown() {
            start_cell.show();
            newly_shown += 1;
        }

        let mut to_visit = vec![start];
        while let Some(id) = to_visit.pop() {
            if self[id].live_neighbors() != 0 {
                continue;
            }
            for pos in NeighborIter::new(id.coords(), size) {
                let neighbor = &mut self.cells[pos.to_nd_index()];
                if neighbor.is_open_to_reveal() {
                    neighbor.show();
                    newly_shown += 1;
                    to_visit.push(pos.into());
                }
            }
        }

        log::trace!("Flood fill from {} showed {} cells", start, newly_shown);
        newly_shown
    }
}

impl Index<CellId> for Board {
    type Output = Cell;

    fn index(&self, id: CellId) -> &Self::Output {
        &self.cells[id.to_nd_index()]
    }
}
