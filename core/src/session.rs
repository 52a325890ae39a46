use core::fmt;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    #[default]
    Playing,
    Won,
    Lost,
}

impl GameState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }

    pub const fn message(self) -> &'static str {
        match self {
            Self::Playing => "Game On",
            Self::Won => "You Win!",
            Self::Lost => "You Lost",
        }
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// One game as seen by the presentation layer: the current board, the chord
/// highlight, and whether the game was won or lost.
///
/// Every player gesture maps to one method; the board is replaced, never
/// edited, and the state is re-derived from the new board afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    id: GameId,
    config: BoardConfig,
    board: Board,
    overlay: ActiveOverlay,
    state: GameState,
    chord_anchor: Option<CellId>,
    move_count: u32,
}

impl GameSession {
    /// New game with a board and id drawn from `seed`.
    pub fn new(config: BoardConfig, seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let id = GameId::generate(&mut rng);
        let board = Board::from_checked_mask(&place_mines(config, &mut rng));
        Self::from_board(config, board, id)
    }

    /// New game on a random board for `level`.
    #[cfg(feature = "std")]
    pub fn start(level: Level) -> Self {
        let config = level.config();
        Self::from_board(config, Board::setup(config), GameId::new_random())
    }

    pub fn from_board(config: BoardConfig, board: Board, id: GameId) -> Self {
        log::debug!("Game {} started on a {}x{} board", id, board.rows(), board.cols());
        let mut session = Self {
            id,
            config,
            board,
            overlay: ActiveOverlay::new(),
            state: GameState::Playing,
            chord_anchor: None,
            move_count: 0,
        };
        session.update_state();
        session
    }

    /// Throws the current game away and deals a new one, under a new id.
    pub fn restart(&mut self, config: BoardConfig, seed: u64) {
        *self = Self::new(config, seed);
    }

    pub fn id(&self) -> GameId {
        self.id
    }

    pub fn config(&self) -> BoardConfig {
        self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn overlay(&self) -> &ActiveOverlay {
        &self.overlay
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    /// Flags left to place if every mine gets one; negative when over-flagged.
    pub fn mines_left(&self) -> i32 {
        i32::from(self.board.mine_count()) - i32::from(self.board.flag_count())
    }

    /// Left click. A flagged cell is protected and stays hidden.
    pub fn reveal(&mut self, id: CellId) -> Result<RevealOutcome> {
        self.check_not_finished()?;
        if self.board.cell(id)?.is_flagged() {
            log::debug!("Reveal of flagged cell {} ignored", id);
            return Ok(RevealOutcome::NoChange);
        }
        let (board, outcome) = self.board.reveal(id)?;
        self.apply(board, outcome.has_update());
        Ok(outcome)
    }

    /// Right click.
    pub fn toggle_flag(&mut self, id: CellId) -> Result<MarkOutcome> {
        self.check_not_finished()?;
        let (board, outcome) = self.board.mark(id);
        self.apply(board, outcome.has_update());
        Ok(outcome)
    }

    /// Both buttons pressed over `id`: highlight its hidden unflagged neighbors.
    pub fn press_chord(&mut self, id: CellId) -> Result<()> {
        self.check_not_finished()?;
        self.board.cell(id)?;
        let neighbors: NeighborIds = self
            .board
            .neighbor_ids(id)
            .into_iter()
            .filter(|&pos| self.board.get(pos).is_some_and(Cell::is_open_to_reveal))
            .collect();
        self.overlay = self.overlay.add_neighbors_active(&self.board, &neighbors);
        self.chord_anchor = Some(id);
        Ok(())
    }

    /// Both buttons released over `id`.
    ///
    /// Reveals the anchor's hidden unflagged neighbors only when released over
    /// the anchor itself, the anchor is shown, and its flagged neighbors add up
    /// to its mine count. The highlight is cleared either way.
    pub fn release_chord(&mut self, id: CellId) -> Result<RevealOutcome> {
        let anchor = self.chord_anchor.take();
        self.overlay = self.overlay.remove_all_active();
        self.check_not_finished()?;

        if anchor != Some(id) {
            log::debug!("Chord released over {} away from its anchor {:?}", id, anchor);
            return Ok(RevealOutcome::NoChange);
        }

        let cell = *self.board.cell(id)?;
        let neighbors = self.board.neighbor_ids(id);
        let flags = self.board.neighbor_flag_count(&neighbors);
        if !cell.is_shown() || flags != CellCount::from(cell.live_neighbors()) {
            log::debug!(
                "Chord at {} not taken, {} flags around {}",
                id,
                flags,
                cell.live_neighbors()
            );
            return Ok(RevealOutcome::NoChange);
        }

        let (board, outcome) = self.board.reveal_all(&neighbors);
        self.apply(board, outcome.has_update());
        Ok(outcome)
    }

    /// Buttons released outside the board.
    pub fn cancel_chord(&mut self) {
        self.chord_anchor = None;
        self.overlay = self.overlay.remove_all_active();
    }

    fn apply(&mut self, board: Board, changed: bool) {
        self.board = board;
        if changed {
            self.move_count = self.move_count.saturating_add(1);
            self.update_state();
        }
    }

    fn update_state(&mut self) {
        if self.state.is_finished() {
            return;
        }

        self.state = if self.board.has_exploded_mine() {
            GameState::Lost
        } else if self.board.all_hidden_are_mines() {
            GameState::Won
        } else {
            GameState::Playing
        };

        if self.state.is_finished() {
            log::debug!("Game {} ended: {}", self.id, self.state);
        }
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> CellId {
        s.parse().unwrap()
    }

    fn session(size: Coord2, mines: &[CellId]) -> GameSession {
        let board = Board::from_mine_coords(size, mines).unwrap();
        let config = BoardConfig::new(size.0, size.1, 0);
        let mut rng = SmallRng::seed_from_u64(0);
        GameSession::from_board(config, board, GameId::generate(&mut rng))
    }

    fn mine_column() -> GameSession {
        let mines: alloc::vec::Vec<_> = (0..4).map(|row| CellId::new(row, 1)).collect();
        session((4, 4), &mines)
    }

    #[test]
    fn state_messages() {
        assert_eq!(alloc::format!("{}", GameState::Playing), "Game On");
        assert_eq!(alloc::format!("{}", GameState::Won), "You Win!");
        assert_eq!(alloc::format!("{}", GameState::Lost), "You Lost");
    }

    #[test]
    fn hitting_a_mine_loses_and_locks_the_game() {
        let mut game = mine_column();

        assert_eq!(game.reveal(id("2,1")).unwrap(), RevealOutcome::Detonated);
        assert_eq!(game.state(), GameState::Lost);
        assert_eq!(game.reveal(id("0,3")), Err(GameError::AlreadyEnded));
        assert_eq!(game.toggle_flag(id("0,3")), Err(GameError::AlreadyEnded));
    }

    #[test]
    fn revealing_every_safe_cell_wins() {
        let mut game = mine_column();

        game.reveal(id("0,3")).unwrap();
        assert_eq!(game.state(), GameState::Playing);
        for row in 0..4 {
            game.reveal(CellId::new(row, 0)).unwrap();
        }

        assert_eq!(game.state(), GameState::Won);
        assert_eq!(game.move_count(), 5);
    }

    #[test]
    fn flags_do_not_decide_the_win() {
        let mut game = mine_column();
        for row in 0..4 {
            game.toggle_flag(CellId::new(row, 1)).unwrap();
        }

        assert_eq!(game.mines_left(), 0);
        assert_eq!(game.state(), GameState::Playing);
    }

    #[test]
    fn chord_reveals_when_flags_match() {
        let mut game = session((3, 3), &[id("0,1"), id("2,1")]);
        game.reveal(id("1,1")).unwrap();
        game.toggle_flag(id("0,1")).unwrap();
        game.toggle_flag(id("2,1")).unwrap();

        game.press_chord(id("1,1")).unwrap();
        assert_eq!(game.overlay().len(), 6);
        let outcome = game.release_chord(id("1,1")).unwrap();

        assert_eq!(outcome, RevealOutcome::Revealed);
        assert!(game.overlay().is_empty());
        assert!(game.board()[id("1,0")].is_shown());
        assert!(game.board()[id("1,2")].is_shown());
        assert_eq!(game.state(), GameState::Won);
    }

    #[test]
    fn left_click_on_flagged_mine_is_ignored() {
        let mut game = mine_column();
        game.toggle_flag(id("0,1")).unwrap();

        assert_eq!(game.reveal(id("0,1")).unwrap(), RevealOutcome::NoChange);
        assert_eq!(game.state(), GameState::Playing);
        assert!(game.board()[id("0,1")].is_flagged());
        assert!(!game.board().has_exploded_mine());
        assert_eq!(game.move_count(), 1);
    }

    #[test]
    fn chord_press_highlights_only_hidden_unflagged_neighbors() {
        let mut game = mine_column();
        game.reveal(id("3,2")).unwrap();
        game.toggle_flag(id("1,2")).unwrap();

        game.press_chord(id("2,2")).unwrap();

        let overlay = game.overlay();
        assert_eq!(overlay.len(), 6);
        assert!(!overlay.is_active(id("1,2")));
        assert!(!overlay.is_active(id("3,2")));
        assert!(!overlay.is_active(id("2,2")));
        for active in ["1,1", "1,3", "2,1", "2,3", "3,1", "3,3"] {
            assert!(overlay.is_active(id(active)), "{active}");
        }
    }

    #[test]
    fn chord_is_skipped_when_flags_do_not_match() {
        let mut game = session((3, 3), &[id("0,1"), id("2,1")]);
        game.reveal(id("1,1")).unwrap();
        game.toggle_flag(id("0,1")).unwrap();
        let before = game.board().clone();

        game.press_chord(id("1,1")).unwrap();
        let outcome = game.release_chord(id("1,1")).unwrap();

        assert_eq!(outcome, RevealOutcome::NoChange);
        assert_eq!(game.board(), &before);
        assert!(game.overlay().is_empty());
    }

    #[test]
    fn chord_released_elsewhere_does_nothing() {
        let mut game = session((3, 3), &[id("0,1"), id("2,1")]);
        game.reveal(id("1,1")).unwrap();
        game.toggle_flag(id("0,1")).unwrap();
        game.toggle_flag(id("2,1")).unwrap();

        game.press_chord(id("1,1")).unwrap();
        assert_eq!(game.release_chord(id("1,0")).unwrap(), RevealOutcome::NoChange);
        assert_eq!(game.board().shown_count(), 1);

        game.press_chord(id("1,1")).unwrap();
        game.cancel_chord();
        assert!(game.overlay().is_empty());
        assert_eq!(game.release_chord(id("1,1")).unwrap(), RevealOutcome::NoChange);
    }

    #[test]
    fn misflagged_chord_loses() {
        let mut game = session((3, 3), &[id("0,1"), id("2,1")]);
        game.reveal(id("1,1")).unwrap();
        game.toggle_flag(id("0,1")).unwrap();
        game.toggle_flag(id("1,0")).unwrap();

        game.press_chord(id("1,1")).unwrap();
        let outcome = game.release_chord(id("1,1")).unwrap();

        assert_eq!(outcome, RevealOutcome::Detonated);
        assert_eq!(game.state(), GameState::Lost);
    }

    #[test]
    fn unknown_cells_are_rejected() {
        let mut game = mine_column();

        assert_eq!(game.reveal(id("9,9")), Err(GameError::UnknownCell(id("9,9"))));
        assert_eq!(game.press_chord(id("4,0")), Err(GameError::UnknownCell(id("4,0"))));
        assert_eq!(game.state(), GameState::Playing);
    }

    #[test]
    fn board_without_safe_cells_starts_won() {
        let game = session((1, 1), &[id("0,0")]);

        assert_eq!(game.state(), GameState::Won);
    }

    #[test]
    fn seeded_sessions_are_reproducible_and_restart_changes_id() {
        let config = Level::Moderate.config();
        let mut game = GameSession::new(config, 17);
        assert_eq!(game, GameSession::new(config, 17));
        assert_eq!(game.board().mine_count(), config.target_mines());

        let first_id = game.id();
        let first = game.board().ids().next().unwrap();
        game.reveal(first).unwrap();
        game.restart(Level::Hard.config(), 18);

        assert_ne!(game.id(), first_id);
        assert_eq!(game.config(), Level::Hard.config());
        assert_eq!(game.board().len(), 400);
        assert_eq!(game.board().shown_count(), 0);
        assert_eq!(game.move_count(), 0);
    }

    #[cfg(feature = "std")]
    #[test]
    fn levels_start_fresh_games() {
        for level in Level::ALL {
            let game = GameSession::start(level);
            let config = level.config();
            assert_eq!(game.board().size(), config.size());
            assert_eq!(game.board().mine_count(), config.target_mines());
            assert_eq!(game.state(), GameState::Playing);
        }
    }
}
