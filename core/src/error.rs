use thiserror::Error;

use crate::CellId;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("No cell {0} on this board")]
    UnknownCell(CellId),
    #[error("Cell id must have the form \"row,col\"")]
    InvalidCellId,
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Unknown level, expected EASY, MODERATE or HARD")]
    UnknownLevel,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
}

pub type Result<T> = core::result::Result<T, GameError>;
