use thiserror::Error;

use crate::CellCount;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board must have at least one row and one column")]
    InvalidSize,
    #[error("Board must contain at least one mine")]
    NoMines,
    #[error("Too many mines: {mines} requested but only {capacity} fit outside the safe start")]
    TooManyMines { mines: CellCount, capacity: CellCount },
}

pub type Result<T> = core::result::Result<T, GameError>;
