use thiserror::Error;

use crate::{CellCount, Coord, Coord2};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid configuration: {rows}x{cols} board with {mines} mines")]
    InvalidConfiguration {
        rows: Coord,
        cols: Coord,
        mines: CellCount,
    },
    #[error("Cannot place {mines} mines, only {available} cells lie outside the safe zone")]
    InfeasibleConfiguration {
        mines: CellCount,
        available: CellCount,
    },
    #[error("Coordinates {coords:?} are outside the {size:?} grid")]
    OutOfBounds { coords: Coord2, size: Coord2 },
}

pub type Result<T> = core::result::Result<T, GameError>;
