use serde::Serialize;

/// State of a single grid position. The position itself is implied by where the cell lives.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Cell {
    pub(crate) is_mine: bool,
    pub(crate) adjacent_mines: u8,
    pub(crate) is_revealed: bool,
    pub(crate) is_flagged: bool,
}

impl Cell {
    pub const fn is_mine(self) -> bool {
        self.is_mine
    }

    /// Mined neighbors. Always 0 for a mine.
    pub const fn adjacent_mines(self) -> u8 {
        self.adjacent_mines
    }

    pub const fn is_revealed(self) -> bool {
        self.is_revealed
    }

    pub const fn is_flagged(self) -> bool {
        self.is_flagged
    }

    /// Neither revealed nor flagged.
    pub const fn is_hidden(self) -> bool {
        !self.is_revealed && !self.is_flagged
    }

    /// A safe cell with no mined neighbors, the seed of a flood fill.
    pub const fn is_empty(self) -> bool {
        !self.is_mine && self.adjacent_mines == 0
    }
}
