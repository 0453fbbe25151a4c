use core::time::Duration;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Player-visible state of one position. Mine and number are only known once revealed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellView {
    pub is_revealed: bool,
    pub is_flagged: bool,
    pub mine: Option<bool>,
    pub adjacent_mines: Option<u8>,
}

impl CellView {
    pub const HIDDEN: Self = Self {
        is_revealed: false,
        is_flagged: false,
        mine: None,
        adjacent_mines: None,
    };

    pub fn is_mine(self) -> bool {
        self.mine == Some(true)
    }
}

impl From<Cell> for CellView {
    fn from(cell: Cell) -> Self {
        if !cell.is_revealed() {
            return Self {
                is_flagged: cell.is_flagged(),
                ..Self::HIDDEN
            };
        }

        Self {
            is_revealed: true,
            is_flagged: false,
            mine: Some(cell.is_mine()),
            adjacent_mines: (!cell.is_mine()).then_some(cell.adjacent_mines()),
        }
    }
}

/// Everything a renderer needs for one frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub status: GameStatus,
    pub size: Coord2,
    pub mine_count: CellCount,
    pub flags_placed: CellCount,
    pub elapsed: Option<Duration>,
    pub triggered_mine: Option<Coord2>,
    pub cells: Array2<CellView>,
}

impl Snapshot {
    pub fn from_session<G>(session: &GameSession<G>) -> Self {
        let size = session.size();
        let cells = match session.grid() {
            Some(grid) => Array2::from_shape_fn(size.to_nd_index(), |(row, col)| {
                // shape comes from the same `Coord` sized config
                CellView::from(grid[(row as Coord, col as Coord)])
            }),
            None => Array2::from_elem(size.to_nd_index(), CellView::HIDDEN),
        };

        Self {
            status: session.status(),
            size,
            mine_count: session.mine_count(),
            flags_placed: session.flags_placed(),
            elapsed: session.elapsed(),
            triggered_mine: session.triggered_mine(),
            cells,
        }
    }

    pub fn cell(&self, coords: Coord2) -> Option<CellView> {
        self.cells.get(coords.to_nd_index()).copied()
    }

    pub fn mines_left(&self) -> i64 {
        i64::from(self.mine_count) - i64::from(self.flags_placed)
    }
}
