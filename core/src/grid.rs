use core::ops::Index;
use ndarray::Array2;
use serde::Serialize;

use crate::*;

/// Fixed-size board of cells addressed by `(row, col)`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Grid {
    cells: Array2<Cell>,
    size: Coord2,
    mine_count: CellCount,
    revealed_count: CellCount,
}

impl Grid {
    /// Blank grid without mines.
    pub fn new(size: Coord2) -> Self {
        Self {
            cells: Array2::default(size.to_nd_index()),
            size,
            mine_count: 0,
            revealed_count: 0,
        }
    }

    /// Builds a grid with mines at exactly `mine_coords`, adjacency already computed.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut grid = Self::new(size);
        for &coords in mine_coords {
            let coords = grid.validate_coords(coords)?;
            grid.place_mine(coords);
        }
        grid.compute_adjacency();
        Ok(grid)
    }

    pub fn config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.size, self.mine_count)
    }

    pub fn size(&self) -> Coord2 {
        self.size
    }

    pub fn rows(&self) -> Coord {
        self.size.0
    }

    pub fn cols(&self) -> Coord {
        self.size.1
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    /// Safe cells revealed so far.
    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if in_bounds(coords, self.size) {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds {
                coords,
                size: self.size,
            })
        }
    }

    pub fn cell(&self, coords: Coord2) -> Result<Cell> {
        let coords = self.validate_coords(coords)?;
        Ok(self[coords])
    }

    /// The in-bounds positions around `coords`, at most 8.
    pub fn neighbors(&self, coords: Coord2) -> Result<Neighbors> {
        let coords = self.validate_coords(coords)?;
        Ok(self.iter_neighbors(coords).collect())
    }

    /// Every position in row-major order.
    pub fn iter_coords(&self) -> impl Iterator<Item = Coord2> + use<> {
        let (rows, cols) = self.size;
        (0..rows).flat_map(move |row| (0..cols).map(move |col| (row, col)))
    }

    pub fn count_mined_neighbors(&self, coords: Coord2) -> u8 {
        self.count_neighbors(coords, Cell::is_mine)
    }

    pub fn count_flagged_neighbors(&self, coords: Coord2) -> u8 {
        self.count_neighbors(coords, Cell::is_flagged)
    }

    pub fn flag_count(&self) -> CellCount {
        self.cells.iter().filter(|cell| cell.is_flagged).count() as CellCount
    }

    /// True once every safe cell has been revealed.
    pub fn is_cleared(&self) -> bool {
        self.revealed_count == self.safe_cell_count()
    }

    pub(crate) fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.cells.iter_neighbors(coords)
    }

    fn count_neighbors(&self, coords: Coord2, predicate: fn(Cell) -> bool) -> u8 {
        let count = self
            .iter_neighbors(coords)
            .filter(|&pos| predicate(self[pos]))
            .count();
        // never more than 8 neighbors
        count as u8
    }

    /// Returns false if the cell already held a mine.
    pub(crate) fn place_mine(&mut self, coords: Coord2) -> bool {
        let cell = &mut self.cells[coords.to_nd_index()];
        if cell.is_mine {
            return false;
        }
        cell.is_mine = true;
        self.mine_count += 1;
        true
    }

    pub(crate) fn compute_adjacency(&mut self) {
        for coords in self.iter_coords() {
            if self[coords].is_mine {
                continue;
            }
            let adjacent_mines = self.count_mined_neighbors(coords);
            self.cells[coords.to_nd_index()].adjacent_mines = adjacent_mines;
        }
    }

    /// Marks a hidden cell revealed and returns it. Flags are left to the caller.
    pub(crate) fn mark_revealed(&mut self, coords: Coord2) -> Cell {
        let cell = &mut self.cells[coords.to_nd_index()];
        debug_assert!(!cell.is_flagged, "flagged cells are never revealed");
        if !cell.is_revealed {
            cell.is_revealed = true;
            if !cell.is_mine {
                self.revealed_count += 1;
            }
        }
        *cell
    }

    /// Flips the flag of an unrevealed cell, revealed cells are left alone.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.validate_coords(coords)?;
        let cell = &mut self.cells[coords.to_nd_index()];
        if cell.is_revealed {
            return Ok(MarkOutcome::NoChange);
        }
        cell.is_flagged = !cell.is_flagged;
        Ok(MarkOutcome::Changed)
    }

    /// Reveals every mine for the end-of-game display, clearing flags that sat on mines.
    /// Returns how many flags were cleared.
    pub(crate) fn reveal_all_mines(&mut self) -> CellCount {
        let mut cleared_flags = 0;
        for cell in self.cells.iter_mut().filter(|cell| cell.is_mine) {
            if cell.is_flagged {
                cell.is_flagged = false;
                cleared_flags += 1;
            }
            cell.is_revealed = true;
        }
        cleared_flags
    }
}

impl Index<Coord2> for Grid {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}
