use core::ops::BitOr;

use crate::*;

/// Result of revealing one cell, including any cascade it started.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    Safe,
    MineHit,
}

/// Result of revealing the neighbors of a satisfied number.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ChordOutcome {
    NoOp,
    Safe,
    /// Carries the first mine that was hit.
    MineHit(Coord2),
}

/// Merges the outcomes of the individual reveals of a chord.
impl BitOr for ChordOutcome {
    type Output = ChordOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        use ChordOutcome::*;
        match (self, rhs) {
            (MineHit(coords), _) => MineHit(coords),
            (_, MineHit(coords)) => MineHit(coords),
            (Safe, _) | (_, Safe) => Safe,
            (NoOp, NoOp) => NoOp,
        }
    }
}

impl Grid {
    /// Reveals a cell. A cell without mined neighbors floods into the surrounding region.
    ///
    /// Revealed and flagged cells are left alone and count as [`RevealOutcome::Safe`].
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.validate_coords(coords)?;
        Ok(self.reveal_hidden(coords))
    }

    /// Reveals every hidden neighbor of a revealed number once exactly that many neighbors
    /// are flagged. Anything else is a [`ChordOutcome::NoOp`].
    pub fn chord(&mut self, coords: Coord2) -> Result<ChordOutcome> {
        let coords = self.validate_coords(coords)?;
        let cell = self[coords];

        if !cell.is_revealed() || cell.adjacent_mines() == 0 {
            return Ok(ChordOutcome::NoOp);
        }

        let flagged = self.count_flagged_neighbors(coords);
        if flagged != cell.adjacent_mines() {
            log::trace!(
                "Chord at {:?} skipped, {} flags around a {}",
                coords,
                flagged,
                cell.adjacent_mines()
            );
            return Ok(ChordOutcome::NoOp);
        }

        let targets: Neighbors = self
            .iter_neighbors(coords)
            .filter(|&pos| self[pos].is_hidden())
            .collect();

        // keeps going past a mine, every mine is shown on loss anyway
        Ok(targets
            .into_iter()
            .map(|pos| match self.reveal_hidden(pos) {
                RevealOutcome::Safe => ChordOutcome::Safe,
                RevealOutcome::MineHit => ChordOutcome::MineHit(pos),
            })
            .fold(ChordOutcome::NoOp, BitOr::bitor))
    }

    fn reveal_hidden(&mut self, coords: Coord2) -> RevealOutcome {
        // an earlier cascade of the same chord may already have opened it
        if !self[coords].is_hidden() {
            return RevealOutcome::Safe;
        }

        let cell = self.mark_revealed(coords);
        if cell.is_mine() {
            log::debug!("Revealed mine at {:?}", coords);
            return RevealOutcome::MineHit;
        }

        log::trace!("Revealed {:?}, adjacent mines: {}", coords, cell.adjacent_mines());
        if cell.adjacent_mines() == 0 {
            self.flood_fill(coords);
        }
        RevealOutcome::Safe
    }

    /// Opens the region connected to an empty cell plus its numbered border. Runs off an
    /// explicit stack, each cell is opened at most once.
    fn flood_fill(&mut self, origin: Coord2) {
        let mut pending: Vec<Coord2> = self
            .iter_neighbors(origin)
            .filter(|&pos| self[pos].is_hidden())
            .collect();
        let mut opened = 0usize;

        while let Some(coords) = pending.pop() {
            // pushed twice, or flagged
            if !self[coords].is_hidden() {
                continue;
            }

            let cell = self.mark_revealed(coords);
            debug_assert!(!cell.is_mine(), "empty cells never border a mine");
            opened += 1;

            if cell.adjacent_mines() == 0 {
                pending.extend(
                    self.iter_neighbors(coords)
                        .filter(|&pos| self[pos].is_hidden()),
                );
            }
        }

        log::trace!("Flood fill from {:?} opened {} more cells", origin, opened);
    }
}
