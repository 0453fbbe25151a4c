use hashbrown::HashSet;

use crate::*;
pub use random::*;

mod random;

/// Produces the board for a session once the first reveal has picked the safe origin.
pub trait BoardGenerator {
    /// Builds a grid for `config` where `safe_origin` and its neighbors hold no mine.
    fn generate(&mut self, config: GameConfig, safe_origin: Coord2) -> Result<Grid>;
}

/// The origin plus its in-bounds neighbors, at most [`SAFE_ZONE_CELLS`] positions.
pub fn safe_zone(size: Coord2, origin: Coord2) -> HashSet<Coord2> {
    core::iter::once(origin)
        .chain(NeighborIter::new(origin, size))
        .collect()
}
