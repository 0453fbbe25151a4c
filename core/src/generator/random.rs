use rand::{Rng, SeedableRng, rngs::SmallRng};

use super::*;

/// Purely random placement outside the safe zone. Positions are drawn uniformly and redrawn
/// whenever they land in the safe zone or on an existing mine.
#[derive(Clone, Debug)]
pub struct RandomBoardGenerator<R = SmallRng> {
    rng: R,
}

impl RandomBoardGenerator<SmallRng> {
    pub fn from_seed(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(SmallRng::from_os_rng())
    }
}

impl<R: Rng> RandomBoardGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> BoardGenerator for RandomBoardGenerator<R> {
    fn generate(&mut self, config: GameConfig, safe_origin: Coord2) -> Result<Grid> {
        let safe_origin = config.validate_coords(safe_origin)?;
        let (rows, cols) = config.size();
        let safe_zone = safe_zone(config.size(), safe_origin);

        // at most 9 cells, never more than the board holds
        let available = config.total_cells() - safe_zone.len() as CellCount;
        if config.mines() > available {
            log::warn!(
                "Cannot fit {} mines around safe origin {:?}, only {} cells available",
                config.mines(),
                safe_origin,
                available
            );
            return Err(GameError::InfeasibleConfiguration {
                mines: config.mines(),
                available,
            });
        }

        let mut grid = Grid::new(config.size());
        let mut draws = 0u64;
        while grid.mine_count() < config.mines() {
            let coords = (self.rng.random_range(0..rows), self.rng.random_range(0..cols));
            draws += 1;
            if !safe_zone.contains(&coords) {
                grid.place_mine(coords);
            }
        }
        grid.compute_adjacency();

        log::debug!(
            "Generated {}x{} grid with {} mines around {:?} after {} draws",
            rows,
            cols,
            grid.mine_count(),
            safe_origin,
            draws
        );
        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generate(config: GameConfig, origin: Coord2, seed: u64) -> Result<Grid> {
        RandomBoardGenerator::from_seed(seed).generate(config, origin)
    }

    #[test]
    fn safe_zone_is_free_of_mines() {
        let config = Difficulty::Hard.config();
        for (seed, origin) in [(1, (0, 0)), (2, (7, 12)), (3, (15, 29)), (4, (0, 17))] {
            let grid = generate(config, origin, seed).unwrap();
            for pos in safe_zone(config.size(), origin) {
                assert!(!grid[pos].is_mine(), "mine at {pos:?} near {origin:?}");
            }
        }
    }

    #[test]
    fn places_exactly_the_requested_mines() {
        let config = Difficulty::Medium.config();
        let grid = generate(config, (8, 8), 42).unwrap();

        let mined = grid.iter_coords().filter(|&pos| grid[pos].is_mine()).count();
        assert_eq!(mined, 40);
        assert_eq!(grid.mine_count(), 40);
    }

    #[test]
    fn adjacency_matches_recount() {
        let grid = generate(Difficulty::Easy.config(), (4, 4), 7).unwrap();

        for pos in grid.iter_coords() {
            let cell = grid[pos];
            let expected = if cell.is_mine() {
                0
            } else {
                NeighborIter::new(pos, grid.size())
                    .filter(|&n| grid[n].is_mine())
                    .count() as u8
            };
            assert_eq!(cell.adjacent_mines(), expected, "at {pos:?}");
        }
    }

    #[test]
    fn same_seed_same_board() {
        let config = Difficulty::Easy.config();
        assert_eq!(
            generate(config, (0, 0), 99).unwrap(),
            generate(config, (0, 0), 99).unwrap()
        );
    }

    #[test]
    fn densest_board_fills_everything_outside_safe_zone() {
        let config = GameConfig::new(6, 6, 27).unwrap();
        let grid = generate(config, (2, 3), 5).unwrap();

        for pos in grid.iter_coords() {
            let in_zone = safe_zone(config.size(), (2, 3)).contains(&pos);
            assert_eq!(grid[pos].is_mine(), !in_zone);
        }
    }

    #[test]
    fn infeasible_when_safe_zone_leaves_too_little_room() {
        // a corner origin on a 2x3 board shields 4 cells, leaving 2
        let config = GameConfig::new_unchecked((2, 3), 3);
        assert_eq!(
            generate(config, (0, 0), 0),
            Err(GameError::InfeasibleConfiguration {
                mines: 3,
                available: 2,
            })
        );

        let config = GameConfig::new_unchecked((2, 3), 2);
        let grid = generate(config, (0, 0), 0).unwrap();
        assert!(grid[(0, 2)].is_mine() && grid[(1, 2)].is_mine());
    }

    #[test]
    fn origin_must_be_on_the_board() {
        let config = Difficulty::Easy.config();
        assert!(matches!(
            generate(config, (9, 0), 0),
            Err(GameError::OutOfBounds { .. })
        ));
    }
}
