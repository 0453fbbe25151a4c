//! Board-state engine for a single-player grid-deduction (minesweeper) game.
//!
//! A [`GameSession`] owns everything about one play-through. The board is only generated on
//! the first reveal so that the clicked cell and its neighbors are always free of mines.
//! Renderers read the state through [`GameSession::snapshot`], which never exposes unrevealed
//! mines.

use core::fmt;
use serde::{Deserialize, Serialize};

pub use cell::*;
pub use error::*;
pub use generator::*;
pub use grid::*;
pub use reveal::*;
pub use session::*;
pub use snapshot::*;
pub use types::*;

mod cell;
mod error;
mod generator;
mod grid;
mod reveal;
mod session;
mod snapshot;
mod types;

/// Cells in the largest possible safe zone: the first clicked cell plus its 8 neighbors.
pub const SAFE_ZONE_CELLS: CellCount = 9;

/// Validated board dimensions and mine count.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    size: Coord2,
    mines: CellCount,
}

impl GameConfig {
    pub(crate) const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// Requires a non-empty board that leaves room for a full safe zone.
    /// The room needed is clamped at zero, so boards under 9 cells are valid with no mines.
    pub fn new(rows: Coord, cols: Coord, mines: CellCount) -> Result<Self> {
        let total = mult(rows, cols);
        if rows == 0 || cols == 0 || mines > total.saturating_sub(SAFE_ZONE_CELLS) {
            return Err(GameError::InvalidConfiguration { rows, cols, mines });
        }
        Ok(Self::new_unchecked((rows, cols), mines))
    }

    pub const fn size(&self) -> Coord2 {
        self.size
    }

    pub const fn rows(&self) -> Coord {
        self.size.0
    }

    pub const fn cols(&self) -> Coord {
        self.size.1
    }

    pub const fn mines(&self) -> CellCount {
        self.mines
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
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
}

impl From<Difficulty> for GameConfig {
    fn from(difficulty: Difficulty) -> Self {
        difficulty.config()
    }
}

/// Conventional presets, any other valid [`GameConfig`] works just as well.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Self::Easy, Self::Medium, Self::Hard];

    pub const fn config(self) -> GameConfig {
        use Difficulty::*;
        match self {
            Easy => GameConfig::new_unchecked((9, 9), 10),
            Medium => GameConfig::new_unchecked((16, 16), 40),
            Hard => GameConfig::new_unchecked((16, 30), 99),
        }
    }

    pub const fn name(self) -> &'static str {
        use Difficulty::*;
        match self {
            Easy => "easy",
            Medium => "medium",
            Hard => "hard",
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::Easy
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of toggling a flag
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    /// Whether this outcome could have caused an update to the game
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Changed)
    }
}

/// Validates the configuration and creates a session seeded from OS entropy.
pub fn new_session(rows: Coord, cols: Coord, mine_count: CellCount) -> Result<GameSession> {
    Ok(GameSession::new(GameConfig::new(rows, cols, mine_count)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_are_valid_configurations() {
        for difficulty in Difficulty::ALL {
            let preset = difficulty.config();
            assert_eq!(
                GameConfig::new(preset.rows(), preset.cols(), preset.mines()),
                Ok(preset),
                "{difficulty}"
            );
        }
        assert_eq!(Difficulty::Hard.config().size(), (16, 30));
    }

    #[test]
    fn config_rejects_empty_boards() {
        assert!(GameConfig::new(0, 9, 0).is_err());
        assert!(GameConfig::new(9, 0, 0).is_err());
    }

    #[test]
    fn config_leaves_room_for_safe_zone() {
        assert!(GameConfig::new(3, 3, 0).is_ok());
        assert_eq!(
            GameConfig::new(3, 3, 1),
            Err(GameError::InvalidConfiguration {
                rows: 3,
                cols: 3,
                mines: 1,
            })
        );
        assert!(GameConfig::new(4, 4, 7).is_ok());
        assert!(GameConfig::new(4, 4, 8).is_err());
        assert!(GameConfig::new(2, 2, 0).is_ok());
    }

    #[test]
    fn boards_under_nine_cells_only_take_zero_mines() {
        assert!(GameConfig::new(1, 1, 0).is_ok());
        assert!(GameConfig::new(1, 1, 1).is_err());
        assert!(GameConfig::new(2, 2, 1).is_err());
    }

    #[test]
    fn new_session_validates() {
        assert!(new_session(9, 9, 72).is_ok());
        assert!(new_session(9, 9, 73).is_err());
        assert_eq!(
            new_session(9, 9, 10).unwrap().status(),
            GameStatus::NotStarted
        );
    }
}
