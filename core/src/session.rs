use core::time::Duration;
use serde::{Deserialize, Serialize};
use web_time::Instant;

use crate::*;

/// Valid transitions:
/// - NotStarted -> InProgress
/// - InProgress -> Won
/// - InProgress -> Lost
/// - any -> NotStarted, on restart
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// No board yet, waiting for the first reveal
    NotStarted,
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_in_progress(self) -> bool {
        matches!(self, Self::InProgress)
    }

    /// Won or lost, only a restart is accepted
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameStatus {
    fn default() -> Self {
        Self::NotStarted
    }
}

/// Outcome of a reveal or chord
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    NoChange,
    Revealed,
    Won,
    Lost,
}

impl TurnOutcome {
    /// Whether this outcome could have caused an update to the game
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

/// One play-through, from the first click to a win or loss.
///
/// The board does not exist until the first reveal: that cell becomes the safe origin handed
/// to the generator. Actions that make no sense in the current state are no-ops, only
/// positions outside the board are errors.
#[derive(Clone, Debug)]
pub struct GameSession<G = RandomBoardGenerator> {
    config: GameConfig,
    generator: G,
    grid: Option<Grid>,
    status: GameStatus,
    flags_placed: CellCount,
    started_at: Option<Instant>,
    ended_at: Option<Instant>,
    triggered_mine: Option<Coord2>,
}

impl GameSession {
    /// Boards are seeded from OS entropy.
    pub fn new(config: GameConfig) -> Self {
        Self::with_generator(config, RandomBoardGenerator::from_entropy())
    }

    /// Same seed and same first click give the same board.
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::with_generator(config, RandomBoardGenerator::from_seed(seed))
    }

    /// Plays on a prepared board, boards after a restart are random.
    pub fn from_grid(grid: Grid) -> Self {
        Self::from_grid_with_generator(grid, RandomBoardGenerator::from_entropy())
    }
}

impl<G> GameSession<G> {
    pub fn with_generator(config: GameConfig, generator: G) -> Self {
        Self {
            config,
            generator,
            grid: None,
            status: GameStatus::NotStarted,
            flags_placed: 0,
            started_at: None,
            ended_at: None,
            triggered_mine: None,
        }
    }

    /// Starts in progress on `grid`, the clock starts with the first action.
    pub fn from_grid_with_generator(grid: Grid, generator: G) -> Self {
        let mut session = Self::with_generator(grid.config(), generator);
        session.flags_placed = grid.flag_count();
        session.grid = Some(grid);
        session.status = GameStatus::InProgress;
        session
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn size(&self) -> Coord2 {
        self.config.size()
    }

    pub fn mine_count(&self) -> CellCount {
        self.config.mines()
    }

    pub fn flags_placed(&self) -> CellCount {
        self.flags_placed
    }

    /// How many mines have not been flagged yet, negative when over-flagged
    pub fn mines_left(&self) -> i64 {
        i64::from(self.config.mines()) - i64::from(self.flags_placed)
    }

    /// Time since the first action, frozen once the game ends. `None` before the first action.
    pub fn elapsed(&self) -> Option<Duration> {
        let started_at = self.started_at?;
        let until = self.ended_at.unwrap_or_else(Instant::now);
        Some(until.duration_since(started_at))
    }

    /// The mine that ended a lost game.
    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    /// What a player may know about one position.
    pub fn cell_view(&self, coords: Coord2) -> Result<CellView> {
        let coords = self.config.validate_coords(coords)?;
        Ok(self
            .grid
            .as_ref()
            .map_or(CellView::HIDDEN, |grid| CellView::from(grid[coords])))
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from_session(self)
    }

    pub(crate) fn grid(&self) -> Option<&Grid> {
        self.grid.as_ref()
    }

    /// Throws the board away, the next reveal generates a fresh one.
    pub fn restart(&mut self) {
        log::debug!("Restarting {:?} session", self.status);
        self.grid = None;
        self.status = GameStatus::NotStarted;
        self.flags_placed = 0;
        self.started_at = None;
        self.ended_at = None;
        self.triggered_mine = None;
    }

    fn mark_started(&mut self) {
        if self.started_at.is_none() {
            let now = Instant::now();
            log::debug!("Clock started at {:?}", now);
            self.started_at = Some(now);
        }
    }

    fn mark_ended(&mut self, status: GameStatus) {
        self.status = status;
        self.ended_at = Some(Instant::now());
        log::debug!("Game ended {:?} after {:?}", status, self.elapsed());
    }

    fn lose(&mut self, mine: Coord2) -> TurnOutcome {
        if let Some(grid) = self.grid.as_mut() {
            let cleared_flags = grid.reveal_all_mines();
            self.flags_placed = self.flags_placed.saturating_sub(cleared_flags);
        }
        self.triggered_mine = Some(mine);
        self.mark_ended(GameStatus::Lost);
        TurnOutcome::Lost
    }

    /// Win check after a turn that hit no mine.
    fn settle(&mut self, revealed_before: CellCount) -> TurnOutcome {
        let Some(grid) = self.grid.as_ref() else {
            return TurnOutcome::NoChange;
        };

        if grid.is_cleared() {
            self.mark_ended(GameStatus::Won);
            TurnOutcome::Won
        } else if grid.revealed_count() != revealed_before {
            TurnOutcome::Revealed
        } else {
            TurnOutcome::NoChange
        }
    }
}

impl<G: BoardGenerator> GameSession<G> {
    /// Reveals a cell, generating the board around it first if this is the opening move.
    pub fn apply_reveal(&mut self, coords: Coord2) -> Result<TurnOutcome> {
        let coords = self.config.validate_coords(coords)?;

        match self.status {
            GameStatus::Won | GameStatus::Lost => return Ok(TurnOutcome::NoChange),
            GameStatus::NotStarted => self.start(coords)?,
            GameStatus::InProgress => {}
        }
        self.mark_started();

        let Some(grid) = self.grid.as_mut() else {
            return Ok(TurnOutcome::NoChange);
        };
        let revealed_before = grid.revealed_count();

        Ok(match grid.reveal(coords)? {
            RevealOutcome::MineHit => self.lose(coords),
            RevealOutcome::Safe => self.settle(revealed_before),
        })
    }

    /// Toggles the flag on an unrevealed cell of a game in progress.
    pub fn apply_flag_toggle(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.config.validate_coords(coords)?;
        if !self.status.is_in_progress() {
            return Ok(MarkOutcome::NoChange);
        }
        let Some(grid) = self.grid.as_mut() else {
            return Ok(MarkOutcome::NoChange);
        };

        let outcome = grid.toggle_flag(coords)?;
        if outcome.has_update() {
            if grid[coords].is_flagged() {
                self.flags_placed += 1;
            } else {
                self.flags_placed -= 1;
            }
            self.mark_started();
        }
        Ok(outcome)
    }

    /// Reveals around a satisfied number of a game in progress.
    pub fn apply_chord(&mut self, coords: Coord2) -> Result<TurnOutcome> {
        let coords = self.config.validate_coords(coords)?;
        if !self.status.is_in_progress() {
            return Ok(TurnOutcome::NoChange);
        }
        let Some(grid) = self.grid.as_mut() else {
            return Ok(TurnOutcome::NoChange);
        };
        let revealed_before = grid.revealed_count();

        let outcome = grid.chord(coords)?;
        self.mark_started();
        Ok(match outcome {
            ChordOutcome::NoOp => TurnOutcome::NoChange,
            ChordOutcome::MineHit(mine) => self.lose(mine),
            ChordOutcome::Safe => self.settle(revealed_before),
        })
    }

    fn start(&mut self, origin: Coord2) -> Result<()> {
        let grid = self.generator.generate(self.config, origin)?;
        log::debug!(
            "Started {}x{} game with {} mines at {:?}",
            grid.rows(),
            grid.cols(),
            grid.mine_count(),
            origin
        );
        self.grid = Some(grid);
        self.status = GameStatus::InProgress;
        Ok(())
    }
}
