//! One attempt at one level
//!
//! A [`Session`] owns the grid being played, the player position and the move
//! counter. Presentation code registers a [`SessionObserver`] to hear about
//! moves and the solve; nothing is looked up through globals.

use crate::core::{Grid, Position};
use crate::error::StoreError;
use crate::game::engine::{try_move, Direction, MoveOutcome};
use crate::game::logger::{EventLogger, VerbosityLevel};
use crate::game::scoring::score_grid;
use crate::store::{LeaderboardRecord, ProgressStore, Storage};
use crate::Result;

/// Receives session events
///
/// Both hooks default to doing nothing.
pub trait SessionObserver {
    /// Called after every move attempt, including rejected ones
    fn on_move(&mut self, _outcome: &MoveOutcome) {}

    /// Called once, after the move that solved the level
    fn on_solved(&mut self) {}
}

pub struct Session {
    grid: Grid,
    /// The level as loaded, for resets
    initial: Grid,
    player: Position,
    moves_taken: u32,
    observers: Vec<Box<dyn SessionObserver>>,
    logger: EventLogger,
}

impl Session {
    pub fn new(grid: Grid) -> Self {
        let player = grid.player_position();
        Session {
            initial: grid.clone(),
            grid,
            player,
            moves_taken: 0,
            observers: Vec::new(),
            logger: EventLogger::new(),
        }
    }

    /// Start from the level's checkpoint if one exists
    pub fn resume(grid: Grid, progress: &ProgressStore) -> std::result::Result<Self, StoreError> {
        let mut session = Session::new(grid);
        if let Some(record) = progress.load(session.grid.name())? {
            session.grid = record.grid;
            session.player = session.grid.player_position();
            session.moves_taken = record.moves_taken;
        }
        Ok(session)
    }

    pub fn with_logger(mut self, logger: EventLogger) -> Self {
        self.logger = logger;
        self
    }

    pub fn logger(&self) -> &EventLogger {
        &self.logger
    }

    pub fn add_observer(&mut self, observer: Box<dyn SessionObserver>) {
        self.observers.push(observer);
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn player(&self) -> Position {
        self.player
    }

    pub fn moves_taken(&self) -> u32 {
        self.moves_taken
    }

    pub fn is_solved(&self) -> bool {
        self.grid.is_solved()
    }

    /// Points the current state would earn
    pub fn score(&self) -> u64 {
        score_grid(&self.grid, self.moves_taken)
    }

    /// Move the player and notify observers, without touching storage
    ///
    /// Once the level is solved every further move is rejected. A level that
    /// loads already solved therefore never fires `on_solved` and is never
    /// ranked.
    pub fn apply(&mut self, direction: Direction) -> MoveOutcome {
        let outcome = if self.grid.is_solved() {
            MoveOutcome::rejected()
        } else {
            try_move(&mut self.grid, self.player, direction)
        };

        if outcome.moved {
            self.moves_taken += 1;
            if let Some(dest) = outcome.player_destination() {
                self.player = dest;
            }
            self.logger.event(
                VerbosityLevel::Verbose,
                "move",
                &format!(
                    "{:?} to {}{} (moves: {})",
                    direction,
                    self.player,
                    if outcome.pushed_box { ", pushed box" } else { "" },
                    self.moves_taken
                ),
            );
        } else {
            self.logger.event(
                VerbosityLevel::Verbose,
                "move",
                &format!("{direction:?} rejected at {}", self.player),
            );
        }

        for observer in &mut self.observers {
            observer.on_move(&outcome);
        }

        if outcome.solved {
            self.logger.event(
                VerbosityLevel::Minimal,
                "solve",
                &format!(
                    "Solved '{}' in {} moves for {} points",
                    self.grid.name(),
                    self.moves_taken,
                    self.score()
                ),
            );
            for observer in &mut self.observers {
                observer.on_solved();
            }
        }

        outcome
    }

    /// Move and persist
    ///
    /// A successful move that does not solve the level overwrites the
    /// checkpoint. The solving move records the attempt on the leaderboard
    /// and then removes the checkpoint.
    pub fn step(&mut self, direction: Direction, storage: &Storage) -> Result<MoveOutcome> {
        let outcome = self.apply(direction);
        if !outcome.moved {
            return Ok(outcome);
        }

        if outcome.solved {
            let record = LeaderboardRecord::new(self.grid.name(), self.moves_taken, self.score());
            storage.leaderboard().add_record(record)?;
            storage.progress().clear(self.grid.name())?;
        } else {
            storage.progress().save(&self.grid, self.moves_taken)?;
            self.logger.event(
                VerbosityLevel::Normal,
                "checkpoint",
                &format!("Saved '{}' at {} moves", self.grid.name(), self.moves_taken),
            );
        }
        Ok(outcome)
    }

    /// Restart the level from its loaded state and drop the checkpoint
    pub fn reset(&mut self, storage: &Storage) -> Result<()> {
        self.grid = self.initial.clone();
        self.player = self.grid.player_position();
        self.moves_taken = 0;
        storage.progress().clear(self.grid.name())?;
        self.logger.normal(&format!("Reset '{}'", self.grid.name()));
        Ok(())
    }
}
