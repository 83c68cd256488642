//! Persistence: per-level checkpoints, the ranking, and published levels

pub mod leaderboard;
pub mod paths;
pub mod progress;

pub use leaderboard::{LeaderboardRecord, LeaderboardStore, Timestamp, MAX_RECORDS};
pub use paths::{file_stem, validate_level_name};
pub use progress::{ProgressRecord, ProgressStore};

use crate::{config::StorageConfig, core::Grid, level::codec::LevelFile, Result};
use std::path::PathBuf;

/// Both stores plus the maps directory, built from one [`StorageConfig`]
#[derive(Debug, Clone)]
pub struct Storage {
    config: StorageConfig,
    progress: ProgressStore,
    leaderboard: LeaderboardStore,
}

impl Storage {
    pub fn open(config: StorageConfig) -> Self {
        let progress = ProgressStore::new(config.saves_dir());
        let leaderboard =
            LeaderboardStore::new(config.ranking_path()).with_max_records(config.max_records);
        Storage {
            config,
            progress,
            leaderboard,
        }
    }

    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    pub fn progress(&self) -> &ProgressStore {
        &self.progress
    }

    pub fn leaderboard(&self) -> &LeaderboardStore {
        &self.leaderboard
    }

    /// File a published level is written to
    pub fn level_path(&self, level_name: &str) -> PathBuf {
        self.config
            .maps_dir()
            .join(format!("{}.xml", file_stem(level_name)))
    }

    /// Write an edited level into the maps directory
    ///
    /// Records and checkpoints of an older level with the same name no longer
    /// apply, so both are dropped.
    pub fn publish_level(&self, grid: &Grid) -> Result<PathBuf> {
        validate_level_name(grid.name())?;
        let path = self.level_path(grid.name());
        LevelFile::save(&path, grid)?;
        self.leaderboard.remove_all(grid.name())?;
        self.progress.clear(grid.name())?;
        Ok(path)
    }
}
