//! Where levels, checkpoints and the ranking live on disk

use crate::store::leaderboard::MAX_RECORDS;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const MAPS_DIR: &str = "MyMaps";
const SAVES_DIR: &str = "Save";
const RANKING_FILE: &str = "Ranking.xml";

/// Storage layout and limits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Root of every file the game writes
    pub data_dir: PathBuf,
    /// Leaderboard records kept per level
    pub max_records: usize,
}

impl StorageConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        StorageConfig {
            data_dir: data_dir.into(),
            ..Default::default()
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// User-published levels
    pub fn maps_dir(&self) -> PathBuf {
        self.data_dir.join(MAPS_DIR)
    }

    /// Checkpoint files
    pub fn saves_dir(&self) -> PathBuf {
        self.data_dir.join(SAVES_DIR)
    }

    pub fn ranking_path(&self) -> PathBuf {
        self.saves_dir().join(RANKING_FILE)
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            data_dir: PathBuf::from("data"),
            max_records: MAX_RECORDS,
        }
    }
}
