//! Single-slot checkpoint of an unsolved attempt, one file per level
//!
//! The checkpoint is a native level document with an extra `moves`
//! attribute on its root element.

use crate::{
    core::Grid,
    error::StoreError,
    level::{
        codec::{from_element, to_element},
        document::{parse_document, write_document},
    },
    store::paths::file_stem,
};
use std::path::{Path, PathBuf};

const SAVE_SUFFIX: &str = "_save.xml";

/// A restored checkpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressRecord {
    pub level_name: String,
    pub grid: Grid,
    pub moves_taken: u32,
}

/// Checkpoint files under one directory
#[derive(Debug, Clone)]
pub struct ProgressStore {
    dir: PathBuf,
}

impl ProgressStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        ProgressStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Checkpoint file for a level
    pub fn path_for(&self, level_name: &str) -> PathBuf {
        self.dir
            .join(format!("{}{SAVE_SUFFIX}", file_stem(level_name)))
    }

    /// Write (or overwrite) the checkpoint for `grid`'s level
    pub fn save(&self, grid: &Grid, moves_taken: u32) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.dir).map_err(|e| StoreError::io(&self.dir, e))?;

        let mut root = to_element(grid);
        root.set_attr("moves", moves_taken);

        let path = self.path_for(grid.name());
        std::fs::write(&path, write_document(&root)).map_err(|e| StoreError::io(&path, e))
    }

    /// Restore the checkpoint for `level_name`, `None` when there is none
    pub fn load(&self, level_name: &str) -> Result<Option<ProgressRecord>, StoreError> {
        let path = self.path_for(level_name);
        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::io(&path, e)),
        };

        let root = parse_document(&contents)?;
        let moves_taken: u32 = root.parse_attr("moves")?;
        let mut grid = from_element(&root)?;
        // The caller's name is authoritative; older checkpoints carry none
        grid.set_name(level_name);

        Ok(Some(ProgressRecord {
            level_name: level_name.to_string(),
            grid,
            moves_taken,
        }))
    }

    pub fn exists(&self, level_name: &str) -> bool {
        self.path_for(level_name).is_file()
    }

    /// Delete the checkpoint; succeeds when there is none
    pub fn clear(&self, level_name: &str) -> Result<(), StoreError> {
        let path = self.path_for(level_name);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::io(&path, e)),
        }
    }

    /// Whether a file in the directory is a checkpoint rather than a level
    pub fn is_checkpoint_file(path: &Path) -> bool {
        path.file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with(SAVE_SUFFIX))
    }
}
