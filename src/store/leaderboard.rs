//! Ranked history of completed attempts
//!
//! All levels share one `Ranking` document of flat `Record` elements.
//! Ranking is recomputed from the document on every read.

use crate::{
    error::StoreError,
    level::document::{parse_document, write_document, Element},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Records kept per level
pub const MAX_RECORDS: usize = 20;

const ROOT: &str = "Ranking";
const RECORD: &str = "Record";

/// Milliseconds since the Unix epoch
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct Timestamp(pub u64);

impl Timestamp {
    pub fn now() -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default();
        Timestamp(millis)
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One completed attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardRecord {
    pub level_name: String,
    pub moves_taken: u32,
    pub points: u64,
    pub timestamp: Timestamp,
}

impl LeaderboardRecord {
    pub fn new(level_name: impl Into<String>, moves_taken: u32, points: u64) -> Self {
        LeaderboardRecord {
            level_name: level_name.into(),
            moves_taken,
            points,
            timestamp: Timestamp::now(),
        }
    }

    fn to_element(&self) -> Element {
        Element::new(RECORD)
            .with_attr("map", &self.level_name)
            .with_attr("moves", self.moves_taken)
            .with_attr("points", self.points)
            .with_attr("date", self.timestamp)
    }

    fn from_element(el: &Element) -> Result<Self, crate::error::CodecError> {
        Ok(LeaderboardRecord {
            level_name: el
                .attr("map")
                .map(str::to_string)
                .ok_or_else(|| crate::error::CodecError::MalformedAttribute {
                    element: RECORD.to_string(),
                    attribute: "map".to_string(),
                    value: None,
                })?,
            moves_taken: el.parse_attr("moves")?,
            points: el.parse_attr("points")?,
            timestamp: Timestamp(el.parse_attr("date")?),
        })
    }

    /// Higher points first, then the most recent
    fn rank_cmp(a: &Self, b: &Self) -> std::cmp::Ordering {
        b.points
            .cmp(&a.points)
            .then_with(|| b.timestamp.cmp(&a.timestamp))
    }
}

/// The ranking document on disk
#[derive(Debug, Clone)]
pub struct LeaderboardStore {
    path: PathBuf,
    max_records: usize,
}

impl LeaderboardStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        LeaderboardStore {
            path: path.into(),
            max_records: MAX_RECORDS,
        }
    }

    pub fn with_max_records(mut self, max_records: usize) -> Self {
        self.max_records = max_records.max(1);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn max_records(&self) -> usize {
        self.max_records
    }

    /// Append a record, then evict the lowest-ranked records of that level
    /// until at most `max_records` remain
    pub fn add_record(&self, record: LeaderboardRecord) -> Result<(), StoreError> {
        let mut records = self.read_all()?;
        let level = record.level_name.clone();
        records.push(record);

        loop {
            let ranked = Self::ranked(&records, &level);
            if ranked.len() <= self.max_records {
                break;
            }
            if let Some(&lowest) = ranked.last() {
                records.remove(lowest);
            }
        }

        self.write_all(&records)
    }

    /// All records of a level, best first
    pub fn get_records(&self, level_name: &str) -> Result<Vec<LeaderboardRecord>, StoreError> {
        let records = self.read_all()?;
        Ok(Self::ranked(&records, level_name)
            .into_iter()
            .map(|i| records[i].clone())
            .collect())
    }

    pub fn get_best(&self, level_name: &str) -> Result<Option<LeaderboardRecord>, StoreError> {
        Ok(self.get_records(level_name)?.into_iter().next())
    }

    /// Drop the whole history of a level, returning how many records went
    pub fn remove_all(&self, level_name: &str) -> Result<usize, StoreError> {
        let mut records = self.read_all()?;
        let before = records.len();
        records.retain(|r| r.level_name != level_name);
        let removed = before - records.len();
        if removed > 0 {
            self.write_all(&records)?;
        }
        Ok(removed)
    }

    /// Indices of `level_name`'s records in rank order
    fn ranked(records: &[LeaderboardRecord], level_name: &str) -> Vec<usize> {
        let mut indices: Vec<usize> = records
            .iter()
            .enumerate()
            .filter(|(_, r)| r.level_name == level_name)
            .map(|(i, _)| i)
            .collect();
        indices.sort_by(|&a, &b| LeaderboardRecord::rank_cmp(&records[a], &records[b]));
        indices
    }

    fn read_all(&self) -> Result<Vec<LeaderboardRecord>, StoreError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };

        let corrupt = |reason: String| StoreError::Corrupt {
            path: self.path.clone(),
            reason,
        };

        let root = parse_document(&contents).map_err(|e| corrupt(e.to_string()))?;
        if root.name != ROOT {
            return Err(corrupt(format!("root element is <{}>", root.name)));
        }
        root.children_named(RECORD)
            .map(|el| LeaderboardRecord::from_element(el).map_err(|e| corrupt(e.to_string())))
            .collect()
    }

    fn write_all(&self, records: &[LeaderboardRecord]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }

        let mut root = Element::new(ROOT);
        root.children = records.iter().map(LeaderboardRecord::to_element).collect();
        std::fs::write(&self.path, write_document(&root)).map_err(|e| StoreError::io(&self.path, e))
    }
}
