//! Error types for sokoban-rs

use std::path::PathBuf;
use thiserror::Error;

/// A grid failed its construction invariants
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidGridError {
    #[error("Grid has no cells")]
    Empty,

    #[error("Row {row} has {found} cells, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Grid must contain exactly one player, found {found}")]
    TooManyOrNoPlayers { found: usize },

    #[error("Count of boxes ({boxes}) has to equal count of targets ({targets}) and be non-zero")]
    BoxTargetMismatch { boxes: usize, targets: usize },
}

/// Level document encoding/decoding failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("Malformed document: {0}")]
    Syntax(String),

    #[error("Missing <{0}> element")]
    MissingElement(String),

    #[error("Attribute '{attribute}' of <{element}> is not correct: {value:?}")]
    MalformedAttribute {
        element: String,
        attribute: String,
        value: Option<String>,
    },

    #[error("Declared {declared_width}x{declared_height} but {detail}")]
    DimensionMismatch {
        declared_width: usize,
        declared_height: usize,
        detail: String,
    },

    #[error("Unknown cell code '{code}' in row {row}")]
    UnknownCellCode { code: char, row: usize },

    #[error("Unknown symbol '{symbol}' in row {row} of legacy level")]
    UnknownSymbol { symbol: char, row: usize },

    #[error("Level with id '{0}' does not exist in given document")]
    LevelIdNotFound(String),

    #[error("Invalid grid: {0}")]
    Grid(#[from] InvalidGridError),
}

/// Progress and leaderboard persistence failures
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Stored document is not valid: {0}")]
    Codec(#[from] CodecError),

    #[error("Corrupt store file {path}: {reason}")]
    Corrupt { path: PathBuf, reason: String },
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}

#[derive(Error, Debug)]
pub enum SokobanError {
    #[error("Invalid grid: {0}")]
    InvalidGrid(#[from] InvalidGridError),

    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Invalid level name: {0:?}")]
    InvalidLevelName(String),

    #[error("Failed to load level {path}: {source}")]
    LevelLoad {
        path: PathBuf,
        #[source]
        source: CodecError,
    },

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Task join error: {0}")]
    JoinError(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, SokobanError>;
