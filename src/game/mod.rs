//! Playing a level: moves, scoring, sessions and logging

pub mod engine;
pub mod logger;
pub mod scoring;
pub mod session;

pub use engine::{parse_moves, try_move, ChangedCells, Direction, MoveOutcome};
pub use logger::{EventLogger, LogEntry, OutputFormat, OutputMode, VerbosityLevel};
pub use scoring::{points, score_grid};
pub use session::{Session, SessionObserver};
