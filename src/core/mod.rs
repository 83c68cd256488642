//! Core puzzle types: cells, tags and the grid

pub mod cell;
pub mod grid;
pub mod metadata;
pub mod palette;

pub use cell::{Cell, Floor, Occupant};
pub use grid::{Grid, Position, UNNAMED_LEVEL};
pub use metadata::{Biome, Difficulty};
pub use palette::Palette;
