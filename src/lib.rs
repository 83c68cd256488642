//! Sokoban - block-pushing puzzle core
//!
//! Grid model, move engine, level documents, checkpoints and the ranking,
//! driven through an explicit [`game::Session`].

pub mod config;
pub mod core;
pub mod error;
pub mod game;
pub mod level;
pub mod store;

pub use error::{Result, SokobanError};
