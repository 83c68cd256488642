//! Points awarded for a completed level

use crate::core::{Cell, Grid};

/// Points for a solve measured on `grid` after `moves_taken` moves
pub fn score_grid(grid: &Grid, moves_taken: u32) -> u64 {
    points(grid.target_count(), grid.count(Cell::DoneTarget), moves_taken)
}

/// `round(100 * (total * 10) * (done / total) / (moves / 4))`
///
/// At solve time `done == total`, so the completion factor is always 1; it is
/// kept so scores stay identical to earlier releases. A zero-move solve is
/// scored as a one-move solve, and a level without targets scores 0.
pub fn points(total_targets: usize, done_targets: usize, moves_taken: u32) -> u64 {
    if total_targets == 0 {
        return 0;
    }
    let total = total_targets as f64;
    let completion = done_targets as f64 / total;
    let moves = f64::from(moves_taken.max(1)) / 4.0;
    (100.0 * (total * 10.0) * completion / moves).round() as u64
}
