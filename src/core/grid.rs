//! The puzzle grid
//!
//! A [`Grid`] is validated once at construction and keeps its shape for the
//! rest of its life. Only the move engine rewrites cell contents.

use crate::core::{Biome, Cell, Difficulty};
use crate::error::InvalidGridError;
use serde::{Deserialize, Serialize};

/// Name given to levels whose document carries none
pub const UNNAMED_LEVEL: &str = "Unnamed Level";

/// Cell coordinates, origin top-left
///
/// Signed so that a step off the left or top edge is still representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }

    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Position {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A rectangular sokoban level with its metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Grid {
    name: String,
    width: usize,
    height: usize,
    /// Row-major, `width * height` entries
    cells: Vec<Cell>,
    biome: Biome,
    difficulty: Difficulty,
}

impl Grid {
    /// Build a grid from rows of cells, checking the player and box invariants
    pub fn new(
        name: impl Into<String>,
        rows: Vec<Vec<Cell>>,
        biome: Biome,
        difficulty: Difficulty,
    ) -> Result<Self, InvalidGridError> {
        let height = rows.len();
        let width = rows.first().map(Vec::len).unwrap_or(0);
        if height == 0 || width == 0 {
            return Err(InvalidGridError::Empty);
        }

        let mut cells = Vec::with_capacity(width * height);
        for (row, line) in rows.into_iter().enumerate() {
            if line.len() != width {
                return Err(InvalidGridError::RaggedRows {
                    row,
                    expected: width,
                    found: line.len(),
                });
            }
            cells.extend(line);
        }

        let grid = Grid {
            name: name.into(),
            width,
            height,
            cells,
            biome,
            difficulty,
        };
        grid.validate()?;
        Ok(grid)
    }

    fn validate(&self) -> Result<(), InvalidGridError> {
        let players = self.count(Cell::Player) + self.count(Cell::PlayerOnTarget);
        if players != 1 {
            return Err(InvalidGridError::TooManyOrNoPlayers { found: players });
        }

        let done = self.count(Cell::DoneTarget);
        let boxes = self.count(Cell::Box) + done;
        let targets = self.count(Cell::Target) + done + self.count(Cell::PlayerOnTarget);
        if boxes != targets || boxes == 0 {
            return Err(InvalidGridError::BoxTargetMismatch { boxes, targets });
        }

        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn biome(&self) -> Biome {
        self.biome
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// True once no loose box remains
    ///
    /// Only plain `Box` cells count as unsolved, so a level that starts with
    /// every box already on a target is solved from the first frame.
    pub fn is_solved(&self) -> bool {
        !self.cells.contains(&Cell::Box)
    }

    pub fn count(&self, kind: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == kind).count()
    }

    /// Number of target cells, whatever stands on them
    pub fn target_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_target()).count()
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// Cell at `(x, y)`; anything outside the grid reads as `Air`
    pub fn get(&self, x: i32, y: i32) -> Cell {
        if self.in_bounds(x, y) {
            self.cells[y as usize * self.width + x as usize]
        } else {
            Cell::Air
        }
    }

    pub fn cell_at(&self, pos: Position) -> Cell {
        self.get(pos.x, pos.y)
    }

    /// Overwrite an in-bounds cell. Callers keep the invariants.
    pub(crate) fn set(&mut self, pos: Position, cell: Cell) {
        debug_assert!(self.in_bounds(pos.x, pos.y));
        let idx = pos.y as usize * self.width + pos.x as usize;
        self.cells[idx] = cell;
    }

    /// Where the (single) player stands
    pub fn player_position(&self) -> Position {
        let idx = self
            .cells
            .iter()
            .position(|c| c.is_player())
            .unwrap_or_default();
        Position::new((idx % self.width) as i32, (idx / self.width) as i32)
    }

    /// Iterate over rows as slices
    pub fn rows(&self) -> std::slice::Chunks<'_, Cell> {
        self.cells.chunks(self.width)
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for cell in row {
                write!(f, "{}", cell.letter())?;
            }
        }
        Ok(())
    }
}

/// Parse rows of letter codes, for tests and fixtures
#[cfg(test)]
pub(crate) fn rows_from_letters(rows: &[&str]) -> Vec<Vec<Cell>> {
    rows.iter()
        .map(|r| {
            r.chars()
                .map(|c| Cell::from_letter(c).expect("valid letter code"))
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&str]) -> Result<Grid, InvalidGridError> {
        Grid::new("test", rows_from_letters(rows), Biome::Grass, Difficulty::Easy)
    }

    #[test]
    fn test_valid_grid() {
        let g = grid(&["GGG", "GPB", "GGT"]).unwrap();
        assert_eq!(g.width(), 3);
        assert_eq!(g.height(), 3);
        assert_eq!(g.get(1, 1), Cell::Player);
        assert_eq!(g.get(2, 1), Cell::Box);
        assert_eq!(g.player_position(), Position::new(1, 1));
        assert!(!g.is_solved());
    }

    #[test]
    fn test_no_player_rejected() {
        assert_eq!(
            grid(&["GGB", "GGT"]),
            Err(InvalidGridError::TooManyOrNoPlayers { found: 0 })
        );
    }

    #[test]
    fn test_two_players_rejected() {
        // Player on target counts as a player too
        assert_eq!(
            grid(&["PGB", "OGT"]),
            Err(InvalidGridError::TooManyOrNoPlayers { found: 2 })
        );
    }

    #[test]
    fn test_box_target_mismatch() {
        assert_eq!(
            grid(&["PBB", "GGT"]),
            Err(InvalidGridError::BoxTargetMismatch {
                boxes: 2,
                targets: 1
            })
        );
    }

    #[test]
    fn test_zero_boxes_rejected() {
        assert_eq!(
            grid(&["PGG", "GGG"]),
            Err(InvalidGridError::BoxTargetMismatch {
                boxes: 0,
                targets: 0
            })
        );
    }

    #[test]
    fn test_player_on_target_counts_as_target() {
        // One box, one target under the player
        let g = grid(&["OGB"]).unwrap();
        assert_eq!(g.target_count(), 1);
    }

    #[test]
    fn test_all_done_targets_is_already_solved() {
        let g = grid(&["PD", "GG"]).unwrap();
        assert!(g.is_solved());
    }

    #[test]
    fn test_ragged_and_empty() {
        assert_eq!(
            grid(&["PGB", "GT"]),
            Err(InvalidGridError::RaggedRows {
                row: 1,
                expected: 3,
                found: 2
            })
        );
        assert_eq!(grid(&[]), Err(InvalidGridError::Empty));
        assert_eq!(grid(&[""]), Err(InvalidGridError::Empty));
    }

    #[test]
    fn test_out_of_range_reads_air() {
        let g = grid(&["PB", "TG"]).unwrap();
        assert_eq!(g.get(-1, 0), Cell::Air);
        assert_eq!(g.get(0, -1), Cell::Air);
        assert_eq!(g.get(2, 0), Cell::Air);
        assert_eq!(g.get(0, 2), Cell::Air);
    }

    #[test]
    fn test_clone_is_independent() {
        let original = grid(&["PBT"]).unwrap();
        let mut copy = original.clone();
        copy.set(Position::new(1, 0), Cell::Ground);
        copy.set(Position::new(2, 0), Cell::DoneTarget);
        assert_eq!(original.get(1, 0), Cell::Box);
        assert_ne!(original, copy);
    }

    #[test]
    fn test_display_rows() {
        let g = grid(&["PBT", "AAA"]).unwrap();
        assert_eq!(g.to_string(), "PBT\nAAA");
    }
}
