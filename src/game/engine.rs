//! Move engine: validates and applies a single player step
//!
//! A move either fully applies or leaves the grid untouched. Rejected moves
//! (off-grid, into void, blocked push) are reported through
//! [`MoveOutcome::moved`] rather than as errors.

use crate::core::{Cell, Grid, Occupant, Position};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Direction of a player step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit delta with y growing downwards
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Parse a LURD letter (case-insensitive)
    pub fn from_letter(c: char) -> Option<Direction> {
        match c.to_ascii_lowercase() {
            'u' => Some(Direction::Up),
            'd' => Some(Direction::Down),
            'l' => Some(Direction::Left),
            'r' => Some(Direction::Right),
            _ => None,
        }
    }

    pub fn letter(self) -> char {
        match self {
            Direction::Up => 'u',
            Direction::Down => 'd',
            Direction::Left => 'l',
            Direction::Right => 'r',
        }
    }
}

/// Parse a LURD move string such as `"rrD l u"`; whitespace is ignored
pub fn parse_moves(moves: &str) -> crate::Result<Vec<Direction>> {
    moves
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| {
            Direction::from_letter(c)
                .ok_or_else(|| crate::SokobanError::ParseError(format!("invalid move '{c}'")))
        })
        .collect()
}

impl Position {
    pub const fn step(self, direction: Direction) -> Position {
        let (dx, dy) = direction.delta();
        self.offset(dx, dy)
    }
}

/// Cells rewritten by one move, at most three
pub type ChangedCells = SmallVec<[(Position, Cell); 3]>;

/// What a call to [`try_move`] did
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MoveOutcome {
    pub moved: bool,
    pub pushed_box: bool,
    /// The pushed box landed on a target
    pub entered_target: bool,
    /// The pushed box left a target
    pub exited_target: bool,
    pub solved: bool,
    /// New contents of every rewritten cell, for renderers
    pub changed: ChangedCells,
}

impl MoveOutcome {
    /// A move that did not happen
    pub fn rejected() -> Self {
        MoveOutcome::default()
    }

    /// Where the player ended up, if it moved
    pub fn player_destination(&self) -> Option<Position> {
        self.changed
            .iter()
            .find(|(_, cell)| cell.is_player())
            .map(|(pos, _)| *pos)
    }
}

/// Try to move the player standing at `player_pos` one cell in `direction`
///
/// Pushes a box when one stands in the way and the cell beyond it is free
/// floor. `player_pos` must hold the player; otherwise nothing happens.
pub fn try_move(grid: &mut Grid, player_pos: Position, direction: Direction) -> MoveOutcome {
    let origin = grid.cell_at(player_pos);
    if !origin.is_player() {
        return MoveOutcome::rejected();
    }

    let dest_pos = player_pos.step(direction);
    let dest = grid.cell_at(dest_pos);

    let mut changed = ChangedCells::new();
    let mut outcome = MoveOutcome::rejected();

    match dest.occupant() {
        Occupant::None if dest.is_walkable() => {}
        Occupant::Box => {
            let beyond_pos = dest_pos.step(direction);
            let beyond = grid.cell_at(beyond_pos);
            let Some(pushed) = beyond
                .is_walkable()
                .then(|| beyond.with_occupant(Occupant::Box))
                .flatten()
            else {
                return MoveOutcome::rejected();
            };
            changed.push((beyond_pos, pushed));
            outcome.pushed_box = true;
            outcome.entered_target = beyond.is_target();
            outcome.exited_target = dest.is_target();
        }
        // Void, out of bounds, or the player itself
        _ => return MoveOutcome::rejected(),
    }

    let Some(entered) = dest.with_occupant(Occupant::Player) else {
        return MoveOutcome::rejected();
    };
    changed.push((dest_pos, entered));
    changed.push((player_pos, origin.vacated()));

    for &(pos, cell) in &changed {
        grid.set(pos, cell);
    }

    outcome.moved = true;
    outcome.solved = grid.is_solved();
    outcome.changed = changed;
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::grid::rows_from_letters;
    use crate::core::{Biome, Difficulty};

    fn grid(rows: &[&str]) -> Grid {
        Grid::new("engine", rows_from_letters(rows), Biome::Grass, Difficulty::Easy).unwrap()
    }

    #[test]
    fn test_plain_step() {
        let mut g = grid(&["PGB", "GGT"]);
        let outcome = try_move(&mut g, Position::new(0, 0), Direction::Right);
        assert!(outcome.moved);
        assert!(!outcome.pushed_box);
        assert!(!outcome.solved);
        assert_eq!(g.to_string(), "GPB\nGGT");
        assert_eq!(outcome.player_destination(), Some(Position::new(1, 0)));
        assert_eq!(outcome.changed.len(), 2);
    }

    #[test]
    fn test_step_onto_and_off_target() {
        let mut g = grid(&["PTB", "GGG"]);
        assert!(try_move(&mut g, Position::new(0, 0), Direction::Right).moved);
        assert_eq!(g.to_string(), "GOB\nGGG");
        assert!(try_move(&mut g, Position::new(1, 0), Direction::Down).moved);
        assert_eq!(g.to_string(), "GTB\nGPG");
    }

    #[test]
    fn test_scenario_push_down_onto_target() {
        let mut g = grid(&["GGG", "GPB", "GGT"]);

        // Box at the right edge cannot be pushed further right
        let blocked = try_move(&mut g, Position::new(1, 1), Direction::Right);
        assert!(!blocked.moved);
        assert_eq!(g.to_string(), "GGG\nGPB\nGGT");

        // Walk above the box, then push it down onto the target
        assert!(try_move(&mut g, Position::new(1, 1), Direction::Up).moved);
        assert!(try_move(&mut g, Position::new(1, 0), Direction::Right).moved);
        let push = try_move(&mut g, Position::new(2, 0), Direction::Down);
        assert!(push.moved);
        assert!(push.pushed_box);
        assert!(push.entered_target);
        assert!(!push.exited_target);
        assert!(push.solved);
        assert!(g.is_solved());
        assert_eq!(g.get(2, 2), Cell::DoneTarget);
        assert_eq!(g.get(2, 1), Cell::Player);
        assert_eq!(push.changed.len(), 3);
    }

    #[test]
    fn test_push_off_target_exits() {
        let mut g = grid(&["PDGTB"]);
        let outcome = try_move(&mut g, Position::new(0, 0), Direction::Right);
        assert!(outcome.moved && outcome.pushed_box);
        assert!(outcome.exited_target);
        assert!(!outcome.entered_target);
        assert!(!outcome.solved);
        assert_eq!(g.to_string(), "GOBTB");
    }

    #[test]
    fn test_push_from_target_to_target() {
        let mut g = grid(&["PDTA", "GBGG"]);
        let outcome = try_move(&mut g, Position::new(0, 0), Direction::Right);
        assert!(outcome.entered_target && outcome.exited_target);
        assert_eq!(g.to_string(), "GODA\nGBGG");
    }

    #[test]
    fn test_blocked_pushes_never_mutate() {
        // into void, into another box, off the grid
        for rows in [&["PBA", "TGG"][..], &["PBBG", "TTGG"][..], &["GPB", "GGT"][..]] {
            let mut g = grid(rows);
            let before = g.clone();
            let player = g.player_position();
            let outcome = try_move(&mut g, player, Direction::Right);
            assert!(!outcome.moved, "rows {:?}", rows);
            assert_eq!(outcome, MoveOutcome::rejected());
            assert_eq!(g, before);
        }
    }

    #[test]
    fn test_step_into_void_or_edge_rejected() {
        let mut g = grid(&["PAB", "GGT"]);
        let before = g.clone();
        assert!(!try_move(&mut g, Position::new(0, 0), Direction::Right).moved);
        assert!(!try_move(&mut g, Position::new(0, 0), Direction::Up).moved);
        assert!(!try_move(&mut g, Position::new(0, 0), Direction::Left).moved);
        assert_eq!(g, before);
    }

    #[test]
    fn test_wrong_player_position_rejected() {
        let mut g = grid(&["PGB", "GGT"]);
        let before = g.clone();
        assert!(!try_move(&mut g, Position::new(1, 0), Direction::Right).moved);
        assert_eq!(g, before);
    }

    #[test]
    fn test_box_count_preserved() {
        let mut g = grid(&["GGGGG", "GBTBG", "GTPGG", "GGGGG"]);
        let initial_targets = g.target_count();
        let path = "ulrdlldrruuldrrdlu";
        for c in path.chars() {
            let dir = Direction::from_letter(c).unwrap();
            let player = g.player_position();
            try_move(&mut g, player, dir);
            assert_eq!(
                g.count(Cell::Box) + g.count(Cell::DoneTarget),
                initial_targets
            );
            assert_eq!(g.target_count(), initial_targets);
        }
    }

    #[test]
    fn test_direction_letters() {
        for dir in Direction::ALL {
            assert_eq!(Direction::from_letter(dir.letter()), Some(dir));
            assert_eq!(
                Direction::from_letter(dir.letter().to_ascii_uppercase()),
                Some(dir)
            );
        }
        assert_eq!(Direction::from_letter('x'), None);
    }

    #[test]
    fn test_parse_moves() {
        assert_eq!(
            parse_moves("rD l\nU").unwrap(),
            vec![Direction::Right, Direction::Down, Direction::Left, Direction::Up]
        );
        assert!(parse_moves("").unwrap().is_empty());
        assert!(matches!(
            parse_moves("rx"),
            Err(crate::SokobanError::ParseError(_))
        ));
    }
}
