//! Cell kinds and the floor/occupant transition table
//!
//! Every [`Cell`] is a floor (ground, target, or void) with at most one
//! occupant on top of it. Moving a piece is done by splitting cells into
//! these two layers and recomposing them through [`Cell::compose`], so
//! the move engine never branches on individual cell kinds.

use serde::{Deserialize, Serialize};

/// Content of a single grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// Empty walkable ground
    Ground,
    /// Impassable void (also used for walls)
    Air,
    /// The player standing on ground
    Player,
    /// A movable box on ground
    Box,
    /// A goal cell
    Target,
    /// A box resting on a target
    DoneTarget,
    /// The player standing on a target
    PlayerOnTarget,
}

/// Bottom layer of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Floor {
    Ground,
    Target,
    Air,
}

/// Piece standing on a floor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Occupant {
    None,
    Player,
    Box,
}

// Indexed by [floor][occupant]; Air only exists without an occupant.
const COMPOSE: [[Option<Cell>; 3]; 3] = [
    [Some(Cell::Ground), Some(Cell::Player), Some(Cell::Box)],
    [
        Some(Cell::Target),
        Some(Cell::PlayerOnTarget),
        Some(Cell::DoneTarget),
    ],
    [Some(Cell::Air), None, None],
];

impl Floor {
    const fn index(self) -> usize {
        match self {
            Floor::Ground => 0,
            Floor::Target => 1,
            Floor::Air => 2,
        }
    }
}

impl Occupant {
    const fn index(self) -> usize {
        match self {
            Occupant::None => 0,
            Occupant::Player => 1,
            Occupant::Box => 2,
        }
    }
}

impl Cell {
    /// All cell kinds in declaration order
    pub const ALL: [Cell; 7] = [
        Cell::Ground,
        Cell::Air,
        Cell::Player,
        Cell::Box,
        Cell::Target,
        Cell::DoneTarget,
        Cell::PlayerOnTarget,
    ];

    /// Look up the cell made of `floor` carrying `occupant`
    ///
    /// Returns `None` for an occupant on void.
    pub const fn compose(floor: Floor, occupant: Occupant) -> Option<Cell> {
        COMPOSE[floor.index()][occupant.index()]
    }

    pub const fn floor(self) -> Floor {
        match self {
            Cell::Ground | Cell::Player | Cell::Box => Floor::Ground,
            Cell::Target | Cell::PlayerOnTarget | Cell::DoneTarget => Floor::Target,
            Cell::Air => Floor::Air,
        }
    }

    pub const fn occupant(self) -> Occupant {
        match self {
            Cell::Player | Cell::PlayerOnTarget => Occupant::Player,
            Cell::Box | Cell::DoneTarget => Occupant::Box,
            Cell::Ground | Cell::Target | Cell::Air => Occupant::None,
        }
    }

    /// The same floor with its occupant replaced
    pub const fn with_occupant(self, occupant: Occupant) -> Option<Cell> {
        Cell::compose(self.floor(), occupant)
    }

    /// The cell left behind once its occupant walks away
    pub const fn vacated(self) -> Cell {
        match self.floor() {
            Floor::Ground => Cell::Ground,
            Floor::Target => Cell::Target,
            Floor::Air => Cell::Air,
        }
    }

    /// Free floor that a player or box may enter
    pub const fn is_walkable(self) -> bool {
        matches!(self, Cell::Ground | Cell::Target)
    }

    pub const fn is_player(self) -> bool {
        matches!(self.occupant(), Occupant::Player)
    }

    /// Box or box on target
    pub const fn is_box(self) -> bool {
        matches!(self.occupant(), Occupant::Box)
    }

    pub const fn is_target(self) -> bool {
        matches!(self.floor(), Floor::Target)
    }

    /// Native single-letter code
    pub const fn letter(self) -> char {
        match self {
            Cell::Ground => 'G',
            Cell::Player => 'P',
            Cell::Air => 'A',
            Cell::Box => 'B',
            Cell::Target => 'T',
            Cell::DoneTarget => 'D',
            Cell::PlayerOnTarget => 'O',
        }
    }

    pub const fn from_letter(letter: char) -> Option<Cell> {
        match letter {
            'G' => Some(Cell::Ground),
            'P' => Some(Cell::Player),
            'A' => Some(Cell::Air),
            'B' => Some(Cell::Box),
            'T' => Some(Cell::Target),
            'D' => Some(Cell::DoneTarget),
            'O' => Some(Cell::PlayerOnTarget),
            _ => None,
        }
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letter())
    }
}
