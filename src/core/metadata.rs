//! Level metadata tags
//!
//! Biome and difficulty are descriptive: they never change movement rules.
//! Difficulty only decides which pool a random level is drawn from.

use crate::SokobanError;
use serde::{Deserialize, Serialize};

/// Level difficulty pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl std::str::FromStr for Difficulty {
    type Err = SokobanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(SokobanError::ParseError(format!("Invalid difficulty: {}", s))),
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Visual theme of a level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Biome {
    #[default]
    Grass,
    Desert,
    Winter,
    Rock,
    Lava,
}

impl Biome {
    pub const ALL: [Biome; 5] = [
        Biome::Grass,
        Biome::Desert,
        Biome::Winter,
        Biome::Rock,
        Biome::Lava,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Biome::Grass => "Grass",
            Biome::Desert => "Desert",
            Biome::Winter => "Winter",
            Biome::Rock => "Rock",
            Biome::Lava => "Lava",
        }
    }

    /// Next biome in the cycle, used by editors to switch themes
    pub fn next(self) -> Biome {
        match self {
            Biome::Grass => Biome::Desert,
            Biome::Desert => Biome::Winter,
            Biome::Winter => Biome::Rock,
            Biome::Rock => Biome::Lava,
            Biome::Lava => Biome::Grass,
        }
    }
}

impl std::str::FromStr for Biome {
    type Err = SokobanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "grass" => Ok(Biome::Grass),
            "desert" => Ok(Biome::Desert),
            "winter" => Ok(Biome::Winter),
            "rock" => Ok(Biome::Rock),
            "lava" => Ok(Biome::Lava),
            _ => Err(SokobanError::ParseError(format!("Invalid biome: {}", s))),
        }
    }
}

impl std::fmt::Display for Biome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
