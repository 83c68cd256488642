//! Level name to file name conversion

use crate::{Result, SokobanError};
use rustc_hash::FxHasher;
use std::hash::Hasher;

/// Separates the readable part of a stem from its name hash. Never survives
/// the readable conversion, so plain stems cannot collide with hashed ones.
const HASH_MARK: char = '#';

/// Filesystem-safe stem for a level name, distinct for distinct names
///
/// "level-01" -> "level-01"; names that need rewriting keep a readable
/// prefix plus a hash of the exact name: "Zürich" -> "Zurich#<hash>"
pub fn file_stem(level_name: &str) -> String {
    let readable = readable_stem(level_name);
    if readable == level_name {
        return readable;
    }

    let mut hasher = FxHasher::default();
    hasher.write(level_name.as_bytes());
    format!("{readable}{HASH_MARK}{:08x}", hasher.finish() as u32)
}

fn readable_stem(level_name: &str) -> String {
    let ascii = deunicode::deunicode(level_name.trim());
    let stem: String = ascii
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | HASH_MARK => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    match stem.trim_matches('.') {
        "" => "_".to_string(),
        s => s.to_string(),
    }
}

/// Check a name typed into an editor before it becomes a file
pub fn validate_level_name(name: &str) -> Result<()> {
    let trimmed = name.trim();
    let invalid = trimmed.is_empty()
        || trimmed.chars().any(|c| {
            c.is_control() || matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|')
        })
        || trimmed.chars().all(|c| c == '.');
    if invalid {
        return Err(SokobanError::InvalidLevelName(name.to_string()));
    }
    Ok(())
}
