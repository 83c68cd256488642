//! Import from the common XML sokoban level collection format
//!
//! Collections look like
//!
//! ```xml
//! <SokobanLevels>
//!   <LevelCollection>
//!     <Level Id="1" Width="6" Height="3">
//!       <L>  ####</L>
//!       <L>###@.#</L>
//!       <L>#  $ #</L>
//!     </Level>
//!   </LevelCollection>
//! </SokobanLevels>
//! ```
//!
//! using `#` wall, `$` box, `.` target, `*` box on target, `@` player,
//! `+` player on target and space for floor. Spaces before the first wall
//! of a row lie outside the level and become void; later spaces are floor.

use crate::{
    core::{Biome, Cell, Difficulty},
    error::CodecError,
    level::{
        codec::{ROOT, ROW, STRUCTURE},
        document::{parse_document, write_document, Element},
    },
};

/// Native cell for a collection symbol; `Some(None)` is a space, `None` an unknown symbol
fn symbol_cell(symbol: char) -> Option<Option<Cell>> {
    match symbol {
        ' ' => Some(None),
        '#' => Some(Some(Cell::Air)),
        '$' => Some(Some(Cell::Box)),
        '.' => Some(Some(Cell::Target)),
        '*' => Some(Some(Cell::DoneTarget)),
        '@' => Some(Some(Cell::Player)),
        '+' => Some(Some(Cell::PlayerOnTarget)),
        _ => None,
    }
}

/// Convert one collection row to native cells, right-padded with void
pub fn convert_row(row: &str, width: usize, row_index: usize) -> Result<Vec<Cell>, CodecError> {
    let mut cells = Vec::with_capacity(width);
    let mut inside = false;

    for symbol in row.chars() {
        let cell = symbol_cell(symbol).ok_or(CodecError::UnknownSymbol {
            symbol,
            row: row_index,
        })?;
        cells.push(match cell {
            Some(cell) => {
                inside = true;
                cell
            }
            None if inside => Cell::Ground,
            None => Cell::Air,
        });
    }

    if cells.len() > width {
        return Err(CodecError::DimensionMismatch {
            declared_width: width,
            declared_height: 0,
            detail: format!("row {row_index} has {} cells", cells.len()),
        });
    }
    cells.resize(width, Cell::Air);
    Ok(cells)
}

/// Extract level `level_id` from a collection document and re-encode it natively
///
/// The result is not validated as a playable grid; decode it to check.
pub fn import_legacy(
    text: &str,
    level_id: &str,
    biome: Biome,
    difficulty: Difficulty,
) -> Result<String, CodecError> {
    let root = parse_document(text)?;
    let collection = if root.name == "LevelCollection" {
        &root
    } else {
        root.child("LevelCollection")
            .ok_or_else(|| CodecError::MissingElement("LevelCollection".to_string()))?
    };

    let level = collection
        .children_named("Level")
        .find(|l| l.attr("Id").map(str::trim) == Some(level_id.trim()))
        .ok_or_else(|| CodecError::LevelIdNotFound(level_id.to_string()))?;

    let width: usize = level.parse_attr("Width")?;
    let height: usize = level.parse_attr("Height")?;

    if level.children.len() != height {
        return Err(CodecError::DimensionMismatch {
            declared_width: width,
            declared_height: height,
            detail: format!("found {} rows", level.children.len()),
        });
    }

    let mut structure = Element::new(STRUCTURE)
        .with_attr("width", width)
        .with_attr("height", height);
    for (y, row) in level.children.iter().enumerate() {
        let cells = convert_row(&row.text, width, y).map_err(|e| match e {
            CodecError::DimensionMismatch { detail, .. } => CodecError::DimensionMismatch {
                declared_width: width,
                declared_height: height,
                detail,
            },
            other => other,
        })?;
        let letters: String = cells.iter().map(|c| c.letter()).collect();
        structure.children.push(Element::new(ROW).with_text(letters));
    }

    let native = Element::new(ROOT)
        .with_attr("difficulty", difficulty)
        .with_attr("biome", biome)
        .with_attr("name", level_id.trim())
        .with_child(structure);

    Ok(write_document(&native))
}
