//! Mapping from editor/UI identifiers to cell kinds
//!
//! Editors select the element to paint by a widget identifier. The mapping is
//! an explicit table built once, so no identifier is ever parsed as a type name.

use crate::core::Cell;
use rustc_hash::FxHashMap;

const UI_IDS: [(&str, Cell); 7] = [
    ("ground", Cell::Ground),
    ("air", Cell::Air),
    ("player", Cell::Player),
    ("box", Cell::Box),
    ("target", Cell::Target),
    ("done_target", Cell::DoneTarget),
    ("player_on_target", Cell::PlayerOnTarget),
];

/// Lookup table from UI identifier to [`Cell`]
#[derive(Debug, Clone)]
pub struct Palette {
    by_id: FxHashMap<&'static str, Cell>,
}

impl Palette {
    pub fn new() -> Self {
        Palette {
            by_id: UI_IDS.iter().copied().collect(),
        }
    }

    /// Cell for a UI identifier (case-insensitive)
    pub fn cell(&self, ui_id: &str) -> Option<Cell> {
        self.by_id.get(ui_id.trim().to_lowercase().as_str()).copied()
    }

    /// Identifier for a cell kind
    pub fn ui_id(&self, cell: Cell) -> &'static str {
        UI_IDS
            .iter()
            .find(|(_, c)| *c == cell)
            .map(|(id, _)| *id)
            .unwrap_or("air")
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_covers_every_cell() {
        let palette = Palette::new();
        assert_eq!(palette.len(), Cell::ALL.len());
        for cell in Cell::ALL {
            assert_eq!(palette.cell(palette.ui_id(cell)), Some(cell));
        }
    }

    #[test]
    fn test_palette_lookup() {
        let palette = Palette::new();
        assert_eq!(palette.cell("Box"), Some(Cell::Box));
        assert_eq!(palette.cell(" done_target "), Some(Cell::DoneTarget));
        assert_eq!(palette.cell("BoxButton"), None);
    }
}
