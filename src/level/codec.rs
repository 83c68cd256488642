//! Native level format
//!
//! ```xml
//! <?xml version="1.0"?>
//! <SokobanLevel difficulty="Easy" biome="Grass" name="first">
//!   <LevelStructure width="3" height="1">
//!     <Row>PBT</Row>
//!   </LevelStructure>
//! </SokobanLevel>
//! ```
//!
//! Rows use the single-letter cell codes of [`Cell::letter`].

use crate::{
    core::{Biome, Cell, Difficulty, Grid, UNNAMED_LEVEL},
    error::CodecError,
    level::document::{parse_document, write_document, Element},
};
use std::path::Path;

pub const ROOT: &str = "SokobanLevel";
pub const STRUCTURE: &str = "LevelStructure";
pub const ROW: &str = "Row";

/// Encode a grid as a native level document
pub fn encode(grid: &Grid) -> String {
    write_document(&to_element(grid))
}

/// Decode a native level document
pub fn decode(text: &str) -> Result<Grid, CodecError> {
    from_element(&parse_document(text)?)
}

/// Root element for `grid`, for formats that extend the level document
pub fn to_element(grid: &Grid) -> Element {
    let mut structure = Element::new(STRUCTURE)
        .with_attr("width", grid.width())
        .with_attr("height", grid.height());
    for row in grid.rows() {
        let letters: String = row.iter().map(|c| c.letter()).collect();
        structure.children.push(Element::new(ROW).with_text(letters));
    }

    Element::new(ROOT)
        .with_attr("difficulty", grid.difficulty())
        .with_attr("biome", grid.biome())
        .with_attr("name", grid.name())
        .with_child(structure)
}

/// Build a grid from a parsed level root element
pub fn from_element(root: &Element) -> Result<Grid, CodecError> {
    if root.name != ROOT {
        return Err(CodecError::MissingElement(ROOT.to_string()));
    }

    let biome: Biome = root.parse_attr("biome")?;
    let difficulty: Difficulty = root.parse_attr("difficulty")?;
    let name = root.attr("name").unwrap_or(UNNAMED_LEVEL);

    let structure = root
        .child(STRUCTURE)
        .ok_or_else(|| CodecError::MissingElement(STRUCTURE.to_string()))?;
    let width: usize = structure.parse_attr("width")?;
    let height: usize = structure.parse_attr("height")?;

    let mismatch = |detail: String| CodecError::DimensionMismatch {
        declared_width: width,
        declared_height: height,
        detail,
    };

    let rows: Vec<&str> = structure.children_named(ROW).map(|r| r.text.trim()).collect();
    if rows.len() != height {
        return Err(mismatch(format!("found {} rows", rows.len())));
    }

    let mut cells = Vec::with_capacity(height);
    for (y, row) in rows.iter().enumerate() {
        let len = row.chars().count();
        if len != width {
            return Err(mismatch(format!("row {y} has {len} cells")));
        }
        let line = row
            .chars()
            .map(|code| Cell::from_letter(code).ok_or(CodecError::UnknownCellCode { code, row: y }))
            .collect::<Result<Vec<_>, _>>()?;
        cells.push(line);
    }

    Ok(Grid::new(name, cells, biome, difficulty)?)
}

/// Level name derived from a file path (its stem)
pub fn name_from_path(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(str::to_string)
}

/// Level file helpers
pub struct LevelFile;

impl LevelFile {
    /// Load a level; a document without a `name` attribute is named after the file
    pub fn load(path: &Path) -> crate::Result<Grid> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents, path)
    }

    /// Decode `contents` that were read from `path`
    pub fn parse(contents: &str, path: &Path) -> crate::Result<Grid> {
        let root = parse_document(contents).map_err(|source| crate::SokobanError::LevelLoad {
            path: path.to_path_buf(),
            source,
        })?;
        let mut grid = from_element(&root).map_err(|source| crate::SokobanError::LevelLoad {
            path: path.to_path_buf(),
            source,
        })?;
        if root.attr("name").is_none() {
            if let Some(stem) = name_from_path(path) {
                grid.set_name(stem);
            }
        }
        Ok(grid)
    }

    pub fn save(path: &Path, grid: &Grid) -> crate::Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, encode(grid))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::grid::rows_from_letters;

    fn sample() -> Grid {
        Grid::new(
            "sample",
            rows_from_letters(&["AGGGA", "GPBTG", "GDGTA", "AABAA"]),
            Biome::Winter,
            Difficulty::Hard,
        )
        .unwrap()
    }

    #[test]
    fn test_encode_layout() {
        let text = encode(&sample());
        let expected = r#"<?xml version="1.0"?>
<SokobanLevel difficulty="Hard" biome="Winter" name="sample">
  <LevelStructure width="5" height="4">
    <Row>AGGGA</Row>
    <Row>GPBTG</Row>
    <Row>GDGTA</Row>
    <Row>AABAA</Row>
  </LevelStructure>
</SokobanLevel>
"#;
        similar_asserts::assert_eq!(text.as_str(), expected);
    }

    #[test]
    fn test_decode_encoded() {
        let grid = sample();
        let decoded = decode(&encode(&grid)).unwrap();
        assert_eq!(decoded, grid);
    }

    #[test]
    fn test_decode_without_name_or_declaration() {
        let text = r#"<SokobanLevel difficulty="medium" biome="DESERT">
            <LevelStructure width="3" height="1"><Row> PBT </Row></LevelStructure>
        </SokobanLevel>"#;
        let grid = decode(text).unwrap();
        assert_eq!(grid.name(), UNNAMED_LEVEL);
        assert_eq!(grid.difficulty(), Difficulty::Medium);
        assert_eq!(grid.biome(), Biome::Desert);
        assert_eq!(grid.to_string(), "PBT");
    }

    #[test]
    fn test_bad_biome() {
        let text = r#"<SokobanLevel difficulty="Easy" biome="Jungle">
            <LevelStructure width="3" height="1"><Row>PBT</Row></LevelStructure>
        </SokobanLevel>"#;
        assert!(matches!(
            decode(text),
            Err(CodecError::MalformedAttribute { ref attribute, .. }) if attribute == "biome"
        ));
    }

    #[test]
    fn test_missing_height() {
        let text = r#"<SokobanLevel difficulty="Easy" biome="Grass">
            <LevelStructure width="3"><Row>PBT</Row></LevelStructure>
        </SokobanLevel>"#;
        assert!(matches!(
            decode(text),
            Err(CodecError::MalformedAttribute { ref attribute, value: None, .. }) if attribute == "height"
        ));
    }

    #[test]
    fn test_dimension_mismatch() {
        let wide = r#"<SokobanLevel difficulty="Easy" biome="Grass">
            <LevelStructure width="4" height="1"><Row>PBT</Row></LevelStructure>
        </SokobanLevel>"#;
        assert!(matches!(decode(wide), Err(CodecError::DimensionMismatch { .. })));

        let tall = r#"<SokobanLevel difficulty="Easy" biome="Grass">
            <LevelStructure width="3" height="2"><Row>PBT</Row></LevelStructure>
        </SokobanLevel>"#;
        assert!(matches!(decode(tall), Err(CodecError::DimensionMismatch { .. })));
    }

    #[test]
    fn test_unknown_code() {
        let text = r#"<SokobanLevel difficulty="Easy" biome="Grass">
            <LevelStructure width="3" height="1"><Row>PBX</Row></LevelStructure>
        </SokobanLevel>"#;
        assert_eq!(
            decode(text),
            Err(CodecError::UnknownCellCode { code: 'X', row: 0 })
        );
    }

    #[test]
    fn test_invalid_grid_propagates() {
        let text = r#"<SokobanLevel difficulty="Easy" biome="Grass">
            <LevelStructure width="3" height="1"><Row>PBB</Row></LevelStructure>
        </SokobanLevel>"#;
        assert!(matches!(decode(text), Err(CodecError::Grid(_))));
    }

    #[test]
    fn test_wrong_root() {
        assert_eq!(
            decode("<Ranking/>"),
            Err(CodecError::MissingElement(ROOT.to_string()))
        );
    }
}
