//! Text level files
//!
//! One character per cell, one line per row:
//!
//! | glyph | cell                  |
//! |-------|-----------------------|
//! | `.`   | floor                 |
//! | `w`   | wall                  |
//! | `x`   | log on floor          |
//! | `p`   | potion on floor       |
//! | `*`   | player on floor       |
//! | `g`   | goal on floor         |
//! | `m`   | mushroom on floor     |
//!
//! Unknown glyphs become floor with a warning. Blank lines are ignored.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tile_engine::ecs::EntityKind;
use tile_engine::physics::Tile;
use tile_engine::scene::{LevelDescription, LevelError, SpawnDirective};

/// Level file errors
#[derive(Error, Debug)]
pub enum LevelFileError {
    /// The file could not be read
    #[error("Failed to read level {path}: {source}")]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// Rows of different lengths
    #[error("Row {row} has {actual} cells, expected {expected}")]
    RaggedRow {
        /// Zero-based row
        row: usize,
        /// Width of the first row
        expected: usize,
        /// Width of this row
        actual: usize,
    },

    /// The parsed level failed validation
    #[error("Invalid level: {0}")]
    Invalid(#[from] LevelError),
}

/// Parse level text into a validated description
pub fn parse_level(text: &str) -> Result<LevelDescription, LevelFileError> {
    let rows: Vec<&str> = text
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .collect();
    let width = rows.first().map_or(0, |row| row.chars().count());

    let mut level = LevelDescription {
        width,
        height: rows.len(),
        tiles: Vec::with_capacity(width * rows.len()),
        spawns: Vec::new(),
    };
    for (row, line) in rows.iter().enumerate() {
        let actual = line.chars().count();
        if actual != width {
            return Err(LevelFileError::RaggedRow {
                row,
                expected: width,
                actual,
            });
        }
        for (col, glyph) in line.chars().enumerate() {
            let (tile, kind) = decode(glyph, col, row);
            level.tiles.push(tile);
            if let Some(kind) = kind {
                level.spawns.push(SpawnDirective::new(kind, col, row));
            }
        }
    }

    level.validate()?;
    Ok(level)
}

/// Read and parse a level file
pub fn load_level_file(path: impl AsRef<Path>) -> Result<LevelDescription, LevelFileError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| LevelFileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let level = parse_level(&text)?;
    log::debug!(
        "Parsed {} ({}x{}, {} spawns)",
        path.display(),
        level.width,
        level.height,
        level.spawns.len()
    );
    Ok(level)
}

fn decode(glyph: char, col: usize, row: usize) -> (Tile, Option<EntityKind>) {
    match glyph {
        '.' => (Tile::Floor, None),
        'w' => (Tile::Wall, None),
        'x' => (Tile::Floor, Some(EntityKind::Log)),
        'p' => (Tile::Floor, Some(EntityKind::Potion)),
        '*' => (Tile::Floor, Some(EntityKind::Player)),
        'g' => (Tile::Floor, Some(EntityKind::Goal)),
        'm' => (Tile::Floor, Some(EntityKind::Mushroom)),
        other => {
            log::warn!("Unknown level glyph {other:?} at ({col}, {row}), using floor");
            (Tile::Floor, None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_tiles_and_spawns() {
        let level = parse_level("wwww\nw*pw\nwxgw\nwwww\n").unwrap();
        assert_eq!((level.width, level.height), (4, 4));
        assert_eq!(level.tiles[0], Tile::Wall);
        assert_eq!(level.tiles[5], Tile::Floor);
        assert_eq!(
            level.spawns,
            vec![
                SpawnDirective::new(EntityKind::Player, 1, 1),
                SpawnDirective::new(EntityKind::Potion, 2, 1),
                SpawnDirective::new(EntityKind::Log, 1, 2),
                SpawnDirective::new(EntityKind::Goal, 2, 2),
            ]
        );
    }

    #[test]
    fn test_unknown_glyph_becomes_floor() {
        let level = parse_level("*?.\n").unwrap();
        assert_eq!(level.tiles, vec![Tile::Floor; 3]);
        assert_eq!(level.spawns.len(), 1);
    }

    #[test]
    fn test_ragged_rows_are_rejected() {
        assert!(matches!(
            parse_level("*..\n..\n"),
            Err(LevelFileError::RaggedRow {
                row: 1,
                expected: 3,
                actual: 2
            })
        ));
    }

    #[test]
    fn test_level_without_player_is_rejected() {
        assert!(matches!(
            parse_level("..m\n"),
            Err(LevelFileError::Invalid(LevelError::MissingActor))
        ));
    }

    #[test]
    fn test_blank_input_is_empty() {
        assert!(matches!(parse_level("\n\n"), Err(LevelFileError::Invalid(LevelError::Empty))));
    }
}
