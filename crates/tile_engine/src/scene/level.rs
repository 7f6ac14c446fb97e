//! Level descriptions
//!
//! A [`LevelDescription`] is consumed once when a world is built: its tiles
//! become the terrain grid and each [`SpawnDirective`] becomes an entity.

use thiserror::Error;

use crate::ecs::entity::EntityKind;
use crate::foundation::math::Vec2;
use crate::physics::terrain::Tile;

/// Level validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LevelError {
    /// Zero rows or columns
    #[error("Level has no tiles")]
    Empty,

    /// Tile array does not match the declared size
    #[error("Level declares {expected} tiles but provides {actual}")]
    TileCountMismatch {
        /// Width times height
        expected: usize,
        /// Tiles actually given
        actual: usize,
    },

    /// Non-positive tile dimensions
    #[error("Tile size must be positive")]
    InvalidTileSize,

    /// Spawn cell outside the grid
    #[error("Spawn of {kind} at ({col}, {row}) lies outside the grid")]
    SpawnOutOfBounds {
        /// Kind being spawned
        kind: EntityKind,
        /// Column
        col: usize,
        /// Row
        row: usize,
    },

    /// No player spawn
    #[error("Level has no player spawn")]
    MissingActor,

    /// More than one player spawn
    #[error("Level has {0} player spawns, expected one")]
    MultipleActors(usize),
}

/// Place an entity of `kind` in cell `(col, row)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnDirective {
    /// What to spawn
    pub kind: EntityKind,
    /// Grid column
    pub col: usize,
    /// Grid row
    pub row: usize,
}

impl SpawnDirective {
    /// Create a directive
    pub fn new(kind: EntityKind, col: usize, row: usize) -> Self {
        Self { kind, col, row }
    }

    /// Top-left position for a box of `extent` spawned by this directive.
    ///
    /// The actor is centred horizontally and stands on the bottom of its
    /// cell; everything else is centred in the cell.
    pub fn placement(&self, tile_size: Vec2, extent: Vec2) -> Vec2 {
        let cell = Vec2::new(self.col as f32 * tile_size.x, self.row as f32 * tile_size.y);
        let gap = tile_size - extent;
        match self.kind {
            EntityKind::Player => cell + Vec2::new(gap.x * 0.5, gap.y),
            _ => cell + gap * 0.5,
        }
    }
}

/// Tiles plus spawns for one level
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LevelDescription {
    /// Columns
    pub width: usize,
    /// Rows
    pub height: usize,
    /// Row-major tiles
    pub tiles: Vec<Tile>,
    /// Entities to create
    pub spawns: Vec<SpawnDirective>,
}

impl LevelDescription {
    /// Check sizes, spawn bounds and the single-player rule
    pub fn validate(&self) -> Result<(), LevelError> {
        if self.width == 0 || self.height == 0 {
            return Err(LevelError::Empty);
        }
        if self.tiles.len() != self.width * self.height {
            return Err(LevelError::TileCountMismatch {
                expected: self.width * self.height,
                actual: self.tiles.len(),
            });
        }
        if let Some(spawn) = self
            .spawns
            .iter()
            .find(|spawn| spawn.col >= self.width || spawn.row >= self.height)
        {
            return Err(LevelError::SpawnOutOfBounds {
                kind: spawn.kind,
                col: spawn.col,
                row: spawn.row,
            });
        }
        match self.spawns.iter().filter(|spawn| spawn.kind == EntityKind::Player).count() {
            0 => Err(LevelError::MissingActor),
            1 => Ok(()),
            n => Err(LevelError::MultipleActors(n)),
        }
    }
}
