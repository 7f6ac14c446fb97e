//! Terrain grid and actor-vs-terrain resolution
//!
//! The grid is a row-major array of tiles addressed by `(col, row)`, where
//! `col = floor(x / tile_width)` and `row = floor(y / tile_height)`. Cells
//! outside the grid are never solid and are never indexed.
//!
//! Resolution sweeps the actor's box one axis at a time: X first, then Y
//! using the corrected X. On each axis the cells between the box's leading
//! edge before and after the move are scanned nearest-first, and the first
//! solid tile the swept box touches stops the actor flush against it.

use serde::{Deserialize, Serialize};

use crate::ecs::components::Velocity;
use crate::foundation::math::Vec2;
use crate::physics::Rect;
use crate::scene::level::LevelError;

/// One grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tile {
    /// Passable ground
    #[default]
    Floor,
    /// Solid wall
    Wall,
}

impl Tile {
    /// Whether actors are blocked by this tile
    pub fn is_solid(self) -> bool {
        matches!(self, Self::Wall)
    }
}

/// Static tile grid
#[derive(Debug, Clone, PartialEq)]
pub struct TileGrid {
    width: usize,
    height: usize,
    tile_size: Vec2,
    tiles: Vec<Tile>,
}

impl TileGrid {
    /// Build a grid from row-major tiles
    pub fn new(width: usize, height: usize, tile_size: Vec2, tiles: Vec<Tile>) -> Result<Self, LevelError> {
        if width == 0 || height == 0 {
            return Err(LevelError::Empty);
        }
        if tiles.len() != width * height {
            return Err(LevelError::TileCountMismatch {
                expected: width * height,
                actual: tiles.len(),
            });
        }
        if tile_size.x <= 0.0 || tile_size.y <= 0.0 {
            log::warn!("Tile size {}x{} is not positive", tile_size.x, tile_size.y);
            return Err(LevelError::InvalidTileSize);
        }
        Ok(Self {
            width,
            height,
            tile_size,
            tiles,
        })
    }

    /// Grid with every cell set to `tile`
    pub fn filled(width: usize, height: usize, tile_size: Vec2, tile: Tile) -> Result<Self, LevelError> {
        Self::new(width, height, tile_size, vec![tile; width * height])
    }

    /// Columns
    pub fn width(&self) -> usize {
        self.width
    }

    /// Rows
    pub fn height(&self) -> usize {
        self.height
    }

    /// Size of one cell
    pub fn tile_size(&self) -> Vec2 {
        self.tile_size
    }

    fn slot(&self, col: i64, row: i64) -> Option<usize> {
        let col = usize::try_from(col).ok()?;
        let row = usize::try_from(row).ok()?;
        (col < self.width && row < self.height).then_some(row * self.width + col)
    }

    /// Tile at `(col, row)`, or `None` outside the grid
    pub fn tile(&self, col: i64, row: i64) -> Option<Tile> {
        self.slot(col, row).map(|slot| self.tiles[slot])
    }

    /// Overwrite a tile. Returns false outside the grid.
    pub fn set_tile(&mut self, col: i64, row: i64, tile: Tile) -> bool {
        match self.slot(col, row) {
            Some(slot) => {
                self.tiles[slot] = tile;
                true
            }
            None => false,
        }
    }

    /// Whether `(col, row)` is inside the grid and solid
    pub fn is_solid(&self, col: i64, row: i64) -> bool {
        self.tile(col, row).is_some_and(Tile::is_solid)
    }

    /// World-space bounds of a cell
    pub fn tile_bounds(&self, col: i64, row: i64) -> Rect {
        let min = Vec2::new(col as f32 * self.tile_size.x, row as f32 * self.tile_size.y);
        Rect::from_position_size(min, self.tile_size)
    }

    /// Cell containing a world point (floor division)
    pub fn cell_of(&self, point: Vec2) -> (i64, i64) {
        (
            (point.x / self.tile_size.x).floor() as i64,
            (point.y / self.tile_size.y).floor() as i64,
        )
    }

    /// Every `(col, row)` holding a passable tile, row-major
    pub fn floor_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.tiles
            .iter()
            .enumerate()
            .filter(|(_, tile)| !tile.is_solid())
            .map(|(slot, _)| (slot % self.width, slot / self.width))
    }
}

/// Result of resolving one actor move against the grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerrainResolution {
    /// Final top-left position
    pub position: Vec2,
    /// Cell that stopped horizontal movement
    pub blocked_x: Option<(i64, i64)>,
    /// Cell that stopped vertical movement
    pub blocked_y: Option<(i64, i64)>,
}

#[derive(Clone, Copy)]
enum Axis {
    X,
    Y,
}

/// Move an actor box through the grid for `dt` seconds.
///
/// `position` is the box's top-left corner and `extent` its size. Any axis
/// that gets blocked has its component of `velocity.value` set to zero.
/// An axis that does not move this step (zero velocity or zero `dt`) is
/// left untouched, velocity included.
pub fn resolve_actor(
    grid: &TileGrid,
    position: Vec2,
    extent: Vec2,
    velocity: &mut Velocity,
    dt: f32,
) -> TerrainResolution {
    let delta = velocity.linear() * dt;
    let mut resolved = position;

    let blocked_x = if delta.x == 0.0 {
        None
    } else {
        let (x, blocked) = sweep_axis(grid, Axis::X, resolved, extent, delta.x);
        resolved.x = x;
        blocked
    };
    if blocked_x.is_some() {
        velocity.value.x = 0.0;
    }

    let blocked_y = if delta.y == 0.0 {
        None
    } else {
        let (y, blocked) = sweep_axis(grid, Axis::Y, resolved, extent, delta.y);
        resolved.y = y;
        blocked
    };
    if blocked_y.is_some() {
        velocity.value.y = 0.0;
    }

    TerrainResolution {
        position: resolved,
        blocked_x,
        blocked_y,
    }
}

/// Sweep the box along one axis by `delta`, returning the resolved
/// coordinate on that axis and the blocking cell, if any.
fn sweep_axis(grid: &TileGrid, axis: Axis, position: Vec2, extent: Vec2, delta: f32) -> (f32, Option<(i64, i64)>) {
    // Work in (main, cross) coordinates so both axes share one code path.
    let (main, cross, size_main, size_cross, tile_main, tile_cross, limit_main, limit_cross) = match axis {
        Axis::X => (
            position.x,
            position.y,
            extent.x,
            extent.y,
            grid.tile_size.x,
            grid.tile_size.y,
            grid.width as i64,
            grid.height as i64,
        ),
        Axis::Y => (
            position.y,
            position.x,
            extent.y,
            extent.x,
            grid.tile_size.y,
            grid.tile_size.x,
            grid.height as i64,
            grid.width as i64,
        ),
    };

    let target = main + delta;
    let tentative = match axis {
        Axis::X => Rect::from_position_size(Vec2::new(target, cross), extent),
        Axis::Y => Rect::from_position_size(Vec2::new(cross, target), extent),
    };
    let swept = Rect::from_position_size(position, extent).union(&tentative);

    // Cells spanned across the axis. The far edge is exclusive so a box
    // resting exactly on a cell boundary does not reach into the next cell.
    let cross_first = ((cross / tile_cross).floor() as i64).max(0);
    let cross_last = (((cross + size_cross) / tile_cross).ceil() as i64 - 1).min(limit_cross - 1);

    // Cells between the leading edge before and after the move, nearest first.
    let lanes: Box<dyn Iterator<Item = i64>> = if delta > 0.0 {
        let first = ((main + size_main) / tile_main).ceil() as i64;
        let last = ((target + size_main) / tile_main).floor() as i64;
        Box::new(first.max(0)..=last.min(limit_main - 1))
    } else {
        let first = (main / tile_main).floor() as i64 - 1;
        let last = (target / tile_main).ceil() as i64 - 1;
        Box::new((last.max(0)..=first.min(limit_main - 1)).rev())
    };

    for lane in lanes {
        for across in cross_first..=cross_last {
            let (col, row) = match axis {
                Axis::X => (lane, across),
                Axis::Y => (across, lane),
            };
            if !grid.is_solid(col, row) {
                continue;
            }
            let tile = grid.tile_bounds(col, row);
            if !swept.intersects(&tile) {
                continue;
            }
            let clamped = match (axis, delta > 0.0) {
                (Axis::X, true) => tile.left() - size_main,
                (Axis::X, false) => tile.right(),
                (Axis::Y, true) => tile.top() - size_main,
                (Axis::Y, false) => tile.bottom(),
            };
            log::trace!("Terrain clamp at cell ({col}, {row}): {target} -> {clamped}");
            return (clamped, Some((col, row)));
        }
    }
    (target, None)
}
