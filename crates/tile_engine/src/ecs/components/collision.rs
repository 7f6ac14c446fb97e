//! Collider component
//!
//! Holds the visual extent used to derive an entity's bounding box, plus
//! the per-entity flag the renderer queries for debug outlines.

use crate::foundation::math::Vec2;
use crate::physics::Rect;

/// Axis-aligned collider extent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    /// Width and height of the bounding box
    pub extent: Vec2,
    /// Whether the renderer may outline this collider
    pub debug_draw: bool,
}

impl Collider {
    /// Create a collider with the given extent, debug outline enabled
    pub fn new(extent: Vec2) -> Self {
        Self {
            extent,
            debug_draw: true,
        }
    }

    /// Bounding box of this collider placed at `position`
    pub fn bounds_at(&self, position: Vec2) -> Rect {
        Rect::from_position_size(position, self.extent)
    }
}
