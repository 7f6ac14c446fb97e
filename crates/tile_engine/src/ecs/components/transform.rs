//! Position component
//!
//! World position of an entity's top-left corner. The bounding box is
//! derived from this plus the collider extent by the collider system.

use crate::foundation::math::Vec2;

/// World-space position (top-left corner, +Y down)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position(pub Vec2);

impl Position {
    /// Create a position from coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self(Vec2::new(x, y))
    }

    /// X coordinate
    pub fn x(&self) -> f32 {
        self.0.x
    }

    /// Y coordinate
    pub fn y(&self) -> f32 {
        self.0.y
    }
}

impl From<Vec2> for Position {
    fn from(value: Vec2) -> Self {
        Self(value)
    }
}
