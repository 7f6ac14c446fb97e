//! Axis-aligned bounding boxes
//!
//! Screen-space convention: X grows to the right, Y grows downward, so
//! `min` is the top-left corner and `max` the bottom-right one.

use crate::foundation::math::Vec2;

/// An axis-aligned rectangle in world space
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Top-left corner
    pub min: Vec2,
    /// Bottom-right corner
    pub max: Vec2,
}

impl Rect {
    /// Create a rectangle from its corners
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Create a rectangle from a top-left position and a size
    pub fn from_position_size(position: Vec2, size: Vec2) -> Self {
        Self {
            min: position,
            max: position + size,
        }
    }

    /// Left edge
    pub fn left(&self) -> f32 {
        self.min.x
    }

    /// Right edge
    pub fn right(&self) -> f32 {
        self.max.x
    }

    /// Top edge
    pub fn top(&self) -> f32 {
        self.min.y
    }

    /// Bottom edge
    pub fn bottom(&self) -> f32 {
        self.max.y
    }

    /// Width (never negative for well-formed rectangles)
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// Height
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Size as a vector
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Center point
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Check whether two rectangles overlap or touch.
    ///
    /// Shared edges count as contact, so an actor resting against a tile
    /// or a pickup still registers.
    pub fn intersects(&self, other: &Rect) -> bool {
        !(self.max.x < other.min.x
            || self.min.x > other.max.x
            || self.max.y < other.min.y
            || self.min.y > other.max.y)
    }

    /// Check whether a point lies inside the rectangle (edges included)
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }

    /// Smallest rectangle covering both
    pub fn union(&self, other: &Rect) -> Rect {
        Rect {
            min: Vec2::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            max: Vec2::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        }
    }
}
