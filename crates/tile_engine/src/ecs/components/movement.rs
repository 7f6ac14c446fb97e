//! Velocity component
//!
//! Velocity is stored as a direction-ish `value` and a scalar `speed`; the
//! effective world velocity is their product. Player input writes `value`
//! directly in world units with a speed of 1, while chasing hazards keep a
//! unit direction and a fixed speed.

use crate::foundation::math::Vec2;

/// Velocity of a moving entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Velocity {
    /// Direction or raw velocity, scaled by `speed`
    pub value: Vec2,
    /// Scalar multiplier applied to `value`
    pub speed: f32,
}

impl Velocity {
    /// Create a velocity from a value and speed
    pub fn new(value: Vec2, speed: f32) -> Self {
        Self { value, speed }
    }

    /// A stationary velocity that will move at `speed` once given a direction
    pub fn at_rest(speed: f32) -> Self {
        Self {
            value: Vec2::zeros(),
            speed,
        }
    }

    /// Effective world velocity in units per second
    pub fn linear(&self) -> Vec2 {
        self.value * self.speed
    }

    /// Whether the entity is moving at all
    pub fn is_moving(&self) -> bool {
        self.linear() != Vec2::zeros()
    }
}

impl Default for Velocity {
    fn default() -> Self {
        Self::at_rest(1.0)
    }
}
