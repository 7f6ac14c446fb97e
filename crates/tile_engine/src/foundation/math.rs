//! Math utilities and types
//!
//! Provides the 2D math types used by the simulation and the tile grid.

pub use nalgebra::Vector2;

/// 2D vector type (world units, +Y pointing down the screen)
pub type Vec2 = Vector2<f32>;

/// Horizontal facing of an actor, used to aim projectiles and flip sprites
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum Facing {
    /// Facing toward negative X
    Left,
    /// Facing toward positive X
    #[default]
    Right,
}

impl Facing {
    /// Unit direction along X for this facing
    pub fn direction(self) -> Vec2 {
        match self {
            Self::Left => Vec2::new(-1.0, 0.0),
            Self::Right => Vec2::new(1.0, 0.0),
        }
    }

    /// Facing implied by a horizontal velocity, if it is non-zero
    pub fn from_velocity_x(x: f32) -> Option<Self> {
        if x > 0.0 {
            Some(Self::Right)
        } else if x < 0.0 {
            Some(Self::Left)
        } else {
            None
        }
    }
}

/// Normalize a vector, returning zero when it is shorter than `epsilon`
pub fn normalize_or_zero(v: Vec2, epsilon: f32) -> Vec2 {
    let len = v.norm();
    if len > epsilon {
        v / len
    } else {
        Vec2::zeros()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_facing_from_velocity() {
        assert_eq!(Facing::from_velocity_x(3.0), Some(Facing::Right));
        assert_eq!(Facing::from_velocity_x(-0.5), Some(Facing::Left));
        assert_eq!(Facing::from_velocity_x(0.0), None);
    }

    #[test]
    fn test_normalize_or_zero() {
        let v = normalize_or_zero(Vec2::new(3.0, 4.0), 0.001);
        assert_relative_eq!(v.x, 0.6);
        assert_relative_eq!(v.y, 0.8);

        let tiny = normalize_or_zero(Vec2::new(0.0001, 0.0), 0.001);
        assert_eq!(tiny, Vec2::zeros());
    }
}
