//! Graphics binding component
//!
//! Names the sprite sheet and current animation an entity should be drawn
//! with. The engine never loads or draws sprites itself; the graphics
//! system only forwards these names to the render collaborator.

/// Sprite sheet and animation selection for an entity
#[derive(Debug, Clone, PartialEq)]
pub struct GraphicsBinding {
    /// Sprite sheet name
    pub sprite: String,
    /// Current animation name
    pub animation: String,
    /// Uniform draw scale
    pub scale: f32,
}

impl GraphicsBinding {
    /// Bind a sprite sheet, starting on its idle animation
    pub fn new(sprite: impl Into<String>) -> Self {
        Self {
            sprite: sprite.into(),
            animation: "Idle".to_string(),
            scale: 1.0,
        }
    }

    /// Switch animation; returns true when it actually changed
    pub fn set_animation(&mut self, animation: &str) -> bool {
        if self.animation == animation {
            return false;
        }
        animation.clone_into(&mut self.animation);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_animation_reports_changes() {
        let mut graphics = GraphicsBinding::new("dwarf");
        assert!(!graphics.set_animation("Idle"));
        assert!(graphics.set_animation("Walk"));
        assert_eq!(graphics.animation, "Walk");
    }
}
