//! Graphics-dispatch system
//!
//! Picks the actor's animation from its state and forwards a sprite command
//! for every drawable entity. Nothing is drawn here.

use crate::ecs::entity::{Entity, KindPayload};
use crate::ecs::mask::{ComponentKind, ComponentMask};
use crate::ecs::system::{FrameContext, SystemKind};
use crate::engine::SimulationError;
use crate::physics::Rect;
use crate::render::DrawCommand;

/// Drawable entities
pub const REQUIRED: ComponentMask = ComponentMask::GRAPHICS.union(ComponentMask::POSITION);

/// Animation names understood by the actor's sprite sheet
pub mod animations {
    /// Standing still
    pub const IDLE: &str = "Idle";
    /// Walking
    pub const WALK: &str = "Walk";
    /// Swinging the axe
    pub const ATTACK: &str = "Attack";
    /// Shouting fire
    pub const SHOUT: &str = "Shout";
}

/// Queue a sprite for one entity
pub fn update(entity: &mut Entity, context: &mut FrameContext<'_>) -> Result<(), SimulationError> {
    let id = entity.id();
    let kind = entity.kind();
    let bounds = if entity.has_components(ComponentMask::COLLIDER) {
        entity.bounds()
    } else {
        let position = entity
            .components()
            .position()
            .ok_or_else(|| SimulationError::missing(SystemKind::GraphicsDispatch, id, ComponentKind::Position))?;
        Rect::new(position.0, position.0)
    };

    let (payload, components) = entity.parts_mut();
    let moving = components.velocity().is_some_and(|velocity| velocity.is_moving());
    let graphics = components
        .graphics_mut()
        .ok_or_else(|| SimulationError::missing(SystemKind::GraphicsDispatch, id, ComponentKind::Graphics))?;

    if let KindPayload::Player(state) = payload {
        let animation = if state.attacking {
            animations::ATTACK
        } else if state.shouting {
            animations::SHOUT
        } else if moving {
            animations::WALK
        } else {
            animations::IDLE
        };
        graphics.set_animation(animation);
    }

    context.draw_list.push(DrawCommand::Sprite {
        entity: id,
        kind,
        bounds,
        sprite: graphics.sprite.clone(),
        animation: graphics.animation.clone(),
        scale: graphics.scale,
    });
    Ok(())
}
