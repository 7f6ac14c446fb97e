//! Movement-integration system
//!
//! `position += velocity.value * velocity.speed * elapsed` for everything
//! except the primary actor, whose move goes through terrain resolution.

use crate::ecs::entity::Entity;
use crate::ecs::mask::{ComponentKind, ComponentMask};
use crate::ecs::system::{FrameContext, SystemKind};
use crate::engine::SimulationError;

/// Entities that move
pub const REQUIRED: ComponentMask = ComponentMask::POSITION.union(ComponentMask::VELOCITY);

/// Integrate one entity's position
pub fn update(entity: &mut Entity, context: &mut FrameContext<'_>) -> Result<(), SimulationError> {
    let id = entity.id();
    if context.is_actor(id) {
        return Ok(());
    }
    let components = entity.components_mut();
    let step = components
        .velocity()
        .ok_or_else(|| SimulationError::missing(SystemKind::MovementIntegration, id, ComponentKind::Velocity))?
        .linear()
        * context.elapsed;
    let position = components
        .position_mut()
        .ok_or_else(|| SimulationError::missing(SystemKind::MovementIntegration, id, ComponentKind::Position))?;
    position.0 += step;
    Ok(())
}
