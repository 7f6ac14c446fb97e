//! Debug-draw system

use crate::ecs::entity::Entity;
use crate::ecs::mask::{ComponentKind, ComponentMask};
use crate::ecs::system::{FrameContext, SystemKind};
use crate::engine::SimulationError;
use crate::render::DrawCommand;

/// Entities with a box to outline
pub const REQUIRED: ComponentMask = ComponentMask::COLLIDER;

/// Queue a bounds outline when both the global toggle and the collider allow it
pub fn update(entity: &mut Entity, context: &mut FrameContext<'_>) -> Result<(), SimulationError> {
    let id = entity.id();
    let collider = entity
        .components()
        .collider()
        .ok_or_else(|| SimulationError::missing(SystemKind::DebugDraw, id, ComponentKind::Collider))?;
    if context.debug_bounds_visible && collider.debug_draw {
        context.draw_list.push(DrawCommand::Outline {
            entity: id,
            bounds: entity.bounds(),
        });
    }
    Ok(())
}
