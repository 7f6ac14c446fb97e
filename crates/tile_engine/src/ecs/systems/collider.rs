//! Collider-refresh system

use crate::ecs::entity::Entity;
use crate::ecs::mask::{ComponentKind, ComponentMask};
use crate::ecs::system::{FrameContext, SystemKind};
use crate::engine::SimulationError;

/// Entities with a box to keep current
pub const REQUIRED: ComponentMask = ComponentMask::POSITION.union(ComponentMask::COLLIDER);

/// Recompute the bounding box from position and collider extent
pub fn update(entity: &mut Entity, _context: &mut FrameContext<'_>) -> Result<(), SimulationError> {
    let id = entity.id();
    let components = entity.components();
    let position = components
        .position()
        .ok_or_else(|| SimulationError::missing(SystemKind::ColliderRefresh, id, ComponentKind::Position))?;
    let collider = components
        .collider()
        .ok_or_else(|| SimulationError::missing(SystemKind::ColliderRefresh, id, ComponentKind::Collider))?;
    let bounds = collider.bounds_at(position.0);
    entity.set_bounds(bounds);
    Ok(())
}
