//! Time-to-live decay system

use crate::ecs::entity::Entity;
use crate::ecs::mask::{ComponentKind, ComponentMask};
use crate::ecs::system::{FrameContext, SystemKind};
use crate::engine::SimulationError;

/// Entities with a countdown
pub const REQUIRED: ComponentMask = ComponentMask::TTL;

/// Tick the countdown once; tombstone the entity when it runs out
pub fn update(entity: &mut Entity, _context: &mut FrameContext<'_>) -> Result<(), SimulationError> {
    let id = entity.id();
    let expired = entity
        .components_mut()
        .ttl_mut()
        .ok_or_else(|| SimulationError::missing(SystemKind::TtlDecay, id, ComponentKind::Ttl))?
        .tick();
    if expired && !entity.is_deleted() {
        log::trace!("Entity {id} expired");
        entity.mark_deleted();
    }
    Ok(())
}
