//! Gameplay-collision system and the default collision responses
//!
//! The system compares the actor snapshot against hazards and the goal, and
//! hazards against live projectiles. Pickups and obstacles are left to the
//! collision callbacks installed by [`install_default_responses`], which run
//! in the broad pass after terrain resolution.

use crate::audio::sounds;
use crate::ecs::entity::{Entity, EntityKind, KindPayload};
use crate::ecs::mask::{ComponentKind, ComponentMask};
use crate::ecs::system::{FrameCommand, FrameContext, SystemKind};
use crate::engine::SimulationError;
use crate::events::GameEvent;
use crate::physics::{CollisionCallbacks, CollisionContext};

/// Entities with a box
pub const REQUIRED: ComponentMask = ComponentMask::COLLIDER;

/// Respond to overlaps for one entity
pub fn update(entity: &mut Entity, context: &mut FrameContext<'_>) -> Result<(), SimulationError> {
    let id = entity.id();
    if entity.is_deleted() || context.is_actor(id) {
        return Ok(());
    }
    let bounds = entity.bounds();
    let touches_actor = context
        .actor
        .is_some_and(|actor| actor.bounds.intersects(&bounds));

    match entity.kind() {
        EntityKind::Mushroom => {
            if touches_actor {
                context.defer(FrameCommand::DamageActor(context.config.tuning.hazard_contact_damage));
            }
            let hit = context
                .projectiles
                .iter()
                .find(|(fire, fire_bounds)| !context.spent_projectiles.contains(fire) && fire_bounds.intersects(&bounds))
                .map(|(fire, _)| *fire);
            if let Some(fire) = hit {
                context.spent_projectiles.insert(fire);
                context.defer(FrameCommand::Delete(fire));
                let damage = context.config.tuning.projectile_damage;
                let health = entity
                    .components_mut()
                    .health_mut()
                    .ok_or_else(|| SimulationError::missing(SystemKind::GameplayCollision, id, ComponentKind::Health))?;
                let remaining = health.change(-damage);
                log::debug!("Mushroom {id} burned by {fire}, {remaining} health left");
                if remaining == 0 {
                    entity.mark_deleted();
                }
            }
        }
        EntityKind::Goal if touches_actor => {
            context.defer(FrameCommand::LevelTransition);
        }
        _ => {}
    }
    Ok(())
}

/// Register the standard potion and log responses
pub fn install_default_responses(callbacks: &mut CollisionCallbacks) {
    callbacks.register(EntityKind::Potion, collect_potion);
    callbacks.register(EntityKind::Log, chop_log);
}

fn collect_potion(context: &mut CollisionContext<'_>) {
    let KindPayload::Potion { restores } = *context.other.payload() else {
        return;
    };
    if let Some(health) = context.actor.components_mut().health_mut() {
        let current = health.change(restores);
        log::info!("Potion restores {restores}, actor health {current}");
    }
    context.services.notify(GameEvent::PotionCollected);
    context.services.play(sounds::PICKUP);
    context.other.mark_deleted();
}

fn chop_log(context: &mut CollisionContext<'_>) {
    let KindPayload::Log { wood } = *context.other.payload() else {
        return;
    };
    let max_wood = context.tuning.max_wood;
    let KindPayload::Player(state) = context.actor.payload_mut() else {
        return;
    };
    if !state.attacking {
        return;
    }
    state.wood = state.wood.saturating_add(wood).min(max_wood);
    log::info!("Log chopped, wood {}", state.wood);
    context.other.mark_deleted();
}
