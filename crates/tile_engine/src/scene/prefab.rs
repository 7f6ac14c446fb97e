//! Entity prefabs
//!
//! Builds each entity kind with its standard components from the
//! simulation configuration.

use crate::core::SimulationConfig;
use crate::ecs::components::{Collider, GraphicsBinding, Health, InputBinding, TimeToLive, Velocity};
use crate::ecs::entity::{ActorState, Entity, EntityBuilder, EntityKind, KindPayload};
use crate::engine::SimulationError;
use crate::foundation::math::{Facing, Vec2};

/// Bounding box size used for `kind`
pub fn extent_for(kind: EntityKind, config: &SimulationConfig) -> Vec2 {
    match kind {
        EntityKind::Player => config.actor_extent,
        EntityKind::Fire => config.tuning.projectile_extent,
        _ => config.item_extent,
    }
}

/// Build an entity of `kind` with its top-left corner at `position`
pub fn build(kind: EntityKind, position: Vec2, config: &SimulationConfig) -> Result<Entity, SimulationError> {
    let tuning = &config.tuning;
    let collider = Collider::new(extent_for(kind, config));
    let entity = match kind {
        EntityKind::Player => EntityBuilder::new(KindPayload::Player(ActorState::default()))
            .at(position)
            .with(InputBinding::default())
            .with(Velocity::at_rest(1.0))
            .with(collider)
            .with(Health::new(tuning.actor_starting_health, tuning.actor_max_health)?)
            .with(GraphicsBinding::new("dwarf")),
        EntityKind::Potion => EntityBuilder::new(KindPayload::Potion {
            restores: tuning.potion_restores,
        })
        .at(position)
        .with(collider)
        .with(GraphicsBinding::new("potion")),
        EntityKind::Log => EntityBuilder::new(KindPayload::Log { wood: tuning.log_wood })
            .at(position)
            .with(collider)
            .with(GraphicsBinding::new("log")),
        EntityKind::Mushroom => EntityBuilder::new(KindPayload::Mushroom)
            .at(position)
            .with(Velocity::at_rest(tuning.hazard_speed))
            .with(collider)
            .with(Health::new(tuning.hazard_health, tuning.hazard_health)?)
            .with(GraphicsBinding::new("mushroom")),
        EntityKind::Goal => EntityBuilder::new(KindPayload::Goal)
            .at(position)
            .with(collider)
            .with(GraphicsBinding::new("goal")),
        EntityKind::Fire => return Ok(projectile(position + collider.extent * 0.5, Facing::Right, config)),
    };
    Ok(entity.build())
}

/// Build a projectile centred on `origin`, flying toward `facing`
pub fn projectile(origin: Vec2, facing: Facing, config: &SimulationConfig) -> Entity {
    let tuning = &config.tuning;
    let extent = tuning.projectile_extent;
    EntityBuilder::new(KindPayload::Fire)
        .at(origin - extent * 0.5)
        .with(Velocity::new(facing.direction(), tuning.projectile_speed))
        .with(Collider::new(extent))
        .with(TimeToLive::new(tuning.projectile_ttl_frames))
        .with(GraphicsBinding::new("fire"))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::mask::ComponentMask;
    use approx::assert_relative_eq;

    #[test]
    fn test_player_carries_input_and_health() {
        let config = SimulationConfig::default();
        let player = build(EntityKind::Player, Vec2::new(0.0, 0.0), &config).unwrap();
        assert!(player.has_components(
            ComponentMask::INPUT | ComponentMask::VELOCITY | ComponentMask::COLLIDER | ComponentMask::HEALTH
        ));
        assert_eq!(player.components().health().map(Health::current), Some(80));
    }

    #[test]
    fn test_projectile_is_centred_and_expires() {
        let config = SimulationConfig::default();
        let fire = projectile(Vec2::new(100.0, 100.0), Facing::Left, &config);
        assert_relative_eq!(fire.bounds().center(), Vec2::new(100.0, 100.0));
        assert_eq!(fire.components().ttl().map(|ttl| ttl.frames), Some(150));
        let velocity = fire.components().velocity().copied().unwrap();
        assert_relative_eq!(velocity.linear(), Vec2::new(-200.0, 0.0));
    }

    #[test]
    fn test_invalid_tuning_fails_health_validation() {
        let mut config = SimulationConfig::default();
        config.tuning.actor_starting_health = 150;
        assert!(matches!(
            build(EntityKind::Player, Vec2::zeros(), &config),
            Err(SimulationError::InvalidHealth { starting: 150, maximum: 100 })
        ));
    }
}
