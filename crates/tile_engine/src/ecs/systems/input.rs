//! Input-apply system
//!
//! Turns the frame's player commands into actor velocity and actions.
//! Velocity is reset every frame, so releasing a key stops the actor.

use crate::audio::sounds;
use crate::ecs::entity::{Entity, KindPayload};
use crate::ecs::mask::{ComponentKind, ComponentMask};
use crate::ecs::system::{FrameCommand, FrameContext, SystemKind};
use crate::engine::SimulationError;
use crate::events::GameEvent;
use crate::foundation::math::Facing;
use crate::input::PlayerCommand;

/// Entities driven by input
pub const REQUIRED: ComponentMask = ComponentMask::INPUT.union(ComponentMask::VELOCITY);

/// Apply this frame's commands to one input-bound entity
pub fn update(entity: &mut Entity, context: &mut FrameContext<'_>) -> Result<(), SimulationError> {
    let id = entity.id();
    let enabled = entity
        .components()
        .input()
        .ok_or_else(|| SimulationError::missing(SystemKind::InputApply, id, ComponentKind::Input))?
        .enabled;
    if !enabled {
        return Ok(());
    }

    let walk = context.config.walk_speed;
    let centre = entity.bounds().center();
    let (payload, components) = entity.parts_mut();
    let velocity = components
        .velocity_mut()
        .ok_or_else(|| SimulationError::missing(SystemKind::InputApply, id, ComponentKind::Velocity))?;

    velocity.value.x = 0.0;
    velocity.value.y = 0.0;
    for command in &context.input.commands {
        match command {
            PlayerCommand::MoveRight => velocity.value.x = walk,
            PlayerCommand::MoveLeft => velocity.value.x = -walk,
            PlayerCommand::MoveUp => velocity.value.y = -walk,
            PlayerCommand::MoveDown => velocity.value.y = walk,
            PlayerCommand::Attack | PlayerCommand::Shout => {}
        }
    }
    let moving_x = velocity.linear().x;

    let KindPayload::Player(state) = payload else {
        return Ok(());
    };

    if let Some(facing) = Facing::from_velocity_x(moving_x) {
        state.facing = facing;
    }

    let attacking = context.input.holds(PlayerCommand::Attack);
    if attacking && !state.attacking {
        context.services.play(sounds::AXE);
    }
    state.attacking = attacking;
    state.shouting = context.input.holds(PlayerCommand::Shout);
    state.shout_cooldown = (state.shout_cooldown - context.elapsed).max(0.0);

    let tuning = &context.config.tuning;
    if state.shouting && state.shout_cooldown <= 0.0 && state.wood >= tuning.shout_cost {
        state.wood -= tuning.shout_cost;
        state.shout_cooldown = tuning.shout_cooldown;
        context.commands.push(FrameCommand::SpawnProjectile {
            origin: centre,
            facing: state.facing,
        });
        context.services.notify(GameEvent::ShoutPerformed);
        context.services.play(sounds::FIRE);
        log::debug!("Entity {id} shouted fire ({} wood left)", state.wood);
    }
    Ok(())
}
