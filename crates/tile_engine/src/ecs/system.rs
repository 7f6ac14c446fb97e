//! Systems
//!
//! Each [`SystemKind`] pairs a required capability mask with one update
//! function. The set is closed, so dispatch is a plain `match` rather than
//! a table of trait objects. Systems mutate only the entity they are handed;
//! anything that would restructure the store is queued as a
//! [`FrameCommand`] and applied after the pass.

use std::collections::HashSet;
use std::fmt;

use crate::core::{Services, SimulationConfig};
use crate::ecs::entity::{Entity, EntityId};
use crate::ecs::mask::ComponentMask;
use crate::ecs::systems;
use crate::engine::SimulationError;
use crate::foundation::math::{Facing, Vec2};
use crate::input::InputFrame;
use crate::physics::Rect;
use crate::render::DrawList;

/// The seven per-frame systems
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SystemKind {
    /// Apply player commands to the actor
    InputApply,
    /// Integrate positions from velocities
    MovementIntegration,
    /// Recompute bounding boxes
    ColliderRefresh,
    /// Kind-specific overlap responses
    GameplayCollision,
    /// Count down time-to-live
    TtlDecay,
    /// Forward sprites to the renderer
    GraphicsDispatch,
    /// Forward debug outlines to the renderer
    DebugDraw,
}

impl SystemKind {
    /// Execution order within a frame
    pub const ORDER: [Self; 7] = [
        Self::InputApply,
        Self::MovementIntegration,
        Self::ColliderRefresh,
        Self::GameplayCollision,
        Self::TtlDecay,
        Self::GraphicsDispatch,
        Self::DebugDraw,
    ];

    /// Mask an entity must satisfy to be processed
    pub fn required_mask(self) -> ComponentMask {
        match self {
            Self::InputApply => systems::input::REQUIRED,
            Self::MovementIntegration => systems::movement::REQUIRED,
            Self::ColliderRefresh => systems::collider::REQUIRED,
            Self::GameplayCollision => systems::gameplay::REQUIRED,
            Self::TtlDecay => systems::ttl::REQUIRED,
            Self::GraphicsDispatch => systems::graphics::REQUIRED,
            Self::DebugDraw => systems::debug_draw::REQUIRED,
        }
    }

    /// Run this system on one entity that satisfies its mask
    pub fn update(self, entity: &mut Entity, context: &mut FrameContext<'_>) -> Result<(), SimulationError> {
        match self {
            Self::InputApply => systems::input::update(entity, context),
            Self::MovementIntegration => systems::movement::update(entity, context),
            Self::ColliderRefresh => systems::collider::update(entity, context),
            Self::GameplayCollision => systems::gameplay::update(entity, context),
            Self::TtlDecay => systems::ttl::update(entity, context),
            Self::GraphicsDispatch => systems::graphics::update(entity, context),
            Self::DebugDraw => systems::debug_draw::update(entity, context),
        }
    }

    /// Short name for diagnostics
    pub fn name(self) -> &'static str {
        match self {
            Self::InputApply => "input-apply",
            Self::MovementIntegration => "movement-integration",
            Self::ColliderRefresh => "collider-refresh",
            Self::GameplayCollision => "gameplay-collision",
            Self::TtlDecay => "ttl-decay",
            Self::GraphicsDispatch => "graphics-dispatch",
            Self::DebugDraw => "debug-draw",
        }
    }
}

impl fmt::Display for SystemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Structural change requested during a pass, applied once it finishes
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameCommand {
    /// Tombstone an entity
    Delete(EntityId),
    /// Subtract health from the primary actor
    DamageActor(i32),
    /// Spawn a projectile centred on `origin`, flying toward `facing`
    SpawnProjectile {
        /// Centre of the new projectile
        origin: Vec2,
        /// Flight direction
        facing: Facing,
    },
    /// The actor reached the goal
    LevelTransition,
}

/// Read-only view of the primary actor taken before a pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActorSnapshot {
    /// Actor id
    pub id: EntityId,
    /// Actor bounding box
    pub bounds: Rect,
}

/// Everything a system may read or append to while it runs
pub struct FrameContext<'a> {
    /// Seconds since the previous frame
    pub elapsed: f32,
    /// Input collected for this frame
    pub input: &'a InputFrame,
    /// Simulation settings
    pub config: &'a SimulationConfig,
    /// Audio and event hooks
    pub services: &'a mut Services,
    /// Deferred structural changes
    pub commands: &'a mut Vec<FrameCommand>,
    /// Render output
    pub draw_list: &'a mut DrawList,
    /// Whether debug outlines are globally visible
    pub debug_bounds_visible: bool,
    /// The primary actor, if one is alive
    pub actor: Option<ActorSnapshot>,
    /// Live projectiles and their boxes, taken before the gameplay pass
    pub projectiles: Vec<(EntityId, Rect)>,
    /// Projectiles already spent this frame
    pub spent_projectiles: HashSet<EntityId>,
}

impl FrameContext<'_> {
    /// Whether `id` is the primary actor
    pub fn is_actor(&self, id: EntityId) -> bool {
        self.actor.is_some_and(|actor| actor.id == id)
    }

    /// Queue a structural change
    pub fn defer(&mut self, command: FrameCommand) {
        self.commands.push(command);
    }
}
