//! Frame orchestration
//!
//! [`Simulation`] owns the entity store, the terrain grid, the collision
//! callbacks and the service handle, and advances them one frame at a time:
//!
//! 1. input toggles and pause
//! 2. every system, in [`SystemKind::ORDER`], over the matching entities
//! 3. deferred frame commands
//! 4. terrain resolution for the primary actor
//! 5. the broad actor-vs-entity pass
//! 6. the deleted-entity sweep
//!
//! Everything runs on the caller's thread and nothing is restructured
//! while a store is being iterated.

use std::collections::HashSet;

use thiserror::Error;

use crate::config::ConfigError;
use crate::core::{Services, SimulationConfig};
use crate::ecs::entity::{Entity, EntityId, EntityKind};
use crate::ecs::mask::ComponentKind;
use crate::ecs::storage::{create_store, EntityStore};
use crate::ecs::system::{ActorSnapshot, FrameCommand, FrameContext, SystemKind};
use crate::ecs::systems::install_default_responses;
use crate::foundation::math::{Facing, Vec2};
use crate::input::InputFrame;
use crate::physics::{broad_pass, resolve_actor, CollisionCallbacks, Rect, TileGrid};
use crate::render::{DrawList, RenderItem};
use crate::scene::level::{LevelDescription, LevelError, SpawnDirective};
use crate::scene::prefab;

/// Name reported when terrain resolution finds the actor incomplete
const TERRAIN_RESOLUTION: &str = "terrain-resolution";

/// Simulation errors
#[derive(Error, Debug)]
pub enum SimulationError {
    /// A mask-matched entity lacks a component its mask promises
    #[error("{system} found entity {entity} without a {component:?} component")]
    MissingComponent {
        /// System or phase that noticed
        system: &'static str,
        /// Offending entity
        entity: EntityId,
        /// Component that should have been there
        component: ComponentKind,
    },

    /// An archetype bucket disagrees with the entities it references
    #[error("Archetype buckets out of sync with the arena (entity {entity:?})")]
    ArchetypeDesync {
        /// Offending entity, when it could be identified
        entity: Option<EntityId>,
    },

    /// Health constructed outside `0..=maximum`
    #[error("Starting health {starting} outside 0..={maximum}")]
    InvalidHealth {
        /// Requested starting value
        starting: i32,
        /// Maximum value
        maximum: i32,
    },

    /// Level could not be built
    #[error("Level error: {0}")]
    Level(#[from] LevelError),

    /// Configuration could not be used
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// No live entity has this id
    #[error("Unknown entity {0}")]
    UnknownEntity(EntityId),
}

impl SimulationError {
    /// Report a component missing from an entity a system selected by mask
    pub fn missing(system: SystemKind, entity: EntityId, component: ComponentKind) -> Self {
        log::error!("{system} selected entity {entity} but it has no {component:?} component");
        Self::MissingComponent {
            system: system.name(),
            entity,
            component,
        }
    }

    /// Whether this error means store or mask bookkeeping is broken.
    ///
    /// Such errors must stop the process rather than let it continue on
    /// corrupted state.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, Self::MissingComponent { .. } | Self::ArchetypeDesync { .. })
    }
}

/// Outcome of one [`Simulation::step`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Frames simulated so far, this one included
    pub frame: u64,
    /// Entities swept at the end of the frame
    pub removed: Vec<EntityId>,
    /// Collision handlers that ran in the broad pass
    pub collisions: usize,
    /// The actor reached the goal this frame
    pub level_complete: bool,
    /// The actor's health is exhausted
    pub actor_defeated: bool,
    /// The simulation is paused and did not advance
    pub paused: bool,
}

/// One running world
pub struct Simulation {
    config: SimulationConfig,
    store: Box<dyn EntityStore>,
    grid: TileGrid,
    callbacks: CollisionCallbacks,
    services: Services,
    draw_list: DrawList,
    actor: Option<EntityId>,
    frame: u64,
    paused: bool,
    debug_bounds_visible: bool,
}

impl Simulation {
    /// Build a world from a level description
    pub fn from_level(
        config: SimulationConfig,
        level: &LevelDescription,
        services: Services,
    ) -> Result<Self, SimulationError> {
        config.validate()?;
        level.validate()?;
        let grid = TileGrid::new(level.width, level.height, config.tile_size, level.tiles.clone())?;
        let store = create_store(config.store, &config.archetype_masks());
        let debug_bounds_visible = config.tuning.debug_bounds_visible;
        let mut simulation = Self {
            config,
            store,
            grid,
            callbacks: CollisionCallbacks::new(),
            services,
            draw_list: DrawList::new(),
            actor: None,
            frame: 0,
            paused: false,
            debug_bounds_visible,
        };
        simulation.populate(level)?;
        Ok(simulation)
    }

    /// Throw away every entity and rebuild from `level`.
    ///
    /// Entity ids keep counting up; they are never reused.
    pub fn load_level(&mut self, level: &LevelDescription) -> Result<(), SimulationError> {
        level.validate()?;
        self.grid = TileGrid::new(level.width, level.height, self.config.tile_size, level.tiles.clone())?;
        self.store = create_store(self.config.store, &self.config.archetype_masks());
        self.callbacks.clear();
        self.actor = None;
        self.draw_list.clear();
        self.populate(level)
    }

    fn populate(&mut self, level: &LevelDescription) -> Result<(), SimulationError> {
        for directive in &level.spawns {
            self.spawn(directive)?;
        }
        log::info!(
            "Loaded {}x{} level with {} entities into a {:?} store",
            level.width,
            level.height,
            self.store.len(),
            self.store.kind()
        );
        Ok(())
    }

    /// Create the entity a spawn directive describes
    pub fn spawn(&mut self, directive: &SpawnDirective) -> Result<EntityId, SimulationError> {
        let extent = prefab::extent_for(directive.kind, &self.config);
        let position = directive.placement(self.config.tile_size, extent);
        self.spawn_at(directive.kind, position)
    }

    /// Create an entity of `kind` with its top-left corner at `position`
    pub fn spawn_at(&mut self, kind: EntityKind, position: Vec2) -> Result<EntityId, SimulationError> {
        let entity = prefab::build(kind, position, &self.config)?;
        Ok(self.insert(entity))
    }

    /// Hand an entity to the store.
    ///
    /// Inserting a player makes it the primary actor and installs the
    /// default collision responses.
    pub fn insert(&mut self, entity: Entity) -> EntityId {
        let kind = entity.kind();
        let id = self.store.insert(entity);
        if kind == EntityKind::Player {
            if let Some(previous) = self.actor.replace(id) {
                log::warn!("Replacing primary actor {previous} with {id}");
            }
            install_default_responses(&mut self.callbacks);
        }
        log::debug!("Inserted {kind} {id}");
        id
    }

    /// Advance one frame
    pub fn step(&mut self, input: &InputFrame, elapsed: f32) -> Result<FrameReport, SimulationError> {
        if input.toggle_debug_bounds {
            self.debug_bounds_visible = !self.debug_bounds_visible;
        }
        if input.toggle_pause {
            self.paused = !self.paused;
            log::info!("Simulation {}", if self.paused { "paused" } else { "resumed" });
        }
        if self.paused {
            return Ok(FrameReport {
                frame: self.frame,
                paused: true,
                actor_defeated: self.actor_defeated(),
                ..FrameReport::default()
            });
        }

        self.frame += 1;
        self.draw_list.clear();

        let commands = self.run_systems(input, elapsed)?;
        let level_complete = self.apply_commands(commands);
        self.resolve_terrain(elapsed)?;

        let collisions = match self.actor {
            Some(actor) => broad_pass(
                self.store.as_mut(),
                actor,
                &mut self.callbacks,
                &mut self.services,
                &self.config.tuning,
            ),
            None => 0,
        };

        let removed = self.store.remove_deleted();
        if let Some(actor) = self.actor {
            if removed.contains(&actor) {
                log::info!("Primary actor {actor} removed");
                self.actor = None;
            }
        }

        Ok(FrameReport {
            frame: self.frame,
            removed,
            collisions,
            level_complete,
            actor_defeated: self.actor_defeated(),
            paused: false,
        })
    }

    fn run_systems(&mut self, input: &InputFrame, elapsed: f32) -> Result<Vec<FrameCommand>, SimulationError> {
        let actor = snapshot_actor(self.store.as_ref(), self.actor);
        let mut commands = Vec::new();
        let mut context = FrameContext {
            elapsed,
            input,
            config: &self.config,
            services: &mut self.services,
            commands: &mut commands,
            draw_list: &mut self.draw_list,
            debug_bounds_visible: self.debug_bounds_visible,
            actor,
            projectiles: Vec::new(),
            spent_projectiles: HashSet::new(),
        };

        for system in SystemKind::ORDER {
            let required = system.required_mask();
            if required.is_empty() {
                continue;
            }
            if system == SystemKind::GameplayCollision {
                // Boxes were refreshed by the collider pass; take them now.
                context.actor = snapshot_actor(self.store.as_ref(), self.actor);
                context.projectiles = snapshot_projectiles(self.store.as_ref());
            }
            self.store
                .for_each_matching_mut(required, &mut |entity| system.update(entity, &mut context))
                .map_err(|error| {
                    log::error!("Frame {} halted in {system}: {error}", self.frame);
                    error
                })?;
        }
        Ok(commands)
    }

    /// Apply deferred commands. Returns whether a level transition was requested.
    fn apply_commands(&mut self, commands: Vec<FrameCommand>) -> bool {
        let mut level_complete = false;
        for command in commands {
            match command {
                FrameCommand::Delete(id) => match self.store.get_mut(id) {
                    Some(entity) => entity.mark_deleted(),
                    None => log::debug!("Delete requested for unknown entity {id}"),
                },
                FrameCommand::DamageActor(damage) => {
                    let health = self
                        .actor
                        .and_then(|actor| self.store.get_mut(actor))
                        .and_then(|entity| entity.components_mut().health_mut());
                    if let Some(health) = health {
                        let remaining = health.change(-damage);
                        log::trace!("Actor took {damage} damage, {remaining} left");
                    }
                }
                FrameCommand::SpawnProjectile { origin, facing } => {
                    self.spawn_projectile(origin, facing);
                }
                FrameCommand::LevelTransition => level_complete = true,
            }
        }
        level_complete
    }

    fn spawn_projectile(&mut self, origin: Vec2, facing: Facing) -> EntityId {
        let fire = prefab::projectile(origin, facing, &self.config);
        self.insert(fire)
    }

    /// Move the actor through the grid and write back position, velocity
    /// and bounds.
    fn resolve_terrain(&mut self, elapsed: f32) -> Result<(), SimulationError> {
        let Some(actor) = self.actor else {
            return Ok(());
        };
        let Some(entity) = self.store.get_mut(actor) else {
            return Ok(());
        };
        if entity.is_deleted() {
            return Ok(());
        }

        let missing = |component: ComponentKind| {
            log::error!("{TERRAIN_RESOLUTION} found actor {actor} without a {component:?} component");
            SimulationError::MissingComponent {
                system: TERRAIN_RESOLUTION,
                entity: actor,
                component,
            }
        };
        let components = entity.components_mut();
        let position = components.position().ok_or_else(|| missing(ComponentKind::Position))?.0;
        let extent = components.collider().ok_or_else(|| missing(ComponentKind::Collider))?.extent;
        let velocity = components.velocity_mut().ok_or_else(|| missing(ComponentKind::Velocity))?;

        let resolution = resolve_actor(&self.grid, position, extent, velocity, elapsed);
        if let Some(position) = components.position_mut() {
            position.0 = resolution.position;
        }
        entity.refresh_bounds();
        Ok(())
    }

    fn actor_defeated(&self) -> bool {
        self.actor()
            .and_then(|entity| entity.components().health())
            .is_some_and(|health| health.is_depleted())
    }

    /// Every live entity as the renderer sees it
    pub fn render_view(&self) -> Vec<RenderItem> {
        let mut items = Vec::with_capacity(self.store.len());
        self.store.for_each(&mut |entity| {
            if entity.is_deleted() {
                return;
            }
            let debug_draw = entity.components().collider().is_some_and(|collider| collider.debug_draw);
            items.push(RenderItem {
                id: entity.id(),
                kind: entity.kind(),
                bounds: entity.bounds(),
                debug_bounds_visible: self.debug_bounds_visible && debug_draw,
            });
        });
        items
    }

    /// Point a moving entity in `direction`, keeping its speed
    pub fn steer(&mut self, id: EntityId, direction: Vec2) -> Result<(), SimulationError> {
        let entity = self.store.get_mut(id).ok_or(SimulationError::UnknownEntity(id))?;
        let velocity = entity
            .components_mut()
            .velocity_mut()
            .ok_or(SimulationError::MissingComponent {
                system: "steer",
                entity: id,
                component: ComponentKind::Velocity,
            })?;
        velocity.value = direction;
        Ok(())
    }

    /// Ids and bounds of live entities of `kind`
    pub fn entities_of_kind(&self, kind: EntityKind) -> Vec<(EntityId, Rect)> {
        let mut found = Vec::new();
        self.store.for_each(&mut |entity| {
            if entity.kind() == kind && !entity.is_deleted() {
                found.push((entity.id(), entity.bounds()));
            }
        });
        found
    }

    /// The primary actor
    pub fn actor(&self) -> Option<&Entity> {
        self.store.get(self.actor?)
    }

    /// Id of the primary actor
    pub fn actor_id(&self) -> Option<EntityId> {
        self.actor
    }

    /// Entity by id
    pub fn entity(&self, id: EntityId) -> Result<&Entity, SimulationError> {
        self.store.get(id).ok_or(SimulationError::UnknownEntity(id))
    }

    /// Mutable entity by id
    pub fn entity_mut(&mut self, id: EntityId) -> Result<&mut Entity, SimulationError> {
        self.store.get_mut(id).ok_or(SimulationError::UnknownEntity(id))
    }

    /// Entity store
    pub fn store(&self) -> &dyn EntityStore {
        self.store.as_ref()
    }

    /// Terrain grid
    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    /// Collision callbacks, for registering extra responses
    pub fn callbacks_mut(&mut self) -> &mut CollisionCallbacks {
        &mut self.callbacks
    }

    /// Service handle
    pub fn services_mut(&mut self) -> &mut Services {
        &mut self.services
    }

    /// Draw commands from the last frame
    pub fn draw_list(&self) -> &DrawList {
        &self.draw_list
    }

    /// Configuration in use
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Frames simulated so far
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Whether stepping is frozen
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Freeze or resume stepping
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Whether debug outlines are globally visible
    pub fn debug_bounds_visible(&self) -> bool {
        self.debug_bounds_visible
    }
}

fn snapshot_actor(store: &dyn EntityStore, actor: Option<EntityId>) -> Option<ActorSnapshot> {
    let entity = store.get(actor?)?;
    (!entity.is_deleted()).then(|| ActorSnapshot {
        id: entity.id(),
        bounds: entity.bounds(),
    })
}

fn snapshot_projectiles(store: &dyn EntityStore) -> Vec<(EntityId, Rect)> {
    let mut projectiles = Vec::new();
    store.for_each(&mut |entity| {
        if entity.kind() == EntityKind::Fire && !entity.is_deleted() {
            projectiles.push((entity.id(), entity.bounds()));
        }
    });
    projectiles
}

impl std::fmt::Debug for Simulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("store", &self.store.kind())
            .field("entities", &self.store.len())
            .field("actor", &self.actor)
            .field("frame", &self.frame)
            .field("paused", &self.paused)
            .finish_non_exhaustive()
    }
}
