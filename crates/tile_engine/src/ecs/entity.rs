//! Entities
//!
//! An [`Entity`] owns its identity, kind payload, capability mask and
//! component table. Stores own entities outright; everything else refers to
//! them by [`EntityId`].

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

use serde::{Deserialize, Serialize};

use crate::ecs::component::{Component, ComponentTable};
use crate::ecs::mask::{ComponentKind, ComponentMask};
use crate::foundation::math::{Facing, Vec2};
use crate::physics::Rect;

static NEXT_ENTITY_ID: AtomicU32 = AtomicU32::new(1);

/// Process-unique entity identity, handed out by a store on insertion.
///
/// Live ids are never 0 and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(u32);

impl EntityId {
    /// Placeholder carried by an entity that has not been inserted yet
    pub const UNASSIGNED: Self = Self(0);

    /// Hand out the next identity
    fn allocate() -> Self {
        Self(NEXT_ENTITY_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw numeric value
    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Category of an entity, fixed at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// The primary controllable actor
    Player,
    /// Consumable that restores health
    Potion,
    /// Obstacle that yields wood when chopped
    Log,
    /// Projectile thrown by the actor
    Fire,
    /// Hazard that chases and damages the actor
    Mushroom,
    /// Level exit
    Goal,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Player => "player",
            Self::Potion => "potion",
            Self::Log => "log",
            Self::Fire => "fire",
            Self::Mushroom => "mushroom",
            Self::Goal => "goal",
        };
        f.write_str(name)
    }
}

/// Mutable state carried by the primary actor
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ActorState {
    /// Wood collected, spent on shouting fire
    pub wood: u32,
    /// Attack command held this frame
    pub attacking: bool,
    /// Shout command held this frame
    pub shouting: bool,
    /// Seconds until the next shout is allowed
    pub shout_cooldown: f32,
    /// Horizontal facing
    pub facing: Facing,
}

/// Kind tag together with the data only that kind carries
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KindPayload {
    /// Primary actor
    Player(ActorState),
    /// Health restored on pickup
    Potion {
        /// Amount of health restored
        restores: i32,
    },
    /// Wood gained when chopped
    Log {
        /// Amount of wood granted
        wood: u32,
    },
    /// Projectile
    Fire,
    /// Hazard
    Mushroom,
    /// Level exit
    Goal,
}

impl KindPayload {
    /// Kind tag for this payload
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Player(_) => EntityKind::Player,
            Self::Potion { .. } => EntityKind::Potion,
            Self::Log { .. } => EntityKind::Log,
            Self::Fire => EntityKind::Fire,
            Self::Mushroom => EntityKind::Mushroom,
            Self::Goal => EntityKind::Goal,
        }
    }
}

/// A simulated object
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    id: EntityId,
    payload: KindPayload,
    mask: ComponentMask,
    components: ComponentTable,
    bounds: Rect,
    deleted: bool,
}

impl Entity {
    /// Create an unplaced entity with no components.
    ///
    /// Its id stays [`EntityId::UNASSIGNED`] until a store takes it.
    pub fn new(payload: KindPayload) -> Self {
        Self {
            id: EntityId::UNASSIGNED,
            payload,
            mask: ComponentMask::empty(),
            components: ComponentTable::new(),
            bounds: Rect::default(),
            deleted: false,
        }
    }

    /// Identity
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Stamp a fresh identity, replacing any earlier one. Stores call this
    /// on insertion, so a copy of a stored entity never aliases it.
    pub(crate) fn assign_id(&mut self) -> EntityId {
        self.id = EntityId::allocate();
        self.id
    }

    /// Kind tag
    pub fn kind(&self) -> EntityKind {
        self.payload.kind()
    }

    /// Kind payload
    pub fn payload(&self) -> &KindPayload {
        &self.payload
    }

    /// Mutable kind payload
    pub fn payload_mut(&mut self) -> &mut KindPayload {
        &mut self.payload
    }

    /// Actor state, when this entity is the player
    pub fn actor_state(&self) -> Option<&ActorState> {
        match &self.payload {
            KindPayload::Player(state) => Some(state),
            _ => None,
        }
    }

    /// Capability mask
    pub fn mask(&self) -> ComponentMask {
        self.mask
    }

    /// Attach a component, replacing one of the same kind.
    ///
    /// The mask only ever grows.
    pub fn add_component(&mut self, component: impl Into<Component>) {
        let component = component.into();
        self.mask.set_kind(component.kind());
        self.components.insert(component);
    }

    /// Component stored under `kind`
    pub fn component(&self, kind: ComponentKind) -> Option<&Component> {
        self.components.get(kind)
    }

    /// Component table
    pub fn components(&self) -> &ComponentTable {
        &self.components
    }

    /// Mutable component table
    pub fn components_mut(&mut self) -> &mut ComponentTable {
        &mut self.components
    }

    /// Payload and components borrowed together
    pub fn parts_mut(&mut self) -> (&mut KindPayload, &mut ComponentTable) {
        (&mut self.payload, &mut self.components)
    }

    /// Whether every kind in `required` is attached
    pub fn has_components(&self, required: ComponentMask) -> bool {
        self.mask.contains_all(required)
    }

    /// Bounding box as of the last collider refresh
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Overwrite the bounding box
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    /// Tombstone flag
    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    /// Mark for removal at the end of the frame
    pub fn mark_deleted(&mut self) {
        self.deleted = true;
    }

    /// Recompute bounds from position and collider, if both are present
    pub(crate) fn refresh_bounds(&mut self) -> Option<Rect> {
        let position = self.components.position()?;
        let collider = self.components.collider()?;
        self.bounds = collider.bounds_at(position.0);
        Some(self.bounds)
    }
}

/// Builder that places an entity and attaches its starting components
#[derive(Debug)]
pub struct EntityBuilder {
    entity: Entity,
}

impl EntityBuilder {
    /// Start building an entity of the given kind
    pub fn new(payload: KindPayload) -> Self {
        Self {
            entity: Entity::new(payload),
        }
    }

    /// Place the entity's top-left corner
    pub fn at(mut self, position: Vec2) -> Self {
        self.entity.add_component(crate::ecs::components::Position(position));
        self
    }

    /// Attach a component
    pub fn with(mut self, component: impl Into<Component>) -> Self {
        self.entity.add_component(component);
        self
    }

    /// Finish, deriving the initial bounding box
    pub fn build(mut self) -> Entity {
        self.entity.refresh_bounds();
        self.entity
    }
}
