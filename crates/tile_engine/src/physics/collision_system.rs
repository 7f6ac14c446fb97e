//! Entity-vs-entity collision
//!
//! A broad pass compares the primary actor's box against every other live
//! entity's box and hands each overlapping pair to the handler registered
//! for the other entity's kind. Kinds with no handler are simply ignored.

use std::collections::HashMap;

use crate::core::{Services, Tuning};
use crate::ecs::entity::{Entity, EntityId, EntityKind};
use crate::ecs::storage::EntityStore;

/// Everything a collision handler may touch
pub struct CollisionContext<'a> {
    /// The primary actor
    pub actor: &'a mut Entity,
    /// The entity it overlaps
    pub other: &'a mut Entity,
    /// Audio and event hooks
    pub services: &'a mut Services,
    /// Gameplay numbers
    pub tuning: &'a Tuning,
}

/// Response to the actor overlapping an entity of one kind
pub type CollisionHandler = Box<dyn FnMut(&mut CollisionContext<'_>)>;

/// Kind-keyed collision responses
#[derive(Default)]
pub struct CollisionCallbacks {
    handlers: HashMap<EntityKind, CollisionHandler>,
}

impl CollisionCallbacks {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the response for `kind`, replacing any earlier one.
    ///
    /// Returns true when a handler was replaced.
    pub fn register(&mut self, kind: EntityKind, handler: impl FnMut(&mut CollisionContext<'_>) + 'static) -> bool {
        self.handlers.insert(kind, Box::new(handler)).is_some()
    }

    /// Whether `kind` has a response
    pub fn contains(&self, kind: EntityKind) -> bool {
        self.handlers.contains_key(&kind)
    }

    /// Number of registered kinds
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Whether nothing is registered
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Forget every handler
    pub fn clear(&mut self) {
        self.handlers.clear();
    }

    /// Run the handler for the other entity's kind. Returns false when
    /// there is none.
    pub fn dispatch(&mut self, context: &mut CollisionContext<'_>) -> bool {
        let kind = context.other.kind();
        match self.handlers.get_mut(&kind) {
            Some(handler) => {
                log::trace!("Collision {} x {} ({kind})", context.actor.id(), context.other.id());
                handler(context);
                true
            }
            None => false,
        }
    }
}

impl std::fmt::Debug for CollisionCallbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollisionCallbacks")
            .field("kinds", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Compare the actor against every other live entity and dispatch
/// responses. Returns how many handlers ran.
///
/// Overlaps are collected first and dispatched afterwards, so handlers never
/// run while the store is being iterated. An entity deleted by an earlier
/// handler in the same pass is skipped.
pub fn broad_pass(
    store: &mut dyn EntityStore,
    actor: EntityId,
    callbacks: &mut CollisionCallbacks,
    services: &mut Services,
    tuning: &Tuning,
) -> usize {
    let Some(actor_entity) = store.get(actor) else {
        return 0;
    };
    if actor_entity.is_deleted() {
        return 0;
    }
    let actor_bounds = actor_entity.bounds();

    let mut overlaps = Vec::new();
    store.for_each(&mut |entity| {
        if entity.id() != actor
            && !entity.is_deleted()
            && callbacks.contains(entity.kind())
            && entity.bounds().intersects(&actor_bounds)
        {
            overlaps.push(entity.id());
        }
    });

    let mut dispatched = 0;
    for other in overlaps {
        let Some((actor_entity, other_entity)) = store.get_pair_mut(actor, other) else {
            continue;
        };
        if other_entity.is_deleted() {
            continue;
        }
        let mut context = CollisionContext {
            actor: actor_entity,
            other: other_entity,
            services: &mut *services,
            tuning,
        };
        if callbacks.dispatch(&mut context) {
            dispatched += 1;
        }
    }
    dispatched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SimulationConfig;
    use crate::ecs::storage::{create_store, StoreKind};
    use crate::foundation::math::Vec2;
    use crate::scene::prefab;

    fn world(config: &SimulationConfig) -> (Box<dyn EntityStore>, EntityId, EntityId, EntityId) {
        let mut store = create_store(StoreKind::Linear, &[]);
        let actor = store.insert(prefab::build(EntityKind::Player, Vec2::new(0.0, 0.0), config).unwrap());
        let near = store.insert(prefab::build(EntityKind::Goal, Vec2::new(40.0, 40.0), config).unwrap());
        let far = store.insert(prefab::build(EntityKind::Goal, Vec2::new(400.0, 400.0), config).unwrap());
        (store, actor, near, far)
    }

    #[test]
    fn test_register_reports_replacement() {
        let mut callbacks = CollisionCallbacks::new();
        assert!(!callbacks.register(EntityKind::Goal, |_| {}));
        assert!(callbacks.register(EntityKind::Goal, |_| {}));
        assert_eq!(callbacks.len(), 1);
    }

    #[test]
    fn test_broad_pass_dispatches_overlaps_only() {
        let config = SimulationConfig::default();
        let (mut store, actor, near, _) = world(&config);
        let mut callbacks = CollisionCallbacks::new();
        callbacks.register(EntityKind::Goal, |context| context.other.mark_deleted());
        let mut services = Services::default();

        let ran = broad_pass(store.as_mut(), actor, &mut callbacks, &mut services, &config.tuning);

        assert_eq!(ran, 1);
        assert_eq!(store.remove_deleted(), vec![near]);
    }

    #[test]
    fn test_kinds_without_handlers_are_ignored() {
        let config = SimulationConfig::default();
        let (mut store, actor, _, _) = world(&config);
        let mut callbacks = CollisionCallbacks::new();
        let mut services = Services::default();
        assert_eq!(broad_pass(store.as_mut(), actor, &mut callbacks, &mut services, &config.tuning), 0);
    }

    #[test]
    fn test_deleted_entities_are_skipped() {
        let config = SimulationConfig::default();
        let (mut store, actor, near, _) = world(&config);
        store.get_mut(near).unwrap().mark_deleted();
        let mut callbacks = CollisionCallbacks::new();
        callbacks.register(EntityKind::Goal, |_| {});
        let mut services = Services::default();
        assert_eq!(broad_pass(store.as_mut(), actor, &mut callbacks, &mut services, &config.tuning), 0);
    }
}
