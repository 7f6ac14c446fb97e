//! Packed store: dense sequence plus an id-to-slot index
//!
//! Removal swaps the target with the last slot, fixes the index of the
//! entity that moved, and truncates. Slot indices are therefore only valid
//! until the next removal; ids stay valid until the entity is swept.

use std::collections::HashMap;

use crate::ecs::entity::{Entity, EntityId};
use crate::ecs::mask::ComponentMask;
use crate::engine::SimulationError;

use super::{pair_mut, EntityStore, MatchVisitor, StoreKind};

/// Dense entity array with O(1) lookup and removal
#[derive(Debug, Default)]
pub struct PackedStore {
    dense: Vec<Entity>,
    index: HashMap<EntityId, usize>,
}

impl PackedStore {
    /// Empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove one entity by id with swap-and-pop
    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        let slot = self.index.remove(&id)?;
        let removed = self.dense.swap_remove(slot);
        if let Some(moved) = self.dense.get(slot) {
            self.index.insert(moved.id(), slot);
        }
        Some(removed)
    }

    /// Current dense slot of an entity
    pub fn slot_of(&self, id: EntityId) -> Option<usize> {
        self.index.get(&id).copied()
    }
}

impl EntityStore for PackedStore {
    fn kind(&self) -> StoreKind {
        StoreKind::Packed
    }

    fn insert(&mut self, mut entity: Entity) -> EntityId {
        let id = entity.assign_id();
        self.index.insert(id, self.dense.len());
        self.dense.push(entity);
        id
    }

    fn remove_deleted(&mut self) -> Vec<EntityId> {
        let removed: Vec<EntityId> = self
            .dense
            .iter()
            .filter(|entity| entity.is_deleted())
            .map(Entity::id)
            .collect();
        for id in &removed {
            self.remove(*id);
        }
        if !removed.is_empty() {
            log::debug!("Packed store swept {} entities", removed.len());
        }
        removed
    }

    fn for_each(&self, visitor: &mut dyn FnMut(&Entity)) {
        self.dense.iter().for_each(visitor);
    }

    fn for_each_mut(&mut self, visitor: &mut dyn FnMut(&mut Entity)) {
        self.dense.iter_mut().for_each(visitor);
    }

    fn visit_matching_mut(
        &mut self,
        required: ComponentMask,
        visitor: &mut MatchVisitor<'_>,
    ) -> Result<(), SimulationError> {
        for entity in self.dense.iter_mut().filter(|entity| entity.has_components(required)) {
            visitor(entity)?;
        }
        Ok(())
    }

    fn get(&self, id: EntityId) -> Option<&Entity> {
        self.dense.get(self.slot_of(id)?)
    }

    fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        let slot = self.slot_of(id)?;
        self.dense.get_mut(slot)
    }

    fn get_pair_mut(&mut self, a: EntityId, b: EntityId) -> Option<(&mut Entity, &mut Entity)> {
        let first = self.slot_of(a)?;
        let second = self.slot_of(b)?;
        pair_mut(&mut self.dense, first, second)
    }

    fn len(&self) -> usize {
        self.dense.len()
    }
}
