//! Linear store: every entity in one ordered sequence

use crate::ecs::entity::{Entity, EntityId};
use crate::ecs::mask::ComponentMask;
use crate::engine::SimulationError;

use super::{pair_mut, EntityStore, MatchVisitor, StoreKind};

/// Ordered sequence of entities; removal is a full scan
#[derive(Debug, Default)]
pub struct LinearStore {
    entities: Vec<Entity>,
}

impl LinearStore {
    /// Empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn position_of(&self, id: EntityId) -> Option<usize> {
        self.entities.iter().position(|entity| entity.id() == id)
    }
}

impl EntityStore for LinearStore {
    fn kind(&self) -> StoreKind {
        StoreKind::Linear
    }

    fn insert(&mut self, mut entity: Entity) -> EntityId {
        let id = entity.assign_id();
        self.entities.push(entity);
        id
    }

    fn remove_deleted(&mut self) -> Vec<EntityId> {
        let removed: Vec<EntityId> = self
            .entities
            .iter()
            .filter(|entity| entity.is_deleted())
            .map(Entity::id)
            .collect();
        if !removed.is_empty() {
            self.entities.retain(|entity| !entity.is_deleted());
            log::debug!("Linear store swept {} entities", removed.len());
        }
        removed
    }

    fn for_each(&self, visitor: &mut dyn FnMut(&Entity)) {
        self.entities.iter().for_each(visitor);
    }

    fn for_each_mut(&mut self, visitor: &mut dyn FnMut(&mut Entity)) {
        self.entities.iter_mut().for_each(visitor);
    }

    fn visit_matching_mut(
        &mut self,
        required: ComponentMask,
        visitor: &mut MatchVisitor<'_>,
    ) -> Result<(), SimulationError> {
        for entity in self.entities.iter_mut().filter(|entity| entity.has_components(required)) {
            visitor(entity)?;
        }
        Ok(())
    }

    fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|entity| entity.id() == id)
    }

    fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|entity| entity.id() == id)
    }

    fn get_pair_mut(&mut self, a: EntityId, b: EntityId) -> Option<(&mut Entity, &mut Entity)> {
        let first = self.position_of(a)?;
        let second = self.position_of(b)?;
        pair_mut(&mut self.entities, first, second)
    }

    fn len(&self) -> usize {
        self.entities.len()
    }
}
