//! Entity stores
//!
//! Three interchangeable strategies behind one [`EntityStore`] interface:
//!
//! - [`LinearStore`]: one ordered `Vec`, scanned in full.
//! - [`ArchetypeStore`]: a slotmap arena plus fixed-mask buckets assigned at
//!   insertion time.
//! - [`PackedStore`]: a dense `Vec` plus an id-to-slot map with swap-and-pop
//!   removal.
//!
//! Restructuring happens only in [`EntityStore::insert`] and
//! [`EntityStore::remove_deleted`], both called outside iteration.

pub mod archetype;
pub mod linear;
pub mod packed;

pub use archetype::ArchetypeStore;
pub use linear::LinearStore;
pub use packed::PackedStore;

use serde::{Deserialize, Serialize};

use crate::ecs::entity::{Entity, EntityId};
use crate::ecs::mask::ComponentMask;
use crate::engine::SimulationError;

/// Which store strategy a simulation uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreKind {
    /// Single ordered sequence
    Linear,
    /// Mask-keyed buckets
    Archetype,
    /// Dense sequence with an index map
    #[default]
    Packed,
}

/// Visitor used by mask-filtered passes; an error stops the pass
pub type MatchVisitor<'a> = dyn FnMut(&mut Entity) -> Result<(), SimulationError> + 'a;

/// Storage strategy for live entities
pub trait EntityStore {
    /// Strategy of this store
    fn kind(&self) -> StoreKind;

    /// Take ownership of an entity and stamp it with a fresh identity.
    ///
    /// Ids increase in insertion order and stay valid until the entity is
    /// swept. Whatever id the entity carried before is discarded.
    fn insert(&mut self, entity: Entity) -> EntityId;

    /// Remove every entity whose deleted flag is set, returning their ids.
    ///
    /// Surviving entities keep their identities.
    fn remove_deleted(&mut self) -> Vec<EntityId>;

    /// Visit every live entity once
    fn for_each(&self, visitor: &mut dyn FnMut(&Entity));

    /// Visit every live entity once, mutably
    fn for_each_mut(&mut self, visitor: &mut dyn FnMut(&mut Entity));

    /// Visit entities that may satisfy `required`. Implementations still
    /// check each entity's mask before calling the visitor.
    fn visit_matching_mut(
        &mut self,
        required: ComponentMask,
        visitor: &mut MatchVisitor<'_>,
    ) -> Result<(), SimulationError>;

    /// Entity by id
    fn get(&self, id: EntityId) -> Option<&Entity>;

    /// Mutable entity by id
    fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity>;

    /// Two distinct entities borrowed mutably at once
    fn get_pair_mut(&mut self, a: EntityId, b: EntityId) -> Option<(&mut Entity, &mut Entity)>;

    /// Number of stored entities, deleted-but-unswept included
    fn len(&self) -> usize;

    /// Whether the store is empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Visit every entity whose mask contains `required`.
    ///
    /// An empty requirement matches nothing.
    fn for_each_matching_mut(
        &mut self,
        required: ComponentMask,
        visitor: &mut MatchVisitor<'_>,
    ) -> Result<(), SimulationError> {
        if required.is_empty() {
            return Ok(());
        }
        self.visit_matching_mut(required, visitor)
    }

    /// Ids in visiting order
    fn ids(&self) -> Vec<EntityId> {
        let mut ids = Vec::with_capacity(self.len());
        self.for_each(&mut |entity| ids.push(entity.id()));
        ids
    }
}

/// Create an empty store of the given kind.
///
/// `archetypes` is only used by the archetype strategy.
pub fn create_store(kind: StoreKind, archetypes: &[ComponentMask]) -> Box<dyn EntityStore> {
    log::debug!("Creating {kind:?} entity store");
    match kind {
        StoreKind::Linear => Box::new(LinearStore::new()),
        StoreKind::Archetype => Box::new(ArchetypeStore::new(archetypes.iter().copied())),
        StoreKind::Packed => Box::new(PackedStore::new()),
    }
}

/// Borrow two distinct slots of a slice mutably
pub(crate) fn pair_mut<T>(items: &mut [T], a: usize, b: usize) -> Option<(&mut T, &mut T)> {
    if a == b || a >= items.len() || b >= items.len() {
        return None;
    }
    if a < b {
        let (head, tail) = items.split_at_mut(b);
        Some((&mut head[a], &mut tail[0]))
    } else {
        let (head, tail) = items.split_at_mut(a);
        Some((&mut tail[0], &mut head[b]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_mut_orders_results_by_argument() {
        let mut values = [1, 2, 3];
        let (a, b) = pair_mut(&mut values, 2, 0).unwrap();
        assert_eq!((*a, *b), (3, 1));
        assert!(pair_mut(&mut values, 1, 1).is_none());
        assert!(pair_mut(&mut values, 0, 3).is_none());
    }

    #[test]
    fn test_create_store_honours_kind() {
        for kind in [StoreKind::Linear, StoreKind::Archetype, StoreKind::Packed] {
            let store = create_store(kind, &[ComponentMask::POSITION]);
            assert_eq!(store.kind(), kind);
            assert!(store.is_empty());
        }
    }
}
