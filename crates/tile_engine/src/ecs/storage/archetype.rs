//! Archetype store
//!
//! Entities live in a slotmap arena. Each archetype bucket is keyed by a
//! fixed mask and holds arena keys of the entities that satisfied that mask
//! when they were inserted. Membership is never recomputed afterwards: a
//! component attached later does not move the entity into a newly matching
//! bucket.
//!
//! A mask-filtered pass walks the most specific bucket whose mask is a
//! subset of the requirement, or every entity when no bucket qualifies.

use std::collections::{HashMap, HashSet};

use slotmap::{DefaultKey, SlotMap};

use crate::ecs::entity::{Entity, EntityId};
use crate::ecs::mask::ComponentMask;
use crate::engine::SimulationError;

use super::{EntityStore, MatchVisitor, StoreKind};

#[derive(Debug)]
struct Archetype {
    mask: ComponentMask,
    members: Vec<DefaultKey>,
}

/// Arena of entities grouped into mask-keyed buckets
#[derive(Debug, Default)]
pub struct ArchetypeStore {
    arena: SlotMap<DefaultKey, Entity>,
    keys: HashMap<EntityId, DefaultKey>,
    order: Vec<DefaultKey>,
    archetypes: Vec<Archetype>,
}

impl ArchetypeStore {
    /// Create a store with the given bucket masks. Empty and duplicate
    /// masks are ignored.
    pub fn new(masks: impl IntoIterator<Item = ComponentMask>) -> Self {
        let mut archetypes: Vec<Archetype> = Vec::new();
        for mask in masks {
            if mask.is_empty() || archetypes.iter().any(|archetype| archetype.mask == mask) {
                continue;
            }
            archetypes.push(Archetype {
                mask,
                members: Vec::new(),
            });
        }
        Self {
            archetypes,
            ..Self::default()
        }
    }

    /// Bucket masks in declaration order
    pub fn archetype_masks(&self) -> Vec<ComponentMask> {
        self.archetypes.iter().map(|archetype| archetype.mask).collect()
    }

    /// Ids filed under the bucket with exactly `mask`, or `None` if there is
    /// no such bucket
    pub fn bucket_members(&self, mask: ComponentMask) -> Option<Vec<EntityId>> {
        let archetype = self.archetypes.iter().find(|archetype| archetype.mask == mask)?;
        Some(
            archetype
                .members
                .iter()
                .filter_map(|key| self.arena.get(*key).map(Entity::id))
                .collect(),
        )
    }

    /// The bucket to iterate for `required`: the most specific bucket whose
    /// mask is a subset of the requirement. Every entity that satisfied the
    /// requirement at insertion also satisfied that bucket, so it is in it.
    fn bucket_for(&self, required: ComponentMask) -> Option<usize> {
        self.archetypes
            .iter()
            .enumerate()
            .filter(|(_, archetype)| required.contains_all(archetype.mask))
            .max_by_key(|(index, archetype)| (archetype.mask.bits().count_ones(), std::cmp::Reverse(*index)))
            .map(|(index, _)| index)
    }
}

impl EntityStore for ArchetypeStore {
    fn kind(&self) -> StoreKind {
        StoreKind::Archetype
    }

    fn insert(&mut self, mut entity: Entity) -> EntityId {
        let id = entity.assign_id();
        let mask = entity.mask();
        let key = self.arena.insert(entity);
        self.keys.insert(id, key);
        self.order.push(key);

        for archetype in &mut self.archetypes {
            if mask.contains_all(archetype.mask) {
                archetype.members.push(key);
            }
        }
        id
    }

    fn remove_deleted(&mut self) -> Vec<EntityId> {
        let doomed: Vec<DefaultKey> = self
            .order
            .iter()
            .copied()
            .filter(|key| self.arena.get(*key).is_some_and(Entity::is_deleted))
            .collect();
        if doomed.is_empty() {
            return Vec::new();
        }

        let doomed_set: HashSet<DefaultKey> = doomed.iter().copied().collect();
        self.order.retain(|key| !doomed_set.contains(key));
        for archetype in &mut self.archetypes {
            archetype.members.retain(|key| !doomed_set.contains(key));
        }

        let mut removed = Vec::with_capacity(doomed.len());
        for key in doomed {
            if let Some(entity) = self.arena.remove(key) {
                self.keys.remove(&entity.id());
                removed.push(entity.id());
            }
        }
        log::debug!("Archetype store swept {} entities", removed.len());
        removed
    }

    fn for_each(&self, visitor: &mut dyn FnMut(&Entity)) {
        for key in &self.order {
            if let Some(entity) = self.arena.get(*key) {
                visitor(entity);
            }
        }
    }

    fn for_each_mut(&mut self, visitor: &mut dyn FnMut(&mut Entity)) {
        for key in &self.order {
            if let Some(entity) = self.arena.get_mut(*key) {
                visitor(entity);
            }
        }
    }

    fn visit_matching_mut(
        &mut self,
        required: ComponentMask,
        visitor: &mut MatchVisitor<'_>,
    ) -> Result<(), SimulationError> {
        let Some(bucket) = self.bucket_for(required) else {
            // No bucket narrows this requirement; fall back to a full scan.
            for key in &self.order {
                if let Some(entity) = self.arena.get_mut(*key) {
                    if entity.has_components(required) {
                        visitor(entity)?;
                    }
                }
            }
            return Ok(());
        };

        let archetype = &self.archetypes[bucket];
        for key in &archetype.members {
            let Some(entity) = self.arena.get_mut(*key) else {
                log::error!("Archetype bucket holds a key with no entity behind it");
                return Err(SimulationError::ArchetypeDesync { entity: None });
            };
            if !entity.has_components(archetype.mask) {
                log::error!("Entity {} sits in a bucket it does not satisfy", entity.id());
                return Err(SimulationError::ArchetypeDesync {
                    entity: Some(entity.id()),
                });
            }
            if entity.has_components(required) {
                visitor(entity)?;
            }
        }
        Ok(())
    }

    fn get(&self, id: EntityId) -> Option<&Entity> {
        self.arena.get(*self.keys.get(&id)?)
    }

    fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        let key = *self.keys.get(&id)?;
        self.arena.get_mut(key)
    }

    fn get_pair_mut(&mut self, a: EntityId, b: EntityId) -> Option<(&mut Entity, &mut Entity)> {
        let first = *self.keys.get(&a)?;
        let second = *self.keys.get(&b)?;
        let [x, y] = self.arena.get_disjoint_mut([first, second])?;
        Some((x, y))
    }

    fn len(&self) -> usize {
        self.arena.len()
    }
}
