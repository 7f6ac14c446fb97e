//! Entity-Component-System implementation
//!
//! Entities own a closed set of components. Systems select entities by
//! capability mask and run in a fixed order over whichever store strategy
//! the simulation was configured with.

pub mod component;
pub mod components;
pub mod entity;
pub mod mask;
pub mod storage;
pub mod system;
pub mod systems;

pub use component::{Component, ComponentTable};
pub use entity::{ActorState, Entity, EntityBuilder, EntityId, EntityKind, KindPayload};
pub use mask::{ComponentKind, ComponentMask};
pub use storage::{create_store, EntityStore, StoreKind};
pub use system::{ActorSnapshot, FrameCommand, FrameContext, SystemKind};

#[cfg(test)]
mod tests;
