//! Component variants and the per-entity component table
//!
//! Components form a closed set. Each entity owns one [`ComponentTable`]
//! with a fixed slot per [`ComponentKind`], so a component can never be
//! filed under the wrong key.

use crate::ecs::components::{
    Collider, GraphicsBinding, Health, InputBinding, Position, TimeToLive, Velocity,
};
use crate::ecs::mask::{ComponentKind, ComponentMask};

/// Any component an entity can own
#[derive(Debug, Clone, PartialEq)]
pub enum Component {
    /// Input binding
    Input(InputBinding),
    /// World position
    Position(Position),
    /// Velocity
    Velocity(Velocity),
    /// Collider extent
    Collider(Collider),
    /// Sprite selection
    Graphics(GraphicsBinding),
    /// Health pool
    Health(Health),
    /// Frame countdown
    Ttl(TimeToLive),
}

impl Component {
    /// Kind tag of this component
    pub fn kind(&self) -> ComponentKind {
        match self {
            Self::Input(_) => ComponentKind::Input,
            Self::Position(_) => ComponentKind::Position,
            Self::Velocity(_) => ComponentKind::Velocity,
            Self::Collider(_) => ComponentKind::Collider,
            Self::Graphics(_) => ComponentKind::Graphics,
            Self::Health(_) => ComponentKind::Health,
            Self::Ttl(_) => ComponentKind::Ttl,
        }
    }
}

macro_rules! impl_from_component {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for Component {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }
        )*
    };
}

impl_from_component!(
    Input(InputBinding),
    Position(Position),
    Velocity(Velocity),
    Collider(Collider),
    Graphics(GraphicsBinding),
    Health(Health),
    Ttl(TimeToLive),
);

/// Typed accessors generated per component kind
macro_rules! typed_accessors {
    ($($get:ident, $get_mut:ident => $variant:ident($ty:ty)),* $(,)?) => {
        $(
            #[doc = concat!("The `", stringify!($variant), "` component, if present")]
            pub fn $get(&self) -> Option<&$ty> {
                match self.get(ComponentKind::$variant) {
                    Some(Component::$variant(value)) => Some(value),
                    _ => None,
                }
            }

            #[doc = concat!("Mutable `", stringify!($variant), "` component, if present")]
            pub fn $get_mut(&mut self) -> Option<&mut $ty> {
                match self.get_mut(ComponentKind::$variant) {
                    Some(Component::$variant(value)) => Some(value),
                    _ => None,
                }
            }
        )*
    };
}

/// Fixed-slot mapping from component kind to the owned component
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComponentTable {
    slots: [Option<Component>; ComponentKind::COUNT],
}

impl ComponentTable {
    /// Empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a component under its own kind. Last write wins.
    ///
    /// Returns the component previously held in that slot, if any.
    pub fn insert(&mut self, component: Component) -> Option<Component> {
        let slot = component.kind().index();
        self.slots[slot].replace(component)
    }

    /// Component stored under `kind`
    pub fn get(&self, kind: ComponentKind) -> Option<&Component> {
        self.slots[kind.index()].as_ref()
    }

    /// Mutable component stored under `kind`
    pub fn get_mut(&mut self, kind: ComponentKind) -> Option<&mut Component> {
        self.slots[kind.index()].as_mut()
    }

    /// Whether a component of `kind` is present
    pub fn contains(&self, kind: ComponentKind) -> bool {
        self.slots[kind.index()].is_some()
    }

    /// Mask of the kinds currently stored
    pub fn mask(&self) -> ComponentMask {
        ComponentKind::ALL
            .into_iter()
            .filter(|kind| self.contains(*kind))
            .fold(ComponentMask::empty(), |mask, kind| mask | kind.mask())
    }

    /// Number of stored components
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Whether no component is stored
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    typed_accessors!(
        input, input_mut => Input(InputBinding),
        position, position_mut => Position(Position),
        velocity, velocity_mut => Velocity(Velocity),
        collider, collider_mut => Collider(Collider),
        graphics, graphics_mut => Graphics(GraphicsBinding),
        health, health_mut => Health(Health),
        ttl, ttl_mut => Ttl(TimeToLive),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_matches_component_kind() {
        let mut table = ComponentTable::new();
        table.insert(Position::new(1.0, 2.0).into());
        table.insert(TimeToLive::new(5).into());
        for kind in ComponentKind::ALL {
            if let Some(component) = table.get(kind) {
                assert_eq!(component.kind(), kind);
            }
        }
        assert_eq!(table.mask(), ComponentMask::POSITION | ComponentMask::TTL);
    }

    #[test]
    fn test_insert_is_last_write_wins() {
        let mut table = ComponentTable::new();
        assert!(table.insert(Position::new(1.0, 1.0).into()).is_none());
        let previous = table.insert(Position::new(9.0, 9.0).into());
        assert_eq!(previous, Some(Component::Position(Position::new(1.0, 1.0))));
        assert_eq!(table.position(), Some(&Position::new(9.0, 9.0)));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_absent_component_is_none() {
        let table = ComponentTable::new();
        assert!(table.velocity().is_none());
        assert!(table.get(ComponentKind::Logic).is_none());
        assert!(table.is_empty());
    }
}
