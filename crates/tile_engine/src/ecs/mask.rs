//! Capability masks
//!
//! A [`ComponentMask`] records which component kinds an entity carries, and
//! which kinds a system requires. Matching is plain subset containment.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// Closed enumeration of component kinds.
///
/// The discriminant is the bit index inside a [`ComponentMask`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum ComponentKind {
    /// Input binding
    Input = 0,
    /// World position
    Position = 1,
    /// Velocity and speed
    Velocity = 2,
    /// Collider bounds
    Collider = 3,
    /// Graphics binding
    Graphics = 4,
    /// Health pool
    Health = 5,
    /// Reserved logic slot (no component variant carries it)
    Logic = 6,
    /// Time to live countdown
    Ttl = 7,
}

impl ComponentKind {
    /// Number of component kinds
    pub const COUNT: usize = 8;

    /// Every kind, in bit order
    pub const ALL: [Self; Self::COUNT] = [
        Self::Input,
        Self::Position,
        Self::Velocity,
        Self::Collider,
        Self::Graphics,
        Self::Health,
        Self::Logic,
        Self::Ttl,
    ];

    /// Slot index of this kind inside a component table
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Single-bit mask for this kind
    pub const fn mask(self) -> ComponentMask {
        ComponentMask::from_bits_retain(1 << (self as u16))
    }
}

bitflags! {
    /// Fixed-width set of component kinds.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ComponentMask: u16 {
        /// Input binding bit
        const INPUT = 1 << 0;
        /// Position bit
        const POSITION = 1 << 1;
        /// Velocity bit
        const VELOCITY = 1 << 2;
        /// Collider bit
        const COLLIDER = 1 << 3;
        /// Graphics bit
        const GRAPHICS = 1 << 4;
        /// Health bit
        const HEALTH = 1 << 5;
        /// Logic bit
        const LOGIC = 1 << 6;
        /// Time to live bit
        const TTL = 1 << 7;
    }
}

impl ComponentMask {
    /// Build a mask from a list of kinds
    pub fn from_kinds(kinds: &[ComponentKind]) -> Self {
        kinds.iter().fold(Self::empty(), |mask, kind| mask | kind.mask())
    }

    /// Turn on the bit for `kind`. Idempotent.
    pub fn set_kind(&mut self, kind: ComponentKind) {
        self.insert(kind.mask());
    }

    /// Whether the bit for `kind` is on
    pub fn has(self, kind: ComponentKind) -> bool {
        self.contains(kind.mask())
    }

    /// True iff every bit of `subset` is also set in `self`.
    ///
    /// Reflexive, and monotonic in `self`: setting more bits never turns a
    /// true result false.
    pub fn contains_all(self, subset: Self) -> bool {
        self.contains(subset)
    }

    /// Kinds whose bits are set, in bit order
    pub fn kinds(self) -> impl Iterator<Item = ComponentKind> {
        ComponentKind::ALL.into_iter().filter(move |kind| self.has(*kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_bits_line_up_with_named_flags() {
        assert_eq!(ComponentKind::Input.mask(), ComponentMask::INPUT);
        assert_eq!(ComponentKind::Position.mask(), ComponentMask::POSITION);
        assert_eq!(ComponentKind::Velocity.mask(), ComponentMask::VELOCITY);
        assert_eq!(ComponentKind::Collider.mask(), ComponentMask::COLLIDER);
        assert_eq!(ComponentKind::Graphics.mask(), ComponentMask::GRAPHICS);
        assert_eq!(ComponentKind::Health.mask(), ComponentMask::HEALTH);
        assert_eq!(ComponentKind::Logic.mask(), ComponentMask::LOGIC);
        assert_eq!(ComponentKind::Ttl.mask(), ComponentMask::TTL);
    }

    #[test]
    fn test_set_kind_is_idempotent() {
        let mut mask = ComponentMask::empty();
        mask.set_kind(ComponentKind::Velocity);
        let once = mask;
        mask.set_kind(ComponentKind::Velocity);
        assert_eq!(mask, once);
        assert!(mask.has(ComponentKind::Velocity));
    }

    #[test]
    fn test_contains_all_is_reflexive() {
        for bits in 0..=u8::MAX {
            let mask = ComponentMask::from_bits_retain(u16::from(bits));
            assert!(mask.contains_all(mask));
        }
    }

    #[test]
    fn test_contains_all_is_monotonic() {
        let requirement = ComponentMask::POSITION | ComponentMask::VELOCITY;
        let mut mask = requirement;
        assert!(mask.contains_all(requirement));
        for kind in ComponentKind::ALL {
            mask.set_kind(kind);
            assert!(mask.contains_all(requirement));
        }
    }

    #[test]
    fn test_contains_all_rejects_missing_bits() {
        let mask = ComponentMask::POSITION;
        assert!(!mask.contains_all(ComponentMask::POSITION | ComponentMask::VELOCITY));
        assert!(!ComponentMask::empty().contains_all(ComponentMask::TTL));
    }

    #[test]
    fn test_kinds_iterates_in_bit_order() {
        let mask = ComponentMask::from_kinds(&[ComponentKind::Ttl, ComponentKind::Input]);
        let kinds: Vec<_> = mask.kinds().collect();
        assert_eq!(kinds, vec![ComponentKind::Input, ComponentKind::Ttl]);
    }
}
