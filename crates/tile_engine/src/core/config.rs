//! # Simulation Configuration
//!
//! Everything the frame orchestrator needs to build a world: which store
//! strategy to use, grid and entity dimensions, the archetype buckets, and
//! the gameplay tuning table. Loadable from TOML or RON through [`Config`].

use serde::{Deserialize, Serialize};

pub use crate::config::{Config, ConfigError};
pub use crate::ecs::storage::StoreKind;

use crate::ecs::mask::{ComponentKind, ComponentMask};
use crate::foundation::math::Vec2;

/// Gameplay numbers shared by systems and collision responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Actor health at spawn
    pub actor_starting_health: i32,
    /// Actor health ceiling
    pub actor_max_health: i32,
    /// Wood ceiling
    pub max_wood: u32,
    /// Wood spent per shout
    pub shout_cost: u32,
    /// Seconds between shouts
    pub shout_cooldown: f32,
    /// Projectile speed in world units per second
    pub projectile_speed: f32,
    /// Projectile lifetime in frames
    pub projectile_ttl_frames: u32,
    /// Projectile bounding box size
    pub projectile_extent: Vec2,
    /// Health restored by a potion
    pub potion_restores: i32,
    /// Wood granted by a chopped log
    pub log_wood: u32,
    /// Hazard health at spawn
    pub hazard_health: i32,
    /// Hazard chase speed
    pub hazard_speed: f32,
    /// Damage dealt to the actor per frame of hazard contact
    pub hazard_contact_damage: i32,
    /// Damage a projectile deals to a hazard
    pub projectile_damage: i32,
    /// Whether debug outlines start visible
    pub debug_bounds_visible: bool,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            actor_starting_health: 80,
            actor_max_health: 100,
            max_wood: 999,
            shout_cost: 1,
            shout_cooldown: 0.5,
            projectile_speed: 200.0,
            projectile_ttl_frames: 150,
            projectile_extent: Vec2::new(40.0, 40.0),
            potion_restores: 10,
            log_wood: 15,
            hazard_health: 30,
            hazard_speed: 50.0,
            hazard_contact_damage: 1,
            projectile_damage: 10,
            debug_bounds_visible: true,
        }
    }
}

/// Configuration for a [`crate::Simulation`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Entity store strategy
    pub store: StoreKind,
    /// Width and height of one grid cell
    pub tile_size: Vec2,
    /// Actor walking speed in world units per second
    pub walk_speed: f32,
    /// Actor bounding box size
    pub actor_extent: Vec2,
    /// Bounding box size of items, hazards and the goal
    pub item_extent: Vec2,
    /// Archetype bucket definitions, one list of kinds per bucket
    pub archetypes: Vec<Vec<ComponentKind>>,
    /// Gameplay numbers
    pub tuning: Tuning,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            store: StoreKind::default(),
            tile_size: Vec2::new(100.0, 100.0),
            walk_speed: 150.0,
            actor_extent: Vec2::new(80.0, 80.0),
            item_extent: Vec2::new(50.0, 50.0),
            archetypes: vec![
                vec![ComponentKind::Position, ComponentKind::Velocity],
                vec![ComponentKind::Graphics],
            ],
            tuning: Tuning::default(),
        }
    }
}

impl SimulationConfig {
    /// Use a different store strategy
    pub fn with_store(mut self, store: StoreKind) -> Self {
        self.store = store;
        self
    }

    /// Use square tiles of `size`
    pub fn with_tile_size(mut self, size: f32) -> Self {
        self.tile_size = Vec2::new(size, size);
        self
    }

    /// Archetype bucket masks
    pub fn archetype_masks(&self) -> Vec<ComponentMask> {
        self.archetypes
            .iter()
            .map(|kinds| ComponentMask::from_kinds(kinds))
            .collect()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tile_size.x <= 0.0 || self.tile_size.y <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "tile size must be positive, got {}x{}",
                self.tile_size.x, self.tile_size.y
            )));
        }
        for (name, extent) in [("actor", self.actor_extent), ("item", self.item_extent)] {
            if extent.x <= 0.0 || extent.y <= 0.0 {
                return Err(ConfigError::Invalid(format!("{name} extent must be positive")));
            }
        }
        let tuning = &self.tuning;
        if tuning.actor_starting_health < 0 || tuning.actor_starting_health > tuning.actor_max_health {
            return Err(ConfigError::Invalid(format!(
                "actor starting health {} outside 0..={}",
                tuning.actor_starting_health, tuning.actor_max_health
            )));
        }
        if tuning.hazard_health <= 0 {
            return Err(ConfigError::Invalid("hazard health must be positive".to_string()));
        }
        Ok(())
    }
}

impl Config for SimulationConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let config = SimulationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.walk_speed, 150.0);
        assert_eq!(config.tuning.actor_starting_health, 80);
    }

    #[test]
    fn test_default_archetypes() {
        let masks = SimulationConfig::default().archetype_masks();
        assert_eq!(
            masks,
            vec![ComponentMask::POSITION | ComponentMask::VELOCITY, ComponentMask::GRAPHICS]
        );
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = SimulationConfig::from_toml_str(
            r#"
            store = "archetype"
            archetypes = [["collider"], ["position", "velocity"]]

            [tuning]
            potion_restores = 25
            "#,
        )
        .unwrap();
        assert_eq!(config.store, StoreKind::Archetype);
        assert_eq!(config.archetype_masks()[0], ComponentMask::COLLIDER);
        assert_eq!(config.tuning.potion_restores, 25);
        assert_eq!(config.tuning.log_wood, 15);
        assert_eq!(config.walk_speed, 150.0);
    }

    #[test]
    fn test_rejects_bad_tile_size() {
        let config = SimulationConfig::default().with_tile_size(0.0);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }
}
