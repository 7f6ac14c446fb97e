//! Game configuration
//!
//! Loaded from TOML or RON through the engine's [`Config`] trait. Every
//! field has a default, so a partial file only overrides what it names.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tile_engine::config::{Config, ConfigError};
use tile_engine::core::SimulationConfig;

/// Top-level game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Level files, played in order
    pub levels: Vec<PathBuf>,

    /// Seconds simulated per frame
    pub fixed_step: f32,

    /// Stop after this many frames; zero runs until the window closes
    pub max_frames: u64,

    /// Sleep off unused frame time instead of running flat out
    pub realtime: bool,

    /// Hazard spawning
    pub spawner: SpawnerConfig,

    /// Engine settings
    pub simulation: SimulationConfig,
}

/// Hazard spawner settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnerConfig {
    /// Shortest wait between spawns, in seconds
    pub min_interval: f32,

    /// Longest wait between spawns, in seconds
    pub max_interval: f32,

    /// Live hazard cap
    pub max_hazards: usize,

    /// Minimum distance from the actor, in cells
    pub min_actor_distance: usize,

    /// RNG seed
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            levels: vec![
                PathBuf::from("levels/level1.txt"),
                PathBuf::from("levels/level2.txt"),
            ],
            fixed_step: 1.0 / 60.0,
            max_frames: 3600,
            realtime: false,
            spawner: SpawnerConfig::default(),
            simulation: SimulationConfig::default(),
        }
    }
}

impl Default for SpawnerConfig {
    fn default() -> Self {
        Self {
            min_interval: 2.0,
            max_interval: 5.0,
            max_hazards: 8,
            min_actor_distance: 2,
            seed: 0x5eed,
        }
    }
}

impl Config for GameConfig {}

impl GameConfig {
    /// Load configuration from `path`, or fall back to defaults when no path is given
    pub fn load_or_default(path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => {
                log::info!("Loading configuration from {}", path.display());
                Self::load_from_file(path)?
            }
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the game loop cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.levels.is_empty() {
            return Err(ConfigError::Invalid("no levels configured".to_string()));
        }
        if self.fixed_step.is_nan() || self.fixed_step <= 0.0 {
            return Err(ConfigError::Invalid(format!("fixed step {} must be positive", self.fixed_step)));
        }
        let spawner = &self.spawner;
        if spawner.min_interval < 0.0 || spawner.max_interval < spawner.min_interval {
            return Err(ConfigError::Invalid(format!(
                "spawner interval {}..{} is not a range",
                spawner.min_interval, spawner.max_interval
            )));
        }
        self.simulation.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tile_engine::core::StoreKind;

    #[test]
    fn test_defaults_are_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.spawner.max_hazards, 8);
        assert_eq!(config.simulation.store, StoreKind::Packed);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = GameConfig::from_toml_str(
            r#"
            max_frames = 10

            [spawner]
            seed = 7

            [simulation]
            store = "archetype"
            "#,
        )
        .unwrap();
        assert_eq!(config.max_frames, 10);
        assert_eq!(config.spawner.seed, 7);
        assert_eq!(config.spawner.max_interval, 5.0);
        assert_eq!(config.simulation.store, StoreKind::Archetype);
        assert_eq!(config.levels.len(), 2);
    }

    #[test]
    fn test_inverted_interval_is_rejected() {
        let mut config = GameConfig::default();
        config.spawner.min_interval = 6.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_no_levels_is_rejected() {
        let config = GameConfig {
            levels: Vec::new(),
            ..GameConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }
}
