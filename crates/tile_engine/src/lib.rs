//! # Tile Engine
//!
//! A frame-stepped entity/component runtime for tile-based games.
//!
//! ## Features
//!
//! - **Three entity stores**: linear, archetype-bucketed and packed, behind
//!   one interface and chosen by configuration
//! - **Capability masks**: systems select entities by component subset
//! - **Terrain resolution**: axis-separated AABB sweeps against a tile grid
//! - **Collision callbacks**: kind-keyed responses to actor overlaps
//! - **Collaborator boundaries**: input frames, draw lists, audio and event
//!   hooks, level descriptions
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tile_engine::prelude::*;
//!
//! fn main() -> Result<(), SimulationError> {
//!     let level = LevelDescription {
//!         width: 3,
//!         height: 1,
//!         tiles: vec![Tile::Floor; 3],
//!         spawns: vec![SpawnDirective::new(EntityKind::Player, 0, 0)],
//!     };
//!     let mut simulation = Simulation::from_level(SimulationConfig::default(), &level, Services::default())?;
//!     let input = InputFrame::with_commands([PlayerCommand::MoveRight]);
//!     let report = simulation.step(&input, 1.0 / 60.0)?;
//!     println!("frame {}", report.frame);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod core;
pub mod config;
pub mod foundation;
pub mod ecs;
pub mod physics;
pub mod scene;
pub mod input;
pub mod audio;
pub mod events;
pub mod render;

mod engine;

pub use engine::{FrameReport, Simulation, SimulationError};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        FrameReport, Simulation, SimulationError,
        audio::{AudioSink, RecordingAudio, SilentAudio},
        core::{Config, ConfigError, Services, SimulationConfig, StoreKind, Tuning},
        ecs::{
            ComponentKind, ComponentMask, Entity, EntityBuilder, EntityId, EntityKind, EntityStore,
            KindPayload, SystemKind,
        },
        events::{AchievementTracker, EventObserver, GameEvent},
        foundation::{math::{Facing, Vec2}, time::Timer},
        input::{InputFrame, PlayerCommand},
        physics::{Rect, Tile, TileGrid},
        render::{DrawCommand, DrawList, RenderItem},
        scene::{LevelDescription, LevelError, SpawnDirective},
    };
}
