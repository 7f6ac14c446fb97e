//! Scene description
//!
//! What a level loader hands the simulation (a tile grid and a list of
//! spawn directives) and the prefabs those directives turn into.

pub mod level;
pub mod prefab;

pub use level::{LevelDescription, LevelError, SpawnDirective};
