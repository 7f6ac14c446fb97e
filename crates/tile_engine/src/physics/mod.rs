//! Physics module
//!
//! Axis-aligned boxes, the static tile grid with its actor resolver, and
//! the broad entity-vs-entity pass with its kind-keyed responses.

pub mod collision;
pub mod collision_system;
pub mod terrain;

pub use collision::Rect;
pub use collision_system::{broad_pass, CollisionCallbacks, CollisionContext, CollisionHandler};
pub use terrain::{resolve_actor, TerrainResolution, Tile, TileGrid};
