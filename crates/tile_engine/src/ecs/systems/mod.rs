//! ECS systems
//!
//! One module per [`crate::ecs::SystemKind`], each exposing its required
//! mask and an `update` for a single matching entity.

pub mod collider;
pub mod debug_draw;
pub mod gameplay;
pub mod graphics;
pub mod input;
pub mod movement;
pub mod ttl;

pub use gameplay::install_default_responses;
