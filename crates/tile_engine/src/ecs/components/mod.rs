//! ECS components
//!
//! Plain data; systems own all behaviour.

pub mod transform;
pub mod movement;
pub mod collision;
pub mod health;
pub mod lifetime;
pub mod input_binding;
pub mod renderable;

pub use transform::Position;
pub use movement::Velocity;
pub use collision::Collider;
pub use health::Health;
pub use lifetime::TimeToLive;
pub use input_binding::InputBinding;
pub use renderable::GraphicsBinding;
