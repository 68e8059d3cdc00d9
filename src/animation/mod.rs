//! Animation driver: the ordered per-frame updates of the scene.
pub mod plugin;
pub mod systems;

pub use plugin::AnimationPlugin;
