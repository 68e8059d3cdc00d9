//! Camera module: orbit controls, zoom interpolation, and view resets.
pub mod components;
pub mod events;
pub mod plugin;
pub mod systems;
pub mod tween;

pub use plugin::CameraPlugin;
