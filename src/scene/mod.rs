//! Scene: sun, sky, orbiting bodies, their textures, and section labels.
pub mod components;
pub mod labels;
pub mod plugin;
pub mod systems;
pub mod textures;

pub use plugin::ScenePlugin;
