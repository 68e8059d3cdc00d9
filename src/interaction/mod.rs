//! Interaction layer: raycast picking and select-by-key requests.
pub mod events;
pub mod plugin;
pub mod raycast;
pub mod systems;

pub use events::SelectSection;
pub use plugin::InteractionPlugin;
