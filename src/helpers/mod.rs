//! Debug helpers toggled from the sidebar.
pub mod edges;
pub mod plugin;
pub mod systems;

pub use plugin::HelpersPlugin;
