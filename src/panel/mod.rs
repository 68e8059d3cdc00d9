//! Info panel: canvas-textured plane, close control, and its controller.
pub mod canvas;
pub mod components;
pub mod events;
pub mod plugin;
pub mod systems;

pub use events::ReopenPanel;
pub use plugin::PanelPlugin;
