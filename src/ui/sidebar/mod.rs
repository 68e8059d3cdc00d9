// src/ui/sidebar/mod.rs
//
// Sidebar with the helper toggle, one button per section, and Reset View.

pub mod components;
pub mod plugin;
pub mod systems;

pub use plugin::SidebarPlugin;
