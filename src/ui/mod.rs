// src/ui/mod.rs
//
// Screen-space UI. The sidebar is the only declarative view; labels and the
// info panel canvas live with the scene and panel modules.

pub mod sidebar;

pub use sidebar::SidebarPlugin;
