// src/ui/sidebar/plugin.rs
//
// SidebarPlugin coordinates the sidebar root, rebuilds, and button handling.

use bevy::prelude::*;

use crate::core::FrameStep;

use super::components::SidebarView;
use super::systems::{handle_sidebar_buttons, rebuild_sidebar, setup_sidebar_root};

pub struct SidebarPlugin;

impl Plugin for SidebarPlugin {
    fn build(&self, app: &mut App) {
        info!("SidebarPlugin registered");

        app.init_resource::<SidebarView>()
            .add_systems(Startup, setup_sidebar_root)
            .add_systems(
                Update,
                (
                    handle_sidebar_buttons.in_set(FrameStep::Input),
                    rebuild_sidebar.in_set(FrameStep::Overlay),
                ),
            );
    }
}
