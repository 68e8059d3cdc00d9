//! PanelPlugin registers the panel controller and the open animation.
use bevy::prelude::*;

use crate::core::FrameStep;

use super::{
    components::PanelTracker,
    events::ReopenPanel,
    systems::{reveal_panels, sync_panel_with_selection},
};

pub struct PanelPlugin;

impl Plugin for PanelPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PanelTracker>()
            .add_message::<ReopenPanel>()
            .add_systems(
                Update,
                (
                    sync_panel_with_selection.in_set(FrameStep::Selection),
                    reveal_panels.in_set(FrameStep::Billboard),
                ),
            );

        info!("PanelPlugin registered");
    }
}
