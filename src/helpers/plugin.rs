//! HelpersPlugin hooks the edge detector into the store and draws helpers.
use bevy::prelude::*;

use crate::core::FrameStep;
use crate::store::UiStore;

use super::{
    edges::HelperEdgeDetector,
    systems::{apply_helper_transitions, draw_helpers},
};

/// Requires the store, so it must be added after `StorePlugin`.
pub struct HelpersPlugin;

impl Plugin for HelpersPlugin {
    fn build(&self, app: &mut App) {
        let detector = {
            let mut store = app.world_mut().resource_mut::<UiStore>();
            HelperEdgeDetector::attach(&mut store)
        };

        app.insert_resource(detector).add_systems(
            Update,
            (
                apply_helper_transitions.in_set(FrameStep::Selection),
                draw_helpers.in_set(FrameStep::Overlay),
            ),
        );

        info!("HelpersPlugin registered");
    }
}
