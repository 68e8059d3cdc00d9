//! CameraPlugin owns the orbit camera, its input, and zoom interpolation.
use bevy::prelude::*;

use crate::core::{config::OrreryConfig, FrameStep};

use super::{
    events::ResetView,
    systems::{
        apply_camera_tweens, handle_reset_view, orbit_camera_input, spawn_orbit_camera,
        update_orbit_controls,
    },
    tween::CameraZoom,
};

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        let zoom = {
            let config = app.world().resource::<OrreryConfig>();
            CameraZoom::new(
                config.zoom.policy,
                config.zoom.zoom_in_step,
                config.zoom.zoom_back_step,
            )
        };
        info!("CameraPlugin registered with zoom policy {:?}", zoom.policy());

        app.insert_resource(zoom)
            .add_message::<ResetView>()
            .add_systems(Startup, spawn_orbit_camera)
            .add_systems(
                Update,
                (
                    (orbit_camera_input, handle_reset_view).in_set(FrameStep::Input),
                    apply_camera_tweens.in_set(FrameStep::CameraTween),
                    update_orbit_controls.in_set(FrameStep::Controls),
                ),
            );
    }
}
