//! ScenePlugin builds the solar system and its labels.
use bevy::prelude::*;

use crate::core::FrameStep;

use super::{
    labels::{begin_font_resolution, poll_label_font, spawn_labels_when_ready, LabelFont},
    systems::{spawn_bodies, spawn_sky, spawn_star_shell, spawn_sun},
    textures::{apply_loaded_textures, request_textures, PendingTextures},
};

pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PendingTextures>()
            .init_resource::<LabelFont>()
            .add_systems(
                Startup,
                (
                    (spawn_sun, spawn_sky, spawn_star_shell, spawn_bodies),
                    request_textures,
                    begin_font_resolution,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (apply_loaded_textures, poll_label_font, spawn_labels_when_ready)
                    .chain()
                    .in_set(FrameStep::Input),
            );

        info!("ScenePlugin registered");
    }
}
