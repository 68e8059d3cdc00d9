use std::path::Path;

use bevy::prelude::*;

mod animation;
mod camera;
mod content;
mod core;
mod helpers;
mod interaction;
mod panel;
mod scene;
mod store;
mod ui;

use crate::{
    animation::AnimationPlugin, camera::CameraPlugin, core::CorePlugin, helpers::HelpersPlugin,
    interaction::InteractionPlugin, panel::PanelPlugin, scene::ScenePlugin, store::StorePlugin,
    ui::SidebarPlugin,
};

fn main() {
    load_env();

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Orrery CV".to_string(),
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ClearColor(Color::BLACK))
        .add_plugins((
            CorePlugin::default(),
            StorePlugin,
            CameraPlugin, // Reads OrreryConfig inserted by CorePlugin
            ScenePlugin,
            AnimationPlugin,
            InteractionPlugin,
            PanelPlugin,
            HelpersPlugin, // Subscribes to the store from StorePlugin
            SidebarPlugin,
        ))
        .run();
}

/// Loads `.env` (e.g. `RUST_LOG`, `ORRERY_CONFIG`) before Bevy reads the environment.
fn load_env() {
    const ENV_FILE: &str = ".env";

    let path = Path::new(ENV_FILE);
    if !path.exists() {
        return;
    }

    if let Err(err) = dotenvy::from_filename(path) {
        eprintln!("Failed to load {}: {}", ENV_FILE, err);
    }
}
