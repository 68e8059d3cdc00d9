// src/panel/systems.rs
//
// The panel controller. It is the only code that spawns or despawns panel
// entities, and it does so by reconciling the scene with the store selection.

use bevy::{ecs::message::MessageReader, prelude::*};

use crate::camera::{components::OrbitCamera, tween::CameraZoom};
use crate::content::SectionTable;
use crate::core::{OrreryConfig, OrreryError};
use crate::scene::components::Billboard;
use crate::store::{UiAction, UiStore};

use super::{
    canvas::spawn_panel_canvas,
    components::{CloseButton, InfoPanel, OpenPanel, PanelReveal, PanelTracker},
    events::ReopenPanel,
};

const CLOSE_COLOR: Color = Color::srgba(0.85, 0.2, 0.2, 0.9);
const MIN_REVEAL_SCALE: f32 = 0.001;

/// Opens, replaces, or closes the info panel so it matches the selection.
/// A [`ReopenPanel`] for the selected key rebuilds the panel even though the
/// selection did not change.
#[allow(clippy::too_many_arguments)]
pub fn sync_panel_with_selection(
    mut commands: Commands,
    mut store: ResMut<UiStore>,
    mut tracker: ResMut<PanelTracker>,
    table: Res<SectionTable>,
    config: Res<OrreryConfig>,
    mut zoom: ResMut<CameraZoom>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut images: ResMut<Assets<Image>>,
    camera_query: Query<&Transform, With<OrbitCamera>>,
    mut reopen_requests: MessageReader<ReopenPanel>,
) -> Result {
    let desired = store.selected_planet().map(str::to_owned);
    let reopen = reopen_requests
        .read()
        .any(|request| desired.as_deref() == Some(request.key.as_str()));
    if desired.as_deref() == tracker.shown() && !reopen {
        return Ok(());
    }

    let Ok(camera) = camera_query.single() else {
        return Ok(()); // No camera yet, retry next frame
    };
    let camera = *camera;

    // Never stack panels: whatever was open goes first.
    let closed_previous = match tracker.take_roots() {
        Some(roots) => {
            for entity in roots {
                commands.entity(entity).despawn();
            }
            true
        }
        None => false,
    };

    let Some(key) = desired else {
        tracker.set_shown(None);
        if closed_previous {
            info!("Panel closed, zooming back to {:?}", config.zoom.home_position);
            zoom.begin_zoom_back(camera.translation, config.zoom.home_position);
        }
        return Ok(());
    };

    let Some(section) = table.for_key(&key) else {
        warn!("{}. Clearing selection.", OrreryError::unknown_section(&key));
        tracker.set_shown(None);
        if closed_previous {
            zoom.begin_zoom_back(camera.translation, config.zoom.home_position);
        }
        store.dispatch(UiAction::clear_selection());
        return Ok(());
    };

    let settings = &config.panel;
    let content = section.panel_content();
    let canvas = match spawn_panel_canvas(&mut commands, &mut images, settings, &content) {
        Ok(canvas) => canvas,
        Err(err) => {
            error!("Cannot open panel '{}': {}", key, err);
            // Remember the failure so it is reported once per selection.
            tracker.set_shown(Some(key));
            return Err(err.into());
        }
    };

    let forward = camera.forward().as_vec3();
    let panel_position = camera.translation + forward * settings.distance;
    let mut panel_transform =
        Transform::from_translation(panel_position).looking_to(forward, Vec3::Y);
    panel_transform.scale = Vec3::splat(MIN_REVEAL_SCALE);

    let panel = commands
        .spawn((
            Mesh3d(meshes.add(Rectangle::new(settings.size, settings.size))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color_texture: Some(canvas.image.clone()),
                unlit: true,
                cull_mode: None,
                alpha_mode: AlphaMode::Blend,
                ..default()
            })),
            panel_transform,
            InfoPanel { key: key.clone() },
            Billboard,
            PanelReveal::new(settings.open_speed),
            Name::new(format!("Info Panel ({})", key)),
        ))
        .id();

    let close_button = commands
        .spawn((
            Mesh3d(meshes.add(Rectangle::new(settings.close_size, settings.close_size))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: CLOSE_COLOR,
                unlit: true,
                alpha_mode: AlphaMode::Blend,
                ..default()
            })),
            Transform::from_translation(settings.close_offset),
            CloseButton {
                half_extent: Vec2::splat(settings.close_size * 0.5),
            },
            ChildOf(panel),
            Name::new("Close Button"),
        ))
        .id();

    let zoom_target = panel_position - forward * config.zoom.view_distance;
    zoom.begin_zoom_in(camera.translation, zoom_target);

    info!("Opened panel '{}' ({})", key, content.title);
    tracker.record(OpenPanel {
        key,
        panel,
        close_button,
        canvas_camera: canvas.camera,
        canvas_root: canvas.root,
    });

    Ok(())
}

/// Grows newly opened panels to full size.
pub fn reveal_panels(
    mut commands: Commands,
    mut panels: Query<(Entity, &mut Transform, &mut PanelReveal)>,
) {
    for (entity, mut transform, mut reveal) in panels.iter_mut() {
        let scale = reveal.step().max(MIN_REVEAL_SCALE);
        transform.scale = Vec3::splat(scale);
        if reveal.is_finished() {
            commands.entity(entity).remove::<PanelReveal>();
        }
    }
}
