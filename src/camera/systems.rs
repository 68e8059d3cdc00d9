//! Systems for the orbit camera: spawning, input, interpolation, and damping.
use bevy::{
    ecs::message::MessageReader,
    input::{
        mouse::{MouseMotion, MouseScrollUnit, MouseWheel},
        ButtonInput,
    },
    prelude::*,
};

use crate::core::config::OrreryConfig;

use super::{components::OrbitCamera, events::ResetView, tween::CameraZoom};

const PIXELS_PER_SCROLL_LINE: f32 = 40.0;
const AMBIENT_BRIGHTNESS: f32 = 350.0;

/// Spawns the perspective camera looking at the sun.
pub fn spawn_orbit_camera(mut commands: Commands, config: Res<OrreryConfig>) {
    let settings = &config.camera;
    let transform =
        Transform::from_translation(settings.start_position).looking_at(Vec3::ZERO, Vec3::Y);

    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: settings.fov_radians,
            near: 0.1,
            far: 2000.0,
            ..default()
        }),
        transform,
        AmbientLight {
            color: Color::WHITE,
            brightness: AMBIENT_BRIGHTNESS,
            ..default()
        },
        OrbitCamera::new(settings.start_position, Vec3::ZERO, settings),
        IsDefaultUiCamera,
        Name::new("Orbit Camera"),
    ));
}

/// Feeds right-drag and wheel input into the orbit controller.
pub fn orbit_camera_input(
    mut motion_events: MessageReader<MouseMotion>,
    mut wheel_events: MessageReader<MouseWheel>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mut query: Query<&mut OrbitCamera>,
) {
    let mut drag = Vec2::ZERO;
    for event in motion_events.read() {
        drag += event.delta;
    }

    let mut scroll = 0.0;
    for event in wheel_events.read() {
        scroll += match event.unit {
            MouseScrollUnit::Line => event.y,
            MouseScrollUnit::Pixel => event.y / PIXELS_PER_SCROLL_LINE,
        };
    }

    let Ok(mut orbit) = query.single_mut() else {
        return;
    };

    if mouse_buttons.pressed(MouseButton::Right) && drag != Vec2::ZERO {
        orbit.add_rotation(drag);
    }
    if scroll != 0.0 {
        orbit.add_zoom(scroll);
    }
}

/// Starts a zoom back to the home position when a view reset is requested.
pub fn handle_reset_view(
    mut requests: MessageReader<ResetView>,
    config: Res<OrreryConfig>,
    mut zoom: ResMut<CameraZoom>,
    query: Query<&Transform, With<OrbitCamera>>,
) {
    if requests.read().count() == 0 {
        return;
    }

    let Ok(transform) = query.single() else {
        return;
    };

    info!("Resetting camera to {:?}", config.zoom.home_position);
    zoom.begin_zoom_back(transform.translation, config.zoom.home_position);
}

/// Applies any pending zoom interpolation to the camera.
pub fn apply_camera_tweens(
    mut zoom: ResMut<CameraZoom>,
    mut query: Query<(&mut Transform, &mut OrbitCamera)>,
) {
    if !zoom.is_active() {
        return;
    }

    let Some(position) = zoom.advance() else {
        return;
    };

    for (mut transform, mut orbit) in query.iter_mut() {
        transform.translation = position;
        orbit.sync_to(position);
    }
}

/// Steps damped orbit motion and keeps the camera aimed at its focus.
pub fn update_orbit_controls(
    zoom: Res<CameraZoom>,
    mut query: Query<(&mut Transform, &mut OrbitCamera)>,
) {
    for (mut transform, mut orbit) in query.iter_mut() {
        if !zoom.is_active() {
            orbit.update();
            transform.translation = orbit.position();
        }
        transform.look_at(orbit.focus, Vec3::Y);
    }
}
