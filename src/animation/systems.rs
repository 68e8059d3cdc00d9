// src/animation/systems.rs
//
// Per-frame animation steps: body spin, pivot orbits, and billboarding.

use std::f32::consts::TAU;

use bevy::prelude::*;

use crate::camera::components::OrbitCamera;
use crate::scene::components::{Billboard, Orbit, OrbitPivot, Spin};

const MIN_FACING_DISTANCE_SQ: f32 = 1e-8;

/// Adds `speed` to `angle`, keeping the result in `[0, TAU)`.
pub fn advance_angle(angle: f32, speed: f32) -> f32 {
    (angle + speed).rem_euclid(TAU)
}

/// Rotation that points local +Z from `position` toward `target`, both in
/// the same (parent) space.
pub fn facing_rotation(position: Vec3, target: Vec3) -> Option<Quat> {
    let to_target = target - position;
    if to_target.length_squared() < MIN_FACING_DISTANCE_SQ {
        return None;
    }

    // `looking_to` aims -Z, so look away from the target.
    Some(Transform::IDENTITY.looking_to(-to_target, Vec3::Y).rotation)
}

pub fn advance_spin(mut bodies: Query<(&mut Spin, &mut Transform)>) {
    for (mut spin, mut transform) in bodies.iter_mut() {
        spin.angle = advance_angle(spin.angle, spin.speed);
        transform.rotation = Quat::from_rotation_y(spin.angle);
    }
}

pub fn advance_orbits(mut pivots: Query<(&mut Orbit, &mut Transform), With<OrbitPivot>>) {
    for (mut orbit, mut transform) in pivots.iter_mut() {
        orbit.angle = advance_angle(orbit.angle, orbit.speed);
        transform.rotation = Quat::from_rotation_y(orbit.angle);
    }
}

/// Turns labels and panels toward the camera.
///
/// Children are aimed in their parent's space. Billboard parents (the orbit
/// pivots) sit at the root, so their local transform is already up to date
/// for this frame.
pub fn face_camera(
    camera_query: Query<&Transform, (With<OrbitCamera>, Without<Billboard>)>,
    parents: Query<&Transform, Without<Billboard>>,
    mut billboards: Query<(&mut Transform, Option<&ChildOf>), With<Billboard>>,
) {
    let Ok(camera) = camera_query.single() else {
        return;
    };
    let eye = camera.translation;

    for (mut transform, child_of) in billboards.iter_mut() {
        let target = match child_of {
            Some(child_of) => {
                let Ok(parent) = parents.get(child_of.parent()) else {
                    continue;
                };
                parent.compute_affine().inverse().transform_point3(eye)
            }
            None => eye,
        };

        if let Some(rotation) = facing_rotation(transform.translation, target) {
            transform.rotation = rotation;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn angles_wrap_into_one_turn() {
        assert!((advance_angle(TAU - 0.01, 0.02) - 0.01).abs() < 1e-5);
        assert_eq!(advance_angle(1.0, 0.0), 1.0);
    }

    #[test]
    fn facing_rotation_points_plus_z_at_target() {
        let rotation =
            facing_rotation(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0)).expect("rotation");
        assert!((rotation * Vec3::Z).distance(Vec3::X) < 1e-5);
        assert!(facing_rotation(Vec3::ONE, Vec3::ONE).is_none());
    }

    #[test]
    fn child_billboard_faces_camera_through_rotated_parent() {
        let mut app = App::new();
        app.add_systems(Update, face_camera);

        let settings = crate::core::OrreryConfig::default().camera;
        let eye = Vec3::new(0.0, 0.0, 50.0);
        app.world_mut().spawn((
            Transform::from_translation(eye),
            OrbitCamera::new(eye, Vec3::ZERO, &settings),
        ));

        let pivot = app
            .world_mut()
            .spawn(Transform::from_rotation(Quat::from_rotation_y(1.2)))
            .id();
        let label = app
            .world_mut()
            .spawn((
                Transform::from_xyz(20.0, 4.0, 0.0),
                Billboard,
                ChildOf(pivot),
            ))
            .id();

        app.update();

        let pivot_transform = *app.world().get::<Transform>(pivot).expect("pivot");
        let label_transform = *app.world().get::<Transform>(label).expect("label");
        let world = pivot_transform.compute_affine() * label_transform.compute_affine();
        let world_position = world.transform_point3(Vec3::ZERO);
        let facing = world.transform_vector3(Vec3::Z).normalize();
        let expected = (eye - world_position).normalize();
        assert!(facing.distance(expected) < 1e-4);
    }
}
