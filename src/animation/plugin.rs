//! AnimationPlugin drives spin, orbit, and billboarding each frame.
use bevy::prelude::*;

use crate::core::FrameStep;

use super::systems::{advance_orbits, advance_spin, face_camera};

pub struct AnimationPlugin;

impl Plugin for AnimationPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                advance_spin.in_set(FrameStep::Spin),
                advance_orbits.in_set(FrameStep::Orbit),
                face_camera.in_set(FrameStep::Billboard),
            ),
        );

        info!("AnimationPlugin registered");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CorePlugin, OrreryConfig};
    use crate::scene::components::{CelestialBody, Orbit, OrbitPivot, Spin};

    fn animated_app() -> App {
        let mut app = App::new();
        app.init_resource::<ButtonInput<KeyCode>>()
            .add_plugins((
                MinimalPlugins,
                CorePlugin::with_config(OrreryConfig::default()),
                AnimationPlugin,
            ));
        app
    }

    #[test]
    fn one_frame_advances_every_orbit_and_spin_by_its_speed() {
        let mut app = animated_app();
        let speeds = [
            (0.010, 0.020),
            (0.008, 0.015),
            (0.006, 0.010),
            (0.004, 0.030),
            (0.002, 0.005),
        ];
        let pairs: Vec<(Entity, Entity)> = speeds
            .iter()
            .enumerate()
            .map(|(index, (orbit_speed, spin_speed))| {
                let world = app.world_mut();
                let pivot = world
                    .spawn((
                        Transform::default(),
                        OrbitPivot {
                            key: format!("body-{index}"),
                        },
                        Orbit {
                            angle: 0.5,
                            speed: *orbit_speed,
                        },
                    ))
                    .id();
                let body = world
                    .spawn((
                        Transform::from_xyz(10.0 + index as f32 * 5.0, 0.0, 0.0),
                        CelestialBody {
                            key: format!("body-{index}"),
                            radius: 1.0,
                        },
                        Spin {
                            angle: 0.0,
                            speed: *spin_speed,
                        },
                        ChildOf(pivot),
                    ))
                    .id();
                (pivot, body)
            })
            .collect();

        app.update();

        for ((pivot, body), (orbit_speed, spin_speed)) in pairs.iter().zip(speeds) {
            let orbit = app.world().get::<Orbit>(*pivot).expect("orbit");
            assert!((orbit.angle - (0.5 + orbit_speed)).abs() < 1e-6);
            let transform = app.world().get::<Transform>(*pivot).expect("transform");
            assert!(transform
                .rotation
                .abs_diff_eq(Quat::from_rotation_y(0.5 + orbit_speed), 1e-6));

            let spin = app.world().get::<Spin>(*body).expect("spin");
            assert!((spin.angle - spin_speed).abs() < 1e-6);
            let transform = app.world().get::<Transform>(*body).expect("transform");
            assert!(transform
                .rotation
                .abs_diff_eq(Quat::from_rotation_y(spin_speed), 1e-6));
        }
    }

    #[test]
    fn stopped_loop_freezes_spin() {
        let mut app = animated_app();
        let body = app
            .world_mut()
            .spawn((
                Transform::default(),
                Spin {
                    angle: 0.0,
                    speed: 0.1,
                },
            ))
            .id();

        app.update();
        app.world()
            .resource::<crate::core::plugin::AnimationLoop>()
            .handle()
            .stop();
        app.update();
        app.update();

        let spin = app.world().get::<Spin>(body).expect("spin");
        assert!((spin.angle - 0.1).abs() < 1e-6);
    }
}
