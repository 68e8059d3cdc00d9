// src/scene/systems.rs
//
// Startup systems building the solar system: sun, light, sky, stars, and the
// orbiting bodies with their pivots.

use std::f32::consts::{FRAC_PI_2, PI};

use bevy::{prelude::*, render::render_resource::Face};

use crate::content::{bodies::body_keys, BodySpec, BODIES};
use crate::core::OrreryConfig;
use crate::store::{UiAction, UiStore};

use super::components::{
    CelestialBody, Orbit, OrbitPivot, PlanetRing, SkySphere, Spin, Star, Sun,
};

// Visual constants
const SUN_COLOR: Color = Color::srgb(1.0, 1.0, 0.0);
const SKY_COLOR: Color = Color::srgb(0.02, 0.02, 0.06);
const STAR_COLOR: Color = Color::srgb(0.9, 0.92, 1.0);
const RING_COLOR: Color = Color::srgba(0.85, 0.8, 0.7, 0.8);
const STAR_RADIUS: f32 = 0.6;
const SUN_LIGHT_INTENSITY: f32 = 40_000_000.0;
const SUN_LIGHT_RANGE: f32 = 500.0;
const RING_INNER_SCALE: f32 = 1.4;
const RING_OUTER_SCALE: f32 = 2.1;

/// Spawns the unlit sun at the origin with the point light inside it.
pub fn spawn_sun(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    config: Res<OrreryConfig>,
) {
    commands
        .spawn((
            Mesh3d(meshes.add(Sphere::new(config.scene.sun_radius).mesh().uv(32, 32))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: SUN_COLOR,
                unlit: true,
                ..default()
            })),
            Transform::default(),
            Sun,
            Name::new("Sun"),
        ))
        .with_children(|sun| {
            sun.spawn((
                PointLight {
                    intensity: SUN_LIGHT_INTENSITY,
                    range: SUN_LIGHT_RANGE,
                    shadows_enabled: false,
                    ..default()
                },
                Transform::default(),
                Name::new("Sun Light"),
            ));
        });

    info!("Sun spawned (radius {})", config.scene.sun_radius);
}

/// Spawns the inward-facing sky sphere. Its texture is requested separately.
pub fn spawn_sky(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    config: Res<OrreryConfig>,
) {
    commands.spawn((
        Mesh3d(meshes.add(Sphere::new(config.scene.sky_radius).mesh().uv(48, 24))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: SKY_COLOR,
            unlit: true,
            cull_mode: Some(Face::Front),
            ..default()
        })),
        Transform::default(),
        SkySphere,
        Name::new("Sky"),
    ));
}

/// Evenly spreads `count` points over a sphere using the golden angle.
pub fn fibonacci_sphere(count: u32, radius: f32) -> Vec<Vec3> {
    let golden_angle = PI * (3.0 - 5.0_f32.sqrt());
    let count_f = count as f32;

    (0..count)
        .map(|index| {
            let i = index as f32;
            let y = 1.0 - 2.0 * (i + 0.5) / count_f;
            let ring = (1.0 - y * y).max(0.0).sqrt();
            let theta = golden_angle * i;
            Vec3::new(theta.cos() * ring, y, theta.sin() * ring) * radius
        })
        .collect()
}

/// Spawns the procedural star shell inside the sky sphere.
pub fn spawn_star_shell(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    config: Res<OrreryConfig>,
) {
    let settings = &config.scene;
    if settings.star_count == 0 {
        return;
    }

    let mesh = meshes.add(Sphere::new(STAR_RADIUS).mesh().ico(1).unwrap_or_else(|err| {
        warn!("Star mesh fell back to a UV sphere: {}", err);
        Sphere::new(STAR_RADIUS).mesh().uv(6, 4)
    }));
    let material = materials.add(StandardMaterial {
        base_color: STAR_COLOR,
        unlit: true,
        ..default()
    });

    for position in fibonacci_sphere(settings.star_count, settings.star_shell_radius) {
        commands.spawn((
            Mesh3d(mesh.clone()),
            MeshMaterial3d(material.clone()),
            Transform::from_translation(position),
            Star,
        ));
    }

    debug!("Star shell spawned with {} stars", settings.star_count);
}

fn spawn_body(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    spec: &BodySpec,
) {
    let pivot = commands
        .spawn((
            Transform::default(),
            Visibility::default(),
            OrbitPivot {
                key: spec.key.to_string(),
            },
            Orbit {
                angle: 0.0,
                speed: spec.orbit_speed,
            },
            Name::new(format!("Pivot ({})", spec.key)),
        ))
        .id();

    let body = commands
        .spawn((
            Mesh3d(meshes.add(Sphere::new(spec.radius).mesh().uv(32, 32))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: spec.color,
                perceptual_roughness: 0.9,
                ..default()
            })),
            Transform::from_xyz(spec.distance, 0.0, 0.0),
            CelestialBody {
                key: spec.key.to_string(),
                radius: spec.radius,
            },
            Spin {
                angle: 0.0,
                speed: spec.spin_speed,
            },
            ChildOf(pivot),
            Name::new(format!("Body ({})", spec.key)),
        ))
        .id();

    if spec.ring {
        commands.spawn((
            Mesh3d(meshes.add(Annulus::new(
                spec.radius * RING_INNER_SCALE,
                spec.radius * RING_OUTER_SCALE,
            ))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: RING_COLOR,
                alpha_mode: AlphaMode::Blend,
                cull_mode: None,
                unlit: true,
                ..default()
            })),
            Transform::from_rotation(Quat::from_rotation_x(-FRAC_PI_2)),
            PlanetRing,
            ChildOf(body),
        ));
    }
}

/// Spawns every body on its pivot, then publishes the keys to the store.
pub fn spawn_bodies(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut store: ResMut<UiStore>,
) {
    for spec in BODIES {
        spawn_body(&mut commands, &mut meshes, &mut materials, spec);
    }

    let keys = body_keys();
    info!("Spawned {} celestial bodies: {:?}", keys.len(), keys);
    store.dispatch(UiAction::SetPlanetKeys(keys));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene_app() -> App {
        let mut app = App::new();
        app.insert_resource(UiStore::new())
            .insert_resource(OrreryConfig::default())
            .init_resource::<Assets<Mesh>>()
            .init_resource::<Assets<StandardMaterial>>()
            .add_systems(Startup, (spawn_sun, spawn_bodies));
        app
    }

    #[test]
    fn every_body_hangs_from_its_own_pivot() {
        let mut app = scene_app();
        app.update();

        let world = app.world_mut();
        let pivots: Vec<(Entity, String)> = world
            .query::<(Entity, &OrbitPivot)>()
            .iter(world)
            .map(|(entity, pivot)| (entity, pivot.key.clone()))
            .collect();
        assert_eq!(pivots.len(), BODIES.len());

        let bodies: Vec<(String, Entity, Vec3)> = world
            .query::<(&CelestialBody, &ChildOf, &Transform)>()
            .iter(world)
            .map(|(body, child_of, transform)| {
                (body.key.clone(), child_of.parent(), transform.translation)
            })
            .collect();
        assert_eq!(bodies.len(), BODIES.len());

        for (key, parent, translation) in bodies {
            let (_, pivot_key) = pivots
                .iter()
                .find(|(entity, _)| *entity == parent)
                .expect("body parent is a pivot");
            assert_eq!(*pivot_key, key);
            assert!(translation.x > 0.0);
        }

        let rings = world.query::<&PlanetRing>().iter(world).count();
        assert_eq!(rings, BODIES.iter().filter(|spec| spec.ring).count());
    }

    #[test]
    fn spawning_publishes_keys_in_display_order() {
        let mut app = scene_app();
        app.update();

        let store = app.world().resource::<UiStore>();
        assert_eq!(store.planet_keys(), body_keys().as_slice());
        assert_eq!(store.planet_keys()[0], "skills");
    }

    #[test]
    fn fibonacci_points_sit_on_the_shell() {
        let points = fibonacci_sphere(200, 50.0);
        assert_eq!(points.len(), 200);
        for point in &points {
            assert!((point.length() - 50.0).abs() < 1e-2);
        }

        // Deterministic layout.
        assert_eq!(points, fibonacci_sphere(200, 50.0));

        let centroid = points.iter().copied().sum::<Vec3>() / points.len() as f32;
        assert!(centroid.length() < 1.0);
    }
}
