//! Pointer ray construction and hit tests against bodies and the close quad.
use bevy::{math::Affine3A, prelude::*};

use crate::store::UiAction;

const PARALLEL_EPSILON: f32 = 1e-6;

/// Converts a cursor position in window pixels (origin top-left) into
/// normalised device coordinates in `[-1, 1]`, with +Y pointing up.
pub fn cursor_to_ndc(cursor: Vec2, window_size: Vec2) -> Option<Vec2> {
    if window_size.x <= 0.0 || window_size.y <= 0.0 {
        return None;
    }

    Some(Vec2::new(
        2.0 * cursor.x / window_size.x - 1.0,
        1.0 - 2.0 * cursor.y / window_size.y,
    ))
}

/// Builds the world-space ray through an NDC point.
///
/// `world_from_clip` is the inverse of the camera's clip-from-world matrix.
/// Bevy projections use reversed depth, so the near plane sits at `z = 1`.
pub fn ray_from_ndc(world_from_clip: Mat4, ndc: Vec2) -> Option<Ray3d> {
    let near = world_from_clip.project_point3(ndc.extend(1.0));
    let far = world_from_clip.project_point3(ndc.extend(f32::EPSILON));
    if !near.is_finite() || !far.is_finite() {
        return None;
    }

    let direction = Dir3::new(far - near).ok()?;
    Some(Ray3d::new(near, direction))
}

/// Distance along `ray` to the first intersection with a sphere, if any.
pub fn ray_sphere(ray: Ray3d, center: Vec3, radius: f32) -> Option<f32> {
    let direction = *ray.direction;
    let offset = ray.origin - center;
    let b = offset.dot(direction);
    let c = offset.length_squared() - radius * radius;
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }

    let root = discriminant.sqrt();
    let far = -b + root;
    if far < 0.0 {
        return None;
    }
    let near = -b - root;
    Some(if near >= 0.0 { near } else { far })
}

/// Distance along `ray` to a rectangle lying in the local XY plane of
/// `world_from_local`, centred on its origin.
pub fn ray_quad(ray: Ray3d, world_from_local: Affine3A, half_extent: Vec2) -> Option<f32> {
    if world_from_local.matrix3.determinant().abs() < PARALLEL_EPSILON {
        return None;
    }

    let local_from_world = world_from_local.inverse();
    let origin = local_from_world.transform_point3(ray.origin);
    let direction = local_from_world.transform_vector3(*ray.direction);
    if direction.z.abs() < PARALLEL_EPSILON {
        return None;
    }

    let t = -origin.z / direction.z;
    if t < 0.0 {
        return None;
    }

    let local_hit = origin + direction * t;
    if local_hit.x.abs() > half_extent.x || local_hit.y.abs() > half_extent.y {
        return None;
    }

    let world_hit = world_from_local.transform_point3(local_hit);
    Some(world_hit.distance(ray.origin))
}

/// What a pointer ray can select.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickTarget {
    Body(String),
    CloseButton,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Hit {
    pub target: PickTarget,
    pub distance: f32,
}

/// Picks the hit closest to the ray origin.
pub fn nearest_hit(hits: impl IntoIterator<Item = Hit>) -> Option<Hit> {
    hits.into_iter()
        .min_by(|a, b| a.distance.total_cmp(&b.distance))
}

impl PickTarget {
    /// The store action a click on this target stands for.
    pub fn into_action(self) -> UiAction {
        match self {
            Self::Body(key) => UiAction::select(key),
            Self::CloseButton => UiAction::clear_selection(),
        }
    }
}

/// Nearest hit among body spheres `(key, centre, radius)` and close quads
/// `(world_from_local, half_extent)`.
pub fn pick_target<'a>(
    ray: Ray3d,
    bodies: impl IntoIterator<Item = (&'a str, Vec3, f32)>,
    close_quads: impl IntoIterator<Item = (Affine3A, Vec2)>,
) -> Option<Hit> {
    let body_hits = bodies.into_iter().filter_map(|(key, center, radius)| {
        ray_sphere(ray, center, radius).map(|distance| Hit {
            target: PickTarget::Body(key.to_string()),
            distance,
        })
    });
    let close_hits = close_quads
        .into_iter()
        .filter_map(|(world_from_local, half_extent)| {
            ray_quad(ray, world_from_local, half_extent).map(|distance| Hit {
                target: PickTarget::CloseButton,
                distance,
            })
        });

    nearest_hit(body_hits.chain(close_hits))
}

/// What a click along `ray` does to the store, if anything.
pub fn resolve_click<'a>(
    ray: Ray3d,
    bodies: impl IntoIterator<Item = (&'a str, Vec3, f32)>,
    close_quads: impl IntoIterator<Item = (Affine3A, Vec2)>,
) -> Option<UiAction> {
    pick_target(ray, bodies, close_quads).map(|hit| hit.target.into_action())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forward_ray(origin: Vec3) -> Ray3d {
        Ray3d::new(origin, Dir3::NEG_Z)
    }

    #[test]
    fn ndc_maps_corners_and_centre() {
        let size = Vec2::new(800.0, 600.0);
        assert_eq!(cursor_to_ndc(Vec2::new(400.0, 300.0), size), Some(Vec2::ZERO));
        assert_eq!(
            cursor_to_ndc(Vec2::ZERO, size),
            Some(Vec2::new(-1.0, 1.0))
        );
        assert_eq!(cursor_to_ndc(size, size), Some(Vec2::new(1.0, -1.0)));
        assert_eq!(cursor_to_ndc(Vec2::ZERO, Vec2::ZERO), None);
    }

    #[test]
    fn centre_ray_follows_camera_forward() {
        let projection = Mat4::perspective_infinite_reverse_rh(1.0, 4.0 / 3.0, 0.1);
        let world_from_view = Mat4::from_translation(Vec3::new(0.0, 0.0, 10.0));
        let world_from_clip = world_from_view * projection.inverse();

        let ray = ray_from_ndc(world_from_clip, Vec2::ZERO).expect("ray");
        assert!(ray.origin.distance(Vec3::new(0.0, 0.0, 9.9)) < 1e-3);
        assert!(ray.direction.distance(Vec3::NEG_Z) < 1e-4);

        let distance = ray_sphere(ray, Vec3::ZERO, 1.0).expect("sphere hit");
        assert!((distance - 8.9).abs() < 1e-3);
    }

    #[test]
    fn off_centre_ray_points_away_from_axis() {
        let projection = Mat4::perspective_infinite_reverse_rh(1.0, 1.0, 0.1);
        let world_from_clip = projection.inverse();

        let ray = ray_from_ndc(world_from_clip, Vec2::new(1.0, 0.0)).expect("ray");
        assert!(ray.direction.x > 0.0);
        assert!(ray.direction.z < 0.0);
    }

    #[test]
    fn sphere_misses_and_behind_origin() {
        let ray = forward_ray(Vec3::new(0.0, 0.0, 10.0));
        assert_eq!(ray_sphere(ray, Vec3::new(5.0, 0.0, 0.0), 1.0), None);
        assert_eq!(ray_sphere(ray, Vec3::new(0.0, 0.0, 20.0), 1.0), None);

        // Starting inside the sphere reports the exit point.
        let inside = ray_sphere(ray, Vec3::new(0.0, 0.0, 10.0), 2.0).expect("hit");
        assert!((inside - 2.0).abs() < 1e-5);
    }

    #[test]
    fn quad_respects_extent_and_transform() {
        let ray = forward_ray(Vec3::new(0.0, 0.0, 10.0));
        let quad = Affine3A::from_translation(Vec3::new(0.5, 0.0, 2.0));

        let distance = ray_quad(ray, quad, Vec2::splat(1.0)).expect("hit");
        assert!((distance - 8.0).abs() < 1e-5);
        assert_eq!(ray_quad(ray, quad, Vec2::splat(0.25)), None);

        let edge_on = Affine3A::from_rotation_y(std::f32::consts::FRAC_PI_2);
        assert_eq!(ray_quad(ray, edge_on, Vec2::splat(1.0)), None);

        let collapsed = Affine3A::from_scale(Vec3::ZERO);
        assert_eq!(ray_quad(ray, collapsed, Vec2::splat(1.0)), None);
    }

    #[test]
    fn nearest_hit_prefers_closest() {
        let hit = nearest_hit([
            Hit {
                target: PickTarget::Body("skills".into()),
                distance: 12.0,
            },
            Hit {
                target: PickTarget::CloseButton,
                distance: 7.5,
            },
        ])
        .expect("hit");
        assert_eq!(hit.target, PickTarget::CloseButton);
        assert!(nearest_hit(Vec::new()).is_none());
    }

    fn close_quad_at(z: f32) -> (Affine3A, Vec2) {
        (
            Affine3A::from_translation(Vec3::new(0.0, 0.0, z)),
            Vec2::splat(1.0),
        )
    }

    #[test]
    fn close_control_in_front_of_a_body_wins() {
        let action = resolve_click(
            forward_ray(Vec3::new(0.0, 0.0, 50.0)),
            [("skills", Vec3::ZERO, 3.0)],
            [close_quad_at(10.0)],
        );
        assert_eq!(action, Some(UiAction::clear_selection()));
    }

    #[test]
    fn body_hit_alone_selects_that_body() {
        let action = resolve_click(
            forward_ray(Vec3::new(0.0, 0.0, 50.0)),
            [("skills", Vec3::ZERO, 3.0), ("contact", Vec3::new(20.0, 0.0, 0.0), 3.0)],
            [],
        );
        assert_eq!(action, Some(UiAction::select("skills")));

        // The nearer of two bodies along the ray is picked.
        let hit = pick_target(
            forward_ray(Vec3::new(0.0, 0.0, 50.0)),
            [("far", Vec3::ZERO, 3.0), ("near", Vec3::new(0.0, 0.0, 20.0), 3.0)],
            [],
        )
        .expect("hit");
        assert_eq!(hit.target, PickTarget::Body("near".into()));
    }

    #[test]
    fn missing_everything_does_nothing() {
        let action = resolve_click(
            forward_ray(Vec3::new(100.0, 0.0, 50.0)),
            [("skills", Vec3::ZERO, 3.0)],
            [close_quad_at(10.0)],
        );
        assert_eq!(action, None);
    }
}
