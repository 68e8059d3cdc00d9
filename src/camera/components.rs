//! Orbit-style camera controller with damping.
use std::f32::consts::FRAC_PI_2;

use bevy::prelude::*;

use crate::core::config::CameraSettings;

const PITCH_LIMIT: f32 = FRAC_PI_2 - 0.01;
const REST_EPSILON: f32 = 1e-5;

/// Orbits the camera around a focus point. Input accumulates into velocities
/// that are applied a fraction at a time and decay by the damping factor.
#[derive(Component, Debug, Clone)]
pub struct OrbitCamera {
    pub focus: Vec3,
    yaw: f32,
    pitch: f32,
    radius: f32,
    yaw_velocity: f32,
    pitch_velocity: f32,
    radius_velocity: f32,
    pub damping: f32,
    pub rotate_sensitivity: f32,
    pub zoom_sensitivity: f32,
    pub min_radius: f32,
    pub max_radius: f32,
}

impl OrbitCamera {
    pub fn new(position: Vec3, focus: Vec3, settings: &CameraSettings) -> Self {
        let mut camera = Self {
            focus,
            yaw: 0.0,
            pitch: 0.0,
            radius: 1.0,
            yaw_velocity: 0.0,
            pitch_velocity: 0.0,
            radius_velocity: 0.0,
            damping: settings.damping_factor,
            rotate_sensitivity: settings.rotate_sensitivity,
            zoom_sensitivity: settings.zoom_sensitivity,
            min_radius: settings.min_distance,
            max_radius: settings.max_distance,
        };
        camera.sync_to(position);
        camera
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Re-derives the orbit from an externally placed camera position and
    /// drops any residual motion.
    pub fn sync_to(&mut self, position: Vec3) {
        let offset = position - self.focus;
        let radius = offset.length();
        if radius > f32::EPSILON {
            self.radius = radius;
            self.yaw = offset.x.atan2(offset.z);
            self.pitch = (offset.y / radius).clamp(-1.0, 1.0).asin().clamp(-PITCH_LIMIT, PITCH_LIMIT);
        }
        self.yaw_velocity = 0.0;
        self.pitch_velocity = 0.0;
        self.radius_velocity = 0.0;
    }

    /// Queues a rotation from a pointer drag in pixels.
    pub fn add_rotation(&mut self, drag: Vec2) {
        self.yaw_velocity -= drag.x * self.rotate_sensitivity;
        self.pitch_velocity += drag.y * self.rotate_sensitivity;
    }

    /// Queues a dolly; positive scroll moves towards the focus.
    pub fn add_zoom(&mut self, scroll: f32) {
        self.radius_velocity -= scroll * self.zoom_sensitivity;
    }

    /// Applies one frame of damped motion. Returns `true` while still moving.
    pub fn update(&mut self) -> bool {
        let factor = if self.damping > 0.0 { self.damping } else { 1.0 };

        self.yaw += self.yaw_velocity * factor;
        self.pitch = (self.pitch + self.pitch_velocity * factor).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.radius = (self.radius + self.radius_velocity * factor)
            .clamp(self.min_radius, self.max_radius);

        let decay = 1.0 - factor;
        self.yaw_velocity *= decay;
        self.pitch_velocity *= decay;
        self.radius_velocity *= decay;

        self.yaw_velocity.abs() > REST_EPSILON
            || self.pitch_velocity.abs() > REST_EPSILON
            || self.radius_velocity.abs() > REST_EPSILON
    }

    /// World position implied by the current orbit.
    pub fn position(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        self.focus
            + self.radius * Vec3::new(cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::OrreryConfig;

    fn settings() -> CameraSettings {
        OrreryConfig::default().camera
    }

    #[test]
    fn sync_reproduces_the_position() {
        let position = Vec3::new(12.0, 20.0, 70.0);
        let camera = OrbitCamera::new(position, Vec3::ZERO, &settings());
        assert!(camera.position().distance(position) < 1e-3);
    }

    #[test]
    fn damping_decays_motion_to_rest() {
        let mut camera = OrbitCamera::new(Vec3::new(0.0, 0.0, 80.0), Vec3::ZERO, &settings());
        camera.add_rotation(Vec2::new(100.0, 0.0));
        let start_yaw = camera.yaw();

        assert!(camera.update());
        let first_step = (camera.yaw() - start_yaw).abs();
        let before = camera.yaw();
        camera.update();
        let second_step = (camera.yaw() - before).abs();
        assert!(second_step < first_step);

        let mut frames = 0;
        while camera.update() {
            frames += 1;
            assert!(frames < 10_000, "damping never settled");
        }
    }

    #[test]
    fn zoom_respects_distance_limits() {
        let settings = settings();
        let mut camera = OrbitCamera::new(Vec3::new(0.0, 0.0, 80.0), Vec3::ZERO, &settings);
        camera.add_zoom(10_000.0);
        for _ in 0..500 {
            camera.update();
        }
        assert_eq!(camera.radius(), settings.min_distance);
    }

    #[test]
    fn pitch_never_flips_over_the_pole() {
        let mut camera = OrbitCamera::new(Vec3::new(0.0, 0.0, 80.0), Vec3::ZERO, &settings());
        camera.add_rotation(Vec2::new(0.0, 1.0e6));
        camera.update();
        assert!(camera.pitch() <= PITCH_LIMIT);
    }
}
