//! Layout of the celestial bodies, one per resume section.
use bevy::prelude::*;

/// Static description of a single orbiting body.
#[derive(Debug, Clone, Copy)]
pub struct BodySpec {
    /// Section key shared with the content table and the UI store.
    pub key: &'static str,
    pub radius: f32,
    /// Distance from the sun along the pivot's local X axis.
    pub distance: f32,
    /// Orbit angle added to the pivot every frame (radians).
    pub orbit_speed: f32,
    /// Spin angle added to the body every frame (radians).
    pub spin_speed: f32,
    /// Flat colour used until (or instead of) the texture.
    pub color: Color,
    pub texture: Option<&'static str>,
    pub ring: bool,
}

pub const BODIES: &[BodySpec] = &[
    BodySpec {
        key: "skills",
        radius: 3.0,
        distance: 16.0,
        orbit_speed: 0.010,
        spin_speed: 0.010,
        color: Color::srgb(0.85, 0.72, 0.45),
        texture: Some("textures/venus.jpg"),
        ring: false,
    },
    BodySpec {
        key: "education",
        radius: 2.6,
        distance: 23.0,
        orbit_speed: 0.008,
        spin_speed: 0.003,
        color: Color::srgb(0.78, 0.35, 0.22),
        texture: Some("textures/mars.jpg"),
        ring: false,
    },
    BodySpec {
        key: "experience",
        radius: 4.5,
        distance: 31.0,
        orbit_speed: 0.006,
        spin_speed: 0.008,
        color: Color::srgb(0.80, 0.66, 0.52),
        texture: Some("textures/jupiter.jpg"),
        ring: false,
    },
    BodySpec {
        key: "certifications",
        radius: 3.8,
        distance: 40.0,
        orbit_speed: 0.004,
        spin_speed: 0.006,
        color: Color::srgb(1.0, 1.0, 0.88),
        texture: Some("textures/moon.jpg"),
        ring: true,
    },
    BodySpec {
        key: "contact",
        radius: 2.2,
        distance: 48.0,
        orbit_speed: 0.002,
        spin_speed: 0.015,
        color: Color::srgb(0.5, 0.5, 0.5),
        texture: Some("textures/venus_surface.jpg"),
        ring: false,
    },
    BodySpec {
        key: "languages",
        radius: 2.8,
        distance: 55.0,
        orbit_speed: 0.005,
        spin_speed: 0.007,
        color: Color::srgb(0.25, 0.45, 0.85),
        texture: Some("textures/earth.jpg"),
        ring: false,
    },
    BodySpec {
        key: "soft_skills",
        radius: 3.4,
        distance: 63.0,
        orbit_speed: 0.003,
        spin_speed: 0.004,
        color: Color::srgb(0.30, 0.55, 0.90),
        texture: Some("textures/neptune.jpg"),
        ring: false,
    },
];

/// Looks up a body by its section key.
pub fn body_spec(key: &str) -> Option<&'static BodySpec> {
    BODIES.iter().find(|spec| spec.key == key)
}

/// Section keys in orbit order, as published to the UI store.
pub fn body_keys() -> Vec<String> {
    BODIES.iter().map(|spec| spec.key.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn keys_are_unique_and_ordered_by_distance() {
        let keys: HashSet<_> = BODIES.iter().map(|spec| spec.key).collect();
        assert_eq!(keys.len(), BODIES.len());

        assert!(BODIES
            .windows(2)
            .all(|pair| pair[0].distance < pair[1].distance));
    }

    #[test]
    fn orbits_clear_their_neighbours() {
        for pair in BODIES.windows(2) {
            let gap = pair[1].distance - pair[0].distance;
            assert!(
                gap > pair[0].radius + pair[1].radius,
                "{} and {} overlap",
                pair[0].key,
                pair[1].key
            );
        }
    }

    #[test]
    fn lookup_by_key() {
        assert_eq!(body_spec("contact").map(|spec| spec.ring), Some(false));
        assert!(body_spec("certifications").is_some_and(|spec| spec.ring));
        assert!(body_spec("pluto").is_none());
        assert_eq!(body_keys().first().map(String::as_str), Some("skills"));
    }
}
