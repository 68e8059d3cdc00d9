// src/scene/components.rs
//
// Components attached to the sun, the orbiting bodies, their pivots, and labels.

use bevy::prelude::*;

/// A clickable sphere representing one resume section.
#[derive(Component, Debug, Clone)]
pub struct CelestialBody {
    /// Section key, shared with the content table and the UI store.
    pub key: String,
    /// Radius used for both the mesh and pointer hit tests.
    pub radius: f32,
}

/// Rotation of a body about its own Y axis.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Spin {
    pub angle: f32,
    /// Radians added every animated frame.
    pub speed: f32,
}

/// Invisible parent that carries a body around the sun.
#[derive(Component, Debug, Clone)]
pub struct OrbitPivot {
    pub key: String,
}

#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Orbit {
    pub angle: f32,
    /// Radians added every animated frame.
    pub speed: f32,
}

/// Entities whose local +Z axis is turned toward the camera every frame.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Billboard;

/// Text quad above a body, carried around by the body's pivot.
#[derive(Component, Debug, Clone)]
pub struct SectionLabel {
    pub key: String,
    /// Camera drawing the label text into the quad's texture.
    pub canvas_camera: Entity,
}

/// Off-screen camera rendering one label's text.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct LabelCanvasCamera;

#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Sun;

#[derive(Component, Debug, Clone, Copy, Default)]
pub struct SkySphere;

/// One point of the procedural star shell.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Star;

#[derive(Component, Debug, Clone, Copy, Default)]
pub struct PlanetRing;
