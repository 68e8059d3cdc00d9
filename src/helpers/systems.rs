// src/helpers/systems.rs
//
// Debug helpers: world axes, a ground grid, and per-body/per-pivot axes.
// Entities are added and removed on visibility edges; gizmos draw them.

use bevy::prelude::*;

use crate::core::OrreryConfig;
use crate::scene::components::{CelestialBody, OrbitPivot};

use super::edges::{HelperEdgeDetector, HelperTransition};

const X_AXIS_COLOR: Color = Color::srgb(1.0, 0.2, 0.2);
const Y_AXIS_COLOR: Color = Color::srgb(0.2, 1.0, 0.2);
const Z_AXIS_COLOR: Color = Color::srgb(0.2, 0.4, 1.0);
const GRID_COLOR: Color = Color::srgba(0.5, 0.5, 0.5, 0.35);

/// Marks every entity that exists only while helpers are shown.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct HelperVisual;

#[derive(Component, Debug, Clone, Copy)]
pub struct DebugAxes {
    pub length: f32,
}

#[derive(Component, Debug, Clone, Copy)]
pub struct DebugGrid {
    pub size: f32,
    pub divisions: u32,
}

/// Line segments of a square grid on the XZ plane, centred on the origin.
pub fn grid_lines(size: f32, divisions: u32) -> Vec<(Vec3, Vec3)> {
    let divisions = divisions.max(1);
    let half = size * 0.5;
    let step = size / divisions as f32;

    (0..=divisions)
        .flat_map(|index| {
            let offset = -half + step * index as f32;
            [
                (Vec3::new(-half, 0.0, offset), Vec3::new(half, 0.0, offset)),
                (Vec3::new(offset, 0.0, -half), Vec3::new(offset, 0.0, half)),
            ]
        })
        .collect()
}

/// Adds or removes helper entities when helper visibility flips.
pub fn apply_helper_transitions(
    mut commands: Commands,
    detector: Res<HelperEdgeDetector>,
    config: Res<OrreryConfig>,
    visuals: Query<Entity, With<HelperVisual>>,
    bodies: Query<Entity, With<CelestialBody>>,
    pivots: Query<Entity, With<OrbitPivot>>,
) {
    // Only the latest edge matters; earlier ones this frame cancel out.
    let Some(transition) = detector.drain().last().copied() else {
        return;
    };

    match transition {
        HelperTransition::Shown => {
            if !visuals.is_empty() {
                return;
            }

            let settings = &config.helpers;
            commands.spawn((
                Transform::default(),
                DebugAxes {
                    length: settings.axes_length,
                },
                HelperVisual,
                Name::new("World Axes"),
            ));
            commands.spawn((
                Transform::default(),
                DebugGrid {
                    size: settings.grid_size,
                    divisions: settings.grid_divisions,
                },
                HelperVisual,
                Name::new("Ground Grid"),
            ));

            for owner in bodies.iter().chain(pivots.iter()) {
                commands.spawn((
                    Transform::default(),
                    DebugAxes {
                        length: settings.object_axes_length,
                    },
                    HelperVisual,
                    ChildOf(owner),
                ));
            }
            info!("Helpers shown");
        }
        HelperTransition::Hidden => {
            for entity in visuals.iter() {
                commands.entity(entity).despawn();
            }
            info!("Helpers hidden");
        }
    }
}

/// Draws helper axes and grids with gizmos.
pub fn draw_helpers(
    mut gizmos: Gizmos,
    axes: Query<(&DebugAxes, &GlobalTransform)>,
    grids: Query<(&DebugGrid, &GlobalTransform)>,
) {
    for (axes, transform) in axes.iter() {
        let origin = transform.translation();
        gizmos.line(origin, origin + transform.right() * axes.length, X_AXIS_COLOR);
        gizmos.line(origin, origin + transform.up() * axes.length, Y_AXIS_COLOR);
        gizmos.line(origin, origin + transform.back() * axes.length, Z_AXIS_COLOR);
    }

    for (grid, transform) in grids.iter() {
        for (start, end) in grid_lines(grid.size, grid.divisions) {
            gizmos.line(
                transform.transform_point(start),
                transform.transform_point(end),
                GRID_COLOR,
            );
        }
    }
}
