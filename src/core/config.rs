//! Orrery configuration: TOML file parsing and the typed settings resource.
use std::{env, fs, path::PathBuf};

use bevy::prelude::*;
use serde::Deserialize;

use crate::camera::tween::ZoomPolicy;

const DEFAULT_CONFIG_PATH: &str = "config/orrery.toml";
const CONFIG_PATH_ENV: &str = "ORRERY_CONFIG";
const MIN_TWEEN_STEP: f32 = 0.0001;

#[derive(Debug, Clone, Deserialize, Default)]
struct RawOrreryConfig {
    #[serde(default)]
    camera: RawCameraSection,
    #[serde(default)]
    zoom: RawZoomSection,
    #[serde(default)]
    panel: RawPanelSection,
    #[serde(default)]
    labels: RawLabelSection,
    #[serde(default)]
    helpers: RawHelperSection,
    #[serde(default)]
    scene: RawSceneSection,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawCameraSection {
    start_position: [f32; 3],
    fov_degrees: f32,
    damping_factor: f32,
    rotate_sensitivity: f32,
    zoom_sensitivity: f32,
    min_distance: f32,
    max_distance: f32,
}

impl Default for RawCameraSection {
    fn default() -> Self {
        Self {
            start_position: [0.0, 0.0, 80.0],
            fov_degrees: 75.0,
            damping_factor: 0.05,
            rotate_sensitivity: 0.004,
            zoom_sensitivity: 2.0,
            min_distance: 12.0,
            max_distance: 250.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawZoomSection {
    zoom_in_step: f32,
    zoom_back_step: f32,
    view_distance: f32,
    home_position: Option<[f32; 3]>,
    policy: ZoomPolicy,
}

impl Default for RawZoomSection {
    fn default() -> Self {
        Self {
            zoom_in_step: 0.02,
            zoom_back_step: 0.02,
            view_distance: 18.0,
            home_position: None,
            policy: ZoomPolicy::LastWriteWins,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawPanelSection {
    distance: f32,
    size: f32,
    canvas_width: u32,
    canvas_height: u32,
    close_offset: [f32; 3],
    close_size: f32,
    open_speed: f32,
}

impl Default for RawPanelSection {
    fn default() -> Self {
        Self {
            distance: 25.0,
            size: 20.0,
            canvas_width: 512,
            canvas_height: 512,
            close_offset: [8.0, 8.0, 0.05],
            close_size: 2.0,
            open_speed: 0.05,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawLabelSection {
    font_path: Option<String>,
    font_url: Option<String>,
    fetch_timeout_secs: u64,
    font_size: f32,
    world_height: f32,
    lift: f32,
}

impl Default for RawLabelSection {
    fn default() -> Self {
        Self {
            font_path: None,
            font_url: None,
            fetch_timeout_secs: 10,
            font_size: 64.0,
            world_height: 1.5,
            lift: 1.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawHelperSection {
    axes_length: f32,
    object_axes_length: f32,
    grid_size: f32,
    grid_divisions: u32,
}

impl Default for RawHelperSection {
    fn default() -> Self {
        Self {
            axes_length: 10.0,
            object_axes_length: 4.0,
            grid_size: 50.0,
            grid_divisions: 50,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawSceneSection {
    sun_radius: f32,
    sky_radius: f32,
    sky_texture: Option<String>,
    star_count: u32,
    star_shell_radius: f32,
}

impl Default for RawSceneSection {
    fn default() -> Self {
        Self {
            sun_radius: 8.0,
            sky_radius: 450.0,
            sky_texture: Some("textures/stars.jpg".to_string()),
            star_count: 600,
            star_shell_radius: 320.0,
        }
    }
}

/// Camera placement and orbit-control tuning.
#[derive(Debug, Clone)]
pub struct CameraSettings {
    pub start_position: Vec3,
    pub fov_radians: f32,
    pub damping_factor: f32,
    pub rotate_sensitivity: f32,
    pub zoom_sensitivity: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

/// Zoom-in / zoom-back interpolation tuning.
#[derive(Debug, Clone)]
pub struct ZoomSettings {
    pub zoom_in_step: f32,
    pub zoom_back_step: f32,
    pub view_distance: f32,
    pub home_position: Vec3,
    pub policy: ZoomPolicy,
}

/// Info panel geometry and canvas resolution.
#[derive(Debug, Clone)]
pub struct PanelSettings {
    pub distance: f32,
    pub size: f32,
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub close_offset: Vec3,
    pub close_size: f32,
    pub open_speed: f32,
}

/// Where the label font comes from and how labels are laid out.
#[derive(Debug, Clone)]
pub struct LabelSettings {
    pub font_path: Option<String>,
    pub font_url: Option<String>,
    pub fetch_timeout_secs: u64,
    /// Glyph size in label canvas pixels.
    pub font_size: f32,
    /// Height of the label quad in world units.
    pub world_height: f32,
    pub lift: f32,
}

#[derive(Debug, Clone)]
pub struct HelperSettings {
    pub axes_length: f32,
    pub object_axes_length: f32,
    pub grid_size: f32,
    pub grid_divisions: u32,
}

#[derive(Debug, Clone)]
pub struct SceneSettings {
    pub sun_radius: f32,
    pub sky_radius: f32,
    pub sky_texture: Option<String>,
    pub star_count: u32,
    pub star_shell_radius: f32,
}

/// Typed, sanitised configuration shared by every plugin.
#[derive(Resource, Debug, Clone)]
pub struct OrreryConfig {
    pub camera: CameraSettings,
    pub zoom: ZoomSettings,
    pub panel: PanelSettings,
    pub labels: LabelSettings,
    pub helpers: HelperSettings,
    pub scene: SceneSettings,
}

impl OrreryConfig {
    /// Reads the TOML file named by `ORRERY_CONFIG` (or `config/orrery.toml`),
    /// falling back to defaults when it is missing or malformed.
    pub fn load_or_default() -> Self {
        let path = env::var(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));

        match fs::read_to_string(&path) {
            Ok(data) => Self::from_toml_str(&data).unwrap_or_else(|err| {
                warn!(
                    "Failed to parse {} ({}). Falling back to defaults.",
                    path.display(),
                    err
                );
                Self::default()
            }),
            Err(err) => {
                warn!(
                    "Failed to read {} ({}). Falling back to defaults.",
                    path.display(),
                    err
                );
                Self::default()
            }
        }
    }

    pub fn from_toml_str(data: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<RawOrreryConfig>(data).map(Into::into)
    }
}

impl Default for OrreryConfig {
    fn default() -> Self {
        RawOrreryConfig::default().into()
    }
}

impl From<RawOrreryConfig> for OrreryConfig {
    fn from(value: RawOrreryConfig) -> Self {
        let camera = value.camera;
        let zoom = value.zoom;
        let panel = value.panel;
        let labels = value.labels;
        let helpers = value.helpers;
        let scene = value.scene;

        let start_position = Vec3::from_array(camera.start_position);
        let min_distance = camera.min_distance.max(0.5);
        let max_distance = camera.max_distance.max(min_distance);

        Self {
            camera: CameraSettings {
                start_position,
                fov_radians: camera.fov_degrees.clamp(10.0, 150.0).to_radians(),
                damping_factor: camera.damping_factor.clamp(0.0, 1.0),
                rotate_sensitivity: camera.rotate_sensitivity.max(0.0),
                zoom_sensitivity: camera.zoom_sensitivity.max(0.0),
                min_distance,
                max_distance,
            },
            zoom: ZoomSettings {
                zoom_in_step: zoom.zoom_in_step.clamp(MIN_TWEEN_STEP, 1.0),
                zoom_back_step: zoom.zoom_back_step.clamp(MIN_TWEEN_STEP, 1.0),
                view_distance: zoom.view_distance.max(1.0),
                home_position: zoom
                    .home_position
                    .map(Vec3::from_array)
                    .unwrap_or(start_position),
                policy: zoom.policy,
            },
            panel: PanelSettings {
                distance: panel.distance.max(1.0),
                size: panel.size.max(0.1),
                // Passed through unchanged; canvas allocation rejects zero sizes.
                canvas_width: panel.canvas_width,
                canvas_height: panel.canvas_height,
                close_offset: Vec3::from_array(panel.close_offset),
                close_size: panel.close_size.max(0.1),
                open_speed: panel.open_speed.clamp(MIN_TWEEN_STEP, 1.0),
            },
            labels: LabelSettings {
                font_path: labels.font_path.filter(|path| !path.trim().is_empty()),
                font_url: labels.font_url.filter(|url| !url.trim().is_empty()),
                fetch_timeout_secs: labels.fetch_timeout_secs.max(1),
                font_size: labels.font_size.max(4.0),
                world_height: labels.world_height.max(0.1),
                lift: labels.lift,
            },
            helpers: HelperSettings {
                axes_length: helpers.axes_length.max(0.0),
                object_axes_length: helpers.object_axes_length.max(0.0),
                grid_size: helpers.grid_size.max(1.0),
                grid_divisions: helpers.grid_divisions.max(1),
            },
            scene: SceneSettings {
                sun_radius: scene.sun_radius.max(0.1),
                sky_radius: scene.sky_radius.max(1.0),
                sky_texture: scene.sky_texture.filter(|path| !path.trim().is_empty()),
                star_count: scene.star_count,
                star_shell_radius: scene.star_shell_radius.max(1.0),
            },
        }
    }
}
