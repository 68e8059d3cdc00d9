// src/scene/labels.rs
//
// Section labels: resolve the label font, then give every body a text quad
// above it. Each quad is textured by its own off-screen UI camera.

use std::time::Duration;

use bevy::{
    asset::LoadState,
    camera::RenderTarget,
    prelude::*,
    tasks::{block_on, futures_lite::future, IoTaskPool, Task},
};
use reqwest::blocking::Client;

use crate::content::SectionTable;
use crate::core::{config::LabelSettings, OrreryConfig, OrreryError};
use crate::panel::canvas::allocate_canvas_image;

use super::components::{Billboard, CelestialBody, LabelCanvasCamera, OrbitPivot, SectionLabel};

// Visual constants
const LABEL_COLOR: Color = Color::WHITE;
const LABEL_CANVAS_WIDTH: u32 = 512;
const LABEL_CANVAS_HEIGHT: u32 = 128;
const LABEL_CAMERA_ORDER: isize = -2;
const TRANSPARENT: [u8; 4] = [0; 4];

/// Progress of the label font.
#[derive(Resource, Debug, Default)]
pub enum LabelFont {
    /// Nothing requested yet.
    #[default]
    Unresolved,
    Loading(Handle<Font>),
    Fetching,
    Ready(Handle<Font>),
    /// Resolution failed; labels are never created.
    Unavailable,
}

/// Remote font download running on the IO task pool.
#[derive(Resource)]
pub struct FontFetchTask(Task<Result<Vec<u8>, OrreryError>>);

/// Where the label font should come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontSource {
    Asset(String),
    Remote(String),
    Builtin,
}

impl FontSource {
    /// A local asset wins over a remote URL; with neither, the built-in font.
    pub fn from_settings(settings: &LabelSettings) -> Self {
        if let Some(path) = &settings.font_path {
            Self::Asset(path.clone())
        } else if let Some(url) = &settings.font_url {
            Self::Remote(url.clone())
        } else {
            Self::Builtin
        }
    }
}

fn fetch_font_bytes(url: &str, timeout: Duration) -> Result<Vec<u8>, OrreryError> {
    let client = Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|err| OrreryError::font_fetch(url, err))?;

    let response = client
        .get(url)
        .send()
        .map_err(|err| OrreryError::font_fetch(url, err))?;

    let status = response.status();
    if !status.is_success() {
        return Err(OrreryError::font_fetch(url, format!("HTTP {}", status)));
    }

    let bytes = response
        .bytes()
        .map_err(|err| OrreryError::font_fetch(url, err))?;
    Ok(bytes.to_vec())
}

/// Kicks off label font resolution at startup.
pub fn begin_font_resolution(
    mut commands: Commands,
    config: Res<OrreryConfig>,
    asset_server: Res<AssetServer>,
    mut font: ResMut<LabelFont>,
) {
    let settings = &config.labels;
    match FontSource::from_settings(settings) {
        FontSource::Asset(path) => {
            info!("Loading label font from {}", path);
            *font = LabelFont::Loading(asset_server.load(path));
        }
        FontSource::Remote(url) => {
            info!("Fetching label font from {}", url);
            let timeout = Duration::from_secs(settings.fetch_timeout_secs);
            let task = IoTaskPool::get().spawn(async move { fetch_font_bytes(&url, timeout) });
            commands.insert_resource(FontFetchTask(task));
            *font = LabelFont::Fetching;
        }
        FontSource::Builtin => {
            *font = LabelFont::Ready(Handle::default());
        }
    }
}

/// Moves the font from loading/fetching to ready or unavailable.
pub fn poll_label_font(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut fonts: ResMut<Assets<Font>>,
    mut font: ResMut<LabelFont>,
    task: Option<ResMut<FontFetchTask>>,
) {
    let next = match &*font {
        LabelFont::Loading(handle) => match asset_server.get_load_state(handle.id()) {
            Some(LoadState::Loaded) => Some(LabelFont::Ready(handle.clone())),
            Some(LoadState::Failed(err)) => {
                warn!(
                    "{}. Labels will not be shown.",
                    OrreryError::asset_load_failed("label font", err)
                );
                Some(LabelFont::Unavailable)
            }
            _ => None,
        },
        LabelFont::Fetching => match task {
            None => Some(LabelFont::Unavailable),
            Some(mut task) => block_on(future::poll_once(&mut task.0)).map(|result| {
                commands.remove_resource::<FontFetchTask>();
                let parsed = result.and_then(|bytes| {
                    Font::try_from_bytes(bytes)
                        .map_err(|err| OrreryError::font_fetch("label font", err))
                });
                match parsed {
                    Ok(loaded) => {
                        info!("Label font fetched");
                        LabelFont::Ready(fonts.add(loaded))
                    }
                    Err(err) => {
                        warn!("{}. Labels will not be shown.", err);
                        LabelFont::Unavailable
                    }
                }
            }),
        },
        _ => None,
    };

    if let Some(next) = next {
        *font = next;
    }
}

/// World size of a label quad; the width follows the canvas aspect ratio.
pub fn label_quad_size(world_height: f32) -> Vec2 {
    let aspect = LABEL_CANVAS_WIDTH as f32 / LABEL_CANVAS_HEIGHT as f32;
    Vec2::new(world_height * aspect, world_height)
}

/// Local position of a label's centre, so its lower edge floats `lift`
/// above the body.
pub fn label_offset(body_translation: Vec3, body_radius: f32, settings: &LabelSettings) -> Vec3 {
    body_translation + Vec3::Y * (body_radius + settings.lift + settings.world_height * 0.5)
}

fn spawn_label_canvas(
    commands: &mut Commands,
    image: Handle<Image>,
    font: Handle<Font>,
    font_size: f32,
    title: String,
) -> Entity {
    let camera = commands
        .spawn((
            Camera2d,
            Camera {
                target: RenderTarget::Image(image.into()),
                order: LABEL_CAMERA_ORDER,
                clear_color: ClearColorConfig::Custom(Color::NONE),
                ..default()
            },
            LabelCanvasCamera,
            Name::new(format!("Label Canvas Camera ({})", title)),
        ))
        .id();

    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            UiTargetCamera(camera),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(title),
                TextFont {
                    font,
                    font_size,
                    ..default()
                },
                TextColor(LABEL_COLOR),
            ));
        });

    camera
}

/// Creates one billboarded text quad per body the first time the font is
/// ready.
#[allow(clippy::too_many_arguments)]
pub fn spawn_labels_when_ready(
    mut commands: Commands,
    font: Res<LabelFont>,
    config: Res<OrreryConfig>,
    table: Res<SectionTable>,
    existing: Query<(), With<SectionLabel>>,
    bodies: Query<(&CelestialBody, &Transform, &ChildOf)>,
    pivots: Query<&OrbitPivot>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut images: ResMut<Assets<Image>>,
) -> Result {
    let LabelFont::Ready(handle) = &*font else {
        return Ok(());
    };
    if !existing.is_empty() {
        return Ok(());
    }

    let settings = &config.labels;
    let quad = meshes.add(Rectangle::from_size(label_quad_size(settings.world_height)));
    let mut spawned = 0;
    for (body, transform, child_of) in bodies.iter() {
        let pivot = child_of.parent();
        if pivots.get(pivot).is_err() {
            continue;
        }

        let title = table
            .for_key(&body.key)
            .map(|section| section.title.clone())
            .unwrap_or_else(|| body.key.clone());
        let image = images.add(allocate_canvas_image(
            LABEL_CANVAS_WIDTH,
            LABEL_CANVAS_HEIGHT,
            TRANSPARENT,
        )?);
        let canvas_camera = spawn_label_canvas(
            &mut commands,
            image.clone(),
            handle.clone(),
            settings.font_size,
            title,
        );

        commands.spawn((
            Mesh3d(quad.clone()),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color_texture: Some(image),
                unlit: true,
                alpha_mode: AlphaMode::Blend,
                cull_mode: None,
                ..default()
            })),
            Transform::from_translation(label_offset(transform.translation, body.radius, settings)),
            SectionLabel {
                key: body.key.clone(),
                canvas_camera,
            },
            Billboard,
            ChildOf(pivot),
            Name::new(format!("Label ({})", body.key)),
        ));
        spawned += 1;
    }

    if spawned > 0 {
        info!("Spawned {} section labels", spawned);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::components::Orbit;

    fn label_settings(path: Option<&str>, url: Option<&str>) -> LabelSettings {
        let mut settings = OrreryConfig::default().labels;
        settings.font_path = path.map(str::to_string);
        settings.font_url = url.map(str::to_string);
        settings
    }

    #[test]
    fn font_source_prefers_local_asset() {
        assert_eq!(
            FontSource::from_settings(&label_settings(Some("fonts/a.ttf"), Some("https://x"))),
            FontSource::Asset("fonts/a.ttf".into())
        );
        assert_eq!(
            FontSource::from_settings(&label_settings(None, Some("https://x"))),
            FontSource::Remote("https://x".into())
        );
        assert_eq!(
            FontSource::from_settings(&label_settings(None, None)),
            FontSource::Builtin
        );
    }

    #[test]
    fn label_quad_keeps_canvas_aspect() {
        assert_eq!(label_quad_size(1.5), Vec2::new(6.0, 1.5));
    }

    fn label_app(font: LabelFont) -> App {
        let mut app = App::new();
        app.insert_resource(font)
            .insert_resource(OrreryConfig::default())
            .insert_resource(SectionTable::builtin())
            .init_resource::<Assets<Mesh>>()
            .init_resource::<Assets<StandardMaterial>>()
            .init_resource::<Assets<Image>>()
            .add_systems(Update, spawn_labels_when_ready);

        let pivot = app
            .world_mut()
            .spawn((
                Transform::default(),
                OrbitPivot {
                    key: "education".into(),
                },
                Orbit::default(),
            ))
            .id();
        app.world_mut().spawn((
            Transform::from_xyz(23.0, 0.0, 0.0),
            CelestialBody {
                key: "education".into(),
                radius: 2.6,
            },
            ChildOf(pivot),
        ));
        app
    }

    #[test]
    fn labels_wait_for_the_font() {
        let mut app = label_app(LabelFont::Fetching);
        app.update();

        let world = app.world_mut();
        assert_eq!(world.query::<&SectionLabel>().iter(world).count(), 0);
        assert_eq!(world.query::<&LabelCanvasCamera>().iter(world).count(), 0);
    }

    #[test]
    fn ready_font_spawns_one_label_quad_per_body_once() {
        let mut app = label_app(LabelFont::Ready(Handle::default()));
        app.update();
        app.update();

        let settings = app.world().resource::<OrreryConfig>().labels.clone();
        let world = app.world_mut();
        let labels: Vec<(Transform, Entity, Entity)> = world
            .query_filtered::<(&Transform, &ChildOf, &SectionLabel), (With<Mesh3d>, With<Billboard>)>()
            .iter(world)
            .map(|(transform, child_of, label)| (*transform, child_of.parent(), label.canvas_camera))
            .collect();
        assert_eq!(labels.len(), 1);
        let (transform, parent, canvas_camera) = labels[0];
        assert!(world.get::<OrbitPivot>(parent).is_some());
        let expected_y = 2.6 + settings.lift + settings.world_height * 0.5;
        assert!((transform.translation.y - expected_y).abs() < 1e-5);
        assert!((transform.translation.x - 23.0).abs() < 1e-5);

        assert!(world.get::<LabelCanvasCamera>(canvas_camera).is_some());
        let target = world.get::<Camera>(canvas_camera).map(|camera| camera.target.clone());
        assert!(matches!(target, Some(RenderTarget::Image(_))));
        assert_eq!(world.query::<&LabelCanvasCamera>().iter(world).count(), 1);

        let texts: Vec<String> = world
            .query::<&Text>()
            .iter(world)
            .map(|text| text.0.clone())
            .collect();
        assert_eq!(texts, ["Education"]);
    }
}
