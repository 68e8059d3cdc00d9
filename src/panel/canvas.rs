// src/panel/canvas.rs
//
// Off-screen canvas for an info panel: an image render target, the 2D camera
// drawing into it, and the UI tree laid out for the section content.

use bevy::{
    asset::RenderAssetUsages,
    camera::RenderTarget,
    prelude::*,
    render::render_resource::{Extent3d, TextureDimension, TextureFormat, TextureUsages},
};

use crate::content::{PanelBody, PanelContent};
use crate::core::{config::PanelSettings, OrreryError};

use super::components::{PanelCanvasCamera, PanelCanvasRoot};

// Visual constants
const BACKGROUND: [u8; 4] = [34, 34, 68, 235];
const BACKGROUND_COLOR: Color = Color::srgba(0.133, 0.133, 0.267, 0.92);
const TITLE_COLOR: Color = Color::srgb(1.0, 0.9, 0.4);
const TEXT_COLOR: Color = Color::WHITE;
const HEADER_COLOR: Color = Color::srgb(0.55, 0.8, 1.0);
const CLOSE_GLYPH_COLOR: Color = Color::srgb(1.0, 0.45, 0.45);
const TITLE_SCALE: f32 = 0.07;
const BODY_SCALE: f32 = 0.042;
const PADDING_SCALE: f32 = 0.06;

/// Handles to everything spawned for one canvas.
#[derive(Debug, Clone)]
pub struct PanelCanvas {
    pub image: Handle<Image>,
    pub camera: Entity,
    pub root: Entity,
}

/// Allocates a render-target image filled with `fill`, refusing zero-sized
/// canvases.
pub fn allocate_canvas_image(
    width: u32,
    height: u32,
    fill: [u8; 4],
) -> Result<Image, OrreryError> {
    if width == 0 || height == 0 {
        return Err(OrreryError::canvas_unavailable(width, height));
    }

    let mut image = Image::new_fill(
        Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        &fill,
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::default(),
    );
    image.texture_descriptor.usage = TextureUsages::TEXTURE_BINDING
        | TextureUsages::COPY_DST
        | TextureUsages::RENDER_ATTACHMENT;
    Ok(image)
}

/// Spawns the canvas camera and UI tree for `content`.
pub fn spawn_panel_canvas(
    commands: &mut Commands,
    images: &mut Assets<Image>,
    settings: &PanelSettings,
    content: &PanelContent,
) -> Result<PanelCanvas, OrreryError> {
    let image = images.add(allocate_canvas_image(
        settings.canvas_width,
        settings.canvas_height,
        BACKGROUND,
    )?);

    let camera = commands
        .spawn((
            Camera2d,
            Camera {
                target: RenderTarget::Image(image.clone().into()),
                order: -1,
                clear_color: ClearColorConfig::Custom(BACKGROUND_COLOR),
                ..default()
            },
            PanelCanvasCamera,
            Name::new(format!("Panel Canvas Camera ({})", content.title)),
        ))
        .id();

    let height = settings.canvas_height as f32;
    let title_size = height * TITLE_SCALE;
    let body_size = height * BODY_SCALE;
    let padding = height * PADDING_SCALE;
    let glyph = close_glyph_position(settings, title_size);

    let root = commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Center,
                padding: UiRect::all(Val::Px(padding)),
                row_gap: Val::Px(body_size * 0.5),
                ..default()
            },
            UiTargetCamera(camera),
            PanelCanvasRoot,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(content.title.clone()),
                TextFont {
                    font_size: title_size,
                    ..default()
                },
                TextColor(TITLE_COLOR),
                Node {
                    margin: UiRect::bottom(Val::Px(body_size)),
                    ..default()
                },
            ));

            match &content.body {
                PanelBody::List(items) => {
                    for item in items {
                        parent.spawn((
                            Text::new(item.clone()),
                            TextFont {
                                font_size: body_size,
                                ..default()
                            },
                            TextColor(TEXT_COLOR),
                        ));
                    }
                }
                PanelBody::Timeline(entries) => {
                    for entry in entries {
                        parent
                            .spawn(Node {
                                width: Val::Percent(100.0),
                                flex_direction: FlexDirection::Column,
                                padding: UiRect::left(Val::Px(body_size * 0.5)),
                                border: UiRect::left(Val::Px(3.0)),
                                ..default()
                            })
                            .insert(BorderColor::all(HEADER_COLOR))
                            .with_children(|row| {
                                row.spawn((
                                    Text::new(entry.header.clone()),
                                    TextFont {
                                        font_size: body_size,
                                        ..default()
                                    },
                                    TextColor(HEADER_COLOR),
                                ));
                                if !entry.description.is_empty() {
                                    row.spawn((
                                        Text::new(entry.description.clone()),
                                        TextFont {
                                            font_size: body_size * 0.85,
                                            ..default()
                                        },
                                        TextColor(TEXT_COLOR),
                                    ));
                                }
                            });
                    }
                }
            }

            // Drawn where the close quad sits in front of the panel.
            parent.spawn((
                Text::new("X"),
                TextFont {
                    font_size: title_size,
                    ..default()
                },
                TextColor(CLOSE_GLYPH_COLOR),
                Node {
                    position_type: PositionType::Absolute,
                    left: Val::Px(glyph.x),
                    top: Val::Px(glyph.y),
                    ..default()
                },
            ));
        })
        .id();

    Ok(PanelCanvas {
        image,
        camera,
        root,
    })
}

/// Canvas pixel position of the close control's top-left glyph corner.
fn close_glyph_position(settings: &PanelSettings, glyph_size: f32) -> Vec2 {
    let width = settings.canvas_width as f32;
    let height = settings.canvas_height as f32;
    let u = 0.5 + settings.close_offset.x / settings.size;
    let v = 0.5 - settings.close_offset.y / settings.size;

    Vec2::new(u * width - glyph_size * 0.3, v * height - glyph_size * 0.6)
}
