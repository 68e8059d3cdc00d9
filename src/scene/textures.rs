// src/scene/textures.rs
//
// Asynchronous texture loading for bodies and the sky. Materials keep their
// flat colour until the image has loaded, and for good if it fails.

use bevy::{asset::LoadState, prelude::*};

use crate::content::bodies::body_spec;
use crate::core::{OrreryConfig, OrreryError};

use super::components::{CelestialBody, SkySphere};

/// A texture request waiting on the asset server.
#[derive(Debug, Clone)]
pub struct PendingTexture {
    pub path: String,
    pub image: Handle<Image>,
    pub material: Handle<StandardMaterial>,
}

#[derive(Resource, Debug, Default)]
pub struct PendingTextures {
    pending: Vec<PendingTexture>,
}

impl PendingTextures {
    pub fn push(&mut self, texture: PendingTexture) {
        self.pending.push(texture);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// What happened to a texture request this frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextureOutcome {
    Waiting,
    Loaded,
    Failed(String),
}

impl TextureOutcome {
    pub fn from_load_state(state: Option<LoadState>) -> Self {
        match state {
            Some(LoadState::Loaded) => Self::Loaded,
            Some(LoadState::Failed(err)) => Self::Failed(err.to_string()),
            // An untracked handle never finishes loading.
            None => Self::Failed("asset is not tracked by the asset server".to_string()),
            Some(_) => Self::Waiting,
        }
    }
}

/// Starts loading the texture of every body and of the sky sphere.
pub fn request_textures(
    asset_server: Res<AssetServer>,
    config: Res<OrreryConfig>,
    mut pending: ResMut<PendingTextures>,
    bodies: Query<(&CelestialBody, &MeshMaterial3d<StandardMaterial>)>,
    sky: Query<&MeshMaterial3d<StandardMaterial>, With<SkySphere>>,
) {
    for (body, material) in bodies.iter() {
        let Some(path) = body_spec(&body.key).and_then(|spec| spec.texture) else {
            continue;
        };
        pending.push(PendingTexture {
            path: path.to_string(),
            image: asset_server.load(path),
            material: material.0.clone(),
        });
    }

    if let (Some(path), Ok(material)) = (config.scene.sky_texture.as_ref(), sky.single()) {
        pending.push(PendingTexture {
            path: path.clone(),
            image: asset_server.load(path.clone()),
            material: material.0.clone(),
        });
    }

    info!("Requested {} textures", pending.len());
}

/// Applies finished textures to their materials and drops failed ones.
pub fn apply_loaded_textures(
    asset_server: Res<AssetServer>,
    mut pending: ResMut<PendingTextures>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    if pending.is_empty() {
        return;
    }

    pending.pending.retain(|texture| {
        match TextureOutcome::from_load_state(asset_server.get_load_state(texture.image.id())) {
            TextureOutcome::Waiting => true,
            TextureOutcome::Loaded => {
                if let Some(material) = materials.get_mut(texture.material.id()) {
                    material.base_color = Color::WHITE;
                    material.base_color_texture = Some(texture.image.clone());
                }
                debug!("Texture {} applied", texture.path);
                false
            }
            TextureOutcome::Failed(reason) => {
                warn!(
                    "{}. Keeping the flat colour.",
                    OrreryError::asset_load_failed(&texture.path, reason)
                );
                false
            }
        }
    });
}
