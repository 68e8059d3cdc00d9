// src/panel/components.rs
//
// Components and the tracker resource for the single open info panel.

use bevy::prelude::*;

/// Textured plane showing one section's content.
#[derive(Component, Debug, Clone)]
pub struct InfoPanel {
    pub key: String,
}

/// Quad attached to the panel that closes it when clicked.
#[derive(Component, Debug, Clone, Copy)]
pub struct CloseButton {
    /// Half width and half height in the quad's local XY plane.
    pub half_extent: Vec2,
}

/// Grows the panel's scale from zero to one after it opens.
#[derive(Component, Debug, Clone, Copy)]
pub struct PanelReveal {
    pub scale: f32,
    pub speed: f32,
}

impl PanelReveal {
    pub fn new(speed: f32) -> Self {
        Self { scale: 0.0, speed }
    }

    /// Advances the reveal and returns the new scale.
    pub fn step(&mut self) -> f32 {
        self.scale = (self.scale + self.speed).min(1.0);
        self.scale
    }

    pub fn is_finished(&self) -> bool {
        self.scale >= 1.0
    }
}

/// 2D camera rendering a panel's UI tree into its texture.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct PanelCanvasCamera;

/// Root node of the UI tree drawn onto a panel canvas.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct PanelCanvasRoot;

/// Every entity making up the open panel.
#[derive(Debug, Clone)]
pub struct OpenPanel {
    pub key: String,
    pub panel: Entity,
    pub close_button: Entity,
    pub canvas_camera: Entity,
    pub canvas_root: Entity,
}

impl OpenPanel {
    /// Top-level entities; the close button goes with its parent panel.
    fn roots(&self) -> [Entity; 3] {
        [self.panel, self.canvas_camera, self.canvas_root]
    }
}

/// Tracks the panel entities and the selection they were built for.
///
/// Only the panel controller writes to this resource, so at most one panel
/// exists at any time.
#[derive(Resource, Debug, Default)]
pub struct PanelTracker {
    open: Option<OpenPanel>,
    shown: Option<String>,
}

impl PanelTracker {
    pub fn open_panel(&self) -> Option<&OpenPanel> {
        self.open.as_ref()
    }

    /// Selection key the scene currently reflects.
    pub fn shown(&self) -> Option<&str> {
        self.shown.as_deref()
    }

    pub(super) fn set_shown(&mut self, key: Option<String>) {
        self.shown = key;
    }

    pub(super) fn record(&mut self, open: OpenPanel) {
        self.shown = Some(open.key.clone());
        self.open = Some(open);
    }

    /// Forgets the open panel, returning the entities to despawn.
    pub(super) fn take_roots(&mut self) -> Option<[Entity; 3]> {
        self.open.take().map(|open| open.roots())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reveal_saturates_at_full_scale() {
        let mut reveal = PanelReveal::new(0.4);
        assert_eq!(reveal.step(), 0.4);
        reveal.step();
        assert_eq!(reveal.step(), 1.0);
        assert!(reveal.is_finished());
        assert_eq!(reveal.step(), 1.0);
    }
}
