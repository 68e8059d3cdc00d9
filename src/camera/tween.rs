//! Linear camera interpolation used for zoom-in and zoom-back.
use bevy::prelude::*;
use serde::Deserialize;

/// How concurrent zoom-in and zoom-back interpolations interact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoomPolicy {
    /// Both may run; each frame zoom-in is applied first and zoom-back last,
    /// so zoom-back wins while both are active.
    #[default]
    LastWriteWins,
    /// Starting one interpolation cancels the other.
    Exclusive,
}

/// Moves a point from `start` to `target`, adding `step` to the progress
/// every frame until it reaches 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraTween {
    start: Vec3,
    target: Vec3,
    progress: f32,
    step: f32,
    active: bool,
}

impl CameraTween {
    pub const fn idle() -> Self {
        Self {
            start: Vec3::ZERO,
            target: Vec3::ZERO,
            progress: 0.0,
            step: 1.0,
            active: false,
        }
    }

    pub fn start(&mut self, from: Vec3, to: Vec3, step: f32) {
        self.start = from;
        self.target = to;
        self.progress = 0.0;
        self.step = step.max(f32::EPSILON);
        self.active = true;
    }

    pub fn cancel(&mut self) {
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Fraction of the way from start to target, never above 1.
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Advances one step and returns the new position, or `None` once idle.
    /// The step that reaches 1 lands exactly on the target.
    pub fn advance(&mut self) -> Option<Vec3> {
        if !self.active {
            return None;
        }

        self.progress = (self.progress + self.step).min(1.0);
        if self.progress >= 1.0 {
            self.active = false;
            return Some(self.target);
        }

        Some(self.start.lerp(self.target, self.progress))
    }
}

impl Default for CameraTween {
    fn default() -> Self {
        Self::idle()
    }
}

/// The two camera interpolations driven by panel open and close.
#[derive(Resource, Debug, Clone)]
pub struct CameraZoom {
    zoom_in: CameraTween,
    zoom_back: CameraTween,
    policy: ZoomPolicy,
    zoom_in_step: f32,
    zoom_back_step: f32,
}

impl CameraZoom {
    pub fn new(policy: ZoomPolicy, zoom_in_step: f32, zoom_back_step: f32) -> Self {
        Self {
            zoom_in: CameraTween::idle(),
            zoom_back: CameraTween::idle(),
            policy,
            zoom_in_step,
            zoom_back_step,
        }
    }

    pub fn policy(&self) -> ZoomPolicy {
        self.policy
    }

    pub fn begin_zoom_in(&mut self, from: Vec3, to: Vec3) {
        if self.policy == ZoomPolicy::Exclusive {
            self.zoom_back.cancel();
        }
        self.zoom_in.start(from, to, self.zoom_in_step);
    }

    pub fn begin_zoom_back(&mut self, from: Vec3, to: Vec3) {
        if self.policy == ZoomPolicy::Exclusive {
            self.zoom_in.cancel();
        }
        self.zoom_back.start(from, to, self.zoom_back_step);
    }

    pub fn zoom_in(&self) -> &CameraTween {
        &self.zoom_in
    }

    pub fn zoom_back(&self) -> &CameraTween {
        &self.zoom_back
    }

    pub fn is_active(&self) -> bool {
        self.zoom_in.is_active() || self.zoom_back.is_active()
    }

    /// Steps both interpolations; the one applied last decides the position.
    pub fn advance(&mut self) -> Option<Vec3> {
        let zoomed_in = self.zoom_in.advance();
        let zoomed_back = self.zoom_back.advance();
        zoomed_back.or(zoomed_in)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: Vec3 = Vec3::new(0.0, 0.0, 80.0);
    const B: Vec3 = Vec3::new(0.0, 0.0, 25.0);

    fn strictly_between(point: Vec3, a: Vec3, b: Vec3) -> bool {
        let along = (point - a).dot(b - a) / (b - a).length_squared();
        along > 0.0 && along < 1.0 && point.distance(a.lerp(b, along)) < 1e-4
    }

    #[test]
    fn lands_exactly_on_target_once_progress_reaches_one() {
        let mut tween = CameraTween::idle();
        tween.start(A, B, 0.02);

        let mut position = A;
        let mut frames = 0;
        while let Some(next) = tween.advance() {
            frames += 1;
            if frames == 25 {
                assert!(strictly_between(next, A, B));
            }
            position = next;
        }

        assert!((50..=51).contains(&frames));
        assert_eq!(position, B);
        assert!(!tween.is_active());
        assert_eq!(tween.progress(), 1.0);
    }

    #[test]
    fn uneven_step_adds_full_increments_then_clamps() {
        let mut tween = CameraTween::idle();
        tween.start(A, B, 0.3);

        for expected in [0.3, 0.6, 0.9] {
            let position = tween.advance().expect("tween active");
            assert!(position.distance(A.lerp(B, expected)) < 1e-4);
        }
        assert_eq!(tween.advance(), Some(B));
        assert_eq!(tween.advance(), None);
    }

    #[test]
    fn last_write_wins_prefers_zoom_back_in_either_order() {
        let home = Vec3::new(0.0, 0.0, 100.0);

        for zoom_in_first in [true, false] {
            let mut zoom = CameraZoom::new(ZoomPolicy::LastWriteWins, 0.5, 0.25);
            if zoom_in_first {
                zoom.begin_zoom_in(A, B);
                zoom.begin_zoom_back(A, home);
            } else {
                zoom.begin_zoom_back(A, home);
                zoom.begin_zoom_in(A, B);
            }

            assert!(zoom.zoom_in().is_active() && zoom.zoom_back().is_active());
            assert_eq!(zoom.advance(), Some(A.lerp(home, 0.25)));
            // zoom-in finishes on this frame but zoom-back still overrides it
            assert_eq!(zoom.advance(), Some(A.lerp(home, 0.5)));
            assert!(!zoom.zoom_in().is_active());
            assert_eq!(zoom.advance(), Some(A.lerp(home, 0.75)));
            assert_eq!(zoom.advance(), Some(home));
            assert_eq!(zoom.advance(), None);
        }
    }

    #[test]
    fn exclusive_policy_cancels_the_earlier_zoom() {
        let home = Vec3::new(0.0, 0.0, 100.0);

        let mut zoom = CameraZoom::new(ZoomPolicy::Exclusive, 0.5, 0.5);
        zoom.begin_zoom_in(A, B);
        zoom.begin_zoom_back(A, home);
        assert!(!zoom.zoom_in().is_active());
        assert_eq!(zoom.advance(), Some(A.lerp(home, 0.5)));

        let mut zoom = CameraZoom::new(ZoomPolicy::Exclusive, 0.5, 0.5);
        zoom.begin_zoom_back(A, home);
        zoom.begin_zoom_in(A, B);
        assert!(!zoom.zoom_back().is_active());
        assert_eq!(zoom.advance(), Some(A.lerp(B, 0.5)));
        assert_eq!(zoom.advance(), Some(B));
        assert!(!zoom.is_active());
    }

    #[test]
    fn zoom_policy_deserialises_from_snake_case() {
        #[derive(Deserialize)]
        struct Wrapper {
            policy: ZoomPolicy,
        }

        let parsed: Wrapper = toml::from_str("policy = \"exclusive\"").expect("parses");
        assert_eq!(parsed.policy, ZoomPolicy::Exclusive);
    }
}
