//! CorePlugin wires configuration, frame ordering, and the animation loop handle.
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use bevy::prelude::*;
#[cfg(feature = "core_debug")]
use bevy::time::TimerMode;

use crate::content::SectionTable;

use super::config::OrreryConfig;

#[cfg(feature = "core_debug")]
#[derive(Resource)]
struct DebugTickTimer {
    timer: Timer,
}

#[cfg(feature = "core_debug")]
impl Default for DebugTickTimer {
    fn default() -> Self {
        Self {
            timer: Timer::from_seconds(1.0, TimerMode::Repeating),
        }
    }
}

/// Ordered stages of a single frame. The animation stages only run while the
/// [`AnimationLoop`] is active.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameStep {
    /// Pointer, keyboard, and sidebar input turned into store actions.
    Input,
    /// The panel controller reconciles scene entities with the store.
    Selection,
    Spin,
    Orbit,
    Billboard,
    CameraTween,
    Controls,
    /// Screen-space overlays that follow world positions.
    Overlay,
}

/// Cloneable stop token for the per-frame animation loop.
#[derive(Debug, Clone)]
pub struct AnimationHandle {
    running: Arc<AtomicBool>,
}

impl AnimationHandle {
    fn new(running: bool) -> Self {
        Self {
            running: Arc::new(AtomicBool::new(running)),
        }
    }

    /// Halts the loop; no animation stage runs from the next frame on.
    pub fn stop(&self) {
        self.running.store(false, Ordering::Release);
    }

    pub fn resume(&self) {
        self.running.store(true, Ordering::Release);
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }
}

/// Owns the loop's stop handle and counts animated frames.
#[derive(Resource, Debug)]
pub struct AnimationLoop {
    handle: AnimationHandle,
    frames: u64,
}

impl AnimationLoop {
    pub fn new() -> Self {
        Self {
            handle: AnimationHandle::new(true),
            frames: 0,
        }
    }

    /// Returns a handle that can stop or resume the loop from anywhere.
    pub fn handle(&self) -> AnimationHandle {
        self.handle.clone()
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_running()
    }

    /// Number of frames the animation stages have run for.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    fn record_frame(&mut self) {
        self.frames = self.frames.saturating_add(1);
    }
}

impl Default for AnimationLoop {
    fn default() -> Self {
        Self::new()
    }
}

/// Run condition gating every animation stage.
pub fn animation_running(animation: Res<AnimationLoop>) -> bool {
    animation.is_running()
}

/// Registers configuration, frame ordering, and loop control.
#[derive(Debug, Clone, Default)]
pub struct CorePlugin {
    config: Option<OrreryConfig>,
}

impl CorePlugin {
    /// Uses the provided configuration instead of reading it from disk.
    pub fn with_config(config: OrreryConfig) -> Self {
        Self {
            config: Some(config),
        }
    }
}

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        let config = self
            .config
            .clone()
            .unwrap_or_else(OrreryConfig::load_or_default);

        if !app.world().contains_resource::<SectionTable>() {
            app.insert_resource(SectionTable::load_or_builtin());
        }

        app.insert_resource(config)
            .init_resource::<AnimationLoop>()
            .configure_sets(
                Update,
                (
                    FrameStep::Input,
                    FrameStep::Selection,
                    FrameStep::Spin,
                    FrameStep::Orbit,
                    FrameStep::Billboard,
                    FrameStep::CameraTween,
                    FrameStep::Controls,
                    FrameStep::Overlay,
                )
                    .chain(),
            )
            .configure_sets(
                Update,
                (
                    FrameStep::Spin,
                    FrameStep::Orbit,
                    FrameStep::Billboard,
                    FrameStep::CameraTween,
                    FrameStep::Controls,
                )
                    .run_if(animation_running),
            )
            .add_systems(Startup, log_startup_config)
            .add_systems(Update, toggle_animation_loop.in_set(FrameStep::Input))
            .add_systems(Update, count_animated_frames.in_set(FrameStep::Spin));

        #[cfg(feature = "core_debug")]
        {
            use bevy::diagnostic::{FrameTimeDiagnosticsPlugin, LogDiagnosticsPlugin};

            if !app.is_plugin_added::<FrameTimeDiagnosticsPlugin>() {
                app.add_plugins(FrameTimeDiagnosticsPlugin::default());
            }
            app.add_plugins(LogDiagnosticsPlugin::default())
                .insert_resource(DebugTickTimer::default())
                .add_systems(Update, log_loop_ticks);
        }
    }
}

fn count_animated_frames(mut animation: ResMut<AnimationLoop>) {
    animation.record_frame();
}

fn toggle_animation_loop(keyboard: Res<ButtonInput<KeyCode>>, animation: Res<AnimationLoop>) {
    if !keyboard.just_pressed(KeyCode::KeyP) {
        return;
    }

    let handle = animation.handle();
    if handle.is_running() {
        handle.stop();
        info!("Animation loop stopped after {} frames", animation.frames());
    } else {
        handle.resume();
        info!("Animation loop resumed");
    }
}

fn log_startup_config(config: Res<OrreryConfig>, sections: Res<SectionTable>) {
    info!(
        "CorePlugin initialised: camera at {:?}, zoom policy {:?}, panel canvas {}x{}, {} sections",
        config.camera.start_position,
        config.zoom.policy,
        config.panel.canvas_width,
        config.panel.canvas_height,
        sections.len()
    );
}

#[cfg(feature = "core_debug")]
fn log_loop_ticks(mut timer: ResMut<DebugTickTimer>, time: Res<Time>, animation: Res<AnimationLoop>) {
    if timer.timer.tick(time.delta()).just_finished() {
        info!(
            target: "core_debug",
            "Animated frames: {} | running: {} | real dt: {:.4}s",
            animation.frames(),
            animation.is_running(),
            time.delta_secs(),
        );
    }
}
