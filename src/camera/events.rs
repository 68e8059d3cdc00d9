//! Camera requests raised by other modules.
use bevy::prelude::Message;

/// Asks the camera to glide back to its home position.
#[derive(Message, Debug, Clone, Copy, Default)]
pub struct ResetView;
