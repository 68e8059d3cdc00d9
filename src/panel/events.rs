//! Requests the panel controller honours besides the store selection.
use bevy::prelude::Message;

/// Rebuilds the panel for an already selected section in front of the
/// current camera pose.
#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub struct ReopenPanel {
    pub key: String,
}

impl ReopenPanel {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}
