//! Messages that select a section without a pointer pick.
use bevy::prelude::Message;

/// Select-by-key signal: behaves exactly like clicking the named body.
#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub struct SelectSection {
    pub key: String,
}

impl SelectSection {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}
