//! Core module hosting configuration, error types, and frame ordering.
pub mod config;
pub mod errors;
pub mod plugin;

pub use config::OrreryConfig;
pub use errors::OrreryError;
pub use plugin::{CorePlugin, FrameStep};
