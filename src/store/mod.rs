//! UI state store: helper visibility, current selection, and section keys.
pub mod plugin;
pub mod state;
pub mod ui_store;

pub use plugin::StorePlugin;
pub use state::{UiAction, UiState};
pub use ui_store::UiStore;
