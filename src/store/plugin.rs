//! StorePlugin installs the UI store and its diagnostic subscriber.
use bevy::prelude::*;

use super::ui_store::UiStore;

pub struct StorePlugin;

impl Plugin for StorePlugin {
    fn build(&self, app: &mut App) {
        let mut store = UiStore::new();
        store.subscribe(|state| match serde_json::to_string(state) {
            Ok(json) => debug!(target: "ui_store", "state {}", json),
            Err(err) => warn!("Failed to serialise UI state: {}", err),
        });

        app.insert_resource(store);
        info!("StorePlugin registered");
    }
}
