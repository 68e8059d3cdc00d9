//! Observable UI store: dispatch entry point plus synchronous subscribers.
use std::fmt;

use bevy::prelude::*;

use super::state::{reduce, UiAction, UiState};

type Subscriber = Box<dyn Fn(&UiState) + Send + Sync>;

/// Identifies a registered subscriber so it can be removed again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Single source of truth for UI intent.
///
/// State only changes through [`UiStore::dispatch`]; every dispatch notifies
/// all subscribers, in subscription order, before returning. A subscriber
/// cannot dispatch back into the store because the store is exclusively
/// borrowed for the whole notification pass.
#[derive(Resource)]
pub struct UiStore {
    state: UiState,
    revision: u64,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl UiStore {
    pub fn new() -> Self {
        Self::with_state(UiState::default())
    }

    pub fn with_state(state: UiState) -> Self {
        Self {
            state,
            revision: 0,
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn helpers(&self) -> bool {
        self.state.helpers
    }

    pub fn selected_planet(&self) -> Option<&str> {
        self.state.selected_planet.as_deref()
    }

    pub fn planet_keys(&self) -> &[String] {
        &self.state.planet_keys
    }

    /// Number of dispatches committed so far.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Applies an action and notifies every subscriber.
    pub fn dispatch(&mut self, action: UiAction) {
        debug!(target: "ui_store", "dispatch {}: {:?}", action.name(), action);
        self.state = reduce(&self.state, &action);
        self.revision = self.revision.saturating_add(1);

        for (_, subscriber) in &self.subscribers {
            subscriber(&self.state);
        }
    }

    /// Registers a callback invoked after every committed dispatch.
    pub fn subscribe<F>(&mut self, subscriber: F) -> SubscriptionId
    where
        F: Fn(&UiState) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    /// Removes a subscriber; returns `false` when the id was unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(existing, _)| *existing != id);
        self.subscribers.len() != before
    }
}

impl Default for UiStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for UiStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UiStore")
            .field("state", &self.state)
            .field("revision", &self.revision)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
