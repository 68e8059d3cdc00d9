//! Store subscriber that turns helper visibility changes into edge events.
use std::{
    collections::VecDeque,
    sync::{Arc, Mutex, MutexGuard},
};

use bevy::prelude::*;

use crate::store::UiStore;

/// A genuine change in helper visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelperTransition {
    Shown,
    Hidden,
}

#[derive(Debug)]
struct EdgeState {
    last: bool,
    queue: VecDeque<HelperTransition>,
}

/// Shared between the store subscriber (writer) and the helper systems
/// (reader). Dispatches that leave `helpers` unchanged record nothing.
#[derive(Resource, Debug, Clone)]
pub struct HelperEdgeDetector {
    inner: Arc<Mutex<EdgeState>>,
}

impl HelperEdgeDetector {
    pub fn new(initial: bool) -> Self {
        Self {
            inner: Arc::new(Mutex::new(EdgeState {
                last: initial,
                queue: VecDeque::new(),
            })),
        }
    }

    /// Creates a detector seeded with the store's current value and
    /// subscribes it to every later dispatch.
    pub fn attach(store: &mut UiStore) -> Self {
        let detector = Self::new(store.helpers());
        let subscriber = detector.clone();
        store.subscribe(move |state| subscriber.observe(state.helpers));
        detector
    }

    fn lock(&self) -> MutexGuard<'_, EdgeState> {
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    pub fn observe(&self, helpers: bool) {
        let mut state = self.lock();
        if state.last == helpers {
            return;
        }
        state.last = helpers;
        state.queue.push_back(if helpers {
            HelperTransition::Shown
        } else {
            HelperTransition::Hidden
        });
    }

    /// Takes every transition recorded since the last call, oldest first.
    pub fn drain(&self) -> Vec<HelperTransition> {
        self.lock().queue.drain(..).collect()
    }
}
