//! UI state shape, the named actions that change it, and the pure reducer.
use serde::Serialize;

/// UI intent shared by the sidebar, the panel controller, and the helpers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UiState {
    /// Whether debug helpers (axes, grid) are shown.
    pub helpers: bool,
    /// Key of the section whose panel should be open.
    pub selected_planet: Option<String>,
    /// Every selectable section key, in display order.
    pub planet_keys: Vec<String>,
}

/// The only mutations the store accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    ToggleHelpers,
    SetHelpers(bool),
    SetSelectedPlanet(Option<String>),
    SetPlanetKeys(Vec<String>),
}

impl UiAction {
    /// Convenience for selecting a section by key.
    pub fn select(key: impl Into<String>) -> Self {
        Self::SetSelectedPlanet(Some(key.into()))
    }

    pub fn clear_selection() -> Self {
        Self::SetSelectedPlanet(None)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::ToggleHelpers => "toggleHelpers",
            Self::SetHelpers(_) => "setHelpers",
            Self::SetSelectedPlanet(_) => "setSelectedPlanet",
            Self::SetPlanetKeys(_) => "setPlanetKeys",
        }
    }
}

/// Computes the next state. Only the field named by the action changes.
pub fn reduce(state: &UiState, action: &UiAction) -> UiState {
    let mut next = state.clone();
    match action {
        UiAction::ToggleHelpers => next.helpers = !state.helpers,
        UiAction::SetHelpers(value) => next.helpers = *value,
        UiAction::SetSelectedPlanet(key) => next.selected_planet = key.clone(),
        UiAction::SetPlanetKeys(keys) => next.planet_keys = keys.clone(),
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggling_twice_restores_helpers() {
        for initial in [false, true] {
            let state = UiState {
                helpers: initial,
                ..Default::default()
            };
            let once = reduce(&state, &UiAction::ToggleHelpers);
            let twice = reduce(&once, &UiAction::ToggleHelpers);

            assert_eq!(once.helpers, !initial);
            assert_eq!(twice, state);
        }
    }

    #[test]
    fn unrelated_actions_commute() {
        let state = UiState::default();
        let select = UiAction::select("mars");
        let helpers = UiAction::SetHelpers(true);

        let forward = reduce(&reduce(&state, &select), &helpers);
        let backward = reduce(&reduce(&state, &helpers), &select);
        assert_eq!(forward, backward);
    }

    #[test]
    fn reducer_leaves_input_untouched() {
        let state = UiState {
            helpers: true,
            selected_planet: Some("venus".into()),
            planet_keys: vec!["venus".into()],
        };
        let snapshot = state.clone();
        let _ = reduce(&state, &UiAction::SetPlanetKeys(Vec::new()));
        assert_eq!(state, snapshot);
    }

    #[test]
    fn action_names_match_store_vocabulary() {
        assert_eq!(UiAction::ToggleHelpers.name(), "toggleHelpers");
        assert_eq!(UiAction::clear_selection().name(), "setSelectedPlanet");
    }
}
