// src/ui/sidebar/components.rs
//
// Sidebar components, the view model derived from the store, and the
// resource remembering what is currently rendered.

use bevy::prelude::*;

use crate::store::UiState;

pub const HEADER_TEXT: &str = "UI Controls";
pub const PLANETS_HEADING: &str = "Planets";
pub const LOADING_TEXT: &str = "Loading...";
pub const RESET_VIEW_TEXT: &str = "Reset View";

/// What a sidebar button does when pressed.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub enum SidebarButton {
    ToggleHelpers,
    Select(String),
    ResetView,
}

/// One row of the sidebar, top to bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SidebarEntry {
    Header(&'static str),
    Button { action: SidebarButton, label: String },
    Divider,
    Heading(&'static str),
    Placeholder(&'static str),
}

/// Part of the store state the sidebar renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarSnapshot {
    pub helpers: bool,
    pub planet_keys: Vec<String>,
}

impl SidebarSnapshot {
    pub fn from_state(state: &UiState) -> Self {
        Self {
            helpers: state.helpers,
            planet_keys: state.planet_keys.clone(),
        }
    }

    /// The rows to render for this snapshot.
    pub fn entries(&self) -> Vec<SidebarEntry> {
        let mut entries = vec![
            SidebarEntry::Header(HEADER_TEXT),
            SidebarEntry::Button {
                action: SidebarButton::ToggleHelpers,
                label: format!(
                    "Toggle Helpers ({})",
                    if self.helpers { "On" } else { "Off" }
                ),
            },
            SidebarEntry::Divider,
            SidebarEntry::Heading(PLANETS_HEADING),
        ];

        if self.planet_keys.is_empty() {
            entries.push(SidebarEntry::Placeholder(LOADING_TEXT));
        } else {
            entries.extend(self.planet_keys.iter().map(|key| SidebarEntry::Button {
                action: SidebarButton::Select(key.clone()),
                label: key.clone(),
            }));
        }

        entries.push(SidebarEntry::Button {
            action: SidebarButton::ResetView,
            label: RESET_VIEW_TEXT.to_string(),
        });
        entries
    }
}

/// Root node holding the sidebar contents.
#[derive(Resource, Debug, Clone, Copy)]
pub struct SidebarRoot(pub Entity);

/// Tracks the rendered contents so rebuilds only happen on real changes.
#[derive(Resource, Debug, Default)]
pub struct SidebarView {
    pub seen_revision: Option<u64>,
    pub rendered: Option<SidebarSnapshot>,
    pub contents: Option<Entity>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_keys_show_loading_placeholder() {
        let snapshot = SidebarSnapshot::from_state(&UiState::default());
        let entries = snapshot.entries();

        assert_eq!(entries[0], SidebarEntry::Header("UI Controls"));
        assert!(entries.contains(&SidebarEntry::Placeholder("Loading...")));
        assert!(entries.contains(&SidebarEntry::Button {
            action: SidebarButton::ToggleHelpers,
            label: "Toggle Helpers (Off)".into(),
        }));
        assert_eq!(
            entries.last(),
            Some(&SidebarEntry::Button {
                action: SidebarButton::ResetView,
                label: "Reset View".into(),
            })
        );
    }

    #[test]
    fn one_button_per_key_in_order() {
        let snapshot = SidebarSnapshot {
            helpers: true,
            planet_keys: vec!["skills".into(), "contact".into()],
        };
        let selects: Vec<(SidebarButton, String)> = snapshot
            .entries()
            .into_iter()
            .filter_map(|entry| match entry {
                SidebarEntry::Button {
                    action: action @ SidebarButton::Select(_),
                    label,
                } => Some((action, label)),
                _ => None,
            })
            .collect();

        assert_eq!(
            selects,
            [
                (SidebarButton::Select("skills".into()), "skills".to_string()),
                (SidebarButton::Select("contact".into()), "contact".to_string()),
            ]
        );
        assert!(!snapshot
            .entries()
            .contains(&SidebarEntry::Placeholder("Loading...")));
        assert!(snapshot.entries().contains(&SidebarEntry::Button {
            action: SidebarButton::ToggleHelpers,
            label: "Toggle Helpers (On)".into(),
        }));
    }
}
