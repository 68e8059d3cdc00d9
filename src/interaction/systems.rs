// src/interaction/systems.rs
//
// Pointer picking, select-by-key handling, and keyboard shortcuts. Every
// outcome is a store dispatch or a panel reopen request; panels themselves
// are reconciled elsewhere.

use bevy::{
    ecs::message::{MessageReader, MessageWriter},
    prelude::*,
    window::PrimaryWindow,
};

use crate::camera::components::OrbitCamera;
use crate::panel::{components::CloseButton, ReopenPanel};
use crate::scene::components::CelestialBody;
use crate::store::{UiAction, UiStore};

use super::{
    events::SelectSection,
    raycast::{cursor_to_ndc, ray_from_ndc, resolve_click},
};

const DIGIT_KEYS: [KeyCode; 9] = [
    KeyCode::Digit1,
    KeyCode::Digit2,
    KeyCode::Digit3,
    KeyCode::Digit4,
    KeyCode::Digit5,
    KeyCode::Digit6,
    KeyCode::Digit7,
    KeyCode::Digit8,
    KeyCode::Digit9,
];

/// Selects `key`, or asks for its panel to be rebuilt when it is already
/// the selection.
pub fn select_or_reopen(
    store: &mut UiStore,
    reopen_requests: &mut MessageWriter<ReopenPanel>,
    key: String,
) {
    if store.selected_planet() == Some(key.as_str()) {
        reopen_requests.write(ReopenPanel::new(key));
    } else {
        store.dispatch(UiAction::select(key));
    }
}

/// True while the pointer is over any interactive UI node.
pub fn pointer_over_ui<'a>(interactions: impl IntoIterator<Item = &'a Interaction>) -> bool {
    interactions
        .into_iter()
        .any(|interaction| *interaction != Interaction::None)
}

/// Raycasts a left click against every body and the open panel's close quad.
#[allow(clippy::too_many_arguments)]
pub fn pick_on_click(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    camera_query: Query<(&Camera, &GlobalTransform), With<OrbitCamera>>,
    ui_nodes: Query<&Interaction, With<Node>>,
    bodies: Query<(&CelestialBody, &GlobalTransform)>,
    close_buttons: Query<(&CloseButton, &GlobalTransform)>,
    mut store: ResMut<UiStore>,
    mut reopen_requests: MessageWriter<ReopenPanel>,
) {
    if !buttons.just_released(MouseButton::Left) {
        return;
    }

    // Clicks on the sidebar belong to the sidebar.
    if pointer_over_ui(ui_nodes.iter()) {
        return;
    }

    let Ok(window) = windows.single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };
    let Ok((camera, camera_transform)) = camera_query.single() else {
        return;
    };

    let Some(ndc) = cursor_to_ndc(cursor, Vec2::new(window.width(), window.height())) else {
        return;
    };
    let world_from_clip =
        Mat4::from(camera_transform.affine()) * camera.clip_from_view().inverse();
    let Some(ray) = ray_from_ndc(world_from_clip, ndc) else {
        return;
    };

    let action = resolve_click(
        ray,
        bodies
            .iter()
            .map(|(body, transform)| (body.key.as_str(), transform.translation(), body.radius)),
        close_buttons
            .iter()
            .map(|(close, transform)| (transform.affine(), close.half_extent)),
    );

    match action {
        Some(UiAction::SetSelectedPlanet(Some(key))) => {
            debug!("Body '{}' clicked", key);
            select_or_reopen(&mut store, &mut reopen_requests, key);
        }
        Some(action) => {
            debug!("Close control clicked");
            store.dispatch(action);
        }
        None => {}
    }
}

/// Maps keys 1..9 onto the section keys in display order.
pub fn digit_shortcuts(
    keyboard: Res<ButtonInput<KeyCode>>,
    store: Res<UiStore>,
    mut requests: MessageWriter<SelectSection>,
) {
    for (index, code) in DIGIT_KEYS.iter().enumerate() {
        if !keyboard.just_pressed(*code) {
            continue;
        }
        if let Some(key) = store.planet_keys().get(index) {
            requests.write(SelectSection::new(key.clone()));
        }
    }
}

/// Treats each select-by-key request like a click on that body.
pub fn handle_select_section(
    mut requests: MessageReader<SelectSection>,
    bodies: Query<&CelestialBody>,
    mut store: ResMut<UiStore>,
    mut reopen_requests: MessageWriter<ReopenPanel>,
) {
    for request in requests.read() {
        if !bodies.iter().any(|body| body.key == request.key) {
            debug!("Ignoring selection of unknown body '{}'", request.key);
            continue;
        }
        select_or_reopen(&mut store, &mut reopen_requests, request.key.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::message::Messages;

    use crate::store::UiState;

    fn selection_app() -> App {
        let mut app = App::new();
        app.init_resource::<ButtonInput<KeyCode>>()
            .insert_resource(UiStore::with_state(UiState {
                planet_keys: vec!["skills".into(), "education".into()],
                ..default()
            }))
            .add_message::<SelectSection>()
            .add_message::<ReopenPanel>()
            .add_systems(Update, (digit_shortcuts, handle_select_section).chain());

        for key in ["skills", "education"] {
            app.world_mut().spawn(CelestialBody {
                key: key.into(),
                radius: 2.0,
            });
        }
        app
    }

    #[test]
    fn select_signal_dispatches_known_bodies_only() {
        let mut app = selection_app();
        app.world_mut()
            .write_message(SelectSection::new("education"));
        app.update();
        assert_eq!(
            app.world().resource::<UiStore>().selected_planet(),
            Some("education")
        );

        app.world_mut().write_message(SelectSection::new("pluto"));
        app.update();
        assert_eq!(
            app.world().resource::<UiStore>().selected_planet(),
            Some("education")
        );
    }

    #[test]
    fn digit_keys_follow_display_order() {
        let mut app = selection_app();
        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::Digit1);
        app.update();
        assert_eq!(
            app.world().resource::<UiStore>().selected_planet(),
            Some("skills")
        );

        // No third key: nothing changes.
        let revision = app.world().resource::<UiStore>().revision();
        {
            let mut keyboard = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
            keyboard.clear();
            keyboard.press(KeyCode::Digit3);
        }
        app.update();
        assert_eq!(app.world().resource::<UiStore>().revision(), revision);
    }

    #[test]
    fn selecting_the_current_section_again_requests_a_reopen() {
        let mut app = selection_app();
        app.world_mut()
            .write_message(SelectSection::new("skills"));
        app.update();
        let revision = app.world().resource::<UiStore>().revision();

        app.world_mut()
            .write_message(SelectSection::new("skills"));
        app.update();

        let world = app.world();
        assert_eq!(world.resource::<UiStore>().revision(), revision);
        let requests = world.resource::<Messages<ReopenPanel>>();
        let mut cursor = requests.get_cursor();
        let keys: Vec<&str> = cursor.read(requests).map(|r| r.key.as_str()).collect();
        assert_eq!(keys, ["skills"]);
    }

    #[test]
    fn any_active_ui_node_captures_the_pointer() {
        assert!(!pointer_over_ui(&[Interaction::None, Interaction::None]));
        assert!(pointer_over_ui(&[Interaction::None, Interaction::Hovered]));
        assert!(pointer_over_ui(&[Interaction::Pressed]));
        assert!(!pointer_over_ui(std::iter::empty::<&Interaction>()));
    }
}
