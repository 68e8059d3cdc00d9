// src/ui/sidebar/systems.rs
//
// Builds the sidebar from the store and turns button presses into actions.

use bevy::{ecs::message::MessageWriter, prelude::*};

use crate::camera::events::ResetView;
use crate::interaction::systems::select_or_reopen;
use crate::panel::ReopenPanel;
use crate::store::{UiAction, UiStore};

use super::components::{
    SidebarButton, SidebarEntry, SidebarRoot, SidebarSnapshot, SidebarView,
};

// Visual constants
const PANEL_WIDTH_PX: f32 = 200.0;
const BACKGROUND_COLOR: Color = Color::srgba(0.08, 0.08, 0.12, 0.85);
const BUTTON_COLOR: Color = Color::srgb(0.2, 0.2, 0.28);
const BUTTON_HOVER_COLOR: Color = Color::srgb(0.3, 0.3, 0.4);
const BUTTON_PRESSED_COLOR: Color = Color::srgb(0.45, 0.4, 0.2);
const DIVIDER_COLOR: Color = Color::srgb(0.35, 0.35, 0.4);
const TEXT_COLOR: Color = Color::WHITE;
const MUTED_TEXT_COLOR: Color = Color::srgb(0.6, 0.6, 0.65);
const HEADER_FONT_SIZE: f32 = 20.0;
const HEADING_FONT_SIZE: f32 = 16.0;
const BUTTON_FONT_SIZE: f32 = 14.0;

/// Creates the fixed sidebar container on the left edge. Its `Interaction`
/// keeps scene picking off while the pointer is over it.
pub fn setup_sidebar_root(mut commands: Commands) {
    let root = commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(0.0),
                top: Val::Px(0.0),
                width: Val::Px(PANEL_WIDTH_PX),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                padding: UiRect::all(Val::Px(12.0)),
                ..default()
            },
            BackgroundColor(BACKGROUND_COLOR),
            Interaction::default(),
            ZIndex(100),
            Name::new("Sidebar"),
        ))
        .id();

    commands.insert_resource(SidebarRoot(root));
    info!("Sidebar root created");
}

fn spawn_entry(parent: &mut ChildSpawnerCommands, entry: SidebarEntry) {
    match entry {
        SidebarEntry::Header(text) => {
            parent.spawn((
                Text::new(text),
                TextFont {
                    font_size: HEADER_FONT_SIZE,
                    ..default()
                },
                TextColor(TEXT_COLOR),
                Node {
                    margin: UiRect::bottom(Val::Px(10.0)),
                    ..default()
                },
            ));
        }
        SidebarEntry::Heading(text) => {
            parent.spawn((
                Text::new(text),
                TextFont {
                    font_size: HEADING_FONT_SIZE,
                    ..default()
                },
                TextColor(TEXT_COLOR),
                Node {
                    margin: UiRect::vertical(Val::Px(6.0)),
                    ..default()
                },
            ));
        }
        SidebarEntry::Placeholder(text) => {
            parent.spawn((
                Text::new(text),
                TextFont {
                    font_size: BUTTON_FONT_SIZE,
                    ..default()
                },
                TextColor(MUTED_TEXT_COLOR),
            ));
        }
        SidebarEntry::Divider => {
            parent.spawn((
                Node {
                    width: Val::Percent(100.0),
                    height: Val::Px(1.0),
                    margin: UiRect::vertical(Val::Px(10.0)),
                    ..default()
                },
                BackgroundColor(DIVIDER_COLOR),
            ));
        }
        SidebarEntry::Button { action, label } => {
            parent
                .spawn((
                    Button,
                    Node {
                        width: Val::Percent(100.0),
                        height: Val::Px(28.0),
                        margin: UiRect::bottom(Val::Px(4.0)),
                        padding: UiRect::horizontal(Val::Px(8.0)),
                        align_items: AlignItems::Center,
                        ..default()
                    },
                    BackgroundColor(BUTTON_COLOR),
                    action,
                ))
                .with_children(|button| {
                    button.spawn((
                        Text::new(label),
                        TextFont {
                            font_size: BUTTON_FONT_SIZE,
                            ..default()
                        },
                        TextColor(TEXT_COLOR),
                    ));
                });
        }
    }
}

/// Rebuilds the sidebar contents when the helpers flag or the keys change.
pub fn rebuild_sidebar(
    mut commands: Commands,
    store: Res<UiStore>,
    root: Res<SidebarRoot>,
    mut view: ResMut<SidebarView>,
) {
    if view.seen_revision == Some(store.revision()) {
        return;
    }
    view.seen_revision = Some(store.revision());

    let snapshot = SidebarSnapshot::from_state(store.state());
    if view.rendered.as_ref() == Some(&snapshot) {
        return;
    }

    if let Some(previous) = view.contents.take() {
        commands.entity(previous).despawn();
    }

    let contents = commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                ..default()
            },
            ChildOf(root.0),
        ))
        .with_children(|parent| {
            for entry in snapshot.entries() {
                spawn_entry(parent, entry);
            }
        })
        .id();

    debug!(
        "Sidebar rebuilt: helpers {}, {} keys",
        snapshot.helpers,
        snapshot.planet_keys.len()
    );
    view.contents = Some(contents);
    view.rendered = Some(snapshot);
}

/// Dispatches the action behind each pressed sidebar button.
pub fn handle_sidebar_buttons(
    mut interactions: Query<
        (&Interaction, &SidebarButton, &mut BackgroundColor),
        (Changed<Interaction>, With<Button>),
    >,
    mut store: ResMut<UiStore>,
    mut reset_requests: MessageWriter<ResetView>,
    mut reopen_requests: MessageWriter<ReopenPanel>,
) {
    for (interaction, button, mut background) in interactions.iter_mut() {
        background.0 = match interaction {
            Interaction::Pressed => BUTTON_PRESSED_COLOR,
            Interaction::Hovered => BUTTON_HOVER_COLOR,
            Interaction::None => BUTTON_COLOR,
        };

        if *interaction != Interaction::Pressed {
            continue;
        }

        match button {
            SidebarButton::ToggleHelpers => store.dispatch(UiAction::ToggleHelpers),
            SidebarButton::Select(key) => {
                select_or_reopen(&mut store, &mut reopen_requests, key.clone())
            }
            SidebarButton::ResetView => {
                store.dispatch(UiAction::clear_selection());
                reset_requests.write(ResetView);
            }
        }
    }
}
